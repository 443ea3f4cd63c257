//! Keyword classification of cleaned product names.
//!
//! A [`Classifier`] holds an ordered vocabulary of category phrases. The first
//! phrase that matches a name wins, so more specific phrases must come before
//! the general phrases they contain.

pub mod vocabulary;

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::debug;

pub use vocabulary::DEFAULT_VOCABULARY;

/// Label stored for names that match no vocabulary phrase.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Category assigned to a product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    /// A phrase from the vocabulary, in its configured spelling.
    Category(String),
    /// No phrase matched.
    Uncategorized,
}

impl Keyword {
    /// Returns the stored label.
    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Category(label) => label,
            Keyword::Uncategorized => UNCATEGORIZED,
        }
    }

    /// Returns true if a vocabulary phrase matched.
    pub fn is_categorized(&self) -> bool {
        matches!(self, Keyword::Category(_))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Keyword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How a vocabulary phrase is tested against a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// The whole phrase occurs somewhere in the name.
    #[default]
    Substring,
    /// Every word of the phrase occurs somewhere in the name, in any order.
    AllWords,
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "substring" => Ok(MatchPolicy::Substring),
            "all_words" | "words" => Ok(MatchPolicy::AllWords),
            _ => Err(format!("Unknown match policy: {}. Use: substring, all_words", s)),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::Substring => write!(f, "substring"),
            MatchPolicy::AllWords => write!(f, "all_words"),
        }
    }
}

/// A vocabulary phrase with its case-folded forms precomputed.
#[derive(Debug, Clone)]
struct Entry {
    label: String,
    folded: String,
    words: Vec<String>,
}

/// Ordered-vocabulary classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    entries: Vec<Entry>,
    policy: MatchPolicy,
}

impl Classifier {
    /// Creates a classifier. Blank phrases are dropped since they would match everything.
    pub fn new<I, S>(vocabulary: I, policy: MatchPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = vocabulary
            .into_iter()
            .filter_map(|phrase| {
                let label = phrase.as_ref().trim();
                if label.is_empty() {
                    debug!("Skipping blank vocabulary entry");
                    return None;
                }
                let folded = label.to_lowercase();
                let words = folded.split_whitespace().map(str::to_string).collect();
                Some(Entry { label: label.to_string(), folded, words })
            })
            .collect();

        Self { entries, policy }
    }

    /// Creates a substring classifier over the built-in vocabulary.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_VOCABULARY.iter().copied(), MatchPolicy::Substring)
    }

    /// Returns the first vocabulary phrase matching `name`, or `Uncategorized`.
    pub fn classify(&self, name: &str) -> Keyword {
        let name = name.to_lowercase();

        self.entries
            .iter()
            .find(|entry| self.entry_matches(entry, &name))
            .map(|entry| Keyword::Category(entry.label.clone()))
            .unwrap_or(Keyword::Uncategorized)
    }

    fn entry_matches(&self, entry: &Entry, folded_name: &str) -> bool {
        match self.policy {
            MatchPolicy::Substring => folded_name.contains(&entry.folded),
            MatchPolicy::AllWords => entry.words.iter().all(|w| folded_name.contains(w.as_str())),
        }
    }

    /// Returns the configured match policy.
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns the vocabulary labels in match order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Returns the number of vocabulary entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classifies `name` against `vocabulary` using substring matching.
pub fn classify<S: AsRef<str>>(name: &str, vocabulary: &[S]) -> Keyword {
    Classifier::new(vocabulary, MatchPolicy::Substring).classify(name)
}
