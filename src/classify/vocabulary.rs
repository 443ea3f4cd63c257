//! Built-in category vocabulary for an Indian spice and grocery catalog.
//!
//! Order matters: a phrase must precede any shorter phrase that it contains
//! (`"Chilli Powder Kashmiri"` before `"Chilli Powder"`).

/// Default ordered vocabulary.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    // Spices
    "Ajwain seed",
    "Amchur Powder",
    "Anardana Powder",
    "Anardana Whole",
    "Tukmaria",
    "Bay Leaves",
    "Black Pepper Powder",
    "Black Pepper Whole",
    "Black Salt",
    "Cardamom Black",
    "Cardamom Powder",
    "Cardamom Whole",
    "Cardamom seed",
    "Citric Acid",
    "Chilli Powder Kashmiri",
    "Chilli Powder Extra Hot",
    "Chilli Powder Resham Patti",
    "Chilli Powder",
    "Chilli Whole Kashmiri",
    "Chilli Whole",
    "Chilli Round",
    "Chilli Crushed",
    "Chilli Flakes",
    "Cinnamon Powder",
    "Cinnamon Sticks Round",
    "Cinnamon",
    "Clove Powder",
    "Clove Whole",
    "Coriander Cumin Powder",
    "Coriander Powder",
    "Coriander seed",
    "Cumin Powder",
    "Cumin seed",
    "Curry Powder",
    "Dhana Dal",
    "Fennel LAKHNAVI",
    "Fennel Powder",
    "Fennel seed",
    "Fenugreek Powder",
    "Fenugreek seed",
    "Flax seed",
    "Garam Masala Powder",
    "Garam Masala Whole",
    "Garlic Powder",
    "Ginger Powder",
    "Javantri Powder",
    "Javantri Whole",
    "Shah Jeera",
    "Kalonji",
    "Mustard seed Small",
    "Mustard seed",
    "Jaiphal Whole",
    "Jaiphal Powder",
    "Panchpuran",
    "Paprika",
    "Poppy seed",
    "Sesame seed Black",
    "Sesame seed White",
    "Sesame seed",
    "Turmeric Powder",
    "Turmeric Whole",
    "White Pepper Powder",
    "White Pepper Whole",
    "Mint Leaves",
    "Kasoori Methi",
    "Oregano",
    "Pickle Masala Golkry",
    "Pickle Masala",
    // Beans and lentils
    "Black Beans",
    "Black Eye Beans",
    "Brown Chori",
    "Chana Dal",
    "Rajma Chitra",
    "Desi Val",
    "Vatana Green",
    "Vatana white",
    "Horse Gram",
    "Kabuli chana",
    "Desi chana",
    "Rajma Kashmiri",
    "Rajma Red",
    "Masoor Dal",
    "Masoor Whole",
    "Moong Dal Yellow",
    "Moong Dal",
    "Moong Whole Desi",
    "Moong Whole",
    "Moth",
    "Red Chori",
    "Toor Dal",
    "Toor Whole",
    "Urad Dal",
    "Urad Whole",
    "Chana Mosambi",
    "Khichdi Mix",
    "Soyabean",
    // Rice
    "Basmati Rice Rozana",
    "Brown Sona Masoori",
    "Diabetic Rice",
    "Long Grain Basmati Rice",
    "Sella Parboiled Basmati Rice",
    "Sona Masoori Rice",
    "Classic Basmati Rice",
    "Golden Sella",
    "Ponni Boiled Rice",
    "Basmati Long Premium Rice",
    "Basmati Super Rice",
    "Long Basmati Rice",
    // Flours and staples
    "Sabudana",
    "Bajri Flour",
    "Bajri Mamra",
    "Besan Flour",
    "Bhakhri Flour",
    "Whole Wheat Premium Atta",
    "Whole Wheat Atta",
    "Chora",
    "Coconut Shredded Thin",
    "Corn Fryums",
    "Corn Poha",
    "Corn Starch",
    "Dhokla Flour",
    "Fada",
    "Handva Flour",
    "Jaggery Cube",
    "Jaggery Powder",
    "Jaggery Slab",
    "Jowar Flour",
    "Juwar Mamra",
    "Ladu Besan",
    "Methi Kuriya",
    "Mini Spiral Fryums",
    "Mini Wavy Fryums",
    "Poha Nylon",
    "Poha Thick",
    "Ragi Mamra",
    "Ragi Panipuri Fryums",
    "Rice Flour",
    "Sakar",
    "Sweet Makhana",
    "Sooji",
    "Stone Flower",
    "Sugar",
    "Wheat Puffs",
    "Baking Powder",
    // Ayurvedic and pooja items
    "Harde",
    "Jamun Powder",
    "Char Goond Powder",
    "Khmeer",
    "Chandan Powder",
    "Mulethi Powder",
    "Guggul",
    "Triphala Whole",
    "Charoli",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_duplicates() {
        let mut seen = HashSet::new();
        for phrase in DEFAULT_VOCABULARY {
            assert!(seen.insert(phrase.to_lowercase()), "duplicate phrase: {phrase}");
        }
    }

    #[test]
    fn test_specific_phrases_precede_contained_phrases() {
        for (i, earlier) in DEFAULT_VOCABULARY.iter().enumerate() {
            let earlier = earlier.to_lowercase();
            for later in &DEFAULT_VOCABULARY[i + 1..] {
                let later = later.to_lowercase();
                assert!(
                    !later.contains(&earlier),
                    "'{later}' can never match because '{earlier}' comes first"
                );
            }
        }
    }
}
