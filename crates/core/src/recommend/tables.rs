//! Fixed lookup tables for occasions, colors and patterns

use crate::domain::context::Occasion;
use crate::domain::item::{Category, Formality};

const CASUAL_SET: &[Category] = &[Category::Top, Category::Bottom, Category::Footwear];

const LAYERED_SET: &[Category] =
    &[Category::Top, Category::Bottom, Category::Footwear, Category::Outerwear];

const ACCESSORIZED_SET: &[Category] =
    &[Category::Top, Category::Bottom, Category::Footwear, Category::Accessory];

const FORMAL_SET: &[Category] = &[
    Category::Top,
    Category::Bottom,
    Category::Footwear,
    Category::Outerwear,
    Category::Accessory,
];

/// Complementary color pairs; a palette must hold both members of one pair.
pub const COMPLEMENTARY_PAIRS: &[(&str, &str)] =
    &[("black", "white"), ("blue", "orange"), ("red", "green"), ("purple", "yellow")];

pub const NEUTRAL_COLORS: &[&str] = &["black", "white", "gray", "navy", "brown"];

pub const BOLD_PATTERNS: &[&str] = &["striped", "floral", "geometric"];

/// Categories an outfit must fill for the occasion, in assembly order.
pub fn required_categories(occasion: &Occasion) -> &'static [Category] {
    match occasion {
        Occasion::Casual | Occasion::Sport => CASUAL_SET,
        Occasion::Work | Occasion::Business => LAYERED_SET,
        Occasion::Party | Occasion::Date => ACCESSORIZED_SET,
        Occasion::Formal => FORMAL_SET,
        Occasion::Other(_) => CASUAL_SET,
    }
}

/// Formalities that earn the occasion-match bonus. Empty for unlisted occasions.
pub fn accepted_formalities(occasion: &Occasion) -> &'static [Formality] {
    match occasion {
        Occasion::Casual | Occasion::Sport => &[Formality::Casual],
        Occasion::Work | Occasion::Business => &[Formality::Business, Formality::Formal],
        Occasion::Formal => &[Formality::Formal],
        Occasion::Party => &[Formality::Casual, Formality::Formal],
        Occasion::Date => &[Formality::Casual, Formality::Business],
        Occasion::Other(_) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formal_requires_every_slot() {
        let categories = required_categories(&Occasion::Formal);
        assert_eq!(categories.len(), 5);
        assert!(categories.contains(&Category::Outerwear));
        assert!(categories.contains(&Category::Accessory));
    }

    #[test]
    fn unlisted_occasion_falls_back() {
        let occasion = Occasion::from("brunch");
        assert_eq!(
            required_categories(&occasion),
            &[Category::Top, Category::Bottom, Category::Footwear]
        );
        assert!(accepted_formalities(&occasion).is_empty());
    }

    #[test]
    fn no_occasion_requires_dresses_or_duplicates() {
        for occasion in ["casual", "work", "formal", "party", "sport", "date", "business"] {
            let categories = required_categories(&Occasion::from(occasion));
            assert!(!categories.contains(&Category::Dress));
            for (index, category) in categories.iter().enumerate() {
                assert!(!categories[index + 1..].contains(category), "{occasion} repeats {category}");
            }
        }
    }

    #[test]
    fn date_accepts_casual_and_business() {
        assert_eq!(
            accepted_formalities(&Occasion::Date),
            &[Formality::Casual, Formality::Business]
        );
    }
}
