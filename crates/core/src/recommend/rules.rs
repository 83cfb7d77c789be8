//! Suitability, validity and style rules

use std::collections::BTreeSet;

use super::tables::{BOLD_PATTERNS, COMPLEMENTARY_PAIRS, NEUTRAL_COLORS};
use crate::domain::context::{Occasion, RecommendationContext};
use crate::domain::item::{Category, Formality, Season, WardrobeItem};

const FREEZING_F: f64 = 32.0;
const HOT_F: f64 = 80.0;

/// Per-item gate applied before an item may enter a candidate.
pub fn is_suitable(item: &WardrobeItem, context: &RecommendationContext) -> bool {
    if let Some(temperature) = context.temperature() {
        if temperature < FREEZING_F && item.season == Some(Season::Summer) {
            return false;
        }
        if temperature > HOT_F && item.season == Some(Season::Winter) {
            return false;
        }
    }

    match context.occasion {
        Occasion::Formal => item.formality != Formality::Casual,
        Occasion::Sport => item.formality != Formality::Formal,
        _ => true,
    }
}

/// Lowercased non-empty colors, one entry per colored item.
pub(crate) fn palette(items: &[WardrobeItem]) -> Vec<String> {
    items.iter().filter_map(WardrobeItem::color).map(str::to_ascii_lowercase).collect()
}

fn distinct(colors: &[String]) -> BTreeSet<&str> {
    colors.iter().map(String::as_str).collect()
}

/// Color harmony rules. Each inspects a lowercased palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorHarmony {
    /// At most two distinct colors
    Monochromatic,
    /// Both members of a complementary pair present
    Complementary,
    /// At least one neutral anchors the palette
    NeutralBase,
}

impl ColorHarmony {
    pub const ALL: [ColorHarmony; 3] =
        [ColorHarmony::Monochromatic, ColorHarmony::Complementary, ColorHarmony::NeutralBase];

    pub fn applies(&self, colors: &[String]) -> bool {
        let present = distinct(colors);
        match self {
            ColorHarmony::Monochromatic => present.len() <= 2,
            ColorHarmony::Complementary => COMPLEMENTARY_PAIRS
                .iter()
                .any(|(first, second)| present.contains(first) && present.contains(second)),
            ColorHarmony::NeutralBase => NEUTRAL_COLORS.iter().any(|neutral| present.contains(neutral)),
        }
    }

    /// Color-score bonus when the rule applies
    pub fn bonus(&self) -> f64 {
        match self {
            ColorHarmony::Monochromatic => 0.3,
            ColorHarmony::Complementary => 0.4,
            ColorHarmony::NeutralBase => 0.2,
        }
    }
}

pub fn has_color_harmony(items: &[WardrobeItem]) -> bool {
    let colors = palette(items);
    if distinct(&colors).len() < 2 {
        return true;
    }
    ColorHarmony::ALL.iter().any(|rule| rule.applies(&colors))
}

pub fn has_pattern_balance(items: &[WardrobeItem]) -> bool {
    let bold = items
        .iter()
        .filter_map(|item| item.pattern.as_deref())
        .filter(|pattern| {
            let pattern = pattern.trim();
            BOLD_PATTERNS.iter().any(|bold| bold.eq_ignore_ascii_case(pattern))
        })
        .count();
    bold <= 1
}

pub fn has_consistent_formality(items: &[WardrobeItem]) -> bool {
    let has_formal = items.iter().any(|item| item.formality == Formality::Formal);
    let has_casual = items.iter().any(|item| item.formality == Formality::Casual);
    !(has_formal && has_casual)
}

/// First validity rule the assembled candidate breaks, if any.
pub(crate) fn validity_failure(items: &[WardrobeItem]) -> Option<&'static str> {
    if !has_color_harmony(items) {
        Some("color_clash")
    } else if !has_pattern_balance(items) {
        Some("pattern_conflict")
    } else if !has_consistent_formality(items) {
        Some("formality_mix")
    } else {
        None
    }
}

pub fn is_valid_outfit(items: &[WardrobeItem]) -> bool {
    validity_failure(items).is_none()
}

/// Style rules contributing to the style factor, each scaled by its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRule {
    /// Outerwear worn over a top
    Layering,
    /// Enough pieces for balanced proportions
    Balance,
}

impl StyleRule {
    pub const DEFAULT_SET: [StyleRule; 2] = [StyleRule::Layering, StyleRule::Balance];

    pub fn apply(&self, items: &[WardrobeItem], _context: &RecommendationContext) -> f64 {
        match self {
            StyleRule::Layering => {
                let has_outerwear = items.iter().any(|item| item.category == Category::Outerwear);
                let has_top = items.iter().any(|item| item.category == Category::Top);
                if has_outerwear && has_top {
                    0.2
                } else {
                    0.0
                }
            }
            StyleRule::Balance => {
                if items.len() >= 3 {
                    0.2
                } else {
                    0.1
                }
            }
        }
    }

    pub fn weight(&self) -> f64 {
        0.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::WeatherSnapshot;
    use crate::domain::context::WeatherCondition;

    fn colored(id: i64, color: &str) -> WardrobeItem {
        WardrobeItem::new(id, "top").with_color(color)
    }

    fn colors(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn summer_items_are_unsuitable_below_freezing() {
        let context = RecommendationContext::new("casual")
            .with_weather(WeatherSnapshot::new(20.0, WeatherCondition::Snowy));
        let linen = WardrobeItem::new(1, "top").with_season(Season::Summer);
        let wool = WardrobeItem::new(2, "top").with_season(Season::Winter);

        assert!(!is_suitable(&linen, &context));
        assert!(is_suitable(&wool, &context));
    }

    #[test]
    fn winter_items_are_unsuitable_in_heat() {
        let context = RecommendationContext::new("casual")
            .with_weather(WeatherSnapshot::new(91.0, WeatherCondition::Sunny));
        let wool = WardrobeItem::new(1, "top").with_season(Season::Winter);

        assert!(!is_suitable(&wool, &context));
    }

    #[test]
    fn occasion_gates_formality() {
        let formal = RecommendationContext::new("formal");
        let sport = RecommendationContext::new("sport");
        let tee = WardrobeItem::new(1, "top");
        let tux = WardrobeItem::new(2, "top").with_formality(Formality::Formal);
        let blazer = WardrobeItem::new(3, "outerwear").with_formality(Formality::Business);

        assert!(!is_suitable(&tee, &formal));
        assert!(is_suitable(&tux, &formal));
        assert!(is_suitable(&blazer, &formal));
        assert!(!is_suitable(&tux, &sport));
        assert!(is_suitable(&tee, &sport));
    }

    #[test]
    fn complementary_requires_both_members() {
        assert!(ColorHarmony::Complementary.applies(&colors(&["blue", "orange", "pink"])));
        assert!(!ColorHarmony::Complementary.applies(&colors(&["blue", "pink", "teal"])));
    }

    #[test]
    fn harmony_check_is_case_insensitive_and_stable() {
        let outfit = [colored(1, "Red"), colored(2, "GREEN"), colored(3, "pink")];
        let first = has_color_harmony(&outfit);
        for _ in 0..10 {
            assert_eq!(has_color_harmony(&outfit), first);
        }
        assert!(first);
    }

    #[test]
    fn three_unrelated_colors_clash() {
        let outfit = [colored(1, "pink"), colored(2, "teal"), colored(3, "mustard")];
        assert!(!has_color_harmony(&outfit));

        let anchored = [colored(1, "pink"), colored(2, "teal"), colored(3, "gray")];
        assert!(has_color_harmony(&anchored));
    }

    #[test]
    fn single_color_always_harmonizes() {
        let outfit = [colored(1, "pink"), WardrobeItem::new(2, "bottom")];
        assert!(has_color_harmony(&outfit));
    }

    #[test]
    fn only_one_bold_pattern_allowed() {
        let striped = WardrobeItem::new(1, "top").with_pattern("Striped");
        let floral = WardrobeItem::new(2, "bottom").with_pattern("floral");
        let plaid = WardrobeItem::new(3, "outerwear").with_pattern("plaid");

        assert!(has_pattern_balance(&[striped.clone(), plaid.clone()]));
        assert!(!has_pattern_balance(&[striped, floral, plaid]));
    }

    #[test]
    fn formal_and_casual_do_not_mix() {
        let tee = WardrobeItem::new(1, "top");
        let trousers = WardrobeItem::new(2, "bottom").with_formality(Formality::Formal);
        let blazer = WardrobeItem::new(3, "outerwear").with_formality(Formality::Business);

        assert!(!has_consistent_formality(&[tee.clone(), trousers.clone()]));
        assert!(has_consistent_formality(&[tee, blazer.clone()]));
        assert!(has_consistent_formality(&[trousers, blazer]));
    }

    #[test]
    fn validity_reports_first_broken_rule() {
        let clash = [colored(1, "pink"), colored(2, "teal"), colored(3, "mustard")];
        assert_eq!(validity_failure(&clash), Some("color_clash"));
        assert!(!is_valid_outfit(&clash));

        let fine = [colored(1, "black"), colored(2, "white")];
        assert_eq!(validity_failure(&fine), None);
    }

    #[test]
    fn style_rules_reward_layering_and_balance() {
        let context = RecommendationContext::new("work");
        let layered = [
            WardrobeItem::new(1, "top"),
            WardrobeItem::new(2, "bottom"),
            WardrobeItem::new(3, "outerwear"),
        ];
        let minimal = [WardrobeItem::new(1, "top"), WardrobeItem::new(2, "bottom")];

        assert!((StyleRule::Layering.apply(&layered, &context) - 0.2).abs() < 1e-9);
        assert!(StyleRule::Layering.apply(&minimal, &context).abs() < 1e-9);
        assert!((StyleRule::Balance.apply(&layered, &context) - 0.2).abs() < 1e-9);
        assert!((StyleRule::Balance.apply(&minimal, &context) - 0.1).abs() < 1e-9);
    }
}
