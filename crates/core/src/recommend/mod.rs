//! Outfit Recommendation Engine
//!
//! Assembles candidate outfits from a wardrobe snapshot by weighted random
//! sampling, discards combinations that clash, and ranks the rest by six
//! independently computed factors with human-readable reasoning.

mod engine;
mod rules;
mod scoring;
mod selection;
mod tables;

pub use engine::OutfitEngine;
pub use rules::{
    has_color_harmony, has_consistent_formality, has_pattern_balance, is_suitable,
    is_valid_outfit, ColorHarmony, StyleRule,
};
pub use scoring::ScoreCalculator;
pub use selection::{item_weight, pick_weighted, select_weighted};
pub use tables::{
    accepted_formalities, required_categories, BOLD_PATTERNS, COMPLEMENTARY_PAIRS,
    NEUTRAL_COLORS,
};

/// Candidate attempts per generation call
pub const DEFAULT_ATTEMPT_BUDGET: usize = 100;

/// Outfits returned when the caller does not ask for a count
pub const DEFAULT_OUTFIT_COUNT: usize = 6;

/// A factor must exceed this to earn a reasoning line
pub const DEFAULT_REASONING_THRESHOLD: f64 = 0.8;

/// Tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Candidates attempted per call, valid or not
    pub attempt_budget: usize,
    /// Factor value above which a reasoning line is emitted
    pub reasoning_threshold: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            reasoning_threshold: DEFAULT_REASONING_THRESHOLD,
        }
    }
}
