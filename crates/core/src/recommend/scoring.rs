//! Scoring algorithms for outfit candidates

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::rules::{palette, ColorHarmony, StyleRule};
use super::tables::accepted_formalities;
use super::DEFAULT_REASONING_THRESHOLD;
use crate::domain::context::RecommendationContext;
use crate::domain::item::{Season, WardrobeItem};
use crate::domain::outfit::{OutfitScore, ScoreBreakdown};

const BASELINE: f64 = 0.5;
const NO_WEATHER_SCORE: f64 = 0.8;
const SEASON_MATCH_BONUS: f64 = 0.2;
const MILD_WEATHER_BONUS: f64 = 0.1;
const MILD_RANGE_F: std::ops::RangeInclusive<f64> = 50.0..=70.0;
const FORMALITY_MATCH: f64 = 0.7;
const FORMALITY_MISS: f64 = 0.3;
const COVERAGE_WEIGHT: f64 = 0.3;
const MIN_VARIETY: f64 = 0.2;
const PREFERRED_COLOR_WEIGHT: f64 = 0.2;
const PREFERENCE_STEP: f64 = 0.1;
const HIGH_RATING: u8 = 4;

/// Score calculator for outfit candidates
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    style_rules: Vec<StyleRule>,
    reasoning_threshold: f64,
}

impl ScoreCalculator {
    /// Create a calculator with the default style rules
    pub fn new() -> Self {
        Self {
            style_rules: StyleRule::DEFAULT_SET.to_vec(),
            reasoning_threshold: DEFAULT_REASONING_THRESHOLD,
        }
    }

    pub fn with_reasoning_threshold(mut self, threshold: f64) -> Self {
        self.reasoning_threshold = threshold;
        self
    }

    /// Score one candidate, producing the breakdown, mean and reasoning
    pub fn score(
        &self,
        items: Vec<WardrobeItem>,
        context: &RecommendationContext,
        now: DateTime<Utc>,
    ) -> OutfitScore {
        let breakdown = self.breakdown(&items, context, now);
        let reasoning = self.generate_reasoning(&breakdown, context);

        OutfitScore { score: breakdown.mean(), breakdown, reasoning, items }
    }

    pub fn breakdown(
        &self,
        items: &[WardrobeItem],
        context: &RecommendationContext,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            weather: self.weather_score(items, context),
            occasion: self.occasion_score(items, context),
            style: self.style_score(items, context),
            color: self.color_score(items, context),
            variety: self.variety_score(items, now),
            user_preference: self.user_preference_score(items, context),
        }
    }

    /// Weather fit: seasonal items at temperature extremes, any item in mild weather
    pub fn weather_score(&self, items: &[WardrobeItem], context: &RecommendationContext) -> f64 {
        let Some(temperature) = context.temperature() else {
            return NO_WEATHER_SCORE;
        };

        let mut score = BASELINE;
        for item in items {
            if temperature < 32.0 && item.season == Some(Season::Winter) {
                score += SEASON_MATCH_BONUS;
            } else if temperature > 80.0 && item.season == Some(Season::Summer) {
                score += SEASON_MATCH_BONUS;
            } else if MILD_RANGE_F.contains(&temperature) {
                score += MILD_WEATHER_BONUS;
            }
        }

        score.min(1.0)
    }

    /// Occasion fit: formality match plus slot coverage
    pub fn occasion_score(&self, items: &[WardrobeItem], context: &RecommendationContext) -> f64 {
        let accepted = accepted_formalities(&context.occasion);
        let formality_match = items.iter().any(|item| accepted.contains(&item.formality));
        let coverage = (items.len() as f64 / 3.0).min(1.0);

        let base = if formality_match { FORMALITY_MATCH } else { FORMALITY_MISS };
        (base + coverage * COVERAGE_WEIGHT).min(1.0)
    }

    /// Style cohesion plus weighted style-rule contributions
    pub fn style_score(&self, items: &[WardrobeItem], context: &RecommendationContext) -> f64 {
        let mut score = BASELINE;

        // Unstyled items count as one shared "no style" value.
        let styles: BTreeSet<Option<String>> = items
            .iter()
            .map(|item| item.style.as_deref().map(|style| style.trim().to_ascii_lowercase()))
            .collect();
        match styles.len() {
            1 => score += 0.3,
            2 => score += 0.1,
            _ => {}
        }

        for rule in &self.style_rules {
            score += rule.apply(items, context) * rule.weight();
        }

        score.min(1.0)
    }

    /// Color harmony bonuses plus share of preferred colors
    pub fn color_score(&self, items: &[WardrobeItem], context: &RecommendationContext) -> f64 {
        let colors = palette(items);
        if colors.len() < 2 {
            return BASELINE;
        }

        let mut score = BASELINE;
        for rule in ColorHarmony::ALL {
            if rule.applies(&colors) {
                score += rule.bonus();
            }
        }

        let preferred = items
            .iter()
            .filter(|item| item.color().is_some() && item.has_color_in(&context.preferences.colors))
            .count();
        score += (preferred as f64 / colors.len() as f64) * PREFERRED_COLOR_WEIGHT;

        score.min(1.0)
    }

    /// Penalize items already worn on the current calendar date (UTC)
    pub fn variety_score(&self, items: &[WardrobeItem], now: DateTime<Utc>) -> f64 {
        if items.is_empty() {
            return 1.0;
        }

        let today = now.date_naive();
        let worn_today = items.iter().filter(|item| item.worn_on(today)).count();
        let penalty = worn_today as f64 / items.len() as f64;

        (1.0 - penalty).max(MIN_VARIETY)
    }

    /// Per-item bonuses for preferred style, preferred color and high rating
    pub fn user_preference_score(
        &self,
        items: &[WardrobeItem],
        context: &RecommendationContext,
    ) -> f64 {
        let preferences = &context.preferences;
        let mut score = BASELINE;

        for item in items {
            if item.matches_style(preferences.style.as_deref()) {
                score += PREFERENCE_STEP;
            }
            if item.has_color_in(&preferences.colors) {
                score += PREFERENCE_STEP;
            }
            if item.rating.is_some_and(|rating| rating >= HIGH_RATING) {
                score += PREFERENCE_STEP;
            }
        }

        score.min(1.0)
    }

    /// Generate human-readable reasoning for factors above the threshold.
    /// Style never earns a line.
    pub fn generate_reasoning(
        &self,
        breakdown: &ScoreBreakdown,
        context: &RecommendationContext,
    ) -> Vec<String> {
        let threshold = self.reasoning_threshold;
        let mut reasons = Vec::new();

        if breakdown.weather > threshold {
            reasons.push("Perfect for current weather conditions".to_string());
        }
        if breakdown.occasion > threshold {
            reasons.push(format!("Well-suited for {} occasion", context.occasion));
        }
        if breakdown.color > threshold {
            reasons.push("Excellent color harmony".to_string());
        }
        if breakdown.variety > threshold {
            reasons.push("Fresh combination you haven't worn recently".to_string());
        }
        if breakdown.user_preference > threshold {
            reasons.push("Matches your style preferences".to_string());
        }

        reasons
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}
