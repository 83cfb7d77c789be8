//! Outfit engine implementation

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, trace};

use super::rules::{is_suitable, validity_failure};
use super::scoring::ScoreCalculator;
use super::selection::{item_weight, select_weighted};
use super::tables::required_categories;
use super::EngineSettings;
use crate::domain::context::RecommendationContext;
use crate::domain::item::{Category, WardrobeItem};
use crate::domain::outfit::{combination_key, OutfitScore};

/// Suitable items for one required category with their selection weights.
#[derive(Debug)]
struct CategoryPool<'a> {
    category: &'a Category,
    items: Vec<&'a WardrobeItem>,
    weights: Vec<f64>,
}

#[derive(Debug, Default)]
struct GenerationStats {
    attempts: usize,
    incomplete: usize,
    invalid: usize,
    duplicates: usize,
}

/// Stateless outfit generator. Cheap to clone and safe to share between threads.
#[derive(Debug, Clone)]
pub struct OutfitEngine {
    calculator: ScoreCalculator,
    settings: EngineSettings,
}

impl OutfitEngine {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            calculator: ScoreCalculator::new().with_reasoning_threshold(settings.reasoning_threshold),
            settings,
        }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Generate up to `count` ranked outfits using thread-local randomness and the current time.
    pub fn generate_outfits(
        &self,
        wardrobe: &[WardrobeItem],
        context: &RecommendationContext,
        count: usize,
    ) -> Vec<OutfitScore> {
        self.generate_outfits_with(wardrobe, context, count, &mut rand::thread_rng(), Utc::now())
    }

    /// Generate up to `count` ranked outfits with a caller-supplied random source and clock.
    ///
    /// Every attempt in the budget is spent regardless of how many valid outfits
    /// turn up, so returning fewer than `count` (or none) is a normal outcome.
    /// Identical item combinations are reported once. Equal scores keep no
    /// particular order.
    pub fn generate_outfits_with<R>(
        &self,
        wardrobe: &[WardrobeItem],
        context: &RecommendationContext,
        count: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<OutfitScore>
    where
        R: Rng + ?Sized,
    {
        let pools = self.category_pools(wardrobe, context, now);
        if count == 0 {
            return Vec::new();
        }
        if let Some(empty) = pools.iter().find(|pool| pool.items.is_empty()) {
            debug!(
                event_name = "engine.generate.unfillable",
                occasion = %context.occasion,
                category = %empty.category,
                wardrobe_size = wardrobe.len(),
                "no suitable items for a required category"
            );
            return Vec::new();
        }

        let mut stats = GenerationStats::default();
        let mut seen = HashSet::new();
        let mut outfits = Vec::new();

        for _ in 0..self.settings.attempt_budget {
            stats.attempts += 1;

            let Some(candidate) = assemble(&pools, rng) else {
                stats.incomplete += 1;
                continue;
            };

            if let Some(reason) = validity_failure(&candidate) {
                trace!(event_name = "engine.candidate.rejected", reason, "candidate failed validity");
                stats.invalid += 1;
                continue;
            }

            if !seen.insert(combination_key(&candidate)) {
                stats.duplicates += 1;
                continue;
            }

            outfits.push(self.calculator.score(candidate, context, now));
        }

        let distinct = outfits.len();
        outfits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        outfits.truncate(count);

        debug!(
            event_name = "engine.generate.complete",
            occasion = %context.occasion,
            attempts = stats.attempts,
            incomplete = stats.incomplete,
            invalid = stats.invalid,
            duplicates = stats.duplicates,
            distinct,
            returned = outfits.len(),
            "outfit generation finished"
        );

        outfits
    }

    fn category_pools<'a>(
        &self,
        wardrobe: &'a [WardrobeItem],
        context: &'a RecommendationContext,
        now: DateTime<Utc>,
    ) -> Vec<CategoryPool<'a>> {
        required_categories(&context.occasion)
            .iter()
            .map(|category| {
                let items: Vec<&WardrobeItem> = wardrobe
                    .iter()
                    .filter(|item| item.category == *category && is_suitable(item, context))
                    .collect();
                let weights = items.iter().map(|item| item_weight(item, context, now)).collect();
                CategoryPool { category, items, weights }
            })
            .collect()
    }
}

impl Default for OutfitEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One item per required category, or `None` if any category cannot be filled.
fn assemble<R>(pools: &[CategoryPool<'_>], rng: &mut R) -> Option<Vec<WardrobeItem>>
where
    R: Rng + ?Sized,
{
    pools
        .iter()
        .map(|pool| select_weighted(&pool.items, &pool.weights, rng).map(|item| (*item).clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::context::{UserPreferences, WeatherCondition, WeatherSnapshot};
    use crate::domain::item::{Formality, Season};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).single().expect("valid date")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn generate(
        engine: &OutfitEngine,
        wardrobe: &[WardrobeItem],
        context: &RecommendationContext,
        count: usize,
    ) -> Vec<OutfitScore> {
        engine.generate_outfits_with(wardrobe, context, count, &mut rng(), now())
    }

    fn mixed_wardrobe() -> Vec<WardrobeItem> {
        vec![
            WardrobeItem::new(1, "tops").with_color("black").with_style("classic").with_rating(5),
            WardrobeItem::new(2, "tops").with_color("white").with_style("classic"),
            WardrobeItem::new(3, "tops").with_color("blue").with_pattern("striped"),
            WardrobeItem::new(4, "bottoms").with_color("navy").with_style("classic"),
            WardrobeItem::new(5, "bottoms").with_color("orange").with_pattern("floral"),
            WardrobeItem::new(6, "bottoms").with_color("gray"),
            WardrobeItem::new(7, "shoes").with_color("brown"),
            WardrobeItem::new(8, "shoes").with_color("white").with_last_worn(now() - Duration::hours(3)),
            WardrobeItem::new(9, "outerwear").with_color("black").with_formality(Formality::Business),
            WardrobeItem::new(10, "accessories").with_color("gray"),
            WardrobeItem::new(11, "dresses").with_color("red"),
        ]
    }

    #[test]
    fn empty_wardrobe_yields_nothing() {
        let engine = OutfitEngine::new();
        let outfits = generate(&engine, &[], &RecommendationContext::new("casual"), 6);
        assert!(outfits.is_empty());
    }

    #[test]
    fn monochrome_basics_score_high_on_color() {
        let engine = OutfitEngine::new();
        let wardrobe = vec![
            WardrobeItem::new(1, "top").with_color("black"),
            WardrobeItem::new(2, "bottom").with_color("white"),
            WardrobeItem::new(3, "footwear").with_color("black"),
        ];

        let outfits = generate(&engine, &wardrobe, &RecommendationContext::new("casual"), 6);

        assert_eq!(outfits.len(), 1, "only one distinct combination exists");
        assert!(outfits[0].breakdown.color >= 0.8);
        assert!(outfits[0].reasoning.contains(&"Excellent color harmony".to_string()));
        assert!((outfits[0].breakdown.weather - 0.8).abs() < 1e-9);
    }

    #[test]
    fn results_are_sorted_and_truncated() {
        let engine = OutfitEngine::new();
        let context = RecommendationContext::new("casual").with_preferences(UserPreferences::new(
            Some("classic".to_string()),
            vec!["black".to_string(), "navy".to_string()],
        ));

        let outfits = generate(&engine, &mixed_wardrobe(), &context, 4);

        assert!(!outfits.is_empty());
        assert!(outfits.len() <= 4);
        for pair in outfits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn outfits_hold_one_item_per_category() {
        let engine = OutfitEngine::new();
        for occasion in ["casual", "work", "party", "date", "business", "sport"] {
            let context = RecommendationContext::new(occasion);
            for outfit in generate(&engine, &mixed_wardrobe(), &context, 10) {
                let categories: HashSet<&Category> =
                    outfit.items.iter().map(|item| &item.category).collect();
                assert_eq!(categories.len(), outfit.items.len(), "{occasion} repeated a category");
                assert_eq!(outfit.items.len(), required_categories(&context.occasion).len());
                assert!(outfit.items.iter().all(|item| item.category != Category::Dress));
            }
        }
    }

    #[test]
    fn returned_outfits_pass_validity() {
        let engine = OutfitEngine::new();
        let outfits = generate(&engine, &mixed_wardrobe(), &RecommendationContext::new("casual"), 20);

        for outfit in &outfits {
            assert_eq!(validity_failure(&outfit.items), None);
        }
        let keys: HashSet<_> = outfits.iter().map(OutfitScore::combination_key).collect();
        assert_eq!(keys.len(), outfits.len(), "combinations should be distinct");
    }

    #[test]
    fn every_combination_with_two_bold_patterns_is_rejected() {
        let engine = OutfitEngine::new();
        let wardrobe = vec![
            WardrobeItem::new(1, "top").with_color("black").with_pattern("striped"),
            WardrobeItem::new(2, "top").with_color("white").with_pattern("geometric"),
            WardrobeItem::new(3, "bottom").with_color("black").with_pattern("floral"),
            WardrobeItem::new(4, "footwear").with_color("white"),
        ];

        assert!(generate(&engine, &wardrobe, &RecommendationContext::new("casual"), 6).is_empty());
    }

    #[test]
    fn formal_occasion_with_casual_wardrobe_is_empty() {
        let engine = OutfitEngine::new();
        let wardrobe: Vec<WardrobeItem> = mixed_wardrobe()
            .into_iter()
            .map(|item| item.with_formality(Formality::Casual))
            .collect();

        assert!(generate(&engine, &wardrobe, &RecommendationContext::new("formal"), 6).is_empty());
    }

    #[test]
    fn summer_wardrobe_in_freezing_weather_is_empty() {
        let engine = OutfitEngine::new();
        let wardrobe: Vec<WardrobeItem> =
            mixed_wardrobe().into_iter().map(|item| item.with_season(Season::Summer)).collect();
        let context = RecommendationContext::new("casual")
            .with_weather(WeatherSnapshot::new(20.0, WeatherCondition::Snowy));

        assert!(generate(&engine, &wardrobe, &context, 6).is_empty());
    }

    #[test]
    fn unlisted_occasion_uses_minimal_categories() {
        let engine = OutfitEngine::new();
        let context = RecommendationContext::new("picnic");
        let outfits = generate(&engine, &mixed_wardrobe(), &context, 3);

        assert!(!outfits.is_empty());
        for outfit in outfits {
            assert_eq!(outfit.items.len(), 3);
            assert!((outfit.breakdown.occasion - 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_attempt_budget_yields_nothing() {
        let engine = OutfitEngine::with_settings(EngineSettings { attempt_budget: 0, ..EngineSettings::default() });
        assert!(generate(&engine, &mixed_wardrobe(), &RecommendationContext::new("casual"), 6).is_empty());
    }

    #[test]
    fn zero_count_yields_nothing() {
        let engine = OutfitEngine::new();
        assert!(generate(&engine, &mixed_wardrobe(), &RecommendationContext::new("casual"), 0).is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let engine = OutfitEngine::new();
        let context = RecommendationContext::new("work");

        let first = generate(&engine, &mixed_wardrobe(), &context, 6);
        let second = generate(&engine, &mixed_wardrobe(), &context, 6);

        let first_keys: Vec<_> = first.iter().map(OutfitScore::combination_key).collect();
        let second_keys: Vec<_> = second.iter().map(OutfitScore::combination_key).collect();
        assert_eq!(first_keys, second_keys);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let engine = OutfitEngine::new();
        let wardrobe = mixed_wardrobe();
        let context = RecommendationContext::new("date");
        let wardrobe_before = wardrobe.clone();
        let context_before = context.clone();

        let _ = generate(&engine, &wardrobe, &context, 6);

        assert_eq!(wardrobe, wardrobe_before);
        assert_eq!(context, context_before);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OutfitEngine>();

        let engine = OutfitEngine::new();
        let wardrobe = mixed_wardrobe();
        let context = RecommendationContext::new("casual");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| engine.generate_outfits(&wardrobe, &context, 3)))
                .collect();
            for handle in handles {
                let outfits = handle.join().expect("worker should not panic");
                assert!(outfits.len() <= 3);
            }
        });
    }
}
