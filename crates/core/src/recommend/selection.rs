//! Weighted random item selection

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::context::RecommendationContext;
use crate::domain::item::WardrobeItem;

const PREFERRED_COLOR_BOOST: f64 = 1.5;
const PREFERRED_STYLE_BOOST: f64 = 1.3;
const NEUTRAL_RATING: f64 = 3.0;
const VARIETY_CEILING: f64 = 2.0;
const VARIETY_RAMP_DAYS: f64 = 30.0;

/// Selection weight for an item: preference boosts, rating, and time since last worn.
pub fn item_weight(
    item: &WardrobeItem,
    context: &RecommendationContext,
    now: DateTime<Utc>,
) -> f64 {
    let mut weight = 1.0;

    if item.has_color_in(&context.preferences.colors) {
        weight *= PREFERRED_COLOR_BOOST;
    }
    if item.matches_style(context.preferences.style.as_deref()) {
        weight *= PREFERRED_STYLE_BOOST;
    }

    weight *= item.rating.map(f64::from).unwrap_or(NEUTRAL_RATING) / NEUTRAL_RATING;

    let days_since_worn = item.days_since_worn(now) as f64;
    weight *= VARIETY_CEILING.min(1.0 + days_since_worn / VARIETY_RAMP_DAYS);

    weight
}

/// Roulette-wheel pick for a uniform `draw` in `[0, 1)`.
///
/// The draw is scaled to the weight total and each weight is subtracted in
/// turn; the first index where the remainder drops to zero or below wins.
/// Returns `None` only for an empty slice.
pub fn pick_weighted(weights: &[f64], draw: f64) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();
    let mut remaining = draw * total;

    for (index, weight) in weights.iter().enumerate() {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(index);
        }
    }

    // Float drift can leave a sliver past the last weight.
    Some(weights.len() - 1)
}

pub fn select_weighted<'a, T, R>(items: &'a [T], weights: &[f64], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    debug_assert_eq!(items.len(), weights.len());
    let draw: f64 = rng.gen();
    pick_weighted(weights, draw).and_then(|index| items.get(index))
}
