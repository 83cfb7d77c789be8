use serde::{Deserialize, Serialize};

use crate::domain::item::{ItemId, WardrobeItem};

/// Per-factor sub-scores, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub weather: f64,
    pub occasion: f64,
    pub style: f64,
    pub color: f64,
    pub variety: f64,
    pub user_preference: f64,
}

impl ScoreBreakdown {
    pub const FACTOR_COUNT: usize = 6;

    pub fn factors(&self) -> [f64; Self::FACTOR_COUNT] {
        [self.weather, self.occasion, self.style, self.color, self.variety, self.user_preference]
    }

    /// Unweighted arithmetic mean of the six factors.
    pub fn mean(&self) -> f64 {
        self.factors().iter().sum::<f64>() / Self::FACTOR_COUNT as f64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutfitScore {
    pub items: Vec<WardrobeItem>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub reasoning: Vec<String>,
}

impl OutfitScore {
    /// Item ids in ascending order; two outfits with the same key hold the same garments.
    pub fn combination_key(&self) -> Vec<ItemId> {
        combination_key(&self.items)
    }
}

pub(crate) fn combination_key(items: &[WardrobeItem]) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
    ids.sort_unstable();
    ids
}
