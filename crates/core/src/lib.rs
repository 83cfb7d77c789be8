pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;

pub use domain::context::{
    Occasion, RecommendationContext, TimeOfDay, UserPreferences, WeatherCondition,
    WeatherSnapshot,
};
pub use domain::item::{Category, Formality, ItemId, Season, WardrobeItem};
pub use domain::outfit::{OutfitScore, ScoreBreakdown};
pub use errors::{ApplicationError, DomainError};
pub use recommend::{EngineSettings, OutfitEngine, ScoreCalculator};
