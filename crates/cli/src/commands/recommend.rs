use std::path::PathBuf;

use chrono::{DateTime, Datelike, Timelike, Utc};
use clap::Args;
use outfitter_core::config::{AppConfig, ConfigOverrides};
use outfitter_core::{
    OutfitEngine, RecommendationContext, Season, TimeOfDay, UserPreferences,
    WeatherCondition, WeatherSnapshot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{load_wardrobe, CommandResult, EXIT_INSUFFICIENT_WARDROBE, EXIT_NO_OUTFITS};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Path to a JSON array of wardrobe items")]
    pub wardrobe: PathBuf,
    #[arg(long, default_value = "casual", help = "Occasion such as casual, work, formal, party")]
    pub occasion: String,
    #[arg(long, help = "Current temperature in Fahrenheit; enables weather scoring")]
    pub temperature: Option<f64>,
    #[arg(long, requires = "temperature", help = "Weather condition (sunny, cloudy, rainy, ...)")]
    pub condition: Option<WeatherCondition>,
    #[arg(long, requires = "temperature")]
    pub humidity: Option<f64>,
    #[arg(long, requires = "temperature")]
    pub wind_speed: Option<f64>,
    #[arg(long, help = "Season override; defaults to the current month's season")]
    pub season: Option<Season>,
    #[arg(long, help = "morning, afternoon or evening; defaults to the current hour")]
    pub time_of_day: Option<TimeOfDay>,
    #[arg(long, help = "Preferred style")]
    pub style: Option<String>,
    #[arg(long = "color", help = "Preferred color; repeat for several")]
    pub colors: Vec<String>,
    #[arg(long, help = "Number of outfits to return")]
    pub count: Option<usize>,
    #[arg(long, help = "Candidate attempt budget for this run")]
    pub attempts: Option<usize>,
    #[arg(long, help = "Seed for a reproducible run")]
    pub seed: Option<u64>,
}

impl RecommendArgs {
    pub fn new(wardrobe: impl Into<PathBuf>) -> Self {
        Self {
            wardrobe: wardrobe.into(),
            occasion: "casual".to_string(),
            temperature: None,
            condition: None,
            humidity: None,
            wind_speed: None,
            season: None,
            time_of_day: None,
            style: None,
            colors: Vec::new(),
            count: None,
            attempts: None,
            seed: None,
        }
    }

    /// `--count` and `--attempts` are config overrides so they pass the same validation.
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            attempt_budget: self.attempts,
            default_count: self.count,
            ..ConfigOverrides::default()
        }
    }
}

/// Expects `config` loaded with [`RecommendArgs::config_overrides`].
pub fn run(args: &RecommendArgs, config: &AppConfig) -> CommandResult {
    let wardrobe = match load_wardrobe(&args.wardrobe) {
        Ok(wardrobe) => wardrobe,
        Err(error) => return CommandResult::from_error(COMMAND, &error),
    };

    if wardrobe.len() < config.engine.min_wardrobe_size {
        return CommandResult::failure(
            COMMAND,
            "insufficient_wardrobe",
            format!(
                "wardrobe has {} item(s); at least {} are needed to build outfits",
                wardrobe.len(),
                config.engine.min_wardrobe_size
            ),
            EXIT_INSUFFICIENT_WARDROBE,
        );
    }

    let count = config.engine.default_count;
    let engine = OutfitEngine::with_settings(config.engine.settings());

    let now = Utc::now();
    let context = build_context(args, now);

    let outfits = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            engine.generate_outfits_with(&wardrobe, &context, count, &mut rng, now)
        }
        None => engine.generate_outfits(&wardrobe, &context, count),
    };

    tracing::info!(
        event_name = "cli.recommend.complete",
        occasion = %context.occasion,
        wardrobe_size = wardrobe.len(),
        requested = count,
        returned = outfits.len(),
        "recommendation run finished"
    );

    if outfits.is_empty() {
        return CommandResult::failure(
            COMMAND,
            "no_outfits",
            format!("no valid outfit could be assembled for the `{}` occasion", context.occasion),
            EXIT_NO_OUTFITS,
        );
    }

    let message = format!("{} outfit(s) recommended for {}", outfits.len(), context.occasion);
    match serde_json::to_value(&outfits) {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(error) => CommandResult::failure(COMMAND, "serialization", error.to_string(), 1),
    }
}

/// Request context from flags; season and time of day fall back to `now`.
pub fn build_context(args: &RecommendArgs, now: DateTime<Utc>) -> RecommendationContext {
    let mut context = RecommendationContext::new(args.occasion.as_str())
        .with_preferences(UserPreferences::new(args.style.clone(), args.colors.clone()))
        .with_season(args.season.unwrap_or_else(|| Season::for_month(now.month())))
        .with_time_of_day(args.time_of_day.unwrap_or_else(|| TimeOfDay::from_hour(now.hour())));

    if let Some(temperature) = args.temperature {
        let mut weather =
            WeatherSnapshot::new(temperature, args.condition.unwrap_or(WeatherCondition::Sunny));
        weather.humidity = args.humidity.unwrap_or_default();
        weather.wind_speed = args.wind_speed.unwrap_or_default();
        context = context.with_weather(weather);
    }

    context
}
