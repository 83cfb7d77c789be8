use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::item::Season;
use crate::errors::DomainError;

/// Social context an outfit is requested for.
///
/// Values outside the known set are preserved as `Other`; they fall back to the
/// minimal category requirements and never earn the formality-match bonus.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Occasion {
    #[default]
    Casual,
    Work,
    Formal,
    Party,
    Sport,
    Date,
    Business,
    Other(String),
}

impl Occasion {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Casual => "casual",
            Self::Work => "work",
            Self::Formal => "formal",
            Self::Party => "party",
            Self::Sport => "sport",
            Self::Date => "date",
            Self::Business => "business",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for Occasion {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Self::Casual,
            "work" => Self::Work,
            "formal" => Self::Formal,
            "party" => Self::Party,
            "sport" => Self::Sport,
            "date" => Self::Date,
            "business" => Self::Business,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for Occasion {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Occasion> for String {
    fn from(value: Occasion) -> Self {
        match value {
            Occasion::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

impl FromStr for WeatherCondition {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "sunny" | "clear" => Ok(Self::Sunny),
            "partly-cloudy" => Ok(Self::PartlyCloudy),
            "cloudy" => Ok(Self::Cloudy),
            "rainy" | "rain" => Ok(Self::Rainy),
            "snowy" | "snow" => Ok(Self::Snowy),
            "stormy" | "storm" => Ok(Self::Stormy),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported weather condition `{other}`"
            ))),
        }
    }
}

/// Point-in-time weather reading. Temperatures are Fahrenheit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub condition: WeatherCondition,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, condition: WeatherCondition) -> Self {
        Self {
            temperature,
            condition,
            humidity: 0.0,
            wind_speed: 0.0,
            feels_like: None,
            uv_index: None,
            location: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl UserPreferences {
    pub fn new(style: Option<String>, colors: Vec<String>) -> Self {
        Self { style, colors }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported time of day `{other}` (expected morning|afternoon|evening)"
            ))),
        }
    }
}

/// Environment of a single generation request. Built fresh per call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
    pub occasion: Occasion,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    // Carried for callers; scoring does not read it yet.
    #[serde(default)]
    pub time_of_day: TimeOfDay,
}

impl RecommendationContext {
    pub fn new(occasion: impl Into<Occasion>) -> Self {
        Self { occasion: occasion.into(), ..Self::default() }
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    pub fn temperature(&self) -> Option<f64> {
        self.weather.as_ref().map(|weather| weather.temperature)
    }
}
