use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Days assumed for an item that has never been worn.
pub const NEVER_WORN_DAYS: i64 = 365;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical garment category.
///
/// Storage uses plural names (`tops`, `shoes`, `dresses`) while the engine
/// uses singular ones (`top`, `footwear`). Both parse to the same variant;
/// serialisation always emits the engine vocabulary. Unrecognised values are
/// kept as `Other` so the item is excluded from every category filter instead
/// of failing the whole snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Top,
    Bottom,
    Dress,
    Outerwear,
    Footwear,
    Accessory,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Dress => "dress",
            Self::Outerwear => "outerwear",
            Self::Footwear => "footwear",
            Self::Accessory => "accessories",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" | "tops" => Self::Top,
            "bottom" | "bottoms" => Self::Bottom,
            "dress" | "dresses" => Self::Dress,
            "outerwear" => Self::Outerwear,
            "footwear" | "shoes" | "shoe" => Self::Footwear,
            "accessory" | "accessories" => Self::Accessory,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    #[default]
    #[serde(alias = "sporty")]
    Casual,
    Business,
    Formal,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Business => "business",
            Self::Formal => "formal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "autumn")]
    Fall,
    Winter,
}

impl Season {
    /// Northern-hemisphere meteorological season for a calendar month (1-12).
    pub fn for_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

impl FromStr for Season {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            other => Err(DomainError::InvalidWardrobe(format!(
                "unsupported season `{other}` (expected spring|summer|fall|winter)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: ItemId,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default)]
    pub formality: Formality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<DateTime<Utc>>,
}

impl WardrobeItem {
    pub fn new(id: i64, category: impl Into<Category>) -> Self {
        Self {
            id: ItemId(id),
            category: category.into(),
            color: None,
            style: None,
            season: None,
            formality: Formality::default(),
            pattern: None,
            rating: None,
            last_worn: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = formality;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_last_worn(mut self, last_worn: DateTime<Utc>) -> Self {
        self.last_worn = Some(last_worn);
        self
    }

    /// Non-empty color, trimmed.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref().map(str::trim).filter(|color| !color.is_empty())
    }

    pub fn has_color_in(&self, colors: &[String]) -> bool {
        self.color()
            .map(|color| colors.iter().any(|candidate| candidate.trim().eq_ignore_ascii_case(color)))
            .unwrap_or(false)
    }

    pub fn matches_style(&self, style: Option<&str>) -> bool {
        match (self.style.as_deref(), style) {
            (Some(own), Some(wanted)) => own.trim().eq_ignore_ascii_case(wanted.trim()),
            _ => false,
        }
    }

    /// Whole days since the item was last worn; future timestamps count as today.
    pub fn days_since_worn(&self, now: DateTime<Utc>) -> i64 {
        match self.last_worn {
            Some(last_worn) => (now - last_worn).num_days().max(0),
            None => NEVER_WORN_DAYS,
        }
    }

    pub fn worn_on(&self, date: NaiveDate) -> bool {
        self.last_worn.map(|last_worn| last_worn.date_naive() == date).unwrap_or(false)
    }
}
