pub mod config;
pub mod inspect;
pub mod recommend;

use std::fs;
use std::path::Path;

use outfitter_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use outfitter_core::{ApplicationError, DomainError, WardrobeItem};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_INSUFFICIENT_WARDROBE: u8 = 4;
pub const EXIT_NO_OUTFITS: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => EXIT_CONFIG,
            ApplicationError::Domain(_) | ApplicationError::Input(_) => EXIT_INPUT,
        };
        let message = format!("{} ({error})", error.user_message());
        Self::failure(command, error.error_class(), message, exit_code)
    }
}

/// Loads and validates config with command-line overrides applied last.
pub fn load_config(command: &str, overrides: ConfigOverrides) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() }).map_err(|error| {
        CommandResult::from_error(command, &ApplicationError::Configuration(error.to_string()))
    })
}

/// Reads a JSON array of wardrobe items.
pub fn load_wardrobe(path: &Path) -> Result<Vec<WardrobeItem>, ApplicationError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        ApplicationError::Input(format!("could not read `{}`: {error}", path.display()))
    })?;

    serde_json::from_str::<Vec<WardrobeItem>>(&raw).map_err(|error| {
        DomainError::InvalidWardrobe(format!("`{}`: {error}", path.display())).into()
    })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
