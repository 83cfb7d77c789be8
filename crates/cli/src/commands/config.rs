use std::env;
use std::fs;
use std::path::Path;

use outfitter_core::config::{resolve_config_path, AppConfig, ConfigOverrides};
use serde::Serialize;
use toml::Value;

use super::{load_config, CommandResult};

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
pub struct EffectiveConfig {
    pub fields: Vec<ConfigField>,
}

#[derive(Debug, Serialize)]
pub struct ConfigField {
    pub key: &'static str,
    pub value: String,
    pub source: String,
}

/// Effective configuration with where each value came from.
pub fn run() -> CommandResult {
    let config = match load_config(COMMAND, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let effective = EffectiveConfig { fields: effective_fields(&config) };
    let message = format!(
        "effective config for {} field(s) (source precedence: env > file > default)",
        effective.fields.len()
    );
    match serde_json::to_value(&effective) {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(error) => CommandResult::failure(COMMAND, "serialization", error.to_string(), 1),
    }
}

pub fn effective_fields(config: &AppConfig) -> Vec<ConfigField> {
    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let fields = vec![
        (
            "engine.attempt_budget",
            config.engine.attempt_budget.to_string(),
            source("engine.attempt_budget", &["OUTFITTER_ENGINE_ATTEMPT_BUDGET"]),
        ),
        (
            "engine.default_count",
            config.engine.default_count.to_string(),
            source("engine.default_count", &["OUTFITTER_ENGINE_DEFAULT_COUNT"]),
        ),
        (
            "engine.reasoning_threshold",
            config.engine.reasoning_threshold.to_string(),
            source("engine.reasoning_threshold", &["OUTFITTER_ENGINE_REASONING_THRESHOLD"]),
        ),
        (
            "engine.min_wardrobe_size",
            config.engine.min_wardrobe_size.to_string(),
            source("engine.min_wardrobe_size", &["OUTFITTER_ENGINE_MIN_WARDROBE_SIZE"]),
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            source("logging.level", &["OUTFITTER_LOGGING_LEVEL", "OUTFITTER_LOG_LEVEL"]),
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            source("logging.format", &["OUTFITTER_LOGGING_FORMAT", "OUTFITTER_LOG_FORMAT"]),
        ),
    ];

    fields.into_iter().map(|(key, value, source)| ConfigField { key, value, source }).collect()
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
