use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommend::{
    EngineSettings, DEFAULT_ATTEMPT_BUDGET, DEFAULT_OUTFIT_COUNT, DEFAULT_REASONING_THRESHOLD,
};

pub const CONFIG_FILE_NAME: &str = "outfitter.toml";
pub const NESTED_CONFIG_PATH: &str = "config/outfitter.toml";

const MAX_ATTEMPT_BUDGET: usize = 10_000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub attempt_budget: usize,
    pub default_count: usize,
    pub reasoning_threshold: f64,
    pub min_wardrobe_size: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub attempt_budget: Option<usize>,
    pub default_count: Option<usize>,
    pub reasoning_threshold: Option<f64>,
    pub min_wardrobe_size: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                attempt_budget: DEFAULT_ATTEMPT_BUDGET,
                default_count: DEFAULT_OUTFIT_COUNT,
                reasoning_threshold: DEFAULT_REASONING_THRESHOLD,
                min_wardrobe_size: 2,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl EngineConfig {
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            attempt_budget: self.attempt_budget,
            reasoning_threshold: self.reasoning_threshold,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(engine) = patch.engine {
            if let Some(attempt_budget) = engine.attempt_budget {
                self.engine.attempt_budget = attempt_budget;
            }
            if let Some(default_count) = engine.default_count {
                self.engine.default_count = default_count;
            }
            if let Some(reasoning_threshold) = engine.reasoning_threshold {
                self.engine.reasoning_threshold = reasoning_threshold;
            }
            if let Some(min_wardrobe_size) = engine.min_wardrobe_size {
                self.engine.min_wardrobe_size = min_wardrobe_size;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("OUTFITTER_ENGINE_ATTEMPT_BUDGET") {
            self.engine.attempt_budget = parse_usize("OUTFITTER_ENGINE_ATTEMPT_BUDGET", &value)?;
        }
        if let Some(value) = read_env("OUTFITTER_ENGINE_DEFAULT_COUNT") {
            self.engine.default_count = parse_usize("OUTFITTER_ENGINE_DEFAULT_COUNT", &value)?;
        }
        if let Some(value) = read_env("OUTFITTER_ENGINE_REASONING_THRESHOLD") {
            self.engine.reasoning_threshold =
                parse_f64("OUTFITTER_ENGINE_REASONING_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("OUTFITTER_ENGINE_MIN_WARDROBE_SIZE") {
            self.engine.min_wardrobe_size =
                parse_usize("OUTFITTER_ENGINE_MIN_WARDROBE_SIZE", &value)?;
        }

        let log_level =
            read_env("OUTFITTER_LOGGING_LEVEL").or_else(|| read_env("OUTFITTER_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("OUTFITTER_LOGGING_FORMAT").or_else(|| read_env("OUTFITTER_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(attempt_budget) = overrides.attempt_budget {
            self.engine.attempt_budget = attempt_budget;
        }
        if let Some(default_count) = overrides.default_count {
            self.engine.default_count = default_count;
        }
        if let Some(reasoning_threshold) = overrides.reasoning_threshold {
            self.engine.reasoning_threshold = reasoning_threshold;
        }
        if let Some(min_wardrobe_size) = overrides.min_wardrobe_size {
            self.engine.min_wardrobe_size = min_wardrobe_size;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_engine(&self.engine)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Explicit path if it exists, otherwise the first conventional location present.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(CONFIG_FILE_NAME), PathBuf::from(NESTED_CONFIG_PATH)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_engine(engine: &EngineConfig) -> Result<(), ConfigError> {
    if engine.attempt_budget == 0 || engine.attempt_budget > MAX_ATTEMPT_BUDGET {
        return Err(ConfigError::Validation(format!(
            "engine.attempt_budget must be in range 1..={MAX_ATTEMPT_BUDGET}"
        )));
    }

    if engine.default_count == 0 {
        return Err(ConfigError::Validation(
            "engine.default_count must be greater than zero".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&engine.reasoning_threshold) {
        return Err(ConfigError::Validation(
            "engine.reasoning_threshold must be within 0.0..=1.0".to_string(),
        ));
    }

    if engine.min_wardrobe_size == 0 {
        return Err(ConfigError::Validation(
            "engine.min_wardrobe_size must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    engine: Option<EnginePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    attempt_budget: Option<usize>,
    default_count: Option<usize>,
    reasoning_threshold: Option<f64>,
    min_wardrobe_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
