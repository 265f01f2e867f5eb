//! Configuration system: TOML file + env var overrides + defaults under `$HOME`.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SaarthiError};
use crate::locale::Language;
use crate::locale::preferences::PREFERENCES_FILE_NAME;

/// Full Jan Saarthi configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub locale: LocaleConfig,
    pub logging: LoggingConfig,
    /// Where this config was read from (or would be). Not part of the file.
    #[serde(skip)]
    pub config_file: PathBuf,
}

/// Candidate dataset location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataConfig {
    pub candidates_file: PathBuf,
}

/// Language defaults and the persisted-preference location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocaleConfig {
    /// Used when no preference has been saved yet.
    pub default_language: Language,
    pub preferences_file: PathBuf,
}

/// JSONL activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub jsonl_log: PathBuf,
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[JSR-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

fn config_dir() -> PathBuf {
    home_dir().join(".config").join("jan-saarthi")
}

fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("jan-saarthi")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            candidates_file: data_dir().join("candidates.json"),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: Language::FALLBACK,
            preferences_file: config_dir().join(PREFERENCES_FILE_NAME),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jsonl_log: data_dir().join("activity.jsonl"),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, env_var)
    }

    /// [`Config::load`] with an injectable environment lookup.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf)
                .map_err(|source| SaarthiError::io(&path_buf, source))?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(SaarthiError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.config_file = path_buf;
        cfg.apply_env_overrides_from(lookup)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SAARTHI_DATA_FILE") {
            self.data.candidates_file = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("SAARTHI_LANGUAGE") {
            self.locale.default_language = parse_env_language("SAARTHI_LANGUAGE", &raw)?;
        }

        if let Some(raw) = lookup("SAARTHI_PREFERENCES_FILE") {
            self.locale.preferences_file = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("SAARTHI_LOG_FILE") {
            self.logging.jsonl_log = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("SAARTHI_LOG_ENABLED") {
            self.logging.enabled = parse_env_bool("SAARTHI_LOG_ENABLED", &raw)?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("data.candidates_file", &self.data.candidates_file),
            ("locale.preferences_file", &self.locale.preferences_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(SaarthiError::InvalidConfig {
                    details: format!("{name} must not be empty"),
                });
            }
        }

        if self.logging.enabled && self.logging.jsonl_log.as_os_str().is_empty() {
            return Err(SaarthiError::InvalidConfig {
                details: "logging.jsonl_log must be set when logging.enabled=true".to_string(),
            });
        }

        if self.locale.preferences_file == self.data.candidates_file {
            return Err(SaarthiError::InvalidConfig {
                details: "locale.preferences_file must differ from data.candidates_file"
                    .to_string(),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SaarthiError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: expected a boolean"),
        }),
    }
}

fn parse_env_language(name: &str, raw: &str) -> Result<Language> {
    Language::from_tag(raw).ok_or_else(|| SaarthiError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: expected one of en, hi"),
    })
}
