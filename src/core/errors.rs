//! JSR-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, SaarthiError>;

/// Top-level error type for Jan Saarthi.
#[derive(Debug, Error)]
pub enum SaarthiError {
    #[error("[JSR-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[JSR-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[JSR-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[JSR-2001] candidate dataset is not a JSON array: {path}")]
    DatasetShape { path: PathBuf },

    #[error("[JSR-2002] unknown candidate id {id}")]
    UnknownCandidate { id: u64 },

    #[error("[JSR-2003] unsupported language tag {tag:?}")]
    UnsupportedLanguage { tag: String },

    #[error("[JSR-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[JSR-2102] share link construction failed: {details}")]
    ShareLink { details: String },

    #[error("[JSR-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SaarthiError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "JSR-1001",
            Self::MissingConfig { .. } => "JSR-1002",
            Self::ConfigParse { .. } => "JSR-1003",
            Self::DatasetShape { .. } => "JSR-2001",
            Self::UnknownCandidate { .. } => "JSR-2002",
            Self::UnsupportedLanguage { .. } => "JSR-2003",
            Self::Serialization { .. } => "JSR-2101",
            Self::ShareLink { .. } => "JSR-2102",
            Self::Io { .. } => "JSR-3002",
        }
    }

    /// Whether the failure came from user input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::MissingConfig { .. }
                | Self::UnknownCandidate { .. }
                | Self::UnsupportedLanguage { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for SaarthiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for SaarthiError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<url::ParseError> for SaarthiError {
    fn from(value: url::ParseError) -> Self {
        Self::ShareLink {
            details: value.to_string(),
        }
    }
}
