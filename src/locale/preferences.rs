//! Persisted language preference with safe atomic writes.
//!
//! The reader's language choice survives across sessions in a small JSON
//! file. Persistence failures never block startup or rendering.
//!
//! # Merge Order
//!
//! ```text
//! compiled default (en) → configured default → persisted preference → --lang override
//! ```
//!
//! # Persistence Strategy
//!
//! Atomic write: serialize → temp file → fsync → rename over target, so a
//! reader never sees a partial file.
//!
//! # Error Philosophy
//!
//! Load errors: report + fall back to defaults (never panic).
//! Save errors: surfaced to the caller as `io::Error` (never fatal).

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::catalog::Language;

// ──────────────────── schema version ────────────────────

/// Bump when adding fields older readers would misinterpret.
const SCHEMA_VERSION: u32 = 1;

/// File name under the per-user config directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

// ──────────────────── preference model ────────────────────

/// Persisted reader preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePreference {
    /// Schema version for migration detection.
    pub schema_version: u32,
    /// Language the directory renders in.
    pub language: Language,
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            language: Language::default(),
        }
    }
}

impl LanguagePreference {
    /// Preference for an explicit language at the current schema version.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            language,
        }
    }
}

// ──────────────────── validation ────────────────────

/// Warnings raised while validating a loaded preference file.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validate loaded preferences, returning them with any warnings.
pub fn validate(prefs: LanguagePreference) -> (LanguagePreference, ValidationReport) {
    let mut report = ValidationReport::default();
    if prefs.schema_version > SCHEMA_VERSION {
        report.warnings.push(format!(
            "preferences schema version {} is newer than supported {}; \
             unknown fields will be ignored",
            prefs.schema_version, SCHEMA_VERSION,
        ));
    }
    (prefs, report)
}

// ──────────────────── persistence ────────────────────

/// Load outcome from the persistence layer.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Successfully loaded and validated.
    Loaded {
        prefs: LanguagePreference,
        report: ValidationReport,
    },
    /// File not found (first launch).
    Missing,
    /// File exists but is unparseable.
    Corrupt { details: String },
    /// The file could not be read.
    IoError { details: String },
}

impl LoadOutcome {
    /// Effective preferences, substituting `default_language` whenever
    /// nothing usable was loaded.
    #[must_use]
    pub fn into_prefs(self, default_language: Language) -> LanguagePreference {
        match self {
            Self::Loaded { prefs, .. } => prefs,
            Self::Missing | Self::Corrupt { .. } | Self::IoError { .. } => {
                LanguagePreference::new(default_language)
            }
        }
    }

    /// Whether the load was successful (loaded or first-launch missing).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Missing)
    }

    /// Validation warnings for a file that did load.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Loaded { report, .. } => &report.warnings,
            Self::Missing | Self::Corrupt { .. } | Self::IoError { .. } => &[],
        }
    }

    /// Human-readable reason for a degraded load.
    #[must_use]
    pub fn problem(&self) -> Option<&str> {
        match self {
            Self::Corrupt { details } | Self::IoError { details } => Some(details),
            Self::Loaded { .. } | Self::Missing => None,
        }
    }
}

/// Load preferences from a file path. Never panics.
pub fn load(path: &Path) -> LoadOutcome {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
        // Invalid UTF-8 is corrupt content, not an I/O error.
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return LoadOutcome::Corrupt {
                details: e.to_string(),
            };
        }
        Err(e) => {
            return LoadOutcome::IoError {
                details: e.to_string(),
            };
        }
    };

    match serde_json::from_str::<LanguagePreference>(&content) {
        Ok(prefs) => {
            let (prefs, report) = validate(prefs);
            LoadOutcome::Loaded { prefs, report }
        }
        Err(e) => LoadOutcome::Corrupt {
            details: e.to_string(),
        },
    }
}

/// Atomic save: serialize → temp file → fsync → rename.
///
/// Creates parent directories as needed. Returns the path written.
pub fn save(prefs: &LanguagePreference, path: &Path) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    // Same directory keeps the rename on one filesystem.
    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(path.to_path_buf())
}

// ──────────────────── merge ────────────────────

/// Resolve the effective session language.
///
/// A session override (`--lang`) wins and is not persisted.
#[must_use]
pub fn resolve_language(persisted: &LanguagePreference, session_override: Option<Language>) -> Language {
    session_override.unwrap_or(persisted.language)
}
