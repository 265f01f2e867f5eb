//! Session runtime: owns the model and executes the commands `update()` returns.

#![allow(missing_docs)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::model::{SessionCmd, SessionModel, SessionMsg};
use super::update::update;
use crate::core::config::Config;
use crate::dataset::fetch;
use crate::locale::Language;
use crate::locale::preferences::{self, LanguagePreference, LoadOutcome as PreferenceOutcome};
use crate::logger::ActivityLog;

/// How the session language was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    /// `--lang` for this run only.
    Override,
    /// Saved preference file.
    Persisted,
    /// Config or built-in default.
    Default,
}

/// A running directory session.
pub struct Session {
    model: SessionModel,
    log: ActivityLog,
    preferences_file: PathBuf,
    language_source: LanguageSource,
    preference_problem: Option<String>,
    preference_warnings: Vec<String>,
}

impl Session {
    /// Resolve the language, load the dataset once, and return the ready session.
    #[must_use]
    pub fn start(config: &Config, language_override: Option<Language>) -> Self {
        let log = ActivityLog::open(&config.logging);
        let mut session = Self::with_log(config, language_override, log);
        let outcome = fetch(&config.data.candidates_file);
        session.dispatch(SessionMsg::DataLoaded(Box::new(outcome)));
        session
    }

    /// Like [`Session::start`] but with the data load left to the caller.
    #[must_use]
    pub fn with_log(config: &Config, language_override: Option<Language>, log: ActivityLog) -> Self {
        let path = config.locale.preferences_file.clone();
        let outcome = preferences::load(&path);
        let preference_problem = outcome.problem().map(str::to_string);
        if let Some(problem) = &preference_problem {
            let _ = writeln!(
                io::stderr(),
                "[JSR-PREFS] ignoring language preference at {}: {problem}",
                path.display()
            );
        }
        let preference_warnings = outcome.warnings().to_vec();
        for warning in &preference_warnings {
            let _ = writeln!(
                io::stderr(),
                "[JSR-PREFS] language preference at {}: {warning}",
                path.display()
            );
        }
        let persisted = matches!(outcome, PreferenceOutcome::Loaded { .. });
        let prefs = outcome.into_prefs(config.locale.default_language);
        let language = preferences::resolve_language(&prefs, language_override);
        let language_source = if language_override.is_some() {
            LanguageSource::Override
        } else if persisted {
            LanguageSource::Persisted
        } else {
            LanguageSource::Default
        };

        Self {
            model: SessionModel::new(language),
            log,
            preferences_file: path,
            language_source,
            preference_problem,
            preference_warnings,
        }
    }

    /// Apply a message and run the resulting commands.
    pub fn dispatch(&mut self, msg: SessionMsg) {
        let cmd = update(&mut self.model, msg);
        self.execute(cmd);
    }

    pub fn dispatch_all(&mut self, msgs: impl IntoIterator<Item = SessionMsg>) {
        for msg in msgs {
            self.dispatch(msg);
        }
    }

    #[must_use]
    pub const fn model(&self) -> &SessionModel {
        &self.model
    }

    #[must_use]
    pub const fn language_source(&self) -> LanguageSource {
        self.language_source
    }

    /// Why the saved preference was ignored, if it was.
    #[must_use]
    pub fn preference_problem(&self) -> Option<&str> {
        self.preference_problem.as_deref()
    }

    /// Warnings raised while validating a preference that did load.
    #[must_use]
    pub fn preference_warnings(&self) -> &[String] {
        &self.preference_warnings
    }

    #[must_use]
    pub fn preferences_file(&self) -> &Path {
        &self.preferences_file
    }

    pub const fn activity_log(&mut self) -> &mut ActivityLog {
        &mut self.log
    }

    fn execute(&mut self, cmd: SessionCmd) {
        for cmd in cmd.flatten() {
            match cmd {
                SessionCmd::PersistLocale(language) => {
                    let prefs = LanguagePreference::new(language);
                    if let Err(e) = preferences::save(&prefs, &self.preferences_file) {
                        let details = format!("{}: {e}", self.preferences_file.display());
                        let _ = writeln!(
                            io::stderr(),
                            "[JSR-PREFS] could not save language preference: {details}"
                        );
                        self.dispatch(SessionMsg::PersistFailed { details });
                    }
                }
                SessionCmd::Log(entry) => self.log.record(&entry),
                SessionCmd::None | SessionCmd::Batch(_) => {}
            }
        }
        self.log.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Config, LoggingConfig};
    use crate::session::model::LoadState;

    fn config_in(dir: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.data.candidates_file = dir.join("candidates.json");
        cfg.locale.preferences_file = dir.join("prefs/preferences.json");
        cfg.logging = LoggingConfig {
            enabled: true,
            jsonl_log: dir.join("activity.jsonl"),
        };
        cfg
    }

    fn write_sample(cfg: &Config) {
        std::fs::write(
            &cfg.data.candidates_file,
            r#"[{"id":1,"name":"Alice","party":"INC"},{"id":2,"name":"Bob","party":"BJP"}]"#,
        )
        .unwrap();
    }

    #[test]
    fn start_loads_dataset_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_sample(&cfg);
        let mut session = Session::start(&cfg, None);
        assert_eq!(session.model().load, LoadState::Ready);
        assert_eq!(session.model().dataset.len(), 2);
        assert_eq!(session.language_source(), LanguageSource::Default);
        assert_eq!(session.activity_log().recorded(), 1);
        let log = std::fs::read_to_string(&cfg.logging.jsonl_log).unwrap();
        assert!(log.contains("dataset_loaded"));
    }

    #[test]
    fn missing_dataset_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        let session = Session::start(&cfg, None);
        assert!(matches!(session.model().load, LoadState::Failed { .. }));
        assert!(session.model().visible().is_empty());
    }

    #[test]
    fn toggle_locale_persists_preference() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_sample(&cfg);
        let mut session = Session::start(&cfg, None);
        session.dispatch(SessionMsg::ToggleLocale);
        assert_eq!(session.model().language, Language::Hi);

        let restarted = Session::start(&cfg, None);
        assert_eq!(restarted.model().language, Language::Hi);
        assert_eq!(restarted.language_source(), LanguageSource::Persisted);
    }

    #[test]
    fn override_wins_without_persisting() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_sample(&cfg);
        let session = Session::start(&cfg, Some(Language::Hi));
        assert_eq!(session.model().language, Language::Hi);
        assert_eq!(session.language_source(), LanguageSource::Override);
        assert!(!cfg.locale.preferences_file.exists());
    }

    #[test]
    fn corrupt_preference_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_sample(&cfg);
        std::fs::create_dir_all(cfg.locale.preferences_file.parent().unwrap()).unwrap();
        std::fs::write(&cfg.locale.preferences_file, "{not json").unwrap();
        let session = Session::start(&cfg, None);
        assert_eq!(session.model().language, Language::En);
        assert!(session.preference_problem().is_some());
    }

    #[test]
    fn newer_preference_schema_is_used_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_sample(&cfg);
        std::fs::create_dir_all(cfg.locale.preferences_file.parent().unwrap()).unwrap();
        std::fs::write(
            &cfg.locale.preferences_file,
            r#"{"schema_version": 99, "language": "hi"}"#,
        )
        .unwrap();
        let session = Session::start(&cfg, None);
        assert_eq!(session.model().language, Language::Hi);
        assert!(session.preference_problem().is_none());
        assert_eq!(session.preference_warnings().len(), 1);
        assert!(session.preference_warnings()[0].contains("newer"));
    }

    #[test]
    fn unwritable_preference_logs_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        write_sample(&cfg);
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        cfg.locale.preferences_file = blocker.join("preferences.json");
        let mut session = Session::start(&cfg, None);
        session.dispatch(SessionMsg::ToggleLocale);
        assert_eq!(session.model().language, Language::Hi);
        let log = std::fs::read_to_string(&cfg.logging.jsonl_log).unwrap();
        assert!(log.contains("preference_save_failed"));
    }
}
