#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

impl CmdResult {
    /// Parse stdout as a single JSON line.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim()).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({e}); log: {}",
                self.log_path.display()
            )
        })
    }
}

/// Isolated home, dataset, preference and activity-log paths for one test.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create test env dir"),
        }
    }

    /// Environment seeded with `dataset` as the candidates file.
    pub fn with_dataset(dataset: &str) -> Self {
        let env = Self::new();
        fs::write(env.data_file(), dataset).expect("write dataset");
        env
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    pub fn data_file(&self) -> PathBuf {
        self.root().join("candidates.json")
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.root().join("prefs").join("preferences.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root().join("activity.jsonl")
    }

    pub fn read_log(&self) -> String {
        fs::read_to_string(self.log_file()).unwrap_or_default()
    }

    pub fn run(&self, case_name: &str, args: &[&str]) -> CmdResult {
        let home = self.home();
        let data = self.data_file();
        let prefs = self.preferences_file();
        let log = self.log_file();
        let vars = [
            ("HOME", home.as_os_str()),
            ("SAARTHI_DATA_FILE", data.as_os_str()),
            ("SAARTHI_PREFERENCES_FILE", prefs.as_os_str()),
            ("SAARTHI_LOG_FILE", log.as_os_str()),
            ("SAARTHI_LOG_ENABLED", OsStr::new("true")),
            ("SAARTHI_OUTPUT_FORMAT", OsStr::new("human")),
        ];
        run_with_env(case_name, args, &vars)
    }
}

/// Sample collection used across CLI tests.
pub const SAMPLE_DATASET: &str = r#"[
  {"id": 1, "name": "Alice Sharma", "party": "Indian National Congress",
   "constituency": "Pune", "assets_inr": 100, "liabilities_inr": 10,
   "criminal_cases": 0, "education": "Graduate",
   "myneta_url": "https://myneta.info/candidate.php?id=1",
   "plainLanguageSummary": "Runs a small business."},
  {"id": 2, "name": "Bob Verma", "party": "BJP", "constituency": "Nagpur",
   "assets_inr": 300, "criminal_cases": 3,
   "criminal_case_details": [{"case_number": "12/2019", "charge": "Rioting"}, {}]},
  {"id": 3, "name": "carol Das", "party": "Independent", "constituency": "Kolhapur",
   "assets_inr": 200, "criminal_cases": 1,
   "movable_assets": {"cash": 50, "bank_deposits": 0}},
  {"id": 4, "name": "Dev Patil", "party": "INC (Congress)", "assets_inr": 5000},
  {"id": 5, "name": "Esha Rao", "party": "Bharatiya Janata Party (BJP)", "assets_inr": 20},
  {"id": 6, "name": "Farid Khan", "party": "AAP"}
]"#;

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_bin_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_saarthi") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) { "saarthi.exe" } else { "saarthi" };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve saarthi binary path for integration test"),
    }
}

pub fn run_cli_case(case_name: &str, args: &[&str]) -> CmdResult {
    run_with_env(case_name, args, &[("SAARTHI_LOG_ENABLED", OsStr::new("false"))])
}

fn run_with_env(case_name: &str, args: &[&str], vars: &[(&str, &OsStr)]) -> CmdResult {
    let root = std::env::temp_dir().join("saarthi-test-logs");
    fs::create_dir_all(&root).expect("create temp test log dir");

    let log_path = root.join(format!("{}-{}.log", sanitize(case_name), now_millis()));
    let bin_path = resolve_bin_path();

    let output = Command::new(&bin_path)
        .args(args)
        .env_remove("SAARTHI_LANGUAGE")
        .env("RUST_BACKTRACE", "1")
        .envs(vars.iter().copied())
        .output()
        .expect("execute saarthi command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let mut log_content = String::new();
    log_content.push_str(&format!("case={case_name}\n"));
    log_content.push_str(&format!("bin={}\n", bin_path.display()));
    log_content.push_str(&format!("args={args:?}\n"));
    log_content.push_str(&format!("status={}\n", output.status));
    log_content.push_str("----- stdout -----\n");
    log_content.push_str(&stdout);
    log_content.push('\n');
    log_content.push_str("----- stderr -----\n");
    log_content.push_str(&stderr);
    log_content.push('\n');
    fs::write(&log_path, log_content).expect("write test log");

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}
