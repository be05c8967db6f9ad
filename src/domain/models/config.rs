use serde::{Deserialize, Serialize};

/// Main configuration structure for hexclash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Shared repository configuration
    #[serde(default)]
    pub repo: RepoConfig,

    /// Judge configuration
    #[serde(default)]
    pub judge: JudgeConfig,

    /// Path to the local session file
    #[serde(default = "default_session_path")]
    pub session_path: String,
}

fn default_session_path() -> String {
    "session.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: RepoConfig::default(),
            judge: JudgeConfig::default(),
            session_path: default_session_path(),
        }
    }
}

/// Shared git repository layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RepoConfig {
    /// Local clone of the shared repository
    #[serde(default = "default_repo_dir")]
    pub dir: String,

    /// Territory table path, relative to `dir`
    #[serde(default = "default_territories_path")]
    pub territories_path: String,

    /// Challenge bank directory, relative to `dir`
    #[serde(default = "default_challenges_dir")]
    pub challenges_dir: String,
}

fn default_repo_dir() -> String {
    ".".to_string()
}

fn default_territories_path() -> String {
    "data/territories.json".to_string()
}

fn default_challenges_dir() -> String {
    "challenges".to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            dir: default_repo_dir(),
            territories_path: default_territories_path(),
            challenges_dir: default_challenges_dir(),
        }
    }
}

/// Candidate execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JudgeConfig {
    /// Candidate solution artifact, invoked with no arguments
    #[serde(default = "default_solution_path")]
    pub solution_path: String,

    /// Wall-clock bound on candidate execution, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_solution_path() -> String {
    "./solution".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            solution_path: default_solution_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
