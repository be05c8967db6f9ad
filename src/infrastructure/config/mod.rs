//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("judge timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("repository directory cannot be empty")]
    EmptyRepoDir,

    #[error("territory table path cannot be empty")]
    EmptyTerritoriesPath,

    #[error("challenge bank directory cannot be empty")]
    EmptyChallengesDir,

    #[error("solution path cannot be empty")]
    EmptySolutionPath,

    #[error("session path cannot be empty")]
    EmptySessionPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. hexclash.yaml in the working directory
    /// 3. Environment variables (`HEXCLASH_`* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("hexclash.yaml"))
            .merge(Env::prefixed("HEXCLASH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// An explicitly named file is authoritative: only programmatic defaults
    /// sit underneath it, and no environment merge applies.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.judge.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if config.repo.dir.is_empty() {
            return Err(ConfigError::EmptyRepoDir);
        }
        if config.repo.territories_path.is_empty() {
            return Err(ConfigError::EmptyTerritoriesPath);
        }
        if config.repo.challenges_dir.is_empty() {
            return Err(ConfigError::EmptyChallengesDir);
        }
        if config.judge.solution_path.is_empty() {
            return Err(ConfigError::EmptySolutionPath);
        }
        if config.session_path.is_empty() {
            return Err(ConfigError::EmptySessionPath);
        }
        Ok(())
    }
}
