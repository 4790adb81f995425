//! Configuration management

mod cli;

pub use cli::{Cli, Command};

use crate::types::BinDiffError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration for bindiff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory of the payload store
    pub store_dir: PathBuf,

    /// Number of comparison workers for batch runs
    pub workers: usize,

    /// Bounded queue size per channel in the comparison pool
    pub queue_capacity: usize,

    /// Default log filter (overridden by RUST_LOG)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".bindiff"),
            workers: 4,
            queue_capacity: 16,
            log_level: "info".to_string(),
        }
    }
}

/// On-disk configuration file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    store_dir: Option<PathBuf>,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
    log_level: Option<String>,
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), BinDiffError> {
        self.validate_store()?;
        self.validate_pool()
    }

    /// Checks on the store location; only commands that open the store need them
    pub fn validate_store(&self) -> Result<(), BinDiffError> {
        if self.store_dir.as_os_str().is_empty() {
            return Err(BinDiffError::Config(
                "Store directory cannot be empty".to_string(),
            ));
        }

        if self.store_dir.is_file() {
            return Err(BinDiffError::Config(format!(
                "Store path is a file, not a directory: {:?}",
                self.store_dir
            )));
        }

        Ok(())
    }

    /// Checks on the batch pool settings
    pub fn validate_pool(&self) -> Result<(), BinDiffError> {
        if self.workers == 0 {
            return Err(BinDiffError::Config(
                "Worker count must be at least 1".to_string(),
            ));
        }

        if self.queue_capacity == 0 {
            return Err(BinDiffError::Config(
                "Queue capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Defaults overlaid with the keys present in a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, BinDiffError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Defaults overlaid with the keys present in TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, BinDiffError> {
        let file: FileConfig = toml::from_str(text)
            .map_err(|e| BinDiffError::Config(format!("Invalid config file: {}", e)))?;

        let mut config = Config::default();
        if let Some(store_dir) = file.store_dir {
            config.store_dir = store_dir;
        }
        if let Some(workers) = file.workers {
            config.workers = workers;
        }
        if let Some(queue_capacity) = file.queue_capacity {
            config.queue_capacity = queue_capacity;
        }
        if let Some(log_level) = file.log_level {
            config.log_level = log_level;
        }
        Ok(config)
    }
}

impl TryFrom<&Cli> for Config {
    type Error = BinDiffError;

    /// Config file (if any) first, then command line flags on top
    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let mut config = match &cli.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };

        if let Some(store_dir) = &cli.store {
            config.store_dir = store_dir.clone();
        }
        if let Some(workers) = cli.workers {
            config.workers = workers;
        }
        if let Some(log_level) = &cli.log_level {
            config.log_level = log_level.clone();
        }

        if cli.command.uses_store() {
            config.validate()?;
        } else {
            config.validate_pool()?;
        }
        Ok(config)
    }
}
