//! Optional configuration file
//!
//! Looked up in order:
//! 1. `./babynames.toml`
//! 2. `<config dir>/babynames/config.toml` (e.g. `~/.config/babynames/config.toml`)
//!
//! A missing file means defaults. Command-line flags override anything set here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::writer::DEFAULT_SUMMARY_SUFFIX;

/// Local config file name, checked in the working directory
pub const LOCAL_CONFIG_FILE: &str = "babynames.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Suffix appended to source names when writing summary files
    #[serde(default = "default_summary_suffix")]
    pub summary_suffix: String,

    /// Worker threads for multi-file runs
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

fn default_summary_suffix() -> String {
    DEFAULT_SUMMARY_SUFFIX.to_string()
}

fn default_jobs() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_suffix: default_summary_suffix(),
            jobs: default_jobs(),
            pretty: false,
        }
    }
}

impl Config {
    /// Load the first config file found, or defaults if there is none
    pub fn load() -> Result<Self> {
        for path in candidate_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if config.jobs == 0 {
            anyhow::bail!("Invalid 'jobs' in {}: must be at least 1", path.display());
        }

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("babynames").join("config.toml"));
    }
    paths
}
