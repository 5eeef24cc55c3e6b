use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_CONFIG_DIR: &str = ".workload";
const DEFAULT_CONFIG_FILE_NAME: &str = "config.json";

/// How the write path renders a session's month as a bucket key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MonthKeyStyle {
    /// Upper-case English month name, e.g. `MARCH`.
    Name,
    /// Month number without padding, e.g. `3`.
    Number,
}

impl Default for MonthKeyStyle {
    fn default() -> Self {
        MonthKeyStyle::Name
    }
}

impl std::str::FromStr for MonthKeyStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(MonthKeyStyle::Name),
            "number" | "num" => Ok(MonthKeyStyle::Number),
            _ => Err(anyhow::anyhow!("Unknown month key style: {}", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorkloadConfig {
    pub month_key: MonthKeyStyle,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            month_key: MonthKeyStyle::default(),
            log_filter: "warn".to_string(),
        }
    }
}

impl WorkloadConfig {
    /// Loads the config from `path`, or from `~/.workload/config.json` when no
    /// path is given. A missing default file yields the defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: WorkloadConfig = serde_json::from_reader(reader)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE_NAME))
}
