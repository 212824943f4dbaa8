use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};

use crate::core::PetError;

/// Longest timing accepted from `config.json`: a century.
pub const MAX_POLICY_HOURS: f64 = 24.0 * 365.0 * 100.0;

/// Timing rules for need decay and sleep, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub feed_hours: f64,
    pub play_hours: f64,
    pub hygiene_hours: f64,
    pub rest_hours: f64,
    pub sleep_hours: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            feed_hours: 0.75,
            play_hours: 0.41,
            hygiene_hours: 1.0,
            rest_hours: 18.0,
            sleep_hours: 8.0,
        }
    }
}

impl Policy {
    pub fn validate(&self) -> Result<(), PetError> {
        let fields = [
            ("feed_hours", self.feed_hours),
            ("play_hours", self.play_hours),
            ("hygiene_hours", self.hygiene_hours),
            ("rest_hours", self.rest_hours),
            ("sleep_hours", self.sleep_hours),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 || value > MAX_POLICY_HOURS {
                return Err(PetError::Config(format!(
                    "{} must be between 0 and {} hours, got {}",
                    name, MAX_POLICY_HOURS, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub policy: Policy,
}

impl Config {
    /// Never fails: an unusable data directory is reported and the pet simply
    /// will not be remembered.
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(|| std::env::var_os("TAMAGOTCHI_HOME").map(PathBuf::from))
            .unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("tamagotchi")
            });

        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            tracing::warn!("Failed to create data directory {}: {}", data_dir.display(), e);
        }

        let policy = Self::load_policy(&data_dir);

        Config { data_dir, policy }
    }

    /// Reads `config.json`, writing the defaults out when it does not exist.
    /// A broken file is reported and left alone.
    fn load_policy(data_dir: &std::path::Path) -> Policy {
        let config_path = data_dir.join("config.json");

        if !config_path.exists() {
            let policy = Policy::default();
            if let Err(e) = Self::write_policy(&config_path, &policy) {
                tracing::warn!("Failed to write default config.json: {:#}", e);
            }
            return policy;
        }

        let parsed = std::fs::read_to_string(&config_path)
            .context("Failed to read config.json")
            .and_then(|content| {
                serde_json::from_str::<Policy>(&content).context("Failed to parse config.json")
            })
            .and_then(|policy| {
                policy.validate()?;
                Ok(policy)
            });

        match parsed {
            Ok(policy) => policy,
            Err(e) => {
                tracing::warn!("{:#}; using default timings", e);
                Policy::default()
            }
        }
    }

    fn write_policy(path: &std::path::Path, policy: &Policy) -> Result<()> {
        let json_str = serde_json::to_string_pretty(policy)
            .context("Failed to serialize default config")?;
        std::fs::write(path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join("tamagotchi.data")
    }

    /// Where earlier versions kept the pet: the working directory.
    pub fn legacy_state_file(&self) -> PathBuf {
        PathBuf::from("tamagotchi.data")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}
