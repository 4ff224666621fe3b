//! Configuration file support for the planner.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/wplan/config.toml`.

use crate::{Error, Result, ScoringWeights, MAX_EXERCISES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub solver: SolverConfig,

    /// Weights applied when a request does not set its own
    #[serde(default)]
    pub weights: ScoringWeights,
}

/// Data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
        }
    }
}

/// Scheduler limits
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

// Default value functions
fn default_catalog_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_dir().join(".local/share"));
    base.join("wplan").join("catalog.json")
}

fn default_max_results() -> usize {
    MAX_EXERCISES
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"));
        base.join("wplan").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let all_finite = [
            w.goal_alignment,
            w.compound_preference,
            w.recovery_penalty_24h,
            w.recovery_penalty_48h,
            w.fitness_level_match,
            w.muscle_coverage_gap,
        ]
        .iter()
        .all(|v| v.is_finite());

        if !all_finite {
            return Err(Error::Config("Scoring weights must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.solver.max_results, MAX_EXERCISES);
        assert_eq!(config.weights, ScoringWeights::default());
        assert!(config.data.catalog_path.ends_with("wplan/catalog.json"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.solver.max_results = 8;
        config.weights.muscle_coverage_gap = 22.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.solver.max_results, 8);
        assert_eq!(loaded.weights.muscle_coverage_gap, 22.0);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[weights]
recovery_penalty_24h = -35.0

[solver]
max_results = 6
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.weights.recovery_penalty_24h, -35.0);
        assert_eq!(config.weights.goal_alignment, 10.0); // default
        assert_eq!(config.solver.max_results, 6);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[weights]\ngoal_alignment = nan\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
