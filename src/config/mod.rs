pub mod defaults;

use crate::calculator::{CalculationInput, InferenceCalculator};
use crate::specs::SpecTables;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::RequestDefaults;

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: RequestDefaults,
    /// Custom specification tables; the built-in tables are used when unset.
    /// A relative path in a config file is relative to that file's directory.
    pub tables_path: Option<PathBuf>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&json)
            .with_context(|| format!("invalid config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.tables_path = config
                .tables_path
                .take()
                .map(|tables| if tables.is_relative() { dir.join(tables) } else { tables });
        }
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("failed to write config {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Tables named by `tables_path`, or the built-in set
    pub fn tables(&self) -> anyhow::Result<SpecTables> {
        match &self.tables_path {
            Some(path) => {
                tracing::warn!(path = %path.display(), "using custom specification tables");
                SpecTables::load(path)
                    .with_context(|| format!("failed to load tables from {}", path.display()))
            }
            None => Ok(SpecTables::builtin()),
        }
    }

    pub fn calculator(&self) -> anyhow::Result<InferenceCalculator> {
        Ok(InferenceCalculator::new(self.tables()?))
    }

    /// Build an input, filling omitted fields from the configured defaults
    pub fn input(
        &self,
        model: &str,
        tokens: i64,
        batch_size: Option<i64>,
        hardware: Option<&str>,
        deployment: Option<&str>,
    ) -> CalculationInput {
        CalculationInput::new(model, tokens)
            .with_batch_size(batch_size.unwrap_or(self.defaults.batch_size))
            .with_hardware(hardware.unwrap_or(&self.defaults.hardware))
            .with_deployment(deployment.unwrap_or(&self.defaults.deployment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.batch_size, 1);
        assert_eq!(config.defaults.hardware, "GPU_8GB");
        assert_eq!(config.defaults.deployment, "local");
        assert!(config.tables_path.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"defaults": {"hardware": "GPU_24GB"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.defaults.hardware, "GPU_24GB");
        assert_eq!(config.defaults.deployment, "local");
        assert_eq!(config.defaults.batch_size, 1);
    }

    #[test]
    fn test_input_prefers_explicit_values() {
        let mut config = Config::default();
        config.defaults.deployment = "api".to_string();

        let input = config.input("13B", 500, None, None, None);
        assert_eq!(input.deployment, "api");
        assert_eq!(input.hardware, "GPU_8GB");

        let input = config.input("13B", 500, Some(3), Some("CPU"), Some("local"));
        assert_eq!(input.batch_size, 3);
        assert_eq!(input.hardware, "CPU");
        assert_eq!(input.deployment, "local");
    }
}
