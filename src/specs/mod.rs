//! Model, hardware and deployment identifiers plus their specification tables

pub mod hardware;
pub mod models;
pub mod tables;

use crate::error::CalculatorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use hardware::{builtin_hardware_specs, builtin_throughput, HardwareSpecs};
pub use models::{builtin_api_pricing, builtin_model_specs, ApiPricing, ModelSpecs};
pub use tables::{SpecTables, TableError, BUILTIN_TABLES};

/// Supported models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelSize {
    /// Mistral 7B
    #[serde(rename = "7B")]
    SevenB,
    /// LangChain 13B
    #[serde(rename = "13B")]
    ThirteenB,
    /// GPT-4, hosted only
    #[serde(rename = "GPT-4")]
    Gpt4,
}

impl ModelSize {
    pub const COUNT: usize = 3;
    pub const ALL: [ModelSize; Self::COUNT] = [Self::SevenB, Self::ThirteenB, Self::Gpt4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenB => "7B",
            Self::ThirteenB => "13B",
            Self::Gpt4 => "GPT-4",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Hardware classes for local deployment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum HardwareType {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU_4GB")]
    Gpu4Gb,
    #[default]
    #[serde(rename = "GPU_8GB")]
    Gpu8Gb,
    #[serde(rename = "GPU_12GB")]
    Gpu12Gb,
    #[serde(rename = "GPU_16GB")]
    Gpu16Gb,
    #[serde(rename = "GPU_24GB")]
    Gpu24Gb,
    #[serde(rename = "GPU_32GB")]
    Gpu32Gb,
}

impl HardwareType {
    pub const COUNT: usize = 7;
    pub const ALL: [HardwareType; Self::COUNT] = [
        Self::Cpu,
        Self::Gpu4Gb,
        Self::Gpu8Gb,
        Self::Gpu12Gb,
        Self::Gpu16Gb,
        Self::Gpu24Gb,
        Self::Gpu32Gb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu4Gb => "GPU_4GB",
            Self::Gpu8Gb => "GPU_8GB",
            Self::Gpu12Gb => "GPU_12GB",
            Self::Gpu16Gb => "GPU_16GB",
            Self::Gpu24Gb => "GPU_24GB",
            Self::Gpu32Gb => "GPU_32GB",
        }
    }

    pub fn is_gpu(&self) -> bool {
        !matches!(self, Self::Cpu)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Where the model runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Self-hosted on one of the hardware classes
    #[default]
    Local,
    /// Hosted API, hardware is ignored
    Api,
}

impl DeploymentMode {
    pub const ALL: [DeploymentMode; 2] = [Self::Local, Self::Api];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Api => "api",
        }
    }
}

fn unknown_value<T: fmt::Display>(
    argument: &'static str,
    value: &str,
    allowed: &[T],
) -> CalculatorError {
    let allowed = allowed
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    CalculatorError::invalid(
        argument,
        format!("unknown value '{}', expected one of: {}", value, allowed),
    )
}

impl FromStr for ModelSize {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| unknown_value("model", s, &Self::ALL))
    }
}

impl FromStr for HardwareType {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| unknown_value("hardware", s, &Self::ALL))
    }
}

impl FromStr for DeploymentMode {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| unknown_value("deployment", s, &Self::ALL))
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HardwareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_parse_their_own_strings() {
        for model in ModelSize::ALL {
            assert_eq!(model.as_str().parse::<ModelSize>().unwrap(), model);
        }
        for hardware in HardwareType::ALL {
            assert_eq!(hardware.as_str().parse::<HardwareType>().unwrap(), hardware);
        }
        assert_eq!("api".parse::<DeploymentMode>().unwrap(), DeploymentMode::Api);
    }

    #[test]
    fn test_unknown_identifier_names_field() {
        let err = "70B".parse::<ModelSize>().unwrap_err();
        assert_eq!(err.argument(), "model");
        assert!(err.to_string().contains("70B"));

        // Case matters: the vocabulary is closed and exact
        assert_eq!("LOCAL".parse::<DeploymentMode>().unwrap_err().argument(), "deployment");
        assert_eq!("gpu_8gb".parse::<HardwareType>().unwrap_err().argument(), "hardware");
    }

    #[test]
    fn test_serde_uses_identifier_strings() {
        assert_eq!(serde_json::to_string(&ModelSize::Gpt4).unwrap(), "\"GPT-4\"");
        assert_eq!(serde_json::to_string(&HardwareType::Gpu16Gb).unwrap(), "\"GPU_16GB\"");
        assert_eq!(serde_json::to_string(&DeploymentMode::Local).unwrap(), "\"local\"");
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, model) in ModelSize::ALL.iter().enumerate() {
            assert_eq!(model.index(), i);
        }
        for (i, hardware) in HardwareType::ALL.iter().enumerate() {
            assert_eq!(hardware.index(), i);
        }
    }
}
