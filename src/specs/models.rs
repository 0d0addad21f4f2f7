//! Model architecture and API pricing tables

use super::ModelSize;
use serde::{Deserialize, Serialize};

/// Architecture constants used by the memory estimate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelSpecs {
    pub parameters: u64,
    pub layers: u32,
    pub heads: u32,
    pub head_dim: u32,
    /// Maximum context window in tokens
    pub context_length: u32,
    pub vocabulary_size: u32,
}

impl ModelSpecs {
    /// Name of the first field that is zero, if any
    pub fn zero_field(&self) -> Option<&'static str> {
        if self.parameters == 0 {
            Some("parameters")
        } else if self.layers == 0 {
            Some("layers")
        } else if self.heads == 0 {
            Some("heads")
        } else if self.head_dim == 0 {
            Some("head_dim")
        } else if self.context_length == 0 {
            Some("context_length")
        } else if self.vocabulary_size == 0 {
            Some("vocabulary_size")
        } else {
            None
        }
    }
}

/// Hosted API prices in USD per 1000 tokens
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

pub fn builtin_model_specs(model: ModelSize) -> ModelSpecs {
    match model {
        ModelSize::SevenB => ModelSpecs {
            parameters: 7_300_000_000,
            layers: 32,
            heads: 32,
            head_dim: 128,
            context_length: 8192,
            vocabulary_size: 32_000,
        },
        ModelSize::ThirteenB => ModelSpecs {
            parameters: 13_000_000_000,
            layers: 40,
            heads: 40,
            head_dim: 128,
            context_length: 4096,
            vocabulary_size: 32_000,
        },
        // Parameter count is an outside estimate
        ModelSize::Gpt4 => ModelSpecs {
            parameters: 1_760_000_000_000,
            layers: 96,
            heads: 96,
            head_dim: 128,
            context_length: 8192,
            vocabulary_size: 100_000,
        },
    }
}

pub fn builtin_api_pricing(model: ModelSize) -> ApiPricing {
    match model {
        // No hosted offering
        ModelSize::SevenB => ApiPricing::default(),
        ModelSize::ThirteenB => ApiPricing {
            input_per_1k: 0.0002,
            output_per_1k: 0.0004,
        },
        ModelSize::Gpt4 => ApiPricing {
            input_per_1k: 0.01,
            output_per_1k: 0.03,
        },
    }
}
