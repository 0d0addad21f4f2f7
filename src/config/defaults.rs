use crate::calculator::CalculationInput;
use serde::{Deserialize, Serialize};

/// Values used when a caller leaves a request field out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub batch_size: i64,
    pub hardware: String,
    pub deployment: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            batch_size: CalculationInput::DEFAULT_BATCH_SIZE,
            hardware: CalculationInput::DEFAULT_HARDWARE.to_string(),
            deployment: CalculationInput::DEFAULT_DEPLOYMENT.to_string(),
        }
    }
}
