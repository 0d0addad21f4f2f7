//! Advisory notes attached to a result

use super::compatibility::is_hardware_compatible;
use super::CalculationRequest;
use crate::specs::{DeploymentMode, HardwareType, ModelSize, SpecTables};

pub const HARDWARE_INCOMPATIBLE: &str = "Hardware incompatible - consider GPU with more VRAM";
pub const CPU_TOO_SLOW: &str = "CPU inference will be very slow for this model size";
pub const LONG_SEQUENCE_MEMORY: &str = "Long sequences may cause memory issues";
pub const GPT4_LONG_SEQUENCE_COST: &str = "GPT-4 costs can be high for long sequences";
pub const API_NO_BATCHING: &str = "API deployment typically doesn't support batching";
pub const LARGE_BATCH_MEMORY: &str = "Large batch sizes may cause memory issues";
pub const CHUNK_LONG_SEQUENCES: &str = "Consider chunking long sequences";

const LOCAL_LONG_SEQUENCE_TOKENS: u64 = 2048;
const GPT4_COSTLY_TOKENS: u64 = 1000;
const LARGE_BATCH_SIZE: u64 = 4;
const CHUNKING_TOKENS: u64 = 4096;

/// Every rule is checked in order; several can fire for one request
pub fn generate_recommendations(tables: &SpecTables, request: &CalculationRequest) -> Vec<String> {
    let model = request.model();
    let hardware = request.hardware();
    let tokens = request.tokens();
    let batch_size = request.batch_size();

    let mut recommendations = Vec::new();

    match request.deployment() {
        DeploymentMode::Local => {
            if !is_hardware_compatible(tables, model, hardware) {
                recommendations.push(HARDWARE_INCOMPATIBLE.to_string());
            }
            if hardware == HardwareType::Cpu && model != ModelSize::SevenB {
                recommendations.push(CPU_TOO_SLOW.to_string());
            }
            if tokens > LOCAL_LONG_SEQUENCE_TOKENS {
                recommendations.push(LONG_SEQUENCE_MEMORY.to_string());
            }
        }
        DeploymentMode::Api => {
            if model == ModelSize::Gpt4 && tokens > GPT4_COSTLY_TOKENS {
                recommendations.push(GPT4_LONG_SEQUENCE_COST.to_string());
            }
            if batch_size > 1 {
                recommendations.push(API_NO_BATCHING.to_string());
            }
        }
    }

    if batch_size > LARGE_BATCH_SIZE {
        recommendations.push(LARGE_BATCH_MEMORY.to_string());
    }
    if tokens > CHUNKING_TOKENS {
        recommendations.push(CHUNK_LONG_SEQUENCES.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recs(
        model: ModelSize,
        tokens: u64,
        batch_size: u64,
        hardware: HardwareType,
        deployment: DeploymentMode,
    ) -> Vec<String> {
        let request =
            CalculationRequest::new(model, tokens, batch_size, hardware, deployment).unwrap();
        generate_recommendations(&SpecTables::builtin(), &request)
    }

    #[test]
    fn test_cpu_seven_b_short_request_is_quiet() {
        let r = recs(ModelSize::SevenB, 500, 1, HardwareType::Cpu, DeploymentMode::Local);
        assert!(r.is_empty(), "{:?}", r);
    }

    #[test]
    fn test_cpu_large_model_is_slow() {
        let r = recs(ModelSize::ThirteenB, 500, 1, HardwareType::Cpu, DeploymentMode::Local);
        assert_eq!(r, vec![CPU_TOO_SLOW.to_string()]);
    }

    #[test]
    fn test_local_rules_fire_in_order() {
        let r = recs(ModelSize::ThirteenB, 5000, 8, HardwareType::Gpu8Gb, DeploymentMode::Local);
        assert_eq!(
            r,
            vec![
                HARDWARE_INCOMPATIBLE.to_string(),
                LONG_SEQUENCE_MEMORY.to_string(),
                LARGE_BATCH_MEMORY.to_string(),
                CHUNK_LONG_SEQUENCES.to_string(),
            ]
        );
    }

    #[test]
    fn test_api_rules_fire_in_order() {
        let r = recs(ModelSize::Gpt4, 5000, 5, HardwareType::Gpu8Gb, DeploymentMode::Api);
        assert_eq!(
            r,
            vec![
                GPT4_LONG_SEQUENCE_COST.to_string(),
                API_NO_BATCHING.to_string(),
                LARGE_BATCH_MEMORY.to_string(),
                CHUNK_LONG_SEQUENCES.to_string(),
            ]
        );
    }

    #[test]
    fn test_api_mode_skips_hardware_rules() {
        let r = recs(ModelSize::ThirteenB, 3000, 1, HardwareType::Cpu, DeploymentMode::Api);
        assert!(r.is_empty(), "{:?}", r);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let r = recs(ModelSize::Gpt4, 1000, 1, HardwareType::Gpu8Gb, DeploymentMode::Api);
        assert!(r.is_empty(), "{:?}", r);
        assert!(recs(ModelSize::SevenB, 4096, 4, HardwareType::Cpu, DeploymentMode::Api)
            .iter()
            .all(|r| r != CHUNK_LONG_SEQUENCES && r != LARGE_BATCH_MEMORY));
        let at_2048 = recs(ModelSize::SevenB, 2048, 1, HardwareType::Cpu, DeploymentMode::Local);
        assert!(!at_2048.contains(&LONG_SEQUENCE_MEMORY.to_string()));
    }
}
