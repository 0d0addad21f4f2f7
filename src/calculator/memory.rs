//! Memory footprint estimate for local inference

use crate::specs::{HardwareType, ModelSize, SpecTables};
use serde::{Deserialize, Serialize};

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// FP16 weights
const BYTES_PER_PARAMETER: f64 = 2.0;
const BYTES_PER_KV_VALUE: f64 = 2.0;
/// Share of the naive per-token weight footprint held as activations
const ACTIVATION_FRACTION: f64 = 0.1;
const SAFETY_MARGIN: f64 = 1.2;

/// Memory estimate split by component, all in GB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryBreakdown {
    pub model_gb: f64,
    pub kv_cache_gb: f64,
    pub activation_gb: f64,
    /// Sum of the components plus the safety margin
    pub total_gb: f64,
}

/// Estimate memory for a request, component by component
///
/// Tokens beyond the context window are clamped for the KV cache only;
/// activation memory scales with the raw token count.
pub fn memory_breakdown(
    tables: &SpecTables,
    model: ModelSize,
    tokens: u64,
    batch_size: u64,
    _hardware: HardwareType,
) -> MemoryBreakdown {
    let specs = tables.model(model);
    // Factors are widened to f64 one by one; loaded tables may hold values
    // whose integer product overflows any fixed width
    let parameters = specs.parameters as f64;

    let model_gb = parameters * BYTES_PER_PARAMETER / BYTES_PER_GB;

    // Keys and values for every layer, head and cached position
    let cached_tokens = tokens.min(specs.context_length as u64) as f64;
    let kv_cache_bytes = 2.0
        * specs.layers as f64
        * specs.heads as f64
        * specs.head_dim as f64
        * cached_tokens
        * batch_size as f64
        * BYTES_PER_KV_VALUE;
    let kv_cache_gb = kv_cache_bytes / BYTES_PER_GB;

    let activation_bytes = tokens as f64 * parameters * BYTES_PER_PARAMETER;
    let activation_gb = activation_bytes / BYTES_PER_GB * ACTIVATION_FRACTION;

    MemoryBreakdown {
        model_gb,
        kv_cache_gb,
        activation_gb,
        total_gb: (model_gb + kv_cache_gb + activation_gb) * SAFETY_MARGIN,
    }
}

/// Total memory in GB, safety margin included
pub fn memory_usage_gb(
    tables: &SpecTables,
    model: ModelSize,
    tokens: u64,
    batch_size: u64,
    hardware: HardwareType,
) -> f64 {
    memory_breakdown(tables, model, tokens, batch_size, hardware).total_gb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> SpecTables {
        SpecTables::builtin()
    }

    #[test]
    fn test_weights_are_two_bytes_per_parameter() {
        let breakdown = memory_breakdown(&tables(), ModelSize::SevenB, 1, 1, HardwareType::Cpu);
        let expected = 7_300_000_000.0 * 2.0 / 1_073_741_824.0;
        assert!((breakdown.model_gb - expected).abs() < 1e-9);
    }

    #[test]
    fn test_kv_cache_for_2048_tokens() {
        // 2 * 32 * 32 * 128 * 2048 * 2 bytes is exactly 1 GiB
        let breakdown =
            memory_breakdown(&tables(), ModelSize::SevenB, 2048, 1, HardwareType::Gpu8Gb);
        assert_eq!(breakdown.kv_cache_gb, 1.0);

        let batched = memory_breakdown(&tables(), ModelSize::SevenB, 2048, 4, HardwareType::Gpu8Gb);
        assert_eq!(batched.kv_cache_gb, 4.0);
    }

    #[test]
    fn test_kv_cache_clamps_to_context_but_activations_do_not() {
        let t = tables();
        // 13B has a 4096 token window
        let at_limit = memory_breakdown(&t, ModelSize::ThirteenB, 4096, 1, HardwareType::Gpu24Gb);
        let beyond = memory_breakdown(&t, ModelSize::ThirteenB, 8192, 1, HardwareType::Gpu24Gb);

        assert_eq!(at_limit.kv_cache_gb, beyond.kv_cache_gb);
        assert!((beyond.activation_gb - 2.0 * at_limit.activation_gb).abs() < 1e-6);
        assert!(beyond.total_gb > at_limit.total_gb);
    }

    #[test]
    fn test_total_includes_margin() {
        let b = memory_breakdown(&tables(), ModelSize::ThirteenB, 1000, 2, HardwareType::Gpu16Gb);
        let sum = b.model_gb + b.kv_cache_gb + b.activation_gb;
        assert!((b.total_gb - sum * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_hardware_does_not_change_estimate() {
        let t = tables();
        let cpu = memory_usage_gb(&t, ModelSize::Gpt4, 512, 1, HardwareType::Cpu);
        let gpu = memory_usage_gb(&t, ModelSize::Gpt4, 512, 1, HardwareType::Gpu32Gb);
        assert_eq!(cpu, gpu);
    }

    #[test]
    fn test_large_products_do_not_overflow() {
        let mem = memory_usage_gb(
            &tables(),
            ModelSize::Gpt4,
            1_000_000,
            10_000,
            HardwareType::Gpu32Gb,
        );
        assert!(mem.is_finite() && mem > 0.0);
    }
}
