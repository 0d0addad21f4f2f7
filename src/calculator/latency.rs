//! Latency estimate

use crate::specs::{DeploymentMode, HardwareType, ModelSize, SpecTables};

/// Network round trip added to every hosted call
pub const API_BASE_LATENCY_SECONDS: f64 = 2.0;
/// Server-side processing rate, independent of model
pub const API_TOKENS_PER_SECOND: f64 = 50.0;
/// Fraction added to local compute time for memory access
pub const MEMORY_ACCESS_OVERHEAD: f64 = 0.1;

/// Seconds to serve a request
///
/// Batch size is accepted but does not yet change throughput.
pub fn latency_seconds(
    tables: &SpecTables,
    model: ModelSize,
    tokens: u64,
    _batch_size: u64,
    hardware: HardwareType,
    deployment: DeploymentMode,
) -> f64 {
    match deployment {
        DeploymentMode::Api => API_BASE_LATENCY_SECONDS + tokens as f64 / API_TOKENS_PER_SECOND,
        DeploymentMode::Local => {
            let compute_time = tokens as f64 / tables.throughput(model, hardware);
            compute_time * (1.0 + MEMORY_ACCESS_OVERHEAD)
        }
    }
}
