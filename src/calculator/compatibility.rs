//! Hardware compatibility check

use super::memory::memory_usage_gb;
use crate::specs::{HardwareType, ModelSize, SpecTables};

/// Reference request shape used to size a model against VRAM
pub const PROBE_TOKENS: u64 = 2048;
pub const PROBE_BATCH_SIZE: u64 = 1;

/// Whether `hardware` can hold `model`
///
/// CPU always qualifies. GPUs are judged against the fixed probe footprint,
/// never the caller's own request.
pub fn is_hardware_compatible(
    tables: &SpecTables,
    model: ModelSize,
    hardware: HardwareType,
) -> bool {
    if !hardware.is_gpu() {
        return true;
    }

    let required_gb = memory_usage_gb(tables, model, PROBE_TOKENS, PROBE_BATCH_SIZE, hardware);
    tables.hardware(hardware).vram_gb >= required_gb
}
