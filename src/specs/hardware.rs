//! Hardware classes and their measured throughput

use super::{HardwareType, ModelSize};
use serde::{Deserialize, Serialize};

/// Performance and cost characteristics of a hardware class
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HardwareSpecs {
    /// Dedicated VRAM, 0 for CPU
    pub vram_gb: f64,
    pub memory_bandwidth_gbps: f64,
    pub compute_flops: f64,
    pub power_watts: f64,
    /// Acquisition cost
    pub cost_usd: f64,
}

impl HardwareSpecs {
    /// Name of the first field that is negative or not finite, if any
    pub fn invalid_field(&self) -> Option<&'static str> {
        [
            ("vram_gb", self.vram_gb),
            ("memory_bandwidth_gbps", self.memory_bandwidth_gbps),
            ("compute_flops", self.compute_flops),
            ("power_watts", self.power_watts),
            ("cost_usd", self.cost_usd),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|(name, _)| name)
    }
}

pub fn builtin_hardware_specs(hardware: HardwareType) -> HardwareSpecs {
    let (vram_gb, memory_bandwidth_gbps, compute_flops, power_watts, cost_usd) = match hardware {
        HardwareType::Cpu => (0.0, 50.0, 1e11, 65.0, 200.0),
        HardwareType::Gpu4Gb => (4.0, 112.0, 2e12, 75.0, 150.0),
        HardwareType::Gpu8Gb => (8.0, 448.0, 2e13, 220.0, 500.0),
        HardwareType::Gpu12Gb => (12.0, 504.0, 3e13, 320.0, 700.0),
        HardwareType::Gpu16Gb => (16.0, 760.0, 4e13, 320.0, 1200.0),
        HardwareType::Gpu24Gb => (24.0, 1008.0, 8.3e13, 450.0, 1600.0),
        HardwareType::Gpu32Gb => (32.0, 1008.0, 8.3e13, 450.0, 1600.0),
    };

    HardwareSpecs {
        vram_gb,
        memory_bandwidth_gbps,
        compute_flops,
        power_watts,
        cost_usd,
    }
}

/// Tokens per second for a model running locally on a hardware class
pub fn builtin_throughput(model: ModelSize, hardware: HardwareType) -> f64 {
    // Columns follow HardwareType::ALL
    let row: [f64; HardwareType::COUNT] = match model {
        ModelSize::SevenB => [3.0, 8.0, 15.0, 25.0, 35.0, 45.0, 50.0],
        ModelSize::ThirteenB => [1.0, 3.0, 6.0, 10.0, 15.0, 25.0, 30.0],
        // No local path for GPT-4; nonzero so local latency stays finite
        ModelSize::Gpt4 => [0.1; HardwareType::COUNT],
    };
    row[hardware.index()]
}
