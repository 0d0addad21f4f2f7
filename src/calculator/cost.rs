//! Per-request cost for hosted and self-hosted deployments

use super::latency::latency_seconds;
use crate::specs::{DeploymentMode, HardwareType, ModelSize, SpecTables};
use serde::{Deserialize, Serialize};

/// Assumed share of a request's tokens that are prompt tokens
pub const INPUT_TOKEN_SHARE: f64 = 0.7;
pub const OUTPUT_TOKEN_SHARE: f64 = 0.3;

/// 3 years at 8 hours a day
pub const HARDWARE_LIFETIME_HOURS: f64 = (3 * 365 * 8) as f64;
pub const ELECTRICITY_USD_PER_KWH: f64 = 0.12;

const SECONDS_PER_HOUR: f64 = 3600.0;
const TOKENS_PER_PRICE_UNIT: f64 = 1000.0;

/// Hosted cost split into prompt and completion tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApiCostBreakdown {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub input_cost_usd: f64,
    pub output_cost_usd: f64,
    pub total_cost_usd: f64,
}

/// USD per request
///
/// Local cost needs the request's latency, so it recomputes it here.
pub fn cost_per_request_usd(
    tables: &SpecTables,
    model: ModelSize,
    tokens: u64,
    batch_size: u64,
    hardware: HardwareType,
    deployment: DeploymentMode,
) -> f64 {
    match deployment {
        DeploymentMode::Api => {
            let pricing = tables.api_pricing(model);
            let input_tokens = tokens as f64 * INPUT_TOKEN_SHARE;
            let output_tokens = tokens as f64 * OUTPUT_TOKEN_SHARE;

            let input_cost = input_tokens / TOKENS_PER_PRICE_UNIT * pricing.input_per_1k;
            let output_cost = output_tokens / TOKENS_PER_PRICE_UNIT * pricing.output_per_1k;
            input_cost + output_cost
        }
        DeploymentMode::Local => {
            let latency = latency_seconds(tables, model, tokens, batch_size, hardware, deployment);
            hourly_operating_cost_usd(tables, hardware) / SECONDS_PER_HOUR * latency
        }
    }
}

/// Amortized hardware plus electricity, per hour of use
pub fn hourly_operating_cost_usd(tables: &SpecTables, hardware: HardwareType) -> f64 {
    let specs = tables.hardware(hardware);
    let hardware_cost_per_hour = specs.cost_usd / HARDWARE_LIFETIME_HOURS;
    let electricity_cost_per_hour = (specs.power_watts / 1000.0) * ELECTRICITY_USD_PER_KWH;
    hardware_cost_per_hour + electricity_cost_per_hour
}

/// Hosted cost with whole token counts on each side of the 70/30 split
pub fn api_cost_breakdown(tables: &SpecTables, model: ModelSize, tokens: u64) -> ApiCostBreakdown {
    let pricing = tables.api_pricing(model);
    let input_tokens = (tokens as f64 * INPUT_TOKEN_SHARE) as u64;
    let output_tokens = (tokens as f64 * OUTPUT_TOKEN_SHARE) as u64;

    let input_cost_usd = input_tokens as f64 / TOKENS_PER_PRICE_UNIT * pricing.input_per_1k;
    let output_cost_usd = output_tokens as f64 / TOKENS_PER_PRICE_UNIT * pricing.output_per_1k;

    ApiCostBreakdown {
        input_tokens,
        output_tokens,
        input_cost_usd,
        output_cost_usd,
        total_cost_usd: input_cost_usd + output_cost_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_cost_13b() {
        let t = SpecTables::builtin();
        let cost = cost_per_request_usd(
            &t,
            ModelSize::ThirteenB,
            500,
            1,
            HardwareType::Gpu8Gb,
            DeploymentMode::Api,
        );
        assert!((cost - 0.00013).abs() < 1e-12, "got {}", cost);
    }

    #[test]
    fn test_api_cost_gpt4() {
        let t = SpecTables::builtin();
        let cost = cost_per_request_usd(
            &t,
            ModelSize::Gpt4,
            2000,
            1,
            HardwareType::Gpu8Gb,
            DeploymentMode::Api,
        );
        assert!((cost - 0.032).abs() < 1e-12, "got {}", cost);
    }

    #[test]
    fn test_seven_b_api_is_free() {
        let t = SpecTables::builtin();
        let cost = cost_per_request_usd(
            &t,
            ModelSize::SevenB,
            5000,
            1,
            HardwareType::Cpu,
            DeploymentMode::Api,
        );
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_local_cost_scales_with_latency() {
        let t = SpecTables::builtin();
        let hardware = HardwareType::Gpu16Gb;
        let latency = latency_seconds(
            &t,
            ModelSize::SevenB,
            1000,
            1,
            hardware,
            DeploymentMode::Local,
        );
        let cost = cost_per_request_usd(
            &t,
            ModelSize::SevenB,
            1000,
            1,
            hardware,
            DeploymentMode::Local,
        );

        // 1200 / 8760 + 0.32 * 0.12 per hour
        let hourly = 1200.0 / 8760.0 + 0.0384;
        assert!((hourly_operating_cost_usd(&t, hardware) - hourly).abs() < 1e-12);
        assert!((cost - hourly / 3600.0 * latency).abs() < 1e-15);
    }

    #[test]
    fn test_breakdown_splits_tokens() {
        let t = SpecTables::builtin();
        let breakdown = api_cost_breakdown(&t, ModelSize::Gpt4, 2000);
        assert_eq!(breakdown.input_tokens, 1400);
        assert_eq!(breakdown.output_tokens, 600);
        assert!((breakdown.input_cost_usd - 0.014).abs() < 1e-12);
        assert!((breakdown.output_cost_usd - 0.018).abs() < 1e-12);
        assert!((breakdown.total_cost_usd - 0.032).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_truncates_odd_counts() {
        let t = SpecTables::builtin();
        let breakdown = api_cost_breakdown(&t, ModelSize::ThirteenB, 7);
        assert_eq!(breakdown.input_tokens, 4);
        assert_eq!(breakdown.output_tokens, 2);
    }
}
