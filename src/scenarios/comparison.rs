//! Side-by-side comparison of the standard deployment choices

use crate::calculator::{CalculationRequest, InferenceCalculator};
use crate::error::CalculatorError;
use crate::specs::{DeploymentMode, HardwareType, ModelSize};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPARISON_TOKENS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonScenario {
    pub name: &'static str,
    pub model: ModelSize,
    pub hardware: HardwareType,
    pub deployment: DeploymentMode,
}

pub const COMPARISON_SCENARIOS: [ComparisonScenario; 3] = [
    ComparisonScenario {
        name: "Development (Mistral 7B Local)",
        model: ModelSize::SevenB,
        hardware: HardwareType::Gpu16Gb,
        deployment: DeploymentMode::Local,
    },
    ComparisonScenario {
        name: "Production API (LangChain 13B)",
        model: ModelSize::ThirteenB,
        hardware: HardwareType::Gpu8Gb,
        deployment: DeploymentMode::Api,
    },
    ComparisonScenario {
        name: "Enterprise (GPT-4 API)",
        model: ModelSize::Gpt4,
        hardware: HardwareType::Gpu8Gb,
        deployment: DeploymentMode::Api,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub model: ModelSize,
    pub deployment: DeploymentMode,
    pub latency_seconds: f64,
    /// None for hosted deployments
    pub memory_usage_gb: Option<f64>,
    pub cost_per_request_usd: f64,
    pub cost_per_1k_tokens: f64,
}

/// Run every comparison scenario at the same token count
pub fn compare_scenarios(
    calculator: &InferenceCalculator,
    tokens: u64,
) -> Result<Vec<ComparisonRow>, CalculatorError> {
    COMPARISON_SCENARIOS
        .iter()
        .map(|scenario| -> Result<ComparisonRow, CalculatorError> {
            let request = CalculationRequest::new(
                scenario.model,
                tokens,
                1,
                scenario.hardware,
                scenario.deployment,
            )?;
            let result = calculator.evaluate(&request);

            Ok(ComparisonRow {
                name: scenario.name.to_string(),
                model: scenario.model,
                deployment: scenario.deployment,
                latency_seconds: result.latency_seconds,
                memory_usage_gb: match scenario.deployment {
                    DeploymentMode::Local => Some(result.memory_usage_gb),
                    DeploymentMode::Api => None,
                },
                cost_per_request_usd: result.cost_per_request_usd,
                cost_per_1k_tokens: result.cost_per_1k_tokens(tokens),
            })
        })
        .collect()
}

pub fn print_comparison(rows: &[ComparisonRow], tokens: u64) {
    let rule = "=".repeat(100);
    println!();
    println!("{}", rule);
    println!("SCENARIO COMPARISON ({} tokens)", tokens);
    println!("{}", rule);
    println!(
        "{:<32} {:<12} {:<12} {:<14} {:<14}",
        "Scenario", "Latency (s)", "Memory (GB)", "Cost/Req ($)", "Cost/1K ($)"
    );
    println!("{}", "-".repeat(100));

    for row in rows {
        let memory = row
            .memory_usage_gb
            .map(|gb| format!("{:.2}", gb))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{:<32} {:<12.2} {:<12} {:<14.6} {:<14.6}",
            row.name, row.latency_seconds, memory, row.cost_per_request_usd, row.cost_per_1k_tokens
        );
    }

    println!("{}", rule);
    println!();
    println!("Key insights:");
    println!("  • Local deployment has the lowest running cost but needs a hardware investment");
    println!("  • API deployment trades ongoing cost for convenience");
    println!("  • GPT-4 gives the best quality at the highest price");
}
