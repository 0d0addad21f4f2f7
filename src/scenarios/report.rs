//! Deployment scenario report
//!
//! Runs the three reference deployments (local 7B across every hardware
//! class, mid-size hosted 13B, enterprise hosted GPT-4), summarises each one
//! and compares them per 1000 tokens.

use crate::calculator::{ApiCostBreakdown, CalculationRequest, InferenceCalculator};
use crate::error::CalculatorError;
use crate::specs::{DeploymentMode, HardwareType, ModelSize};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub use_case: String,
    pub model: ModelSize,
    pub tokens: u64,
    pub batch_size: u64,
    pub deployment: DeploymentMode,
}

impl ScenarioConfig {
    fn request(&self, hardware: HardwareType) -> Result<CalculationRequest, CalculatorError> {
        CalculationRequest::new(self.model, self.tokens, self.batch_size, hardware, self.deployment)
    }
}

/// One hardware class in the local sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareRun {
    pub hardware: HardwareType,
    pub latency_seconds: f64,
    pub memory_usage_gb: f64,
    pub cost_per_request_usd: f64,
    pub compatible: bool,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |range, v| match range {
            None => Some(Range { min: v, max: v }),
            Some(r) => Some(Range {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSummary {
    pub status: String,
    pub best_performance: Option<HardwareType>,
    pub lowest_cost: Option<HardwareType>,
    pub latency_range: Option<Range>,
    pub cost_range: Option<Range>,
    pub recommendations: Vec<String>,
}

impl LocalSummary {
    fn from_runs(runs: &[HardwareRun]) -> Self {
        let compatible: Vec<&HardwareRun> = runs.iter().filter(|r| r.compatible).collect();

        let fastest = compatible
            .iter()
            .min_by(|a, b| a.latency_seconds.total_cmp(&b.latency_seconds));
        let cheapest = compatible
            .iter()
            .min_by(|a, b| a.cost_per_request_usd.total_cmp(&b.cost_per_request_usd));

        match (fastest, cheapest) {
            (Some(fastest), Some(cheapest)) => Self {
                status: "Compatible hardware available".to_string(),
                best_performance: Some(fastest.hardware),
                lowest_cost: Some(cheapest.hardware),
                latency_range: Range::of(compatible.iter().map(|r| r.latency_seconds)),
                cost_range: Range::of(compatible.iter().map(|r| r.cost_per_request_usd)),
                recommendations: vec![
                    format!("Use {} for best performance", fastest.hardware),
                    format!("Use {} for lowest cost", cheapest.hardware),
                    "Consider hardware investment for production use".to_string(),
                ],
            },
            _ => Self {
                status: "No compatible hardware found".to_string(),
                best_performance: None,
                lowest_cost: None,
                latency_range: None,
                cost_range: None,
                recommendations: vec!["Upgrade to GPU with 16GB+ VRAM".to_string()],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalScenario {
    pub scenario: ScenarioConfig,
    pub results: Vec<HardwareRun>,
    pub summary: LocalSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSummary {
    pub status: String,
    pub tokens_per_second: f64,
    pub cost_per_1k_tokens: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiScenario {
    pub scenario: ScenarioConfig,
    pub latency_seconds: f64,
    pub cost_per_request_usd: f64,
    pub recommendations: Vec<String>,
    pub cost_breakdown: ApiCostBreakdown,
    pub summary: ApiSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub scenario: String,
    pub deployment: DeploymentMode,
    pub latency_per_1k_tokens: f64,
    pub cost_per_1k_tokens: f64,
    /// None for hosted deployments
    pub hardware_requirement: Option<HardwareType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub comparison_data: Vec<ComparisonEntry>,
    pub recommendations: Vec<String>,
}

impl ComparativeAnalysis {
    fn from_entries(comparison_data: Vec<ComparisonEntry>) -> Self {
        let recommendations = comparative_recommendations(&comparison_data);
        Self {
            comparison_data,
            recommendations,
        }
    }
}

/// Full report over the reference deployments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub timestamp: String,
    pub local_deployment: LocalScenario,
    pub api_deployment: ApiScenario,
    pub enterprise_api: ApiScenario,
    pub comparative_analysis: ComparativeAnalysis,
}

pub fn local_scenario_config() -> ScenarioConfig {
    ScenarioConfig {
        name: "Small-Scale Local Deployment (Mistral 7B)".to_string(),
        use_case: "Individual developer or small team running inference locally".to_string(),
        model: ModelSize::SevenB,
        tokens: 1000,
        batch_size: 1,
        deployment: DeploymentMode::Local,
    }
}

pub fn api_scenario_config() -> ScenarioConfig {
    ScenarioConfig {
        name: "Medium-Scale API Deployment (LangChain 13B)".to_string(),
        use_case: "Small to medium business using a hosted API for production".to_string(),
        model: ModelSize::ThirteenB,
        tokens: 500,
        batch_size: 1,
        deployment: DeploymentMode::Api,
    }
}

pub fn enterprise_scenario_config() -> ScenarioConfig {
    ScenarioConfig {
        name: "Large-Scale API Usage (GPT-4)".to_string(),
        use_case: "Enterprise application needing high-quality output".to_string(),
        model: ModelSize::Gpt4,
        tokens: 2000,
        batch_size: 1,
        deployment: DeploymentMode::Api,
    }
}

fn run_local(
    calculator: &InferenceCalculator,
    scenario: ScenarioConfig,
) -> Result<LocalScenario, CalculatorError> {
    let results = HardwareType::ALL
        .into_iter()
        .map(|hardware| -> Result<HardwareRun, CalculatorError> {
            let result = calculator.evaluate(&scenario.request(hardware)?);
            Ok(HardwareRun {
                hardware,
                latency_seconds: result.latency_seconds,
                memory_usage_gb: result.memory_usage_gb,
                cost_per_request_usd: result.cost_per_request_usd,
                compatible: result.hardware_compatible,
                recommendations: result.recommendations,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let summary = LocalSummary::from_runs(&results);
    Ok(LocalScenario {
        scenario,
        results,
        summary,
    })
}

fn run_api(
    calculator: &InferenceCalculator,
    scenario: ScenarioConfig,
) -> Result<ApiScenario, CalculatorError> {
    // Hardware is a placeholder for hosted requests
    let result = calculator.evaluate(&scenario.request(HardwareType::default())?);
    let cost_breakdown = calculator.api_cost_breakdown(scenario.model, scenario.tokens);

    let summary = ApiSummary {
        status: "API deployment viable".to_string(),
        tokens_per_second: scenario.tokens as f64 / result.latency_seconds,
        cost_per_1k_tokens: result.cost_per_1k_tokens(scenario.tokens),
        recommendations: vec![
            format!("{} API suitable for production workloads", scenario.model),
            "Monitor costs and implement rate limiting".to_string(),
            "Consider caching for repeated requests".to_string(),
        ],
    };

    Ok(ApiScenario {
        latency_seconds: result.latency_seconds,
        cost_per_request_usd: result.cost_per_request_usd,
        recommendations: result.recommendations,
        cost_breakdown,
        summary,
        scenario,
    })
}

fn per_1k(value: f64, tokens: u64) -> f64 {
    value / tokens as f64 * 1000.0
}

fn comparison_entries(local: &LocalScenario, apis: [&ApiScenario; 2]) -> Vec<ComparisonEntry> {
    let mut entries = Vec::new();

    let best_local = local
        .results
        .iter()
        .filter(|r| r.compatible)
        .min_by(|a, b| a.latency_seconds.total_cmp(&b.latency_seconds));
    if let Some(best) = best_local {
        entries.push(ComparisonEntry {
            scenario: format!("{} (Local)", local.scenario.model),
            deployment: DeploymentMode::Local,
            latency_per_1k_tokens: per_1k(best.latency_seconds, local.scenario.tokens),
            cost_per_1k_tokens: per_1k(best.cost_per_request_usd, local.scenario.tokens),
            hardware_requirement: Some(best.hardware),
        });
    }

    for api in apis {
        entries.push(ComparisonEntry {
            scenario: format!("{} (API)", api.scenario.model),
            deployment: DeploymentMode::Api,
            latency_per_1k_tokens: per_1k(api.latency_seconds, api.scenario.tokens),
            cost_per_1k_tokens: per_1k(api.cost_per_request_usd, api.scenario.tokens),
            hardware_requirement: None,
        });
    }

    entries
}

fn comparative_recommendations(entries: &[ComparisonEntry]) -> Vec<String> {
    let best_cost = entries
        .iter()
        .min_by(|a, b| a.cost_per_1k_tokens.total_cmp(&b.cost_per_1k_tokens));
    let best_latency = entries
        .iter()
        .min_by(|a, b| a.latency_per_1k_tokens.total_cmp(&b.latency_per_1k_tokens));

    let (Some(best_cost), Some(best_latency)) = (best_cost, best_latency) else {
        return vec!["No valid comparison data available".to_string()];
    };

    let mut recommendations = vec![
        format!(
            "Best cost option: {} (${:.6} per 1000 tokens)",
            best_cost.scenario, best_cost.cost_per_1k_tokens
        ),
        format!(
            "Best performance: {} ({:.1}s per 1000 tokens)",
            best_latency.scenario, best_latency.latency_per_1k_tokens
        ),
    ];

    let has_local = entries.iter().any(|e| e.deployment == DeploymentMode::Local);
    let has_api = entries.iter().any(|e| e.deployment == DeploymentMode::Api);

    if has_local && has_api {
        recommendations.push(
            "Consider hybrid approach: local for development, API for production".to_string(),
        );
    }
    if has_local {
        recommendations.push(
            "Local deployment requires hardware investment but offers lowest ongoing costs"
                .to_string(),
        );
    }
    if has_api {
        recommendations
            .push("API deployment offers scalability but incurs ongoing costs".to_string());
    }

    recommendations
}

impl ScenarioReport {
    pub fn run(calculator: &InferenceCalculator) -> Result<Self, CalculatorError> {
        let local_deployment = run_local(calculator, local_scenario_config())?;
        let api_deployment = run_api(calculator, api_scenario_config())?;
        let enterprise_api = run_api(calculator, enterprise_scenario_config())?;

        let comparative_analysis = ComparativeAnalysis::from_entries(comparison_entries(
            &local_deployment,
            [&api_deployment, &enterprise_api],
        ));

        tracing::info!(
            entries = comparative_analysis.comparison_data.len(),
            "scenario report complete"
        );

        Ok(Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            local_deployment,
            api_deployment,
            enterprise_api,
            comparative_analysis,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("failed to write report {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read report {}", path.as_ref().display()))?;
        let report: Self = serde_json::from_str(&json)?;
        Ok(report)
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(60));
        println!("SCENARIO REPORT SUMMARY");
        println!("{}", "=".repeat(60));

        let local = &self.local_deployment;
        println!();
        println!("{}:", local.scenario.name);
        let summary = &local.summary;
        println!("  Status: {}", summary.status);
        if let (Some(fast), Some(cheap)) = (summary.best_performance, summary.lowest_cost) {
            println!("  Best performance: {}", fast);
            println!("  Lowest cost:      {}", cheap);
        }
        if let Some(range) = summary.latency_range {
            println!("  Latency range:    {:.1}-{:.1}s", range.min, range.max);
        }
        if let Some(range) = summary.cost_range {
            println!("  Cost range:       ${:.6}-${:.6}", range.min, range.max);
        }

        for api in [&self.api_deployment, &self.enterprise_api] {
            println!();
            println!("{}:", api.scenario.name);
            println!("  Status:         {}", api.summary.status);
            println!("  Latency:        {:.2}s", api.latency_seconds);
            println!("  Cost/request:   ${:.6}", api.cost_per_request_usd);
            println!("  Throughput:     {:.1} tokens/s", api.summary.tokens_per_second);
            println!(
                "  Tokens in/out:  {}/{}",
                api.cost_breakdown.input_tokens, api.cost_breakdown.output_tokens
            );
        }

        println!();
        println!("Comparative recommendations:");
        for rec in &self.comparative_analysis.recommendations {
            println!("  - {}", rec);
        }
        println!("  Generated: {}", self.timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(hardware: HardwareType, latency: f64, cost: f64, compatible: bool) -> HardwareRun {
        HardwareRun {
            hardware,
            latency_seconds: latency,
            memory_usage_gb: 1.0,
            cost_per_request_usd: cost,
            compatible,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn test_local_summary_picks_fastest_and_cheapest() {
        let runs = vec![
            run(HardwareType::Cpu, 300.0, 0.002, true),
            run(HardwareType::Gpu16Gb, 30.0, 0.003, true),
            run(HardwareType::Gpu32Gb, 20.0, 0.001, false),
        ];
        let summary = LocalSummary::from_runs(&runs);

        assert_eq!(summary.best_performance, Some(HardwareType::Gpu16Gb));
        assert_eq!(summary.lowest_cost, Some(HardwareType::Cpu));
        assert_eq!(summary.latency_range, Some(Range { min: 30.0, max: 300.0 }));
        assert_eq!(summary.recommendations[0], "Use GPU_16GB for best performance");
    }

    #[test]
    fn test_local_summary_without_compatible_hardware() {
        let runs = vec![run(HardwareType::Gpu4Gb, 10.0, 0.1, false)];
        let summary = LocalSummary::from_runs(&runs);
        assert_eq!(summary.status, "No compatible hardware found");
        assert_eq!(summary.recommendations, vec!["Upgrade to GPU with 16GB+ VRAM".to_string()]);
        assert!(summary.best_performance.is_none());
    }

    #[test]
    fn test_empty_comparison() {
        assert_eq!(
            comparative_recommendations(&[]),
            vec!["No valid comparison data available".to_string()]
        );
    }

    #[test]
    fn test_api_scenario_normalises_by_its_own_tokens() {
        let calculator = InferenceCalculator::default();
        let api = run_api(&calculator, api_scenario_config()).unwrap();

        // 500 tokens in 12 s
        assert!((api.summary.tokens_per_second - 500.0 / 12.0).abs() < 1e-9);
        assert!((api.summary.cost_per_1k_tokens - 0.00026).abs() < 1e-12);
        assert_eq!(api.cost_breakdown.input_tokens, 350);
        assert_eq!(api.cost_breakdown.output_tokens, 150);
    }
}
