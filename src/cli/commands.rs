//! CLI command implementations

use anyhow::Result;
use inference_calc_rs::calculator::{CalculationRequest, CalculationResult};
use inference_calc_rs::config::Config;
use inference_calc_rs::scenarios::{compare_scenarios, print_comparison, ScenarioReport};
use inference_calc_rs::specs::DeploymentMode;
use std::path::{Path, PathBuf};

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

pub fn calculate(
    config: &Config,
    model: &str,
    tokens: i64,
    batch_size: Option<i64>,
    hardware: Option<&str>,
    deployment: Option<&str>,
    json: bool,
) -> Result<()> {
    let calculator = config.calculator()?;
    let input = config.input(model, tokens, batch_size, hardware, deployment);
    let request = CalculationRequest::parse(&input)?;
    let result = calculator.evaluate(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&request, &result);
    }

    Ok(())
}

fn print_result(request: &CalculationRequest, result: &CalculationResult) {
    let local = request.deployment() == DeploymentMode::Local;

    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║             LLM Inference Calculator Results                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  Model:       {}", request.model());
    println!("  Tokens:      {}", request.tokens());
    println!("  Batch size:  {}", request.batch_size());
    println!("  Deployment:  {}", request.deployment());
    if local {
        println!("  Hardware:    {}", request.hardware());
    }

    println!();
    println!("Results:");
    println!("  Latency:            {:.2} seconds", result.latency_seconds);
    if local {
        println!("  Memory usage:       {:.2} GB", result.memory_usage_gb);
    }
    println!("  Cost per request:   ${:.6}", result.cost_per_request_usd);
    println!(
        "  Cost per 1K tokens: ${:.6}",
        result.cost_per_1k_tokens(request.tokens())
    );
    if local {
        let status = if result.hardware_compatible {
            "✅ Compatible"
        } else {
            "❌ Incompatible"
        };
        println!("  Hardware:           {}", status);
    }

    if !result.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for (i, rec) in result.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
    }
    println!();
}

pub fn compare(config: &Config, tokens: u64) -> Result<()> {
    let calculator = config.calculator()?;
    let rows = compare_scenarios(&calculator, tokens)?;
    print_comparison(&rows, tokens);
    Ok(())
}

pub fn scenarios(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let calculator = config.calculator()?;
    let report = ScenarioReport::run(&calculator)?;
    report.print_summary();

    if let Some(path) = output {
        report.save(&path)?;
        println!();
        println!("Detailed results saved to {}", path.display());
    }

    Ok(())
}

pub fn tables(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let tables = config.tables()?;

    match output {
        Some(path) => {
            tables.save(&path)?;
            println!("Specification tables written to {}", path.display());
        }
        None => println!("{}", tables.to_json()?),
    }

    Ok(())
}
