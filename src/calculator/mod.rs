//! Inference estimate engine
//!
//! `InferenceCalculator::calculate` validates raw caller input and runs the
//! formulas in a fixed order: memory, latency, cost, compatibility,
//! recommendations. Nothing here performs I/O or mutates the tables, so a
//! single calculator can be shared across threads.

pub mod compatibility;
pub mod cost;
pub mod latency;
pub mod memory;
pub mod recommendations;

use crate::error::CalculatorError;
use crate::specs::{DeploymentMode, HardwareType, ModelSize, SpecTables};
use serde::{Deserialize, Serialize};

pub use compatibility::{is_hardware_compatible, PROBE_BATCH_SIZE, PROBE_TOKENS};
pub use cost::{
    api_cost_breakdown, cost_per_request_usd, hourly_operating_cost_usd, ApiCostBreakdown,
};
pub use latency::latency_seconds;
pub use memory::{memory_breakdown, memory_usage_gb, MemoryBreakdown};
pub use recommendations::generate_recommendations;

/// Request values as a caller supplies them, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub model: String,
    /// Input and output tokens combined
    pub tokens: i64,
    pub batch_size: i64,
    pub hardware: String,
    pub deployment: String,
}

impl CalculationInput {
    pub const DEFAULT_BATCH_SIZE: i64 = 1;
    pub const DEFAULT_HARDWARE: &'static str = "GPU_8GB";
    pub const DEFAULT_DEPLOYMENT: &'static str = "local";

    pub fn new(model: impl Into<String>, tokens: i64) -> Self {
        Self {
            model: model.into(),
            tokens,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            hardware: Self::DEFAULT_HARDWARE.to_string(),
            deployment: Self::DEFAULT_DEPLOYMENT.to_string(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_hardware(mut self, hardware: impl Into<String>) -> Self {
        self.hardware = hardware.into();
        self
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }
}

/// A validated request: known identifiers, positive counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculationRequest {
    model: ModelSize,
    tokens: u64,
    batch_size: u64,
    hardware: HardwareType,
    deployment: DeploymentMode,
}

impl CalculationRequest {
    pub fn new(
        model: ModelSize,
        tokens: u64,
        batch_size: u64,
        hardware: HardwareType,
        deployment: DeploymentMode,
    ) -> Result<Self, CalculatorError> {
        if tokens == 0 {
            return Err(CalculatorError::invalid("tokens", "must be positive, got 0"));
        }
        if batch_size == 0 {
            return Err(CalculatorError::invalid("batch_size", "must be positive, got 0"));
        }

        Ok(Self {
            model,
            tokens,
            batch_size,
            hardware,
            deployment,
        })
    }

    /// Validate raw input, checking identifiers before counts
    pub fn parse(input: &CalculationInput) -> Result<Self, CalculatorError> {
        let model: ModelSize = input.model.parse()?;
        let hardware: HardwareType = input.hardware.parse()?;
        let deployment: DeploymentMode = input.deployment.parse()?;
        let tokens = positive("tokens", input.tokens)?;
        let batch_size = positive("batch_size", input.batch_size)?;

        Self::new(model, tokens, batch_size, hardware, deployment)
    }

    pub fn model(&self) -> ModelSize {
        self.model
    }

    pub fn tokens(&self) -> u64 {
        self.tokens
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    pub fn hardware(&self) -> HardwareType {
        self.hardware
    }

    pub fn deployment(&self) -> DeploymentMode {
        self.deployment
    }
}

fn positive(argument: &'static str, value: i64) -> Result<u64, CalculatorError> {
    if value <= 0 {
        return Err(CalculatorError::invalid(
            argument,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(value as u64)
}

/// Estimates for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub latency_seconds: f64,
    /// Only meaningful for local deployment
    pub memory_usage_gb: f64,
    pub cost_per_request_usd: f64,
    /// Only meaningful for local deployment
    pub hardware_compatible: bool,
    pub recommendations: Vec<String>,
}

impl CalculationResult {
    pub fn cost_per_1k_tokens(&self, tokens: u64) -> f64 {
        if tokens == 0 {
            return 0.0;
        }
        self.cost_per_request_usd / tokens as f64 * 1000.0
    }
}

/// Estimator over a fixed set of specification tables
#[derive(Debug, Clone, Default)]
pub struct InferenceCalculator {
    tables: SpecTables,
}

impl InferenceCalculator {
    pub fn new(tables: SpecTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &SpecTables {
        &self.tables
    }

    /// Validate `input` and estimate latency, memory and cost for it
    ///
    /// Fails before any computation if a field is invalid; the error names
    /// the field.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, CalculatorError> {
        let request = CalculationRequest::parse(input)?;
        Ok(self.evaluate(&request))
    }

    /// Estimate an already validated request
    pub fn evaluate(&self, request: &CalculationRequest) -> CalculationResult {
        let model = request.model();
        let tokens = request.tokens();
        let batch_size = request.batch_size();
        let hardware = request.hardware();
        let deployment = request.deployment();

        let memory_usage_gb = memory_usage_gb(&self.tables, model, tokens, batch_size, hardware);
        let latency_seconds =
            latency_seconds(&self.tables, model, tokens, batch_size, hardware, deployment);
        let cost_per_request_usd =
            cost_per_request_usd(&self.tables, model, tokens, batch_size, hardware, deployment);
        let hardware_compatible = is_hardware_compatible(&self.tables, model, hardware);
        let recommendations = generate_recommendations(&self.tables, request);

        tracing::debug!(
            %model,
            tokens,
            batch_size,
            %hardware,
            %deployment,
            latency_seconds,
            memory_usage_gb,
            cost_per_request_usd,
            hardware_compatible,
            "calculated inference estimate"
        );

        CalculationResult {
            latency_seconds,
            memory_usage_gb,
            cost_per_request_usd,
            hardware_compatible,
            recommendations,
        }
    }

    pub fn memory_breakdown(&self, request: &CalculationRequest) -> MemoryBreakdown {
        memory_breakdown(
            &self.tables,
            request.model(),
            request.tokens(),
            request.batch_size(),
            request.hardware(),
        )
    }

    pub fn is_hardware_compatible(&self, model: ModelSize, hardware: HardwareType) -> bool {
        is_hardware_compatible(&self.tables, model, hardware)
    }

    pub fn api_cost_breakdown(&self, model: ModelSize, tokens: u64) -> ApiCostBreakdown {
        api_cost_breakdown(&self.tables, model, tokens)
    }
}
