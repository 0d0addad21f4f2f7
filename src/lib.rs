//! LLM Inference Calculator
//!
//! Estimates latency, memory footprint and per-request cost of running an
//! LLM inference request, either self-hosted on a hardware class or through
//! a hosted API. Every figure comes from static specification tables and
//! closed-form formulas; nothing is measured.
//!
//! ## Main Components
//!
//! - `specs`: Model, hardware, pricing and throughput tables
//! - `calculator`: Memory, latency, cost, compatibility and recommendations
//! - `config`: Request defaults and custom table selection
//! - `scenarios`: Scenario comparison and deployment reports
//!
//! ## Example
//!
//! ```
//! use inference_calc_rs::{CalculationInput, InferenceCalculator};
//!
//! let calculator = InferenceCalculator::default();
//! let input = CalculationInput::new("13B", 500).with_deployment("api");
//! let result = calculator.calculate(&input).unwrap();
//! assert_eq!(result.latency_seconds, 12.0);
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod scenarios;
pub mod specs;

pub use calculator::{CalculationInput, CalculationRequest, CalculationResult, InferenceCalculator};
pub use config::Config;
pub use error::CalculatorError;
pub use specs::{DeploymentMode, HardwareType, ModelSize, SpecTables};

/// Application-level errors
pub use anyhow::{Error, Result};
