pub mod comparison;
pub mod report;

pub use comparison::{
    compare_scenarios, print_comparison, ComparisonRow, ComparisonScenario, COMPARISON_SCENARIOS,
    DEFAULT_COMPARISON_TOKENS,
};
pub use report::{
    api_scenario_config, enterprise_scenario_config, local_scenario_config, ApiScenario, ApiSummary,
    ComparativeAnalysis, ComparisonEntry, HardwareRun, LocalScenario, LocalSummary, Range,
    ScenarioConfig, ScenarioReport,
};
