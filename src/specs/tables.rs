//! Specification tables consumed by the calculator
//!
//! The built-in tables are complete by construction: every lookup is an
//! exhaustive match per variant. Tables loaded from JSON are checked for
//! completeness and value invariants before they can be used.

use super::hardware::{builtin_hardware_specs, builtin_throughput, HardwareSpecs};
use super::models::{builtin_api_pricing, builtin_model_specs, ApiPricing, ModelSpecs};
use super::{HardwareType, ModelSize};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Canonical tables, built once per process
pub static BUILTIN_TABLES: Lazy<SpecTables> = Lazy::new(SpecTables::builtin);

#[derive(Error, Debug)]
pub enum TableError {
    #[error("{table} table has no entry for {key}")]
    MissingEntry { table: &'static str, key: String },

    #[error("{table} entry {key} has invalid {field}: {reason}")]
    InvalidEntry {
        table: &'static str,
        key: String,
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to access tables file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tables file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to serialize tables: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Read-only lookup tables for models, hardware, pricing and throughput
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TablesFile", into = "TablesFile")]
pub struct SpecTables {
    models: [ModelSpecs; ModelSize::COUNT],
    hardware: [HardwareSpecs; HardwareType::COUNT],
    api_pricing: [ApiPricing; ModelSize::COUNT],
    throughput: [[f64; HardwareType::COUNT]; ModelSize::COUNT],
}

/// On-disk layout, keyed by identifier strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesFile {
    models: BTreeMap<ModelSize, ModelSpecs>,
    hardware: BTreeMap<HardwareType, HardwareSpecs>,
    api_pricing: BTreeMap<ModelSize, ApiPricing>,
    performance_baselines: BTreeMap<ModelSize, BTreeMap<HardwareType, f64>>,
}

impl SpecTables {
    pub fn builtin() -> Self {
        Self {
            models: ModelSize::ALL.map(builtin_model_specs),
            hardware: HardwareType::ALL.map(builtin_hardware_specs),
            api_pricing: ModelSize::ALL.map(builtin_api_pricing),
            throughput: ModelSize::ALL
                .map(|model| HardwareType::ALL.map(|hardware| builtin_throughput(model, hardware))),
        }
    }

    pub fn model(&self, model: ModelSize) -> &ModelSpecs {
        &self.models[model.index()]
    }

    pub fn hardware(&self, hardware: HardwareType) -> &HardwareSpecs {
        &self.hardware[hardware.index()]
    }

    pub fn api_pricing(&self, model: ModelSize) -> &ApiPricing {
        &self.api_pricing[model.index()]
    }

    /// Tokens per second for local inference
    pub fn throughput(&self, model: ModelSize, hardware: HardwareType) -> f64 {
        self.throughput[model.index()][hardware.index()]
    }

    /// Check every value invariant the formulas rely on
    pub fn validate(&self) -> Result<(), TableError> {
        for model in ModelSize::ALL {
            if let Some(field) = self.model(model).zero_field() {
                return Err(invalid("models", model.to_string(), field, "must be positive"));
            }

            let pricing = self.api_pricing(model);
            for (field, price) in [
                ("input_per_1k", pricing.input_per_1k),
                ("output_per_1k", pricing.output_per_1k),
            ] {
                if !price.is_finite() || price < 0.0 {
                    return Err(invalid(
                        "api_pricing",
                        model.to_string(),
                        field,
                        "must be a non-negative number",
                    ));
                }
            }

            for hardware in HardwareType::ALL {
                let tps = self.throughput(model, hardware);
                if !tps.is_finite() || tps <= 0.0 {
                    return Err(invalid(
                        "performance_baselines",
                        format!("{}/{}", model, hardware),
                        "tokens_per_second",
                        "must be positive",
                    ));
                }
            }
        }

        for hardware in HardwareType::ALL {
            if let Some(field) = self.hardware(hardware).invalid_field() {
                return Err(invalid(
                    "hardware",
                    hardware.to_string(),
                    field,
                    "must be a non-negative number",
                ));
            }
        }

        Ok(())
    }

    /// Load and validate tables from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TablesFile = serde_json::from_str(&json)?;
        let tables = Self::try_from(file)?;
        tracing::info!(path = %path.display(), "loaded specification tables");
        Ok(tables)
    }

    /// Save tables to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        serde_json::to_string_pretty(&TablesFile::from(self.clone())).map_err(TableError::Serialize)
    }
}

impl Default for SpecTables {
    fn default() -> Self {
        BUILTIN_TABLES.clone()
    }
}

fn invalid(
    table: &'static str,
    key: String,
    field: &'static str,
    reason: &'static str,
) -> TableError {
    TableError::InvalidEntry {
        table,
        key,
        field,
        reason,
    }
}

/// Pull one value per key out of `map`, failing on the first absent key
fn entries<K, V, const N: usize>(
    table: &'static str,
    keys: [K; N],
    map: &BTreeMap<K, V>,
    label: impl Fn(K) -> String,
) -> Result<[V; N], TableError>
where
    K: Ord + Copy,
    V: Copy + Default,
{
    let mut missing = None;
    let values = keys.map(|key| match map.get(&key) {
        Some(value) => *value,
        None => {
            if missing.is_none() {
                missing = Some(key);
            }
            V::default()
        }
    });

    match missing {
        Some(key) => Err(TableError::MissingEntry {
            table,
            key: label(key),
        }),
        None => Ok(values),
    }
}

impl TryFrom<TablesFile> for SpecTables {
    type Error = TableError;

    fn try_from(file: TablesFile) -> Result<Self, Self::Error> {
        let models = entries("models", ModelSize::ALL, &file.models, |m| m.to_string())?;
        let hardware = entries("hardware", HardwareType::ALL, &file.hardware, |h| h.to_string())?;
        let api_pricing =
            entries("api_pricing", ModelSize::ALL, &file.api_pricing, |m| m.to_string())?;

        let mut throughput = [[0.0; HardwareType::COUNT]; ModelSize::COUNT];
        for model in ModelSize::ALL {
            let row = file
                .performance_baselines
                .get(&model)
                .ok_or_else(|| TableError::MissingEntry {
                    table: "performance_baselines",
                    key: model.to_string(),
                })?;
            throughput[model.index()] =
                entries("performance_baselines", HardwareType::ALL, row, |h| {
                    format!("{}/{}", model, h)
                })?;
        }

        let tables = Self {
            models,
            hardware,
            api_pricing,
            throughput,
        };
        tables.validate()?;
        Ok(tables)
    }
}

impl From<SpecTables> for TablesFile {
    fn from(tables: SpecTables) -> Self {
        Self {
            models: ModelSize::ALL
                .into_iter()
                .map(|m| (m, *tables.model(m)))
                .collect(),
            hardware: HardwareType::ALL
                .into_iter()
                .map(|h| (h, *tables.hardware(h)))
                .collect(),
            api_pricing: ModelSize::ALL
                .into_iter()
                .map(|m| (m, *tables.api_pricing(m)))
                .collect(),
            performance_baselines: ModelSize::ALL
                .into_iter()
                .map(|m| {
                    let row = HardwareType::ALL
                        .into_iter()
                        .map(|h| (h, tables.throughput(m, h)))
                        .collect();
                    (m, row)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_validate() {
        assert!(SpecTables::builtin().validate().is_ok());
    }

    #[test]
    fn test_builtin_values() {
        let tables = SpecTables::builtin();
        assert_eq!(tables.model(ModelSize::ThirteenB).context_length, 4096);
        assert_eq!(tables.hardware(HardwareType::Gpu24Gb).compute_flops, 8.3e13);
        assert_eq!(tables.api_pricing(ModelSize::Gpt4).output_per_1k, 0.03);
        assert_eq!(tables.throughput(ModelSize::SevenB, HardwareType::Gpu4Gb), 8.0);
    }

    #[test]
    fn test_json_keys_use_identifiers() {
        let json = SpecTables::builtin().to_json().unwrap();
        assert!(json.contains("\"GPU_16GB\""));
        assert!(json.contains("\"GPT-4\""));
        assert!(json.contains("\"performance_baselines\""));
    }

    #[test]
    fn test_missing_baseline_is_rejected() {
        let mut file = TablesFile::from(SpecTables::builtin());
        file.performance_baselines
            .get_mut(&ModelSize::ThirteenB)
            .unwrap()
            .remove(&HardwareType::Gpu12Gb);

        match SpecTables::try_from(file) {
            Err(TableError::MissingEntry { table, key }) => {
                assert_eq!(table, "performance_baselines");
                assert_eq!(key, "13B/GPU_12GB");
            }
            other => panic!("expected missing entry, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_model_is_rejected() {
        let mut file = TablesFile::from(SpecTables::builtin());
        file.models.remove(&ModelSize::Gpt4);
        let err = SpecTables::try_from(file).unwrap_err();
        assert_eq!(err.to_string(), "models table has no entry for GPT-4");
    }

    #[test]
    fn test_zero_throughput_is_rejected() {
        let mut file = TablesFile::from(SpecTables::builtin());
        file.performance_baselines
            .get_mut(&ModelSize::Gpt4)
            .unwrap()
            .insert(HardwareType::Cpu, 0.0);
        assert!(matches!(
            SpecTables::try_from(file),
            Err(TableError::InvalidEntry {
                table: "performance_baselines",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut file = TablesFile::from(SpecTables::builtin());
        file.api_pricing.insert(
            ModelSize::ThirteenB,
            ApiPricing {
                input_per_1k: -0.1,
                output_per_1k: 0.0004,
            },
        );
        let err = SpecTables::try_from(file).unwrap_err();
        assert!(err.to_string().contains("input_per_1k"), "{}", err);
    }

    #[test]
    fn test_json_errors_name_their_direction() {
        let parse = serde_json::from_str::<TablesFile>("{").unwrap_err();
        assert!(TableError::from(parse).to_string().starts_with("malformed tables file"));

        // serde_json refuses non-string map keys when writing
        let keys = BTreeMap::from([((1u8, 2u8), 0u8)]);
        let serialize = serde_json::to_string(&keys).unwrap_err();
        let err = TableError::Serialize(serialize);
        assert!(err.to_string().starts_with("failed to serialize tables"), "{}", err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
