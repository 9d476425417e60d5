//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a policy table
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{InsuranceConfig, PolicyFile, PolicyTable, TaxBracketsConfig};

/// Loads and provides access to a policy table.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/vn_2026/
/// ├── policy.yaml        # Metadata and personal deductions
/// ├── insurance.yaml     # Contribution rates, caps and regional minimum wages
/// └── tax_brackets.yaml  # Progressive PIT schedule
/// ```
///
/// # Example
///
/// ```no_run
/// use vn_salary_engine::config::ConfigLoader;
/// use vn_salary_engine::models::Region;
///
/// let loader = ConfigLoader::load("./config/vn_2026").unwrap();
/// println!("Unemployment cap, region I: {}", loader.table().unemployment_cap(Region::One));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: PolicyTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The assembled table is inconsistent (`InvalidPolicy`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let insurance = Self::load_yaml::<InsuranceConfig>(&path.join("insurance.yaml"))?;
        let brackets = Self::load_yaml::<TaxBracketsConfig>(&path.join("tax_brackets.yaml"))?;

        let table = PolicyTable::new(
            policy.metadata,
            policy.deductions,
            insurance,
            brackets.brackets,
        )?;

        debug!(
            path = %path.display(),
            policy_code = %table.metadata().code,
            policy_version = %table.metadata().version,
            "Loaded policy table"
        );

        Ok(Self { table })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy table.
    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Consumes the loader and returns the policy table.
    pub fn into_table(self) -> PolicyTable {
        self.table
    }
}
