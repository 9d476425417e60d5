//! Policy configuration for the salary conversion engine.
//!
//! This module provides the validated [`PolicyTable`] of statutory figures,
//! either built in ([`PolicyTable::statutory`]) or loaded from YAML files
//! through [`ConfigLoader`].
//!
//! # Example
//!
//! ```no_run
//! use vn_salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vn_2026").unwrap();
//! println!("Loaded policy: {}", config.table().metadata().name);
//! ```

mod loader;
mod statutory;
mod types;

pub use loader::ConfigLoader;
pub use statutory::{
    DEPENDENT_DEDUCTION, REGION_MIN_WAGES, SOCIAL_HEALTH_CAP, SOCIAL_HEALTH_RATE,
    STATUTORY_POLICY_CODE, TAXPAYER_DEDUCTION, UNEMPLOYMENT_CAP_MULTIPLIER, UNEMPLOYMENT_RATE,
};
pub use types::{
    DeductionConfig, InsuranceConfig, PolicyFile, PolicyMetadata, PolicyTable, TaxBracket,
    TaxBracketsConfig,
};
