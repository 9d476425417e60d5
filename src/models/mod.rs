//! Core data models for the salary conversion engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod conversion;
mod conversion_report;
mod region;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use conversion::{
    ConversionDirection, ConversionInput, ConversionResult, InsuranceBasis, NetToGrossOutcome,
};
pub use conversion_report::{ConversionReport, SolverSummary};
pub use region::Region;
