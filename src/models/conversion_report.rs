//! Conversion report model.
//!
//! A [`ConversionReport`] wraps a pure engine result with identity, timing,
//! policy provenance and an audit trace. The engine functions themselves stay
//! side-effect free; only this envelope carries an id and a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, ConversionDirection, ConversionInput, ConversionResult};

/// Solver statistics for a net → gross conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverSummary {
    /// Whether the solver reached the tolerance.
    pub converged: bool,
    /// Number of iterations performed.
    pub iterations: u32,
}

/// The complete, serializable record of one conversion.
///
/// # Example
///
/// ```
/// use vn_salary_engine::calculation::convert_gross_to_net;
/// use vn_salary_engine::config::PolicyTable;
/// use vn_salary_engine::models::{ConversionInput, InsuranceBasis, Region};
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// let input = ConversionInput {
///     amount: Decimal::from(20_000_000),
///     insurance_basis: InsuranceBasis::SameAsGross,
///     dependents: 0,
///     region: Region::One,
/// };
/// let report = convert_gross_to_net(&policy, &input).unwrap();
/// assert_eq!(report.result.net_salary, Decimal::from(17_780_000));
/// assert!(report.solver.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Unique identifier for this conversion.
    pub calculation_id: Uuid,
    /// When the conversion was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the conversion.
    pub engine_version: String,
    /// Code of the policy table in force.
    pub policy_code: String,
    /// Version of the policy table in force.
    pub policy_version: String,
    /// Which way the conversion ran.
    pub direction: ConversionDirection,
    /// The input as supplied by the caller.
    pub input: ConversionInput,
    /// The full breakdown.
    pub result: ConversionResult,
    /// Solver statistics, present for net → gross only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub solver: Option<SolverSummary>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
