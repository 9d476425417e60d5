//! Family circumstance deductions.

use rust_decimal::Decimal;

use crate::config::PolicyTable;
use crate::models::AuditStep;

/// Legal reference recorded on deduction audit steps.
pub const DEDUCTIONS_REF: &str = "PIT Law Art. 19";

/// The result of calculating deductions, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// Personal allowance plus dependent allowances.
    pub total_deductions: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns `taxpayer_deduction + dependents x dependent_deduction`.
pub fn family_deductions(policy: &PolicyTable, dependents: u32) -> Decimal {
    policy.taxpayer_deduction() + Decimal::from(dependents) * policy.dependent_deduction()
}

/// Calculates family deductions and records an audit step.
pub fn calculate_deductions(
    policy: &PolicyTable,
    dependents: u32,
    step_number: u32,
) -> DeductionResult {
    let total_deductions = family_deductions(policy, dependents);

    let audit_step = AuditStep {
        step_number,
        rule_id: "family_deductions".to_string(),
        rule_name: "Family Circumstance Deductions".to_string(),
        legal_ref: DEDUCTIONS_REF.to_string(),
        input: serde_json::json!({
            "dependents": dependents,
            "taxpayer_deduction": policy.taxpayer_deduction().normalize().to_string(),
            "dependent_deduction": policy.dependent_deduction().normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} x {} = {}",
            policy.taxpayer_deduction().normalize(),
            dependents,
            policy.dependent_deduction().normalize(),
            total_deductions.normalize()
        ),
    };

    DeductionResult {
        total_deductions,
        audit_step,
    }
}
