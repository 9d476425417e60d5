//! Mandatory employee insurance contributions.
//!
//! This module provides functions for calculating the employee share of
//! social, health and unemployment insurance on a salary base, with the
//! social/health cap and the regional unemployment cap applied.

use rust_decimal::Decimal;

use crate::config::PolicyTable;
use crate::models::{AuditStep, Region};

/// Legal reference recorded on insurance audit steps.
pub const INSURANCE_REF: &str = "Social Insurance Law Art. 85; Employment Law Art. 57";

/// The employee contributions on one insurance base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceContributions {
    /// The base before any cap.
    pub insurance_base: Decimal,
    /// `min(insurance_base, social_health_cap)`.
    pub social_health_base: Decimal,
    /// Social and health contribution on the capped base.
    pub social_health_contribution: Decimal,
    /// `min(insurance_base, unemployment_cap(region))`.
    pub unemployment_base: Decimal,
    /// Unemployment contribution on the capped base.
    pub unemployment_contribution: Decimal,
    /// Sum of both contributions.
    pub mandatory_insurance: Decimal,
}

impl InsuranceContributions {
    /// Returns true if the social/health cap reduced the base.
    pub fn social_health_capped(&self) -> bool {
        self.social_health_base < self.insurance_base
    }

    /// Returns true if the regional unemployment cap reduced the base.
    pub fn unemployment_capped(&self) -> bool {
        self.unemployment_base < self.insurance_base
    }
}

/// The result of calculating insurance, including the audit step.
#[derive(Debug, Clone)]
pub struct InsuranceResult {
    /// The computed contributions.
    pub contributions: InsuranceContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the employee contributions on `insurance_base`.
///
/// # Examples
///
/// ```
/// use vn_salary_engine::calculation::compute_insurance;
/// use vn_salary_engine::config::PolicyTable;
/// use vn_salary_engine::models::Region;
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// let ins = compute_insurance(&policy, Decimal::from(20_000_000), Region::One);
///
/// assert_eq!(ins.social_health_contribution, Decimal::from(1_900_000));
/// assert_eq!(ins.unemployment_contribution, Decimal::from(200_000));
/// assert_eq!(ins.mandatory_insurance, Decimal::from(2_100_000));
/// ```
pub fn compute_insurance(
    policy: &PolicyTable,
    insurance_base: Decimal,
    region: Region,
) -> InsuranceContributions {
    let social_health_base = insurance_base.min(policy.social_health_cap());
    let unemployment_base = insurance_base.min(policy.unemployment_cap(region));

    let social_health_contribution = social_health_base * policy.social_health_rate();
    let unemployment_contribution = unemployment_base * policy.unemployment_rate();

    InsuranceContributions {
        insurance_base,
        social_health_base,
        social_health_contribution,
        unemployment_base,
        unemployment_contribution,
        mandatory_insurance: social_health_contribution + unemployment_contribution,
    }
}

/// Calculates insurance contributions and records an audit step.
///
/// # Arguments
///
/// * `policy` - The policy table supplying rates and caps
/// * `insurance_base` - The salary contributions are computed on
/// * `region` - The wage region selecting the unemployment cap
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_insurance(
    policy: &PolicyTable,
    insurance_base: Decimal,
    region: Region,
    step_number: u32,
) -> InsuranceResult {
    let contributions = compute_insurance(policy, insurance_base, region);

    let audit_step = AuditStep {
        step_number,
        rule_id: "mandatory_insurance".to_string(),
        rule_name: "Mandatory Employee Insurance".to_string(),
        legal_ref: INSURANCE_REF.to_string(),
        input: serde_json::json!({
            "insurance_base": insurance_base.normalize().to_string(),
            "region": region.code(),
            "social_health_cap": policy.social_health_cap().normalize().to_string(),
            "unemployment_cap": policy.unemployment_cap(region).normalize().to_string()
        }),
        output: serde_json::json!({
            "social_health_base": contributions.social_health_base.normalize().to_string(),
            "social_health_contribution": contributions.social_health_contribution.normalize().to_string(),
            "unemployment_base": contributions.unemployment_base.normalize().to_string(),
            "unemployment_contribution": contributions.unemployment_contribution.normalize().to_string(),
            "mandatory_insurance": contributions.mandatory_insurance.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} + {} x {} = {}",
            contributions.social_health_base.normalize(),
            policy.social_health_rate().normalize(),
            contributions.unemployment_base.normalize(),
            policy.unemployment_rate().normalize(),
            contributions.mandatory_insurance.normalize()
        ),
    };

    InsuranceResult {
        contributions,
        audit_step,
    }
}
