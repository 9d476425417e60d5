//! Report-producing conversions.
//!
//! These functions validate a [`ConversionInput`], run the engine and wrap
//! the result in a [`ConversionReport`] with an audit trace explaining every
//! figure.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PolicyTable;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ConversionDirection, ConversionInput, ConversionReport,
    ConversionResult, NetToGrossOutcome, SolverSummary,
};

use super::deductions::calculate_deductions;
use super::gross_to_net::gross_to_net;
use super::income_tax::{PIT_SCHEDULE_REF, calculate_income_tax};
use super::insurance::calculate_insurance;
use super::net_to_gross::{CONVERGENCE_TOLERANCE, net_to_gross};

/// Warning code raised when the solver hit its iteration limit.
pub const SOLVER_NOT_CONVERGED: &str = "SOLVER_NOT_CONVERGED";

/// Warning code raised when the social/health cap reduced the base.
pub const SOCIAL_HEALTH_BASE_CAPPED: &str = "SOCIAL_HEALTH_BASE_CAPPED";

/// Warning code raised when the regional unemployment cap reduced the base.
pub const UNEMPLOYMENT_BASE_CAPPED: &str = "UNEMPLOYMENT_BASE_CAPPED";

/// Warning code raised when deductions exceed income and no tax is owed.
pub const NO_TAXABLE_INCOME: &str = "NO_TAXABLE_INCOME";

/// Runs a conversion in the given direction and returns a full report.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidInput`] if the amount or a
/// custom insurance base is not strictly positive.
pub fn convert(
    policy: &PolicyTable,
    direction: ConversionDirection,
    input: &ConversionInput,
) -> EngineResult<ConversionReport> {
    let calculation_id = Uuid::new_v4();
    let start_time = Instant::now();

    if let Err(err) = input.validate() {
        warn!(
            calculation_id = %calculation_id,
            error = %err,
            "Conversion input rejected"
        );
        return Err(err);
    }

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let (result, solver) = match direction {
        ConversionDirection::GrossToNet => {
            let base = input.insurance_basis.resolve(input.amount);
            let result = gross_to_net(policy, input.amount, base, input.dependents, input.region)?;
            (result, None)
        }
        ConversionDirection::NetToGross => {
            let outcome = net_to_gross(
                policy,
                input.amount,
                input.insurance_basis,
                input.dependents,
                input.region,
            )?;

            steps.push(solver_step(input.amount, &outcome, step_number));
            step_number += 1;

            if !outcome.converged {
                warnings.push(AuditWarning::new(
                    SOLVER_NOT_CONVERGED,
                    format!(
                        "Gross {} gives net {}, more than {} from the target {} after {} iterations",
                        outcome.gross_salary.normalize(),
                        outcome.details.net_salary.normalize(),
                        CONVERGENCE_TOLERANCE,
                        input.amount.normalize(),
                        outcome.iterations
                    ),
                    "high",
                ));
            }

            let summary = SolverSummary {
                converged: outcome.converged,
                iterations: outcome.iterations,
            };
            (outcome.details, Some(summary))
        }
    };

    let explained = explain(policy, input, &result, step_number);
    steps.extend(explained.steps);
    warnings.extend(explained.warnings);

    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        calculation_id = %calculation_id,
        direction = ?direction,
        region = %input.region,
        dependents = input.dependents,
        gross_salary = %result.gross_salary,
        net_salary = %result.net_salary,
        warnings = warnings.len(),
        duration_us,
        "Conversion completed"
    );

    Ok(ConversionReport {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        policy_code: policy.metadata().code.clone(),
        policy_version: policy.metadata().version.clone(),
        direction,
        input: input.clone(),
        result,
        solver,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// Converts a gross salary to net and returns a full report.
pub fn convert_gross_to_net(
    policy: &PolicyTable,
    input: &ConversionInput,
) -> EngineResult<ConversionReport> {
    convert(policy, ConversionDirection::GrossToNet, input)
}

/// Solves for the gross salary behind a target net and returns a full report.
///
/// # Example
///
/// ```
/// use vn_salary_engine::calculation::convert_net_to_gross;
/// use vn_salary_engine::config::PolicyTable;
/// use vn_salary_engine::models::{ConversionInput, InsuranceBasis, Region};
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// let input = ConversionInput {
///     amount: Decimal::from(17_780_000),
///     insurance_basis: InsuranceBasis::SameAsGross,
///     dependents: 0,
///     region: Region::One,
/// };
/// let report = convert_net_to_gross(&policy, &input).unwrap();
///
/// assert!(report.solver.unwrap().converged);
/// assert_eq!(report.result.to_whole_dong().gross_salary, Decimal::from(20_000_000));
/// ```
pub fn convert_net_to_gross(
    policy: &PolicyTable,
    input: &ConversionInput,
) -> EngineResult<ConversionReport> {
    convert(policy, ConversionDirection::NetToGross, input)
}

struct Explanation {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

/// Re-derives each figure of `result` as an audit step.
fn explain(
    policy: &PolicyTable,
    input: &ConversionInput,
    result: &ConversionResult,
    first_step: u32,
) -> Explanation {
    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number = first_step;

    let insurance = calculate_insurance(policy, result.insurance_base_used, input.region, step_number);
    steps.push(insurance.audit_step);
    step_number += 1;

    if insurance.contributions.social_health_capped() {
        warnings.push(AuditWarning::new(
            SOCIAL_HEALTH_BASE_CAPPED,
            format!(
                "Insurance base {} exceeds the social/health cap {}",
                result.insurance_base_used.normalize(),
                policy.social_health_cap().normalize()
            ),
            "low",
        ));
    }
    if insurance.contributions.unemployment_capped() {
        warnings.push(AuditWarning::new(
            UNEMPLOYMENT_BASE_CAPPED,
            format!(
                "Insurance base {} exceeds the region {} unemployment cap {}",
                result.insurance_base_used.normalize(),
                input.region,
                policy.unemployment_cap(input.region).normalize()
            ),
            "low",
        ));
    }

    let deductions = calculate_deductions(policy, input.dependents, step_number);
    steps.push(deductions.audit_step);
    step_number += 1;

    steps.push(taxable_income_step(result, step_number));
    step_number += 1;

    if result.taxable_income <= Decimal::ZERO {
        warnings.push(AuditWarning::new(
            NO_TAXABLE_INCOME,
            format!(
                "Deductions of {} leave no taxable income",
                result.total_deductions.normalize()
            ),
            "low",
        ));
    }

    let tax = calculate_income_tax(policy, result.taxable_income, step_number);
    steps.push(tax.audit_step);
    step_number += 1;

    steps.push(net_salary_step(result, step_number));

    Explanation { steps, warnings }
}

fn taxable_income_step(result: &ConversionResult, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        legal_ref: "PIT Law Art. 10".to_string(),
        input: serde_json::json!({
            "gross_salary": result.gross_salary.normalize().to_string(),
            "mandatory_insurance": result.mandatory_insurance.normalize().to_string(),
            "total_deductions": result.total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": result.taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} - {} = {}",
            result.gross_salary.normalize(),
            result.mandatory_insurance.normalize(),
            result.total_deductions.normalize(),
            result.taxable_income.normalize()
        ),
    }
}

fn net_salary_step(result: &ConversionResult, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        legal_ref: PIT_SCHEDULE_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": result.gross_salary.normalize().to_string(),
            "mandatory_insurance": result.mandatory_insurance.normalize().to_string(),
            "pit_amount": result.pit_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_salary": result.net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} - {} = {}",
            result.gross_salary.normalize(),
            result.mandatory_insurance.normalize(),
            result.pit_amount.normalize(),
            result.net_salary.normalize()
        ),
    }
}

fn solver_step(target_net: Decimal, outcome: &NetToGrossOutcome, step_number: u32) -> AuditStep {
    let reasoning = if outcome.converged {
        format!(
            "Gross {} reaches net {} within {} after {} iterations",
            outcome.gross_salary.normalize(),
            outcome.details.net_salary.normalize(),
            CONVERGENCE_TOLERANCE,
            outcome.iterations
        )
    } else {
        format!(
            "Stopped after {} iterations at gross {} with net {}",
            outcome.iterations,
            outcome.gross_salary.normalize(),
            outcome.details.net_salary.normalize()
        )
    };

    AuditStep {
        step_number,
        rule_id: "net_to_gross_solver".to_string(),
        rule_name: "Net to Gross Solver".to_string(),
        legal_ref: PIT_SCHEDULE_REF.to_string(),
        input: serde_json::json!({
            "target_net": target_net.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_salary": outcome.gross_salary.normalize().to_string(),
            "converged": outcome.converged,
            "iterations": outcome.iterations
        }),
        reasoning,
    }
}
