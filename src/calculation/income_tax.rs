//! Progressive personal income tax.
//!
//! This module computes PIT on monthly taxable income using the bracket
//! schedule of the policy table (Law on Personal Income Tax, Art. 22).

use rust_decimal::Decimal;

use crate::config::{PolicyTable, TaxBracket};
use crate::models::AuditStep;

/// Marginal rate assumed when no bracket covers an income.
///
/// A validated schedule always ends with an unbounded band, so this only
/// matters for hand-built tables.
pub const FALLBACK_MARGINAL_RATE: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

/// Legal reference recorded on income tax audit steps.
pub const PIT_SCHEDULE_REF: &str = "PIT Law Art. 22";

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Tax owed.
    pub pit_amount: Decimal,
    /// Index of the band the income fell in, if it was positive.
    pub bracket_index: Option<usize>,
    /// Marginal rate of that band (zero when no tax is owed).
    pub marginal_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn find_bracket(policy: &PolicyTable, income: Decimal) -> Option<(usize, &TaxBracket)> {
    policy
        .pit_brackets()
        .iter()
        .enumerate()
        .find(|(_, bracket)| bracket.covers(income))
}

/// Computes the tax owed on a taxable income.
///
/// Non-positive income owes nothing. Otherwise the first band whose upper
/// limit is at or above the income is used:
/// `cumulative_tax_below + (income - lower_limit) x rate`.
///
/// # Examples
///
/// ```
/// use vn_salary_engine::calculation::compute_tax;
/// use vn_salary_engine::config::PolicyTable;
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// assert_eq!(compute_tax(&policy, Decimal::from(2_400_000)), Decimal::from(120_000));
/// assert_eq!(compute_tax(&policy, Decimal::from(45_000_000)), Decimal::from(5_500_000));
/// assert_eq!(compute_tax(&policy, Decimal::from(-1)), Decimal::ZERO);
/// ```
pub fn compute_tax(policy: &PolicyTable, taxable_income: Decimal) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match find_bracket(policy, taxable_income) {
        Some((index, bracket)) => {
            let lower = policy.bracket_lower_limit(index);
            bracket.cumulative_tax_below + (taxable_income - lower) * bracket.rate
        }
        None => Decimal::ZERO,
    }
}

/// Returns the marginal rate of the first band whose limit is at or above
/// `taxable_income`.
///
/// The value is not clamped, so a negative income reports the lowest band's
/// rate. Used as the derivative estimate by the net → gross solver.
pub fn marginal_rate(policy: &PolicyTable, taxable_income: Decimal) -> Decimal {
    find_bracket(policy, taxable_income)
        .map(|(_, bracket)| bracket.rate)
        .unwrap_or(FALLBACK_MARGINAL_RATE)
}

/// Calculates income tax and records an audit step.
pub fn calculate_income_tax(
    policy: &PolicyTable,
    taxable_income: Decimal,
    step_number: u32,
) -> IncomeTaxResult {
    let pit_amount = compute_tax(policy, taxable_income);

    let (bracket_index, marginal, reasoning) = if taxable_income <= Decimal::ZERO {
        (
            None,
            Decimal::ZERO,
            format!(
                "Taxable income {} is not positive, no tax owed",
                taxable_income.normalize()
            ),
        )
    } else {
        match find_bracket(policy, taxable_income) {
            Some((index, bracket)) => {
                let lower = policy.bracket_lower_limit(index);
                (
                    Some(index),
                    bracket.rate,
                    format!(
                        "Band {}: {} + ({} - {}) x {} = {}",
                        index + 1,
                        bracket.cumulative_tax_below.normalize(),
                        taxable_income.normalize(),
                        lower.normalize(),
                        bracket.rate.normalize(),
                        pit_amount.normalize()
                    ),
                )
            }
            None => (
                None,
                Decimal::ZERO,
                "No tax band covers this income".to_string(),
            ),
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "progressive_income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        legal_ref: PIT_SCHEDULE_REF.to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "pit_amount": pit_amount.normalize().to_string(),
            "band": bracket_index.map(|i| i + 1),
            "marginal_rate": marginal.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        pit_amount,
        bracket_index,
        marginal_rate: marginal,
        audit_step,
    }
}
