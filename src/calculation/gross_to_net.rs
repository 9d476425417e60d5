//! Forward conversion from a gross salary to take-home pay.

use rust_decimal::Decimal;

use crate::config::PolicyTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{ConversionResult, Region};

use super::deductions::family_deductions;
use super::income_tax::compute_tax;
use super::insurance::compute_insurance;

/// Computes the full breakdown for a gross salary.
///
/// The steps are:
/// 1. Contributions on `insurance_base` with both caps applied
/// 2. `total_deductions = taxpayer + dependents x dependent`
/// 3. `taxable_income = gross - mandatory_insurance - total_deductions`
/// 4. Tax on the taxable income (zero when not positive)
/// 5. `net = gross - mandatory_insurance - pit`
///
/// Amounts are exact; see [`ConversionResult::to_whole_dong`] for display
/// rounding.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `gross` or `insurance_base` is
/// negative.
///
/// # Examples
///
/// ```
/// use vn_salary_engine::calculation::gross_to_net;
/// use vn_salary_engine::config::PolicyTable;
/// use vn_salary_engine::models::Region;
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// let gross = Decimal::from(20_000_000);
/// let result = gross_to_net(&policy, gross, gross, 0, Region::One).unwrap();
///
/// assert_eq!(result.mandatory_insurance, Decimal::from(2_100_000));
/// assert_eq!(result.taxable_income, Decimal::from(2_400_000));
/// assert_eq!(result.pit_amount, Decimal::from(120_000));
/// assert_eq!(result.net_salary, Decimal::from(17_780_000));
/// ```
pub fn gross_to_net(
    policy: &PolicyTable,
    gross: Decimal,
    insurance_base: Decimal,
    dependents: u32,
    region: Region,
) -> EngineResult<ConversionResult> {
    if gross < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "gross",
            format!("must not be negative, got {}", gross),
        ));
    }
    if insurance_base < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "insurance_base",
            format!("must not be negative, got {}", insurance_base),
        ));
    }

    let insurance = compute_insurance(policy, insurance_base, region);
    let total_deductions = family_deductions(policy, dependents);
    let taxable_income = gross - insurance.mandatory_insurance - total_deductions;
    let pit_amount = compute_tax(policy, taxable_income);

    Ok(ConversionResult {
        net_salary: gross - insurance.mandatory_insurance - pit_amount,
        gross_salary: gross,
        mandatory_insurance: insurance.mandatory_insurance,
        social_health_contribution: insurance.social_health_contribution,
        unemployment_contribution: insurance.unemployment_contribution,
        total_deductions,
        taxable_income,
        pit_amount,
        insurance_base_used: insurance_base,
        social_health_base: insurance.social_health_base,
        unemployment_base: insurance.unemployment_base,
    })
}
