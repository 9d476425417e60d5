//! Conversion input and result models.
//!
//! This module defines what the caller hands to the engine
//! ([`ConversionInput`], [`InsuranceBasis`]) and what comes back
//! ([`ConversionResult`], [`NetToGrossOutcome`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::format::round_vnd;

use super::Region;

/// Which salary figure mandatory insurance is computed on.
///
/// A custom base is resolved once by the caller and carried here as an
/// immutable amount, so the reverse solver never consults external state
/// between iterations.
///
/// # Example
///
/// ```
/// use vn_salary_engine::models::InsuranceBasis;
/// use rust_decimal::Decimal;
///
/// let gross = Decimal::from(20_000_000);
/// assert_eq!(InsuranceBasis::SameAsGross.resolve(gross), gross);
/// assert_eq!(
///     InsuranceBasis::Custom(Decimal::from(6_000_000)).resolve(gross),
///     Decimal::from(6_000_000)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "amount", rename_all = "snake_case")]
pub enum InsuranceBasis {
    /// Contributions are computed on the gross salary itself.
    #[default]
    SameAsGross,
    /// Contributions are computed on a fixed, separately declared salary.
    Custom(Decimal),
}

impl InsuranceBasis {
    /// Returns the insurance base to use for the given gross salary.
    pub fn resolve(&self, gross: Decimal) -> Decimal {
        match self {
            InsuranceBasis::SameAsGross => gross,
            InsuranceBasis::Custom(amount) => *amount,
        }
    }

    /// Returns true if contributions follow the gross salary.
    pub fn is_same_as_gross(&self) -> bool {
        matches!(self, InsuranceBasis::SameAsGross)
    }
}

/// The direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    /// The amount is a gross salary; compute the net.
    GrossToNet,
    /// The amount is a target net salary; solve for the gross.
    NetToGross,
}

/// Validated numeric input for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionInput {
    /// The gross salary or the target net salary, depending on direction.
    pub amount: Decimal,
    /// How the insurance base is determined.
    #[serde(default)]
    pub insurance_basis: InsuranceBasis,
    /// Number of registered dependents.
    #[serde(default)]
    pub dependents: u32,
    /// The statutory wage region.
    pub region: Region,
}

impl ConversionInput {
    /// Checks the caller contract: the amount and any custom insurance base
    /// must be strictly positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "amount",
                format!("must be greater than 0, got {}", self.amount),
            ));
        }
        if let InsuranceBasis::Custom(base) = self.insurance_basis {
            if base <= Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    "insurance_basis",
                    format!("custom insurance salary must be greater than 0, got {}", base),
                ));
            }
        }
        Ok(())
    }
}

/// The full breakdown of a gross/net conversion.
///
/// Invariants:
/// - `gross_salary = net_salary + mandatory_insurance + pit_amount`
/// - `mandatory_insurance = social_health_contribution + unemployment_contribution`
/// - `taxable_income = gross_salary - mandatory_insurance - total_deductions`
///
/// `taxable_income` may be negative; tax is computed on the clamped value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Take-home pay.
    pub net_salary: Decimal,
    /// Salary before insurance and tax.
    pub gross_salary: Decimal,
    /// Total employee insurance contribution.
    pub mandatory_insurance: Decimal,
    /// Social and health insurance contribution (9.5% of the capped base).
    pub social_health_contribution: Decimal,
    /// Unemployment insurance contribution (1% of the capped base).
    pub unemployment_contribution: Decimal,
    /// Personal plus dependent allowances.
    pub total_deductions: Decimal,
    /// Income subject to PIT before clamping at zero.
    pub taxable_income: Decimal,
    /// Personal income tax owed.
    pub pit_amount: Decimal,
    /// The insurance base before caps were applied.
    pub insurance_base_used: Decimal,
    /// The insurance base after the social/health cap.
    pub social_health_base: Decimal,
    /// The insurance base after the regional unemployment cap.
    pub unemployment_base: Decimal,
}

impl ConversionResult {
    /// Taxable income clamped at zero, as shown to users.
    pub fn taxable_income_for_display(&self) -> Decimal {
        self.taxable_income.max(Decimal::ZERO)
    }

    /// Rounds every component to whole đồng.
    ///
    /// Contributions, tax and the gross are rounded independently; net and
    /// taxable income are re-derived from the rounded parts so the invariants
    /// still hold exactly.
    ///
    /// # Example
    ///
    /// ```
    /// use vn_salary_engine::calculation::gross_to_net;
    /// use vn_salary_engine::config::PolicyTable;
    /// use vn_salary_engine::models::Region;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = PolicyTable::statutory();
    /// let gross = Decimal::from(12_345_679);
    /// let result = gross_to_net(&policy, gross, gross, 0, Region::One).unwrap();
    /// let whole = result.to_whole_dong();
    ///
    /// assert_eq!(whole.net_salary.scale(), 0);
    /// assert_eq!(
    ///     whole.gross_salary,
    ///     whole.net_salary + whole.mandatory_insurance + whole.pit_amount
    /// );
    /// ```
    pub fn to_whole_dong(&self) -> Self {
        let gross_salary = round_vnd(self.gross_salary);
        let social_health_contribution = round_vnd(self.social_health_contribution);
        let unemployment_contribution = round_vnd(self.unemployment_contribution);
        let mandatory_insurance = social_health_contribution + unemployment_contribution;
        let total_deductions = round_vnd(self.total_deductions);
        let pit_amount = round_vnd(self.pit_amount);

        Self {
            net_salary: gross_salary - mandatory_insurance - pit_amount,
            gross_salary,
            mandatory_insurance,
            social_health_contribution,
            unemployment_contribution,
            total_deductions,
            taxable_income: gross_salary - mandatory_insurance - total_deductions,
            pit_amount,
            insurance_base_used: round_vnd(self.insurance_base_used),
            social_health_base: round_vnd(self.social_health_base),
            unemployment_base: round_vnd(self.unemployment_base),
        }
    }
}

/// The outcome of solving net → gross.
///
/// Non-convergence is not an error: the best available approximation is
/// returned with `converged == false` so callers can warn the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetToGrossOutcome {
    /// The gross salary found by the solver.
    pub gross_salary: Decimal,
    /// The forward conversion of `gross_salary`.
    pub details: ConversionResult,
    /// Whether `details.net_salary` is within tolerance of the target.
    pub converged: bool,
    /// Number of forward evaluations inside the iteration loop.
    pub iterations: u32,
}
