//! Configuration types for the salary conversion policy.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML files, and the validated [`PolicyTable`] the engine
//! reads from.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Region;

/// Metadata identifying a policy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Short code for the table (e.g., "VN-PIT-2026").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The version or effective date of the table.
    pub version: String,
}

/// Fixed personal allowances deducted before tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    /// Allowance for the taxpayer themself.
    pub taxpayer: Decimal,
    /// Allowance per registered dependent.
    pub dependent: Decimal,
}

/// Contents of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Table metadata.
    #[serde(flatten)]
    pub metadata: PolicyMetadata,
    /// Personal allowances.
    pub deductions: DeductionConfig,
}

/// Contents of `insurance.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InsuranceConfig {
    /// Employee social plus health insurance rate.
    pub social_health_rate: Decimal,
    /// Employee unemployment insurance rate.
    pub unemployment_rate: Decimal,
    /// Ceiling on the base subject to social/health contributions.
    pub social_health_cap: Decimal,
    /// Multiple of the regional minimum wage capping the unemployment base.
    pub unemployment_cap_multiplier: Decimal,
    /// Regional minimum wage keyed by region code (1-4).
    pub region_min_wages: BTreeMap<u8, Decimal>,
}

/// One band of the progressive income tax schedule.
///
/// `upper_limit` is `None` for the open-ended top band.
/// `cumulative_tax_below` is the tax owed on income exactly at this band's
/// lower boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper limit of the band, or `None` for unbounded.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// Marginal rate applied inside the band.
    pub rate: Decimal,
    /// Tax owed on all lower bands combined.
    pub cumulative_tax_below: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` does not exceed this band's upper limit.
    pub fn covers(&self, income: Decimal) -> bool {
        self.upper_limit.is_none_or(|limit| income <= limit)
    }
}

/// Contents of `tax_brackets.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketsConfig {
    /// Bands in ascending order.
    pub brackets: Vec<TaxBracket>,
}

/// The immutable set of statutory figures the engine computes with.
///
/// Derived values (the combined insurance rate and the per-region
/// unemployment caps) are computed once on construction. A `PolicyTable` is
/// never mutated afterwards and can be shared freely between threads.
///
/// # Example
///
/// ```
/// use vn_salary_engine::config::PolicyTable;
/// use vn_salary_engine::models::Region;
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// assert_eq!(policy.unemployment_cap(Region::One), Decimal::from(106_200_000));
/// assert_eq!(policy.pit_brackets().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    metadata: PolicyMetadata,
    social_health_rate: Decimal,
    unemployment_rate: Decimal,
    insurance_rate: Decimal,
    taxpayer_deduction: Decimal,
    dependent_deduction: Decimal,
    social_health_cap: Decimal,
    region_min_wages: [Decimal; 4],
    unemployment_caps: [Decimal; 4],
    pit_brackets: Vec<TaxBracket>,
}

impl PolicyTable {
    /// Builds a validated policy table from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPolicy`] if a rate is out of range, an
    /// amount is negative, a region is missing or unknown, or the tax brackets
    /// are not strictly increasing with consistent cumulative tax.
    pub fn new(
        metadata: PolicyMetadata,
        deductions: DeductionConfig,
        insurance: InsuranceConfig,
        pit_brackets: Vec<TaxBracket>,
    ) -> EngineResult<Self> {
        validate_rate("social_health_rate", insurance.social_health_rate)?;
        validate_rate("unemployment_rate", insurance.unemployment_rate)?;
        validate_non_negative("deductions.taxpayer", deductions.taxpayer)?;
        validate_non_negative("deductions.dependent", deductions.dependent)?;
        validate_non_negative("social_health_cap", insurance.social_health_cap)?;
        validate_non_negative(
            "unemployment_cap_multiplier",
            insurance.unemployment_cap_multiplier,
        )?;

        let region_min_wages = region_wages(&insurance.region_min_wages)?;
        validate_brackets(&pit_brackets)?;

        let table = Self::assemble(
            metadata,
            deductions,
            insurance.social_health_rate,
            insurance.unemployment_rate,
            insurance.social_health_cap,
            insurance.unemployment_cap_multiplier,
            region_min_wages,
            pit_brackets,
        );

        if table.max_bracket_rate() + table.insurance_rate >= Decimal::ONE {
            return Err(EngineError::invalid_policy(format!(
                "top tax rate {} plus insurance rate {} must stay below 1",
                table.max_bracket_rate(),
                table.insurance_rate
            )));
        }

        Ok(table)
    }

    /// Assembles a table and derives the dependent figures, without checks.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn assemble(
        metadata: PolicyMetadata,
        deductions: DeductionConfig,
        social_health_rate: Decimal,
        unemployment_rate: Decimal,
        social_health_cap: Decimal,
        unemployment_cap_multiplier: Decimal,
        region_min_wages: [Decimal; 4],
        pit_brackets: Vec<TaxBracket>,
    ) -> Self {
        let unemployment_caps = region_min_wages.map(|wage| wage * unemployment_cap_multiplier);
        Self {
            metadata,
            social_health_rate,
            unemployment_rate,
            insurance_rate: social_health_rate + unemployment_rate,
            taxpayer_deduction: deductions.taxpayer,
            dependent_deduction: deductions.dependent,
            social_health_cap,
            region_min_wages,
            unemployment_caps,
            pit_brackets,
        }
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Combined employee insurance rate when the base is below every cap.
    pub fn insurance_rate(&self) -> Decimal {
        self.insurance_rate
    }

    /// Social plus health insurance rate.
    pub fn social_health_rate(&self) -> Decimal {
        self.social_health_rate
    }

    /// Unemployment insurance rate.
    pub fn unemployment_rate(&self) -> Decimal {
        self.unemployment_rate
    }

    /// Allowance for the taxpayer.
    pub fn taxpayer_deduction(&self) -> Decimal {
        self.taxpayer_deduction
    }

    /// Allowance per dependent.
    pub fn dependent_deduction(&self) -> Decimal {
        self.dependent_deduction
    }

    /// Ceiling on the social/health insurance base.
    pub fn social_health_cap(&self) -> Decimal {
        self.social_health_cap
    }

    /// Statutory minimum wage for a region.
    pub fn region_min_wage(&self, region: Region) -> Decimal {
        self.region_min_wages[region.index()]
    }

    /// Ceiling on the unemployment insurance base for a region.
    pub fn unemployment_cap(&self, region: Region) -> Decimal {
        self.unemployment_caps[region.index()]
    }

    /// The progressive tax schedule, lowest band first.
    pub fn pit_brackets(&self) -> &[TaxBracket] {
        &self.pit_brackets
    }

    /// Lower boundary of the band at `index` (the previous band's limit).
    pub fn bracket_lower_limit(&self, index: usize) -> Decimal {
        index
            .checked_sub(1)
            .and_then(|prev| self.pit_brackets.get(prev))
            .and_then(|b| b.upper_limit)
            .unwrap_or(Decimal::ZERO)
    }

    /// The highest marginal tax rate in the schedule.
    pub fn max_bracket_rate(&self) -> Decimal {
        self.pit_brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

fn validate_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(EngineError::invalid_policy(format!(
            "{} must be in [0, 1), got {}",
            name, rate
        )));
    }
    Ok(())
}

fn validate_non_negative(name: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_policy(format!(
            "{} must not be negative, got {}",
            name, amount
        )));
    }
    Ok(())
}

fn region_wages(wages: &BTreeMap<u8, Decimal>) -> EngineResult<[Decimal; 4]> {
    for code in wages.keys() {
        Region::try_from(*code).map_err(|_| {
            EngineError::invalid_policy(format!("unknown region {} in region_min_wages", code))
        })?;
    }

    let mut out = [Decimal::ZERO; 4];
    for region in Region::ALL {
        let wage = wages.get(&region.code()).copied().ok_or_else(|| {
            EngineError::invalid_policy(format!("missing minimum wage for region {}", region))
        })?;
        validate_non_negative(&format!("region_min_wages.{}", region), wage)?;
        out[region.index()] = wage;
    }
    Ok(out)
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    if brackets.is_empty() {
        return Err(EngineError::invalid_policy("at least one tax bracket is required"));
    }

    let mut lower = Decimal::ZERO;
    let mut expected_cumulative = Decimal::ZERO;
    let last = brackets.len() - 1;

    for (i, bracket) in brackets.iter().enumerate() {
        validate_rate(&format!("brackets[{}].rate", i), bracket.rate)?;

        if bracket.cumulative_tax_below != expected_cumulative {
            return Err(EngineError::invalid_policy(format!(
                "brackets[{}].cumulative_tax_below is {}, expected {}",
                i, bracket.cumulative_tax_below, expected_cumulative
            )));
        }

        match bracket.upper_limit {
            Some(limit) if i == last => {
                return Err(EngineError::invalid_policy(format!(
                    "the last bracket must be unbounded, got limit {}",
                    limit
                )));
            }
            Some(limit) => {
                if limit <= lower {
                    return Err(EngineError::invalid_policy(format!(
                        "brackets[{}].upper_limit {} must exceed {}",
                        i, limit, lower
                    )));
                }
                expected_cumulative += (limit - lower) * bracket.rate;
                lower = limit;
            }
            None if i != last => {
                return Err(EngineError::invalid_policy(format!(
                    "only the last bracket may be unbounded, brackets[{}] is not last",
                    i
                )));
            }
            None => {}
        }
    }

    Ok(())
}
