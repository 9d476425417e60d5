//! The built-in statutory policy table.
//!
//! These figures are the literal values in force for 2026 and are used when
//! no configuration directory is supplied.

use rust_decimal::Decimal;

use super::types::{DeductionConfig, PolicyMetadata, PolicyTable, TaxBracket};

/// Personal allowance for the taxpayer, per month.
pub const TAXPAYER_DEDUCTION: Decimal = Decimal::from_parts(15_500_000, 0, 0, false, 0);

/// Allowance per registered dependent, per month.
pub const DEPENDENT_DEDUCTION: Decimal = Decimal::from_parts(6_200_000, 0, 0, false, 0);

/// Social/health insurance base cap: 20 x the 2,340,000 base salary
/// (Decree 73/2024/ND-CP).
pub const SOCIAL_HEALTH_CAP: Decimal = Decimal::from_parts(46_800_000, 0, 0, false, 0);

/// Employee social (8%) plus health (1.5%) insurance rate.
pub const SOCIAL_HEALTH_RATE: Decimal = Decimal::from_parts(95, 0, 0, false, 3);

/// Employee unemployment insurance rate.
pub const UNEMPLOYMENT_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// The unemployment base is capped at this multiple of the regional minimum wage.
pub const UNEMPLOYMENT_CAP_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Regional minimum wages for regions I-IV.
pub const REGION_MIN_WAGES: [Decimal; 4] = [
    Decimal::from_parts(5_310_000, 0, 0, false, 0),
    Decimal::from_parts(4_730_000, 0, 0, false, 0),
    Decimal::from_parts(4_140_000, 0, 0, false, 0),
    Decimal::from_parts(3_700_000, 0, 0, false, 0),
];

/// Code of the built-in table.
pub const STATUTORY_POLICY_CODE: &str = "VN-PIT-2026";

fn statutory_brackets() -> Vec<TaxBracket> {
    let band = |limit: Option<u32>, rate_pct: u32, cumulative: u32| TaxBracket {
        upper_limit: limit.map(|l| Decimal::from_parts(l, 0, 0, false, 0)),
        rate: Decimal::from_parts(rate_pct, 0, 0, false, 2),
        cumulative_tax_below: Decimal::from_parts(cumulative, 0, 0, false, 0),
    };

    vec![
        band(Some(10_000_000), 5, 0),
        band(Some(30_000_000), 10, 500_000),
        band(Some(60_000_000), 20, 2_500_000),
        band(Some(100_000_000), 30, 8_500_000),
        band(None, 35, 20_500_000),
    ]
}

impl PolicyTable {
    /// The statutory policy table.
    ///
    /// # Example
    ///
    /// ```
    /// use vn_salary_engine::config::PolicyTable;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = PolicyTable::statutory();
    /// assert_eq!(policy.taxpayer_deduction(), Decimal::from(15_500_000));
    /// assert_eq!(policy.social_health_cap(), Decimal::from(46_800_000));
    /// ```
    pub fn statutory() -> Self {
        Self::assemble(
            PolicyMetadata {
                code: STATUTORY_POLICY_CODE.to_string(),
                name: "Vietnam PIT and mandatory employee insurance".to_string(),
                version: "2026-01-01".to_string(),
            },
            DeductionConfig {
                taxpayer: TAXPAYER_DEDUCTION,
                dependent: DEPENDENT_DEDUCTION,
            },
            SOCIAL_HEALTH_RATE,
            UNEMPLOYMENT_RATE,
            SOCIAL_HEALTH_CAP,
            UNEMPLOYMENT_CAP_MULTIPLIER,
            REGION_MIN_WAGES,
            statutory_brackets(),
        )
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::statutory()
    }
}
