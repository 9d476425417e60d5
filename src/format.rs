//! Numeric formatting for VND amounts.
//!
//! Amounts are shown in the Vietnamese convention: whole đồng with `.` as the
//! thousands separator (`17.780.000 ₫`). The parsing helpers accept the same
//! notation back from a caller's text input.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// The currency symbol appended by [`format_vnd`].
pub const VND_SYMBOL: &str = "₫";

const THOUSANDS_SEPARATOR: char = '.';

/// Rounds an amount to whole đồng, half away from zero.
///
/// # Example
///
/// ```
/// use vn_salary_engine::format::round_vnd;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_vnd(Decimal::from_str("1172839.5").unwrap()), Decimal::from(1_172_840));
/// assert_eq!(round_vnd(Decimal::from_str("1172839.49").unwrap()), Decimal::from(1_172_839));
/// ```
pub fn round_vnd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as whole đồng with `.` thousands separators.
///
/// Negative amounts are shown as `0`.
///
/// # Example
///
/// ```
/// use vn_salary_engine::format::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::from(17_780_000)), "17.780.000");
/// assert_eq!(format_amount(Decimal::from(-5)), "0");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let digits = round_vnd(amount.max(Decimal::ZERO)).trunc().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Formats an amount for display with the đồng symbol.
///
/// # Example
///
/// ```
/// use vn_salary_engine::format::format_vnd;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_vnd(Decimal::from(120_000)), "120.000 ₫");
/// ```
pub fn format_vnd(amount: Decimal) -> String {
    format!("{} {}", format_amount(amount), VND_SYMBOL)
}

/// Parses a whole-đồng amount typed by a user, e.g. `"20.000.000"`.
///
/// Thousands separators and surrounding whitespace are ignored. Anything
/// other than digits is rejected.
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    if cleaned.is_empty() {
        return Err(EngineError::invalid_input(field, "value is empty"));
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(EngineError::invalid_input(
            field,
            format!("'{}' must contain only digits and '.' separators", raw.trim()),
        ));
    }

    Decimal::from_str(&cleaned)
        .map_err(|e| EngineError::invalid_input(field, format!("'{}': {}", raw.trim(), e)))
}

/// Parses an amount that must be strictly positive.
pub fn parse_positive_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let amount = parse_amount(field, raw)?;
    if amount.is_zero() {
        return Err(EngineError::invalid_input(field, "must be greater than 0"));
    }
    Ok(amount)
}

/// Parses a dependent count; an empty field means no dependents.
pub fn parse_dependents(raw: &str) -> EngineResult<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| {
        EngineError::invalid_input(
            "dependents",
            format!("'{}' is not a non-negative whole number", trimmed),
        )
    })
}
