//! Reverse conversion from a target net salary to the gross that produces it.
//!
//! Net pay is a continuous, piecewise-linear, non-decreasing function of
//! gross, so the solver runs a Newton-style iteration using the current
//! marginal tax band and insurance rate as the slope estimate. Each step
//! evaluates [`gross_to_net`] on the current guess and corrects the guess by
//! `(target - net) / (1 - pit_rate - insurance_rate)`.
//!
//! Convergence is measured on net pay, within one đồng. Because net can rise
//! as slowly as 0.545 đồng per đồng of gross, the returned gross may sit up
//! to about two đồng from the exact preimage even when `converged` is true.

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::config::PolicyTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{InsuranceBasis, NetToGrossOutcome, Region};

use super::gross_to_net::gross_to_net;
use super::income_tax::marginal_rate;

/// Maximum number of forward evaluations before the solver gives up.
pub const MAX_ITERATIONS: u32 = 100;

/// The solver stops once `|target - net|` is at or below one đồng.
pub const CONVERGENCE_TOLERANCE: Decimal = Decimal::ONE;

/// The first guess is the target net scaled by this factor.
pub const INITIAL_GUESS_FACTOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// Guesses are kept to this many decimal places.
const GUESS_SCALE: u32 = 4;

/// Iteration limits for the net → gross solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverSettings {
    /// Maximum number of forward evaluations in the loop.
    pub max_iterations: u32,
    /// Largest acceptable `|target - net|`.
    pub tolerance: Decimal,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
        }
    }
}

/// Marginal insurance rate used as part of the slope estimate.
///
/// Only counted when contributions follow the gross and the gross is at or
/// below both caps; a fixed custom base or a capped base contributes nothing
/// at the margin.
pub fn marginal_insurance_rate(
    policy: &PolicyTable,
    basis: &InsuranceBasis,
    gross: Decimal,
    region: Region,
) -> Decimal {
    if basis.is_same_as_gross()
        && gross <= policy.social_health_cap()
        && gross <= policy.unemployment_cap(region)
    {
        policy.insurance_rate()
    } else {
        Decimal::ZERO
    }
}

/// Solves for the gross salary whose net is within one đồng of `target_net`,
/// using the default [`SolverSettings`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `target_net` or a custom
/// insurance base is negative, or if `target_net` is too large for the
/// iteration to stay within `Decimal` range, and
/// [`EngineError::InvalidPolicy`] if the
/// policy's marginal rates leave the net with no slope.
///
/// # Examples
///
/// ```
/// use vn_salary_engine::calculation::net_to_gross;
/// use vn_salary_engine::config::PolicyTable;
/// use vn_salary_engine::models::{InsuranceBasis, Region};
/// use rust_decimal::Decimal;
///
/// let policy = PolicyTable::statutory();
/// let outcome = net_to_gross(
///     &policy,
///     Decimal::from(17_780_000),
///     InsuranceBasis::SameAsGross,
///     0,
///     Region::One,
/// )
/// .unwrap();
///
/// assert!(outcome.converged);
/// assert!((outcome.gross_salary - Decimal::from(20_000_000)).abs() <= Decimal::ONE);
/// ```
pub fn net_to_gross(
    policy: &PolicyTable,
    target_net: Decimal,
    basis: InsuranceBasis,
    dependents: u32,
    region: Region,
) -> EngineResult<NetToGrossOutcome> {
    solve_net_to_gross(
        policy,
        target_net,
        basis,
        dependents,
        region,
        &SolverSettings::default(),
    )
}

/// Solves net → gross with explicit iteration limits.
///
/// If the loop exhausts `max_iterations`, the last guess is evaluated once
/// more and returned with `converged` reflecting whether that evaluation is
/// within tolerance.
pub fn solve_net_to_gross(
    policy: &PolicyTable,
    target_net: Decimal,
    basis: InsuranceBasis,
    dependents: u32,
    region: Region,
    settings: &SolverSettings,
) -> EngineResult<NetToGrossOutcome> {
    if target_net < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "target_net",
            format!("must not be negative, got {}", target_net),
        ));
    }
    if let InsuranceBasis::Custom(base) = basis {
        if base < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "insurance_basis",
                format!("custom insurance salary must not be negative, got {}", base),
            ));
        }
    }

    let mut guess = target_net
        .checked_mul(INITIAL_GUESS_FACTOR)
        .ok_or_else(|| {
            EngineError::invalid_input(
                "target_net",
                format!("{} is too large to solve for a gross salary", target_net),
            )
        })?
        .round_dp(GUESS_SCALE);

    for iteration in 1..=settings.max_iterations {
        let details = gross_to_net(policy, guess, basis.resolve(guess), dependents, region)?;
        let diff = target_net - details.net_salary;

        trace!(
            iteration,
            gross = %guess,
            net = %details.net_salary,
            diff = %diff,
            "net-to-gross step"
        );

        if diff.abs() <= settings.tolerance {
            debug!(
                iterations = iteration,
                gross = %guess,
                target_net = %target_net,
                "net-to-gross converged"
            );
            return Ok(NetToGrossOutcome {
                gross_salary: guess,
                details,
                converged: true,
                iterations: iteration,
            });
        }

        let pit_rate = marginal_rate(
            policy,
            guess - details.mandatory_insurance - details.total_deductions,
        );
        let insurance_rate = marginal_insurance_rate(policy, &basis, guess, region);
        let slope = Decimal::ONE - pit_rate - insurance_rate;

        guess = next_guess(guess, diff, slope, target_net)?;
    }

    let details = gross_to_net(policy, guess, basis.resolve(guess), dependents, region)?;
    let converged = (target_net - details.net_salary).abs() <= settings.tolerance;

    if !converged {
        warn!(
            iterations = settings.max_iterations,
            gross = %guess,
            net = %details.net_salary,
            target_net = %target_net,
            "net-to-gross did not converge"
        );
    }

    Ok(NetToGrossOutcome {
        gross_salary: guess,
        details,
        converged,
        iterations: settings.max_iterations,
    })
}

/// Applies one correction `guess + diff / slope`.
///
/// A negative result restarts the search from `target_net`.
fn next_guess(
    guess: Decimal,
    diff: Decimal,
    slope: Decimal,
    target_net: Decimal,
) -> EngineResult<Decimal> {
    let step = diff.checked_div(slope).ok_or_else(|| {
        EngineError::invalid_policy(format!(
            "marginal rates leave net pay with slope {}",
            slope
        ))
    })?;

    let next = guess
        .checked_add(step)
        .ok_or_else(|| {
            EngineError::invalid_input(
                "target_net",
                format!("{} is too large to solve for a gross salary", target_net),
            )
        })?
        .round_dp(GUESS_SCALE);

    if next < Decimal::ZERO {
        Ok(target_net)
    } else {
        Ok(next)
    }
}
