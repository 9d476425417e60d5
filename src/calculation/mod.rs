//! Calculation logic for the salary conversion engine.
//!
//! This module contains the mandatory insurance calculation with its caps,
//! family deductions, the progressive income tax, the forward gross → net
//! conversion, the net → gross solver and the report-producing wrappers.
//!
//! The forward and reverse functions are pure: identical inputs give
//! identical outputs. Only [`convert`] adds an id and a timestamp.

mod convert;
mod deductions;
mod gross_to_net;
mod income_tax;
mod insurance;
mod net_to_gross;

pub use convert::{
    NO_TAXABLE_INCOME, SOCIAL_HEALTH_BASE_CAPPED, SOLVER_NOT_CONVERGED, UNEMPLOYMENT_BASE_CAPPED,
    convert, convert_gross_to_net, convert_net_to_gross,
};
pub use deductions::{DEDUCTIONS_REF, DeductionResult, calculate_deductions, family_deductions};
pub use gross_to_net::gross_to_net;
pub use income_tax::{
    FALLBACK_MARGINAL_RATE, IncomeTaxResult, PIT_SCHEDULE_REF, calculate_income_tax, compute_tax,
    marginal_rate,
};
pub use insurance::{
    INSURANCE_REF, InsuranceContributions, InsuranceResult, calculate_insurance,
    compute_insurance,
};
pub use net_to_gross::{
    CONVERGENCE_TOLERANCE, INITIAL_GUESS_FACTOR, MAX_ITERATIONS, SolverSettings,
    marginal_insurance_rate, net_to_gross, solve_net_to_gross,
};
