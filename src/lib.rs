//! Gross/net salary conversion engine for Vietnamese payroll.
//!
//! This crate converts a monthly gross salary into take-home pay after the
//! employee's mandatory insurance contributions and progressive personal
//! income tax, and solves the reverse problem of finding the gross that
//! yields a target net.
//!
//! # Example
//!
//! ```
//! use vn_salary_engine::calculation::{gross_to_net, net_to_gross};
//! use vn_salary_engine::config::PolicyTable;
//! use vn_salary_engine::models::{InsuranceBasis, Region};
//! use rust_decimal::Decimal;
//!
//! let policy = PolicyTable::statutory();
//! let gross = Decimal::from(20_000_000);
//!
//! let forward = gross_to_net(&policy, gross, gross, 0, Region::One).unwrap();
//! assert_eq!(forward.net_salary, Decimal::from(17_780_000));
//!
//! let reverse = net_to_gross(
//!     &policy,
//!     forward.net_salary,
//!     InsuranceBasis::SameAsGross,
//!     0,
//!     Region::One,
//! )
//! .unwrap();
//! assert!(reverse.converged);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
