//! Error types for the salary conversion engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading a policy table or
//! converting between gross and net salary.

use thiserror::Error;

/// The main error type for the salary conversion engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use vn_salary_engine::error::EngineError;
///
/// let error = EngineError::InvalidRegion {
///     code: "5".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid region '5': expected one of 1, 2, 3, 4");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy table was internally inconsistent.
    #[error("Invalid policy table: {message}")]
    InvalidPolicy {
        /// A description of the inconsistency.
        message: String,
    },

    /// A region code outside the four statutory zones was supplied.
    #[error("Invalid region '{code}': expected one of 1, 2, 3, 4")]
    InvalidRegion {
        /// The rejected region code.
        code: String,
    },

    /// A conversion input was missing, malformed or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidPolicy`].
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_policy_displays_message() {
        let error = EngineError::invalid_policy("bracket limits must increase");
        assert_eq!(
            error.to_string(),
            "Invalid policy table: bracket limits must increase"
        );
    }

    #[test]
    fn test_invalid_region_displays_code() {
        let error = EngineError::InvalidRegion {
            code: "0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid region '0': expected one of 1, 2, 3, 4"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("gross_salary", "must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input 'gross_salary': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_region() -> EngineResult<()> {
            Err(EngineError::InvalidRegion {
                code: "9".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_region()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
