//! Error types for the Overtime Extraction Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during overtime extraction.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Overtime Extraction Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use overtime_engine::error::EngineError;
///
/// let error = EngineError::InactivePolicy {
///     name: "standard".to_string(),
/// };
/// assert_eq!(error.to_string(), "Overtime policy 'standard' is not active");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The overtime policy is marked inactive and must not be used.
    #[error("Overtime policy '{name}' is not active")]
    InactivePolicy {
        /// The name of the inactive policy.
        name: String,
    },

    /// The overtime policy contains an invalid field value.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A timesheet entry was malformed or contained inconsistent data.
    #[error("Invalid entry on {date}, field '{field}': {message}")]
    InvalidEntry {
        /// The date of the invalid entry.
        date: NaiveDate,
        /// The field that was invalid.
        field: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// No policy with the requested name was found in the policy store.
    #[error("Overtime policy not found: {name}")]
    PolicyNotFound {
        /// The policy name that was not found.
        name: String,
    },

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
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_policy_displays_name() {
        let error = EngineError::InactivePolicy {
            name: "night_shift".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Overtime policy 'night_shift' is not active"
        );
    }

    #[test]
    fn test_invalid_policy_displays_field_and_message() {
        let error = EngineError::InvalidPolicy {
            field: "holiday_multiplier".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid policy field 'holiday_multiplier': must be positive"
        );
    }

    #[test]
    fn test_invalid_entry_displays_date_field_and_message() {
        let error = EngineError::InvalidEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            field: "break_minutes".to_string(),
            message: "break exceeds gross duration".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid entry on 2024-01-15, field 'break_minutes': break exceeds gross duration"
        );
    }

    #[test]
    fn test_policy_not_found_displays_name() {
        let error = EngineError::PolicyNotFound {
            name: "unknown".to_string(),
        };
        assert_eq!(error.to_string(), "Overtime policy not found: unknown");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policies".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policies"
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
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_inactive_policy() -> EngineResult<()> {
            Err(EngineError::InactivePolicy {
                name: "standard".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_inactive_policy()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
