// src/error.rs
use std::fmt;
use std::io;

/// Error types for the finsim library
#[derive(Debug)]
pub enum FinError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// Malformed user input (interactive prompt or command line)
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Cash-flow sequence cannot be analysed
    CashFlowError { reason: String },

    /// I/O failure while reading input or writing exports
    Io { context: String, source: io::Error },
}

impl fmt::Display for FinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            FinError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            FinError::InvalidInput {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid input for {} ({:?}): {}", field, value, reason)
            }
            FinError::CashFlowError { reason } => {
                write!(f, "Cash flow error: {}", reason)
            }
            FinError::Io { context, source } => {
                write!(f, "I/O error while {}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for FinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FinError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl FinError {
    /// Wrap an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        FinError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for finsim operations
pub type FinResult<T> = Result<T, FinError>;

/// Validation utilities
pub mod validation {
    use super::{FinError, FinResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> FinResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(FinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> FinResult<()> {
        if value < 0.0 || value.is_nan() {
            Err(FinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> FinResult<()> {
        if !value.is_finite() {
            Err(FinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a discount rate keeps `1 + r` positive
    pub fn validate_rate(name: &str, value: f64) -> FinResult<()> {
        validate_finite(name, value)?;
        if value <= -1.0 {
            Err(FinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be greater than -1 (100% loss)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> FinResult<()> {
        if paths == 0 {
            Err(FinError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 10_000_000 {
            Err(FinError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (10 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> FinResult<()> {
        if steps == 0 {
            Err(FinError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(FinError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
        assert!(validate_positive("sigma", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("rate_min", -0.99).is_ok());
        assert!(validate_rate("rate_min", 10.0).is_ok());
        assert!(validate_rate("rate_min", -1.0).is_err());
        assert!(validate_rate("rate_min", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_counts() {
        assert!(validate_paths(1000).is_ok());
        assert!(validate_paths(0).is_err());
        assert!(validate_steps(252).is_ok());
        assert!(validate_steps(0).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = FinError::InvalidParameters {
            parameter: "sigma".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_input_error_display() {
        let error = FinError::InvalidInput {
            field: "cash flow at t=2".to_string(),
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("t=2"));
        assert!(display.contains("\"abc\""));
    }
}
