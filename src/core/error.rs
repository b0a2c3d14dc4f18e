//! Error handling and error types for claims-metrics.
//!
//! Every fallible operation in the crate returns [`Result`], so a failed
//! evaluation surfaces synchronously with a message naming the input and the
//! constraint it violated. No operation substitutes NaN for an error.

use std::io;
use thiserror::Error;

/// Main error type for the claims-metrics library.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Input data violates the contract of the called operation
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Parameter value for which no formula is defined
    #[error("Unsupported parameter: {parameter} = {value}, {reason}")]
    UnsupportedParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A transformer was used before being fitted
    #[error("{component} is not fitted; call fit() before transform()")]
    NotFitted { component: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// CSV writing errors
    #[cfg(feature = "csv")]
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using MetricsError
pub type Result<T> = std::result::Result<T, MetricsError>;

impl MetricsError {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        MetricsError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unsupported parameter error
    pub fn unsupported_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        MetricsError::UnsupportedParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        MetricsError::Config {
            message: message.into(),
        }
    }

    /// Create a not-fitted error for the named component
    pub fn not_fitted<S: Into<String>>(component: S) -> Self {
        MetricsError::NotFitted {
            component: component.into(),
        }
    }

    /// Create a length mismatch error between two named sequences
    pub fn length_mismatch(left: &str, left_len: usize, right: &str, right_len: usize) -> Self {
        MetricsError::invalid_input(format!(
            "length mismatch: {} has {} elements, {} has {}",
            left, left_len, right, right_len
        ))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            MetricsError::InvalidInput { .. } => "invalid_input",
            MetricsError::UnsupportedParameter { .. } => "unsupported_parameter",
            MetricsError::Config { .. } => "config",
            MetricsError::NotFitted { .. } => "not_fitted",
            MetricsError::Io { .. } => "io",
            #[cfg(feature = "csv")]
            MetricsError::Csv { .. } => "csv",
            MetricsError::Json { .. } => "json",
        }
    }

    /// Check if this error was caused by the caller's data rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MetricsError::InvalidInput { .. } | MetricsError::UnsupportedParameter { .. }
        )
    }
}

/// Convenience macro for invalid input errors
#[macro_export]
macro_rules! invalid_input {
    ($msg:expr) => {
        $crate::core::error::MetricsError::invalid_input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::MetricsError::invalid_input(format!($fmt, $($arg)*))
    };
}

/// Return early with the given error when the condition does not hold
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MetricsError::invalid_input("empty predictions");
        assert_eq!(err.category(), "invalid_input");
        assert!(err.is_input_error());

        let err = MetricsError::config("bad power");
        assert_eq!(err.category(), "config");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_macros() {
        let err = invalid_input!("weights must be positive");
        assert!(matches!(err, MetricsError::InvalidInput { .. }));

        let err = invalid_input!("weight at index {} is {}", 3, 0.0);
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(n: usize) -> Result<()> {
            crate::ensure!(n > 0, MetricsError::invalid_input("n must be positive"));
            Ok(())
        }
        assert!(check(1).is_ok());
        assert!(matches!(check(0), Err(MetricsError::InvalidInput { .. })));
    }

    #[test]
    fn test_unsupported_parameter() {
        let err = MetricsError::unsupported_parameter("power", "0.5", "no Tweedie distribution");
        assert_eq!(err.category(), "unsupported_parameter");
        let text = err.to_string();
        assert!(text.contains("power = 0.5"));
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = MetricsError::length_mismatch("predictions", 5, "actuals", 4);
        let text = err.to_string();
        assert!(text.starts_with("Invalid input"));
        assert!(text.contains("predictions has 5"));
        assert!(text.contains("actuals has 4"));
    }

    #[test]
    fn test_not_fitted_display() {
        let err = MetricsError::not_fitted("Winsorizer");
        assert_eq!(
            err.to_string(),
            "Winsorizer is not fitted; call fit() before transform()"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: MetricsError = io_err.into();
        assert!(matches!(err, MetricsError::Io { .. }));
        assert_eq!(err.category(), "io");
    }
}
