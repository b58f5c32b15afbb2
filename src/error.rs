//! Error types for projection inputs and configuration resolution

use thiserror::Error;

/// Errors raised by the projection engine before any year is computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Property value must be finite and strictly positive
    #[error("Invalid property value: {0} (must be greater than zero)")]
    InvalidPropertyValue(f64),

    /// Horizon must cover at least one year
    #[error("Invalid horizon: {0} years (must be at least 1)")]
    InvalidHorizon(u32),

    /// Horizon beyond the longest supported projection
    #[error("Invalid horizon: {0} years (must be at most {max})", max = crate::property::MAX_HORIZON_YEARS)]
    HorizonTooLarge(u32),

    /// A numeric input or configuration field is NaN or infinite
    #[error("Non-finite value for {field}")]
    NonFinite { field: &'static str },
}

/// Errors raised while loading or resolving financial configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error reading configuration: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown configuration scope: {0}")]
    UnknownScope(String),

    #[error("Unknown configuration field: {0}")]
    UnknownField(String),

    #[error("Invalid value {value:?} for field {field}")]
    InvalidValue { field: String, value: String },
}

/// Errors raised while loading property inputs
#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error reading properties: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error reading properties: {0}")]
    Csv(#[from] csv::Error),
}

impl ProjectionError {
    /// Check a value is finite, naming the field on failure
    pub fn check_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { field })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProjectionError::InvalidHorizon(0).to_string(),
            "Invalid horizon: 0 years (must be at least 1)"
        );
        assert_eq!(
            ProjectionError::HorizonTooLarge(500).to_string(),
            "Invalid horizon: 500 years (must be at most 100)"
        );
        assert_eq!(
            ProjectionError::NonFinite { field: "nightly_rate" }.to_string(),
            "Non-finite value for nightly_rate"
        );
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(ProjectionError::check_finite("x", 1.5), Ok(1.5));
        assert_eq!(
            ProjectionError::check_finite("x", f64::NAN),
            Err(ProjectionError::NonFinite { field: "x" })
        );
        assert!(ProjectionError::check_finite("x", f64::INFINITY).is_err());
    }
}
