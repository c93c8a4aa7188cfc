//! Error types for the pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during price calculation.

use thiserror::Error;

/// The main error type for the pricing engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use stay_pricing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// A hotel configuration value was missing or inconsistent.
    #[error("Invalid hotel configuration '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An amenity has no DEFAULT age-category price.
    #[error("Amenity '{code}' has no DEFAULT age-category price")]
    MissingDefaultAgeCategory {
        /// The amenity code missing its DEFAULT price.
        code: String,
    },

    /// A linked amenity code of a COMBO did not resolve.
    #[error("Combo '{combo}' links unknown amenity '{code}'")]
    AmenityNotFound {
        /// The combo amenity that holds the link.
        combo: String,
        /// The linked code that was not found.
        code: String,
    },

    /// A linked amenity of a COMBO is not active.
    #[error("Combo '{combo}' links inactive amenity '{code}'")]
    AmenityInactive {
        /// The combo amenity that holds the link.
        combo: String,
        /// The linked code that is inactive.
        code: String,
    },

    /// A COMBO directly or indirectly references itself.
    #[error("Combo '{combo}' has a circular reference through '{code}'")]
    CircularAmenityReference {
        /// The combo amenity where the cycle was detected.
        combo: String,
        /// The linked code that closes the cycle.
        code: String,
    },

    /// Booking aggregation was invoked with no reservations.
    #[error("Booking pricing requires at least one reservation")]
    EmptyBooking,

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
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
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "currency".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid hotel configuration 'currency': must not be empty"
        );
    }

    #[test]
    fn test_missing_default_age_category_displays_code() {
        let error = EngineError::MissingDefaultAgeCategory {
            code: "BRKFST".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Amenity 'BRKFST' has no DEFAULT age-category price"
        );
    }

    #[test]
    fn test_amenity_not_found_displays_both_codes() {
        let error = EngineError::AmenityNotFound {
            combo: "ROMANTIC".to_string(),
            code: "SPA".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Combo 'ROMANTIC' links unknown amenity 'SPA'"
        );
    }

    #[test]
    fn test_amenity_inactive_displays_both_codes() {
        let error = EngineError::AmenityInactive {
            combo: "ROMANTIC".to_string(),
            code: "SPA".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Combo 'ROMANTIC' links inactive amenity 'SPA'"
        );
    }

    #[test]
    fn test_circular_reference_displays_both_codes() {
        let error = EngineError::CircularAmenityReference {
            combo: "ROMANTIC".to_string(),
            code: "ROMANTIC".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Combo 'ROMANTIC' has a circular reference through 'ROMANTIC'"
        );
    }

    #[test]
    fn test_empty_booking_message() {
        assert_eq!(
            EngineError::EmptyBooking.to_string(),
            "Booking pricing requires at least one reservation"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative night count".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: negative night count");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_empty_booking() -> EngineResult<()> {
            Err(EngineError::EmptyBooking)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_empty_booking()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
