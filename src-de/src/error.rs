//! Error types for the Differential Evolution optimizer.
//!
//! Every error is fatal to the current run: the driver never retries or
//! recovers internally, it hands the error back to the caller through `?`.

use thiserror::Error;

/// Errors that can occur while configuring or running Differential Evolution.
#[derive(Debug, Error)]
pub enum DEError {
    /// Unsupported variant token or otherwise malformed configuration value.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Human readable description, naming the allowed values
        message: String,
    },

    /// The population cannot supply enough distinct individuals for mutation.
    #[error("insufficient population: {pop_size} individuals, at least {required} required")]
    InsufficientPopulation {
        /// The population size that was provided
        pop_size: usize,
        /// Minimum population size needed by the mutation strategy
        required: usize,
    },

    /// Fixed differential weight outside (0, 2).
    #[error("invalid differential weight: {factor} (must be in (0, 2))")]
    InvalidMutationFactor {
        /// The invalid weight
        factor: f64,
    },

    /// Dithering range that is not ascending or not inside (0, 2).
    #[error("invalid differential weight range ({min}, {max}): need 0 < min < max < 2")]
    InvalidMutationRange {
        /// Lower end of the range
        min: f64,
        /// Upper end of the range
        max: f64,
    },

    /// Crossover rate outside [0, 1].
    #[error("invalid crossover rate: {rate} (must be in [0, 1])")]
    InvalidCrossoverRate {
        /// The invalid rate
        rate: f64,
    },

    /// Two vectors that must share a length do not.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// A supplied initial population does not have shape (pop_size, n_params).
    #[error(
        "initial population has shape ({rows}, {cols}), expected ({expected_rows}, {expected_cols})"
    )]
    PopulationShapeMismatch {
        /// Configured population size
        expected_rows: usize,
        /// Number of problem parameters
        expected_cols: usize,
        /// Rows provided
        rows: usize,
        /// Columns provided
        cols: usize,
    },

    /// A lower bound exceeds its corresponding upper bound.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The objective returned NaN.
    #[error("objective returned {value} for individual {index}")]
    InvalidFitness {
        /// Population index of the offending individual
        index: usize,
        /// The value returned by the objective
        value: f64,
    },
}

/// A specialized `Result` type for DE operations.
pub type Result<T> = std::result::Result<T, DEError>;

impl DEError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        DEError::InvalidConfiguration { message: message.into() }
    }

    /// Returns `true` if this error comes from a configuration value.
    ///
    /// This includes variant parsing, differential weight and crossover rate errors.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DEError::InvalidConfiguration { .. }
                | DEError::InvalidMutationFactor { .. }
                | DEError::InvalidMutationRange { .. }
                | DEError::InvalidCrossoverRate { .. }
        )
    }

    /// Returns `true` if this error is about the population size or shape.
    pub fn is_population_error(&self) -> bool {
        matches!(
            self,
            DEError::InsufficientPopulation { .. } | DEError::PopulationShapeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DEError::InsufficientPopulation { pop_size: 3, required: 4 };
        assert_eq!(
            err.to_string(),
            "insufficient population: 3 individuals, at least 4 required"
        );
    }

    #[test]
    fn test_is_config_error() {
        let config_err = DEError::InvalidCrossoverRate { rate: 1.5 };
        let pop_err = DEError::InsufficientPopulation { pop_size: 2, required: 4 };

        assert!(config_err.is_config_error());
        assert!(!pop_err.is_config_error());
        assert!(DEError::invalid_config("bad token").is_config_error());
    }

    #[test]
    fn test_is_population_error() {
        let shape_err = DEError::PopulationShapeMismatch {
            expected_rows: 10,
            expected_cols: 2,
            rows: 8,
            cols: 2,
        };
        let bounds_err = DEError::InvalidBounds { index: 0, lower: 5.0, upper: 3.0 };

        assert!(shape_err.is_population_error());
        assert!(!bounds_err.is_population_error());
    }
}
