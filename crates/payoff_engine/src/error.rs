//! Error types for the pricing engine.
//!
//! [`ValidationError`] covers malformed or out-of-range request inputs.
//! [`PricingError`] is the single error surface of a pricing call,
//! wrapping validation failures together with the expression-language
//! errors from [`payoff_expr`]. All variants are recoverable by the
//! caller; the engine never retries and never raises an unhandled fault
//! past this boundary.

use payoff_expr::{EvaluationError, ExpressionError};
use thiserror::Error;

/// Rejection of a pricing request before any simulation work.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric field outside its domain constraint.
    #[error("Invalid {field}: {value} ({constraint})")]
    OutOfRange {
        /// Field name as supplied by the caller.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint, e.g. "must be positive".
        constraint: &'static str,
    },

    /// A numeric field that is NaN or infinite.
    #[error("Non-finite {field}: {value}")]
    NonFinite {
        /// Field name as supplied by the caller.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Simulation count outside [1, MAX_SIMULATIONS].
    #[error("Invalid simulation count {count}: must be in range [1, 10000000]")]
    InvalidSimulationCount {
        /// The rejected count.
        count: usize,
    },

    /// A text field that could not be converted to a number.
    #[error("Malformed {field}: '{text}' is not a number")]
    Malformed {
        /// Field name as supplied by the caller.
        field: &'static str,
        /// The unparseable text.
        text: String,
    },
}

/// Any failure of a pricing call.
///
/// The variant tells the caller which stage rejected the request:
/// input validation, expression compilation, or payoff evaluation
/// during simulation. Messages are surfaced verbatim from the source
/// error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// The request's numeric inputs failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payoff expression was rejected before simulation.
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// A numeric-domain failure while evaluating the payoff; the whole
    /// call is aborted rather than averaging around bad samples.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::OutOfRange {
            field: "spot",
            value: -1.0,
            constraint: "must be positive",
        };
        assert_eq!(err.to_string(), "Invalid spot: -1 (must be positive)");

        let err = ValidationError::InvalidSimulationCount { count: 0 };
        assert!(err.to_string().contains("Invalid simulation count 0"));

        let err = ValidationError::Malformed {
            field: "maturity",
            text: "one year".to_string(),
        };
        assert!(err.to_string().contains("'one year'"));
    }

    #[test]
    fn test_pricing_error_preserves_source_message() {
        let source = ExpressionError::UnknownFunction {
            name: "eval".to_string(),
        };
        let err: PricingError = source.clone().into();
        assert_eq!(err.to_string(), source.to_string());
        assert!(matches!(err, PricingError::Expression(_)));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err: PricingError = ValidationError::InvalidSimulationCount { count: 0 }.into();
        let _: &dyn std::error::Error = &err;
    }
}
