//! Error types for the payoff expression language.
//!
//! Two distinct failure families exist:
//!
//! - [`ExpressionError`]: the expression text is not an acceptable payoff
//!   formula. Detected while parsing or during the whitelist walk, before
//!   any evaluation takes place.
//! - [`EvaluationError`]: the expression is well-formed but a numeric
//!   domain rule was violated while evaluating it for a concrete terminal
//!   price (for example `log` of a non-positive value).

use thiserror::Error;

/// Rejection of an expression before any evaluation.
///
/// Every variant names the offending construct so the caller can surface
/// a useful message to whoever typed the formula.
///
/// # Examples
/// ```
/// use payoff_expr::{compile, ExpressionError, PayoffContext};
///
/// let err = compile("S_T + volatility", PayoffContext::default()).unwrap_err();
/// assert_eq!(
///     err,
///     ExpressionError::UnknownIdentifier { name: "volatility".to_string() }
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The expression text is empty or all whitespace.
    #[error("Empty payoff expression")]
    Empty,

    /// The text could not be parsed as a payoff formula.
    #[error("Syntax error at position {position}: {message}")]
    Syntax {
        /// Byte offset into the expression text.
        position: usize,
        /// What the parser expected or rejected.
        message: String,
    },

    /// A name that is neither the terminal price, a bound scalar, nor a
    /// named constant.
    #[error("Unknown identifier '{name}'")]
    UnknownIdentifier {
        /// The rejected name.
        name: String,
    },

    /// A call to a function outside the whitelist.
    #[error("Unknown function '{name}'")]
    UnknownFunction {
        /// The rejected function name.
        name: String,
    },

    /// A whitelisted function called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), found {found}")]
    WrongArity {
        /// The function name.
        name: String,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// Expression nesting beyond the parser's recursion limit.
    #[error("Expression nesting exceeds depth limit {limit}")]
    TooDeep {
        /// Maximum permitted nesting depth.
        limit: usize,
    },
}

/// Numeric-domain failure while evaluating a compiled payoff.
///
/// The first such failure aborts the whole pricing call; partial results
/// are never averaged around a bad sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Right-hand side of `/` was zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Right-hand side of `%` was zero.
    #[error("Modulo by zero")]
    ModuloByZero,

    /// `log` applied to a value outside (0, inf).
    #[error("log of non-positive value {value}")]
    LogDomain {
        /// The offending argument.
        value: f64,
    },

    /// `sqrt` applied to a negative value.
    #[error("sqrt of negative value {value}")]
    SqrtDomain {
        /// The offending argument.
        value: f64,
    },

    /// A power with no finite real result, e.g. a negative base raised to
    /// a fractional exponent.
    #[error("{base} ** {exponent} has no finite real result")]
    PowDomain {
        /// Base of the power.
        base: f64,
        /// Exponent of the power.
        exponent: f64,
    },

    /// An operation overflowed or otherwise produced a non-finite value.
    #[error("Non-finite result in '{operation}'")]
    NonFinite {
        /// The operator or function that produced the value.
        operation: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_error_display() {
        let err = ExpressionError::UnknownFunction {
            name: "eval".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown function 'eval'");

        let err = ExpressionError::WrongArity {
            name: "clip".to_string(),
            expected: 3,
            found: 1,
        };
        assert!(err.to_string().contains("expects 3"));
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_evaluation_error_display() {
        let err = EvaluationError::LogDomain { value: -2.5 };
        assert_eq!(err.to_string(), "log of non-positive value -2.5");

        let err = EvaluationError::DivisionByZero;
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ExpressionError::Empty;
        let _: &dyn std::error::Error = &err;

        let err = EvaluationError::ModuloByZero;
        let _: &dyn std::error::Error = &err;
    }
}
