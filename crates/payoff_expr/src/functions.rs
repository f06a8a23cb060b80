//! Whitelisted function vocabulary.
//!
//! The payoff language exposes a closed set of numeric functions. `max`
//! and `min` are aliases of `maximum` and `minimum`: all four are the
//! two-argument pairwise operations, so scalar and batched evaluation can
//! never disagree about their meaning.

use crate::error::EvaluationError;

/// A function admitted by the whitelist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Function {
    /// `maximum(a, b)` / `max(a, b)`: pairwise maximum.
    Maximum,
    /// `minimum(a, b)` / `min(a, b)`: pairwise minimum.
    Minimum,
    /// `abs(x)`: absolute value.
    Abs,
    /// `exp(x)`: natural exponential.
    Exp,
    /// `log(x)`: natural logarithm, defined on (0, inf).
    Log,
    /// `sqrt(x)`: square root, defined on [0, inf).
    Sqrt,
    /// `clip(x, low, high)`: bound `x` into [low, high].
    Clip,
}

impl Function {
    /// Resolves a source-text name against the whitelist.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "maximum" | "max" => Some(Function::Maximum),
            "minimum" | "min" => Some(Function::Minimum),
            "abs" => Some(Function::Abs),
            "exp" => Some(Function::Exp),
            "log" => Some(Function::Log),
            "sqrt" => Some(Function::Sqrt),
            "clip" => Some(Function::Clip),
            _ => None,
        }
    }

    /// Required argument count.
    pub(crate) fn arity(&self) -> usize {
        match self {
            Function::Maximum | Function::Minimum => 2,
            Function::Abs | Function::Exp | Function::Log | Function::Sqrt => 1,
            Function::Clip => 3,
        }
    }

    /// Canonical name, used in error messages.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Function::Maximum => "maximum",
            Function::Minimum => "minimum",
            Function::Abs => "abs",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
            Function::Clip => "clip",
        }
    }

    /// Applies the function to evaluated arguments.
    ///
    /// The caller guarantees `args.len() == self.arity()`; the whitelist
    /// walk enforces arity before an expression can be evaluated.
    pub(crate) fn apply(&self, args: &[f64]) -> Result<f64, EvaluationError> {
        debug_assert_eq!(args.len(), self.arity());
        match self {
            Function::Maximum => Ok(args[0].max(args[1])),
            Function::Minimum => Ok(args[0].min(args[1])),
            Function::Abs => Ok(args[0].abs()),
            Function::Exp => {
                let value = args[0].exp();
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(EvaluationError::NonFinite { operation: "exp" })
                }
            }
            Function::Log => {
                if args[0] <= 0.0 {
                    Err(EvaluationError::LogDomain { value: args[0] })
                } else {
                    Ok(args[0].ln())
                }
            }
            Function::Sqrt => {
                if args[0] < 0.0 {
                    Err(EvaluationError::SqrtDomain { value: args[0] })
                } else {
                    Ok(args[0].sqrt())
                }
            }
            // Matches the conventional clip: when low > high the result
            // saturates at high.
            Function::Clip => Ok(args[0].max(args[1]).min(args[2])),
        }
    }
}

/// Resolves a named constant.
pub(crate) fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}
