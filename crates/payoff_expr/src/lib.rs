//! # Payoff Expression Language
//!
//! A safely-evaluable expression language for option payoffs over a
//! terminal asset price. A formula such as `maximum(S_T - K, 0)` is
//! parsed, validated against a fixed whitelist, and compiled into a
//! [`CompiledPayoff`]: a pure function of the terminal price `S_T`,
//! closed over an explicit [`PayoffContext`] binding `K`, `S0` and `r`.
//!
//! ## Safety Model
//!
//! No host-language evaluation primitive is involved anywhere. The text
//! is parsed into an abstract syntax tree, and a single validation walk
//! resolves every node against the whitelist before evaluation:
//!
//! - names: the free variable `S_T`, the bound scalars `K`, `S0`, `r`,
//!   and the constants `pi`, `e`;
//! - operators: `+ - * / % **`, unary `-`/`+`, comparisons
//!   (`< <= > >= == !=`, producing 0/1 values usable arithmetically),
//!   `and`/`or`, and the conditional `a if cond else b`;
//! - functions: `maximum`, `minimum`, `max`, `min` (two-argument
//!   pairwise; `max`/`min` are aliases), `abs`, `exp`, `log`, `sqrt`,
//!   `clip(value, low, high)`.
//!
//! Anything else is rejected with an [`ExpressionError`] naming the
//! offending construct, before any simulation work begins. The resolved
//! tree the evaluator walks cannot represent a call or name outside the
//! whitelist at all.
//!
//! ## Domain Failures
//!
//! Evaluating a well-formed payoff can still violate a numeric domain
//! rule (`log` of a non-positive value, division by zero, overflow).
//! These surface as [`EvaluationError`], a separate family from
//! [`ExpressionError`], and never as a silent NaN.
//!
//! ## Example
//!
//! ```
//! use payoff_expr::{compile, PayoffContext};
//!
//! let context = PayoffContext::new(100.0, 100.0, 0.03);
//! let payoff = compile("maximum(S_T - K, 0)", context).unwrap();
//!
//! assert_eq!(payoff.evaluate(110.0).unwrap(), 10.0);
//! assert_eq!(payoff.evaluate(90.0).unwrap(), 0.0);
//! ```

mod ast;
mod context;
mod error;
mod eval;
mod functions;
mod parser;
mod token;
mod validate;

pub use context::PayoffContext;
pub use error::{EvaluationError, ExpressionError};

use validate::CheckedExpr;

/// A compiled payoff: a pure function of the terminal price.
///
/// Holds the validated expression tree and the bound scalars. It has no
/// interior mutability and no side effects, so one instance may be
/// invoked repeatedly and shared freely across threads.
///
/// # Examples
/// ```
/// use payoff_expr::{compile, PayoffContext};
///
/// let payoff = compile("(S_T > K) * 1", PayoffContext::new(100.0, 100.0, 0.03)).unwrap();
///
/// // Digital payoff: comparisons produce 0/1 values.
/// assert_eq!(payoff.evaluate(120.0).unwrap(), 1.0);
/// assert_eq!(payoff.evaluate(80.0).unwrap(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct CompiledPayoff {
    expr: CheckedExpr,
    context: PayoffContext,
}

impl CompiledPayoff {
    /// Evaluates the payoff for one terminal price.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] on the first numeric-domain violation;
    /// the result is never NaN or infinite.
    pub fn evaluate(&self, terminal_price: f64) -> Result<f64, EvaluationError> {
        eval::evaluate(&self.expr, terminal_price, &self.context)
    }

    /// Returns the bound scalars this payoff closes over.
    #[inline]
    pub fn context(&self) -> &PayoffContext {
        &self.context
    }
}

/// Compiles a payoff expression against a context.
///
/// Parsing and whitelist validation both happen here; a successfully
/// compiled payoff can only fail with numeric-domain errors afterwards.
/// Expressions are short and requests infrequent relative to simulation
/// cost, so recompiling per pricing request is the intended usage.
///
/// # Errors
///
/// Returns [`ExpressionError`] for syntax errors, unknown identifiers,
/// unknown functions, or wrong arity.
///
/// # Examples
/// ```
/// use payoff_expr::{compile, ExpressionError, PayoffContext};
///
/// let context = PayoffContext::default();
///
/// assert!(compile("clip(S_T - K, 0, 20)", context).is_ok());
///
/// // Disallowed constructs are rejected before any evaluation.
/// let err = compile("S_T + __import__(1)", context).unwrap_err();
/// assert_eq!(
///     err,
///     ExpressionError::UnknownFunction { name: "__import__".to_string() }
/// );
/// ```
pub fn compile(
    expression: &str,
    context: PayoffContext,
) -> Result<CompiledPayoff, ExpressionError> {
    let parsed = parser::parse(expression)?;
    let expr = validate::resolve(&parsed)?;
    Ok(CompiledPayoff { expr, context })
}
