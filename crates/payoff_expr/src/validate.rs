//! Whitelist validation of parsed expressions.
//!
//! A single walk over the raw [`Expr`] tree checks every node against the
//! allowed vocabulary and produces a [`CheckedExpr`], a tree that can only
//! reference whitelisted variables and functions with correct arity. The
//! evaluator works on the checked tree, so nothing outside the whitelist
//! is ever reachable at evaluation time.

use crate::ast::{BinaryOp, BoolOp, CompareOp, Expr, UnaryOp};
use crate::error::ExpressionError;
use crate::functions::{constant, Function};

/// A whitelisted variable reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Var {
    /// The free variable `S_T`: simulated terminal price.
    Terminal,
    /// The bound scalar `K`.
    Strike,
    /// The bound scalar `S0`.
    Spot,
    /// The bound scalar `r`.
    Rate,
}

/// Expression tree after whitelist validation.
///
/// Named constants are folded to literals here, and function names are
/// resolved to [`Function`] values with their arity already checked.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CheckedExpr {
    Number(f64),
    Var(Var),
    Unary {
        op: UnaryOp,
        operand: Box<CheckedExpr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<CheckedExpr>,
        rhs: Box<CheckedExpr>,
    },
    Compare {
        op: CompareOp,
        lhs: Box<CheckedExpr>,
        rhs: Box<CheckedExpr>,
    },
    Bool {
        op: BoolOp,
        lhs: Box<CheckedExpr>,
        rhs: Box<CheckedExpr>,
    },
    Conditional {
        condition: Box<CheckedExpr>,
        then: Box<CheckedExpr>,
        otherwise: Box<CheckedExpr>,
    },
    Call {
        function: Function,
        args: Vec<CheckedExpr>,
    },
}

/// Validates a raw expression against the whitelist.
///
/// # Errors
///
/// - [`ExpressionError::UnknownIdentifier`] for any name that is not
///   `S_T`, `K`, `S0`, `r`, `pi` or `e`;
/// - [`ExpressionError::UnknownFunction`] for a call to a name outside
///   the function whitelist;
/// - [`ExpressionError::WrongArity`] when a whitelisted function is
///   called with the wrong number of arguments.
pub(crate) fn resolve(expr: &Expr) -> Result<CheckedExpr, ExpressionError> {
    match expr {
        Expr::Number(value) => Ok(CheckedExpr::Number(*value)),

        Expr::Ident(name) => match name.as_str() {
            "S_T" => Ok(CheckedExpr::Var(Var::Terminal)),
            "K" => Ok(CheckedExpr::Var(Var::Strike)),
            "S0" => Ok(CheckedExpr::Var(Var::Spot)),
            "r" => Ok(CheckedExpr::Var(Var::Rate)),
            other => match constant(other) {
                Some(value) => Ok(CheckedExpr::Number(value)),
                // A bare function name is not a value in this language.
                None => Err(ExpressionError::UnknownIdentifier {
                    name: other.to_string(),
                }),
            },
        },

        Expr::Unary { op, operand } => Ok(CheckedExpr::Unary {
            op: *op,
            operand: Box::new(resolve(operand)?),
        }),

        Expr::Binary { op, lhs, rhs } => Ok(CheckedExpr::Binary {
            op: *op,
            lhs: Box::new(resolve(lhs)?),
            rhs: Box::new(resolve(rhs)?),
        }),

        Expr::Compare { op, lhs, rhs } => Ok(CheckedExpr::Compare {
            op: *op,
            lhs: Box::new(resolve(lhs)?),
            rhs: Box::new(resolve(rhs)?),
        }),

        Expr::Bool { op, lhs, rhs } => Ok(CheckedExpr::Bool {
            op: *op,
            lhs: Box::new(resolve(lhs)?),
            rhs: Box::new(resolve(rhs)?),
        }),

        Expr::Conditional {
            condition,
            then,
            otherwise,
        } => Ok(CheckedExpr::Conditional {
            condition: Box::new(resolve(condition)?),
            then: Box::new(resolve(then)?),
            otherwise: Box::new(resolve(otherwise)?),
        }),

        Expr::Call { function, args } => {
            let resolved =
                Function::from_name(function).ok_or_else(|| ExpressionError::UnknownFunction {
                    name: function.clone(),
                })?;
            if args.len() != resolved.arity() {
                return Err(ExpressionError::WrongArity {
                    name: resolved.name().to_string(),
                    expected: resolved.arity(),
                    found: args.len(),
                });
            }
            let args = args.iter().map(resolve).collect::<Result<Vec<_>, _>>()?;
            Ok(CheckedExpr::Call {
                function: resolved,
                args,
            })
        }
    }
}
