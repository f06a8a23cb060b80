//! Tree-walking evaluator over validated expressions.
//!
//! Evaluation never panics: every domain rule violation surfaces as an
//! [`EvaluationError`], and any operation producing a non-finite value is
//! an error rather than a NaN that would silently poison the sample mean.

use crate::ast::{BinaryOp, BoolOp, CompareOp, UnaryOp};
use crate::context::PayoffContext;
use crate::error::EvaluationError;
use crate::validate::{CheckedExpr, Var};

/// Evaluates a checked expression for one terminal price.
pub(crate) fn evaluate(
    expr: &CheckedExpr,
    terminal_price: f64,
    context: &PayoffContext,
) -> Result<f64, EvaluationError> {
    match expr {
        CheckedExpr::Number(value) => Ok(*value),

        CheckedExpr::Var(var) => Ok(match var {
            Var::Terminal => terminal_price,
            Var::Strike => context.strike,
            Var::Spot => context.spot,
            Var::Rate => context.rate,
        }),

        CheckedExpr::Unary { op, operand } => {
            let value = evaluate(operand, terminal_price, context)?;
            Ok(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Pos => value,
            })
        }

        CheckedExpr::Binary { op, lhs, rhs } => {
            let lhs = evaluate(lhs, terminal_price, context)?;
            let rhs = evaluate(rhs, terminal_price, context)?;
            apply_binary(*op, lhs, rhs)
        }

        CheckedExpr::Compare { op, lhs, rhs } => {
            let lhs = evaluate(lhs, terminal_price, context)?;
            let rhs = evaluate(rhs, terminal_price, context)?;
            let holds = match op {
                CompareOp::Lt => lhs < rhs,
                CompareOp::Le => lhs <= rhs,
                CompareOp::Gt => lhs > rhs,
                CompareOp::Ge => lhs >= rhs,
                CompareOp::Eq => lhs == rhs,
                CompareOp::Ne => lhs != rhs,
            };
            Ok(if holds { 1.0 } else { 0.0 })
        }

        CheckedExpr::Bool { op, lhs, rhs } => {
            let lhs = evaluate(lhs, terminal_price, context)? != 0.0;
            let rhs = evaluate(rhs, terminal_price, context)? != 0.0;
            let holds = match op {
                BoolOp::And => lhs && rhs,
                BoolOp::Or => lhs || rhs,
            };
            Ok(if holds { 1.0 } else { 0.0 })
        }

        // Only the taken branch is evaluated, so a formula may guard a
        // partial function: `log(S_T - K) if S_T > K else 0`.
        CheckedExpr::Conditional {
            condition,
            then,
            otherwise,
        } => {
            if evaluate(condition, terminal_price, context)? != 0.0 {
                evaluate(then, terminal_price, context)
            } else {
                evaluate(otherwise, terminal_price, context)
            }
        }

        CheckedExpr::Call { function, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(evaluate(arg, terminal_price, context)?);
            }
            function.apply(&values)
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
    match op {
        BinaryOp::Add => finite(lhs + rhs, op.symbol()),
        BinaryOp::Sub => finite(lhs - rhs, op.symbol()),
        BinaryOp::Mul => finite(lhs * rhs, op.symbol()),
        BinaryOp::Div => {
            if rhs == 0.0 {
                Err(EvaluationError::DivisionByZero)
            } else {
                finite(lhs / rhs, op.symbol())
            }
        }
        BinaryOp::Mod => {
            if rhs == 0.0 {
                Err(EvaluationError::ModuloByZero)
            } else {
                // Floored modulo: result carries the sign of the divisor.
                finite(lhs - rhs * (lhs / rhs).floor(), op.symbol())
            }
        }
        BinaryOp::Pow => {
            let value = lhs.powf(rhs);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(EvaluationError::PowDomain {
                    base: lhs,
                    exponent: rhs,
                })
            }
        }
    }
}

#[inline]
fn finite(value: f64, operation: &'static str) -> Result<f64, EvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFinite { operation })
    }
}
