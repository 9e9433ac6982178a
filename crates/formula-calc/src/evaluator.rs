//! Formula evaluator
//!
//! Evaluates formula ASTs to produce finite `f64` values.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{EvalError, EvalResult};

/// Evaluate a formula expression
///
/// Every node's value passes the same finiteness check, so a NaN or infinity
/// anywhere in the tree (`1/0`, `sqrt(-1)`, overflow, a non-finite argument)
/// fails the whole evaluation instead of being absorbed by a later operation.
pub fn evaluate_expr(expr: &Expr) -> EvalResult<f64> {
    match expr {
        Expr::Literal(n) => check_finite(*n, || "literal value".to_string()),

        Expr::Constant(constant) => Ok(constant.value()),

        Expr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand),

        Expr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right),

        Expr::Call { function, args } => {
            let mut evaluated_args = Vec::with_capacity(args.len());
            for arg in args {
                evaluated_args.push(evaluate_expr(arg)?);
            }

            let result = function.call(&evaluated_args)?;
            check_finite(result, || format!("{}({})", function, join(&evaluated_args)))
        }
    }
}

/// Evaluate a binary operation
///
/// The left spine of a chain like `1 + 2 + ... + n` is walked in a loop, so
/// stack use does not grow with the number of operators. Right operands recurse.
fn evaluate_binary_op(op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<f64> {
    let mut pending = vec![(op, right)];
    let mut leftmost = left;
    while let Expr::BinaryOp { op, left, right } = leftmost {
        pending.push((*op, &**right));
        leftmost = &**left;
    }

    // Left to right, innermost operation first
    let mut acc = evaluate_expr(leftmost)?;
    for (op, right) in pending.into_iter().rev() {
        let r = evaluate_expr(right)?;
        acc = apply_binary_op(op, acc, r)?;
    }
    Ok(acc)
}

fn apply_binary_op(op: BinaryOperator, l: f64, r: f64) -> EvalResult<f64> {
    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        // Division by zero is left to the finiteness check
        BinaryOperator::Divide => l / r,
        BinaryOperator::Power => l.powf(r),
    };

    check_finite(result, || format!("{} of {} and {}", op, l, r))
}

/// Evaluate a unary operation
fn evaluate_unary_op(op: UnaryOperator, operand: &Expr) -> EvalResult<f64> {
    let n = evaluate_expr(operand)?;

    match op {
        UnaryOperator::Negate => Ok(-n),
    }
}

fn check_finite(value: f64, operation: impl FnOnce() -> String) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::domain(format!(
            "{} produced a non-finite result ({})",
            operation(),
            value
        )))
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
