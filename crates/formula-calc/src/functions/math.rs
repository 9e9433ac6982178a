//! Math functions
//!
//! Callers guarantee the arity. Results are not checked for finiteness here;
//! the evaluator gates every call result.

use crate::error::{EvalError, EvalResult};

/// SQRT(number)
pub fn fn_sqrt(args: &[f64]) -> EvalResult<f64> {
    let n = args[0];
    if n < 0.0 {
        return Err(EvalError::domain(format!(
            "sqrt of negative number {}",
            n
        )));
    }
    Ok(n.sqrt())
}

/// POW(base, exponent) - same as base^exponent
pub fn fn_pow(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].powf(args[1]))
}

/// ABS(number)
pub fn fn_abs(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].abs())
}

/// ROUND(number) - nearest integer, ties toward positive infinity
/// round(2.5) = 3, round(-2.5) = -2
pub fn fn_round(args: &[f64]) -> EvalResult<f64> {
    let n = args[0];
    let floor = n.floor();
    // n - floor is exact for finite n
    if n - floor >= 0.5 {
        Ok(floor + 1.0)
    } else {
        Ok(floor)
    }
}

/// FLOOR(number)
pub fn fn_floor(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].floor())
}

/// CEIL(number)
pub fn fn_ceil(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].ceil())
}

/// MIN(a, b, ...)
pub fn fn_min(args: &[f64]) -> EvalResult<f64> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

/// MAX(a, b, ...)
pub fn fn_max(args: &[f64]) -> EvalResult<f64> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// SIN(angle in radians)
pub fn fn_sin(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].sin())
}

/// COS(angle in radians)
pub fn fn_cos(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].cos())
}

/// TAN(angle in radians)
pub fn fn_tan(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].tan())
}

/// LOG(number) - natural logarithm
pub fn fn_log(args: &[f64]) -> EvalResult<f64> {
    let n = args[0];
    if n <= 0.0 {
        return Err(EvalError::domain(format!(
            "log of non-positive number {}",
            n
        )));
    }
    Ok(n.ln())
}

/// EXP(number)
pub fn fn_exp(args: &[f64]) -> EvalResult<f64> {
    Ok(args[0].exp())
}
