//! # formula-calc
//!
//! Lexer, parser and evaluator for small arithmetic formulas.
//!
//! This crate provides:
//! - Tokenization (text → tokens)
//! - Placeholder binding (`$name` → caller-supplied arguments, by order of
//!   first appearance)
//! - Parsing (tokens → AST) with precedence, associativity and arity checks
//! - Evaluation (AST → finite `f64`)
//!
//! Every call is independent: there is no global state, so evaluation is
//! safe from any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use formula_calc::{evaluate, ErrorKind};
//!
//! assert_eq!(evaluate("$quantity * $price", &[4.0, 6.0]).unwrap(), 24.0);
//! assert_eq!(evaluate("sqrt($a^2 + $b^2)", &[3.0, 4.0]).unwrap(), 5.0);
//! assert_eq!(evaluate("1 / 0", &[]).unwrap_err().kind(), ErrorKind::Domain);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod resolver;

pub use ast::{BinaryOperator, Constant, Expr, UnaryOperator};
pub use error::{ErrorKind, EvalError, EvalResult};
pub use evaluator::evaluate_expr;
pub use functions::Function;
pub use lexer::{tokenize, tokenize_spanned, Operator, Span, Token};
pub use options::EvalOptions;
pub use parser::{parse, parse_with};
pub use resolver::resolve;

/// Evaluate a formula with positional arguments using default limits
pub fn evaluate(formula: &str, args: &[f64]) -> EvalResult<f64> {
    evaluate_with(formula, args, &EvalOptions::default())
}

/// Evaluate a formula that may be absent; `None` is an empty formula
pub fn evaluate_opt(formula: Option<&str>, args: &[f64]) -> EvalResult<f64> {
    evaluate(formula.ok_or(EvalError::EmptyFormula)?, args)
}

/// Evaluate a formula with positional arguments
///
/// Placeholders (`$name`) bind to `args` in order of first distinct
/// appearance. Fails with the first error any stage reports.
pub fn evaluate_with(formula: &str, args: &[f64], options: &EvalOptions) -> EvalResult<f64> {
    if formula.trim().is_empty() {
        return Err(EvalError::EmptyFormula);
    }

    let length = formula.chars().count();
    if length > options.max_length {
        return Err(EvalError::Syntax(format!(
            "Formula is {} characters long, limit is {}",
            length, options.max_length
        )));
    }

    tracing::debug!(formula, args = args.len(), "evaluating formula");

    let result = tokenize_spanned(formula).and_then(|spanned| {
        let (tokens, spans): (Vec<Token>, Vec<Span>) = spanned.into_iter().unzip();
        let tokens = resolve(tokens, args)?;
        let source = parser::Source {
            text: formula,
            spans: &spans,
        };
        let ast = parser::parse_tokens(&tokens, Some(source), options)?;
        evaluate_expr(&ast)
    });

    match &result {
        Ok(value) => tracing::debug!(value, "formula evaluated"),
        Err(e) => tracing::debug!(kind = %e.kind(), error = %e, "formula rejected"),
    }

    result
}
