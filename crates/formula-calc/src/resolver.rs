//! Placeholder binding
//!
//! Placeholders bind to arguments by order of first distinct appearance in
//! the formula. The spelling only matters for recognising repeats: in
//! `$b + $a` the first argument goes to `$b`.

use crate::error::{EvalError, EvalResult};
use crate::lexer::Token;
use ahash::AHashMap;

/// Replace every placeholder token with the number bound to it
///
/// Extra arguments beyond the number of distinct placeholders are ignored.
/// Output tokens line up one to one with the input, so spans from
/// [`tokenize_spanned`](crate::tokenize_spanned) still apply.
///
/// # Example
/// ```rust
/// use formula_calc::{resolve, tokenize, Token};
///
/// let tokens = resolve(tokenize("$x + $x").unwrap(), &[5.0]).unwrap();
/// assert_eq!(tokens[0], Token::Number(5.0));
/// assert_eq!(tokens[2], Token::Number(5.0));
/// ```
pub fn resolve(tokens: Vec<Token>, args: &[f64]) -> EvalResult<Vec<Token>> {
    let mut bindings: AHashMap<String, usize> = AHashMap::new();

    tokens
        .into_iter()
        .map(|token| match token {
            Token::Placeholder(name) => {
                let next = bindings.len();
                let index = *bindings.entry(name.clone()).or_insert(next);
                args.get(index).map(|&value| Token::Number(value)).ok_or(
                    EvalError::Argument {
                        name,
                        index,
                        supplied: args.len(),
                    },
                )
            }
            other => Ok(other),
        })
        .collect()
}
