//! Formula error types

use std::fmt;
use thiserror::Error;

/// Result type for formula operations
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while lexing, binding, parsing or evaluating a formula.
///
/// Each stage reports through its own variant; the first failure aborts the
/// whole evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Formula was absent, empty or whitespace only
    #[error("Formula cannot be empty")]
    EmptyFormula,

    /// Unrecognized character in the input
    #[error("Unexpected character '{character}' at offset {offset}")]
    Lex { character: char, offset: usize },

    /// A placeholder has no corresponding argument
    #[error(
        "No argument supplied for placeholder '${name}' (argument #{index}, {supplied} supplied)"
    )]
    Argument {
        name: String,
        index: usize,
        supplied: usize,
    },

    /// Malformed grammar
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Non-finite result or unknown function
    #[error("Domain error: {0}")]
    Domain(String),
}

impl EvalError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        EvalError::Syntax(message.into())
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        EvalError::Domain(message.into())
    }

    /// The flat classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::EmptyFormula => ErrorKind::EmptyFormula,
            EvalError::Lex { .. } => ErrorKind::Lex,
            EvalError::Argument { .. } => ErrorKind::Argument,
            EvalError::Syntax(_) => ErrorKind::Syntax,
            EvalError::Domain(_) => ErrorKind::Domain,
        }
    }
}

/// Error classification surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    #[cfg_attr(feature = "serde", serde(rename = "EmptyFormulaError"))]
    EmptyFormula,
    #[cfg_attr(feature = "serde", serde(rename = "LexError"))]
    Lex,
    #[cfg_attr(feature = "serde", serde(rename = "ArgumentError"))]
    Argument,
    #[cfg_attr(feature = "serde", serde(rename = "SyntaxError"))]
    Syntax,
    #[cfg_attr(feature = "serde", serde(rename = "DomainError"))]
    Domain,
}

impl ErrorKind {
    /// Name of the kind as callers see it
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptyFormula => "EmptyFormulaError",
            ErrorKind::Lex => "LexError",
            ErrorKind::Argument => "ArgumentError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Domain => "DomainError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(EvalError::EmptyFormula.kind(), ErrorKind::EmptyFormula);
        assert_eq!(
            EvalError::Lex {
                character: '#',
                offset: 3
            }
            .kind(),
            ErrorKind::Lex
        );
        assert_eq!(EvalError::syntax("x").kind(), ErrorKind::Syntax);
        assert_eq!(EvalError::domain("x").kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_messages() {
        let err = EvalError::Argument {
            name: "price".into(),
            index: 1,
            supplied: 1,
        };
        assert_eq!(
            err.to_string(),
            "No argument supplied for placeholder '$price' (argument #1, 1 supplied)"
        );
        assert_eq!(
            EvalError::Lex {
                character: '#',
                offset: 2
            }
            .to_string(),
            "Unexpected character '#' at offset 2"
        );
        assert_eq!(ErrorKind::Domain.to_string(), "DomainError");
    }
}
