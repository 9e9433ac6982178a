//! Formula lexer
//!
//! Turns formula text into a flat token stream terminated by [`Token::Eof`].

use crate::error::{EvalError, EvalResult};
use std::fmt;
use std::ops::Range;

/// Byte range a token occupies in the formula text
pub type Span = Range<usize>;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    /// Exponentiation, spelled `^` or `**`
    Caret,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Caret => "^",
        }
    }
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// Constant or function name, original spelling
    Identifier(String),
    /// `$name`, stored without the `$`
    Placeholder(String),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(name) => f.write_str(name),
            Token::Placeholder(name) => write!(f, "${}", name),
            Token::Operator(op) => f.write_str(op.symbol()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Eof => f.write_str("end of formula"),
        }
    }
}

/// Tokenize a formula
///
/// # Example
/// ```rust
/// use formula_calc::{tokenize, Operator, Token};
///
/// let tokens = tokenize("2 ** $x").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Number(2.0),
///         Token::Operator(Operator::Caret),
///         Token::Placeholder("x".into()),
///         Token::Eof,
///     ]
/// );
/// ```
pub fn tokenize(formula: &str) -> EvalResult<Vec<Token>> {
    Ok(tokenize_spanned(formula)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

/// Tokenize a formula, pairing each token with its [`Span`]
///
/// The trailing [`Token::Eof`] gets an empty span at the end of the text.
pub fn tokenize_spanned(formula: &str) -> EvalResult<Vec<(Token, Span)>> {
    let mut lexer = Lexer::new(formula);
    let mut tokens = Vec::new();

    loop {
        lexer.skip_whitespace();
        let start = lexer.pos;
        let token = lexer.scan_token()?;
        let done = token == Token::Eof;
        tokens.push((token, start..lexer.pos));
        if done {
            break;
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized formula");
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn scan_token(&mut self) -> EvalResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        // Single-character tokens
        let single = match c {
            '+' => Some(Token::Operator(Operator::Plus)),
            '-' => Some(Token::Operator(Operator::Minus)),
            '/' => Some(Token::Operator(Operator::Slash)),
            '^' => Some(Token::Operator(Operator::Caret)),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        // `*` or `**`
        if c == '*' {
            self.advance();
            if self.peek_char() == Some('*') {
                self.advance();
                return Ok(Token::Operator(Operator::Caret));
            }
            return Ok(Token::Operator(Operator::Star));
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if is_ident_start(c) {
            return Ok(Token::Identifier(self.scan_identifier().to_string()));
        }

        if c == '$' {
            if self.peek_char_at(1).map_or(false, is_ident_start) {
                self.advance();
                return Ok(Token::Placeholder(self.scan_identifier().to_string()));
            }
            return Err(self.unexpected(c));
        }

        Err(self.unexpected(c))
    }

    fn scan_number(&mut self) -> EvalResult<Token> {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part, only when digits follow so `2e` stays `2` and `e`
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let digits_at = match self.peek_char_at(1) {
                Some('+') | Some('-') => 2,
                _ => 1,
            };
            if self
                .peek_char_at(digits_at)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>().map(Token::Number).map_err(|_| {
            EvalError::Lex {
                character: text.chars().next().unwrap_or('.'),
                offset: start,
            }
        })
    }

    fn scan_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        &self.input[start..self.pos]
    }

    fn unexpected(&self, character: char) -> EvalError {
        EvalError::Lex {
            character,
            offset: self.pos,
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
