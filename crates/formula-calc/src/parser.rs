//! Formula parser
//!
//! A recursive descent parser over the resolved token stream. Every identifier
//! is checked against the constant and function tables here, so the evaluator
//! only ever sees validated nodes.

use crate::ast::{BinaryOperator, Constant, Expr, UnaryOperator};
use crate::error::{EvalError, EvalResult};
use crate::functions::Function;
use crate::lexer::{Operator, Span, Token};
use crate::options::EvalOptions;

/// Parse a resolved token stream into an AST using default limits
///
/// # Example
/// ```rust
/// use formula_calc::{parse, tokenize, BinaryOperator, Expr};
///
/// let ast = parse(&tokenize("1 + 2 * 3").unwrap()).unwrap();
/// assert!(matches!(ast, Expr::BinaryOp { op: BinaryOperator::Add, .. }));
/// ```
pub fn parse(tokens: &[Token]) -> EvalResult<Expr> {
    parse_with(tokens, &EvalOptions::default())
}

/// Parse a resolved token stream into an AST
pub fn parse_with(tokens: &[Token], options: &EvalOptions) -> EvalResult<Expr> {
    parse_tokens(tokens, None, options)
}

/// Formula text and per-token spans, used to quote tokens in error messages
/// the way the user wrote them
#[derive(Debug, Clone, Copy)]
pub(crate) struct Source<'a> {
    pub text: &'a str,
    pub spans: &'a [Span],
}

pub(crate) fn parse_tokens(
    tokens: &[Token],
    source: Option<Source<'_>>,
    options: &EvalOptions,
) -> EvalResult<Expr> {
    let mut parser = Parser::new(tokens, source, options.max_depth);

    if matches!(parser.current_token(), Token::Eof) {
        return Err(EvalError::syntax("Empty expression"));
    }

    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    match parser.current_token() {
        Token::Eof => Ok(expr),
        Token::RParen => Err(EvalError::syntax("Unmatched ')'")),
        _ => Err(EvalError::syntax(format!(
            "Unexpected '{}' after complete expression",
            parser.spelling(parser.pos)
        ))),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    source: Option<Source<'a>>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: Option<Source<'a>>, max_depth: usize) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    // === Token access ===

    fn current_token(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> &'a Token {
        let token = self.current_token();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// The token at `index` as written in the formula, if the text is known
    fn spelling(&self, index: usize) -> String {
        let token = self.tokens.get(index).unwrap_or(&Token::Eof);
        if matches!(token, Token::Eof) {
            return token.to_string();
        }
        self.source
            .and_then(|source| {
                let span = source.spans.get(index)?;
                source.text.get(span.clone())
            })
            .map_or_else(|| token.to_string(), str::to_string)
    }

    fn expect_rparen(&mut self, context: &str) -> EvalResult<()> {
        match self.current_token() {
            Token::RParen => {
                self.consume();
                Ok(())
            }
            Token::Eof => Err(EvalError::syntax(format!(
                "Unmatched '(': expected ')' {}",
                context
            ))),
            _ => Err(EvalError::syntax(format!(
                "Expected ')' {}, got '{}'",
                context,
                self.spelling(self.pos)
            ))),
        }
    }

    /// Run `f` one nesting level deeper
    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        if self.depth >= self.max_depth {
            return Err(EvalError::syntax(format!(
                "Formula nests deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: -, +
    // 4. Exponentiation: ^ (right associative, right operand may be unary)
    // 5. Primary: numbers, constants, function calls, parentheses

    fn parse_expression(&mut self) -> EvalResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Operator(Operator::Plus) => BinaryOperator::Add,
                Token::Operator(Operator::Minus) => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Operator(Operator::Star) => BinaryOperator::Multiply,
                Token::Operator(Operator::Slash) => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> EvalResult<Expr> {
        match self.current_token() {
            Token::Operator(Operator::Minus) => {
                self.consume();
                let operand = self.descend(Self::parse_unary)?;
                Ok(Expr::unary(UnaryOperator::Negate, operand))
            }
            // Prefix plus (no-op)
            Token::Operator(Operator::Plus) => {
                self.consume();
                self.descend(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> EvalResult<Expr> {
        let base = self.parse_primary()?;

        if matches!(self.current_token(), Token::Operator(Operator::Caret)) {
            self.consume();
            // Right associative: 2^3^2 = 2^(3^2), and 2^-1 is allowed
            let exponent = self.descend(Self::parse_unary)?;
            return Ok(Expr::binary(BinaryOperator::Power, base, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> EvalResult<Expr> {
        let index = self.pos;
        match self.consume() {
            Token::Number(n) => Ok(Expr::Literal(*n)),

            Token::LParen => {
                if matches!(self.current_token(), Token::RParen) {
                    return Err(EvalError::syntax("Empty parentheses"));
                }
                let expr = self.descend(Self::parse_expression)?;
                self.expect_rparen("to close group")?;
                Ok(expr)
            }

            Token::Identifier(name) => {
                if matches!(self.current_token(), Token::LParen) {
                    return self.parse_call(name);
                }
                if let Some(constant) = Constant::from_name(name) {
                    return Ok(Expr::Constant(constant));
                }
                match Function::from_name(name) {
                    Some(function) => Err(EvalError::syntax(format!(
                        "Function '{}' must be called with arguments",
                        function
                    ))),
                    None => Err(EvalError::syntax(format!("Unknown identifier '{}'", name))),
                }
            }

            Token::Placeholder(name) => Err(EvalError::syntax(format!(
                "Unresolved placeholder '${}'",
                name
            ))),

            Token::Eof => Err(EvalError::syntax(
                "Unexpected end of formula, expected an operand",
            )),

            _ => Err(EvalError::syntax(format!(
                "Unexpected '{}', expected an operand",
                self.spelling(index)
            ))),
        }
    }

    fn parse_call(&mut self, name: &str) -> EvalResult<Expr> {
        let function = match Function::from_name(name) {
            Some(function) => function,
            None if Constant::from_name(name).is_some() => {
                return Err(EvalError::syntax(format!(
                    "'{}' is a constant, not a function",
                    name
                )))
            }
            None => return Err(EvalError::domain(format!("Unknown function '{}'", name))),
        };

        // Skip '('
        self.consume();

        let mut args = Vec::new();
        if !matches!(self.current_token(), Token::RParen) {
            args.push(self.descend(Self::parse_expression)?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume();
                args.push(self.descend(Self::parse_expression)?);
            }
        }

        self.expect_rparen(&format!("to close call to {}", function))?;
        function.check_arity(args.len())?;

        Ok(Expr::Call { function, args })
    }
}
