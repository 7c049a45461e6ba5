//! Recursive-descent parser and evaluator for cell formulas.
//!
//! # Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := NUMBER | VARIABLE | SQRT '(' expr ')' | '(' expr ')'
//! ```
//!
//! `SQRT` is spelled `sqrt` or `np.sqrt`. `VARIABLE` is the single name the
//! formula was parsed with; every other identifier is rejected.

use super::lexer::{tokenize, Token, TokenKind};
use super::ParseError;

/// Names accepted for the square-root function.
pub const SQRT_NAMES: [&str; 2] = ["sqrt", "np.sqrt"];

/// Deepest accepted nesting of parentheses, `sqrt` calls and unary signs.
pub const MAX_FORMULA_DEPTH: usize = 256;

/// Longest accepted formula text, in bytes. Also bounds the depth of
/// operator chains such as `1 + 1 + ... + 1`.
pub const MAX_FORMULA_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Number(f64),
    Variable,
    Neg(Box<Node>),
    Sqrt(Box<Node>),
    Binary(BinOp, Box<Node>, Box<Node>),
}

impl Node {
    fn eval(&self, value: f64) -> f64 {
        match self {
            Node::Number(v) => *v,
            Node::Variable => value,
            Node::Neg(inner) => -inner.eval(value),
            Node::Sqrt(inner) => inner.eval(value).sqrt(),
            Node::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(value), rhs.eval(value));
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                }
            }
        }
    }

    fn mentions_variable(&self) -> bool {
        match self {
            Node::Number(_) => false,
            Node::Variable => true,
            Node::Neg(inner) | Node::Sqrt(inner) => inner.mentions_variable(),
            Node::Binary(_, lhs, rhs) => lhs.mentions_variable() || rhs.mentions_variable(),
        }
    }
}

/// A parsed cell formula.
///
/// Parsing happens once; the formula can then be evaluated for any value of
/// its variable. Evaluation follows IEEE-754 arithmetic, so division by zero
/// or the square root of a negative number yields a non-finite result that
/// callers are expected to range-check.
///
/// # Examples
///
/// ```
/// use u_tour::expr::Formula;
///
/// let f = Formula::parse("m * 2 + np.sqrt(16)", "m").unwrap();
/// assert_eq!(f.eval(3.0), 10.0);
/// assert_eq!(f.eval(0.0), 4.0);
/// assert!(f.uses_variable());
///
/// assert!(Formula::parse("cos(1)", "m").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    root: Node,
}

impl Formula {
    /// Parses `text`, treating `variable` as the only free name.
    pub fn parse(text: &str, variable: &str) -> Result<Self, ParseError> {
        if text.len() > MAX_FORMULA_LEN {
            return Err(ParseError::TooLong {
                len: text.len(),
                max: MAX_FORMULA_LEN,
            });
        }
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            depth: 0,
            variable,
            end: text.len(),
        };
        let root = parser.expr()?;
        if let Some(tok) = parser.peek() {
            return Err(ParseError::Trailing {
                found: tok.kind.describe(),
                offset: tok.offset,
            });
        }
        Ok(Self { root })
    }

    /// Evaluates the formula with the variable bound to `value`.
    pub fn eval(&self, value: f64) -> f64 {
        self.root.eval(value)
    }

    /// Returns `true` if the formula references its variable.
    pub fn uses_variable(&self) -> bool {
        self.root.mentions_variable()
    }
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    variable: &'t str,
    end: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.end, |t| t.offset)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected,
                offset: self.offset(),
            })
        }
    }

    /// Runs `f` one nesting level deeper, failing at `offset` past the limit.
    fn nested<T>(
        &mut self,
        offset: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_FORMULA_DEPTH {
            return Err(ParseError::TooDeep { offset });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat(&TokenKind::Plus) {
                BinOp::Add
            } else if self.eat(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = if self.eat(&TokenKind::Star) {
                BinOp::Mul
            } else if self.eat(&TokenKind::Slash) {
                BinOp::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.unary()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        let offset = self.offset();
        if self.eat(&TokenKind::Minus) {
            let inner = self.nested(offset, Self::unary)?;
            return Ok(Node::Neg(Box::new(inner)));
        }
        if self.eat(&TokenKind::Plus) {
            return self.nested(offset, Self::unary);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let offset = self.offset();
        let Some(tok) = self.next() else {
            return Err(ParseError::Expected {
                expected: "a number, variable or `(`",
                offset,
            });
        };
        match &tok.kind {
            TokenKind::Number(v) => Ok(Node::Number(*v)),
            TokenKind::LParen => {
                let inner = self.nested(tok.offset, Self::expr)?;
                self.expect(&TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::Ident(name) if name == self.variable => Ok(Node::Variable),
            TokenKind::Ident(name) if SQRT_NAMES.contains(&name.as_str()) => {
                self.expect(&TokenKind::LParen, "`(` after sqrt")?;
                let arg = self.nested(tok.offset, Self::expr)?;
                self.expect(&TokenKind::RParen, "`)`")?;
                Ok(Node::Sqrt(Box::new(arg)))
            }
            TokenKind::Ident(name) => Err(ParseError::UnknownIdentifier {
                name: name.clone(),
                offset: tok.offset,
            }),
            other => Err(ParseError::Unexpected {
                found: other.describe(),
                offset: tok.offset,
            }),
        }
    }
}
