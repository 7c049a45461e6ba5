//! Cell formula evaluation.
//!
//! Matrix cells hold either plain numbers or short arithmetic formulas over
//! one named variable (`m` by default), e.g. `np.sqrt(2)`, `10 + 5`, `m * 2`.
//! Formulas are handled by a small recursive-descent parser; no general
//! interpreter is involved.
//!
//! - [`Formula`] — parsed formula, evaluable for any variable value
//! - [`ExpressionEvaluator`] — resolves cells and whole grids into costs
//! - [`parse_variable_input`] — lenient conversion of the variable input box

mod evaluator;
mod formula;
mod lexer;

pub use evaluator::{parse_variable_input, CellValue, ExpressionEvaluator};
pub use formula::{Formula, MAX_FORMULA_DEPTH, MAX_FORMULA_LEN, SQRT_NAMES};

use thiserror::Error;

/// Why a formula failed to parse. Offsets are byte offsets into the cell text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The cell is blank.
    #[error("empty expression")]
    Empty,
    /// A character outside the grammar.
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar {
        /// The character.
        ch: char,
        /// Its position.
        offset: usize,
    },
    /// A malformed numeric literal.
    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber {
        /// The literal text.
        text: String,
        /// Its position.
        offset: usize,
    },
    /// A name other than the variable or `sqrt`.
    #[error("unknown identifier `{name}` at offset {offset}")]
    UnknownIdentifier {
        /// The name.
        name: String,
        /// Its position.
        offset: usize,
    },
    /// A token that cannot start an operand.
    #[error("unexpected {found} at offset {offset}")]
    Unexpected {
        /// Description of the token.
        found: String,
        /// Its position.
        offset: usize,
    },
    /// A required token is missing.
    #[error("expected {expected} at offset {offset}")]
    Expected {
        /// What was expected.
        expected: &'static str,
        /// Where it was expected.
        offset: usize,
    },
    /// Parentheses, `sqrt` calls or signs nest deeper than
    /// [`MAX_FORMULA_DEPTH`].
    #[error("expression nested too deeply at offset {offset}")]
    TooDeep {
        /// Position of the token that crossed the limit.
        offset: usize,
    },
    /// The cell text is longer than [`MAX_FORMULA_LEN`] bytes.
    #[error("expression is {len} bytes long, limit is {max}")]
    TooLong {
        /// Length of the text in bytes.
        len: usize,
        /// The limit.
        max: usize,
    },
    /// Input continues after a complete expression.
    #[error("unexpected {found} after end of expression at offset {offset}")]
    Trailing {
        /// Description of the extra token.
        found: String,
        /// Its position.
        offset: usize,
    },
}
