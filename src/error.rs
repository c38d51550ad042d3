use crate::ast::Operator;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    InvalidCharacter(char),
    /// A literal too large to be represented as a finite `f64`.
    NumberOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedToken,
    UnexpectedEnd,
    UnmatchedParen,
}

/// Every way an expression can fail, from lexing to evaluation.
///
/// Positions are byte offsets into the source expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("{}", describe_lex(.kind, .position))]
    Lex { kind: LexErrorKind, position: usize },

    #[error("{}", describe_syntax(.kind, .position))]
    Syntax {
        kind: SyntaxErrorKind,
        position: usize,
    },

    #[error("Unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("Math domain error: {operation} is undefined for {value}")]
    Domain { operation: String, value: f64 },

    #[error("Division by zero in '{0}'")]
    DivisionByZero(Operator),

    #[error("Expression nested deeper than {limit} levels")]
    RecursionLimitExceeded { limit: usize },
}

impl EvalError {
    pub(crate) fn syntax(kind: SyntaxErrorKind, position: usize) -> Self {
        EvalError::Syntax { kind, position }
    }

    pub(crate) fn domain(operation: &str, value: f64) -> Self {
        EvalError::Domain {
            operation: operation.to_string(),
            value,
        }
    }
}

fn describe_lex(kind: &LexErrorKind, position: &usize) -> String {
    match kind {
        LexErrorKind::InvalidCharacter(c) => {
            format!("Invalid character '{}' at position {}", c, position)
        }
        LexErrorKind::NumberOutOfRange => format!("Number out of range at position {}", position),
    }
}

fn describe_syntax(kind: &SyntaxErrorKind, position: &usize) -> String {
    match kind {
        SyntaxErrorKind::UnexpectedToken => format!("Unexpected token at position {}", position),
        SyntaxErrorKind::UnexpectedEnd => "Unexpected end of expression".to_string(),
        SyntaxErrorKind::UnmatchedParen => {
            format!("Unmatched parenthesis at position {}", position)
        }
    }
}
