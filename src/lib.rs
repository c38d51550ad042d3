//! Safe evaluation of arithmetic expressions.
//!
//! An expression is lexed, parsed into an [`ASTNode`] tree and walked by an
//! [`Evaluator`]. Only the grammar below and the names in the closed
//! [`functions::Registry`] are understood; nothing else can be reached.
//!
//! ```text
//! expr    := term (('+'|'-') term)*
//! term    := unary (('*'|'/'|'%'|'//') unary)*
//! unary   := ('+'|'-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | IDENT | IDENT '(' expr ')' | '(' expr ')'
//! ```

pub mod ast;
pub mod calculator;
pub mod error;
pub mod functions;

pub use ast::{ASTNode, Evaluator, EvaluatorConfig, Operator, Parser, DEFAULT_MAX_DEPTH};
pub use error::{EvalError, LexErrorKind, Result, SyntaxErrorKind};

use log::debug;
use rayon::prelude::*;

/// Evaluates `expression` with the default configuration.
pub fn evaluate(expression: &str) -> Result<f64> {
    evaluate_with(expression, &EvaluatorConfig::default())
}

pub fn evaluate_with(expression: &str, config: &EvaluatorConfig) -> Result<f64> {
    debug!("Evaluating expression: {}", expression);
    let result = Evaluator::with_config(*config).evaluate_expression(expression);
    if let Err(err) = &result {
        debug!("Evaluation of {:?} failed: {}", expression, err);
    }
    result
}

/// Evaluates independent expressions in parallel. Results keep the input order.
pub fn evaluate_batch(expressions: &[&str]) -> Vec<Result<f64>> {
    expressions
        .par_iter()
        .map(|expression| evaluate(expression))
        .collect()
}
