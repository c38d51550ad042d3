use crate::error::{EvalError, Result};
use std::fmt;

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::{Evaluator, EvaluatorConfig, DEFAULT_MAX_DEPTH};
pub use lexer::{tokenize, Lexer, Symbol, Token, TokenKind};
pub use parser::ExpressionParser as Parser;

/// Parsed form of an expression. Every node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    /// A bare identifier, resolved against the registry when evaluated.
    Constant(String),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        argument: Box<ASTNode>,
    },
}

impl ASTNode {
    // Moves the children out, leaving placeholder leaves behind.
    fn take_children(&mut self, pending: &mut Vec<ASTNode>) {
        match self {
            ASTNode::Number(_) | ASTNode::Constant(_) => {}
            ASTNode::UnaryOperation { operand, .. } => pending.push(take(operand)),
            ASTNode::BinaryOperation { left, right, .. } => {
                pending.push(take(left));
                pending.push(take(right));
            }
            ASTNode::FunctionCall { argument, .. } => pending.push(take(argument)),
        }
    }
}

fn take(child: &mut ASTNode) -> ASTNode {
    std::mem::replace(child, ASTNode::Number(0.0))
}

/// Long operator chains build trees as deep as the input is long, so the
/// tree is torn down with a work list instead of recursive drops.
impl Drop for ASTNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Plus,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -operand,
            UnaryOperator::Plus => operand,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    FloorDivide,
    Power,
}

impl Operator {
    pub fn apply(&self, left: f64, right: f64) -> Result<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(EvalError::DivisionByZero(*self))
                } else {
                    Ok(left / right)
                }
            }
            Operator::Modulo => {
                if right == 0.0 {
                    Err(EvalError::DivisionByZero(*self))
                } else {
                    Ok(floored_remainder(left, right))
                }
            }
            Operator::FloorDivide => {
                if right == 0.0 {
                    Err(EvalError::DivisionByZero(*self))
                } else {
                    Ok((left / right).floor())
                }
            }
            Operator::Power => {
                let result = left.powf(right);
                if result.is_finite() {
                    Ok(result)
                } else {
                    Err(EvalError::domain(self.symbol(), left))
                }
            }
        }
    }

    /// Binding strength used by the parser; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide | Operator::Modulo | Operator::FloorDivide => 2,
            Operator::Power => 3,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Power)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::FloorDivide => "//",
            Operator::Power => "**",
        }
    }
}

// The remainder takes the sign of the divisor: -7 % 3 == 2.
fn floored_remainder(left: f64, right: f64) -> f64 {
    let remainder = left % right;
    if remainder != 0.0 && (remainder < 0.0) != (right < 0.0) {
        remainder + right
    } else {
        remainder
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Modulo),
            "//" => Ok(Operator::FloorDivide),
            "**" => Ok(Operator::Power),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}
