use crate::ast::{tokenize, ASTNode, Parser};
use crate::error::{EvalError, Result};
use crate::functions::{Entry, Registry};
use log::{debug, trace};

/// Deepest nesting accepted by default, for both parsing and evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Tree-walking evaluator over the global registry.
///
/// Holds no state between calls; a single instance can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    registry: &'static Registry,
    config: EvaluatorConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self {
            registry: Registry::global(),
            config,
        }
    }

    /// Parse an expression string into an AST, honouring the configured depth limit.
    pub fn parse_expression(&self, expression: &str) -> Result<ASTNode> {
        Parser::parse_with_limit(tokenize(expression), self.config.max_depth)
    }

    /// Parses and evaluates `expression`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the evaluation succeeds.
    /// * `Err(EvalError)` describing the first lexing, parsing or evaluation failure.
    pub fn evaluate_expression(&self, expression: &str) -> Result<f64> {
        let ast = self.parse_expression(expression)?;
        self.evaluate_ast(&ast)
    }

    /// Evaluates an already parsed AST.
    pub fn evaluate_ast(&self, ast: &ASTNode) -> Result<f64> {
        let result = self.evaluate(ast, 0);
        debug!("Evaluation result: {:?}", result);
        result
    }

    fn evaluate(&self, ast: &ASTNode, depth: usize) -> Result<f64> {
        if depth > self.config.max_depth {
            return Err(EvalError::RecursionLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        match ast {
            ASTNode::Number(n) => Ok(*n),

            ASTNode::Constant(name) => match self.registry.lookup(name) {
                Some(Entry::Constant(value)) => Ok(value),
                _ => Err(EvalError::UnknownIdentifier(name.clone())),
            },

            ASTNode::UnaryOperation { operator, operand } => {
                let value = self.evaluate(operand, depth + 1)?;
                Ok(operator.apply(value))
            }

            // A left operand is not nested: `1 + 2 + 3` is as shallow as `1 + 2`.
            // The left spine is walked in a loop and only right operands go deeper.
            ASTNode::BinaryOperation { .. } => {
                let mut chain = Vec::new();
                let mut node = ast;
                while let ASTNode::BinaryOperation {
                    left,
                    operator,
                    right,
                } = node
                {
                    chain.push((*operator, right.as_ref()));
                    node = left.as_ref();
                }

                let mut value = self.evaluate(node, depth)?;
                for (operator, right) in chain.into_iter().rev() {
                    let right_value = self.evaluate(right, depth + 1)?;
                    value = operator.apply(value, right_value)?;
                }
                Ok(value)
            }

            ASTNode::FunctionCall { name, argument } => {
                let value = self.evaluate(argument, depth + 1)?;
                let function = match self.registry.lookup(name) {
                    Some(Entry::Function(function)) => function,
                    _ => return Err(EvalError::UnknownIdentifier(name.clone())),
                };

                trace!("calling {}({})", name, value);
                function.call(name, value)
            }
        }
    }
}
