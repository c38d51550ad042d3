use crate::ast::{tokenize, ASTNode, Operator, Symbol, Token, TokenKind, UnaryOperator};
use crate::ast::DEFAULT_MAX_DEPTH;
use crate::error::{EvalError, Result, SyntaxErrorKind};
use log::debug;

/// Precedence-climbing parser over a token stream.
///
/// The parser knows nothing about the registry: identifiers become
/// `Constant` or `FunctionCall` nodes purely from their syntactic shape.
pub struct ExpressionParser;

impl ExpressionParser {
    pub fn parse_expression(input: &str) -> Result<ASTNode> {
        debug!("Parsing expression: {}", input);
        Self::parse_with_limit(tokenize(input), DEFAULT_MAX_DEPTH)
    }

    pub fn parse<I>(tokens: I) -> Result<ASTNode>
    where
        I: IntoIterator<Item = Result<Token>>,
    {
        Self::parse_with_limit(tokens, DEFAULT_MAX_DEPTH)
    }

    /// Parses `tokens`, failing with `RecursionLimitExceeded` once nesting
    /// goes deeper than `max_depth`.
    pub fn parse_with_limit<I>(tokens: I, max_depth: usize) -> Result<ASTNode>
    where
        I: IntoIterator<Item = Result<Token>>,
    {
        let mut state = ParseState::new(tokens.into_iter(), max_depth)?;
        let ast = state.expression(0, 0)?;
        state.expect_end()?;

        debug!("Parsed expression ending at byte {}", state.current.position);
        Ok(ast)
    }
}

struct ParseState<I> {
    tokens: I,
    current: Token,
    max_depth: usize,
}

impl<I> ParseState<I>
where
    I: Iterator<Item = Result<Token>>,
{
    fn new(mut tokens: I, max_depth: usize) -> Result<Self> {
        let current = match tokens.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::End, 0),
        };

        Ok(Self {
            tokens,
            current,
            max_depth,
        })
    }

    /// Moves to the next token and returns the one just consumed. A stream
    /// that runs dry without an explicit `End` is treated as ending here.
    fn advance(&mut self) -> Result<Token> {
        let next = match self.tokens.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::End, self.current.position),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(EvalError::RecursionLimitExceeded {
                limit: self.max_depth,
            })
        } else {
            Ok(())
        }
    }

    fn peek_operator(&self) -> Option<Operator> {
        match &self.current.kind {
            TokenKind::Operator(symbol) => symbol.binary_operator(),
            _ => None,
        }
    }

    fn unexpected(&self) -> EvalError {
        let kind = match self.current.kind {
            TokenKind::End => SyntaxErrorKind::UnexpectedEnd,
            _ => SyntaxErrorKind::UnexpectedToken,
        };
        EvalError::syntax(kind, self.current.position)
    }

    fn expression(&mut self, min_precedence: u8, depth: usize) -> Result<ASTNode> {
        self.check_depth(depth)?;
        let mut left = self.prefix(depth)?;

        while let Some(operator) = self.peek_operator() {
            let precedence = operator.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance()?;

            let next_min = if operator.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let right = self.expression(next_min, depth + 1)?;
            left = ASTNode::BinaryOperation {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    // A prefix sign covers a following `**` chain: -2**2 is -(2**2).
    fn prefix(&mut self, depth: usize) -> Result<ASTNode> {
        let operator = match self.current.kind {
            TokenKind::Operator(Symbol::Minus) => UnaryOperator::Negate,
            TokenKind::Operator(Symbol::Plus) => UnaryOperator::Plus,
            _ => return self.primary(depth),
        };
        self.advance()?;

        let operand = self.expression(Operator::Power.precedence(), depth + 1)?;
        Ok(ASTNode::UnaryOperation {
            operator,
            operand: Box::new(operand),
        })
    }

    fn primary(&mut self, depth: usize) -> Result<ASTNode> {
        match self.current.kind.clone() {
            TokenKind::Number(value) => {
                self.advance()?;
                Ok(ASTNode::Number(value))
            }
            TokenKind::Identifier(name) => {
                self.advance()?;
                if !self.current.is_symbol(Symbol::LeftParen) {
                    return Ok(ASTNode::Constant(name));
                }

                let open = self.advance()?;
                let argument = self.expression(0, depth + 1)?;
                self.expect_close(&open)?;
                Ok(ASTNode::FunctionCall {
                    name,
                    argument: Box::new(argument),
                })
            }
            TokenKind::Operator(Symbol::LeftParen) => {
                let open = self.advance()?;
                let inner = self.expression(0, depth + 1)?;
                self.expect_close(&open)?;
                Ok(inner)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn expect_close(&mut self, open: &Token) -> Result<()> {
        match self.current.kind {
            TokenKind::Operator(Symbol::RightParen) => {
                self.advance()?;
                Ok(())
            }
            TokenKind::End => Err(EvalError::syntax(
                SyntaxErrorKind::UnmatchedParen,
                open.position,
            )),
            _ => Err(self.unexpected()),
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.current.kind {
            TokenKind::End => Ok(()),
            TokenKind::Operator(Symbol::RightParen) => Err(EvalError::syntax(
                SyntaxErrorKind::UnmatchedParen,
                self.current.position,
            )),
            _ => Err(self.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> Box<ASTNode> {
        Box::new(ASTNode::Number(value))
    }

    fn binary(left: Box<ASTNode>, operator: Operator, right: Box<ASTNode>) -> Box<ASTNode> {
        Box::new(ASTNode::BinaryOperation {
            left,
            operator,
            right,
        })
    }

    fn syntax_error(input: &str) -> (SyntaxErrorKind, usize) {
        match ExpressionParser::parse_expression(input) {
            Err(EvalError::Syntax { kind, position }) => (kind, position),
            other => panic!("expected a syntax error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_simple_binary_expression() {
        let ast = ExpressionParser::parse_expression("1 + 2").unwrap();
        assert_eq!(ast, *binary(number(1.0), Operator::Add, number(2.0)));
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let ast = ExpressionParser::parse_expression("2 + 3 * 4").unwrap();
        let expected = binary(
            number(2.0),
            Operator::Add,
            binary(number(3.0), Operator::Multiply, number(4.0)),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_left_associative_chain() {
        let ast = ExpressionParser::parse_expression("8 - 3 - 2").unwrap();
        let expected = binary(
            binary(number(8.0), Operator::Subtract, number(3.0)),
            Operator::Subtract,
            number(2.0),
        );
        assert_eq!(ast, *expected);

        let ast = ExpressionParser::parse_expression("8 // 3 % 2").unwrap();
        let expected = binary(
            binary(number(8.0), Operator::FloorDivide, number(3.0)),
            Operator::Modulo,
            number(2.0),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let ast = ExpressionParser::parse_expression("2 ** 3 ** 2").unwrap();
        let expected = binary(
            number(2.0),
            Operator::Power,
            binary(number(3.0), Operator::Power, number(2.0)),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_unary_minus_below_power() {
        let ast = ExpressionParser::parse_expression("-2**2").unwrap();
        let expected = ASTNode::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: binary(number(2.0), Operator::Power, number(2.0)),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_unary_operand_of_power() {
        let ast = ExpressionParser::parse_expression("2 ** -1").unwrap();
        let expected = binary(
            number(2.0),
            Operator::Power,
            Box::new(ASTNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: number(1.0),
            }),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_unary_minus_above_multiplication() {
        let ast = ExpressionParser::parse_expression("-2 * 3").unwrap();
        let expected = binary(
            Box::new(ASTNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: number(2.0),
            }),
            Operator::Multiply,
            number(3.0),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_repeated_unary() {
        let ast = ExpressionParser::parse_expression("-+2").unwrap();
        let expected = ASTNode::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(ASTNode::UnaryOperation {
                operator: UnaryOperator::Plus,
                operand: number(2.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_function_call_and_constant() {
        let ast = ExpressionParser::parse_expression("sin(pi / 2)").unwrap();
        let expected = ASTNode::FunctionCall {
            name: "sin".to_string(),
            argument: binary(
                Box::new(ASTNode::Constant("pi".to_string())),
                Operator::Divide,
                number(2.0),
            ),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_unknown_names_still_parse() {
        let ast = ExpressionParser::parse_expression("foo(1)").unwrap();
        assert_eq!(
            ast,
            ASTNode::FunctionCall {
                name: "foo".to_string(),
                argument: number(1.0),
            }
        );
    }

    #[test]
    fn test_grouped_expression() {
        let ast = ExpressionParser::parse_expression("(1 + 2) * 3").unwrap();
        let expected = binary(
            binary(number(1.0), Operator::Add, number(2.0)),
            Operator::Multiply,
            number(3.0),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(syntax_error("(1+2"), (SyntaxErrorKind::UnmatchedParen, 0));
        assert_eq!(syntax_error("1 + (2 * (3)"), (SyntaxErrorKind::UnmatchedParen, 4));
        assert_eq!(syntax_error("1+2)"), (SyntaxErrorKind::UnmatchedParen, 3));
        assert_eq!(syntax_error("sqrt(4"), (SyntaxErrorKind::UnmatchedParen, 4));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(syntax_error("1 +"), (SyntaxErrorKind::UnexpectedEnd, 3));
        assert_eq!(syntax_error("3 + * 5"), (SyntaxErrorKind::UnexpectedToken, 4));
        assert_eq!(syntax_error("-"), (SyntaxErrorKind::UnexpectedEnd, 1));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(syntax_error(""), (SyntaxErrorKind::UnexpectedEnd, 0));
        assert_eq!(syntax_error("()"), (SyntaxErrorKind::UnexpectedToken, 1));
        assert_eq!(syntax_error("sqrt()"), (SyntaxErrorKind::UnexpectedToken, 5));
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(syntax_error("1 2"), (SyntaxErrorKind::UnexpectedToken, 2));
        assert_eq!(syntax_error("1e10"), (SyntaxErrorKind::UnexpectedToken, 1));
        assert_eq!(syntax_error("pi pi"), (SyntaxErrorKind::UnexpectedToken, 3));
    }

    #[test]
    fn test_comma_is_rejected() {
        assert_eq!(syntax_error("pow(2, 3)"), (SyntaxErrorKind::UnexpectedToken, 5));
    }

    #[test]
    fn test_lex_error_propagates() {
        assert!(matches!(
            ExpressionParser::parse_expression("1 + $"),
            Err(EvalError::Lex { position: 4, .. })
        ));
    }

    #[test]
    fn test_parse_collected_tokens() {
        let tokens: Vec<Token> = tokenize("1 - sqrt(4)").collect::<Result<_>>().unwrap();
        let first = ExpressionParser::parse(tokens.clone().into_iter().map(Ok)).unwrap();
        let second = ExpressionParser::parse(tokens.into_iter().map(Ok)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stream_without_end_token() {
        let tokens = vec![
            Ok(Token::new(TokenKind::Number(1.0), 0)),
            Ok(Token::new(TokenKind::Operator(Symbol::Plus), 2)),
            Ok(Token::new(TokenKind::Number(2.0), 4)),
        ];
        let ast = ExpressionParser::parse(tokens).unwrap();
        assert_eq!(ast, *binary(number(1.0), Operator::Add, number(2.0)));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        assert_eq!(
            ExpressionParser::parse_expression(&deep),
            Err(EvalError::RecursionLimitExceeded {
                limit: DEFAULT_MAX_DEPTH
            })
        );

        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(
            ExpressionParser::parse_expression(&shallow).unwrap(),
            ASTNode::Number(1.0)
        );

        assert!(ExpressionParser::parse_with_limit(tokenize("((1))"), 1).is_err());
    }
}
