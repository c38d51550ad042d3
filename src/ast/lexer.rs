use crate::error::{EvalError, LexErrorKind, Result};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LeftParen,
    RightParen,
    Comma,
}

impl Symbol {
    pub fn binary_operator(&self) -> Option<super::Operator> {
        use super::Operator;

        match self {
            Symbol::Plus => Some(Operator::Add),
            Symbol::Minus => Some(Operator::Subtract),
            Symbol::Star => Some(Operator::Multiply),
            Symbol::DoubleStar => Some(Operator::Power),
            Symbol::Slash => Some(Operator::Divide),
            Symbol::DoubleSlash => Some(Operator::FloorDivide),
            Symbol::Percent => Some(Operator::Modulo),
            Symbol::LeftParen | Symbol::RightParen | Symbol::Comma => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Operator(Symbol),
    End,
}

/// A token and the byte offset where it starts in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.kind == TokenKind::Operator(symbol)
    }
}

/// Lazily splits a source string into tokens.
///
/// Yields exactly one `End` token after the last real token, or stops after
/// the first error. Once exhausted it stays exhausted.
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    finished: bool,
}

/// Starts lexing `source`. Nothing is scanned until the lexer is iterated.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            finished: false,
        }
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(0), Some(b) if b.is_ascii_whitespace()) {
            self.position += 1;
        }
    }

    fn advance_while<F>(&mut self, predicate: F)
    where
        F: Fn(u8) -> bool,
    {
        while matches!(self.peek_byte(0), Some(b) if predicate(b)) {
            self.position += 1;
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let start = self.position;
        let byte = match self.peek_byte(0) {
            Some(byte) => byte,
            None => return Ok(Token::new(TokenKind::End, start)),
        };

        if byte.is_ascii_digit() {
            return self.number(start);
        }

        if byte.is_ascii_alphabetic() {
            self.advance_while(|b| b.is_ascii_alphanumeric());
            let name = self.source[start..self.position].to_string();
            return Ok(Token::new(TokenKind::Identifier(name), start));
        }

        let (symbol, width) = match (byte, self.peek_byte(1)) {
            (b'*', Some(b'*')) => (Symbol::DoubleStar, 2),
            (b'/', Some(b'/')) => (Symbol::DoubleSlash, 2),
            (b'+', _) => (Symbol::Plus, 1),
            (b'-', _) => (Symbol::Minus, 1),
            (b'*', _) => (Symbol::Star, 1),
            (b'/', _) => (Symbol::Slash, 1),
            (b'%', _) => (Symbol::Percent, 1),
            (b'(', _) => (Symbol::LeftParen, 1),
            (b')', _) => (Symbol::RightParen, 1),
            (b',', _) => (Symbol::Comma, 1),
            _ => {
                // Only ASCII has been consumed so far, so `start` is a char boundary.
                let character = self.source[start..].chars().next().unwrap_or('\0');
                return Err(EvalError::Lex {
                    kind: LexErrorKind::InvalidCharacter(character),
                    position: start,
                });
            }
        };

        self.position += width;
        Ok(Token::new(TokenKind::Operator(symbol), start))
    }

    fn number(&mut self, start: usize) -> Result<Token> {
        self.advance_while(|b| b.is_ascii_digit());
        if self.peek_byte(0) == Some(b'.') {
            self.position += 1;
            self.advance_while(|b| b.is_ascii_digit());
        }

        let out_of_range = EvalError::Lex {
            kind: LexErrorKind::NumberOutOfRange,
            position: start,
        };
        let value: f64 = self.source[start..self.position]
            .parse()
            .map_err(|_| out_of_range.clone())?;
        if !value.is_finite() {
            return Err(out_of_range);
        }

        Ok(Token::new(TokenKind::Number(value), start))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        match &token {
            Ok(Token {
                kind: TokenKind::End,
                ..
            })
            | Err(_) => self.finished = true,
            Ok(token) => trace!("token {:?}", token),
        }
        Some(token)
    }
}
