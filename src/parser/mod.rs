//! Recursive-descent parser producing the infix token sequence.
//!
//! ```text
//! expr  := unit (binaryOp unit)*
//! unit  := float
//!        | '(' expr ')'
//!        | '-' unit
//!        | ident ( '(' expr ')' )?
//! ```

pub(crate) mod lexer;

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::token::{Constant, Function, Operator, Token};
use lexer::{Lexeme, Lexer, Spanned};
use log::debug;

/// Maximum number of nested units (parentheses, negations, calls).
pub const MAX_DEPTH: usize = 256;

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    look: Spanned,
    tokens: Vec<Token>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self {
            lexer: Lexer::new(src),
            look: Spanned {
                lexeme: Lexeme::Eof,
                pos: Default::default(),
            },
            tokens: Vec::new(),
            depth: 0,
        }
    }

    /// Parses the whole input into an infix sequence.
    pub(crate) fn parse(mut self) -> Result<Vec<Token>, SyntaxError> {
        self.consume()?;
        self.expr()?;
        self.expect(&Lexeme::Eof)?;
        debug!("Parsed infix sequence: {}", crate::token::Sequence(&self.tokens));
        Ok(self.tokens)
    }

    fn consume(&mut self) -> Result<(), SyntaxError> {
        self.look = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.look.pos.line, self.look.pos.column)
    }

    fn expect(&self, lexeme: &Lexeme) -> Result<(), SyntaxError> {
        if &self.look.lexeme == lexeme {
            return Ok(());
        }
        Err(self.error(SyntaxErrorKind::ExpectedGot {
            expected: lexeme.to_string(),
            got: self.look.lexeme.to_string(),
        }))
    }

    fn binary_operator(&self) -> Option<Operator> {
        match self.look.lexeme {
            Lexeme::Punct(c) => Operator::try_from(c).ok(),
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<(), SyntaxError> {
        self.unit()?;
        while let Some(operator) = self.binary_operator() {
            self.tokens.push(Token::BinaryOp(operator));
            self.consume()?;
            self.unit()?;
        }
        Ok(())
    }

    fn unit(&mut self) -> Result<(), SyntaxError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(SyntaxErrorKind::NestingTooDeep(MAX_DEPTH)));
        }
        self.depth += 1;
        let result = match &self.look.lexeme {
            Lexeme::Int(text) | Lexeme::Float(text) => {
                let text = text.clone();
                self.float(&text)
            }
            Lexeme::Punct('(') => self.nested(),
            Lexeme::Punct('-') => self.neg(),
            Lexeme::Ident(name) => {
                let name = name.clone();
                self.ident(name)
            }
            other => Err(self.error(SyntaxErrorKind::UnexpectedToken(other.to_string()))),
        };
        self.depth -= 1;
        result
    }

    fn float(&mut self, text: &str) -> Result<(), SyntaxError> {
        let invalid = || self.error(SyntaxErrorKind::InvalidFloat(text.to_string()));
        let value: f64 = text.parse().map_err(|_| invalid())?;
        // Overflow is out of range. Underflow to zero is accepted.
        if value.is_infinite() {
            return Err(invalid());
        }
        self.tokens.push(Token::Float(value));
        self.consume()
    }

    fn neg(&mut self) -> Result<(), SyntaxError> {
        self.tokens.push(Token::UnaryMinus);
        self.consume()?;
        self.unit()
    }

    fn ident(&mut self, name: String) -> Result<(), SyntaxError> {
        self.consume()?;
        if self.look.lexeme == Lexeme::Punct('(') {
            let function = Function::try_from(name.as_str())
                .map_err(|_| self.error(SyntaxErrorKind::UnknownFunction(name)))?;
            self.tokens.push(Token::Function(function));
            return self.nested();
        }
        let token = match Constant::try_from(name.as_str()) {
            Ok(constant) => Token::Constant(constant),
            Err(_) => Token::variable(name),
        };
        self.tokens.push(token);
        Ok(())
    }

    fn nested(&mut self) -> Result<(), SyntaxError> {
        self.tokens.push(Token::LeftParen);
        self.consume()?;
        self.expr()?;
        self.expect(&Lexeme::Punct(')'))?;
        self.consume()?;
        self.tokens.push(Token::RightParen);
        Ok(())
    }
}
