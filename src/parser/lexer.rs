use crate::error::{SyntaxError, SyntaxErrorKind};
use std::fmt;

/// A 1-based source position. Line `0` means the position is unknown.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Int(String),
    Float(String),
    Ident(String),
    /// One of `+ - * / ^ ( )`.
    Punct(char),
    Eof,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Int(_) => f.write_str("Int"),
            Lexeme::Float(_) => f.write_str("Float"),
            Lexeme::Ident(_) => f.write_str("Ident"),
            Lexeme::Punct(c) => write!(f, "{:?}", c.to_string()),
            Lexeme::Eof => f.write_str("EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub lexeme: Lexeme,
    pub pos: Position,
}

enum Decoded {
    Char(char, usize),
    Invalid,
    End,
}

/// Splits formula bytes into lexemes, one per [`Lexer::next_token`] call.
pub(crate) struct Lexer<'a> {
    src: &'a [u8],
    i: usize,
    line: usize,
    column: usize,
    last: Option<Position>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            i: 0,
            line: 1,
            column: 1,
            last: None,
        }
    }

    fn decode(&self) -> Decoded {
        let rest = &self.src[self.i..];
        if rest.is_empty() {
            return Decoded::End;
        }
        let chunk = &rest[..rest.len().min(4)];
        let valid = match std::str::from_utf8(chunk) {
            Ok(s) => s,
            Err(e) => match std::str::from_utf8(&chunk[..e.valid_up_to()]) {
                Ok(s) if !s.is_empty() => s,
                _ => return Decoded::Invalid,
            },
        };
        match valid.chars().next() {
            Some(c) => Decoded::Char(c, c.len_utf8()),
            None => Decoded::Invalid,
        }
    }

    fn peek(&self) -> Option<char> {
        match self.decode() {
            Decoded::Char(c, _) => Some(c),
            _ => None,
        }
    }

    fn bump(&mut self) {
        if let Decoded::Char(c, width) = self.decode() {
            self.i += width;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn error(kind: SyntaxErrorKind, pos: Position) -> SyntaxError {
        SyntaxError::new(kind, pos.line, pos.column)
    }

    /// Skips whitespace. An invalid byte met here has no lexeme of its own to
    /// blame, so it is reported at line 0 and the previous lexeme's column.
    fn skip_ws(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.decode() {
                Decoded::Char(' ' | '\t' | '\r' | '\n', _) => self.bump(),
                Decoded::Invalid => {
                    let column = self.last.map_or(0, |pos| pos.column);
                    return Err(Self::error(
                        SyntaxErrorKind::InvalidEncoding,
                        Position { line: 0, column },
                    ));
                }
                _ => return Ok(()),
            }
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<Spanned, SyntaxError> {
        self.skip_ws()?;
        let start = self.here();
        let c = match self.decode() {
            Decoded::Char(c, _) => c,
            Decoded::End => {
                let pos = if self.src.is_empty() {
                    Position::default()
                } else {
                    start
                };
                return Ok(Spanned {
                    lexeme: Lexeme::Eof,
                    pos,
                });
            }
            Decoded::Invalid => {
                return Err(Self::error(SyntaxErrorKind::InvalidEncoding, start))
            }
        };

        let lexeme = match c {
            '+' | '-' | '*' | '/' | '^' | '(' | ')' => {
                self.bump();
                Some(Lexeme::Punct(c))
            }
            c if c.is_ascii_digit() => Some(self.lex_number(start)?),
            '.' => {
                self.bump();
                if self.peek().is_some_and(|d| d.is_ascii_digit()) {
                    Some(self.lex_fraction(start, String::from("."))?)
                } else {
                    None
                }
            }
            c if c == '_' || c.is_alphabetic() => Some(self.lex_ident()),
            _ => {
                self.bump();
                None
            }
        };

        // The byte after a lexeme is inspected while the lexeme is still
        // current, so an invalid sequence right behind it is blamed on it.
        if let Decoded::Invalid = self.decode() {
            return Err(Self::error(SyntaxErrorKind::InvalidEncoding, start));
        }
        self.last = Some(start);

        match lexeme {
            Some(lexeme) => Ok(Spanned { lexeme, pos: start }),
            None => Err(Self::error(
                SyntaxErrorKind::UnexpectedToken(format!("{:?}", c.to_string())),
                start,
            )),
        }
    }

    fn take_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek().filter(|&c| pred(c)) {
            text.push(c);
            self.bump();
        }
    }

    fn lex_number(&mut self, start: Position) -> Result<Lexeme, SyntaxError> {
        let mut text = String::new();
        if self.src[self.i..].starts_with(b"0") {
            text.push('0');
            self.bump();
            if let Some(prefix) = self
                .peek()
                .filter(|&p| matches!(p, 'x' | 'X' | 'b' | 'B' | 'o' | 'O'))
            {
                // Other bases are swallowed whole and rejected by the parser.
                text.push(prefix);
                self.bump();
                self.take_while(&mut text, |c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
                return Ok(Lexeme::Int(text));
            }
        }
        self.take_while(&mut text, |c| c.is_ascii_digit() || c == '_');
        if self.peek() == Some('.') {
            text.push('.');
            self.bump();
            return self.lex_fraction(start, text);
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.lex_exponent(start, &mut text)?;
            return Ok(Lexeme::Float(text));
        }
        Ok(Lexeme::Int(text))
    }

    /// Continues a literal after its decimal point.
    fn lex_fraction(&mut self, start: Position, mut text: String) -> Result<Lexeme, SyntaxError> {
        self.take_while(&mut text, |c| c.is_ascii_digit() || c == '_');
        if matches!(self.peek(), Some('e' | 'E')) {
            self.lex_exponent(start, &mut text)?;
        }
        Ok(Lexeme::Float(text))
    }

    fn lex_exponent(&mut self, start: Position, text: &mut String) -> Result<(), SyntaxError> {
        if let Some(e) = self.peek() {
            text.push(e);
            self.bump();
        }
        if let Some(sign) = self.peek().filter(|&s| matches!(s, '+' | '-')) {
            text.push(sign);
            self.bump();
        }
        if !self.peek().is_some_and(|d| d.is_ascii_digit()) {
            return Err(Self::error(SyntaxErrorKind::ExponentHasNoDigits, start));
        }
        self.take_while(text, |c| c.is_ascii_digit() || c == '_');
        Ok(())
    }

    fn lex_ident(&mut self) -> Lexeme {
        let mut text = String::new();
        self.take_while(&mut text, |c| c == '_' || c.is_alphanumeric());
        Lexeme::Ident(text)
    }
}
