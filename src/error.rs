use std::fmt;
use thiserror::Error;

/// What went wrong while lexing or parsing a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("invalid UTF-8 encoding")]
    InvalidEncoding,
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("expected {expected}, got {got}")]
    ExpectedGot { expected: String, got: String },
    #[error("no function named: {0:?}")]
    UnknownFunction(String),
    #[error("invalid float: {0:?}")]
    InvalidFloat(String),
    #[error("exponent has no digits")]
    ExponentHasNoDigits,
    #[error("nesting depth exceeds maximum of {0}")]
    NestingTooDeep(usize),
}

/// A lexical or grammatical error, positioned at the offending lexeme.
///
/// Lines and columns are 1-based. A line of `0` marks a position the lexer
/// could not pin down (see [`SyntaxErrorKind::InvalidEncoding`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column} : {kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// The error text without its position.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Every undeclared variable referenced by the formula, sorted.
    #[error("missing variables: [{}]", .names.join(" "))]
    UnboundVariables { names: Vec<String> },
}

/// Aborts evaluation when an earlier stage broke its guarantees.
///
/// A successfully compiled expression can never reach this; hitting it means
/// the parser or resolver produced a malformed sequence.
#[cold]
#[track_caller]
pub(crate) fn invariant_violation(detail: impl fmt::Display) -> ! {
    panic!("internal invariant violated: {detail}")
}
