//! Compiles infix arithmetic formulas to postfix form and evaluates them
//! against caller-supplied variable values.
//!
//! ```
//! let expr = rpncalc::compile("5 + y", &["y", "z"]).unwrap();
//! let mut scratch = expr.scratch();
//! assert_eq!(expr.evaluate_with(&[10.0], &mut scratch), 15.0);
//! assert_eq!(expr.variables(), ["y"]);
//! ```

pub mod compiler;
pub mod error;
pub mod parser;
pub mod token;

mod stack;

pub use compiler::CompiledExpr;
pub use error::{CompileError, SyntaxError, SyntaxErrorKind};
pub use token::{Constant, Function, Operator, Token};

/// A variable name and the value to bind to it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Var<'a> {
    pub name: &'a str,
    pub value: f64,
}

impl<'a> Var<'a> {
    pub fn new(name: &'a str, value: f64) -> Self {
        Self { name, value }
    }
}

impl<'a> From<(&'a str, f64)> for Var<'a> {
    fn from((name, value): (&'a str, f64)) -> Self {
        Self { name, value }
    }
}

/// Compiles `formula` against the declared variable names.
pub fn compile<S>(formula: &S, variables: &[&str]) -> Result<CompiledExpr, CompileError>
where
    S: AsRef<[u8]> + ?Sized,
{
    CompiledExpr::compile(formula, variables)
}

/// Compiles and evaluates `formula` once.
pub fn evaluate_once<S>(formula: &S, bindings: &[Var<'_>]) -> Result<f64, CompileError>
where
    S: AsRef<[u8]> + ?Sized,
{
    let names: Vec<&str> = bindings.iter().map(|var| var.name).collect();
    let values: Vec<f64> = bindings.iter().map(|var| var.value).collect();
    let expr = compile(formula, &names)?;
    Ok(expr.evaluate(&values))
}
