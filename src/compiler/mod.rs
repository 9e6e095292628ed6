mod executor;
mod shunting;

use crate::error::CompileError;
use crate::parser::Parser;
use crate::token::{Sequence, Token};
use log::debug;
use rayon::prelude::*;
use std::fmt;

/// A formula compiled to postfix form, ready to be evaluated any number of
/// times.
///
/// A `CompiledExpr` is immutable and can be shared between threads. The
/// operand stack used during evaluation is not part of it: every caller
/// supplies its own scratch buffer to [`CompiledExpr::evaluate_with`], so two
/// evaluations never share mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    postfix: Vec<Token>,
    variables: Vec<String>,
    stack_depth: usize,
}

impl CompiledExpr {
    /// Compiles `formula`, binding its variables to positions in `variables`.
    ///
    /// The formula is taken as bytes so that text which is not valid UTF-8 is
    /// reported as a syntax error rather than rejected by the type system.
    pub fn compile<S>(formula: &S, variables: &[&str]) -> Result<Self, CompileError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let src = formula.as_ref();
        debug!("Compiling formula: {}", String::from_utf8_lossy(src));
        let infix = Parser::new(src).parse()?;
        let resolved = shunting::shunting_yard(infix, variables)?;
        let stack_depth = executor::stack_depth(&resolved.postfix);
        debug!("Postfix sequence: {}", Sequence(&resolved.postfix));
        Ok(Self {
            postfix: resolved.postfix,
            variables: resolved.variables,
            stack_depth,
        })
    }

    /// Evaluates the expression using `scratch` as the operand stack.
    ///
    /// `values[i]` is the value of the `i`-th name declared at compile time.
    /// Names that were declared but not used may be omitted from the tail.
    /// `scratch` is cleared before use; pass the same buffer to every call
    /// to avoid allocating.
    ///
    /// # Panics
    ///
    /// If `values` is too short for a variable the expression reads.
    pub fn evaluate_with(&self, values: &[f64], scratch: &mut Vec<f64>) -> f64 {
        executor::execute(&self.postfix, values, scratch)
    }

    /// Evaluates the expression with a freshly allocated scratch buffer.
    ///
    /// # Panics
    ///
    /// If `values` is too short for a variable the expression reads.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.evaluate_with(values, &mut self.scratch())
    }

    /// Evaluates every row of `rows` in parallel. Each worker thread gets its
    /// own scratch buffer. Results are in row order.
    pub fn evaluate_batch<V>(&self, rows: &[V]) -> Vec<f64>
    where
        V: AsRef<[f64]> + Sync,
    {
        rows.par_iter()
            .map_init(
                || self.scratch(),
                |scratch, row| self.evaluate_with(row.as_ref(), scratch),
            )
            .collect()
    }

    /// An empty scratch buffer large enough that evaluation never grows it.
    pub fn scratch(&self) -> Vec<f64> {
        Vec::with_capacity(self.stack_depth)
    }

    /// Names of the variables the expression reads, in first-seen order.
    /// Each name appears once, however often the formula references it.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Maximum number of operands on the stack during evaluation.
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }
}

impl fmt::Display for CompiledExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Sequence(&self.postfix))
    }
}
