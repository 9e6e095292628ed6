use crate::error::CompileError;
use crate::stack::Stack;
use crate::token::{Operator, Token};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Postfix sequence plus the variable names it reads, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolved {
    pub postfix: Vec<Token>,
    pub variables: Vec<String>,
}

/// Whether `top` must leave the operator stack before `incoming` is pushed.
fn yields_to(top: &Token, incoming: Operator) -> bool {
    match top {
        Token::UnaryMinus | Token::Function(_) => true,
        Token::BinaryOp(top) => {
            top.precedence() > incoming.precedence()
                || (top.precedence() == incoming.precedence() && !incoming.is_right_associative())
        }
        _ => false,
    }
}

/// Reorders an infix sequence into postfix and binds every variable to its
/// position in `declared`.
///
/// Unknown variables do not stop the pass; all of them are reported together
/// once the sequence has been walked.
pub(crate) fn shunting_yard(infix: Vec<Token>, declared: &[&str]) -> Result<Resolved, CompileError> {
    let index: HashMap<&str, usize> = declared
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i))
        .collect();

    let mut postfix = Vec::with_capacity(infix.len());
    let mut operators = Stack::new();
    let mut missing = BTreeSet::new();

    for token in infix {
        match token {
            Token::UnaryMinus | Token::Function(_) | Token::LeftParen => operators.push(token),
            Token::BinaryOp(incoming) => {
                while operators.peek().is_some_and(|top| yields_to(top, incoming)) {
                    postfix.extend(operators.pop());
                }
                operators.push(token);
            }
            Token::RightParen => {
                while let Some(top) = operators.pop() {
                    if top == Token::LeftParen {
                        break;
                    }
                    postfix.push(top);
                }
            }
            Token::Variable { name, .. } => {
                let resolved = index.get(name.as_str()).copied();
                if resolved.is_none() {
                    missing.insert(name.clone());
                }
                postfix.push(Token::Variable {
                    name,
                    index: resolved,
                });
            }
            Token::Constant(_) | Token::Float(_) => postfix.push(token),
        }
    }
    operators.empty_into(&mut postfix);

    if !missing.is_empty() {
        let names: Vec<String> = missing.into_iter().collect();
        debug!("Unbound variables: {names:?}");
        return Err(CompileError::UnboundVariables { names });
    }

    let mut variables: Vec<String> = Vec::new();
    for token in &postfix {
        if let Token::Variable { name, .. } = token {
            if !variables.contains(name) {
                variables.push(name.clone());
            }
        }
    }
    Ok(Resolved { postfix, variables })
}
