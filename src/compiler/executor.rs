use crate::error::invariant_violation;
use crate::token::Token;

/// Runs a postfix sequence against `values`, using `stack` as the operand
/// stack.
///
/// `stack` is cleared first and keeps its allocation afterwards, so a caller
/// evaluating the same sequence in a loop allocates at most once.
///
/// # Panics
///
/// If a variable's index is out of range for `values`, or if the sequence is
/// not a well-formed postfix sequence with every variable resolved.
pub(crate) fn execute(postfix: &[Token], values: &[f64], stack: &mut Vec<f64>) -> f64 {
    stack.clear();
    for token in postfix {
        match token {
            Token::Float(value) => stack.push(*value),
            Token::Constant(constant) => stack.push(constant.value()),
            Token::Variable {
                index: Some(index), ..
            } => match values.get(*index) {
                Some(value) => stack.push(*value),
                None => panic!(
                    "expression reads value #{index} but only {} values were supplied",
                    values.len()
                ),
            },
            Token::Variable { name, index: None } => {
                invariant_violation(format_args!("variable {name:?} was never resolved"))
            }
            Token::BinaryOp(operator) => {
                let (Some(right), Some(left)) = (stack.pop(), stack.last_mut()) else {
                    invariant_violation(format_args!("operand missing for {}", operator.symbol()))
                };
                *left = operator.apply(*left, right);
            }
            Token::UnaryMinus => match stack.last_mut() {
                Some(top) => *top = -*top,
                None => invariant_violation("operand missing for negation"),
            },
            Token::Function(function) => match stack.last_mut() {
                Some(top) => *top = function.apply(*top),
                None => invariant_violation(format_args!(
                    "argument missing for {}",
                    function.name()
                )),
            },
            Token::LeftParen | Token::RightParen => {
                invariant_violation("parenthesis left in postfix sequence")
            }
        }
    }
    match stack.as_slice() {
        [result] => *result,
        rest => invariant_violation(format_args!(
            "evaluation left {} values on the stack",
            rest.len()
        )),
    }
}

/// Deepest point the operand stack reaches while running `postfix`.
pub(crate) fn stack_depth(postfix: &[Token]) -> usize {
    let mut depth = 0usize;
    let mut max = 0;
    for token in postfix {
        match token {
            Token::Float(_) | Token::Constant(_) | Token::Variable { .. } => {
                depth += 1;
                max = max.max(depth);
            }
            Token::BinaryOp(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}
