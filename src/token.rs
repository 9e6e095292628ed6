use std::fmt;

/// Binary operators in infix position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Power => 4,
            Operator::Multiply | Operator::Divide => 3,
            Operator::Add | Operator::Subtract => 2,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Power)
    }

    /// IEEE-754 arithmetic: dividing by zero yields a signed infinity or NaN.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            other => Err(other),
        }
    }
}

/// The unary functions a formula may call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Ln,
    Abs,
    Cos,
    Sin,
    Tan,
    Acos,
    Asin,
    Atan,
    Sqrt,
    Cbrt,
    Ceil,
    Floor,
}

impl Function {
    pub const ALL: [Function; 12] = [
        Function::Ln,
        Function::Abs,
        Function::Cos,
        Function::Sin,
        Function::Tan,
        Function::Acos,
        Function::Asin,
        Function::Atan,
        Function::Sqrt,
        Function::Cbrt,
        Function::Ceil,
        Function::Floor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Ln => "ln",
            Function::Abs => "abs",
            Function::Cos => "cos",
            Function::Sin => "sin",
            Function::Tan => "tan",
            Function::Acos => "acos",
            Function::Asin => "asin",
            Function::Atan => "atan",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Ceil => "ceil",
            Function::Floor => "floor",
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Function::Ln => x.ln(),
            Function::Abs => x.abs(),
            Function::Cos => x.cos(),
            Function::Sin => x.sin(),
            Function::Tan => x.tan(),
            Function::Acos => x.acos(),
            Function::Asin => x.asin(),
            Function::Atan => x.atan(),
            Function::Sqrt => x.sqrt(),
            Function::Cbrt => x.cbrt(),
            Function::Ceil => x.ceil(),
            Function::Floor => x.floor(),
        }
    }
}

impl TryFrom<&str> for Function {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Function::ALL
            .into_iter()
            .find(|function| function.name() == value)
            .ok_or(())
    }
}

/// Named mathematical constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    E,
    Pi,
    Phi,
    Sqrt2,
    SqrtE,
    SqrtPi,
    SqrtPhi,
}

impl Constant {
    pub const ALL: [Constant; 7] = [
        Constant::E,
        Constant::Pi,
        Constant::Phi,
        Constant::Sqrt2,
        Constant::SqrtE,
        Constant::SqrtPi,
        Constant::SqrtPhi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Constant::E => "E",
            Constant::Pi => "PI",
            Constant::Phi => "PHI",
            Constant::Sqrt2 => "SQRT2",
            Constant::SqrtE => "SQRTE",
            Constant::SqrtPi => "SQRTPI",
            Constant::SqrtPhi => "SQRTPHI",
        }
    }

    pub fn value(self) -> f64 {
        use std::f64::consts;

        match self {
            Constant::E => consts::E,
            Constant::Pi => consts::PI,
            Constant::Phi => 1.618_033_988_749_895,
            Constant::Sqrt2 => consts::SQRT_2,
            Constant::SqrtE => 1.648_721_270_700_128_2,
            Constant::SqrtPi => 1.772_453_850_905_516,
            Constant::SqrtPhi => 1.272_019_649_514_069,
        }
    }
}

impl TryFrom<&str> for Constant {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Constant::ALL
            .into_iter()
            .find(|constant| constant.name() == value)
            .ok_or(())
    }
}

/// One element of an infix or postfix token sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Constant(Constant),
    LeftParen,
    RightParen,
    Function(Function),
    BinaryOp(Operator),
    UnaryMinus,
    Float(f64),
    /// `index` is the position in the declared variable names, filled in by
    /// the resolver.
    Variable { name: String, index: Option<usize> },
}

impl Token {
    pub(crate) fn variable(name: impl Into<String>) -> Self {
        Token::Variable {
            name: name.into(),
            index: None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Constant(constant) => f.write_str(constant.name()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Function(function) => f.write_str(function.name()),
            Token::BinaryOp(operator) => write!(f, "{}", operator.symbol()),
            Token::UnaryMinus => f.write_str("neg"),
            Token::Float(value) => write!(f, "{value}"),
            Token::Variable { name, .. } => f.write_str(name),
        }
    }
}

/// Renders a token sequence as space-separated tokens, e.g. `5 y +`.
pub(crate) struct Sequence<'a>(pub &'a [Token]);

impl fmt::Display for Sequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
