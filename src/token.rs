use crate::functions::Function;
use crate::value::Value;

/// Possible tokens to find in a canonical expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal
    Number(Value),
    /// A function or constant name
    Ident(String),
    /// An operator
    Op(Op),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Function arguments separator
    Comma,
    /// A function call with its number of arguments. Only found in the
    /// output of the shunting-yard algorithm.
    Call(Function, usize),
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Exp,
    /// Unary minus
    Neg,
    /// Postfix `!`
    Factorial,
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Neg => 3,
            Self::Exp => 4,
            Self::Factorial => 5,
        }
    }

    /// Check if the operator is left associative
    pub fn is_left_associative(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div | Self::Mod | Self::Factorial => true,
            Self::Exp | Self::Neg => false,
        }
    }

    /// Check if the operator takes a single operand
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Neg | Self::Factorial)
    }
}

#[cfg(test)]
mod tests {
    use super::Op;

    #[test]
    fn precedence() {
        assert!(Op::Mul.precedence() > Op::Plus.precedence());
        assert_eq!(Op::Mod.precedence(), Op::Div.precedence());
        assert!(Op::Exp.precedence() > Op::Neg.precedence());
        assert!(Op::Neg.precedence() > Op::Mul.precedence());
        assert!(!Op::Exp.is_left_associative());
        assert!(Op::Minus.is_left_associative());
        assert!(Op::Neg.is_unary() && !Op::Minus.is_unary());
    }
}
