use crate::error::Error;
use crate::functions::Function;
use crate::token::{Op, Token};
use crate::value::Value;

/// Deepest accepted nesting of operations
const MAX_DEPTH: usize = 1000;

/// Ast nodes for the expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// A constant value
    Value(Value),
    /// -<arg>
    Neg(Box<Ast>),
    /// <left> + <right>
    Add(Box<Ast>, Box<Ast>),
    /// <left> - <right>
    Sub(Box<Ast>, Box<Ast>),
    /// <left> * <right>
    Mul(Box<Ast>, Box<Ast>),
    /// <left> / <right>
    Div(Box<Ast>, Box<Ast>),
    /// <left> % <right>
    Mod(Box<Ast>, Box<Ast>),
    /// <left> ** <right>
    Exp(Box<Ast>, Box<Ast>),
    /// <arg>!
    Factorial(Box<Ast>),
    /// fn(<args>, ...)
    Function(Function, Vec<Ast>),
}

impl Ast {
    /// Construct the AST for a vector of tokens in reverse polish notation.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, Error> {
        // each node is stored with the depth of its subtree
        let mut stack: Vec<(Self, usize)> = Vec::new();
        for token in tokens {
            let node = match token {
                Token::Number(value) => (Self::Value(value), 1),
                Token::Op(op) if op.is_unary() => {
                    let (arg, depth) = pop_operand(&mut stack, "after operator")?;
                    let arg = Box::new(arg);
                    let node = if op == Op::Neg {
                        Self::Neg(arg)
                    } else {
                        Self::Factorial(arg)
                    };
                    (node, depth + 1)
                }
                Token::Op(op) => {
                    let (right, right_depth) = pop_operand(&mut stack, "after operator")?;
                    let (left, left_depth) = pop_operand(&mut stack, "before operator")?;
                    let (left, right) = (Box::new(left), Box::new(right));
                    let node = match op {
                        Op::Plus => Self::Add(left, right),
                        Op::Minus => Self::Sub(left, right),
                        Op::Mul => Self::Mul(left, right),
                        Op::Div => Self::Div(left, right),
                        Op::Mod => Self::Mod(left, right),
                        Op::Exp => Self::Exp(left, right),
                        Op::Neg | Op::Factorial => {
                            unreachable!("unary operators are handled above")
                        }
                    };
                    (node, left_depth.max(right_depth) + 1)
                }
                Token::Call(function, count) => {
                    if stack.len() < count {
                        return Err(Error::syntax(format!(
                            "missing arguments in call to {}",
                            function.name()
                        )));
                    }
                    let args = stack.split_off(stack.len() - count);
                    let depth = args.iter().map(|&(_, depth)| depth).max().unwrap_or(0);
                    let args = args.into_iter().map(|(arg, _)| arg).collect();
                    (Self::Function(function, args), depth + 1)
                }
                other => {
                    return Err(Error::syntax(format!(
                        "unexpected {:?} after shunting yard",
                        other
                    )))
                }
            };
            if node.1 > MAX_DEPTH {
                return Err(Error::syntax("expression is too deeply nested"));
            }
            stack.push(node);
        }

        match (stack.pop(), stack.is_empty()) {
            (Some((ast, _)), true) => Ok(ast),
            (None, _) => Err(Error::syntax("empty expression")),
            (Some(_), false) => Err(Error::syntax("missing operator between operands")),
        }
    }

    /// If the AST node correspond to a constant, get `Some(constant)`. Else,
    /// get `None`
    pub fn value(&self) -> Option<Value> {
        if let Self::Value(value) = *self {
            Some(value)
        } else {
            None
        }
    }
}

fn pop_operand(stack: &mut Vec<(Ast, usize)>, context: &str) -> Result<(Ast, usize), Error> {
    stack
        .pop()
        .ok_or_else(|| Error::syntax(format!("missing operand {}", context)))
}
