use crate::ast::Ast;
use crate::base::NumeralBase;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::math;
use crate::state::{AngleMode, EngineState};
use crate::value::{real_to_i64, Value};
use log::trace;

/// Evaluate a canonical expression with the modes of `state`.
///
/// Literals are read in the numeral base of the state. Outside of decimal
/// mode the result is truncated toward zero to an integer, as a programmer
/// calculator does.
///
/// # Example
///
/// ```
/// use crunchcalc::{evaluate, EngineState, Error, Value};
///
/// let state = EngineState::new();
/// assert_eq!(evaluate("45-2**3", &state), Ok(Value::Integer(37)));
/// assert_eq!(evaluate("sin(90)", &state), Ok(Value::Real(1.0)));
/// assert_eq!(evaluate("5/0", &state), Err(Error::DivisionByZero));
/// ```
pub fn evaluate(canonical: &str, state: &EngineState) -> Result<Value, Error> {
    let base = state.numeral_base();
    let value = Expr::parse_with_base(canonical, base)?.eval(state.angle_mode())?;
    if base == NumeralBase::Decimal {
        Ok(value)
    } else {
        truncate(value).map(Value::Integer)
    }
}

/// Truncate a value toward zero for programmer mode
fn truncate(value: Value) -> Result<i64, Error> {
    let real = value
        .as_real()
        .ok_or_else(|| Error::domain("complex result in programmer mode"))?;
    real_to_i64(real.trunc()).ok_or_else(|| Error::overflow("result does not fit in 64 bits"))
}

/// A parsed mathematical expression.
///
/// # Examples
/// ```
/// use crunchcalc::{AngleMode, Expr, Value};
///
/// let expr = Expr::parse("3+5*2").unwrap();
/// assert_eq!(expr.eval(AngleMode::Degrees), Ok(Value::Integer(13)));
///
/// let expr = Expr::parse("sqrt(16)").unwrap();
/// assert_eq!(expr.eval(AngleMode::Radians), Ok(Value::Real(4.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given canonical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use crunchcalc::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3+5*2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff+5*2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        Self::parse_with_base(expression, NumeralBase::Decimal)
    }

    /// Parse the given canonical `expression`, reading unprefixed literals
    /// in `base`.
    pub fn parse_with_base(expression: &str, base: NumeralBase) -> Result<Self, Error> {
        let tokens = Lexer::with_base(expression, base).parse()?;
        trace!("reverse polish notation for {:?}: {:?}", expression, tokens);
        Ast::from_tokens(tokens).map(|ast| Self { ast })
    }

    /// Evaluate the expression, with trigonometric functions working in
    /// `mode`.
    pub fn eval(&self, mode: AngleMode) -> Result<Value, Error> {
        Self::inner_eval(&self.ast, mode).map(Value::normalized)
    }

    /// The syntax tree of the expression
    #[must_use]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    fn inner_eval(ast: &Ast, mode: AngleMode) -> Result<Value, Error> {
        match *ast {
            Ast::Value(value) => Ok(value),
            Ast::Neg(ref arg) => Self::inner_eval(arg, mode)?.checked_neg(),
            Ast::Add(ref left, ref right) => {
                Self::inner_eval(left, mode)?.checked_add(Self::inner_eval(right, mode)?)
            }
            Ast::Sub(ref left, ref right) => {
                Self::inner_eval(left, mode)?.checked_sub(Self::inner_eval(right, mode)?)
            }
            Ast::Mul(ref left, ref right) => {
                Self::inner_eval(left, mode)?.checked_mul(Self::inner_eval(right, mode)?)
            }
            Ast::Div(ref left, ref right) => {
                Self::inner_eval(left, mode)?.checked_div(Self::inner_eval(right, mode)?)
            }
            Ast::Mod(ref left, ref right) => {
                Self::inner_eval(left, mode)?.checked_rem(Self::inner_eval(right, mode)?)
            }
            Ast::Exp(ref left, ref right) => {
                Self::inner_eval(left, mode)?.checked_pow(Self::inner_eval(right, mode)?)
            }
            Ast::Factorial(ref arg) => math::factorial(Self::inner_eval(arg, mode)?),
            Ast::Function(function, ref args) => {
                let args = args
                    .iter()
                    .map(|arg| Self::inner_eval(arg, mode))
                    .collect::<Result<Vec<_>, _>>()?;
                math::apply(function, &args, mode)
            }
        }
    }
}
