//! Function library used by the evaluator.
//!
//! Floating point functions come from `libm`, so that results do not depend
//! on the platform C library. Inputs outside of a function domain are
//! reported as [`Error::DomainError`] instead of producing a NaN.

use crate::error::Error;
use crate::functions::Function;
use crate::state::AngleMode;
use crate::value::{checked, real_to_i64, Value};

/// Largest `n` such that `n!` fits in an `i64`
const MAX_INTEGER_FACTORIAL: i64 = 20;
/// Largest `n` such that `n!` fits in an `f64`
const MAX_REAL_FACTORIAL: i64 = 170;

/// Apply `function` to already evaluated `args`.
///
/// The number of arguments must be in `function.arity()`.
pub fn apply(function: Function, args: &[Value], mode: AngleMode) -> Result<Value, Error> {
    match (function, args) {
        (Function::NthRoot, &[x, n]) => nthroot(x, n),
        (Function::Pow, &[x, y]) => x.checked_pow(y),
        (Function::Round, &[x]) => round(x),
        (Function::Round, &[x, digits]) => round_to(x, digits),
        (Function::Abs, &[x]) => abs(x),
        (Function::Cbrt, &[x]) => cbrt(x),
        (Function::Factorial, &[x]) => factorial(x),
        (Function::Ceil, &[x]) => integral(libm::ceil, x, function),
        (Function::Floor, &[x]) => integral(libm::floor, x, function),
        (_, &[x]) => {
            let x = real_argument(x, function)?;
            let result = match function {
                Function::Sqrt => sqrt(x)?,
                Function::Sin => sin(x, mode)?,
                Function::Cos => cos(x, mode)?,
                Function::Tan => tan(x, mode)?,
                Function::Asin => asin(x, mode)?,
                Function::Acos => acos(x, mode)?,
                Function::Atan => atan(x, mode),
                Function::Sinh => checked(libm::sinh(x))?,
                Function::Cosh => checked(libm::cosh(x))?,
                Function::Tanh => libm::tanh(x),
                Function::Log => log(x)?,
                Function::Ln => ln(x)?,
                Function::Exp => checked(libm::exp(x))?,
                Function::Degrees => checked(x.to_degrees())?,
                Function::Radians => x.to_radians(),
                _ => return Err(arity_error(function, args.len())),
            };
            Ok(Value::Real(result))
        }
        _ => Err(arity_error(function, args.len())),
    }
}

fn arity_error(function: Function, count: usize) -> Error {
    Error::syntax(format!(
        "{}() does not take {} argument(s)",
        function.name(),
        count
    ))
}

fn real_argument(value: Value, function: Function) -> Result<f64, Error> {
    value.as_real().ok_or_else(|| {
        Error::domain(format!(
            "{}() is not defined for complex numbers",
            function.name()
        ))
    })
}

/// Sine of `x`, in the unit given by `mode`
pub fn sin(x: f64, mode: AngleMode) -> Result<f64, Error> {
    checked(libm::sin(mode.to_radians(x)))
}

/// Cosine of `x`, in the unit given by `mode`
pub fn cos(x: f64, mode: AngleMode) -> Result<f64, Error> {
    checked(libm::cos(mode.to_radians(x)))
}

/// Tangent of `x`, in the unit given by `mode`
pub fn tan(x: f64, mode: AngleMode) -> Result<f64, Error> {
    checked(libm::tan(mode.to_radians(x)))
}

/// Arcsine of `x`, returned in the unit given by `mode`
pub fn asin(x: f64, mode: AngleMode) -> Result<f64, Error> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(Error::domain(format!("asin({}) is undefined", x)));
    }
    Ok(mode.from_radians(libm::asin(x)))
}

/// Arccosine of `x`, returned in the unit given by `mode`
pub fn acos(x: f64, mode: AngleMode) -> Result<f64, Error> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(Error::domain(format!("acos({}) is undefined", x)));
    }
    Ok(mode.from_radians(libm::acos(x)))
}

/// Arctangent of `x`, returned in the unit given by `mode`
#[must_use]
pub fn atan(x: f64, mode: AngleMode) -> f64 {
    mode.from_radians(libm::atan(x))
}

/// Square root
pub fn sqrt(x: f64) -> Result<f64, Error> {
    if x < 0.0 {
        return Err(Error::domain(format!("sqrt({}) is undefined", x)));
    }
    Ok(libm::sqrt(x))
}

/// Base 10 logarithm
pub fn log(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::domain(format!("log({}) is undefined", x)));
    }
    Ok(libm::log10(x))
}

/// Natural logarithm
pub fn ln(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::domain(format!("ln({}) is undefined", x)));
    }
    Ok(libm::log(x))
}

/// `x^(1/3)`. Negative numbers give the principal complex root.
pub fn cbrt(x: Value) -> Result<Value, Error> {
    x.checked_pow(Value::Real(1.0 / 3.0))
}

/// `x^(1/n)`
pub fn nthroot(x: Value, n: Value) -> Result<Value, Error> {
    let exponent = Value::Integer(1).checked_div(n)?;
    x.checked_pow(exponent)
}

/// Absolute value, or modulus of a complex number
pub fn abs(x: Value) -> Result<Value, Error> {
    match x {
        Value::Integer(value) => Ok(value
            .checked_abs()
            .map_or_else(|| Value::Real((value as f64).abs()), Value::Integer)),
        Value::Real(value) => Ok(Value::Real(value.abs())),
        Value::Complex { re, im } => Ok(Value::Real(checked(re.hypot(im))?)),
    }
}

/// `n!` for a non negative integer `n`
///
/// The result is exact up to `20!`, and a real number up to `170!`.
pub fn factorial(n: Value) -> Result<Value, Error> {
    let n = match (n.as_integer(), n.as_real()) {
        (Some(n), _) if n >= 0 => n,
        // integral, but past the 64 bits integers
        (None, Some(x)) if x.is_finite() && x > 0.0 && x.fract() == 0.0 => {
            return Err(Error::overflow(format!("factorial({}) is too large", x)))
        }
        _ => {
            return Err(Error::domain(
                "factorial() is only defined for non-negative integers",
            ))
        }
    };
    if n <= MAX_INTEGER_FACTORIAL {
        return Ok(Value::Integer((2..=n).product()));
    }
    if n <= MAX_REAL_FACTORIAL {
        return Ok(Value::Real((2..=n).map(|i| i as f64).product()));
    }
    Err(Error::overflow(format!("factorial({}) is too large", n)))
}

/// Round to the nearest integer, ties to even
pub fn round(x: Value) -> Result<Value, Error> {
    integral(libm::rint, x, Function::Round)
}

/// Round to `digits` decimal digits, ties to even. Negative `digits` round
/// to tens, hundreds, ...
pub fn round_to(x: Value, digits: Value) -> Result<Value, Error> {
    let digits = digits
        .as_integer()
        .ok_or_else(|| Error::domain("round() digits must be an integer"))?;
    // past 10^308 the scaling factor is not representable
    let digits = digits.max(-308).min(308) as i32;
    match x {
        Value::Integer(_) if digits >= 0 => Ok(x),
        Value::Integer(value) => {
            let factor = 10_f64.powi(-digits);
            let rounded = libm::rint(value as f64 / factor) * factor;
            Ok(real_to_i64(rounded).map_or(Value::Real(rounded), Value::Integer))
        }
        Value::Real(value) => {
            if digits >= 0 {
                let factor = 10_f64.powi(digits);
                let scaled = value * factor;
                if !scaled.is_finite() {
                    return Ok(x);
                }
                Ok(Value::Real(libm::rint(scaled) / factor))
            } else {
                let factor = 10_f64.powi(-digits);
                Ok(Value::Real(checked(libm::rint(value / factor) * factor)?))
            }
        }
        Value::Complex { .. } => Err(Error::domain("round() is not defined for complex numbers")),
    }
}

/// Apply a rounding `function` and return an integer when possible
fn integral(rounding: fn(f64) -> f64, x: Value, function: Function) -> Result<Value, Error> {
    match x {
        Value::Integer(_) => Ok(x),
        _ => {
            let rounded = rounding(real_argument(x, function)?);
            Ok(real_to_i64(rounded).map_or(Value::Real(rounded), Value::Integer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn trigonometry_in_degrees() {
        let mode = AngleMode::Degrees;
        assert!(close(sin(90.0, mode).unwrap(), 1.0));
        assert!(close(cos(60.0, mode).unwrap(), 0.5));
        assert!(close(tan(45.0, mode).unwrap(), 1.0));
        assert!(close(asin(1.0, mode).unwrap(), 90.0));
        assert!(close(acos(0.5, mode).unwrap(), 60.0));
        assert!(close(atan(1.0, mode), 45.0));
    }

    #[test]
    fn trigonometry_in_radians() {
        let mode = AngleMode::Radians;
        assert!(close(sin(std::f64::consts::FRAC_PI_2, mode).unwrap(), 1.0));
        assert!(close(asin(1.0, mode).unwrap(), std::f64::consts::FRAC_PI_2));
        assert!(close(atan(1.0, mode), std::f64::consts::FRAC_PI_4));
    }

    #[test]
    fn hyperbolic_functions_ignore_angle_mode() {
        let args = [Value::Real(0.5)];
        for &function in &[Function::Sinh, Function::Cosh, Function::Tanh] {
            assert_eq!(
                apply(function, &args, AngleMode::Degrees),
                apply(function, &args, AngleMode::Radians)
            );
        }
    }

    #[test_case(Function::Asin, 2.0 ; "asin above one")]
    #[test_case(Function::Acos, -1.5 ; "acos below minus one")]
    #[test_case(Function::Log, 0.0 ; "log of zero")]
    #[test_case(Function::Ln, -1.0 ; "ln of negative")]
    #[test_case(Function::Sqrt, -4.0 ; "sqrt of negative")]
    #[test_case(Function::Factorial, -3.0 ; "factorial of negative")]
    #[test_case(Function::Factorial, 2.5 ; "factorial of non integer")]
    fn domain_errors(function: Function, x: f64) {
        let result = apply(function, &[Value::Real(x)], AngleMode::Degrees);
        assert!(matches!(result, Err(Error::DomainError(_))), "{:?}", result);
    }

    #[test_case(Function::Exp, 1000.0 ; "exp")]
    #[test_case(Function::Sinh, 1000.0 ; "sinh")]
    #[test_case(Function::Factorial, 171.0 ; "factorial")]
    #[test_case(Function::Factorial, 1e19 ; "factorial past the integer range")]
    #[test_case(Function::Factorial, 1e20 ; "factorial of a large real")]
    fn overflows(function: Function, x: f64) {
        let result = apply(function, &[Value::Real(x)], AngleMode::Degrees);
        assert!(matches!(result, Err(Error::Overflow(_))), "{:?}", result);
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(Value::Integer(0)), Ok(Value::Integer(1)));
        assert_eq!(factorial(Value::Integer(5)), Ok(Value::Integer(120)));
        assert_eq!(factorial(Value::Real(5.0)), Ok(Value::Integer(120)));
        assert_eq!(
            factorial(Value::Integer(20)),
            Ok(Value::Integer(2_432_902_008_176_640_000))
        );
        assert!(matches!(factorial(Value::Integer(21)), Ok(Value::Real(_))));
        assert!(matches!(factorial(Value::Integer(170)), Ok(Value::Real(_))));
    }

    #[test]
    fn roots() {
        assert_eq!(
            apply(Function::Sqrt, &[Value::Integer(9)], AngleMode::Degrees),
            Ok(Value::Real(3.0))
        );
        match cbrt(Value::Integer(27)) {
            Ok(Value::Real(value)) => assert!(close(value, 3.0)),
            other => panic!("unexpected {:?}", other),
        }
        match nthroot(Value::Integer(16), Value::Integer(4)) {
            Ok(Value::Real(value)) => assert!(close(value, 2.0)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(cbrt(Value::Integer(-8)), Ok(Value::Complex { .. })));
        assert_eq!(
            nthroot(Value::Integer(16), Value::Integer(0)),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn rounding() {
        assert_eq!(round(Value::Real(2.5)), Ok(Value::Integer(2)));
        assert_eq!(round(Value::Real(3.5)), Ok(Value::Integer(4)));
        assert_eq!(round(Value::Real(-1.2)), Ok(Value::Integer(-1)));
        assert_eq!(round_to(Value::Real(1.25), Value::Integer(1)), Ok(Value::Real(1.2)));
        assert_eq!(round_to(Value::Integer(1234), Value::Integer(-2)), Ok(Value::Integer(1200)));
        assert_eq!(round_to(Value::Integer(1234), Value::Integer(2)), Ok(Value::Integer(1234)));
        assert_eq!(
            apply(Function::Ceil, &[Value::Real(1.2)], AngleMode::Degrees),
            Ok(Value::Integer(2))
        );
        assert_eq!(
            apply(Function::Floor, &[Value::Real(-1.2)], AngleMode::Degrees),
            Ok(Value::Integer(-2))
        );
    }

    #[test]
    fn absolute_values() {
        assert_eq!(abs(Value::Integer(-3)), Ok(Value::Integer(3)));
        assert_eq!(abs(Value::Real(-0.5)), Ok(Value::Real(0.5)));
        assert_eq!(abs(Value::Complex { re: 3.0, im: 4.0 }), Ok(Value::Real(5.0)));
    }

    #[test]
    fn complex_arguments() {
        let z = Value::Complex { re: 1.0, im: 1.0 };
        assert!(matches!(
            apply(Function::Sin, &[z], AngleMode::Degrees),
            Err(Error::DomainError(_))
        ));
    }

    #[test]
    fn wrong_arity() {
        assert!(matches!(
            apply(Function::Sin, &[Value::Integer(1), Value::Integer(2)], AngleMode::Degrees),
            Err(Error::SyntaxError(_))
        ));
    }
}
