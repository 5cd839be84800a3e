//! Numeric values produced by the evaluator.
//!
//! Every `Value` held by the evaluator is finite: operations that would
//! produce a NaN report a [`Error::DomainError`], and operations that would
//! produce an infinity report an [`Error::Overflow`].

use crate::error::Error;
use std::convert::TryFrom;
use std::f64::consts::PI;

/// Result of an evaluation: an exact integer, a real number, or a complex
/// number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 64-bit integer, kept exact as long as the operations allow it
    Integer(i64),
    /// A finite floating point number
    Real(f64),
    /// A complex number, produced by raising a negative number to a
    /// fractional power
    Complex {
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl Value {
    /// Collapse a complex value with a zero imaginary part to a real value.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Complex { re, im } if im == 0.0 => Self::Real(re),
            other => other,
        }
    }

    /// Get the value as a real number, or `None` for a complex value with a
    /// non-zero imaginary part.
    #[must_use]
    pub fn as_real(self) -> Option<f64> {
        match self.normalized() {
            Self::Integer(value) => Some(value as f64),
            Self::Real(value) => Some(value),
            Self::Complex { .. } => None,
        }
    }

    /// Get the real part of the value
    #[must_use]
    pub fn real_part(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Real(value) => value,
            Self::Complex { re, .. } => re,
        }
    }

    /// Get the value as an exact integer: integers, and reals with no
    /// fractional part in the `i64` range.
    #[must_use]
    pub fn as_integer(self) -> Option<i64> {
        match self.normalized() {
            Self::Integer(value) => Some(value),
            Self::Real(value) => real_to_i64(value),
            Self::Complex { .. } => None,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Self::Integer(value) => value == 0,
            Self::Real(value) => value == 0.0,
            Self::Complex { re, im } => re == 0.0 && im == 0.0,
        }
    }

    fn as_complex(self) -> (f64, f64) {
        match self {
            Self::Integer(value) => (value as f64, 0.0),
            Self::Real(value) => (value, 0.0),
            Self::Complex { re, im } => (re, im),
        }
    }

    fn is_complex(self) -> bool {
        matches!(self, Self::Complex { .. })
    }

    /// `-self`
    pub fn checked_neg(self) -> Result<Self, Error> {
        match self {
            Self::Integer(value) => Ok(value
                .checked_neg()
                .map_or_else(|| Self::Real(-(value as f64)), Self::Integer)),
            Self::Real(value) => Ok(Self::Real(-value)),
            Self::Complex { re, im } => Ok(Self::Complex { re: -re, im: -im }),
        }
    }

    /// `self + rhs`
    pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
        if let (Self::Integer(a), Self::Integer(b)) = (self, rhs) {
            if let Some(sum) = a.checked_add(b) {
                return Ok(Self::Integer(sum));
            }
        }
        if self.is_complex() || rhs.is_complex() {
            let (a, b) = self.as_complex();
            let (c, d) = rhs.as_complex();
            return complex(a + c, b + d);
        }
        real(self.real_part() + rhs.real_part())
    }

    /// `self - rhs`
    pub fn checked_sub(self, rhs: Self) -> Result<Self, Error> {
        if let (Self::Integer(a), Self::Integer(b)) = (self, rhs) {
            if let Some(difference) = a.checked_sub(b) {
                return Ok(Self::Integer(difference));
            }
        }
        if self.is_complex() || rhs.is_complex() {
            let (a, b) = self.as_complex();
            let (c, d) = rhs.as_complex();
            return complex(a - c, b - d);
        }
        real(self.real_part() - rhs.real_part())
    }

    /// `self * rhs`
    pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
        if let (Self::Integer(a), Self::Integer(b)) = (self, rhs) {
            if let Some(product) = a.checked_mul(b) {
                return Ok(Self::Integer(product));
            }
        }
        if self.is_complex() || rhs.is_complex() {
            let (a, b) = self.as_complex();
            let (c, d) = rhs.as_complex();
            return complex(a * c - b * d, a * d + b * c);
        }
        real(self.real_part() * rhs.real_part())
    }

    /// `self / rhs`, always a true (non truncating) division
    pub fn checked_div(self, rhs: Self) -> Result<Self, Error> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_complex() || rhs.is_complex() {
            let (a, b) = self.as_complex();
            let (c, d) = rhs.as_complex();
            let norm = c * c + d * d;
            return complex((a * c + b * d) / norm, (b * c - a * d) / norm);
        }
        real(self.real_part() / rhs.real_part())
    }

    /// `self % rhs`, floored: the result has the sign of `rhs`
    pub fn checked_rem(self, rhs: Self) -> Result<Self, Error> {
        if self.is_complex() || rhs.is_complex() {
            return Err(Error::domain("modulo of a complex number"));
        }
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if let (Self::Integer(a), Self::Integer(b)) = (self, rhs) {
            let remainder = a.checked_rem(b).unwrap_or(0);
            if remainder != 0 && (remainder < 0) != (b < 0) {
                return Ok(Self::Integer(remainder + b));
            }
            return Ok(Self::Integer(remainder));
        }
        let (a, b) = (self.real_part(), rhs.real_part());
        let remainder = a % b;
        if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
            return real(remainder + b);
        }
        real(remainder)
    }

    /// `self ** rhs`
    ///
    /// A negative real raised to a fractional power gives the principal
    /// complex value.
    pub fn checked_pow(self, rhs: Self) -> Result<Self, Error> {
        if let (Self::Integer(base), Self::Integer(exponent)) = (self, rhs) {
            if let Ok(exponent) = u32::try_from(exponent) {
                if let Some(power) = base.checked_pow(exponent) {
                    return Ok(Self::Integer(power));
                }
            }
        }
        if self.is_complex() || rhs.is_complex() {
            return complex_pow(self.as_complex(), rhs.as_complex());
        }
        let (base, exponent) = (self.real_part(), rhs.real_part());
        if base == 0.0 && exponent < 0.0 {
            return Err(Error::DivisionByZero);
        }
        if base < 0.0 && exponent.fract() != 0.0 {
            let modulus = checked((-base).powf(exponent))?;
            let angle = exponent * PI;
            return complex(modulus * angle.cos(), modulus * angle.sin());
        }
        real(base.powf(exponent))
    }
}

/// Convert a real with no fractional part to an `i64`, if it is in range.
pub(crate) fn real_to_i64(value: f64) -> Option<i64> {
    // 2^63 is exactly representable, and is the first value out of range
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

/// Check that a freshly computed float is finite
pub(crate) fn checked(value: f64) -> Result<f64, Error> {
    if value.is_nan() {
        Err(Error::domain("math domain error"))
    } else if value.is_infinite() {
        Err(Error::overflow("numerical result out of range"))
    } else {
        Ok(value)
    }
}

fn real(value: f64) -> Result<Value, Error> {
    checked(value).map(Value::Real)
}

fn complex(re: f64, im: f64) -> Result<Value, Error> {
    Ok(Value::Complex {
        re: checked(re)?,
        im: checked(im)?,
    })
}

/// Principal value of `z^w`, computed as `exp(w * ln(z))`
fn complex_pow((a, b): (f64, f64), (c, d): (f64, f64)) -> Result<Value, Error> {
    if a == 0.0 && b == 0.0 {
        if c == 0.0 && d == 0.0 {
            return Ok(Value::Complex { re: 1.0, im: 0.0 });
        }
        if d != 0.0 || c < 0.0 {
            return Err(Error::DivisionByZero);
        }
        return Ok(Value::Complex { re: 0.0, im: 0.0 });
    }
    let log_modulus = a.hypot(b).ln();
    let argument = b.atan2(a);
    let re = c * log_modulus - d * argument;
    let im = d * log_modulus + c * argument;
    let modulus = checked(re.exp())?;
    complex(modulus * im.cos(), modulus * im.sin())
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::error::Error;
    use test_case::test_case;

    #[test_case(Value::Integer(2), Value::Integer(3) => Ok(Value::Integer(5)) ; "integers stay exact")]
    #[test_case(Value::Integer(i64::MAX), Value::Integer(1) => Ok(Value::Real(9_223_372_036_854_775_808.0)) ; "integer overflow falls back to reals")]
    #[test_case(Value::Real(0.5), Value::Integer(1) => Ok(Value::Real(1.5)) ; "mixed operands")]
    fn add(left: Value, right: Value) -> Result<Value, Error> {
        left.checked_add(right)
    }

    #[test_case(Value::Integer(7), Value::Integer(3) => Ok(Value::Integer(1)) ; "positive")]
    #[test_case(Value::Integer(-7), Value::Integer(3) => Ok(Value::Integer(2)) ; "sign of the divisor")]
    #[test_case(Value::Integer(7), Value::Integer(-3) => Ok(Value::Integer(-2)) ; "negative divisor")]
    #[test_case(Value::Real(5.5), Value::Integer(2) => Ok(Value::Real(1.5)) ; "real operands")]
    #[test_case(Value::Integer(5), Value::Integer(0) => Err(Error::DivisionByZero) ; "by zero")]
    fn rem(left: Value, right: Value) -> Result<Value, Error> {
        left.checked_rem(right)
    }

    #[test]
    fn division() {
        assert_eq!(
            Value::Integer(1).checked_div(Value::Integer(4)),
            Ok(Value::Real(0.25))
        );
        assert_eq!(
            Value::Integer(5).checked_div(Value::Real(0.0)),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn powers() {
        assert_eq!(
            Value::Integer(2).checked_pow(Value::Integer(10)),
            Ok(Value::Integer(1024))
        );
        assert_eq!(
            Value::Integer(2).checked_pow(Value::Integer(-1)),
            Ok(Value::Real(0.5))
        );
        assert_eq!(
            Value::Integer(0).checked_pow(Value::Integer(-1)),
            Err(Error::DivisionByZero)
        );
        assert!(matches!(
            Value::Real(10.0).checked_pow(Value::Integer(400)),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn negative_base_fractional_exponent() {
        match Value::Integer(-8).checked_pow(Value::Real(1.0 / 3.0)) {
            Ok(Value::Complex { re, im }) => {
                assert!((re - 1.0).abs() < 1e-12);
                assert!((im - 3.0_f64.sqrt()).abs() < 1e-12);
            }
            other => panic!("expected a complex value, got {:?}", other),
        }
    }

    #[test]
    fn complex_arithmetic() {
        let i = Value::Complex { re: 0.0, im: 1.0 };
        assert_eq!(i.checked_mul(i), Ok(Value::Complex { re: -1.0, im: 0.0 }));
        assert_eq!(i.checked_mul(i).unwrap().normalized(), Value::Real(-1.0));
        assert!(i.checked_rem(Value::Integer(2)).is_err());
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::Real(3.0).as_integer(), Some(3));
        assert_eq!(Value::Real(3.5).as_integer(), None);
        assert_eq!(Value::Real(1e300).as_integer(), None);
        assert_eq!(Value::Complex { re: 2.0, im: 0.0 }.as_real(), Some(2.0));
        assert_eq!(Value::Complex { re: 2.0, im: 1.0 }.as_real(), None);
        assert_eq!(
            Value::Integer(i64::MIN).checked_neg(),
            Ok(Value::Real(9_223_372_036_854_775_808.0))
        );
    }
}
