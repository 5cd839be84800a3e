//! Rendering of evaluation results.
//!
//! Reals are written in general notation with a bounded number of
//! significant digits: fixed notation for moderate exponents, scientific
//! notation otherwise, trailing zeros removed. Formatting never fails.

use crate::base::NumeralBase;
use crate::value::{real_to_i64, Value};

/// Significant digits used by [`format`]
pub const DEFAULT_PRECISION: usize = 10;

/// Render `value` with 10 significant digits.
///
/// # Examples
///
/// ```
/// use crunchcalc::{format, Value};
///
/// assert_eq!(format(&Value::Integer(3)), "3");
/// assert_eq!(format(&Value::Real(0.1 + 0.2)), "0.3");
/// assert_eq!(format(&Value::Real(4.0)), "4");
/// assert_eq!(format(&Value::Real(2.0 / 3.0)), "0.6666666667");
/// assert_eq!(format(&Value::Real(1.5e-7)), "1.5e-07");
/// assert_eq!(format(&Value::Complex { re: 1.0, im: -2.0 }), "1-2i");
/// ```
#[must_use]
pub fn format(value: &Value) -> String {
    format_with_precision(value, DEFAULT_PRECISION)
}

/// Render `value` with `precision` significant digits. A precision of 0 is
/// treated as 1.
#[must_use]
pub fn format_with_precision(value: &Value, precision: usize) -> String {
    match value.normalized() {
        Value::Integer(value) => value.to_string(),
        Value::Real(value) => match real_to_i64(value) {
            Some(integer) => integer.to_string(),
            None => general(value, precision),
        },
        Value::Complex { re, im } => {
            let sign = if im.is_sign_negative() { '-' } else { '+' };
            format!(
                "{}{}{}i",
                general(re, precision),
                sign,
                general(im.abs(), precision)
            )
        }
    }
}

/// Render `value` in `base`. Integral values use the base digits and prefix,
/// anything else falls back to the decimal rendering.
///
/// ```
/// use crunchcalc::{format_in_base, NumeralBase, Value};
///
/// assert_eq!(format_in_base(&Value::Integer(255), NumeralBase::Hexadecimal), "0xFF");
/// assert_eq!(format_in_base(&Value::Integer(-5), NumeralBase::Binary), "-0b101");
/// assert_eq!(format_in_base(&Value::Real(2.5), NumeralBase::Octal), "2.5");
/// ```
#[must_use]
pub fn format_in_base(value: &Value, base: NumeralBase) -> String {
    match value.as_integer() {
        Some(integer) if base != NumeralBase::Decimal => base.render(integer),
        _ => format(value),
    }
}

/// General notation, as printf's `%.<precision>g`
fn general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.find('e') {
        Some(index) => (&scientific[..index], &scientific[index + 1..]),
        None => return scientific,
    };
    let exponent: i64 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i64 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i64 - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_owned()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
