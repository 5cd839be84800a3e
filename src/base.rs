//! Programmer mode: numeral bases, base conversion and bitwise operations.
//!
//! Base conversion reports unreadable literals as
//! [`Error::ConversionError`]. Bitwise operations are lenient instead: an
//! operand that can not be read makes the operation return 0. Callers that
//! need to tell a failure from a genuine 0 must validate the operands first,
//! for example with [`parse_integer`].

use crate::error::Error;
use crate::value::real_to_i64;
use log::debug;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Radix used to read and render integers in programmer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumeralBase {
    /// Base 2
    Binary = 2,
    /// Base 8
    Octal = 8,
    /// Base 10
    Decimal = 10,
    /// Base 16
    Hexadecimal = 16,
}

impl Default for NumeralBase {
    fn default() -> Self {
        Self::Decimal
    }
}

impl NumeralBase {
    /// Get the base with the given radix
    #[must_use]
    pub fn from_radix(radix: u32) -> Option<Self> {
        match radix {
            2 => Some(Self::Binary),
            8 => Some(Self::Octal),
            10 => Some(Self::Decimal),
            16 => Some(Self::Hexadecimal),
            _ => None,
        }
    }

    /// The radix of this base
    #[must_use]
    pub fn radix(self) -> u32 {
        self as u32
    }

    /// Prefix marking a literal in this base. Decimal has no prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Octal => "0o",
            Self::Decimal => "",
            Self::Hexadecimal => "0x",
        }
    }

    /// Check if `c` is a valid digit in this base
    ///
    /// # Examples
    ///
    /// ```
    /// # use crunchcalc::NumeralBase;
    /// assert!(NumeralBase::Hexadecimal.accepts('F'));
    /// assert!(!NumeralBase::Octal.accepts('8'));
    /// assert!(!NumeralBase::Binary.accepts('2'));
    /// ```
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        c.is_digit(self.radix())
    }

    /// Render `value` in this base, with the base prefix and uppercase
    /// hexadecimal digits.
    #[must_use]
    pub fn render(self, value: i64) -> String {
        let sign = if value < 0 { "-" } else { "" };
        let magnitude = value.unsigned_abs();
        let digits = match self {
            Self::Binary => format!("{:b}", magnitude),
            Self::Octal => format!("{:o}", magnitude),
            Self::Decimal => magnitude.to_string(),
            Self::Hexadecimal => format!("{:X}", magnitude),
        };
        format!("{}{}{}", sign, self.prefix(), digits)
    }
}

/// Operand of the programmer mode operations: text as displayed, or a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    /// A literal, possibly prefixed by `0x`, `0o` or `0b`
    Text(&'a str),
    /// An integer
    Integer(i64),
    /// A real number, truncated toward zero when used
    Real(f64),
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// Convert `literal` to its representation in the `target` base.
///
/// Text literals use the base given by their `0x`, `0o` or `0b` prefix, and
/// are read as decimal numbers otherwise, truncating any fractional part.
///
/// # Examples
///
/// ```
/// use crunchcalc::{convert_to_base, NumeralBase};
///
/// assert_eq!(convert_to_base("255", NumeralBase::Hexadecimal).unwrap(), "0xFF");
/// assert_eq!(convert_to_base("0xFF", NumeralBase::Decimal).unwrap(), "255");
/// assert_eq!(convert_to_base("10.9", NumeralBase::Binary).unwrap(), "0b1010");
/// assert_eq!(convert_to_base(-8, NumeralBase::Octal).unwrap(), "-0o10");
/// assert!(convert_to_base("0xZZ", NumeralBase::Decimal).is_err());
/// ```
pub fn convert_to_base<'a, L>(literal: L, target: NumeralBase) -> Result<String, Error>
where
    L: Into<Operand<'a>>,
{
    let value = match literal.into() {
        Operand::Text(text) => read_literal(text)?,
        Operand::Integer(value) => value,
        Operand::Real(value) => truncate(value)
            .ok_or_else(|| Error::ConversionError(format!("{} is not convertible", value)))?,
    };
    Ok(target.render(value))
}

/// Read a literal for base conversion: explicit lowercase prefix, or a
/// decimal number.
fn read_literal(text: &str) -> Result<i64, Error> {
    let error = || Error::ConversionError(format!("invalid literal {:?}", text));
    for &base in &[NumeralBase::Hexadecimal, NumeralBase::Octal, NumeralBase::Binary] {
        if let Some(digits) = text.strip_prefix(base.prefix()) {
            return parse_digits(digits, base).ok_or_else(error);
        }
    }
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    text.parse::<f64>()
        .ok()
        .and_then(truncate)
        .ok_or_else(error)
}

fn parse_digits(digits: &str, base: NumeralBase) -> Option<i64> {
    if digits.is_empty() || !digits.chars().all(|c| base.accepts(c)) {
        return None;
    }
    i64::from_str_radix(digits, base.radix()).ok()
}

fn truncate(value: f64) -> Option<i64> {
    if value.is_finite() {
        real_to_i64(value.trunc())
    } else {
        None
    }
}

/// Read an integer, detecting its base from a `0x`, `0o` or `0b` prefix
/// (in any case). Unprefixed literals are decimal, and can not have leading
/// zeros.
///
/// # Examples
///
/// ```
/// # use crunchcalc::parse_integer;
/// assert_eq!(parse_integer("0x1f"), Some(31));
/// assert_eq!(parse_integer("-0B101"), Some(-5));
/// assert_eq!(parse_integer("42"), Some(42));
/// assert_eq!(parse_integer("042"), None);
/// ```
#[must_use]
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, text) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let lowercase = text.to_ascii_lowercase();
    let mut magnitude = None;
    for &base in &[NumeralBase::Hexadecimal, NumeralBase::Octal, NumeralBase::Binary] {
        if let Some(digits) = lowercase.strip_prefix(base.prefix()) {
            magnitude = Some(parse_unsigned(digits, base)?);
        }
    }
    let magnitude = match magnitude {
        Some(magnitude) => magnitude,
        None => {
            if lowercase.len() > 1
                && lowercase.starts_with('0')
                && lowercase.contains(|c: char| c != '0')
            {
                return None;
            }
            parse_unsigned(&lowercase, NumeralBase::Decimal)?
        }
    };
    if negative {
        0_i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_unsigned(digits: &str, base: NumeralBase) -> Option<u64> {
    if digits.is_empty() || !digits.chars().all(|c| base.accepts(c)) {
        return None;
    }
    u64::from_str_radix(digits, base.radix()).ok()
}

/// Bitwise operations of the programmer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
    /// `!a`, the second operand is ignored
    Not,
    /// `a << b`
    Lsh,
    /// `a >> b`, arithmetic shift
    Rsh,
}

impl Display for BitwiseOp {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Lsh => "LSH",
            Self::Rsh => "RSH",
        };
        fmt.write_str(name)
    }
}

impl FromStr for BitwiseOp {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "XOR" => Ok(Self::Xor),
            "NOT" => Ok(Self::Not),
            "LSH" => Ok(Self::Lsh),
            "RSH" => Ok(Self::Rsh),
            other => Err(Error::ConversionError(format!(
                "unknown bitwise operation {}",
                other
            ))),
        }
    }
}

/// Apply a bitwise operation on two 64-bit integers.
///
/// Text operands are read with [`parse_integer`], real operands are
/// truncated. When an operand can not be read the result is 0, no error is
/// reported. Shift amounts wrap around the integer width.
///
/// # Examples
///
/// ```
/// use crunchcalc::{bitwise, BitwiseOp};
///
/// assert_eq!(bitwise(12, 10, BitwiseOp::And), 8);
/// assert_eq!(bitwise("0b0101", 0, BitwiseOp::Not), -6);
/// assert_eq!(bitwise("0x10", "2", BitwiseOp::Rsh), 4);
/// assert_eq!(bitwise("twelve", 10, BitwiseOp::Or), 0);
/// ```
pub fn bitwise<'a, 'b, A, B>(a: A, b: B, op: BitwiseOp) -> i64
where
    A: Into<Operand<'a>>,
    B: Into<Operand<'b>>,
{
    let a = match integer_operand(a.into()) {
        Some(a) => a,
        None => return 0,
    };
    if op == BitwiseOp::Not {
        return !a;
    }
    let b = match integer_operand(b.into()) {
        Some(b) => b,
        None => return 0,
    };
    match op {
        BitwiseOp::And => a & b,
        BitwiseOp::Or => a | b,
        BitwiseOp::Xor => a ^ b,
        BitwiseOp::Not => !a,
        BitwiseOp::Lsh => a.wrapping_shl(b as u32),
        BitwiseOp::Rsh => a.wrapping_shr(b as u32),
    }
}

fn integer_operand(operand: Operand<'_>) -> Option<i64> {
    let value = match operand {
        Operand::Text(text) => parse_integer(text),
        Operand::Integer(value) => Some(value),
        Operand::Real(value) => truncate(value),
    };
    if value.is_none() {
        debug!("unreadable bitwise operand {:?}", operand);
    }
    value
}

/// Word width of the programmer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    /// 8 bits
    Byte,
    /// 16 bits
    Word,
    /// 32 bits
    DWord,
    /// 64 bits
    QWord,
}

impl Default for WordSize {
    fn default() -> Self {
        Self::QWord
    }
}

impl WordSize {
    /// Number of bits in a word
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::Word => 16,
            Self::DWord => 32,
            Self::QWord => 64,
        }
    }

    /// Truncate `value` to the word width, as a signed two's complement
    /// integer.
    ///
    /// ```
    /// # use crunchcalc::WordSize;
    /// assert_eq!(WordSize::Byte.wrap(255), -1);
    /// assert_eq!(WordSize::Word.wrap(0x1_0005), 5);
    /// ```
    #[must_use]
    pub fn wrap(self, value: i64) -> i64 {
        match self {
            Self::Byte => i64::from(value as i8),
            Self::Word => i64::from(value as i16),
            Self::DWord => i64::from(value as i32),
            Self::QWord => value,
        }
    }
}
