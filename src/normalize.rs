//! Rewriting of displayed expressions into canonical expressions.
//!
//! The display uses glyphs (`×`, `÷`, `√`, `²`, `π`, ...) and shorthands
//! (`50%`, `±`) that the lexer does not know about. Normalization replaces
//! them with their canonical spelling, and never fails: glyphs that can not be
//! rewritten are left in place for the lexer to report.

use log::trace;
use std::f64::consts::{E, PI};

/// Glyphs spanning several characters, checked before the single character
/// ones.
const MULTI_CHAR_GLYPHS: [(&str, &str); 6] = [
    ("xʸ", "**"),
    ("10ˣ", "10**"),
    ("eˣ", "exp"),
    ("ʸ√", "nthroot"),
    ("n!", "factorial"),
    ("mod", "%"),
];

/// Rewrite a displayed expression into a canonical expression.
///
/// The rewriting happens in three passes: glyph substitution, percent
/// rewriting (`50%` becomes `(50/100)`), and sign rewriting (`±` becomes
/// `-`). Whitespace is dropped. Normalizing a canonical expression gives it
/// back unchanged.
///
/// # Examples
///
/// ```
/// use crunchcalc::normalize;
///
/// assert_eq!(normalize("3 × 4 ÷ 2"), "3*4/2");
/// assert_eq!(normalize("50%"), "(50/100)");
/// assert_eq!(normalize("√16 + 5²"), "sqrt(16)+5**2");
/// assert_eq!(normalize("7 mod 3"), "7%3");
/// assert_eq!(normalize("2π"), "2*3.141592653589793");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let input: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let canonical = rewrite_signs(&rewrite_percents(&substitute_glyphs(&input)));
    trace!("normalized {:?} to {:?}", raw, canonical);
    canonical
}

/// Check if the end of `output` can be the end of an operand
fn ends_operand(output: &str) -> bool {
    output
        .chars()
        .last()
        .map_or(false, |c| c.is_ascii_alphanumeric() || matches!(c, '.' | ')' | '!'))
}

/// Check if `c` can be the start of an operand
fn starts_operand(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '(' | 'π' | '√' | '∛')
}

fn is_digit(c: Option<char>) -> bool {
    c.map_or(false, |c| c.is_ascii_digit())
}

fn is_letter(c: Option<char>) -> bool {
    c.map_or(false, |c| c.is_ascii_alphabetic())
}

/// The multi character glyph starting at `position`, with its replacement
fn glyph_at(input: &[char], position: usize) -> Option<(&'static str, &'static str)> {
    MULTI_CHAR_GLYPHS
        .iter()
        .copied()
        .find(|&(glyph, _)| starts_with_at(input, position, glyph))
}

/// Check if the input at `position` becomes the start of an operand
fn operand_at(input: &[char], position: usize) -> bool {
    match glyph_at(input, position) {
        Some((_, replacement)) => replacement.starts_with(starts_operand),
        None => input.get(position).map_or(false, |&c| starts_operand(c)),
    }
}

/// Check if the `e` at `position` is Euler's number, given the last
/// character written before it. It is not when it belongs to an
/// identifier, or when it is an exponent marker as in `1.5e+20`.
fn is_euler_constant(input: &[char], position: usize, previous: Option<char>) -> bool {
    if is_letter(previous) {
        return false;
    }
    let next = input.get(position + 1).copied();
    let exponent = (is_digit(previous) || previous == Some('.'))
        && match next {
            Some('+') | Some('-') => is_digit(input.get(position + 2).copied()),
            next => is_digit(next),
        };
    if exponent {
        return false;
    }
    !is_letter(next) || glyph_at(input, position + 1).is_some()
}

/// Push a constant value, multiplying it with the operands around it
fn push_constant(input: &[char], position: usize, value: f64, output: &mut String) {
    if ends_operand(output) {
        output.push('*');
    }
    output.push_str(&value.to_string());
    if operand_at(input, position + 1) {
        output.push('*');
    }
}

/// Push a function name, wrapping a numeric literal or a constant that
/// directly follows in parenthesis. Returns the number of input characters
/// consumed.
fn push_prefix_function(input: &[char], position: usize, name: &str, output: &mut String) -> usize {
    output.push_str(name);
    let next = position + 1;
    let constant = match input.get(next) {
        Some('π') => Some(PI),
        Some('e')
            if glyph_at(input, next).is_none() && is_euler_constant(input, next, Some('(')) =>
        {
            Some(E)
        }
        _ => None,
    };
    if let Some(value) = constant {
        output.push('(');
        output.push_str(&value.to_string());
        output.push(')');
        return 2;
    }

    let literal = input[next..]
        .iter()
        .take_while(|c| c.is_ascii_digit() || **c == '.')
        .count();
    if literal == 0 {
        return 1;
    }
    output.push('(');
    output.extend(&input[next..next + literal]);
    output.push(')');
    1 + literal
}

/// Length of the `0x`, `0o` or `0b` prefixed literal starting at `position`.
/// Its digits are copied as is, so that `0x1e` keeps its `e`.
fn prefixed_literal_length(
    input: &[char],
    position: usize,
    previous: Option<char>,
) -> Option<usize> {
    if input.get(position) != Some(&'0')
        || previous.map_or(false, |c| c.is_ascii_alphanumeric() || c == '.')
    {
        return None;
    }
    let radix = match input.get(position + 1) {
        Some('x') => 16,
        Some('o') => 8,
        Some('b') => 2,
        _ => return None,
    };
    let digits = input[position + 2..]
        .iter()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits == 0 {
        None
    } else {
        Some(2 + digits)
    }
}

fn starts_with_at(input: &[char], position: usize, glyph: &str) -> bool {
    let mut index = position;
    for c in glyph.chars() {
        if input.get(index) != Some(&c) {
            return false;
        }
        index += 1;
    }
    true
}

/// Replace the glyphs. Every decision depends on the output written so far
/// and on the input ahead, so that rewriting the output again changes
/// nothing.
fn substitute_glyphs(input: &[char]) -> String {
    let mut output = String::with_capacity(input.len());
    let mut position = 0;
    while position < input.len() {
        let previous = output.chars().last();
        if let Some((glyph, replacement)) = glyph_at(input, position) {
            // a function name would extend the identifier before it
            let extends_identifier =
                is_letter(previous) && replacement.starts_with(|c: char| c.is_ascii_alphabetic());
            if !extends_identifier {
                output.push_str(replacement);
                position += glyph.chars().count();
                continue;
            }
        }

        if let Some(length) = prefixed_literal_length(input, position, previous) {
            output.extend(&input[position..position + length]);
            position += length;
            continue;
        }

        let c = input[position];
        match c {
            '×' => output.push('*'),
            '÷' => output.push('/'),
            '√' => {
                position += push_prefix_function(input, position, "sqrt", &mut output);
                continue;
            }
            '∛' => {
                position += push_prefix_function(input, position, "cbrt", &mut output);
                continue;
            }
            // a percentage can be squared too
            '²' | '³' if ends_operand(&output) || output.ends_with('%') => {
                output.push_str(if c == '²' { "**2" } else { "**3" });
            }
            'π' => push_constant(input, position, PI, &mut output),
            'e' if is_euler_constant(input, position, previous) => {
                push_constant(input, position, E, &mut output);
            }
            other => output.push(other),
        }
        position += 1;
    }
    output
}

/// Rewrite `<literal>%` as `(<literal>/100)`, unless the `%` is followed by
/// an operand and is a modulo operator.
fn rewrite_percents(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    // start in `output` of the numeric literal being read
    let mut literal_start: Option<usize> = None;
    for (position, &c) in chars.iter().enumerate() {
        if c.is_ascii_digit() || c == '.' {
            if literal_start.is_none() {
                let after_identifier = output
                    .chars()
                    .last()
                    .map_or(false, |c| c.is_ascii_alphabetic());
                if !after_identifier {
                    literal_start = Some(output.len());
                }
            }
            output.push(c);
            continue;
        }

        let is_modulo = chars.get(position + 1).map_or(false, |&c| starts_operand(c));
        match literal_start.take() {
            Some(start) if c == '%' && !is_modulo => {
                let literal = output.split_off(start);
                output.push('(');
                output.push_str(&literal);
                output.push_str("/100)");
            }
            _ => output.push(c),
        }
    }
    output
}

fn rewrite_signs(input: &str) -> String {
    input.replace('±', "-")
}
