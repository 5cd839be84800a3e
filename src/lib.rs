#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc
)]

//! Crunchcalc, the expression engine of a standard, scientific and
//! programmer calculator.
//!
//! This crate turns expressions as typed on a calculator, with its glyphs
//! and shorthands, into formatted results. The easiest way to use it is the
//! [`Engine`](struct.Engine.html), which holds the modes, the memory cell and
//! the history:
//!
//! ```
//! use crunchcalc::Engine;
//!
//! let mut engine = Engine::new();
//! engine.set_expression("√16 + 50% × 3");
//! assert_eq!(engine.calculate(), Ok(Some("5.5".to_owned())));
//! ```
//!
//! Errors are classified, so that a host can show its own messages:
//!
//! ```
//! use crunchcalc::{Engine, ErrorKind};
//!
//! let mut engine = Engine::new();
//! engine.set_expression("asin(2)");
//! assert_eq!(engine.calculate().unwrap_err().kind(), ErrorKind::Domain);
//! ```
//!
//! The steps of a calculation are also accessible separately:
//! [`normalize`](fn.normalize.html) rewrites the displayed expression,
//! [`evaluate`](fn.evaluate.html) computes its value and
//! [`format`](fn.format.html) renders it.
//!
//! ```
//! use crunchcalc::{evaluate, format, normalize, EngineState};
//!
//! let canonical = normalize("0.1 + 0.2");
//! let value = evaluate(&canonical, &EngineState::new()).unwrap();
//! assert_eq!(format(&value), "0.3");
//! ```
//!
//! # Language definition
//!
//! Canonical expressions can contain the following elements:
//!
//! - integer and float literals: `12`, `.5`, `1.5e+20`, and integer literals
//!   prefixed by `0x`, `0o` or `0b`;
//! - left and right parenthesis;
//! - operators: `+`, `-`, `*`, `/`, `%` (floored modulo), `**` or `^`
//!   (exponentiation, right associative) and the postfix `!` (factorial).
//!   Unary `-` binds less tightly than `**`, so `-2**2` is `-4`;
//! - the constants `pi` and `e`;
//! - function calls: `sqrt`, `cbrt`, `nthroot(x, n)`, `sin`, `cos`, `tan`,
//!   `asin`, `acos`, `atan`, `sinh`, `cosh`, `tanh`, `log` (base 10), `ln`,
//!   `exp`, `factorial`, `degrees`, `radians`, `ceil`, `floor`, `abs`,
//!   `round(x)` or `round(x, digits)` and `pow(x, y)`;
//! - implicit multiplications: `2(3)`, `2pi`, `(1+2)(3+4)`.
//!
//! Any other symbol is a syntax error. Displayed expressions may also use the
//! glyphs `× ÷ √ ² ³ π e xʸ 10ˣ eˣ ∛ ʸ√ n! mod ±` and percentages, which
//! [`normalize`](fn.normalize.html) rewrites.
//!
//! # Technical details
//!
//! crunchcalc uses a Shunting-Yard algorithm to parse the expressions into an
//! AST, which is then interpreted. Integers stay exact while they fit in an
//! `i64`, other values are `f64`, and raising a negative number to a
//! fractional power gives a complex value. Results are always finite:
//! undefined operations are domain errors, and infinite ones are overflows.

#[macro_use]
extern crate lazy_static;

mod ast;
mod base;
mod config;
mod display;
mod engine;
mod error;
mod expr;
mod functions;
mod history;
mod lexer;
mod math;
mod normalize;
mod state;
mod token;
mod value;

pub use ast::Ast;
pub use base::{
    bitwise, convert_to_base, parse_integer, BitwiseOp, NumeralBase, Operand, WordSize,
};
pub use config::{EngineConfig, DEFAULT_HISTORY_CAPACITY};
pub use display::{format, format_in_base, format_with_precision, DEFAULT_PRECISION};
pub use engine::Engine;
pub use error::{Error, ErrorKind};
pub use expr::{evaluate, Expr};
pub use functions::{Function, FUNCTIONS};
pub use history::{History, HistoryRecord, HistorySink, Statistics};
pub use normalize::normalize;
pub use state::{AngleMode, EngineState};
pub use value::Value;
