//! Mode and memory state shared across evaluations.

use crate::base::NumeralBase;
use crate::value::Value;
use log::debug;

/// Unit used by the trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleMode {
    /// Angles are expressed in degrees
    Degrees,
    /// Angles are expressed in radians
    Radians,
}

impl Default for AngleMode {
    fn default() -> Self {
        Self::Degrees
    }
}

impl AngleMode {
    /// Get the angle mode from its short (`deg`, `rad`) or long (`degrees`,
    /// `radians`) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "deg" | "degrees" => Some(Self::Degrees),
            "rad" | "radians" => Some(Self::Radians),
            _ => None,
        }
    }

    /// Convert an angle in this unit to radians
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    /// Convert an angle in radians to this unit
    #[must_use]
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_degrees(),
            Self::Radians => angle,
        }
    }
}

/// Process-wide calculator state: modes, memory cell, last result and the
/// expression currently displayed.
///
/// The state performs no locking: hosts sharing it between threads must
/// serialize the accesses.
///
/// # Examples
///
/// ```
/// use crunchcalc::{EngineState, Value};
///
/// let mut state = EngineState::new();
/// state.set_expression("12.5");
/// state.memory_store();
/// state.memory_add();
/// assert_eq!(state.memory_recall(), 25.0);
///
/// // the display is not a bare number, the last result is used instead
/// state.set_last_result(Value::Integer(5));
/// state.set_expression("2 + 3");
/// state.memory_subtract();
/// assert_eq!(state.memory_recall(), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    angle_mode: AngleMode,
    numeral_base: NumeralBase,
    memory: f64,
    last_result: Value,
    current_expression: String,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    /// Create a new state, in degrees and decimal mode, with an empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_modes(AngleMode::default(), NumeralBase::default())
    }

    /// Create a new state with the given modes.
    #[must_use]
    pub fn with_modes(angle_mode: AngleMode, numeral_base: NumeralBase) -> Self {
        Self {
            angle_mode,
            numeral_base,
            memory: 0.0,
            last_result: Value::Integer(0),
            current_expression: String::new(),
        }
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Set the angle mode used by the trigonometric functions
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    /// Set the angle mode by name (`deg` or `rad`). Unknown names are
    /// ignored and leave the mode unchanged.
    pub fn set_angle_mode_named(&mut self, name: &str) {
        match AngleMode::from_name(name) {
            Some(mode) => self.angle_mode = mode,
            None => debug!("ignoring unknown angle mode {:?}", name),
        }
    }

    /// Current numeral base
    #[must_use]
    pub fn numeral_base(&self) -> NumeralBase {
        self.numeral_base
    }

    /// Set the numeral base used to read literals and render results
    pub fn set_numeral_base(&mut self, base: NumeralBase) {
        self.numeral_base = base;
    }

    /// The expression currently displayed
    #[must_use]
    pub fn current_expression(&self) -> &str {
        &self.current_expression
    }

    /// Replace the expression currently displayed
    pub fn set_expression<S: Into<String>>(&mut self, expression: S) {
        self.current_expression = expression.into();
    }

    /// The most recent successfully computed value
    #[must_use]
    pub fn last_result(&self) -> Value {
        self.last_result
    }

    /// Record a successfully computed value
    pub fn set_last_result(&mut self, value: Value) {
        self.last_result = value;
    }

    /// Reset the current expression and the last result. The memory cell and
    /// the modes are kept.
    pub fn clear(&mut self) {
        self.current_expression.clear();
        self.last_result = Value::Integer(0);
    }

    /// `MC`: reset the memory cell to 0
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// `MR`: get the memory cell value
    #[must_use]
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    /// `MS`: store the displayed number in memory
    pub fn memory_store(&mut self) {
        self.memory = self.operand();
    }

    /// `M+`: add the displayed number to memory
    pub fn memory_add(&mut self) {
        self.memory += self.operand();
    }

    /// `M-`: subtract the displayed number from memory
    pub fn memory_subtract(&mut self) {
        self.memory -= self.operand();
    }

    /// Operand of the memory operations: the displayed expression when it is
    /// a bare number, the last result otherwise.
    fn operand(&self) -> f64 {
        match self.current_expression.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                debug!(
                    "{:?} is not a number, using the last result",
                    self.current_expression
                );
                self.last_result.real_part()
            }
        }
    }
}
