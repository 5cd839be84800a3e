use crate::base::NumeralBase;
use crate::display::DEFAULT_PRECISION;
use crate::state::AngleMode;

/// Number of records kept by the default history
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Settings of an [`Engine`](crate::Engine).
///
/// ```
/// use crunchcalc::{AngleMode, EngineConfig};
///
/// let config = EngineConfig::default()
///     .with_precision(6)
///     .with_angle_mode(AngleMode::Radians);
/// assert_eq!(config.precision, 6);
/// assert_eq!(config.history_capacity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Significant digits of the formatted results
    pub precision: usize,
    /// Number of records kept by the in-memory history
    pub history_capacity: usize,
    /// Initial angle mode
    pub angle_mode: AngleMode,
    /// Initial numeral base
    pub numeral_base: NumeralBase,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            angle_mode: AngleMode::default(),
            numeral_base: NumeralBase::default(),
        }
    }
}

impl EngineConfig {
    /// Set the significant digits of the formatted results
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the number of records kept by the in-memory history
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the initial angle mode
    #[must_use]
    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Set the initial numeral base
    #[must_use]
    pub fn with_numeral_base(mut self, base: NumeralBase) -> Self {
        self.numeral_base = base;
        self
    }
}
