use crate::base::{self, BitwiseOp, NumeralBase, Operand};
use crate::config::EngineConfig;
use crate::display::{format_in_base, format_with_precision};
use crate::error::Error;
use crate::expr::evaluate;
use crate::history::{History, HistoryRecord, HistorySink};
use crate::normalize::normalize;
use crate::state::{AngleMode, EngineState};
use crate::value::Value;
use log::debug;

/// The calculator engine: the displayed expression, the modes, the memory
/// cell and the last result, plus a sink receiving every successful
/// calculation.
///
/// The engine does no locking. Hosts sharing it between threads must
/// serialize the calls.
///
/// # Examples
///
/// ```
/// use crunchcalc::{AngleMode, Engine};
///
/// let mut engine = Engine::new();
/// engine.set_expression("3 × (4 + 1)²");
/// assert_eq!(engine.calculate(), Ok(Some("75".to_owned())));
///
/// engine.set_angle_mode(AngleMode::Radians);
/// engine.set_expression("cos(0)");
/// assert_eq!(engine.calculate(), Ok(Some("1".to_owned())));
///
/// assert_eq!(engine.history().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Engine<S = History> {
    state: EngineState,
    config: EngineConfig,
    history: S,
}

impl Default for Engine<History> {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine<History> {
    /// Create an engine with the default configuration and an in-memory
    /// history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration and an in-memory
    /// history.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let history = History::new(config.history_capacity);
        Self::with_sink(config, history)
    }
}

impl<S: HistorySink> Engine<S> {
    /// Create an engine sending its calculations to `history`
    pub fn with_sink(config: EngineConfig, history: S) -> Self {
        Self {
            state: EngineState::with_modes(config.angle_mode, config.numeral_base),
            config,
            history,
        }
    }

    /// Replace the displayed expression
    pub fn set_expression<E: Into<String>>(&mut self, expression: E) {
        self.state.set_expression(expression);
    }

    /// The displayed expression
    #[must_use]
    pub fn current_expression(&self) -> &str {
        self.state.current_expression()
    }

    /// Evaluate the displayed expression and get the formatted result.
    ///
    /// An empty expression, or `0`, is not evaluated and gives `Ok(None)`.
    /// On success the last result is updated and the calculation is sent to
    /// the history sink. On failure the state is left unchanged.
    pub fn calculate(&mut self) -> Result<Option<String>, Error> {
        let expression = self.state.current_expression().to_owned();
        if expression.is_empty() || expression == "0" {
            return Ok(None);
        }

        let canonical = normalize(&expression);
        debug!("evaluating {:?} as {:?}", expression, canonical);
        let value = evaluate(&canonical, &self.state).map_err(|error| {
            debug!("{:?} failed with {:?}: {}", expression, error.kind(), error);
            error
        })?;

        let result = self.render(&value);
        debug!("{:?} = {}", expression, result);
        self.state.set_last_result(value);
        self.history.record(HistoryRecord::new(expression, result.clone()));
        Ok(Some(result))
    }

    fn render(&self, value: &Value) -> String {
        match self.state.numeral_base() {
            NumeralBase::Decimal => format_with_precision(value, self.config.precision),
            base => format_in_base(value, base),
        }
    }

    /// The most recent successfully computed value
    #[must_use]
    pub fn last_result(&self) -> Value {
        self.state.last_result()
    }

    /// Reset the displayed expression and the last result
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// `MC`
    pub fn memory_clear(&mut self) {
        self.state.memory_clear();
    }

    /// `MR`
    #[must_use]
    pub fn memory_recall(&self) -> f64 {
        self.state.memory_recall()
    }

    /// `MS`, see [`EngineState::memory_store`]
    pub fn memory_store(&mut self) {
        self.state.memory_store();
    }

    /// `M+`, see [`EngineState::memory_add`]
    pub fn memory_add(&mut self) {
        self.state.memory_add();
    }

    /// `M-`, see [`EngineState::memory_subtract`]
    pub fn memory_subtract(&mut self) {
        self.state.memory_subtract();
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.state.angle_mode()
    }

    /// Set the angle mode of the trigonometric functions
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.state.set_angle_mode(mode);
    }

    /// Set the angle mode by name, `deg` or `rad`. Other names are ignored.
    pub fn set_angle_mode_named(&mut self, name: &str) {
        self.state.set_angle_mode_named(name);
    }

    /// Current numeral base
    #[must_use]
    pub fn numeral_base(&self) -> NumeralBase {
        self.state.numeral_base()
    }

    /// Set the numeral base of the literals and results
    pub fn set_numeral_base(&mut self, base: NumeralBase) {
        self.state.set_numeral_base(base);
    }

    /// See [`convert_to_base`](crate::convert_to_base)
    pub fn convert_to_base<'a, L: Into<Operand<'a>>>(
        &self,
        literal: L,
        target: NumeralBase,
    ) -> Result<String, Error> {
        base::convert_to_base(literal, target)
    }

    /// See [`bitwise`](crate::bitwise)
    pub fn bitwise<'a, 'b, A, B>(&self, a: A, b: B, op: BitwiseOp) -> i64
    where
        A: Into<Operand<'a>>,
        B: Into<Operand<'b>>,
    {
        base::bitwise(a, b, op)
    }

    /// The engine state
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The engine configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The history sink
    #[must_use]
    pub fn history(&self) -> &S {
        &self.history
    }

    /// The history sink, mutably
    pub fn history_mut(&mut self) -> &mut S {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_case::test_case;

    fn calculate(expression: &str) -> Result<Option<String>, Error> {
        let mut engine = Engine::new();
        engine.set_expression(expression);
        engine.calculate()
    }

    #[test_case("1+2" => "3" ; "integer collapse")]
    #[test_case("0.1+0.2" => "0.3" ; "floating point noise")]
    #[test_case("sin(90)" => "1" ; "degrees by default")]
    #[test_case("50%" => "0.5" ; "percent")]
    #[test_case("200×15%" => "30" ; "percent of a value")]
    #[test_case("√16+5²" => "29" ; "glyphs")]
    #[test_case("2π" => "6.283185307" ; "implicit multiplication with pi")]
    #[test_case("10ˣ3" => "1000" ; "power of ten")]
    #[test_case("eˣ(0)" => "1" ; "exponential")]
    #[test_case("ʸ√(32,5)" => "2" ; "nth root")]
    #[test_case("n!(6)" => "720" ; "factorial")]
    #[test_case("17 mod 5" => "2" ; "modulo")]
    #[test_case("±3+5" => "2" ; "sign")]
    #[test_case("∛(-8)" => "1+1.732050808i" ; "complex cube root")]
    #[test_case("2/3" => "0.6666666667" ; "significant digits")]
    #[test_case("e xʸ 2" => "7.389056099" ; "power of e")]
    #[test_case("e mod 3" => "2.718281828" ; "e modulo")]
    #[test_case("2 mod e" => "2" ; "modulo by e")]
    #[test_case("√π" => "1.772453851" ; "square root of pi")]
    fn results(expression: &str) -> String {
        calculate(expression)
            .expect("calculation failed")
            .expect("calculation skipped")
    }

    #[test_case("5/0" => ErrorKind::DivisionByZero ; "division by zero")]
    #[test_case("asin(2)" => ErrorKind::Domain ; "domain error")]
    #[test_case("171!" => ErrorKind::Overflow ; "overflow")]
    #[test_case("n!(1e20)" => ErrorKind::Overflow ; "factorial of a large literal")]
    #[test_case("2++×3" => ErrorKind::Syntax ; "syntax error")]
    #[test_case("²" => ErrorKind::Syntax ; "dangling glyph")]
    fn failures(expression: &str) -> ErrorKind {
        calculate(expression).expect_err("calculation succeeded").kind()
    }

    #[test]
    fn skipped_expressions() {
        let mut engine = Engine::new();
        assert_eq!(engine.calculate(), Ok(None));
        engine.set_expression("0");
        assert_eq!(engine.calculate(), Ok(None));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn state_updates() {
        let mut engine = Engine::new();
        engine.set_expression("6×7");
        assert_eq!(engine.calculate(), Ok(Some("42".to_owned())));
        assert_eq!(engine.last_result(), Value::Integer(42));
        assert_eq!(engine.current_expression(), "6×7");

        let record = engine.history().records().next().cloned();
        assert_eq!(
            record.map(|r| (r.expression, r.result)),
            Some(("6×7".to_owned(), "42".to_owned()))
        );

        // failures keep the last result and are not recorded
        engine.set_expression("1/0");
        assert!(engine.calculate().is_err());
        assert_eq!(engine.last_result(), Value::Integer(42));
        assert_eq!(engine.history().len(), 1);

        engine.clear();
        assert_eq!(engine.current_expression(), "");
        assert_eq!(engine.last_result(), Value::Integer(0));
    }

    #[test]
    fn memory_fallback() {
        let mut engine = Engine::new();
        engine.set_expression("30÷2");
        engine.calculate().unwrap();
        engine.set_expression("10");
        engine.memory_store();
        engine.set_expression("sin(30)");
        engine.memory_add();
        assert_eq!(engine.memory_recall(), 25.0);
        engine.memory_subtract();
        engine.memory_subtract();
        assert_eq!(engine.memory_recall(), -5.0);
        engine.memory_clear();
        assert_eq!(engine.memory_recall(), 0.0);
    }

    #[test]
    fn angle_modes() {
        let mut engine = Engine::new();
        engine.set_angle_mode_named("rad");
        assert_eq!(engine.angle_mode(), AngleMode::Radians);
        engine.set_expression("sin(3.14159265358979)");
        let result: f64 = engine.calculate().unwrap().unwrap().parse().unwrap();
        assert!(result.abs() < 1e-10);

        engine.set_angle_mode_named("gradians");
        assert_eq!(engine.angle_mode(), AngleMode::Radians);
        engine.set_angle_mode_named("deg");
        engine.set_expression("acos(0.5)");
        assert_eq!(engine.calculate(), Ok(Some("60".to_owned())));
    }

    #[test]
    fn programmer_mode() {
        let config = EngineConfig::default().with_numeral_base(NumeralBase::Hexadecimal);
        let mut engine = Engine::with_config(config);
        engine.set_expression("FF + 0b1");
        assert_eq!(engine.calculate(), Ok(Some("0x100".to_owned())));
        engine.set_expression("A ÷ 4");
        assert_eq!(engine.calculate(), Ok(Some("0x2".to_owned())));

        engine.set_numeral_base(NumeralBase::Octal);
        engine.set_expression("8");
        assert!(engine.calculate().is_err());

        assert_eq!(
            engine.convert_to_base("255", NumeralBase::Hexadecimal),
            Ok("0xFF".to_owned())
        );
        assert_eq!(engine.bitwise(12, 10, BitwiseOp::And), 8);
        assert_eq!(engine.bitwise(5, 0, BitwiseOp::Not), -6);
    }

    #[test]
    fn custom_sink() {
        #[derive(Default)]
        struct Collect(Vec<HistoryRecord>);

        impl HistorySink for Collect {
            fn record(&mut self, record: HistoryRecord) {
                self.0.push(record);
            }
        }

        let config = EngineConfig::default().with_precision(3);
        let mut engine = Engine::with_sink(config, Collect::default());
        engine.set_expression("2÷3");
        assert_eq!(engine.calculate(), Ok(Some("0.667".to_owned())));
        assert_eq!(engine.history().0.len(), 1);
        assert_eq!(engine.history().0[0].result, "0.667");
    }
}
