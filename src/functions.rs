use hashbrown::HashMap;
use std::ops::RangeInclusive;

/// Functions callable from an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// `sqrt`
    Sqrt,
    /// `cbrt`
    Cbrt,
    /// `nthroot`
    NthRoot,
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `tan`
    Tan,
    /// `asin`
    Asin,
    /// `acos`
    Acos,
    /// `atan`
    Atan,
    /// `sinh`
    Sinh,
    /// `cosh`
    Cosh,
    /// `tanh`
    Tanh,
    /// `log`
    Log,
    /// `ln`
    Ln,
    /// `exp`
    Exp,
    /// `factorial`
    Factorial,
    /// `degrees`
    Degrees,
    /// `radians`
    Radians,
    /// `ceil`
    Ceil,
    /// `floor`
    Floor,
    /// `abs`
    Abs,
    /// `round`
    Round,
    /// `pow`
    Pow,
}

impl Function {
    /// All the known functions
    pub const ALL: [Self; 23] = [
        Self::Sqrt,
        Self::Cbrt,
        Self::NthRoot,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Log,
        Self::Ln,
        Self::Exp,
        Self::Factorial,
        Self::Degrees,
        Self::Radians,
        Self::Ceil,
        Self::Floor,
        Self::Abs,
        Self::Round,
        Self::Pow,
    ];

    /// Name of the function, as written in a canonical expression
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::NthRoot => "nthroot",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Factorial => "factorial",
            Self::Degrees => "degrees",
            Self::Radians => "radians",
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Pow => "pow",
        }
    }

    /// Accepted number of arguments
    #[must_use]
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::NthRoot | Self::Pow => 2..=2,
            Self::Round => 1..=2,
            _ => 1..=1,
        }
    }
}

lazy_static! {
    /// Lookup table from function name to [`Function`]
    pub static ref FUNCTIONS: HashMap<&'static str, Function> = {
        let mut map = HashMap::with_capacity(Function::ALL.len());
        for &function in &Function::ALL {
            map.insert(function.name(), function);
        }
        map
    };
}

/// Get the value of a named constant
#[must_use]
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{constant, Function, FUNCTIONS};

    #[test]
    fn lookup() {
        assert_eq!(FUNCTIONS.len(), Function::ALL.len());
        for &function in &Function::ALL {
            assert_eq!(FUNCTIONS.get(function.name()), Some(&function));
        }
        assert_eq!(FUNCTIONS.get("nthroot"), Some(&Function::NthRoot));
        assert_eq!(FUNCTIONS.get("log10"), None);
        assert_eq!(FUNCTIONS.get("pi"), None);
    }

    #[test]
    fn arity() {
        assert!(Function::Sin.arity().contains(&1));
        assert!(!Function::Sin.arity().contains(&2));
        assert!(Function::Round.arity().contains(&2));
        assert!(!Function::NthRoot.arity().contains(&1));
    }

    #[test]
    fn constants() {
        assert_eq!(constant("pi"), Some(std::f64::consts::PI));
        assert_eq!(constant("e"), Some(std::f64::consts::E));
        assert_eq!(constant("tau"), None);
    }
}
