use thiserror::Error;

/// Error type for the crunchcalc crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed token stream: unbalanced parenthesis, missing operand,
    /// unknown identifier, ...
    #[error("SyntaxError: {0}")]
    SyntaxError(String),
    /// Division or modulo by zero
    #[error("DivisionByZero: division by zero")]
    DivisionByZero,
    /// Function input outside of its mathematical domain
    #[error("DomainError: {0}")]
    DomainError(String),
    /// Result does not fit in the representable range
    #[error("Overflow: {0}")]
    Overflow(String),
    /// Literal could not be read in any supported numeral base
    #[error("ConversionError: {0}")]
    ConversionError(String),
}

/// The kind of an [`Error`], without diagnostic text.
///
/// Callers presenting errors to users map each kind to a localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::SyntaxError`]
    Syntax,
    /// See [`Error::DivisionByZero`]
    DivisionByZero,
    /// See [`Error::DomainError`]
    Domain,
    /// See [`Error::Overflow`]
    Overflow,
    /// See [`Error::ConversionError`]
    Conversion,
}

impl Error {
    /// Get the kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::SyntaxError(_) => ErrorKind::Syntax,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::DomainError(_) => ErrorKind::Domain,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::ConversionError(_) => ErrorKind::Conversion,
        }
    }

    pub(crate) fn syntax<S: Into<String>>(message: S) -> Self {
        Self::SyntaxError(message.into())
    }

    pub(crate) fn domain<S: Into<String>>(message: S) -> Self {
        Self::DomainError(message.into())
    }

    pub(crate) fn overflow<S: Into<String>>(message: S) -> Self {
        Self::Overflow(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn display() {
        assert_eq!(
            Error::syntax("mismatched parenthesis").to_string(),
            "SyntaxError: mismatched parenthesis"
        );
        assert_eq!(
            Error::DivisionByZero.to_string(),
            "DivisionByZero: division by zero"
        );
        assert_eq!(
            Error::domain("math domain error").to_string(),
            "DomainError: math domain error"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(Error::syntax("x").kind(), ErrorKind::Syntax);
        assert_eq!(Error::DivisionByZero.kind(), ErrorKind::DivisionByZero);
        assert_eq!(Error::overflow("x").kind(), ErrorKind::Overflow);
        assert_eq!(
            Error::ConversionError("x".into()).kind(),
            ErrorKind::Conversion
        );
    }
}
