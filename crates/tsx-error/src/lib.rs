use thiserror::Error;

/// Primary error type for the tsearch-extras crates.
///
/// Every failure is surfaced synchronously to the immediate caller. Nothing
/// is retried internally; retry (for example re-resolving a configuration)
/// is a caller policy.
#[derive(Error, Debug)]
pub enum TsError {
    // === Malformed Input ===
    /// A word entry produced by the headline annotator is unusable.
    #[error("malformed headline word at index {index}: {detail}")]
    MalformedWord { index: usize, detail: String },

    /// The configuration identifier does not name a known text search
    /// configuration.
    #[error("text search configuration \"{name}\" does not exist")]
    UnknownConfiguration { name: String },

    /// An option string could not be applied.
    #[error("invalid option {option}: {detail}")]
    InvalidOption { option: String, detail: String },

    // === Result Shape ===
    /// The row shape the caller expects does not match the one produced.
    #[error("function returning {actual} called in context that expects {expected}")]
    ResultShapeMismatch { expected: String, actual: String },

    // === Argument Errors ===
    /// Argument of the wrong type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Function invoked with an unsupported number of arguments.
    #[error("function {name} expects {expected} arguments, got {actual}")]
    WrongArgumentCount {
        name: String,
        expected: String,
        actual: usize,
    },

    /// A strict function received NULL.
    #[error("function {name} does not accept NULL arguments")]
    NullArgument { name: String },

    /// No function with this name and arity is registered.
    #[error("function {name}({num_args}) does not exist")]
    NoSuchFunction { name: String, num_args: i32 },

    // === Resource Errors ===
    /// Growth of a result buffer could not acquire memory.
    #[error("out of memory: cannot grow result buffer to {requested} entries")]
    OutOfMemory { requested: usize },

    /// A value does not fit the integer width of the result column.
    #[error("{what} out of range: {value}")]
    OutOfRange { what: String, value: String },

    // === Internal Errors ===
    /// Internal logic error (should never happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// SQLSTATE-style error classes reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// `22023` invalid_parameter_value.
    InvalidParameterValue,
    /// `42704` undefined_object.
    UndefinedObject,
    /// `0A000` feature_not_supported.
    FeatureNotSupported,
    /// `42804` datatype_mismatch.
    DatatypeMismatch,
    /// `42883` undefined_function.
    UndefinedFunction,
    /// `22004` null_value_not_allowed.
    NullValueNotAllowed,
    /// `22003` numeric_value_out_of_range.
    NumericValueOutOfRange,
    /// `53200` out_of_memory.
    OutOfMemory,
    /// `XX000` internal_error.
    Internal,
}

impl ErrorCode {
    /// The five-character SQLSTATE for this class.
    pub const fn sqlstate(self) -> &'static str {
        match self {
            Self::InvalidParameterValue => "22023",
            Self::UndefinedObject => "42704",
            Self::FeatureNotSupported => "0A000",
            Self::DatatypeMismatch => "42804",
            Self::UndefinedFunction => "42883",
            Self::NullValueNotAllowed => "22004",
            Self::NumericValueOutOfRange => "22003",
            Self::OutOfMemory => "53200",
            Self::Internal => "XX000",
        }
    }
}

impl TsError {
    /// Map this error to the SQLSTATE class a host would raise.
    #[allow(clippy::match_same_arms)]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MalformedWord { .. } | Self::InvalidOption { .. } => {
                ErrorCode::InvalidParameterValue
            }
            Self::UnknownConfiguration { .. } => ErrorCode::UndefinedObject,
            Self::ResultShapeMismatch { .. } => ErrorCode::FeatureNotSupported,
            Self::TypeMismatch { .. } => ErrorCode::DatatypeMismatch,
            Self::WrongArgumentCount { .. } | Self::NoSuchFunction { .. } => {
                ErrorCode::UndefinedFunction
            }
            Self::NullArgument { .. } => ErrorCode::NullValueNotAllowed,
            Self::OutOfRange { .. } => ErrorCode::NumericValueOutOfRange,
            Self::OutOfMemory { .. } => ErrorCode::OutOfMemory,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Whether the caller can likely fix this without code changes.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownConfiguration { .. }
                | Self::InvalidOption { .. }
                | Self::ResultShapeMismatch { .. }
                | Self::TypeMismatch { .. }
                | Self::WrongArgumentCount { .. }
                | Self::NullArgument { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownConfiguration { .. } => {
                Some("Use one of the registered configurations, e.g. 'simple' or 'english'")
            }
            Self::ResultShapeMismatch { .. } => {
                Some("Call the function in a FROM clause with columns (offset integer, len integer)")
            }
            Self::MalformedWord { .. } => Some("The headline annotator produced invalid output"),
            Self::OutOfMemory { .. } => Some("Use the streaming form to avoid buffering all matches"),
            _ => None,
        }
    }

    /// Create a malformed-word error.
    pub fn malformed_word(index: usize, detail: impl Into<String>) -> Self {
        Self::MalformedWord {
            index,
            detail: detail.into(),
        }
    }

    /// Create an unknown-configuration error.
    pub fn unknown_configuration(name: impl Into<String>) -> Self {
        Self::UnknownConfiguration { name: name.into() }
    }

    /// Create an invalid-option error.
    pub fn invalid_option(option: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            detail: detail.into(),
        }
    }

    /// Create a type-mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using `TsError`.
pub type Result<T> = std::result::Result<T, TsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_malformed_word() {
        let err = TsError::malformed_word(3, "negative length -1");
        assert_eq!(
            err.to_string(),
            "malformed headline word at index 3: negative length -1"
        );
    }

    #[test]
    fn error_display_unknown_configuration() {
        let err = TsError::unknown_configuration("klingon");
        assert_eq!(
            err.to_string(),
            "text search configuration \"klingon\" does not exist"
        );
    }

    #[test]
    fn error_display_shape_mismatch() {
        let err = TsError::ResultShapeMismatch {
            expected: "(text)".to_owned(),
            actual: "(offset integer, len integer)".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "function returning (offset integer, len integer) called in context that expects (text)"
        );
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(
            TsError::malformed_word(0, "x").error_code(),
            ErrorCode::InvalidParameterValue
        );
        assert_eq!(
            TsError::unknown_configuration("x").error_code(),
            ErrorCode::UndefinedObject
        );
        assert_eq!(
            TsError::OutOfMemory { requested: 9 }.error_code(),
            ErrorCode::OutOfMemory
        );
        assert_eq!(
            TsError::type_mismatch("text", "integer").error_code(),
            ErrorCode::DatatypeMismatch
        );
        assert_eq!(TsError::internal("bug").error_code(), ErrorCode::Internal);
    }

    #[test]
    fn sqlstate_values() {
        assert_eq!(ErrorCode::FeatureNotSupported.sqlstate(), "0A000");
        assert_eq!(ErrorCode::OutOfMemory.sqlstate(), "53200");
        assert_eq!(ErrorCode::UndefinedObject.sqlstate(), "42704");
        assert_eq!(ErrorCode::Internal.sqlstate(), "XX000");
    }

    #[test]
    fn user_recoverable() {
        assert!(TsError::unknown_configuration("x").is_user_recoverable());
        assert!(
            TsError::NullArgument {
                name: "f".to_owned()
            }
            .is_user_recoverable()
        );
        assert!(!TsError::internal("bug").is_user_recoverable());
        assert!(!TsError::OutOfMemory { requested: 1 }.is_user_recoverable());
    }

    #[test]
    fn suggestions() {
        assert!(TsError::unknown_configuration("x").suggestion().is_some());
        assert!(TsError::OutOfMemory { requested: 1 }.suggestion().is_some());
        assert!(TsError::internal("x").suggestion().is_none());
    }

    #[test]
    fn convenience_constructors() {
        let err = TsError::invalid_option("policy", "unknown value 'sideways'");
        assert!(matches!(
            err,
            TsError::InvalidOption { ref option, .. } if option == "policy"
        ));

        let err = TsError::malformed_word(7, "bad");
        assert!(matches!(err, TsError::MalformedWord { index: 7, .. }));
    }
}
