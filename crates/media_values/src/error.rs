//! Error types for primitive value operations.

/// Errors that can occur when constructing, parsing, or evaluating values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Text does not match the canonical rational grammar.
    #[error("Malformed rational value '{input}': {reason}")]
    MalformedValue { input: String, reason: &'static str },

    /// A rational with a zero denominator was evaluated numerically.
    #[error("Division by zero evaluating rational {numerator}/0")]
    DivisionByZero { numerator: i32 },

    /// No member of the enumeration carries this code.
    #[error("Unknown code {code} for enumeration {type_name}")]
    UnknownCode { type_name: &'static str, code: i64 },

    /// No member of the enumeration carries this symbol.
    #[error("Unknown symbol '{symbol}' for enumeration {type_name}")]
    UnknownSymbol {
        type_name: &'static str,
        symbol: String,
    },
}

/// Result type for value operations.
pub type ValueResult<T> = Result<T, ValueError>;
