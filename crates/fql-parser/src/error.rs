//! Parser error types

use thiserror::Error;

/// Compile error for a subscription string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An operator token was required but the stream ended
    #[error("Operator token is missing")]
    MissingOperator,

    /// A value token was required but the stream ended
    #[error("Value token is missing")]
    MissingValue,

    /// Operator text outside the supported set
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// A function call ended before one of its arguments
    #[error("{function}() is missing a {argument} argument")]
    MissingArgument {
        function: String,
        argument: &'static str,
    },

    /// An opening parenthesis with no matching close
    #[error("Unclosed group: expected ')'")]
    UnclosedGroup,

    /// The input produced no conditions at all
    #[error("Subscription contains no conditions")]
    EmptyExpression,
}

/// Error when rendering a condition tree back to source text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// A comparison leaf without a value cannot be rendered
    #[error("Operator '{0}' requires a value")]
    MissingValue(String),

    /// A group with no children cannot be rendered
    #[error("Group has no children")]
    EmptyGroup,
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
