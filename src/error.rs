//! Error types for the fee engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the error conditions that can occur while loading rule tables or
//! validating caller input.
//!
//! Two situations are deliberately *not* errors: an unknown category is
//! silently priced with the default `"most"` schedule, and a zero gross
//! amount reports an effective rate of `0.00%`.

use thiserror::Error;

/// The main error type for the fee engine.
///
/// # Example
///
/// ```
/// use fee_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/fee_rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/fee_rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A category's fee schedule violates the tier or threshold invariants.
    #[error("Malformed fee schedule for category '{category}': {message}")]
    MalformedSchedule {
        /// The category whose schedule is malformed.
        category: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// The rule table has no `"most"` fallback schedule.
    #[error("Rule table is missing the default 'most' schedule")]
    MissingDefaultSchedule,

    /// A caller-supplied amount was rejected.
    #[error("Invalid {field}: {value} must not be negative")]
    InvalidAmount {
        /// The name of the rejected field.
        field: String,
        /// The rejected value, as supplied.
        value: String,
    },

    /// Price plus shipping, or the fees charged on it, would not fit in a
    /// `Decimal`.
    #[error("Amount out of range: price {price} plus shipping {shipping} is too large to price")]
    AmountOutOfRange {
        /// The item price, as supplied.
        price: String,
        /// The shipping charge, as supplied.
        shipping: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
