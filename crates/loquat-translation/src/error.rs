//! Error types for translation operations

use thiserror::Error;

/// Errors that can occur while executing translation operations
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The provider answered with a non-success response
    #[error("Translation provider rejected the request (status {status}): {message}")]
    Provider { status: u16, message: String },

    /// The HTTP round-trip itself failed
    #[error("Transport error while calling the translation provider: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider response could not be deserialized
    #[error("Failed to decode the provider response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The selected provider does not implement the requested operation
    #[error("Operation '{operation}' is not supported by this provider")]
    NotSupported { operation: String },

    /// A successful response carried no usable result
    #[error("Provider response for operation '{operation}' carried no result")]
    MissingResult { operation: String },

    /// No translation provider has been configured
    #[error("No translation provider configured")]
    NoProvider,

    /// An operation required a piece of input that was not set
    #[error("Operation '{operation}' is missing required input: {field}")]
    MissingInput {
        operation: String,
        field: &'static str,
    },
}

/// Result type for translation operations
pub type TranslationResult<T> = Result<T, TranslationError>;
