//! Error types for localization operations

use thiserror::Error;

/// Errors that can occur while loading bundles or resolving localized text
#[derive(Error, Debug)]
pub enum LocalizationError {
    /// No data for the bundle in any fallback candidate
    #[error("Resource bundle '{bundle}' cannot be found for any candidate locale")]
    BundleNotFound { bundle: String },

    /// Key absent after reload-and-retry across the full fallback chain
    #[error("Resource key '{key}' not found in bundle '{bundle}' for locale '{locale}'")]
    KeyNotFound {
        bundle: String,
        key: String,
        locale: String,
    },

    /// No loaded bundle contains the requested key
    #[error("No loaded resource bundle contains key '{key}'")]
    NoBundleForKey { key: String },

    /// A localizable member declaration lacks a required template piece
    #[error("Member '{member}' must have its '{part}' template set")]
    TemplateMissing {
        member: String,
        part: &'static str,
    },

    /// A `${placeholder}` referenced a member the object does not expose
    #[error("Template '{template}' references unknown placeholder '{placeholder}'")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    /// A template contains an unterminated `${` token
    #[error("Template '{template}' contains an unterminated placeholder")]
    MalformedTemplate { template: String },

    /// A declared member is missing from the object's accessor table
    #[error("Object exposes no member named '{member}'")]
    UnknownMember { member: String },

    /// A locale tag failed to parse
    #[error("Invalid locale tag: '{0}'")]
    InvalidLocale(String),

    /// Reading a bundle source failed
    #[error("I/O error while reading bundle data: {0}")]
    Io(#[from] std::io::Error),

    /// A translation call failed before producing an operation record
    #[error(transparent)]
    Translation(#[from] loquat_translation::TranslationError),
}

/// Result type for localization operations
pub type LocalizationResult<T> = Result<T, LocalizationError>;
