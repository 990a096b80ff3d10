//! One-shot machine translation against remote providers
//!
//! This crate models translation work as requests made of operation records
//! (translate, detect, supported languages) executed by a provider. Each
//! operation carries a lifecycle status, an execution-time measurement and
//! the outcome; callers inspect the record rather than catch exceptions:
//!
//! - `Created` — not yet executed
//! - `Success` — results are trustworthy
//! - `Failed` — provider said no, `reason()` has details
//! - `Invalidated` — skipped without a network call
//!
//! The shipped provider targets the Google Cloud Translation API v2.
//!
//! # Example
//!
//! ```no_run
//! use loquat_translation::{GoogleTranslateV2, TranslationOperation, TranslationProvider, TranslationRequest};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GoogleTranslateV2::new("api-key");
//! let mut request = TranslationRequest::new("translate")
//!     .with_operation(TranslationOperation::translate(
//!         Some("en".parse()?),
//!         "fr".parse()?,
//!         "Sunday",
//!     ));
//! provider.execute(&mut request)?;
//! println!("{:?}", request.operations()[0].translated_text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod google;
pub mod operation;
pub mod provider;
pub mod request;

pub use error::{TranslationError, TranslationResult};
pub use google::GoogleTranslateV2;
pub use operation::{OperationKind, OperationStatus, TranslationOperation};
pub use provider::{execute_single, invalidate_known_results, TranslationProvider};
pub use request::{TranslationRequest, PROPERTY_FORCE};

// Re-export the language identifier type used throughout the API
pub use unic_langid::LanguageIdentifier;
