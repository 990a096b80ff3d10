//! Locale-aware text resolution over layered resource bundles
//!
//! This crate resolves declared textual members of arbitrary objects to
//! locale-specific strings sourced from resource bundles, with:
//!
//! - a bundle store partitioned by (bundle name, language), loaded through a
//!   pluggable [`BundleSource`](source::BundleSource)
//! - a deterministic, bounded locale-fallback chain
//!   (requested → current → default → platform)
//! - [`LocalizedText`](text::LocalizedText), a memoized localizable string
//!   value
//! - a member-discovery protocol ([`Localizable`](localize::Localizable))
//!   with `${placeholder}` template expansion
//! - one-shot machine translation through `loquat-translation`
//!
//! All state lives in an explicit [`LocalizationContext`](catalog::LocalizationContext)
//! passed by reference into every call; there is no hidden process-wide
//! singleton.
//!
//! # Example
//!
//! ```no_run
//! use loquat_localization::{Locale, LocalizationContext, LocalizedText, PropertiesSource};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = LocalizationContext::new(Locale::parse("en")?, PropertiesSource::single("resources"));
//! ctx.set_current_locale(Locale::parse("fr")?);
//!
//! let mut name = LocalizedText::from_bundle_key(&ctx, "i18n/day", "day.SUNDAY.name")?;
//! assert_eq!(name.value(), "Dimanche");
//!
//! name.resolve(&ctx, &Locale::parse("de")?)?;
//! assert_eq!(name.value(), "Sonntag");
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod locale;
pub mod localize;
pub mod source;
pub mod text;
pub mod types;

pub use bundle::Bundle;
pub use catalog::{BundleLookup, LocalizationContext};
pub use config::{CatalogConfig, TranslationConfig};
pub use error::{LocalizationError, LocalizationResult};
pub use locale::{Locale, SUPPORTED_LANGUAGES};
pub use localize::{expand_template, Localizable, Localizer, MemberSlot, MemberSpec, Placeholders};
pub use source::{parse_properties, BundleSource, PropertiesSource};
pub use text::LocalizedText;

// Re-export the operation types callers inspect after translation calls
pub use loquat_translation::{OperationStatus, TranslationOperation};
