//! Context configuration
//!
//! Startup settings for a [`LocalizationContext`], deserializable from TOML:
//!
//! ```toml
//! default_locale = "en"
//! current_locale = "fr"
//! bundle_paths = ["resources", "resources/extra"]
//!
//! [translation]
//! google_api_key = "..."
//! ```

use crate::catalog::LocalizationContext;
use crate::error::{LocalizationError, LocalizationResult};
use crate::locale::Locale;
use crate::source::PropertiesSource;
use loquat_translation::GoogleTranslateV2;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TranslationConfig {
    pub google_api_key: Option<String>,
}

/// Settings a context is built from
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Default locale tag, e.g. `en`
    pub default_locale: String,
    /// Initial current locale tag; falls back to the default
    pub current_locale: Option<String>,
    /// Ordered search path for `.properties` bundle files
    #[serde(default)]
    pub bundle_paths: Vec<PathBuf>,
    #[serde(default)]
    pub translation: TranslationConfig,
}

impl CatalogConfig {
    /// Read a configuration from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> LocalizationResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|error| {
            LocalizationError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid configuration: {error}"),
            ))
        })
    }
}

impl LocalizationContext {
    /// Build a context from configuration: properties source over the
    /// configured search path, locales applied, and a Google provider
    /// attached when an API key is present.
    pub fn from_config(config: &CatalogConfig) -> LocalizationResult<Self> {
        let default_locale = Locale::parse(&config.default_locale)?;
        let source = PropertiesSource::new(config.bundle_paths.clone());

        let ctx = match &config.translation.google_api_key {
            Some(api_key) => Self::new(default_locale.clone(), source)
                .with_provider(GoogleTranslateV2::new(api_key.clone())),
            None => Self::new(default_locale.clone(), source),
        };

        if let Some(tag) = &config.current_locale {
            ctx.set_current_locale(Locale::parse(tag)?);
        }

        info!(
            default = %default_locale,
            current = %ctx.current_locale(),
            "localization context configured"
        );
        Ok(ctx)
    }
}
