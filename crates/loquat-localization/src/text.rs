//! Memoized localizable text
//!
//! A `LocalizedText` is a string value optionally bound to a (bundle, key)
//! template. Free text never changes; bound text re-resolves on demand and
//! memoizes the locale it was last resolved for, so repeated calls with the
//! same locale perform zero additional lookups.

use crate::catalog::{BundleLookup, LocalizationContext};
use crate::error::LocalizationResult;
use crate::locale::Locale;
use loquat_translation::{OperationStatus, TranslationOperation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A localizable and/or translatable string value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    value: String,
    original: Option<String>,
    bundle: Option<String>,
    key: Option<String>,
    #[serde(skip)]
    localized_for: Option<Locale>,
    #[serde(skip)]
    translated_for: Option<Locale>,
    #[serde(skip)]
    confidence: f64,
}

impl LocalizedText {
    /// Free text: carries no template, `resolve` never changes the value
    pub fn free(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidence: 1.0,
            ..Self::default()
        }
    }

    /// Bind to a bare key. The owning bundle must already be loaded by the
    /// time the text is resolved.
    pub fn from_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            confidence: 1.0,
            ..Self::default()
        }
    }

    /// Bind to a (bundle, key) pair. The bundle is loaded eagerly and the
    /// value resolved immediately against the context's current locale.
    pub fn from_bundle_key(
        ctx: &LocalizationContext,
        bundle: impl Into<String>,
        key: impl Into<String>,
    ) -> LocalizationResult<Self> {
        let bundle = bundle.into();
        let key = key.into();
        ctx.load(&bundle, None)?;

        let mut text = Self {
            bundle: Some(bundle),
            key: Some(key),
            confidence: 1.0,
            ..Self::default()
        };
        let current = ctx.current_locale();
        text.resolve(ctx, &current)?;
        Ok(text)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value snapshotted before the first translation, if any
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Confidence reported by the last translation or detection
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Locale the value was last resolved for
    pub fn localized_for(&self) -> Option<&Locale> {
        self.localized_for.as_ref()
    }

    /// Locale the value was last translated into
    pub fn translated_for(&self) -> Option<&Locale> {
        self.translated_for.as_ref()
    }

    /// Whether the text carries a full (bundle, key) template of its own
    pub fn has_template(&self) -> bool {
        self.bundle.is_some() && self.key.is_some()
    }

    /// Replace the value directly. Does not touch the memoized locales.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Resolve the value for a locale.
    ///
    /// Free text is a no-op. Bound text consults the lookup only when the
    /// locale differs from the memoized one.
    pub fn resolve(
        &mut self,
        resolver: &dyn BundleLookup,
        locale: &Locale,
    ) -> LocalizationResult<()> {
        let key = match self.key.as_deref() {
            Some(key) => key,
            None => return Ok(()),
        };
        if self.localized_for.as_ref() == Some(locale) {
            return Ok(());
        }

        let value = match self.bundle.as_deref() {
            Some(bundle) => resolver.lookup(bundle, key, locale)?,
            None => resolver.lookup_key(key, locale)?,
        };

        debug!(key, locale = %locale, "localized text resolved");
        self.value = value;
        self.localized_for = Some(locale.clone());
        Ok(())
    }

    /// Engine write-back for members whose template lives in the member
    /// metadata rather than on the text itself.
    pub(crate) fn apply_resolved(&mut self, value: String, locale: Locale) {
        self.value = value;
        self.localized_for = Some(locale);
    }

    /// Translate the value into the target language through the context's
    /// provider. Memoized per target locale; the first call snapshots the
    /// pre-translation value into `original`.
    ///
    /// Returns the operation record: an already-applied target comes back
    /// `Invalidated` without a network call, and a provider rejection comes
    /// back `Failed` with the value untouched. Check the status before
    /// trusting the value.
    pub fn translate(
        &mut self,
        ctx: &LocalizationContext,
        source: Option<&Locale>,
        target: &Locale,
    ) -> LocalizationResult<TranslationOperation> {
        if self.translated_for.as_ref() == Some(target) {
            let mut operation = TranslationOperation::translate(
                source.map(|locale| locale.as_language_identifier().clone()),
                target.as_language_identifier().clone(),
                self.value.clone(),
            )
            .with_known_translation(self.value.clone());
            operation.invalidate("translation for the target locale is already applied");
            return Ok(operation);
        }
        if self.original.is_none() {
            self.original = Some(self.value.clone());
        }

        let operation = ctx.translate(source, target, &self.value)?;
        if operation.status() == OperationStatus::Success {
            if let Some(translated) = operation.translated_text() {
                debug!(
                    target = %target,
                    confidence = operation.confidence(),
                    "localized text translated"
                );
                self.value = translated.to_string();
            }
            self.confidence = operation.confidence();
            self.translated_for = Some(target.clone());
        }
        Ok(operation)
    }

    /// Detect the language of the value. Updates the confidence but never
    /// the value itself.
    pub fn detect_language(
        &mut self,
        ctx: &LocalizationContext,
    ) -> LocalizationResult<Option<(Locale, f64)>> {
        let operation = ctx.detect(&self.value)?;
        if operation.status() != OperationStatus::Success {
            return Ok(None);
        }
        match operation.detected_language() {
            Some(language) => {
                self.confidence = operation.confidence();
                Ok(Some((Locale::from(language.clone()), self.confidence)))
            }
            None => Ok(None),
        }
    }
}

impl std::fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::free(value)
    }
}

impl From<String> for LocalizedText {
    fn from(value: String) -> Self {
        Self::free(value)
    }
}
