//! Translation operation records
//!
//! An operation describes one unit of work submitted to a provider (translate
//! a text, detect its language, or list supported languages) together with
//! its lifecycle status, timing and outcome. Callers must check the status
//! before trusting any result carried by the operation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use unic_langid::LanguageIdentifier;

/// Kind of work an operation represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Translate,
    Detect,
    SupportedLanguages,
}

impl OperationKind {
    /// Stable lowercase label, used in error messages and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Detect => "detect",
            Self::SupportedLanguages => "supported-languages",
        }
    }
}

/// Lifecycle status of a translation operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Created but not yet executed
    Created,
    /// Executed with success, results are trustworthy
    Success,
    /// Executed but the provider reported a failure, see `reason`
    Failed,
    /// Skipped without a network call, see `reason`
    Invalidated,
}

/// A single translation operation and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationOperation {
    kind: OperationKind,
    status: OperationStatus,
    source_language: Option<LanguageIdentifier>,
    target_language: Option<LanguageIdentifier>,
    text: Option<String>,
    translated_text: Option<String>,
    detected_language: Option<LanguageIdentifier>,
    supported_languages: Vec<LanguageIdentifier>,
    confidence: f64,
    reason: Option<String>,
    #[serde(skip)]
    execution_time: Duration,
    properties: HashMap<String, String>,
}

impl TranslationOperation {
    fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            status: OperationStatus::Created,
            source_language: None,
            target_language: None,
            text: None,
            translated_text: None,
            detected_language: None,
            supported_languages: Vec::new(),
            confidence: 1.0,
            reason: None,
            execution_time: Duration::ZERO,
            properties: HashMap::new(),
        }
    }

    /// Create a translate operation. The source language is optional; a
    /// provider left without one is expected to auto-detect it.
    pub fn translate(
        source: Option<LanguageIdentifier>,
        target: LanguageIdentifier,
        text: impl Into<String>,
    ) -> Self {
        let mut op = Self::new(OperationKind::Translate);
        op.source_language = source;
        op.target_language = Some(target);
        op.text = Some(text.into());
        op
    }

    /// Create a detect operation for the given text
    pub fn detect(text: impl Into<String>) -> Self {
        let mut op = Self::new(OperationKind::Detect);
        op.text = Some(text.into());
        op
    }

    /// Create a supported-languages operation. Language names in the answer
    /// are localized for `target`.
    pub fn supported_languages(target: LanguageIdentifier) -> Self {
        let mut op = Self::new(OperationKind::SupportedLanguages);
        op.target_language = Some(target);
        op
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn status(&self) -> OperationStatus {
        self.status
    }

    pub fn source_language(&self) -> Option<&LanguageIdentifier> {
        self.source_language.as_ref()
    }

    pub fn target_language(&self) -> Option<&LanguageIdentifier> {
        self.target_language.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Translated text; only meaningful when the status is `Success`
    pub fn translated_text(&self) -> Option<&str> {
        self.translated_text.as_deref()
    }

    pub fn detected_language(&self) -> Option<&LanguageIdentifier> {
        self.detected_language.as_ref()
    }

    pub fn supported(&self) -> &[LanguageIdentifier] {
        &self.supported_languages
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Failure or invalidation reason
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Wall-clock duration of the provider round-trip
    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Pre-load an already known translated text. Providers skip such
    /// operations unless the request carries the force property.
    pub fn with_known_translation(mut self, translated: impl Into<String>) -> Self {
        self.translated_text = Some(translated.into());
        self
    }

    /// Mark the operation as skipped
    pub fn invalidate(&mut self, reason: impl Into<String>) {
        self.status = OperationStatus::Invalidated;
        self.reason = Some(reason.into());
    }

    /// Reset an invalidated operation so it gets executed after all
    pub fn revalidate(&mut self) {
        if self.status == OperationStatus::Invalidated {
            self.status = OperationStatus::Created;
            self.reason = None;
        }
    }

    // Providers record operation outcomes through the methods below.

    /// Mark the operation as executed successfully
    pub fn mark_success(&mut self, execution_time: Duration) {
        self.status = OperationStatus::Success;
        self.execution_time = execution_time;
    }

    /// Mark the operation as executed but rejected by the provider
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = OperationStatus::Failed;
        self.reason = Some(reason.into());
    }

    pub fn set_translated_text(&mut self, text: String) {
        self.translated_text = Some(text);
    }

    pub fn set_detection(&mut self, language: LanguageIdentifier, confidence: f64) {
        self.detected_language = Some(language);
        self.confidence = confidence;
    }

    pub fn add_supported_language(&mut self, language: LanguageIdentifier) {
        self.supported_languages.push(language);
    }

    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = confidence;
    }

    /// Attach a property to the operation, keeping an existing value
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    pub fn clear_properties(&mut self) {
        self.properties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().expect("valid language tag")
    }

    #[test]
    fn new_operation_starts_created() {
        let op = TranslationOperation::translate(Some(lang("en")), lang("fr"), "Sunday");
        assert_eq!(op.status(), OperationStatus::Created);
        assert_eq!(op.kind(), OperationKind::Translate);
        assert_eq!(op.text(), Some("Sunday"));
        assert!(op.translated_text().is_none());
    }

    #[test]
    fn invalidate_and_revalidate_round_trip() {
        let mut op = TranslationOperation::detect("Bonjour");
        op.invalidate("result already known");
        assert_eq!(op.status(), OperationStatus::Invalidated);
        assert_eq!(op.reason(), Some("result already known"));

        op.revalidate();
        assert_eq!(op.status(), OperationStatus::Created);
        assert!(op.reason().is_none());
    }

    #[test]
    fn revalidate_leaves_failed_operations_alone() {
        let mut op = TranslationOperation::detect("Bonjour");
        op.mark_failed("quota exceeded");
        op.revalidate();
        assert_eq!(op.status(), OperationStatus::Failed);
        assert_eq!(op.reason(), Some("quota exceeded"));
    }

    #[test]
    fn properties_do_not_overwrite() {
        let mut op = TranslationOperation::detect("text");
        op.add_property("origin", "unit-test");
        op.add_property("origin", "elsewhere");
        assert_eq!(op.property("origin"), Some("unit-test"));
        assert!(op.has_property("origin"));

        op.remove_property("origin");
        assert!(!op.has_property("origin"));
    }
}
