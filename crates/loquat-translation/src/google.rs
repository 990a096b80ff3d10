//! Google Cloud Translation API v2 provider
//!
//! Implements the three v2 endpoints (`/`, `/detect`, `/languages`) over
//! plain blocking GET requests authenticated by API key.

use crate::error::{TranslationError, TranslationResult};
use crate::operation::{OperationKind, OperationStatus, TranslationOperation};
use crate::provider::{invalidate_known_results, TranslationProvider};
use crate::request::TranslationRequest;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;
use url::Url;

/// Default endpoint of the v2 REST API
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Translation API v2 client
pub struct GoogleTranslateV2 {
    client: reqwest::blocking::Client,
    endpoint: Url,
    api_key: String,
}

impl std::fmt::Debug for GoogleTranslateV2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateV2")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TranslateEnvelope {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
struct TranslationEntry {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct DetectEnvelope {
    data: DetectData,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    detections: Vec<Vec<Detection>>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct LanguagesEnvelope {
    data: LanguagesData,
}

#[derive(Debug, Deserialize)]
struct LanguagesData {
    languages: Vec<LanguageEntry>,
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    language: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: u16,
    message: String,
}

impl GoogleTranslateV2 {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
    }

    /// Point the client at a non-default endpoint, e.g. a test server
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: &str,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
        })
    }

    fn build_url(&self, operation: &TranslationOperation) -> TranslationResult<Url> {
        let mut url = self.endpoint.clone();
        match operation.kind() {
            OperationKind::Translate => {
                let target = required_language(operation, "target")?;
                let text = required_text(operation)?;
                let mut pairs = url.query_pairs_mut();
                pairs
                    .append_pair("key", &self.api_key)
                    .append_pair("format", "text")
                    .append_pair("target", target.language.as_str());
                if let Some(source) = operation.source_language() {
                    pairs.append_pair("source", source.language.as_str());
                }
                pairs.append_pair("q", text);
                drop(pairs);
            }
            OperationKind::Detect => {
                let text = required_text(operation)?;
                url.path_segments_mut()
                    .map_err(|_| TranslationError::MissingResult {
                        operation: operation.kind().label().to_string(),
                    })?
                    .push("detect");
                url.query_pairs_mut()
                    .append_pair("key", &self.api_key)
                    .append_pair("q", text);
            }
            OperationKind::SupportedLanguages => {
                let target = required_language(operation, "target")?;
                url.path_segments_mut()
                    .map_err(|_| TranslationError::MissingResult {
                        operation: operation.kind().label().to_string(),
                    })?
                    .push("languages");
                url.query_pairs_mut()
                    .append_pair("key", &self.api_key)
                    .append_pair("target", target.language.as_str());
            }
        }
        Ok(url)
    }

    fn apply_result(operation: &mut TranslationOperation, body: &str) -> TranslationResult<()> {
        match operation.kind() {
            OperationKind::Translate => {
                let envelope: TranslateEnvelope = serde_json::from_str(body)?;
                let translated: String = envelope
                    .data
                    .translations
                    .into_iter()
                    .map(|entry| entry.translated_text)
                    .collect();
                operation.set_translated_text(translated);
            }
            OperationKind::Detect => {
                let envelope: DetectEnvelope = serde_json::from_str(body)?;
                let detection = envelope
                    .data
                    .detections
                    .into_iter()
                    .flatten()
                    .next()
                    .ok_or_else(|| TranslationError::MissingResult {
                        operation: operation.kind().label().to_string(),
                    })?;
                let language: LanguageIdentifier =
                    detection.language.parse().map_err(|_| {
                        TranslationError::MissingResult {
                            operation: operation.kind().label().to_string(),
                        }
                    })?;
                operation.set_detection(language, detection.confidence);
            }
            OperationKind::SupportedLanguages => {
                let envelope: LanguagesEnvelope = serde_json::from_str(body)?;
                for entry in envelope.data.languages {
                    if let Ok(language) = entry.language.parse::<LanguageIdentifier>() {
                        operation.add_supported_language(language);
                    }
                }
                // The endpoint enumerates, it does not guess
                operation.set_confidence(1.0);
            }
        }
        Ok(())
    }
}

fn required_language<'a>(
    operation: &'a TranslationOperation,
    field: &'static str,
) -> TranslationResult<&'a LanguageIdentifier> {
    operation
        .target_language()
        .ok_or(TranslationError::MissingInput {
            operation: operation.kind().label().to_string(),
            field,
        })
}

fn required_text(operation: &TranslationOperation) -> TranslationResult<&str> {
    operation.text().ok_or(TranslationError::MissingInput {
        operation: operation.kind().label().to_string(),
        field: "text",
    })
}

impl TranslationProvider for GoogleTranslateV2 {
    fn execute(&self, request: &mut TranslationRequest) -> TranslationResult<()> {
        request.evaluate_properties();
        invalidate_known_results(request);

        for operation in request.operations_mut() {
            if operation.status() == OperationStatus::Invalidated {
                debug!(
                    operation = operation.kind().label(),
                    "skipping invalidated operation"
                );
                continue;
            }

            let url = self.build_url(operation)?;
            debug!(operation = operation.kind().label(), "calling translation API");

            let start = Instant::now();
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()?;
            let elapsed = start.elapsed();

            let status = response.status();
            let body = response.text()?;

            if status.is_success() {
                Self::apply_result(operation, &body)?;
                operation.mark_success(elapsed);
            } else {
                let reason = match serde_json::from_str::<ErrorEnvelope>(&body) {
                    Ok(envelope) => envelope.error.message,
                    Err(_) => format!("HTTP {}", status.as_u16()),
                };
                warn!(
                    operation = operation.kind().label(),
                    status = status.as_u16(),
                    reason = reason.as_str(),
                    "translation operation failed"
                );
                operation.mark_failed(reason);
            }
        }

        Ok(())
    }
}
