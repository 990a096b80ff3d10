//! Bundle store and locale fallback
//!
//! `LocalizationContext` is the explicit replacement for a process-wide
//! singleton: it owns the bundle registry, the current/default/platform
//! locales, the bundle source and an optional translation provider, and is
//! passed by reference into every resolution call. Construct one at startup,
//! drop or rebuild it freely in tests.

use crate::bundle::Bundle;
use crate::error::{LocalizationError, LocalizationResult};
use crate::locale::{Locale, SUPPORTED_LANGUAGES};
use crate::source::BundleSource;
use loquat_translation::{
    execute_single, TranslationError, TranslationOperation, TranslationProvider,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key lookup seam used by [`LocalizedText`](crate::text::LocalizedText).
///
/// Kept as a trait so tests can substitute counting doubles and assert the
/// memoization guarantees without touching a real registry.
pub trait BundleLookup {
    /// Resolve `(bundle, key)` for the locale, applying the fallback chain
    fn lookup(&self, bundle: &str, key: &str, locale: &Locale) -> LocalizationResult<String>;

    /// Resolve a bare key by scanning loaded bundles for one that carries it
    fn lookup_key(&self, key: &str, locale: &Locale) -> LocalizationResult<String>;
}

/// language → bundle name → handle
type BundleMap = HashMap<String, HashMap<String, Arc<Bundle>>>;

#[derive(Debug)]
struct Registry {
    bundles: BundleMap,
    current: Locale,
    default: Locale,
}

/// The bundle store, locale configuration and collaborator handles
pub struct LocalizationContext {
    registry: RwLock<Registry>,
    source: Box<dyn BundleSource + Send + Sync>,
    provider: Option<Box<dyn TranslationProvider + Send + Sync>>,
    platform: Locale,
}

impl std::fmt::Debug for LocalizationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("LocalizationContext")
            .field("current", &registry.current)
            .field("default", &registry.default)
            .field("platform", &self.platform)
            .field("languages", &registry.bundles.len())
            .finish()
    }
}

enum PartitionOutcome {
    Hit(String),
    KeyMissing,
    NoBundle,
}

impl LocalizationContext {
    /// Create a context with the given default (and initial current) locale
    pub fn new(default_locale: Locale, source: impl BundleSource + Send + Sync + 'static) -> Self {
        Self {
            registry: RwLock::new(Registry {
                bundles: HashMap::new(),
                current: default_locale.clone(),
                default: default_locale,
            }),
            source: Box::new(source),
            provider: None,
            platform: Locale::platform(),
        }
    }

    /// Attach a translation provider for `translate`/`detect` services
    pub fn with_provider(
        mut self,
        provider: impl TranslationProvider + Send + Sync + 'static,
    ) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn current_locale(&self) -> Locale {
        self.registry.read().current.clone()
    }

    pub fn default_locale(&self) -> Locale {
        self.registry.read().default.clone()
    }

    /// Locale the operating system reported at construction time
    pub fn platform_locale(&self) -> &Locale {
        &self.platform
    }

    pub fn set_current_locale(&self, locale: Locale) {
        let mut registry = self.registry.write();
        info!(locale = %locale, "current locale changed");
        registry.current = locale;
    }

    /// Change the default locale. The current locale follows it, matching
    /// the behavior callers rely on at startup.
    pub fn set_default_locale(&self, locale: Locale) {
        let mut registry = self.registry.write();
        if registry.default != locale {
            info!(locale = %locale, "default locale changed");
            registry.default = locale.clone();
            registry.current = locale;
        }
    }

    /// Drop every loaded bundle handle
    pub fn clear(&self) {
        let mut registry = self.registry.write();
        registry.bundles.clear();
        debug!("cleared all bundle handles");
    }

    /// Load a bundle.
    ///
    /// With a locale, only that language partition is loaded and its absence
    /// is an error. Without one, every language in the supported priority
    /// list is attempted, individual misses are tolerated, and only a total
    /// miss raises [`LocalizationError::BundleNotFound`].
    pub fn load(&self, name: &str, locale: Option<&Locale>) -> LocalizationResult<()> {
        match locale {
            Some(locale) => {
                let language = locale.language();
                if self.load_language(name, language)? {
                    Ok(())
                } else {
                    warn!(bundle = name, language, "bundle partition not found");
                    Err(LocalizationError::BundleNotFound {
                        bundle: name.to_string(),
                    })
                }
            }
            None => {
                let mut loaded = 0usize;
                for language in SUPPORTED_LANGUAGES {
                    match self.load_language(name, language) {
                        Ok(true) => loaded += 1,
                        Ok(false) => {}
                        Err(error) => {
                            debug!(bundle = name, language, %error, "per-language load failed");
                        }
                    }
                }
                if loaded == 0 {
                    return Err(LocalizationError::BundleNotFound {
                        bundle: name.to_string(),
                    });
                }
                debug!(bundle = name, languages = loaded, "bundle loaded");
                Ok(())
            }
        }
    }

    /// Read one partition from the source and register a fresh handle.
    /// Returns whether the partition exists.
    fn load_language(&self, name: &str, language: &str) -> LocalizationResult<bool> {
        // The write guard covers the source read so a lookup racing this
        // load blocks until the handle is registered.
        let mut registry = self.registry.write();
        match self.source.read(name, language)? {
            Some(entries) => {
                let handle = Arc::new(Bundle::new(name, language, entries));
                registry
                    .bundles
                    .entry(language.to_string())
                    .or_default()
                    .insert(name.to_string(), handle);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Resolve `(bundle, key, locale)` through the fallback chain.
    ///
    /// The chain is bounded: requested locale, then current, then default,
    /// then platform, each candidate tried at most once.
    pub fn lookup(&self, bundle: &str, key: &str, locale: &Locale) -> LocalizationResult<String> {
        let mut candidate = locale.clone();
        let mut tried: Vec<String> = Vec::with_capacity(4);
        let mut saw_bundle = false;

        // requested + at most 3 fallback hops
        for _ in 0..4 {
            match self.try_partition(bundle, key, &candidate)? {
                PartitionOutcome::Hit(value) => return Ok(value),
                PartitionOutcome::KeyMissing => saw_bundle = true,
                PartitionOutcome::NoBundle => {}
            }
            tried.push(candidate.tag());

            let next = self.fallback_candidate(&candidate);
            if tried.contains(&next.tag()) {
                break;
            }
            debug!(
                bundle,
                key,
                from = %candidate,
                to = %next,
                "falling back to next candidate locale"
            );
            candidate = next;
        }

        if saw_bundle {
            Err(LocalizationError::KeyNotFound {
                bundle: bundle.to_string(),
                key: key.to_string(),
                locale: locale.tag(),
            })
        } else {
            Err(LocalizationError::BundleNotFound {
                bundle: bundle.to_string(),
            })
        }
    }

    /// One lookup attempt against a single language partition. A present
    /// handle missing the key gets one fresh load and retry, which covers
    /// lazily-augmented bundle content.
    fn try_partition(
        &self,
        bundle: &str,
        key: &str,
        locale: &Locale,
    ) -> LocalizationResult<PartitionOutcome> {
        let language = locale.language().to_string();

        {
            let registry = self.registry.read();
            match registry
                .bundles
                .get(&language)
                .and_then(|partition| partition.get(bundle))
            {
                None => return Ok(PartitionOutcome::NoBundle),
                Some(handle) => {
                    if let Some(value) = handle.get(key) {
                        return Ok(PartitionOutcome::Hit(value.to_string()));
                    }
                }
            }
        }

        debug!(bundle, key, language, "key miss, reloading bundle partition");
        self.load_language(bundle, &language)?;

        let registry = self.registry.read();
        let value = registry
            .bundles
            .get(&language)
            .and_then(|partition| partition.get(bundle))
            .and_then(|handle| handle.get(key))
            .map(str::to_string);
        Ok(match value {
            Some(value) => PartitionOutcome::Hit(value),
            None => PartitionOutcome::KeyMissing,
        })
    }

    /// Next fallback candidate, evaluated against context state at call time
    fn fallback_candidate(&self, locale: &Locale) -> Locale {
        let registry = self.registry.read();
        if *locale != registry.current {
            registry.current.clone()
        } else if registry.current != registry.default {
            registry.default.clone()
        } else {
            self.platform.clone()
        }
    }

    /// Resolve a bare key against the current locale. The owning bundle is
    /// found by scanning the default locale's loaded partition.
    pub fn get(&self, key: &str) -> LocalizationResult<String> {
        let current = self.current_locale();
        self.lookup_key(key, &current)
    }

    /// Resolve a bare key against the given locale
    pub fn get_at(&self, key: &str, locale: &Locale) -> LocalizationResult<String> {
        self.lookup_key(key, locale)
    }

    /// Resolve `(bundle, key)` for a locale, loading the bundle on demand
    pub fn get_with(&self, bundle: &str, key: &str, locale: &Locale) -> LocalizationResult<String> {
        match self.load(bundle, Some(locale)) {
            Ok(()) | Err(LocalizationError::BundleNotFound { .. }) => {}
            Err(error) => return Err(error),
        }
        self.lookup(bundle, key, locale)
    }

    /// Find the first bundle in the default locale's partition carrying `key`
    fn find_bundle_for_key(&self, key: &str) -> Option<String> {
        let registry = self.registry.read();
        let language = registry.default.language();
        registry.bundles.get(language).and_then(|partition| {
            partition
                .iter()
                .find(|(_, handle)| handle.contains_key(key))
                .map(|(name, _)| name.clone())
        })
    }

    /// Number of languages the bundle is loaded for
    pub fn locale_count(&self, name: &str) -> usize {
        let registry = self.registry.read();
        registry
            .bundles
            .values()
            .filter(|partition| partition.contains_key(name))
            .count()
    }

    /// Languages the bundle is loaded for
    pub fn locales_for(&self, name: &str) -> Vec<Locale> {
        let registry = self.registry.read();
        registry
            .bundles
            .iter()
            .filter(|(_, partition)| partition.contains_key(name))
            .filter_map(|(language, _)| Locale::parse(language).ok())
            .collect()
    }

    /// Whether the bundle is loaded for the locale's language
    pub fn has_locale(&self, name: &str, locale: &Locale) -> bool {
        let registry = self.registry.read();
        registry
            .bundles
            .get(locale.language())
            .map(|partition| partition.contains_key(name))
            .unwrap_or(false)
    }

    fn provider(&self) -> LocalizationResult<&(dyn TranslationProvider + Send + Sync)> {
        self.provider
            .as_deref()
            .ok_or(LocalizationError::Translation(TranslationError::NoProvider))
    }

    /// Translate `text` into the target language. One blocking round-trip;
    /// inspect the returned operation's status before trusting the result.
    pub fn translate(
        &self,
        source: Option<&Locale>,
        target: &Locale,
        text: &str,
    ) -> LocalizationResult<TranslationOperation> {
        let provider = self.provider()?;
        let operation = TranslationOperation::translate(
            source.map(|locale| locale.as_language_identifier().clone()),
            target.as_language_identifier().clone(),
            text,
        );
        execute_single(provider, "translate", operation).map_err(Into::into)
    }

    /// Detect the language of `text`
    pub fn detect(&self, text: &str) -> LocalizationResult<TranslationOperation> {
        let provider = self.provider()?;
        execute_single(provider, "detect", TranslationOperation::detect(text))
            .map_err(Into::into)
    }

    /// List the languages the provider can translate into, with names
    /// localized for `target`
    pub fn supported_languages(
        &self,
        target: &Locale,
    ) -> LocalizationResult<TranslationOperation> {
        let provider = self.provider()?;
        execute_single(
            provider,
            "supported",
            TranslationOperation::supported_languages(target.as_language_identifier().clone()),
        )
        .map_err(Into::into)
    }
}

impl BundleLookup for LocalizationContext {
    fn lookup(&self, bundle: &str, key: &str, locale: &Locale) -> LocalizationResult<String> {
        LocalizationContext::lookup(self, bundle, key, locale)
    }

    fn lookup_key(&self, key: &str, locale: &Locale) -> LocalizationResult<String> {
        match self.find_bundle_for_key(key) {
            Some(bundle) => self.lookup(&bundle, key, locale),
            None => Err(LocalizationError::NoBundleForKey {
                key: key.to_string(),
            }),
        }
    }
}
