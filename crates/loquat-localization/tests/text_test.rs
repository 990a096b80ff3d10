//! LocalizedText resolution and memoization tests

use loquat_localization::{
    BundleLookup, Locale, LocalizationContext, LocalizationResult, LocalizedText,
    PropertiesSource,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

fn create_test_bundles() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let i18n = temp_dir.path().join("i18n");
    fs::create_dir_all(&i18n).unwrap();

    fs::write(
        i18n.join("day_en.properties"),
        "day.SUNDAY.name=Sunday\nday.MONDAY.name=Monday\n",
    )
    .unwrap();
    fs::write(
        i18n.join("day_fr.properties"),
        "day.SUNDAY.name=Dimanche\nday.MONDAY.name=Lundi\n",
    )
    .unwrap();
    fs::write(
        i18n.join("day_de.properties"),
        "day.SUNDAY.name=Sonntag\nday.MONDAY.name=Montag\n",
    )
    .unwrap();

    temp_dir
}

fn context(temp_dir: &TempDir, default: &str) -> LocalizationContext {
    LocalizationContext::new(
        Locale::parse(default).unwrap(),
        PropertiesSource::single(temp_dir.path()),
    )
}

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

/// Lookup double that forwards to a real context and counts calls
struct CountingLookup<'a> {
    inner: &'a LocalizationContext,
    calls: AtomicUsize,
}

impl<'a> CountingLookup<'a> {
    fn new(inner: &'a LocalizationContext) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BundleLookup for CountingLookup<'_> {
    fn lookup(&self, bundle: &str, key: &str, locale: &Locale) -> LocalizationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(bundle, key, locale)
    }

    fn lookup_key(&self, key: &str, locale: &Locale) -> LocalizationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup_key(key, locale)
    }
}

#[test]
fn free_text_round_trips_through_resolve() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");

    let mut text = LocalizedText::free("unchanged");
    text.resolve(&ctx, &locale("fr")).unwrap();
    text.resolve(&ctx, &locale("de")).unwrap();
    assert_eq!(text.value(), "unchanged");
    assert!(text.localized_for().is_none());
}

#[test]
fn bundle_key_construction_resolves_eagerly() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");
    ctx.set_current_locale(locale("fr"));

    let text = LocalizedText::from_bundle_key(&ctx, "i18n/day", "day.SUNDAY.name").unwrap();
    assert_eq!(text.value(), "Dimanche");
    assert_eq!(text.localized_for(), Some(&locale("fr")));
}

#[test]
fn resolve_switches_locales() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");
    ctx.set_current_locale(locale("fr"));

    let mut text = LocalizedText::from_bundle_key(&ctx, "i18n/day", "day.SUNDAY.name").unwrap();
    assert_eq!(text.value(), "Dimanche");

    text.resolve(&ctx, &locale("de")).unwrap();
    assert_eq!(text.value(), "Sonntag");

    text.resolve(&ctx, &locale("en")).unwrap();
    assert_eq!(text.value(), "Sunday");
}

#[test]
fn resolve_is_memoized_per_locale() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");
    ctx.load("i18n/day", None).unwrap();

    let counting = CountingLookup::new(&ctx);
    let mut text = LocalizedText::from_key("day.SUNDAY.name");

    text.resolve(&counting, &locale("de")).unwrap();
    assert_eq!(text.value(), "Sonntag");
    assert_eq!(counting.call_count(), 1);

    // Same locale again: zero additional lookups, identical value
    text.resolve(&counting, &locale("de")).unwrap();
    assert_eq!(text.value(), "Sonntag");
    assert_eq!(counting.call_count(), 1);

    // A different locale does one more lookup
    text.resolve(&counting, &locale("fr")).unwrap();
    assert_eq!(text.value(), "Dimanche");
    assert_eq!(counting.call_count(), 2);
}

#[test]
fn key_only_text_resolves_against_loaded_bundles() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");
    ctx.load("i18n/day", None).unwrap();

    let mut text = LocalizedText::from_key("day.MONDAY.name");
    text.resolve(&ctx, &locale("fr")).unwrap();
    assert_eq!(text.value(), "Lundi");
}

#[test]
fn key_only_text_without_matching_bundle_is_an_error() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");
    ctx.load("i18n/day", None).unwrap();

    let mut text = LocalizedText::from_key("color.RED.name");
    assert!(text.resolve(&ctx, &locale("fr")).is_err());
}

#[test]
fn unregistered_locale_falls_back_through_the_chain() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir, "en");
    ctx.load("i18n/day", None).unwrap();

    let mut text = LocalizedText::from_key("day.SUNDAY.name");
    text.resolve(&ctx, &locale("vi")).unwrap();
    assert_eq!(text.value(), "Sunday");
}

#[test]
fn display_and_conversions() {
    let text = LocalizedText::from("hello");
    assert_eq!(text.to_string(), "hello");
    assert_eq!(text.value(), "hello");

    let text: LocalizedText = String::from("owned").into();
    assert_eq!(text.value(), "owned");

    let mut text = LocalizedText::free("before");
    text.set_value("after");
    assert_eq!(text.value(), "after");
}
