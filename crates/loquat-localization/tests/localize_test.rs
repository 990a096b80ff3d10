//! Member-discovery and template-expansion tests against real bundles

use loquat_localization::{
    BundleSource, Locale, LocalizationContext, LocalizationError, LocalizationResult, Localizable,
    LocalizedText, Localizer, MemberSlot, MemberSpec, Placeholders, PropertiesSource,
};
use loquat_localization::types::Day;
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn create_test_bundles() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let i18n = temp_dir.path().join("i18n");
    fs::create_dir_all(&i18n).unwrap();

    fs::write(
        i18n.join("holiday_en.properties"),
        "\
holiday.EASTER.name=Easter
holiday.EASTER.greeting=Happy Easter!
holiday.CHRISTMAS.name=Christmas
holiday.CHRISTMAS.greeting=Merry Christmas!
",
    )
    .unwrap();
    fs::write(
        i18n.join("holiday_fr.properties"),
        "\
holiday.EASTER.name=Pâques
holiday.EASTER.greeting=Joyeuses Pâques !
holiday.CHRISTMAS.name=Noël
holiday.CHRISTMAS.greeting=Joyeux Noël !
",
    )
    .unwrap();

    fs::write(
        i18n.join("day_en.properties"),
        "\
day.definition=One of the seven periods making up a week.
day.SUNDAY.name=Sunday
",
    )
    .unwrap();
    fs::write(
        i18n.join("day_fr.properties"),
        "\
day.definition=Une des sept périodes composant une semaine.
day.SUNDAY.name=Dimanche
",
    )
    .unwrap();

    temp_dir
}

fn context(temp_dir: &TempDir) -> LocalizationContext {
    LocalizationContext::new(
        Locale::parse("en").unwrap(),
        PropertiesSource::single(temp_dir.path()),
    )
}

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

/// A localizable object with one plain-string member and one LocalizedText
/// member, both governed by member metadata keyed off the `mnemonic` sibling.
struct Holiday {
    mnemonic: &'static str,
    name: String,
    greeting: LocalizedText,
}

impl Holiday {
    const BUNDLE: &'static str = "i18n/holiday";

    fn new(mnemonic: &'static str) -> Self {
        Self {
            mnemonic,
            name: String::new(),
            greeting: LocalizedText::default(),
        }
    }
}

impl Placeholders for Holiday {
    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "mnemonic" => Some(self.mnemonic.to_string()),
            _ => None,
        }
    }
}

impl Localizable for Holiday {
    fn member_specs(&self) -> Vec<MemberSpec> {
        vec![
            MemberSpec::new("name", Self::BUNDLE, "holiday.${mnemonic}.name"),
            MemberSpec::new("greeting", Self::BUNDLE, "holiday.${mnemonic}.greeting"),
        ]
    }

    fn member_mut(&mut self, name: &str) -> Option<MemberSlot<'_>> {
        match name {
            "name" => Some(MemberSlot::Text(&mut self.name)),
            "greeting" => Some(MemberSlot::Localized(&mut self.greeting)),
            _ => None,
        }
    }
}

#[test]
fn localize_fills_every_declared_member() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir);
    ctx.load(Holiday::BUNDLE, None).unwrap();

    let mut easter = Holiday::new("EASTER");
    Localizer::new(&ctx).localize(&mut easter, &locale("en")).unwrap();
    assert_eq!(easter.name, "Easter");
    assert_eq!(easter.greeting.value(), "Happy Easter!");

    Localizer::new(&ctx).localize(&mut easter, &locale("fr")).unwrap();
    assert_eq!(easter.name, "Pâques");
    assert_eq!(easter.greeting.value(), "Joyeuses Pâques !");
    assert_eq!(easter.greeting.localized_for(), Some(&locale("fr")));
}

#[test]
fn self_templated_member_resolves_through_its_own_binding() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir);

    // The greeting carries its own (bundle, key) template pointing at a
    // different holiday than the member metadata would select.
    let mut easter = Holiday::new("EASTER");
    easter.greeting =
        LocalizedText::from_bundle_key(&ctx, Holiday::BUNDLE, "holiday.CHRISTMAS.greeting")
            .unwrap();

    Localizer::new(&ctx).localize(&mut easter, &locale("fr")).unwrap();
    assert_eq!(easter.name, "Pâques");
    assert_eq!(easter.greeting.value(), "Joyeux Noël !");
}

#[test]
fn unknown_placeholder_in_a_template_is_fatal() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir);
    ctx.load(Holiday::BUNDLE, None).unwrap();

    struct Broken {
        name: String,
    }

    impl Placeholders for Broken {
        fn placeholder(&self, _name: &str) -> Option<String> {
            None
        }
    }

    impl Localizable for Broken {
        fn member_specs(&self) -> Vec<MemberSpec> {
            vec![MemberSpec::new(
                "name",
                Holiday::BUNDLE,
                "holiday.${mnemonic}.name",
            )]
        }

        fn member_mut(&mut self, name: &str) -> Option<MemberSlot<'_>> {
            match name {
                "name" => Some(MemberSlot::Text(&mut self.name)),
                _ => None,
            }
        }
    }

    let mut broken = Broken {
        name: String::new(),
    };
    let error = Localizer::new(&ctx)
        .localize(&mut broken, &locale("en"))
        .unwrap_err();
    assert!(matches!(
        error,
        LocalizationError::UnknownPlaceholder { .. }
    ));
    assert!(broken.name.is_empty());
}

#[test]
fn localize_if_changed_skips_the_already_current_locale() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir);
    ctx.load(Holiday::BUNDLE, None).unwrap();
    let localizer = Localizer::new(&ctx);

    let mut easter = Holiday::new("EASTER");
    let reflected = localizer
        .localize_if_changed(&mut easter, &locale("fr"), None)
        .unwrap();
    assert_eq!(reflected, locale("fr"));
    assert_eq!(easter.name, "Pâques");

    // Same locale again: the object must be left untouched
    easter.name = "scribbled".to_string();
    let reflected = localizer
        .localize_if_changed(&mut easter, &locale("fr"), Some(&reflected))
        .unwrap();
    assert_eq!(reflected, locale("fr"));
    assert_eq!(easter.name, "scribbled");

    // A new locale resolves again
    let reflected = localizer
        .localize_if_changed(&mut easter, &locale("en"), Some(&reflected))
        .unwrap();
    assert_eq!(reflected, locale("en"));
    assert_eq!(easter.name, "Easter");
}

#[test]
fn calendar_accessors_resolve_through_the_member_engine() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir);

    assert_eq!(Day::Sunday.name(&ctx, &locale("en")).unwrap(), "Sunday");
    assert_eq!(Day::Sunday.name(&ctx, &locale("fr")).unwrap(), "Dimanche");

    assert_eq!(
        Day::term_definition(&ctx, &locale("fr")).unwrap(),
        "Une des sept périodes composant une semaine."
    );
}

/// Source double that forwards to a real properties source and counts reads
struct CountingSource {
    inner: PropertiesSource,
    reads: Arc<AtomicUsize>,
}

impl BundleSource for CountingSource {
    fn read(
        &self,
        name: &str,
        language: &str,
    ) -> LocalizationResult<Option<HashMap<String, String>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(name, language)
    }
}

#[test]
fn repeated_calendar_accessor_calls_do_not_reread_bundle_files() {
    let temp_dir = create_test_bundles();
    let reads = Arc::new(AtomicUsize::new(0));
    let ctx = LocalizationContext::new(
        Locale::parse("en").unwrap(),
        CountingSource {
            inner: PropertiesSource::single(temp_dir.path()),
            reads: Arc::clone(&reads),
        },
    );

    // First accessor call sweeps the language list once
    assert_eq!(Day::Sunday.name(&ctx, &locale("en")).unwrap(), "Sunday");
    let after_first = reads.load(Ordering::SeqCst);
    assert!(after_first > 0);

    // Loaded partitions answer later calls without touching the source
    assert_eq!(Day::Sunday.name(&ctx, &locale("en")).unwrap(), "Sunday");
    assert_eq!(Day::Sunday.name(&ctx, &locale("fr")).unwrap(), "Dimanche");
    assert_eq!(reads.load(Ordering::SeqCst), after_first);
}

#[test]
fn calendar_accessor_for_a_missing_key_is_an_error() {
    let temp_dir = create_test_bundles();
    let ctx = context(&temp_dir);

    // No description entries exist in the fixture
    let error = Day::Sunday.description(&ctx, &locale("en")).unwrap_err();
    assert!(matches!(error, LocalizationError::KeyNotFound { .. }));
}
