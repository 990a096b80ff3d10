//! Member discovery and template resolution
//!
//! Types opt into localization by implementing [`Localizable`]: an explicit,
//! enumerable list of member declarations plus mutable access to the member
//! slots. The [`Localizer`] walks those declarations, expands `${placeholder}`
//! tokens against sibling member values, drives the bundle store and writes
//! the resolved text back.

use crate::catalog::LocalizationContext;
use crate::error::{LocalizationError, LocalizationResult};
use crate::locale::Locale;
use crate::text::LocalizedText;
use tracing::debug;

/// Declares one localizable member: its name and the bundle/key templates
/// governing it. Templates may contain `${placeholder}` tokens resolved
/// against sibling members of the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSpec {
    pub name: &'static str,
    pub bundle: &'static str,
    pub key: &'static str,
}

impl MemberSpec {
    pub const fn new(name: &'static str, bundle: &'static str, key: &'static str) -> Self {
        Self { name, bundle, key }
    }

    fn bundle_template(&self) -> LocalizationResult<&'static str> {
        if self.bundle.is_empty() {
            return Err(LocalizationError::TemplateMissing {
                member: self.name.to_string(),
                part: "bundle",
            });
        }
        Ok(self.bundle)
    }

    fn key_template(&self) -> LocalizationResult<&'static str> {
        if self.key.is_empty() {
            return Err(LocalizationError::TemplateMissing {
                member: self.name.to_string(),
                part: "key",
            });
        }
        Ok(self.key)
    }
}

/// Supplies the textual form of members referenced by `${placeholder}`
/// tokens. Answers are not limited to declared localizable members; any
/// state the type wants addressable from templates qualifies.
pub trait Placeholders {
    fn placeholder(&self, name: &str) -> Option<String>;
}

/// `()` is the empty placeholder source, for templates without tokens
impl Placeholders for () {
    fn placeholder(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Mutable view of one localizable member slot
pub enum MemberSlot<'a> {
    /// A plain text slot governed entirely by its [`MemberSpec`]
    Text(&'a mut String),
    /// A [`LocalizedText`] value; if it carries its own template it resolves
    /// through that instead of the member metadata
    Localized(&'a mut LocalizedText),
}

/// Capability interface for objects with localizable members.
///
/// `member_specs` must list every localizable member, including those
/// contributed by embedded or parent types; the registration site owns the
/// complete list.
pub trait Localizable: Placeholders {
    fn member_specs(&self) -> Vec<MemberSpec>;

    fn member_mut(&mut self, name: &str) -> Option<MemberSlot<'_>>;
}

/// Substitute every `${name}` token in `template` with the value supplied by
/// `source`. Pure textual substitution; case-transform tokens are not part
/// of the grammar.
pub fn expand_template<S: Placeholders + ?Sized>(
    template: &str,
    source: &S,
) -> LocalizationResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| LocalizationError::MalformedTemplate {
                template: template.to_string(),
            })?;
        let name = &after[..end];
        let value =
            source
                .placeholder(name)
                .ok_or_else(|| LocalizationError::UnknownPlaceholder {
                    template: template.to_string(),
                    placeholder: name.to_string(),
                })?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Drives member resolution against one context
pub struct Localizer<'a> {
    ctx: &'a LocalizationContext,
}

impl<'a> Localizer<'a> {
    pub fn new(ctx: &'a LocalizationContext) -> Self {
        Self { ctx }
    }

    /// Resolve every declared localizable member of `target` for `locale`.
    ///
    /// Errors are fatal to the whole call; no partial-result reporting.
    pub fn localize(
        &self,
        target: &mut dyn Localizable,
        locale: &Locale,
    ) -> LocalizationResult<()> {
        for spec in target.member_specs() {
            // A member holding a self-templated LocalizedText resolves
            // through its own binding.
            if let Some(MemberSlot::Localized(text)) = target.member_mut(spec.name) {
                if text.has_template() {
                    text.resolve(self.ctx, locale)?;
                    continue;
                }
            }

            let bundle = expand_template(spec.bundle_template()?, &*target)?;
            let key = expand_template(spec.key_template()?, &*target)?;
            let resolved = self.ctx.lookup(&bundle, &key, locale)?;
            debug!(member = spec.name, bundle = bundle.as_str(), key = key.as_str(), "member resolved");

            match target.member_mut(spec.name) {
                Some(MemberSlot::Text(slot)) => *slot = resolved,
                Some(MemberSlot::Localized(text)) => {
                    text.apply_resolved(resolved, locale.clone())
                }
                None => {
                    return Err(LocalizationError::UnknownMember {
                        member: spec.name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Resolve with caller-held memoization: when `previous` already equals
    /// the requested locale the whole object is skipped. Returns the locale
    /// the object now reflects.
    pub fn localize_if_changed(
        &self,
        target: &mut dyn Localizable,
        locale: &Locale,
        previous: Option<&Locale>,
    ) -> LocalizationResult<Locale> {
        if previous == Some(locale) {
            return Ok(locale.clone());
        }
        self.localize(target, locale)?;
        Ok(locale.clone())
    }

    /// Resolve a single explicit template context and return the text
    /// without writing anything back. This is the entry point for accessor
    /// methods on fixed-value types (enumerated catalogs) that are not
    /// localizable containers themselves.
    ///
    /// The bundle is loaded lazily: the full language sweep runs only the
    /// first time the bundle is seen, and a later request for an unloaded
    /// language reads just that partition.
    pub fn resolve_member(
        &self,
        source: &dyn Placeholders,
        spec: &MemberSpec,
        locale: &Locale,
    ) -> LocalizationResult<String> {
        let bundle = expand_template(spec.bundle_template()?, source)?;
        let key = expand_template(spec.key_template()?, source)?;
        if self.ctx.locale_count(&bundle) == 0 {
            self.ctx.load(&bundle, None)?;
        } else if !self.ctx.has_locale(&bundle, locale) {
            match self.ctx.load(&bundle, Some(locale)) {
                Ok(()) | Err(LocalizationError::BundleNotFound { .. }) => {}
                Err(error) => return Err(error),
            }
        }
        self.ctx.lookup(&bundle, &key, locale)
    }
}
