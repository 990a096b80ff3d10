//! Calendar catalogs: days, months and seasons
//!
//! Fixed-value enumerations whose accessors resolve through the member
//! engine. The variants themselves are plain data; localization happens per
//! accessor call against the `${this}` placeholder.

use crate::catalog::LocalizationContext;
use crate::error::LocalizationResult;
use crate::locale::Locale;
use crate::localize::{Localizer, MemberSpec, Placeholders};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Resource bundle backing this catalog
    pub const BUNDLE: &'static str = "i18n/day";

    const NAME: MemberSpec = MemberSpec::new("name", Self::BUNDLE, "day.${this}.name");
    const DESCRIPTION: MemberSpec =
        MemberSpec::new("description", Self::BUNDLE, "day.${this}.description");
    const DEFINITION: MemberSpec = MemberSpec::new("definition", Self::BUNDLE, "day.definition");

    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Bundle key fragment identifying the variant
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
            Day::Saturday => "SATURDAY",
            Day::Sunday => "SUNDAY",
        }
    }

    /// Localized name of the day
    pub fn name(&self, ctx: &LocalizationContext, locale: &Locale) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(self, &Self::NAME, locale)
    }

    /// Localized description of the day
    pub fn description(
        &self,
        ctx: &LocalizationContext,
        locale: &Locale,
    ) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(self, &Self::DESCRIPTION, locale)
    }

    /// Localized definition of the term "day"
    pub fn term_definition(
        ctx: &LocalizationContext,
        locale: &Locale,
    ) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(&(), &Self::DEFINITION, locale)
    }
}

impl Placeholders for Day {
    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "this" => Some(self.mnemonic().to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Months of the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const BUNDLE: &'static str = "i18n/month";

    const NAME: MemberSpec = MemberSpec::new("name", Self::BUNDLE, "month.${this}.name");
    const DESCRIPTION: MemberSpec =
        MemberSpec::new("description", Self::BUNDLE, "month.${this}.description");
    const DEFINITION: MemberSpec =
        MemberSpec::new("definition", Self::BUNDLE, "month.definition");

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Month::January => "JANUARY",
            Month::February => "FEBRUARY",
            Month::March => "MARCH",
            Month::April => "APRIL",
            Month::May => "MAY",
            Month::June => "JUNE",
            Month::July => "JULY",
            Month::August => "AUGUST",
            Month::September => "SEPTEMBER",
            Month::October => "OCTOBER",
            Month::November => "NOVEMBER",
            Month::December => "DECEMBER",
        }
    }

    pub fn name(&self, ctx: &LocalizationContext, locale: &Locale) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(self, &Self::NAME, locale)
    }

    pub fn description(
        &self,
        ctx: &LocalizationContext,
        locale: &Locale,
    ) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(self, &Self::DESCRIPTION, locale)
    }

    pub fn term_definition(
        ctx: &LocalizationContext,
        locale: &Locale,
    ) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(&(), &Self::DEFINITION, locale)
    }
}

impl Placeholders for Month {
    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "this" => Some(self.mnemonic().to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Seasons of the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const BUNDLE: &'static str = "i18n/season";

    const NAME: MemberSpec = MemberSpec::new("name", Self::BUNDLE, "season.${this}.name");
    const DESCRIPTION: MemberSpec =
        MemberSpec::new("description", Self::BUNDLE, "season.${this}.description");

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Season::Spring => "SPRING",
            Season::Summer => "SUMMER",
            Season::Autumn => "AUTUMN",
            Season::Winter => "WINTER",
        }
    }

    pub fn name(&self, ctx: &LocalizationContext, locale: &Locale) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(self, &Self::NAME, locale)
    }

    pub fn description(
        &self,
        ctx: &LocalizationContext,
        locale: &Locale,
    ) -> LocalizationResult<String> {
        Localizer::new(ctx).resolve_member(self, &Self::DESCRIPTION, locale)
    }
}

impl Placeholders for Season {
    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "this" => Some(self.mnemonic().to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
