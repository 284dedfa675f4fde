//! Localization catalogs for card labels.
//!
//! The record itself always carries the canonical English fallback strings;
//! they are translated here, at render time, by exact match.

use std::fmt;
use std::str::FromStr;

use preview_proto::protocol::{NO_DESCRIPTION, NO_PREVIEW, NO_TITLE, PLACEHOLDER_TITLE};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Ar,
    Es,
    Hi,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Ar, Locale::Es, Locale::Hi, Locale::Zh];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::Es => "es",
            Locale::Hi => "hi",
            Locale::Zh => "zh",
        }
    }

    /// Next locale in `ALL`, wrapping around.
    pub fn next(self) -> Locale {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn source(self) -> &'static str {
        match self {
            Locale::En => include_str!("../locales/link-preview-card.en.json"),
            Locale::Ar => include_str!("../locales/link-preview-card.ar.json"),
            Locale::Es => include_str!("../locales/link-preview-card.es.json"),
            Locale::Hi => include_str!("../locales/link-preview-card.hi.json"),
            Locale::Zh => include_str!("../locales/link-preview-card.zh.json"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported locale {0:?}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.code() == lang)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// One locale's strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(skip)]
    pub locale: Locale,
    pub visit_site: String,
    pub loading: String,
    pub image: String,
    pub address: String,
    pub error: String,
    pub placeholder_title: String,
    pub no_title: String,
    pub no_description: String,
    pub no_preview: String,
}

impl Catalog {
    pub fn load(locale: Locale) -> Result<Self, serde_json::Error> {
        let mut catalog: Catalog = serde_json::from_str(locale.source())?;
        catalog.locale = locale;
        Ok(catalog)
    }

    /// Translate `text` if it is one of the record's fallback sentinels.
    pub fn sentinel<'a>(&'a self, text: &'a str) -> &'a str {
        match text {
            PLACEHOLDER_TITLE => &self.placeholder_title,
            NO_TITLE => &self.no_title,
            NO_DESCRIPTION => &self.no_description,
            NO_PREVIEW => &self.no_preview,
            other => other,
        }
    }
}
