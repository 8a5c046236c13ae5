//! Locale selection for localized Fitbit API responses.
//!
//! The Fitbit API localizes units and food databases according to the
//! `Accept-Language` and `Accept-Locale` request headers. Only a fixed set of
//! locales is accepted; see [`Locale`].

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A locale supported by the Fitbit API.
///
/// # Example
///
/// ```rust
/// use fitbit_api::Locale;
///
/// // Strict parsing rejects unknown tags
/// assert!("xx_XX".parse::<Locale>().is_err());
///
/// // Lenient resolution falls back to the default
/// assert_eq!(Locale::resolve("xx_XX"), Locale::DeDe);
/// assert_eq!(Locale::resolve("en_GB").to_string(), "en_GB");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// Australia (`en_AU`)
    EnAu,
    /// France (`fr_FR`)
    FrFr,
    /// Germany (`de_DE`), used when nothing else is configured
    #[default]
    DeDe,
    /// Japan (`ja_JP`)
    JaJp,
    /// New Zealand (`en_NZ`)
    EnNz,
    /// Spain (`es_ES`)
    EsEs,
    /// United Kingdom (`en_GB`)
    EnGb,
    /// United States (`en_US`)
    EnUs,
}

impl Locale {
    /// Returns every supported locale.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::EnAu,
            Self::FrFr,
            Self::DeDe,
            Self::JaJp,
            Self::EnNz,
            Self::EsEs,
            Self::EnGb,
            Self::EnUs,
        ]
    }

    /// Returns the locale tag as sent in request headers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnAu => "en_AU",
            Self::FrFr => "fr_FR",
            Self::DeDe => "de_DE",
            Self::JaJp => "ja_JP",
            Self::EnNz => "en_NZ",
            Self::EsEs => "es_ES",
            Self::EnGb => "en_GB",
            Self::EnUs => "en_US",
        }
    }

    /// Resolves a locale tag, substituting the default for unknown tags.
    ///
    /// Unrecognized locales are not an error: the default (`de_DE`) is used
    /// instead.
    #[must_use]
    pub fn resolve(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::debug!(
                "Unsupported locale '{}', falling back to {}",
                tag,
                Self::default()
            );
            Self::default()
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedLocale {
                locale: s.to_string(),
            })
    }
}
