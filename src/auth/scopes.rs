//! OAuth scope handling for the Fitbit Web API.
//!
//! This module provides the [`Scope`] enum for the individual permissions an
//! application can request and the [`Scopes`] set sent to the authorization
//! endpoint.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single permission scope of the Fitbit Web API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Activity and exercise data (`activity`).
    Activity,
    /// Cardio fitness score data (`cardio_fitness`).
    CardioFitness,
    /// Breathing rate data (`respiratory_rate`).
    BreathingRate,
    /// Heart rate data (`heartrate`).
    Heartrate,
    /// GPS and location data (`location`).
    Location,
    /// Food and water logs (`nutrition`).
    Nutrition,
    /// Personal profile information (`profile`).
    Profile,
    /// Device settings and alarms (`settings`).
    Settings,
    /// Sleep logs (`sleep`).
    Sleep,
    /// Friends and leaderboard (`social`).
    Social,
    /// Blood oxygen saturation data (`oxygen_saturation`).
    SpO2,
    /// Skin and core temperature data (`temperature`).
    Temperature,
    /// Weight and body fat data (`weight`).
    Weight,
}

impl Scope {
    /// Returns every scope the API knows about.
    #[must_use]
    pub const fn all() -> [Self; 13] {
        [
            Self::Activity,
            Self::CardioFitness,
            Self::BreathingRate,
            Self::Heartrate,
            Self::Location,
            Self::Nutrition,
            Self::Profile,
            Self::Settings,
            Self::Sleep,
            Self::Social,
            Self::SpO2,
            Self::Temperature,
            Self::Weight,
        ]
    }

    /// Returns the scope string used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::CardioFitness => "cardio_fitness",
            Self::BreathingRate => "respiratory_rate",
            Self::Heartrate => "heartrate",
            Self::Location => "location",
            Self::Nutrition => "nutrition",
            Self::Profile => "profile",
            Self::Settings => "settings",
            Self::Sleep => "sleep",
            Self::Social => "social",
            Self::SpO2 => "oxygen_saturation",
            Self::Temperature => "temperature",
            Self::Weight => "weight",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidScopes {
                reason: format!("Unknown scope: '{s}'"),
            })
    }
}

/// A set of requested permission scopes.
///
/// Scopes keep the order in which they were first added and ignore
/// duplicates. They display space-separated, which is the format the
/// authorization endpoint expects, and parse from either space- or
/// comma-separated strings.
///
/// # Example
///
/// ```rust
/// use fitbit_api::{Scope, Scopes};
///
/// let scopes: Scopes = "activity, sleep heartrate".parse().unwrap();
/// assert_eq!(scopes.to_string(), "activity sleep heartrate");
/// assert!(scopes.contains(Scope::Sleep));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Scopes {
    scopes: Vec<Scope>,
}

impl Scopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding every known scope.
    #[must_use]
    pub fn all() -> Self {
        Self::from(Scope::all().to_vec())
    }

    /// Adds a scope if it is not already present.
    pub fn insert(&mut self, scope: Scope) {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
    }

    /// Returns `true` if the scope is part of this set.
    #[must_use]
    pub fn contains(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns `true` if this scope set contains every scope in `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.scopes.iter().all(|s| self.scopes.contains(s))
    }

    /// Returns an iterator over the scopes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Scope> + '_ {
        self.scopes.iter().copied()
    }
}

impl FromStr for Scopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = Self::new();
        for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            scopes.insert(token.parse()?);
        }
        Ok(scopes)
    }
}

impl From<Vec<Scope>> for Scopes {
    fn from(list: Vec<Scope>) -> Self {
        let mut scopes = Self::new();
        for scope in list {
            scopes.insert(scope);
        }
        scopes
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.scopes.iter().map(Scope::as_str).collect();
        f.write_str(&joined.join(" "))
    }
}

impl Serialize for Scopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
