use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("unknown {feature} value: {value:?}")]
    UnknownValue { feature: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Number {
    Singular = 0,
    Plural = 1,
}

impl Number {
    /// Value carried by the `Number=` feature.
    pub const fn as_feature(self) -> &'static str {
        match self {
            Number::Singular => "Sing",
            Number::Plural => "Plur",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Number::Singular => Number::Plural,
            Number::Plural => Number::Singular,
        }
    }
}

impl FromStr for Number {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sing" | "singular" | "sg" | "s" => Ok(Number::Singular),
            "plur" | "plural" | "pl" | "p" => Ok(Number::Plural),
            _ => Err(FeatureError::UnknownValue { feature: "Number", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_feature())
    }
}

/// Target and observed verb tenses. `Infinitive` never appears as a
/// `Tense=` value; it is expressed as `VerbForm=Inf` with no tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Tense {
    Present = 0,
    Past = 1,
    Infinitive = 2,
}

impl Tense {
    pub const fn as_feature(self) -> Option<&'static str> {
        match self {
            Tense::Present => Some("Pres"),
            Tense::Past => Some("Past"),
            Tense::Infinitive => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Past => "past",
            Tense::Infinitive => "infinitive",
        }
    }
}

impl FromStr for Tense {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pres" | "present" => Ok(Tense::Present),
            "past" | "pst" | "preterite" => Ok(Tense::Past),
            "inf" | "infinitive" => Ok(Tense::Infinitive),
            _ => Err(FeatureError::UnknownValue { feature: "Tense", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Person {
    First = 1,
    Second = 2,
    Third = 3,
}

impl Person {
    pub const fn as_feature(self) -> &'static str {
        match self {
            Person::First => "1",
            Person::Second => "2",
            Person::Third => "3",
        }
    }
}

impl FromStr for Person {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Person::First),
            "2" => Ok(Person::Second),
            "3" => Ok(Person::Third),
            _ => Err(FeatureError::UnknownValue { feature: "Person", value: s.to_string() }),
        }
    }
}

/// Morphological feature set. Keys are kept sorted, which matches the
/// canonical order parsers print them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Morph(BTreeMap<String, String>);

impl Morph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Sets `key` to `value`, or removes it when `value` is `None`.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => self.insert(key, value),
            None => {
                self.remove(key);
            }
        }
    }

    pub fn with(mut self, key: &str, value: Option<&str>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn number(&self) -> Option<Number> {
        self.get("Number").and_then(|v| v.parse().ok())
    }

    /// Finite tense only; infinitives report `None` here.
    pub fn tense(&self) -> Option<Tense> {
        self.get("Tense").and_then(|v| v.parse().ok()).filter(|t| *t != Tense::Infinitive)
    }

    pub fn person(&self) -> Option<Person> {
        self.get("Person").and_then(|v| v.parse().ok())
    }

    pub fn is_infinitive(&self) -> bool {
        self.get("VerbForm") == Some("Inf")
    }

    pub fn is_indefinite(&self) -> bool {
        self.get("Definite") == Some("Ind")
    }

    pub fn set_number(&mut self, number: Option<Number>) {
        self.set("Number", number.map(Number::as_feature));
    }

    pub fn set_person(&mut self, person: Option<Person>) {
        self.set("Person", person.map(Person::as_feature));
    }

    /// `Infinitive` clears the tense and marks `VerbForm=Inf`.
    pub fn set_tense(&mut self, tense: Tense) {
        match tense.as_feature() {
            Some(value) => self.insert("Tense", value),
            None => {
                self.remove("Tense");
                self.insert("VerbForm", "Inf");
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Morph {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, (key, value)) in self.0.iter().enumerate() {
            if n > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}
