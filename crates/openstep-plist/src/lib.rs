//! # openstep-plist
//!
//! A parser for the ASCII ("OpenStep") property list dialect in which
//! `.glyphs` font sources are stored.
//!
//! ```text
//! {
//! familyName = "My Font";
//! unitsPerEm = 1000;
//! glyphs = (
//! { glyphname = A; unicode = 0041; }
//! );
//! }
//! ```
//!
//! Dictionaries keep the order of their keys. Bare tokens are turned into
//! integers or floats only when the token is exactly how that number would
//! be written; everything else (`0041`, `1.50`, `A.sc`) stays a string, so
//! no information is lost by parsing.
#![deny(clippy::unwrap_used, clippy::expect_used)]
mod error;
mod parse;

use indexmap::IndexMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use error::Error;

/// Whether `token`, written bare, would be read back as a number rather
/// than a string.
pub fn reads_as_number(token: &str) -> bool {
    !matches!(parse::classify(token), Plist::String(_))
}

/// An ordered dictionary of property list values.
pub type Dictionary = IndexMap<String, Plist>;

/// A property list value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Plist {
    Dictionary(Dictionary),
    Array(Vec<Plist>),
    String(String),
    Integer(i64),
    Float(OrderedFloat<f64>),
}

impl Plist {
    /// Parse a complete property list document.
    pub fn parse(s: &str) -> Result<Plist, Error> {
        parse::Parser::new(s).parse_document()
    }

    /// A short name for the kind of value, for use in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Plist::Dictionary(_) => "dictionary",
            Plist::Array(_) => "array",
            Plist::String(_) => "string",
            Plist::Integer(_) => "integer",
            Plist::Float(_) => "float",
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Plist::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Plist]> {
        match self {
            Plist::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Plist::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Plist::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers are widened to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Plist::Integer(i) => Some(*i as f64),
            Plist::Float(f) => Some(f.into_inner()),
            _ => None,
        }
    }

    /// Look up a key, if this is a dictionary.
    pub fn get(&self, key: &str) -> Option<&Plist> {
        self.as_dict().and_then(|d| d.get(key))
    }
}

impl FromStr for Plist {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plist::parse(s)
    }
}

/// A compact single-line rendering, used in diagnostics.
impl fmt::Display for Plist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plist::Dictionary(d) => write!(
                f,
                "{{{}}}",
                d.iter().map(|(k, v)| format!("{k:?} = {v};")).join(" ")
            ),
            Plist::Array(a) => write!(f, "({})", a.iter().join(", ")),
            Plist::String(s) => write!(f, "{s:?}"),
            Plist::Integer(i) => write!(f, "{i}"),
            Plist::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Plist {
    fn from(s: &str) -> Self {
        Plist::String(s.to_string())
    }
}

impl From<String> for Plist {
    fn from(s: String) -> Self {
        Plist::String(s)
    }
}

impl From<i64> for Plist {
    fn from(i: i64) -> Self {
        Plist::Integer(i)
    }
}

impl From<f64> for Plist {
    fn from(f: f64) -> Self {
        Plist::Float(OrderedFloat(f))
    }
}

impl From<Vec<Plist>> for Plist {
    fn from(a: Vec<Plist>) -> Self {
        Plist::Array(a)
    }
}

impl From<Dictionary> for Plist {
    fn from(d: Dictionary) -> Self {
        Plist::Dictionary(d)
    }
}
