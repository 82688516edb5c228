use super::{read_int_list, Codec};
use crate::GlyphsError;
use openstep_plist::Plist;
use serde::{Deserialize, Serialize};

/// A glyph or layer color label: either an index into the Glyphs palette
/// or explicit RGBA components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Index(i64),
    Components(Vec<i64>),
}

impl Color {
    pub(crate) fn from_plist(plist: &Plist) -> Result<Color, GlyphsError> {
        match plist {
            Plist::Integer(i) => Ok(Color::Index(*i)),
            Plist::Array(items) => read_int_list(items).map(Color::Components),
            Plist::String(s) => Color::decode(s),
            other => Err(GlyphsError::invalid("color", other.to_string())),
        }
    }
}

impl Codec for Color {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        let invalid = || GlyphsError::invalid("color", text);
        let text = text.trim();
        match text.strip_prefix('(') {
            Some(inner) => inner
                .strip_suffix(')')
                .ok_or_else(invalid)?
                .split(',')
                .map(|c| c.trim().parse::<i64>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>, _>>()
                .map(Color::Components),
            None => text.parse().map(Color::Index).map_err(|_| invalid()),
        }
    }

    fn encode(&self) -> String {
        match self {
            Color::Index(i) => i.to_string(),
            Color::Components(c) => format!(
                "({})",
                c.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
            ),
        }
    }
}
