//! Codecs for the scalar literals found in a Glyphs source.
//!
//! Most values in a `.glyphs` file are plain strings or numbers, but a few
//! carry structure inside a string: points (`"{x, y}"`), transforms, nodes,
//! alignment zones, hint targets and timestamps. Each of those types
//! implements [`Codec`]. [`float_to_string`] and [`encode_string`] control
//! how numbers and strings are written back.
mod color;
mod numbers;
mod strings;
mod timestamp;
mod vectors;

use crate::GlyphsError;

pub use color::Color;
pub use numbers::float_to_string;
pub(crate) use numbers::{bool_from_plist, float_from_plist, int_from_plist, read_int_list};
pub(crate) use strings::{encode_plist_string, encode_unicode, text_from_plist};
pub use strings::{encode_string, needs_quotes, unescape_feature_code};
pub use vectors::{AlignmentZone, HintTarget};

/// Conversion between a typed value and its textual form.
///
/// `decode` receives the string content of a value, with any surrounding
/// quotes already removed by the parser. `encode` returns the literal as it
/// is written into a document, quotes included where the format needs them.
pub trait Codec: Sized {
    fn decode(text: &str) -> Result<Self, GlyphsError>;
    fn encode(&self) -> String;
}
