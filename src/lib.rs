//! Read and write Glyphs 2 font sources.
//!
//! A `.glyphs` file is an OpenStep-style property list. [`load`] parses it
//! and builds a typed [`Font`]: masters, glyphs and their layers, instances,
//! features, kerning and custom parameters. [`save`] writes the font back in
//! the canonical form Glyphs itself produces, so that a file which was
//! loaded and saved without changes is byte-for-byte identical.
//!
//! ```
//! let font = glyphsfile::load("{ familyName = \"Test Sans\"; unitsPerEm = 1000; }")?;
//! assert_eq!(font.family_name, "Test Sans");
//! assert!(glyphsfile::save(&font).contains("familyName = \"Test Sans\";"));
//! # Ok::<(), glyphsfile::GlyphsError>(())
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod anchor;
mod annotation;
mod builder;
pub mod codecs;
mod common;
mod custom_parameter;
mod error;
mod features;
mod font;
mod glyph;
mod guide;
mod hint;
mod instance;
mod kerning;
mod layer;
mod master;
mod record;
pub mod schema;
mod serializer;
mod shape;

pub use crate::{
    anchor::Anchor,
    annotation::Annotation,
    codecs::{AlignmentZone, Color, HintTarget},
    common::{Affine, Dictionary, Node, NodeType, Point},
    custom_parameter::{CustomParameter, CustomParameters, ParameterOwner, ParameterValue},
    error::GlyphsError,
    features::{Class, Feature, FeaturePrefix},
    font::Font,
    glyph::{Glyph, GlyphList, PartProperty},
    guide::GuideLine,
    hint::Hint,
    instance::Instance,
    kerning::Kerning,
    layer::{BackgroundLayer, Layer, LayerMap},
    master::FontMaster,
    shape::{Component, Path},
};
pub use openstep_plist::Plist;

/// Parse the text of a `.glyphs` file into a [`Font`].
///
/// Either the whole document loads or an error is returned; no partially
/// built font is ever handed out.
pub fn load(text: &str) -> Result<Font, GlyphsError> {
    log::debug!("Parsing {} bytes", text.len());
    let plist = Plist::parse(text)?;
    let font: Font = builder::build(&plist)?;
    log::debug!(
        "Loaded {}: {} masters, {} glyphs, {} instances",
        font.family_name,
        font.masters.len(),
        font.glyphs.len(),
        font.instances.len()
    );
    Ok(font)
}

/// Write a [`Font`] as the text of a `.glyphs` file.
pub fn save(font: &Font) -> String {
    serializer::serialize(font)
}
