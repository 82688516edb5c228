use crate::{
    builder::build_list,
    codecs::Color,
    common::{is_true, Dictionary},
    layer::{Layer, LayerMap},
    record::{extras, mismatch, records, unexpected_children, Record, Value, ValueRef},
    schema::{EntitySchema, GLYPH, PART_PROPERTY},
    GlyphsError,
};
use chrono::{DateTime, FixedOffset};
use openstep_plist::Plist;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::ops::{Deref, DerefMut};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    pub fn get(&self, g: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == g)
    }
    pub fn get_mut(&mut self, g: &str) -> Option<&mut Glyph> {
        self.0.iter_mut().find(|glyph| glyph.name == g)
    }

    pub fn get_by_index(&self, id: usize) -> Option<&Glyph> {
        self.0.get(id)
    }
    pub fn get_by_index_mut(&mut self, id: usize) -> Option<&mut Glyph> {
        self.0.get_mut(id)
    }

    /// Remove a glyph by name.
    pub fn remove_named(&mut self, g: &str) -> Option<Glyph> {
        let index = self.0.iter().position(|glyph| glyph.name == g)?;
        Some(self.0.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// A fresh layer id, in the uppercase UUID form Glyphs writes.
pub(crate) fn new_layer_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub color: Option<Color>,
    #[serde(default = "default_export", skip_serializing_if = "is_true")]
    pub export: bool,
    pub name: SmolStr,
    pub production: Option<String>,
    pub last_change: Option<DateTime<FixedOffset>>,
    pub layers: LayerMap,
    pub left_kerning_group: Option<String>,
    pub left_metrics_key: Option<String>,
    pub width_metrics_key: Option<String>,
    pub vert_width_metrics_key: Option<String>,
    pub note: Option<String>,
    pub right_kerning_group: Option<String>,
    pub right_metrics_key: Option<String>,
    pub top_kerning_group: Option<String>,
    pub top_metrics_key: Option<String>,
    pub bottom_kerning_group: Option<String>,
    pub bottom_metrics_key: Option<String>,
    /// Hex codepoint, as written in the file (`0041`).
    pub unicode: Option<String>,
    pub script: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub user_data: Dictionary,
    pub parts_settings: Vec<PartProperty>,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

fn default_export() -> bool {
    true
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph {
            color: None,
            export: true,
            name: SmolStr::default(),
            production: None,
            last_change: None,
            layers: LayerMap::default(),
            left_kerning_group: None,
            left_metrics_key: None,
            width_metrics_key: None,
            vert_width_metrics_key: None,
            note: None,
            right_kerning_group: None,
            right_metrics_key: None,
            top_kerning_group: None,
            top_metrics_key: None,
            bottom_kerning_group: None,
            bottom_metrics_key: None,
            unicode: None,
            script: None,
            category: None,
            sub_category: None,
            user_data: Dictionary::new(),
            parts_settings: vec![],
            other: Dictionary::new(),
        }
    }
}

impl Glyph {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Glyph {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn get_layer(&self, id: &str) -> Option<&Layer> {
        self.layers.get(id)
    }
    pub fn get_layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    /// The first codepoint of the `unicode` field.
    pub fn codepoint(&self) -> Option<u32> {
        let unicode = self.unicode.as_deref()?;
        let first = unicode.split(',').next()?.trim();
        u32::from_str_radix(first, 16).ok()
    }

    /// Add a layer, generating an id if it has none. Returns the layer id.
    pub(crate) fn insert_layer(&mut self, mut layer: Layer) -> String {
        if layer.layer_id.is_empty() {
            layer.layer_id = new_layer_id();
            log::warn!(
                "Layer without an id in glyph {}; assigned {}",
                self.name,
                layer.layer_id
            );
        }
        layer.parent = Some(self.name.clone());
        let id = layer.layer_id.clone();
        self.layers.insert(layer);
        id
    }
}

impl Record for Glyph {
    fn schema(&self) -> &'static EntitySchema {
        &GLYPH
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "color" => ValueRef::Color(self.color.as_ref()?),
            "export" => ValueRef::Bool(self.export),
            "glyphname" => ValueRef::Str(&self.name),
            "production" => ValueRef::Str(self.production.as_deref()?),
            "lastChange" => ValueRef::Timestamp(self.last_change.as_ref()?),
            "layers" => ValueRef::Records(self.layers.iter().map(|l| l as &dyn Record).collect()),
            "leftKerningGroup" => ValueRef::Str(self.left_kerning_group.as_deref()?),
            "leftMetricsKey" => ValueRef::Str(self.left_metrics_key.as_deref()?),
            "widthMetricsKey" => ValueRef::Str(self.width_metrics_key.as_deref()?),
            "vertWidthMetricsKey" => ValueRef::Str(self.vert_width_metrics_key.as_deref()?),
            "note" => ValueRef::Str(self.note.as_deref()?),
            "rightKerningGroup" => ValueRef::Str(self.right_kerning_group.as_deref()?),
            "rightMetricsKey" => ValueRef::Str(self.right_metrics_key.as_deref()?),
            "topKerningGroup" => ValueRef::Str(self.top_kerning_group.as_deref()?),
            "topMetricsKey" => ValueRef::Str(self.top_metrics_key.as_deref()?),
            "bottomKerningGroup" => ValueRef::Str(self.bottom_kerning_group.as_deref()?),
            "bottomMetricsKey" => ValueRef::Str(self.bottom_metrics_key.as_deref()?),
            "unicode" => ValueRef::Str(self.unicode.as_deref()?),
            "script" => ValueRef::Str(self.script.as_deref()?),
            "category" => ValueRef::Str(self.category.as_deref()?),
            "subCategory" => ValueRef::Str(self.sub_category.as_deref()?),
            "userData" => ValueRef::Dict(&self.user_data),
            "partsSettings" => records(&self.parts_settings),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("color", Value::Color(v)) => self.color = Some(v),
            ("export", Value::Bool(v)) => self.export = v,
            ("glyphname", Value::String(v)) => self.name = v.into(),
            ("production", Value::String(v)) => self.production = Some(v),
            ("lastChange", Value::Timestamp(v)) => self.last_change = Some(v),
            ("leftKerningGroup", Value::String(v)) => self.left_kerning_group = Some(v),
            ("leftMetricsKey", Value::String(v)) => self.left_metrics_key = Some(v),
            ("widthMetricsKey", Value::String(v)) => self.width_metrics_key = Some(v),
            ("vertWidthMetricsKey", Value::String(v)) => self.vert_width_metrics_key = Some(v),
            ("note", Value::String(v)) => self.note = Some(v),
            ("rightKerningGroup", Value::String(v)) => self.right_kerning_group = Some(v),
            ("rightMetricsKey", Value::String(v)) => self.right_metrics_key = Some(v),
            ("topKerningGroup", Value::String(v)) => self.top_kerning_group = Some(v),
            ("topMetricsKey", Value::String(v)) => self.top_metrics_key = Some(v),
            ("bottomKerningGroup", Value::String(v)) => self.bottom_kerning_group = Some(v),
            ("bottomMetricsKey", Value::String(v)) => self.bottom_metrics_key = Some(v),
            ("unicode", Value::String(v)) => self.unicode = Some(v),
            ("script", Value::String(v)) => self.script = Some(v),
            ("category", Value::String(v)) => self.category = Some(v),
            ("subCategory", Value::String(v)) => self.sub_category = Some(v),
            ("userData", Value::Dict(v)) => self.user_data = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    fn set_children(&mut self, field: &str, items: &[Plist]) -> Result<(), GlyphsError> {
        match field {
            "layers" => {
                self.layers = LayerMap::default();
                for layer in build_list::<Layer>(items)? {
                    self.insert_layer(layer);
                }
            }
            "partsSettings" => self.parts_settings = build_list(items)?,
            _ => return Err(unexpected_children(self.schema(), field)),
        }
        Ok(())
    }

    /// `glyphname` may come after `layers`, so the layers learn their
    /// parent here.
    fn finish(&mut self) -> Result<(), GlyphsError> {
        for layer in self.layers.iter_mut() {
            layer.parent = Some(self.name.clone());
        }
        Ok(())
    }

    extras!();
}

/// One axis of a smart component glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartProperty {
    pub name: String,
    pub bottom_name: String,
    pub bottom_value: i64,
    pub top_name: String,
    pub top_value: i64,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Record for PartProperty {
    fn schema(&self) -> &'static EntitySchema {
        &PART_PROPERTY
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "name" => ValueRef::Str(&self.name),
            "bottomName" => ValueRef::Str(&self.bottom_name),
            "bottomValue" => ValueRef::Integer(self.bottom_value),
            "topName" => ValueRef::Str(&self.top_name),
            "topValue" => ValueRef::Integer(self.top_value),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("name", Value::String(v)) => self.name = v,
            ("bottomName", Value::String(v)) => self.bottom_name = v,
            ("bottomValue", Value::Integer(v)) => self.bottom_value = v,
            ("topName", Value::String(v)) => self.top_name = v,
            ("topValue", Value::Integer(v)) => self.top_value = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::builder::build;

    #[test]
    fn codepoint_from_hex() {
        let mut glyph = Glyph::new("A");
        assert_eq!(glyph.codepoint(), None);
        glyph.unicode = Some("0041".into());
        assert_eq!(glyph.codepoint(), Some(0x41));
        glyph.unicode = Some("1E9E".into());
        assert_eq!(glyph.codepoint(), Some(0x1E9E));
    }

    #[test]
    fn layers_learn_their_parent() {
        let plist = Plist::parse("{ layers = ({ layerId = M1; }, {}); glyphname = A; }").unwrap();
        let glyph: Glyph = build(&plist).unwrap();
        assert_eq!(glyph.layers.len(), 2);
        assert!(glyph.layers.iter().all(|l| l.parent() == Some("A")));
        // The second layer had no id and was given one.
        let generated = glyph.layers.get_by_index(1).unwrap();
        assert_eq!(generated.layer_id.len(), 36);
        assert!(glyph.get_layer(&generated.layer_id).is_some());
    }

    #[test]
    fn part_properties_always_written() {
        let part = PartProperty::default();
        for field in PART_PROPERTY.fields {
            assert!(field.always_emit);
            assert!(part.get(field.name).is_some());
        }
    }

    #[test]
    fn glyph_list_lookup() {
        let mut glyphs = GlyphList(vec![Glyph::new("A"), Glyph::new("B")]);
        assert_eq!(glyphs.get_by_index(1).map(|g| g.name.as_str()), Some("B"));
        assert!(glyphs.get("A").is_some());
        assert!(glyphs.remove_named("A").is_some());
        assert!(glyphs.get("A").is_none());
        assert_eq!(glyphs.len(), 1);
    }
}
