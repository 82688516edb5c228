use crate::{
    anchor::Anchor,
    annotation::Annotation,
    builder::{build, build_list},
    codecs::Color,
    common::Dictionary,
    guide::GuideLine,
    hint::Hint,
    record::{extras, mismatch, records, unexpected_children, Record, Value, ValueRef},
    schema::{EntitySchema, BACKGROUND_LAYER, LAYER},
    shape::{Component, Path},
    GlyphsError,
};
use indexmap::IndexMap;
use openstep_plist::Plist;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// One drawing of a glyph: a master layer, or an extra layer (a brace
/// layer, a backup) associated with a master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub anchors: Vec<Anchor>,
    pub annotations: Vec<Annotation>,
    /// The master this layer belongs to. For a master's own layer this is
    /// the layer id itself.
    pub associated_master_id: Option<String>,
    pub background: Option<Box<BackgroundLayer>>,
    pub background_image: Dictionary,
    pub color: Option<Color>,
    pub components: Vec<Component>,
    pub guide_lines: Vec<GuideLine>,
    pub hints: Vec<Hint>,
    pub layer_id: String,
    pub left_metrics_key: Option<String>,
    pub name: Option<String>,
    pub paths: Vec<Path>,
    pub right_metrics_key: Option<String>,
    pub user_data: Dictionary,
    pub vert_width: f64,
    pub visible: bool,
    pub width: f64,
    pub width_metrics_key: Option<String>,
    #[serde(skip)]
    pub(crate) parent: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Default for Layer {
    fn default() -> Self {
        Layer {
            anchors: vec![],
            annotations: vec![],
            associated_master_id: None,
            background: None,
            background_image: Dictionary::new(),
            color: None,
            components: vec![],
            guide_lines: vec![],
            hints: vec![],
            layer_id: String::new(),
            left_metrics_key: None,
            name: None,
            paths: vec![],
            right_metrics_key: None,
            user_data: Dictionary::new(),
            vert_width: 0.0,
            visible: false,
            width: 600.0,
            width_metrics_key: None,
            parent: None,
            other: Dictionary::new(),
        }
    }
}

impl Layer {
    pub fn new(layer_id: impl Into<String>) -> Self {
        Layer {
            layer_id: layer_id.into(),
            ..Default::default()
        }
    }

    /// A master layer shares its id with the master it belongs to.
    pub fn is_master_layer(&self) -> bool {
        self.associated_master_id.as_deref() == Some(self.layer_id.as_str())
    }

    /// The name of the glyph holding this layer.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn get_anchor(&self, name: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.name == name)
    }
}

impl Record for Layer {
    fn schema(&self) -> &'static EntitySchema {
        &LAYER
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "anchors" => records(&self.anchors),
            "annotations" => records(&self.annotations),
            "associatedMasterId" => match &self.associated_master_id {
                Some(id) if *id != self.layer_id => ValueRef::Str(id),
                _ => return None,
            },
            "background" => ValueRef::Record(self.background.as_deref()?),
            "backgroundImage" => ValueRef::Dict(&self.background_image),
            "color" => ValueRef::Color(self.color.as_ref()?),
            "components" => records(&self.components),
            "guideLines" => records(&self.guide_lines),
            "hints" => records(&self.hints),
            "layerId" if !self.layer_id.is_empty() => ValueRef::Str(&self.layer_id),
            "leftMetricsKey" => ValueRef::Str(self.left_metrics_key.as_deref()?),
            "name" => ValueRef::Str(self.name.as_deref()?),
            "paths" => records(&self.paths),
            "rightMetricsKey" => ValueRef::Str(self.right_metrics_key.as_deref()?),
            "userData" => ValueRef::Dict(&self.user_data),
            "vertWidth" => ValueRef::Float(self.vert_width),
            "visible" => ValueRef::Bool(self.visible),
            "width" => ValueRef::Float(self.width),
            "widthMetricsKey" => ValueRef::Str(self.width_metrics_key.as_deref()?),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("associatedMasterId", Value::String(v)) => self.associated_master_id = Some(v),
            ("backgroundImage", Value::Dict(v)) => self.background_image = v,
            ("color", Value::Color(v)) => self.color = Some(v),
            ("layerId", Value::String(v)) => self.layer_id = v,
            ("leftMetricsKey", Value::String(v)) => self.left_metrics_key = Some(v),
            ("name", Value::String(v)) => self.name = Some(v),
            ("rightMetricsKey", Value::String(v)) => self.right_metrics_key = Some(v),
            ("userData", Value::Dict(v)) => self.user_data = v,
            ("vertWidth", Value::Float(v)) => self.vert_width = v,
            ("visible", Value::Bool(v)) => self.visible = v,
            ("width", Value::Float(v)) => self.width = v,
            ("widthMetricsKey", Value::String(v)) => self.width_metrics_key = Some(v),
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    fn set_children(&mut self, field: &str, items: &[Plist]) -> Result<(), GlyphsError> {
        match field {
            "anchors" => self.anchors = build_list(items)?,
            "annotations" => self.annotations = build_list(items)?,
            "background" => {
                self.background = items.first().map(build).transpose()?.map(Box::new);
            }
            "components" => self.components = build_list(items)?,
            "guideLines" => self.guide_lines = build_list(items)?,
            "hints" => self.hints = build_list(items)?,
            "paths" => self.paths = build_list(items)?,
            _ => return Err(unexpected_children(self.schema(), field)),
        }
        Ok(())
    }

    extras!();
}

/// The background of a layer: the same drawing elements, without metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundLayer {
    pub anchors: Vec<Anchor>,
    pub annotations: Vec<Annotation>,
    pub background_image: Dictionary,
    pub components: Vec<Component>,
    pub guide_lines: Vec<GuideLine>,
    pub hints: Vec<Hint>,
    pub paths: Vec<Path>,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Record for BackgroundLayer {
    fn schema(&self) -> &'static EntitySchema {
        &BACKGROUND_LAYER
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "anchors" => records(&self.anchors),
            "annotations" => records(&self.annotations),
            "backgroundImage" => ValueRef::Dict(&self.background_image),
            "components" => records(&self.components),
            "guideLines" => records(&self.guide_lines),
            "hints" => records(&self.hints),
            "paths" => records(&self.paths),
            "visible" => ValueRef::Bool(self.visible),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("backgroundImage", Value::Dict(v)) => self.background_image = v,
            ("visible", Value::Bool(v)) => self.visible = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    fn set_children(&mut self, field: &str, items: &[Plist]) -> Result<(), GlyphsError> {
        match field {
            "anchors" => self.anchors = build_list(items)?,
            "annotations" => self.annotations = build_list(items)?,
            "components" => self.components = build_list(items)?,
            "guideLines" => self.guide_lines = build_list(items)?,
            "hints" => self.hints = build_list(items)?,
            "paths" => self.paths = build_list(items)?,
            _ => return Err(unexpected_children(self.schema(), field)),
        }
        Ok(())
    }

    extras!();
}

/// The layers of a glyph, keyed by layer id in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerMap(IndexMap<String, Layer>);

impl LayerMap {
    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.0.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.0.get_mut(id)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Layer> {
        self.0.get_index(index).map(|(_, layer)| layer)
    }

    pub fn get_by_index_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.0.get_index_mut(index).map(|(_, layer)| layer)
    }

    /// Insert a layer under its id, replacing any layer with the same id.
    pub fn insert(&mut self, layer: Layer) -> Option<Layer> {
        self.0.insert(layer.layer_id.clone(), layer)
    }

    pub fn remove(&mut self, id: &str) -> Option<Layer> {
        self.0.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.0.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.0.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn master_layer_hides_its_association() {
        let mut layer = Layer::new("M1");
        layer.associated_master_id = Some("M1".into());
        assert!(layer.is_master_layer());
        assert!(layer.get("associatedMasterId").is_none());
        layer.associated_master_id = Some("M2".into());
        assert!(!layer.is_master_layer());
        assert!(matches!(layer.get("associatedMasterId"), Some(ValueRef::Str("M2"))));
    }

    #[test]
    fn background_is_built() {
        let plist = Plist::parse(
            "{ layerId = M1; background = { paths = ({ closed = 1; nodes = (\"0 0 LINE\"); }); }; }",
        )
        .unwrap();
        let layer: Layer = build(&plist).unwrap();
        let background = layer.background.unwrap();
        assert_eq!(background.paths.len(), 1);
        assert_eq!(layer.width, 600.0);
    }

    #[test]
    fn layer_map_keeps_order() {
        let mut layers = LayerMap::default();
        layers.insert(Layer::new("B"));
        layers.insert(Layer::new("A"));
        assert_eq!(layers.ids().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(layers.get_by_index(1).map(|l| l.layer_id.as_str()), Some("A"));
        assert!(layers.remove("B").is_some());
        assert_eq!(layers.len(), 1);
        assert!(layers.get("B").is_none());
    }
}
