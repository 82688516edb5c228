use crate::{
    common::{Affine, Dictionary, Node},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, COMPONENT, PATH},
    GlyphsError,
};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A reference to another glyph, placed with an affine transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub alignment: i64,
    pub anchor: Option<String>,
    pub locked: bool,
    /// The referenced glyph's name
    pub name: SmolStr,
    /// Smart component axis values.
    pub piece: Dictionary,
    pub transform: Affine,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Default for Component {
    fn default() -> Self {
        Component {
            alignment: 0,
            anchor: None,
            locked: false,
            name: SmolStr::default(),
            piece: Dictionary::new(),
            transform: Affine::IDENTITY,
            other: Dictionary::new(),
        }
    }
}

impl Component {
    pub fn new(name: impl Into<SmolStr>, transform: Affine) -> Self {
        Component {
            name: name.into(),
            transform,
            ..Default::default()
        }
    }
}

impl Record for Component {
    fn schema(&self) -> &'static EntitySchema {
        &COMPONENT
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "alignment" => ValueRef::Integer(self.alignment),
            "anchor" => ValueRef::Str(self.anchor.as_deref()?),
            "locked" => ValueRef::Bool(self.locked),
            "name" => ValueRef::Str(&self.name),
            "piece" => ValueRef::Dict(&self.piece),
            "transform" => ValueRef::Transform(self.transform),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("alignment", Value::Integer(v)) => self.alignment = v,
            ("anchor", Value::String(v)) => self.anchor = Some(v),
            ("locked", Value::Bool(v)) => self.locked = v,
            ("name", Value::String(v)) => self.name = v.into(),
            ("piece", Value::Dict(v)) => self.piece = v,
            ("transform", Value::Transform(v)) => self.transform = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub closed: bool,
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Default for Path {
    fn default() -> Self {
        Path {
            closed: true,
            nodes: vec![],
            other: Dictionary::new(),
        }
    }
}

impl Path {
    pub fn new(nodes: Vec<Node>, closed: bool) -> Self {
        Path {
            closed,
            nodes,
            other: Dictionary::new(),
        }
    }
}

impl Record for Path {
    fn schema(&self) -> &'static EntitySchema {
        &PATH
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "closed" => ValueRef::Bool(self.closed),
            "nodes" => ValueRef::Nodes(&self.nodes),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("closed", Value::Bool(v)) => self.closed = v,
            ("nodes", Value::Nodes(v)) => self.nodes = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}
