use crate::{
    common::{Dictionary, Point},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, ANCHOR},
    GlyphsError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub name: String,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Anchor {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Anchor {
            name: name.into(),
            position,
            other: Dictionary::new(),
        }
    }
}

impl Record for Anchor {
    fn schema(&self) -> &'static EntitySchema {
        &ANCHOR
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "name" => ValueRef::Str(&self.name),
            "position" => ValueRef::Point(self.position),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("name", Value::String(v)) => self.name = v,
            ("position", Value::Point(v)) => self.position = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}
