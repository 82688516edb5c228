use crate::{
    common::{Dictionary, Point},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, ANNOTATION},
    GlyphsError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub angle: f64,
    pub position: Option<Point>,
    pub text: Option<String>,
    /// Stored under `type`: Text, Arrow, Circle and so on.
    pub kind: Option<String>,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Record for Annotation {
    fn schema(&self) -> &'static EntitySchema {
        &ANNOTATION
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "angle" => ValueRef::Float(self.angle),
            "position" => ValueRef::Point(self.position?),
            "text" => ValueRef::Str(self.text.as_deref()?),
            "type" => ValueRef::Str(self.kind.as_deref()?),
            "width" => ValueRef::Float(self.width),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("angle", Value::Float(v)) => self.angle = v,
            ("position", Value::Point(v)) => self.position = Some(v),
            ("text", Value::String(v)) => self.text = Some(v),
            ("type", Value::String(v)) => self.kind = Some(v),
            ("width", Value::Float(v)) => self.width = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}
