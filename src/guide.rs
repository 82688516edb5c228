use crate::{
    common::{Dictionary, Point},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, GUIDE_LINE},
    GlyphsError,
};
use serde::{Deserialize, Serialize};

/// A guide line, on a master or a layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub alignment: Option<String>,
    pub angle: f64,
    pub filter: Option<String>,
    pub locked: bool,
    pub name: Option<String>,
    pub position: Option<Point>,
    pub show_measurement: bool,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl GuideLine {
    pub fn new(position: Point, angle: f64) -> Self {
        GuideLine {
            position: Some(position),
            angle,
            ..Default::default()
        }
    }
}

impl Record for GuideLine {
    fn schema(&self) -> &'static EntitySchema {
        &GUIDE_LINE
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "alignment" => ValueRef::Str(self.alignment.as_deref()?),
            "angle" => ValueRef::Float(self.angle),
            "filter" => ValueRef::Str(self.filter.as_deref()?),
            "locked" => ValueRef::Bool(self.locked),
            "name" => ValueRef::Str(self.name.as_deref()?),
            "position" => ValueRef::Point(self.position?),
            "showMeasurement" => ValueRef::Bool(self.show_measurement),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("alignment", Value::String(v)) => self.alignment = Some(v),
            ("angle", Value::Float(v)) => self.angle = v,
            ("filter", Value::String(v)) => self.filter = Some(v),
            ("locked", Value::Bool(v)) => self.locked = v,
            ("name", Value::String(v)) => self.name = Some(v),
            ("position", Value::Point(v)) => self.position = Some(v),
            ("showMeasurement", Value::Bool(v)) => self.show_measurement = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}
