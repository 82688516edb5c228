use crate::{
    codecs::HintTarget,
    common::{Dictionary, Point},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, HINT},
    GlyphsError,
};
use serde::{Deserialize, Serialize};

/// A PostScript or TrueType hint attached to a layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub horizontal: bool,
    pub options: i64,
    pub origin: Option<Point>,
    pub other1: Option<Point>,
    pub other2: Option<Point>,
    pub place: Option<Point>,
    pub scale: Option<Point>,
    pub stem: i64,
    pub target: Option<HintTarget>,
    /// Stored under `type`.
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Record for Hint {
    fn schema(&self) -> &'static EntitySchema {
        &HINT
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "horizontal" => ValueRef::Bool(self.horizontal),
            "options" => ValueRef::Integer(self.options),
            "origin" => ValueRef::Point(self.origin?),
            "other1" => ValueRef::Point(self.other1?),
            "other2" => ValueRef::Point(self.other2?),
            "place" => ValueRef::Point(self.place?),
            "scale" => ValueRef::Point(self.scale?),
            "stem" => ValueRef::Integer(self.stem),
            "target" => ValueRef::HintTarget(self.target.as_ref()?),
            "type" => ValueRef::Str(self.kind.as_deref()?),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("horizontal", Value::Bool(v)) => self.horizontal = v,
            ("options", Value::Integer(v)) => self.options = v,
            ("origin", Value::Point(v)) => self.origin = Some(v),
            ("other1", Value::Point(v)) => self.other1 = Some(v),
            ("other2", Value::Point(v)) => self.other2 = Some(v),
            ("place", Value::Point(v)) => self.place = Some(v),
            ("scale", Value::Point(v)) => self.scale = Some(v),
            ("stem", Value::Integer(v)) => self.stem = v,
            ("target", Value::HintTarget(v)) => self.target = Some(v),
            ("type", Value::String(v)) => self.kind = Some(v),
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}
