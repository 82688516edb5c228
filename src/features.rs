use crate::{
    common::{is_false, Dictionary},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, FEATURE},
    GlyphsError,
};
use serde::{Deserialize, Serialize};

/// A block of feature code: an OpenType feature, a glyph class, or a
/// feature prefix. All three share the same keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "is_false")]
    pub automatic: bool,
    pub code: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

pub type Class = Feature;
pub type FeaturePrefix = Feature;

impl Feature {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Feature {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }
}

impl Record for Feature {
    fn schema(&self) -> &'static EntitySchema {
        &FEATURE
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "automatic" => ValueRef::Bool(self.automatic),
            "code" => ValueRef::Str(&self.code),
            "disabled" => ValueRef::Bool(self.disabled),
            "name" => ValueRef::Str(&self.name),
            "notes" => ValueRef::Str(self.notes.as_deref()?),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("automatic", Value::Bool(v)) => self.automatic = v,
            ("code", Value::String(v)) => self.code = v,
            ("disabled", Value::Bool(v)) => self.disabled = v,
            ("name", Value::String(v)) => self.name = v,
            ("notes", Value::String(v)) => self.notes = Some(v),
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    extras!();
}
