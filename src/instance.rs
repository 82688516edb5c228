use crate::{
    common::Dictionary,
    custom_parameter::{CustomParameters, ParameterOwner},
    record::{extras, mismatch, Record, Value, ValueRef},
    schema::{EntitySchema, INSTANCE},
    GlyphsError,
};
use serde::{Deserialize, Serialize};

/// A named point in the design space to be exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub exports: bool,
    pub custom_parameters: CustomParameters,
    pub interpolation_custom: f64,
    pub interpolation_custom1: f64,
    pub interpolation_custom2: f64,
    pub interpolation_weight: f64,
    pub interpolation_width: f64,
    /// Master ids mapped to their interpolation factors.
    pub instance_interpolations: Dictionary,
    pub is_bold: bool,
    pub is_italic: bool,
    pub link_style: Option<String>,
    pub manual_interpolation: bool,
    pub name: String,
    pub weight_class: String,
    pub width_class: String,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Default for Instance {
    fn default() -> Self {
        Instance {
            exports: true,
            custom_parameters: CustomParameters::default(),
            interpolation_custom: 0.0,
            interpolation_custom1: 0.0,
            interpolation_custom2: 0.0,
            interpolation_weight: 100.0,
            interpolation_width: 100.0,
            instance_interpolations: Dictionary::new(),
            is_bold: false,
            is_italic: false,
            link_style: None,
            manual_interpolation: false,
            name: "Regular".to_string(),
            weight_class: "Regular".to_string(),
            width_class: "Medium (normal)".to_string(),
            other: Dictionary::new(),
        }
    }
}

impl Instance {
    pub fn new(name: impl Into<String>) -> Self {
        let mut instance = Instance {
            name: name.into(),
            ..Default::default()
        };
        instance
            .custom_parameters
            .set_owner(ParameterOwner::Instance(instance.name.clone()));
        instance
    }
}

impl Record for Instance {
    fn schema(&self) -> &'static EntitySchema {
        &INSTANCE
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "exports" => ValueRef::Bool(self.exports),
            "customParameters" => ValueRef::Parameters(&self.custom_parameters),
            "interpolationCustom" => ValueRef::Float(self.interpolation_custom),
            "interpolationCustom1" => ValueRef::Float(self.interpolation_custom1),
            "interpolationCustom2" => ValueRef::Float(self.interpolation_custom2),
            "interpolationWeight" => ValueRef::Float(self.interpolation_weight),
            "interpolationWidth" => ValueRef::Float(self.interpolation_width),
            "instanceInterpolations" => ValueRef::Dict(&self.instance_interpolations),
            "isBold" => ValueRef::Bool(self.is_bold),
            "isItalic" => ValueRef::Bool(self.is_italic),
            "linkStyle" => ValueRef::Str(self.link_style.as_deref()?),
            "manualInterpolation" => ValueRef::Bool(self.manual_interpolation),
            "name" => ValueRef::Str(&self.name),
            "weightClass" => ValueRef::Str(&self.weight_class),
            "widthClass" => ValueRef::Str(&self.width_class),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("exports", Value::Bool(v)) => self.exports = v,
            ("customParameters", Value::Parameters(v)) => self.custom_parameters = v,
            ("interpolationCustom", Value::Float(v)) => self.interpolation_custom = v,
            ("interpolationCustom1", Value::Float(v)) => self.interpolation_custom1 = v,
            ("interpolationCustom2", Value::Float(v)) => self.interpolation_custom2 = v,
            ("interpolationWeight", Value::Float(v)) => self.interpolation_weight = v,
            ("interpolationWidth", Value::Float(v)) => self.interpolation_width = v,
            ("instanceInterpolations", Value::Dict(v)) => self.instance_interpolations = v,
            ("isBold", Value::Bool(v)) => self.is_bold = v,
            ("isItalic", Value::Bool(v)) => self.is_italic = v,
            ("linkStyle", Value::String(v)) => self.link_style = Some(v),
            ("manualInterpolation", Value::Bool(v)) => self.manual_interpolation = v,
            ("name", Value::String(v)) => self.name = v,
            ("weightClass", Value::String(v)) => self.weight_class = v,
            ("widthClass", Value::String(v)) => self.width_class = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GlyphsError> {
        self.custom_parameters
            .set_owner(ParameterOwner::Instance(self.name.clone()));
        Ok(())
    }

    extras!();
}
