use crate::{
    builder::build_list,
    codecs::AlignmentZone,
    common::Dictionary,
    custom_parameter::{CustomParameters, ParameterOwner},
    guide::GuideLine,
    record::{extras, mismatch, records, unexpected_children, Record, Value, ValueRef},
    schema::{EntitySchema, FONT_MASTER},
    GlyphsError,
};
use openstep_plist::Plist;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMaster {
    pub alignment_zones: Vec<AlignmentZone>,
    pub ascender: f64,
    pub cap_height: f64,
    pub custom: Option<String>,
    pub custom1: Option<String>,
    pub custom2: Option<String>,
    pub custom_parameters: CustomParameters,
    pub custom_value: f64,
    pub custom_value1: f64,
    pub custom_value2: f64,
    pub descender: f64,
    pub guide_lines: Vec<GuideLine>,
    pub horizontal_stems: Vec<i64>,
    pub id: String,
    pub italic_angle: f64,
    /// An explicitly stored name; see [`FontMaster::name`].
    pub explicit_name: Option<String>,
    pub user_data: Dictionary,
    pub vertical_stems: Vec<i64>,
    pub visible: bool,
    pub weight: String,
    pub weight_value: f64,
    pub width: String,
    pub width_value: f64,
    pub x_height: f64,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Default for FontMaster {
    fn default() -> Self {
        FontMaster {
            alignment_zones: vec![],
            ascender: 0.0,
            cap_height: 0.0,
            custom: None,
            custom1: None,
            custom2: None,
            custom_parameters: CustomParameters::default(),
            custom_value: 0.0,
            custom_value1: 0.0,
            custom_value2: 0.0,
            descender: 0.0,
            guide_lines: vec![],
            horizontal_stems: vec![],
            id: String::new(),
            italic_angle: 0.0,
            explicit_name: None,
            user_data: Dictionary::new(),
            vertical_stems: vec![],
            visible: false,
            weight: "Regular".to_string(),
            weight_value: 100.0,
            width: "Regular".to_string(),
            width_value: 100.0,
            x_height: 0.0,
            other: Dictionary::new(),
        }
    }
}

impl FontMaster {
    pub fn new(id: impl Into<String>) -> Self {
        let mut master = FontMaster {
            id: id.into(),
            ..Default::default()
        };
        master
            .custom_parameters
            .set_owner(ParameterOwner::Master(master.id.clone()));
        master
    }

    /// The display name of the master.
    ///
    /// An explicitly stored name wins, then a "Master Name" custom
    /// parameter. Otherwise the name is made from the weight, width and
    /// custom labels, leaving out "Regular" when anything else is present,
    /// with "Italic" added for slanted masters.
    pub fn name(&self) -> String {
        if let Some(name) = &self.explicit_name {
            return name.clone();
        }
        if let Some(name) = self
            .custom_parameters
            .value("Master Name")
            .and_then(|v| v.as_str())
        {
            return name.to_string();
        }
        let mut names: Vec<&str> = vec![];
        let labels = [
            Some(self.weight.as_str()),
            Some(self.width.as_str()),
            self.custom.as_deref(),
            self.custom1.as_deref(),
            self.custom2.as_deref(),
        ];
        for label in labels.into_iter().flatten() {
            if !label.is_empty() && !names.contains(&label) {
                names.push(label);
            }
        }
        if names.len() > 1 {
            names.retain(|n| *n != "Regular");
        }
        if self.italic_angle.abs() > 0.01 {
            names.push("Italic");
        }
        names.join(" ")
    }
}

impl Record for FontMaster {
    fn schema(&self) -> &'static EntitySchema {
        &FONT_MASTER
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            "alignmentZones" => ValueRef::Zones(&self.alignment_zones),
            "ascender" => ValueRef::Float(self.ascender),
            "capHeight" => ValueRef::Float(self.cap_height),
            "custom" => ValueRef::Str(self.custom.as_deref()?),
            "custom1" => ValueRef::Str(self.custom1.as_deref()?),
            "custom2" => ValueRef::Str(self.custom2.as_deref()?),
            "customParameters" => ValueRef::Parameters(&self.custom_parameters),
            "customValue" => ValueRef::Float(self.custom_value),
            "customValue1" => ValueRef::Float(self.custom_value1),
            "customValue2" => ValueRef::Float(self.custom_value2),
            "descender" => ValueRef::Float(self.descender),
            "guideLines" => records(&self.guide_lines),
            "horizontalStems" => ValueRef::IntList(&self.horizontal_stems),
            "id" => ValueRef::Str(&self.id),
            "italicAngle" => ValueRef::Float(self.italic_angle),
            "name" => ValueRef::Str(self.explicit_name.as_deref()?),
            "userData" => ValueRef::Dict(&self.user_data),
            "verticalStems" => ValueRef::IntList(&self.vertical_stems),
            "visible" => ValueRef::Bool(self.visible),
            "weight" => ValueRef::Str(&self.weight),
            "weightValue" => ValueRef::Float(self.weight_value),
            "width" => ValueRef::Str(&self.width),
            "widthValue" => ValueRef::Float(self.width_value),
            "xHeight" => ValueRef::Float(self.x_height),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            ("alignmentZones", Value::Zones(v)) => self.alignment_zones = v,
            ("ascender", Value::Float(v)) => self.ascender = v,
            ("capHeight", Value::Float(v)) => self.cap_height = v,
            ("custom", Value::String(v)) => self.custom = Some(v),
            ("custom1", Value::String(v)) => self.custom1 = Some(v),
            ("custom2", Value::String(v)) => self.custom2 = Some(v),
            ("customParameters", Value::Parameters(v)) => self.custom_parameters = v,
            ("customValue", Value::Float(v)) => self.custom_value = v,
            ("customValue1", Value::Float(v)) => self.custom_value1 = v,
            ("customValue2", Value::Float(v)) => self.custom_value2 = v,
            ("descender", Value::Float(v)) => self.descender = v,
            ("horizontalStems", Value::IntList(v)) => self.horizontal_stems = v,
            ("id", Value::String(v)) => self.id = v,
            ("italicAngle", Value::Float(v)) => self.italic_angle = v,
            ("name", Value::String(v)) => self.explicit_name = Some(v),
            ("userData", Value::Dict(v)) => self.user_data = v,
            ("verticalStems", Value::IntList(v)) => self.vertical_stems = v,
            ("visible", Value::Bool(v)) => self.visible = v,
            ("weight", Value::String(v)) => self.weight = v,
            ("weightValue", Value::Float(v)) => self.weight_value = v,
            ("width", Value::String(v)) => self.width = v,
            ("widthValue", Value::Float(v)) => self.width_value = v,
            ("xHeight", Value::Float(v)) => self.x_height = v,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    fn set_children(&mut self, field: &str, items: &[Plist]) -> Result<(), GlyphsError> {
        match field {
            "guideLines" => self.guide_lines = build_list(items)?,
            _ => return Err(unexpected_children(self.schema(), field)),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GlyphsError> {
        self.custom_parameters
            .set_owner(ParameterOwner::Master(self.id.clone()));
        Ok(())
    }

    extras!();
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::custom_parameter::ParameterValue;
    use rstest::rstest;

    #[rstest]
    #[case("Regular", "Regular", None, 0.0, "Regular")]
    #[case("Bold", "Regular", None, 0.0, "Bold")]
    #[case("Bold", "Condensed", None, 0.0, "Bold Condensed")]
    #[case("Regular", "Regular", None, -12.0, "Regular Italic")]
    #[case("Light", "Regular", Some("Display"), 0.005, "Light Display")]
    #[case("Bold", "Bold", None, 0.0, "Bold")]
    fn derived_names(
        #[case] weight: &str,
        #[case] width: &str,
        #[case] custom: Option<&str>,
        #[case] italic_angle: f64,
        #[case] expected: &str,
    ) {
        let master = FontMaster {
            weight: weight.to_string(),
            width: width.to_string(),
            custom: custom.map(String::from),
            italic_angle,
            ..FontMaster::new("M1")
        };
        assert_eq!(master.name(), expected);
    }

    #[test]
    fn stored_names_win() {
        let mut master = FontMaster::new("M1");
        master
            .custom_parameters
            .set("Master Name", ParameterValue::String("Hairline".into()));
        assert_eq!(master.name(), "Hairline");
        master.explicit_name = Some("Thin".into());
        assert_eq!(master.name(), "Thin");
    }

    #[test]
    fn metrics_are_written_unless_zero() {
        let master = FontMaster {
            ascender: 800.0,
            x_height: 500.0,
            ..FontMaster::new("m")
        };
        let written = |field: &str| {
            let spec = FONT_MASTER.fields.iter().find(|f| f.name == field).unwrap();
            !crate::serializer::is_default(&spec.default.unwrap(), &master.get(field).unwrap())
        };
        assert!(written("ascender"));
        assert!(written("xHeight"));
        assert!(!written("capHeight"));
        assert!(!written("descender"));
    }

    #[test]
    fn defaults_match_schema() {
        let master = FontMaster::default();
        for field in FONT_MASTER.fields {
            let (Some(default), Some(value)) = (field.default, master.get(field.name)) else {
                continue;
            };
            assert!(
                crate::serializer::is_default(&default, &value),
                "{} does not match its default",
                field.name
            );
        }
    }
}
