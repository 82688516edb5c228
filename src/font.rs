use crate::{
    builder::build_list,
    common::Dictionary,
    custom_parameter::{CustomParameters, ParameterOwner},
    features::{Class, Feature, FeaturePrefix},
    glyph::{new_layer_id, Glyph, GlyphList},
    instance::Instance,
    kerning::Kerning,
    layer::Layer,
    master::FontMaster,
    record::{extras, mismatch, records, unexpected_children, Record, Value, ValueRef},
    schema::{EntitySchema, FONT},
    serializer, GlyphsError,
};
use chrono::{DateTime, FixedOffset};
use openstep_plist::Plist;
use serde::{Deserialize, Serialize};

/// A Glyphs font source: the root of the entity graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub app_version: Option<String>,
    pub display_strings: Vec<String>,
    pub classes: Vec<Class>,
    pub copyright: Option<String>,
    pub custom_parameters: CustomParameters,
    pub date: Option<DateTime<FixedOffset>>,
    pub designer: Option<String>,
    pub designer_url: Option<String>,
    pub disables_automatic_alignment: bool,
    pub disables_nice_names: bool,
    pub family_name: String,
    pub feature_prefixes: Vec<FeaturePrefix>,
    pub features: Vec<Feature>,
    pub masters: Vec<FontMaster>,
    pub glyphs: GlyphList,
    pub grid_length: i64,
    pub grid_sub_division: i64,
    pub instances: Vec<Instance>,
    pub keep_alternates_together: bool,
    pub kerning: Kerning,
    pub manufacturer: Option<String>,
    pub manufacturer_url: Option<String>,
    pub units_per_em: i64,
    pub user_data: Dictionary,
    pub version_major: i64,
    version_minor: i64,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl Default for Font {
    fn default() -> Self {
        let mut custom_parameters = CustomParameters::default();
        custom_parameters.set_owner(ParameterOwner::Font);
        Font {
            app_version: None,
            display_strings: vec![],
            classes: vec![],
            copyright: None,
            custom_parameters,
            date: None,
            designer: None,
            designer_url: None,
            disables_automatic_alignment: false,
            disables_nice_names: false,
            family_name: "Unnamed font".to_string(),
            feature_prefixes: vec![],
            features: vec![],
            masters: vec![],
            glyphs: GlyphList::default(),
            grid_length: 1,
            grid_sub_division: 1,
            instances: vec![],
            keep_alternates_together: false,
            kerning: Kerning::default(),
            manufacturer: None,
            manufacturer_url: None,
            units_per_em: 1000,
            user_data: Dictionary::new(),
            version_major: 1,
            version_minor: 0,
            other: Dictionary::new(),
        }
    }
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.glyphs` document.
    pub fn load_str(s: &str) -> Result<Font, GlyphsError> {
        crate::load(s)
    }

    /// Write the font as a `.glyphs` document.
    pub fn to_glyphs_string(&self) -> String {
        serializer::serialize(self)
    }

    pub fn version_minor(&self) -> i64 {
        self.version_minor
    }

    /// Set the minor version, which must lie in 0..=999.
    pub fn set_version_minor(&mut self, version: i64) -> Result<(), GlyphsError> {
        if !(0..=999).contains(&version) {
            return Err(GlyphsError::VersionOutOfRange(version));
        }
        self.version_minor = version;
        Ok(())
    }

    pub fn master(&self, id: &str) -> Option<&FontMaster> {
        self.masters.iter().find(|m| m.id == id)
    }

    pub fn master_mut(&mut self, id: &str) -> Option<&mut FontMaster> {
        self.masters.iter_mut().find(|m| m.id == id)
    }

    pub fn default_master(&self) -> Option<&FontMaster> {
        self.masters.first()
    }

    /// Add a master. Layers already carrying its id become its master
    /// layers.
    pub fn add_master(&mut self, mut master: FontMaster) {
        master
            .custom_parameters
            .set_owner(ParameterOwner::Master(master.id.clone()));
        self.masters.push(master);
        self.associate_master_layers();
    }

    pub fn remove_master(&mut self, id: &str) -> Result<FontMaster, GlyphsError> {
        let index = self
            .masters
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| GlyphsError::MasterNotFound(id.to_string()))?;
        Ok(self.masters.remove(index))
    }

    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    pub fn glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.glyphs.get_mut(name)
    }

    pub fn add_glyph(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
        self.associate_master_layers();
    }

    pub fn remove_glyph(&mut self, name: &str) -> Result<Glyph, GlyphsError> {
        self.glyphs
            .remove_named(name)
            .ok_or_else(|| GlyphsError::GlyphNotFound(name.to_string()))
    }

    /// Add a layer to a glyph and return its id.
    ///
    /// A layer without an id gets a fresh one. A layer not associated
    /// with a master is associated with the first master, unless its id is
    /// itself a master id, in which case it becomes that master's layer.
    pub fn add_layer(&mut self, glyph: &str, mut layer: Layer) -> Result<String, GlyphsError> {
        if layer.layer_id.is_empty() {
            layer.layer_id = new_layer_id();
        }
        if self.master(&layer.layer_id).is_some() {
            layer.associated_master_id = Some(layer.layer_id.clone());
        } else if layer.associated_master_id.is_none() {
            let first = self
                .masters
                .first()
                .ok_or_else(|| GlyphsError::MasterNotFound("(no masters)".to_string()))?;
            layer.associated_master_id = Some(first.id.clone());
        }
        let glyph = self
            .glyphs
            .get_mut(glyph)
            .ok_or_else(|| GlyphsError::GlyphNotFound(glyph.to_string()))?;
        Ok(glyph.insert_layer(layer))
    }

    /// The master a layer belongs to.
    pub fn master_for_layer(&self, layer: &Layer) -> Option<&FontMaster> {
        self.master(layer.associated_master_id.as_deref()?)
    }

    /// A master layer is named after its master; other layers use their
    /// stored name.
    pub fn layer_name(&self, layer: &Layer) -> Option<String> {
        if layer.is_master_layer() {
            if let Some(master) = self.master(&layer.layer_id) {
                return Some(master.name());
            }
        }
        layer.name.clone()
    }

    /// Point every layer whose id is a master id at that master.
    fn associate_master_layers(&mut self) {
        let masters = &self.masters;
        for glyph in self.glyphs.iter_mut() {
            for layer in glyph.layers.iter_mut() {
                if layer.associated_master_id.is_none()
                    && masters.iter().any(|m| m.id == layer.layer_id)
                {
                    log::trace!("{}: {} is a master layer", glyph.name, layer.layer_id);
                    layer.associated_master_id = Some(layer.layer_id.clone());
                }
            }
        }
    }
}

impl Record for Font {
    fn schema(&self) -> &'static EntitySchema {
        &FONT
    }

    fn get(&self, field: &str) -> Option<ValueRef<'_>> {
        Some(match field {
            ".appVersion" => ValueRef::Str(self.app_version.as_deref()?),
            "DisplayStrings" => ValueRef::StringList(&self.display_strings),
            "classes" => records(&self.classes),
            "copyright" => ValueRef::Str(self.copyright.as_deref()?),
            "customParameters" => ValueRef::Parameters(&self.custom_parameters),
            "date" => ValueRef::Timestamp(self.date.as_ref()?),
            "designer" => ValueRef::Str(self.designer.as_deref()?),
            "designerURL" => ValueRef::Str(self.designer_url.as_deref()?),
            "disablesAutomaticAlignment" => ValueRef::Bool(self.disables_automatic_alignment),
            "disablesNiceNames" => ValueRef::Bool(self.disables_nice_names),
            "familyName" => ValueRef::Str(&self.family_name),
            "featurePrefixes" => records(&self.feature_prefixes),
            "features" => records(&self.features),
            "fontMaster" => records(&self.masters),
            "glyphs" => records(self.glyphs.as_slice()),
            "gridLength" => ValueRef::Integer(self.grid_length),
            "gridSubDivision" => ValueRef::Integer(self.grid_sub_division),
            "instances" => records(&self.instances),
            "keepAlternatesTogether" => ValueRef::Bool(self.keep_alternates_together),
            "kerning" => ValueRef::Kerning(&self.kerning),
            "manufacturer" => ValueRef::Str(self.manufacturer.as_deref()?),
            "manufacturerURL" => ValueRef::Str(self.manufacturer_url.as_deref()?),
            "unitsPerEm" => ValueRef::Integer(self.units_per_em),
            "userData" => ValueRef::Dict(&self.user_data),
            "versionMajor" => ValueRef::Integer(self.version_major),
            "versionMinor" => ValueRef::Integer(self.version_minor),
            _ => return None,
        })
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError> {
        match (field, value) {
            (".appVersion", Value::String(v)) => self.app_version = Some(v),
            ("DisplayStrings", Value::StringList(v)) => self.display_strings = v,
            ("copyright", Value::String(v)) => self.copyright = Some(v),
            ("customParameters", Value::Parameters(v)) => self.custom_parameters = v,
            ("date", Value::Timestamp(v)) => self.date = Some(v),
            ("designer", Value::String(v)) => self.designer = Some(v),
            ("designerURL", Value::String(v)) => self.designer_url = Some(v),
            ("disablesAutomaticAlignment", Value::Bool(v)) => self.disables_automatic_alignment = v,
            ("disablesNiceNames", Value::Bool(v)) => self.disables_nice_names = v,
            ("familyName", Value::String(v)) => self.family_name = v,
            ("gridLength", Value::Integer(v)) => self.grid_length = v,
            ("gridSubDivision", Value::Integer(v)) => self.grid_sub_division = v,
            ("keepAlternatesTogether", Value::Bool(v)) => self.keep_alternates_together = v,
            ("kerning", Value::Kerning(v)) => self.kerning = v,
            ("manufacturer", Value::String(v)) => self.manufacturer = Some(v),
            ("manufacturerURL", Value::String(v)) => self.manufacturer_url = Some(v),
            ("unitsPerEm", Value::Integer(v)) => self.units_per_em = v,
            ("userData", Value::Dict(v)) => self.user_data = v,
            ("versionMajor", Value::Integer(v)) => self.version_major = v,
            ("versionMinor", Value::Integer(v)) => self.set_version_minor(v)?,
            (field, value) => return Err(mismatch(self.schema(), field, &value)),
        }
        Ok(())
    }

    fn set_children(&mut self, field: &str, items: &[Plist]) -> Result<(), GlyphsError> {
        match field {
            "classes" => self.classes = build_list(items)?,
            "featurePrefixes" => self.feature_prefixes = build_list(items)?,
            "features" => self.features = build_list(items)?,
            "fontMaster" => self.masters = build_list(items)?,
            "glyphs" => self.glyphs = GlyphList(build_list(items)?),
            "instances" => self.instances = build_list(items)?,
            _ => return Err(unexpected_children(self.schema(), field)),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GlyphsError> {
        self.custom_parameters.set_owner(ParameterOwner::Font);
        self.associate_master_layers();
        Ok(())
    }

    extras!();
}
