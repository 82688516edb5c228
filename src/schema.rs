//! The static description of every entity in a Glyphs document.
//!
//! Each entity has an [`EntitySchema`]: the list of keys it understands,
//! what type of value lives under each key, its default value if it has one,
//! and whether the key must be written even when it holds its default. The
//! builder uses the schema to decode values; the serializer uses it to decide
//! what to write and in which order.

/// The entities making up a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Font,
    FontMaster,
    Glyph,
    Layer,
    BackgroundLayer,
    Path,
    Component,
    Anchor,
    GuideLine,
    Hint,
    Annotation,
    Instance,
    Feature,
    PartProperty,
}

/// The type of value held under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// Feature code, with Glyphs' escapes decoded on read.
    Code,
    /// A hex codepoint string, written bare.
    Unicode,
    Integer,
    Float,
    Bool,
    Point,
    Transform,
    Timestamp,
    Color,
    IntList,
    StringList,
    Dict,
    Nodes,
    AlignmentZones,
    HintTarget,
    Kerning,
    CustomParameters,
    Entity(EntityKind),
    EntityList(EntityKind),
}

impl FieldType {
    /// How the type is described in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Code | FieldType::Unicode => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Bool => "boolean",
            FieldType::Point | FieldType::HintTarget => "point literal",
            FieldType::Transform => "transform literal",
            FieldType::Timestamp => "timestamp literal",
            FieldType::Color => "color",
            FieldType::IntList | FieldType::StringList | FieldType::Nodes => "array",
            FieldType::AlignmentZones => "array",
            FieldType::Dict | FieldType::Kerning => "dictionary",
            FieldType::CustomParameters | FieldType::EntityList(_) => "array of dictionaries",
            FieldType::Entity(_) => "dictionary",
        }
    }
}

/// A default value declared for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(&'static str),
    Transform([f64; 6]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub default: Option<DefaultValue>,
    /// Written even when the value is its default or empty.
    pub always_emit: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, ty: FieldType) -> Self {
        FieldSpec {
            name,
            ty,
            default: None,
            always_emit: false,
        }
    }

    const fn with_default(self, default: DefaultValue) -> Self {
        FieldSpec {
            default: Some(default),
            ..self
        }
    }

    const fn always(self) -> Self {
        FieldSpec {
            always_emit: true,
            ..self
        }
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    /// The Glyphs class name, used in messages.
    pub name: &'static str,
    pub kind: EntityKind,
    /// Fields in the order they are written when `explicit_order` is set.
    pub fields: &'static [FieldSpec],
    /// If false, keys are written sorted by byte value.
    pub explicit_order: bool,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|f| f.name == name)
    }
}

use DefaultValue as D;
use FieldType as T;

const fn f(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec::new(name, ty)
}

pub static FONT: EntitySchema = EntitySchema {
    name: "GSFont",
    kind: EntityKind::Font,
    explicit_order: false,
    fields: &[
        f(".appVersion", T::String),
        f("DisplayStrings", T::StringList),
        f("classes", T::EntityList(EntityKind::Feature)),
        f("copyright", T::String),
        f("customParameters", T::CustomParameters),
        f("date", T::Timestamp),
        f("designer", T::String),
        f("designerURL", T::String),
        f("disablesAutomaticAlignment", T::Bool).with_default(D::Bool(false)),
        f("disablesNiceNames", T::Bool).with_default(D::Bool(false)),
        f("familyName", T::String)
            .with_default(D::Str("Unnamed font"))
            .always(),
        f("featurePrefixes", T::EntityList(EntityKind::Feature)),
        f("features", T::EntityList(EntityKind::Feature)),
        f("fontMaster", T::EntityList(EntityKind::FontMaster)),
        f("glyphs", T::EntityList(EntityKind::Glyph)),
        f("gridLength", T::Integer).with_default(D::Integer(1)),
        f("gridSubDivision", T::Integer).with_default(D::Integer(1)),
        f("instances", T::EntityList(EntityKind::Instance)),
        f("keepAlternatesTogether", T::Bool).with_default(D::Bool(false)),
        f("kerning", T::Kerning),
        f("manufacturer", T::String),
        f("manufacturerURL", T::String),
        f("unitsPerEm", T::Integer)
            .with_default(D::Integer(1000))
            .always(),
        f("userData", T::Dict),
        f("versionMajor", T::Integer)
            .with_default(D::Integer(1))
            .always(),
        f("versionMinor", T::Integer)
            .with_default(D::Integer(0))
            .always(),
    ],
};

pub static FONT_MASTER: EntitySchema = EntitySchema {
    name: "GSFontMaster",
    kind: EntityKind::FontMaster,
    explicit_order: false,
    fields: &[
        f("alignmentZones", T::AlignmentZones),
        f("ascender", T::Float).with_default(D::Float(0.0)),
        f("capHeight", T::Float).with_default(D::Float(0.0)),
        f("custom", T::String),
        f("custom1", T::String),
        f("custom2", T::String),
        f("customParameters", T::CustomParameters),
        f("customValue", T::Float).with_default(D::Float(0.0)),
        f("customValue1", T::Float).with_default(D::Float(0.0)),
        f("customValue2", T::Float).with_default(D::Float(0.0)),
        f("descender", T::Float).with_default(D::Float(0.0)),
        f("guideLines", T::EntityList(EntityKind::GuideLine)),
        f("horizontalStems", T::IntList),
        f("id", T::String),
        f("italicAngle", T::Float).with_default(D::Float(0.0)),
        f("name", T::String),
        f("userData", T::Dict),
        f("verticalStems", T::IntList),
        f("visible", T::Bool).with_default(D::Bool(false)),
        f("weight", T::String).with_default(D::Str("Regular")),
        f("weightValue", T::Float).with_default(D::Float(100.0)),
        f("width", T::String).with_default(D::Str("Regular")),
        f("widthValue", T::Float).with_default(D::Float(100.0)),
        f("xHeight", T::Float).with_default(D::Float(0.0)),
    ],
};

pub static GLYPH: EntitySchema = EntitySchema {
    name: "GSGlyph",
    kind: EntityKind::Glyph,
    explicit_order: true,
    fields: &[
        f("color", T::Color),
        f("export", T::Bool).with_default(D::Bool(true)),
        f("glyphname", T::String),
        f("production", T::String),
        f("lastChange", T::Timestamp),
        f("layers", T::EntityList(EntityKind::Layer)),
        f("leftKerningGroup", T::String),
        f("leftMetricsKey", T::String),
        f("widthMetricsKey", T::String),
        f("vertWidthMetricsKey", T::String),
        f("note", T::String),
        f("rightKerningGroup", T::String),
        f("rightMetricsKey", T::String),
        f("topKerningGroup", T::String),
        f("topMetricsKey", T::String),
        f("bottomKerningGroup", T::String),
        f("bottomMetricsKey", T::String),
        f("unicode", T::Unicode),
        f("script", T::String),
        f("category", T::String),
        f("subCategory", T::String),
        f("userData", T::Dict),
        f("partsSettings", T::EntityList(EntityKind::PartProperty)),
    ],
};

pub static LAYER: EntitySchema = EntitySchema {
    name: "GSLayer",
    kind: EntityKind::Layer,
    explicit_order: false,
    fields: &[
        f("anchors", T::EntityList(EntityKind::Anchor)),
        f("annotations", T::EntityList(EntityKind::Annotation)),
        f("associatedMasterId", T::String),
        f("background", T::Entity(EntityKind::BackgroundLayer)),
        f("backgroundImage", T::Dict),
        f("color", T::Color),
        f("components", T::EntityList(EntityKind::Component)),
        f("guideLines", T::EntityList(EntityKind::GuideLine)),
        f("hints", T::EntityList(EntityKind::Hint)),
        f("layerId", T::String),
        f("leftMetricsKey", T::String),
        f("name", T::String),
        f("paths", T::EntityList(EntityKind::Path)),
        f("rightMetricsKey", T::String),
        f("userData", T::Dict),
        f("vertWidth", T::Float).with_default(D::Float(0.0)),
        f("visible", T::Bool).with_default(D::Bool(false)),
        f("width", T::Float).with_default(D::Float(600.0)),
        f("widthMetricsKey", T::String),
    ],
};

pub static BACKGROUND_LAYER: EntitySchema = EntitySchema {
    name: "GSBackgroundLayer",
    kind: EntityKind::BackgroundLayer,
    explicit_order: false,
    fields: &[
        f("anchors", T::EntityList(EntityKind::Anchor)),
        f("annotations", T::EntityList(EntityKind::Annotation)),
        f("backgroundImage", T::Dict),
        f("components", T::EntityList(EntityKind::Component)),
        f("guideLines", T::EntityList(EntityKind::GuideLine)),
        f("hints", T::EntityList(EntityKind::Hint)),
        f("paths", T::EntityList(EntityKind::Path)),
        f("visible", T::Bool).with_default(D::Bool(false)),
    ],
};

pub static PATH: EntitySchema = EntitySchema {
    name: "GSPath",
    kind: EntityKind::Path,
    explicit_order: false,
    fields: &[
        f("closed", T::Bool).with_default(D::Bool(true)).always(),
        f("nodes", T::Nodes),
    ],
};

pub static COMPONENT: EntitySchema = EntitySchema {
    name: "GSComponent",
    kind: EntityKind::Component,
    explicit_order: false,
    fields: &[
        f("alignment", T::Integer).with_default(D::Integer(0)),
        f("anchor", T::String),
        f("locked", T::Bool).with_default(D::Bool(false)),
        f("name", T::String),
        f("piece", T::Dict),
        f("transform", T::Transform).with_default(D::Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])),
    ],
};

pub static ANCHOR: EntitySchema = EntitySchema {
    name: "GSAnchor",
    kind: EntityKind::Anchor,
    explicit_order: false,
    fields: &[f("name", T::String), f("position", T::Point)],
};

pub static GUIDE_LINE: EntitySchema = EntitySchema {
    name: "GSGuideLine",
    kind: EntityKind::GuideLine,
    explicit_order: false,
    fields: &[
        f("alignment", T::String),
        f("angle", T::Float).with_default(D::Float(0.0)),
        f("filter", T::String),
        f("locked", T::Bool).with_default(D::Bool(false)),
        f("name", T::String),
        f("position", T::Point),
        f("showMeasurement", T::Bool).with_default(D::Bool(false)),
    ],
};

pub static HINT: EntitySchema = EntitySchema {
    name: "GSHint",
    kind: EntityKind::Hint,
    explicit_order: false,
    fields: &[
        f("horizontal", T::Bool).with_default(D::Bool(false)),
        f("options", T::Integer).with_default(D::Integer(0)),
        f("origin", T::Point),
        f("other1", T::Point),
        f("other2", T::Point),
        f("place", T::Point),
        f("scale", T::Point),
        f("stem", T::Integer).with_default(D::Integer(0)),
        f("target", T::HintTarget),
        f("type", T::String),
    ],
};

pub static ANNOTATION: EntitySchema = EntitySchema {
    name: "GSAnnotation",
    kind: EntityKind::Annotation,
    explicit_order: false,
    fields: &[
        f("angle", T::Float).with_default(D::Float(0.0)),
        f("position", T::Point),
        f("text", T::String),
        f("type", T::String),
        f("width", T::Float).with_default(D::Float(0.0)),
    ],
};

pub static INSTANCE: EntitySchema = EntitySchema {
    name: "GSInstance",
    kind: EntityKind::Instance,
    explicit_order: true,
    fields: &[
        f("exports", T::Bool).with_default(D::Bool(true)),
        f("customParameters", T::CustomParameters),
        f("interpolationCustom", T::Float).with_default(D::Float(0.0)),
        f("interpolationCustom1", T::Float).with_default(D::Float(0.0)),
        f("interpolationCustom2", T::Float).with_default(D::Float(0.0)),
        f("interpolationWeight", T::Float).with_default(D::Float(100.0)),
        f("interpolationWidth", T::Float).with_default(D::Float(100.0)),
        f("instanceInterpolations", T::Dict),
        f("isBold", T::Bool).with_default(D::Bool(false)),
        f("isItalic", T::Bool).with_default(D::Bool(false)),
        f("linkStyle", T::String),
        f("manualInterpolation", T::Bool).with_default(D::Bool(false)),
        f("name", T::String),
        f("weightClass", T::String).with_default(D::Str("Regular")),
        f("widthClass", T::String).with_default(D::Str("Medium (normal)")),
    ],
};

/// Shared by features, classes and feature prefixes.
pub static FEATURE: EntitySchema = EntitySchema {
    name: "GSFeature",
    kind: EntityKind::Feature,
    explicit_order: false,
    fields: &[
        f("automatic", T::Bool).with_default(D::Bool(false)),
        f("code", T::Code),
        f("disabled", T::Bool).with_default(D::Bool(false)),
        f("name", T::String),
        f("notes", T::String),
    ],
};

pub static PART_PROPERTY: EntitySchema = EntitySchema {
    name: "GSPartProperty",
    kind: EntityKind::PartProperty,
    explicit_order: true,
    fields: &[
        f("name", T::String).always(),
        f("bottomName", T::String).always(),
        f("bottomValue", T::Integer).always(),
        f("topName", T::String).always(),
        f("topValue", T::Integer).always(),
    ],
};

/// Look up the schema for an entity kind.
pub fn schema_for(kind: EntityKind) -> &'static EntitySchema {
    match kind {
        EntityKind::Font => &FONT,
        EntityKind::FontMaster => &FONT_MASTER,
        EntityKind::Glyph => &GLYPH,
        EntityKind::Layer => &LAYER,
        EntityKind::BackgroundLayer => &BACKGROUND_LAYER,
        EntityKind::Path => &PATH,
        EntityKind::Component => &COMPONENT,
        EntityKind::Anchor => &ANCHOR,
        EntityKind::GuideLine => &GUIDE_LINE,
        EntityKind::Hint => &HINT,
        EntityKind::Annotation => &ANNOTATION,
        EntityKind::Instance => &INSTANCE,
        EntityKind::Feature => &FEATURE,
        EntityKind::PartProperty => &PART_PROPERTY,
    }
}

/// How the value of a custom parameter is decoded, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterClass {
    Integer,
    Float,
    Bool,
    IntList,
    Dict,
    /// Anything else: kept as text, or as a generic list/dictionary.
    Generic,
}

pub fn parameter_class(name: &str) -> ParameterClass {
    match name {
        "ascender"
        | "blueShift"
        | "capHeight"
        | "descender"
        | "hheaAscender"
        | "hheaDescender"
        | "hheaLineGap"
        | "macintoshFONDFamilyID"
        | "openTypeHeadLowestRecPPEM"
        | "openTypeHheaAscender"
        | "openTypeHheaCaretSlopeRise"
        | "openTypeHheaCaretSlopeRun"
        | "openTypeHheaDescender"
        | "openTypeHheaLineGap"
        | "openTypeOS2StrikeoutPosition"
        | "openTypeOS2StrikeoutSize"
        | "openTypeOS2SubscriptXOffset"
        | "openTypeOS2SubscriptXSize"
        | "openTypeOS2SubscriptYOffset"
        | "openTypeOS2SubscriptYSize"
        | "openTypeOS2SuperscriptXOffset"
        | "openTypeOS2SuperscriptXSize"
        | "openTypeOS2SuperscriptYOffset"
        | "openTypeOS2SuperscriptYSize"
        | "openTypeOS2TypoAscender"
        | "openTypeOS2TypoDescender"
        | "openTypeOS2TypoLineGap"
        | "openTypeOS2WeightClass"
        | "openTypeOS2WidthClass"
        | "openTypeOS2WinAscent"
        | "openTypeOS2WinDescent"
        | "openTypeVheaCaretOffset"
        | "openTypeVheaCaretSlopeRise"
        | "openTypeVheaCaretSlopeRun"
        | "openTypeVheaVertTypoAscender"
        | "openTypeVheaVertTypoDescender"
        | "openTypeVheaVertTypoLineGap"
        | "postscriptBlueFuzz"
        | "postscriptBlueShift"
        | "postscriptDefaultWidthX"
        | "postscriptSlantAngle"
        | "postscriptUnderlinePosition"
        | "postscriptUnderlineThickness"
        | "postscriptUniqueID"
        | "postscriptWindowsCharacterSet"
        | "shoulderHeight"
        | "smallCapHeight"
        | "typoAscender"
        | "typoDescender"
        | "typoLineGap"
        | "underlinePosition"
        | "underlineThickness"
        | "unitsPerEm"
        | "vheaVertAscender"
        | "vheaVertDescender"
        | "vheaVertLineGap"
        | "weightClass"
        | "widthClass"
        | "winAscent"
        | "winDescent"
        | "xHeight"
        | "year"
        | "Grid Spacing" => ParameterClass::Integer,
        "postscriptBlueScale" => ParameterClass::Float,
        "isFixedPitch"
        | "postscriptForceBold"
        | "postscriptIsFixedPitch"
        | "Don\u{2019}t use Production Names"
        | "DisableAllAutomaticBehaviour"
        | "Use Typo Metrics"
        | "Has WWS Names"
        | "Use Extension Kerning" => ParameterClass::Bool,
        "fsType"
        | "openTypeOS2CodePageRanges"
        | "openTypeOS2FamilyClass"
        | "openTypeOS2Panose"
        | "openTypeOS2Type"
        | "openTypeOS2UnicodeRanges"
        | "panose"
        | "unicodeRanges" => ParameterClass::IntList,
        "GASP Table" => ParameterClass::Dict,
        _ => ParameterClass::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EntityKind; 14] = [
        EntityKind::Font,
        EntityKind::FontMaster,
        EntityKind::Glyph,
        EntityKind::Layer,
        EntityKind::BackgroundLayer,
        EntityKind::Path,
        EntityKind::Component,
        EntityKind::Anchor,
        EntityKind::GuideLine,
        EntityKind::Hint,
        EntityKind::Annotation,
        EntityKind::Instance,
        EntityKind::Feature,
        EntityKind::PartProperty,
    ];

    #[test]
    fn unordered_schemas_are_sorted() {
        // Keeps the tables readable: the serializer sorts anyway.
        for kind in ALL {
            let schema = schema_for(kind);
            assert_eq!(schema.kind, kind);
            if !schema.explicit_order {
                let names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
                let mut sorted = names.clone();
                sorted.sort();
                assert_eq!(names, sorted, "{} is not sorted", schema.name);
            }
        }
    }

    #[test]
    fn field_names_are_unique() {
        for kind in ALL {
            let schema = schema_for(kind);
            for field in schema.fields {
                assert!(std::ptr::eq(schema.field(field.name).unwrap_or(field), field));
            }
        }
    }

    #[test]
    fn parameter_classes() {
        assert_eq!(parameter_class("typoAscender"), ParameterClass::Integer);
        assert_eq!(parameter_class("Grid Spacing"), ParameterClass::Integer);
        assert_eq!(parameter_class("postscriptBlueScale"), ParameterClass::Float);
        assert_eq!(parameter_class("Don\u{2019}t use Production Names"), ParameterClass::Bool);
        assert_eq!(parameter_class("Don't use Production Names"), ParameterClass::Generic);
        assert_eq!(parameter_class("fsType"), ParameterClass::IntList);
        assert_eq!(parameter_class("GASP Table"), ParameterClass::Dict);
        assert_eq!(parameter_class("Master Name"), ParameterClass::Generic);
    }
}
