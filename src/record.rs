use crate::{
    codecs::{AlignmentZone, Color, HintTarget},
    common::{Affine, Dictionary, Node, Point},
    custom_parameter::CustomParameters,
    kerning::Kerning,
    schema::EntitySchema,
    GlyphsError,
};
use chrono::{DateTime, FixedOffset};
use openstep_plist::Plist;

/// A decoded scalar value on its way into an entity.
#[derive(Debug, Clone)]
pub(crate) enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Point(Point),
    Transform(Affine),
    Timestamp(DateTime<FixedOffset>),
    Color(Color),
    IntList(Vec<i64>),
    StringList(Vec<String>),
    Dict(Dictionary),
    Nodes(Vec<Node>),
    Zones(Vec<AlignmentZone>),
    HintTarget(HintTarget),
    Kerning(Kerning),
    Parameters(CustomParameters),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Point(_) => "point",
            Value::Transform(_) => "transform",
            Value::Timestamp(_) => "timestamp",
            Value::Color(_) => "color",
            Value::IntList(_) => "integer list",
            Value::StringList(_) => "string list",
            Value::Dict(_) => "dictionary",
            Value::Nodes(_) => "node list",
            Value::Zones(_) => "alignment zones",
            Value::HintTarget(_) => "hint target",
            Value::Kerning(_) => "kerning",
            Value::Parameters(_) => "custom parameters",
        }
    }
}

/// A borrowed view of a field, as the serializer sees it.
pub(crate) enum ValueRef<'a> {
    Str(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Point(Point),
    Transform(Affine),
    Timestamp(&'a DateTime<FixedOffset>),
    Color(&'a Color),
    IntList(&'a [i64]),
    StringList(&'a [String]),
    Dict(&'a Dictionary),
    Nodes(&'a [Node]),
    Zones(&'a [AlignmentZone]),
    HintTarget(&'a HintTarget),
    Kerning(&'a Kerning),
    Parameters(&'a CustomParameters),
    Record(&'a dyn Record),
    Records(Vec<&'a dyn Record>),
}

impl ValueRef<'_> {
    /// Zero, false, or an empty collection.
    pub(crate) fn is_vacant(&self) -> bool {
        match self {
            ValueRef::Integer(i) => *i == 0,
            ValueRef::Float(f) => *f == 0.0,
            ValueRef::Bool(b) => !b,
            ValueRef::IntList(v) => v.is_empty(),
            ValueRef::StringList(v) => v.is_empty(),
            ValueRef::Dict(d) => d.is_empty(),
            ValueRef::Nodes(n) => n.is_empty(),
            ValueRef::Zones(z) => z.is_empty(),
            ValueRef::Kerning(k) => k.is_empty(),
            ValueRef::Parameters(p) => p.is_empty(),
            ValueRef::Records(r) => r.is_empty(),
            ValueRef::Str(_)
            | ValueRef::Point(_)
            | ValueRef::Transform(_)
            | ValueRef::Timestamp(_)
            | ValueRef::Color(_)
            | ValueRef::HintTarget(_)
            | ValueRef::Record(_) => false,
        }
    }
}

/// Borrow a list of entities as records.
pub(crate) fn records<T: Record>(items: &[T]) -> ValueRef<'_> {
    ValueRef::Records(items.iter().map(|item| item as &dyn Record).collect())
}

/// Typed access to the fields of an entity, keyed by their names in the
/// document.
pub(crate) trait Record {
    fn schema(&self) -> &'static EntitySchema;

    /// The current value of a field, or `None` if it is unset.
    fn get(&self, field: &str) -> Option<ValueRef<'_>>;

    fn set(&mut self, field: &str, value: Value) -> Result<(), GlyphsError>;

    /// Build nested entities from their dictionaries.
    fn set_children(&mut self, field: &str, items: &[Plist]) -> Result<(), GlyphsError> {
        let _ = items;
        Err(unexpected_children(self.schema(), field))
    }

    /// Keys this entity does not understand, kept as they were read.
    fn extras(&self) -> &Dictionary;
    fn extras_mut(&mut self) -> &mut Dictionary;

    /// Called once all keys have been read.
    fn finish(&mut self) -> Result<(), GlyphsError> {
        Ok(())
    }
}

pub(crate) fn unexpected_children(schema: &EntitySchema, field: &str) -> GlyphsError {
    GlyphsError::TypeMismatch {
        entity: schema.name,
        field: field.to_string(),
        expected: "scalar value",
        found: "nested entity".to_string(),
    }
}

pub(crate) fn mismatch(schema: &EntitySchema, field: &str, value: &Value) -> GlyphsError {
    GlyphsError::TypeMismatch {
        entity: schema.name,
        field: field.to_string(),
        expected: schema
            .field(field)
            .map_or("known field", |spec| spec.ty.describe()),
        found: value.kind().to_string(),
    }
}

/// The `extras` accessors for an entity keeping unknown keys in `other`.
macro_rules! extras {
    () => {
        fn extras(&self) -> &$crate::common::Dictionary {
            &self.other
        }
        fn extras_mut(&mut self) -> &mut $crate::common::Dictionary {
            &mut self.other
        }
    };
}
pub(crate) use extras;
