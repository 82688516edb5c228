use crate::{
    codecs::{
        bool_from_plist, float_from_plist, int_from_plist, read_int_list, text_from_plist,
        unescape_feature_code, AlignmentZone, Codec, Color, HintTarget,
    },
    common::{Affine, Node, Point},
    custom_parameter::CustomParameters,
    kerning::Kerning,
    record::{Record, Value},
    schema::{EntitySchema, FieldSpec, FieldType},
    GlyphsError,
};
use chrono::{DateTime, FixedOffset};
use openstep_plist::{Dictionary, Plist};

fn type_mismatch(
    schema: &EntitySchema,
    field: &str,
    expected: &'static str,
    found: &Plist,
) -> GlyphsError {
    GlyphsError::TypeMismatch {
        entity: schema.name,
        field: field.to_string(),
        expected,
        found: found.kind().to_string(),
    }
}

/// Build an entity from its dictionary.
pub(crate) fn build<R: Record + Default>(plist: &Plist) -> Result<R, GlyphsError> {
    let mut record = R::default();
    let dict = plist
        .as_dict()
        .ok_or_else(|| type_mismatch(record.schema(), "<root>", "dictionary", plist))?;
    populate(&mut record, dict)?;
    Ok(record)
}

pub(crate) fn build_list<R: Record + Default>(items: &[Plist]) -> Result<Vec<R>, GlyphsError> {
    items.iter().map(build).collect()
}

/// Fill a record from a dictionary, key by key.
pub(crate) fn populate(record: &mut dyn Record, dict: &Dictionary) -> Result<(), GlyphsError> {
    let schema = record.schema();
    for (key, value) in dict {
        let Some(spec) = schema.field(key) else {
            log::debug!("Keeping unknown key {}.{}", schema.name, key);
            record.extras_mut().insert(key.clone(), value.clone());
            continue;
        };
        match spec.ty {
            FieldType::Entity(_) => {
                if value.as_dict().is_none() {
                    return Err(type_mismatch(schema, key, "dictionary", value));
                }
                record.set_children(spec.name, std::slice::from_ref(value))?;
            }
            FieldType::EntityList(_) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| type_mismatch(schema, key, spec.ty.describe(), value))?;
                if let Some(bad) = items.iter().find(|item| item.as_dict().is_none()) {
                    return Err(type_mismatch(schema, key, "dictionary", bad));
                }
                record.set_children(spec.name, items)?;
            }
            _ => {
                let decoded = decode_value(schema, spec, value)?;
                record.set(spec.name, decoded)?;
            }
        }
    }
    record.finish()
}

fn decode_value(
    schema: &EntitySchema,
    spec: &FieldSpec,
    value: &Plist,
) -> Result<Value, GlyphsError> {
    let mismatch = || type_mismatch(schema, spec.name, spec.ty.describe(), value);
    let text = || text_from_plist(value).ok_or_else(mismatch);
    let array = || value.as_array().ok_or_else(mismatch);
    let literal = || value.as_str().ok_or_else(mismatch);
    let scalar = || match value {
        Plist::Dictionary(_) | Plist::Array(_) => Err(mismatch()),
        _ => Ok(value),
    };
    Ok(match spec.ty {
        FieldType::String | FieldType::Unicode => Value::String(text()?),
        FieldType::Code => Value::String(unescape_feature_code(&text()?)),
        FieldType::Integer => Value::Integer(int_from_plist(scalar()?)?),
        FieldType::Float => Value::Float(float_from_plist(scalar()?)?),
        FieldType::Bool => Value::Bool(bool_from_plist(scalar()?)?),
        FieldType::Point => Value::Point(Point::decode(literal()?)?),
        FieldType::Transform => Value::Transform(Affine::decode(literal()?)?),
        FieldType::Timestamp => Value::Timestamp(DateTime::<FixedOffset>::decode(literal()?)?),
        FieldType::HintTarget => Value::HintTarget(HintTarget::decode(&text()?)?),
        FieldType::Color => match value {
            Plist::Dictionary(_) => return Err(mismatch()),
            _ => Value::Color(Color::from_plist(value)?),
        },
        FieldType::IntList => Value::IntList(read_int_list(array()?)?),
        FieldType::StringList => Value::StringList(
            array()?
                .iter()
                .map(|item| {
                    text_from_plist(item)
                        .ok_or_else(|| type_mismatch(schema, spec.name, "string", item))
                })
                .collect::<Result<_, _>>()?,
        ),
        FieldType::Dict => Value::Dict(value.as_dict().ok_or_else(mismatch)?.clone()),
        FieldType::Nodes => Value::Nodes(decode_literals::<Node>(schema, spec, array()?)?),
        FieldType::AlignmentZones => {
            Value::Zones(decode_literals::<AlignmentZone>(schema, spec, array()?)?)
        }
        FieldType::Kerning => Value::Kerning(Kerning::from_plist(value)?),
        FieldType::CustomParameters => Value::Parameters(CustomParameters::from_plist(array()?)?),
        FieldType::Entity(_) | FieldType::EntityList(_) => return Err(mismatch()),
    })
}

fn decode_literals<C: Codec>(
    schema: &EntitySchema,
    spec: &FieldSpec,
    items: &[Plist],
) -> Result<Vec<C>, GlyphsError> {
    items
        .iter()
        .map(|item| {
            let text = item
                .as_str()
                .ok_or_else(|| type_mismatch(schema, spec.name, "string", item))?;
            C::decode(text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{Anchor, Font, Path};

    #[test]
    fn unknown_keys_are_kept_in_order() {
        let plist =
            Plist::parse("{ zeta = 1; name = top; alpha = (a, b); position = \"{1, 2}\"; }")
                .unwrap();
        let anchor: Anchor = build(&plist).unwrap();
        assert_eq!(anchor.name, "top");
        assert_eq!(anchor.position, Point::new(1.0, 2.0));
        assert_eq!(anchor.other.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn type_mismatch_names_the_field() {
        let plist = Plist::parse("{ closed = (1); }").unwrap();
        let err = build::<Path>(&plist).unwrap_err();
        assert!(matches!(
            err,
            GlyphsError::TypeMismatch { entity: "GSPath", ref field, ref found, .. }
                if field == "closed" && found == "array"
        ));
    }

    #[test]
    fn bad_literal_fails_the_build() {
        let plist = Plist::parse("{ nodes = (\"1 2 LINE\", \"1 2 WIBBLE\"); }").unwrap();
        assert!(matches!(
            build::<Path>(&plist),
            Err(GlyphsError::InvalidLiteral { codec: "node", .. })
        ));
    }

    #[test]
    fn root_must_be_a_dictionary() {
        let plist = Plist::parse("(1, 2)").unwrap();
        assert!(matches!(
            build::<Font>(&plist),
            Err(GlyphsError::TypeMismatch { entity: "GSFont", expected: "dictionary", .. })
        ));
    }
}
