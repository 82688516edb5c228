//! Writes the entity graph back out in the canonical layout Glyphs uses:
//! one key per line, no indentation, keys sorted unless the entity declares
//! its own order, and fields holding their default value left out.
use crate::{
    codecs::{encode_plist_string, encode_string, encode_unicode, float_to_string, Codec},
    common::Dictionary,
    custom_parameter::{CustomParameter, ParameterValue},
    font::Font,
    kerning::Kerning,
    record::{Record, ValueRef},
    schema::{DefaultValue, FieldSpec, FieldType},
};
use openstep_plist::Plist;

/// Precision used for floats outside the point-like literals.
const FLOAT_PRECISION: usize = 5;

/// Serialize a font to the text of a `.glyphs` file.
pub fn serialize(font: &Font) -> String {
    log::debug!(
        "Writing {} with {} masters and {} glyphs",
        font.family_name,
        font.masters.len(),
        font.glyphs.len()
    );
    let mut out = String::new();
    write_record(&mut out, font);
    out.push('\n');
    out
}

enum Entry<'a> {
    Field(&'static FieldSpec, ValueRef<'a>),
    Extra(&'a Plist),
}

fn write_record(out: &mut String, record: &dyn Record) {
    let schema = record.schema();
    let mut entries: Vec<(&str, Entry)> = vec![];
    for spec in schema.fields {
        let Some(value) = record.get(spec.name) else {
            continue;
        };
        if should_write(spec, &value) {
            entries.push((spec.name, Entry::Field(spec, value)));
        }
    }
    entries.extend(
        record
            .extras()
            .iter()
            .map(|(key, value)| (key.as_str(), Entry::Extra(value))),
    );
    if !schema.explicit_order {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    out.push_str("{\n");
    for (key, entry) in entries {
        write_key(out, key);
        match entry {
            Entry::Field(spec, value) => write_value(out, spec.ty, &value),
            Entry::Extra(plist) => write_plist(out, plist),
        }
        out.push_str(";\n");
    }
    out.push('}');
}

fn should_write(spec: &FieldSpec, value: &ValueRef) -> bool {
    if spec.always_emit {
        return true;
    }
    match &spec.default {
        Some(default) => !is_default(default, value),
        None => !value.is_vacant(),
    }
}

/// Whether a field currently holds its declared default.
pub(crate) fn is_default(default: &DefaultValue, value: &ValueRef) -> bool {
    match (default, value) {
        (DefaultValue::Integer(d), ValueRef::Integer(v)) => d == v,
        (DefaultValue::Float(d), ValueRef::Float(v)) => d == v,
        (DefaultValue::Bool(d), ValueRef::Bool(v)) => d == v,
        (DefaultValue::Str(d), ValueRef::Str(v)) => d == v,
        (DefaultValue::Transform(d), ValueRef::Transform(v)) => v.as_coeffs() == *d,
        _ => false,
    }
}

fn write_key(out: &mut String, key: &str) {
    out.push_str(&encode_string(key));
    out.push_str(" = ");
}

fn write_value(out: &mut String, ty: FieldType, value: &ValueRef) {
    match value {
        ValueRef::Str(s) if ty == FieldType::Unicode => out.push_str(&encode_unicode(s)),
        ValueRef::Str(s) => out.push_str(&encode_string(s)),
        ValueRef::Integer(i) => out.push_str(&i.to_string()),
        ValueRef::Float(f) => out.push_str(&float_to_string(*f, FLOAT_PRECISION)),
        ValueRef::Bool(b) => out.push_str(if *b { "1" } else { "0" }),
        ValueRef::Point(p) => out.push_str(&p.encode()),
        ValueRef::Transform(t) => out.push_str(&t.encode()),
        ValueRef::Timestamp(t) => out.push_str(&t.encode()),
        ValueRef::Color(c) => out.push_str(&c.encode()),
        ValueRef::HintTarget(t) => out.push_str(&t.encode()),
        ValueRef::IntList(items) => write_list(out, items.iter(), |out, i| {
            out.push_str(&i.to_string())
        }),
        ValueRef::StringList(items) => write_list(out, items.iter(), |out, s| {
            out.push_str(&encode_string(s))
        }),
        ValueRef::Dict(dict) => write_dict(out, dict),
        ValueRef::Nodes(nodes) => {
            write_list(out, nodes.iter(), |out, n| out.push_str(&n.encode()))
        }
        ValueRef::Zones(zones) => {
            write_list(out, zones.iter(), |out, z| out.push_str(&z.encode()))
        }
        ValueRef::Kerning(kerning) => write_kerning(out, kerning),
        ValueRef::Parameters(parameters) => write_list(out, parameters.iter(), write_parameter),
        ValueRef::Record(record) => write_record(out, *record),
        ValueRef::Records(records) => {
            write_list(out, records.iter(), |out, r| write_record(out, *r))
        }
    }
}

/// `(\na,\nb\n)`; an empty list is `(\n)`.
fn write_list<T>(
    out: &mut String,
    items: impl IntoIterator<Item = T>,
    mut write_item: impl FnMut(&mut String, T),
) {
    out.push_str("(\n");
    let mut empty = true;
    for item in items {
        if !empty {
            out.push_str(",\n");
        }
        write_item(out, item);
        empty = false;
    }
    if !empty {
        out.push('\n');
    }
    out.push(')');
}

/// A dictionary in the order it was read.
fn write_dict(out: &mut String, dict: &Dictionary) {
    out.push_str("{\n");
    for (key, value) in dict {
        write_key(out, key);
        write_plist(out, value);
        out.push_str(";\n");
    }
    out.push('}');
}

/// Untyped values keep their kind: strings that would read back as numbers
/// are quoted, and floats keep every digit.
fn write_plist(out: &mut String, plist: &Plist) {
    match plist {
        Plist::String(s) => out.push_str(&encode_plist_string(s)),
        Plist::Integer(i) => out.push_str(&i.to_string()),
        Plist::Float(f) => out.push_str(&f.to_string()),
        Plist::Array(items) => write_list(out, items.iter(), write_plist),
        Plist::Dictionary(dict) => write_dict(out, dict),
    }
}

fn write_kerning(out: &mut String, kerning: &Kerning) {
    out.push_str("{\n");
    for (master_id, lefts) in kerning.tables() {
        write_key(out, master_id);
        out.push_str("{\n");
        for (left, rights) in lefts {
            write_key(out, left);
            out.push_str("{\n");
            for (right, value) in rights {
                write_key(out, right);
                out.push_str(&float_to_string(*value, FLOAT_PRECISION));
                out.push_str(";\n");
            }
            out.push_str("};\n");
        }
        out.push_str("};\n");
    }
    out.push('}');
}

fn write_parameter(out: &mut String, parameter: &CustomParameter) {
    out.push_str("{\n");
    write_key(out, "name");
    out.push_str(&encode_string(&parameter.name));
    out.push_str(";\n");
    write_key(out, "value");
    match &parameter.value {
        ParameterValue::Integer(i) => out.push_str(&i.to_string()),
        ParameterValue::Float(f) => out.push_str(&float_to_string(*f, FLOAT_PRECISION)),
        ParameterValue::Bool(b) => out.push_str(if *b { "1" } else { "0" }),
        ParameterValue::IntList(items) => write_list(out, items.iter(), |out, i| {
            out.push_str(&i.to_string())
        }),
        ParameterValue::Dict(dict) => write_sorted_dict(out, dict),
        ParameterValue::List(items) => write_list(out, items.iter(), write_plist),
        ParameterValue::String(s) => out.push_str(&encode_string(s)),
    }
    out.push_str(";\n");
    for (key, value) in &parameter.other {
        write_key(out, key);
        write_plist(out, value);
        out.push_str(";\n");
    }
    out.push('}');
}

/// Parameter dictionaries are written with their keys sorted.
fn write_sorted_dict(out: &mut String, dict: &Dictionary) {
    let mut keys: Vec<&String> = dict.keys().collect();
    keys.sort();
    out.push_str("{\n");
    for key in keys {
        write_key(out, key);
        if let Some(value) = dict.get(key) {
            write_plist(out, value);
        }
        out.push_str(";\n");
    }
    out.push('}');
}
