use glyphsfile::{
    load, save, Affine, Color, Font, GlyphsError, HintTarget, NodeType, ParameterOwner,
    ParameterValue, Plist, Point,
};
use pretty_assertions::assert_eq;
use similar::TextDiff;
use std::fs;

fn assert_same_text(expected: &str, actual: &str) {
    let diff = TextDiff::from_lines(expected, actual);
    if diff.ratio() < 1.0 {
        panic!(
            "Round trip produced different output:\n{}",
            diff.unified_diff().header("expected", "actual")
        );
    }
    assert_eq!(expected, actual);
}

#[test]
fn test_canonical_roundtrip() -> Result<(), GlyphsError> {
    let text = fs::read_to_string("resources/TestSans.glyphs").unwrap();
    let font = load(&text)?;
    assert_same_text(&text, &save(&font));
    Ok(())
}

#[test]
fn test_load_test_sans() -> Result<(), GlyphsError> {
    let font = Font::load_str(&fs::read_to_string("resources/TestSans.glyphs").unwrap())?;

    assert_eq!(font.family_name, "Test Sans");
    assert_eq!(font.units_per_em, 1000);
    assert_eq!((font.version_major, font.version_minor()), (1, 3));
    assert_eq!(font.display_strings, vec!["AV", "Hello World"]);
    assert_eq!(
        font.date.map(|d| d.to_rfc3339()),
        Some("2017-01-12T10:00:00+00:00".to_string())
    );

    assert_eq!(font.masters.len(), 2);
    let regular = font.master("m01").unwrap();
    assert_eq!(regular.name(), "Regular");
    assert_eq!(regular.ascender, 750.0);
    assert_eq!(regular.x_height, 500.0);
    assert_eq!(regular.vertical_stems, vec![90, 92]);
    assert_eq!(regular.alignment_zones[2].position, -250.0);
    assert_eq!(regular.guide_lines[0].angle, 90.0);
    assert_eq!(
        regular.custom_parameters.value("typoAscender"),
        Some(&ParameterValue::Integer(750))
    );
    assert_eq!(
        regular.custom_parameters.owner(),
        &ParameterOwner::Master("m01".into())
    );
    assert_eq!(font.master("m02").unwrap().name(), "Bold Italic");

    let a = font.glyph("A").unwrap();
    assert_eq!(a.codepoint(), Some(0x41));
    assert_eq!(a.layers.len(), 3);
    let master_layer = a.get_layer("m01").unwrap();
    assert!(master_layer.is_master_layer());
    assert_eq!(master_layer.width, 600.0);
    assert_eq!(font.layer_name(master_layer).as_deref(), Some("Regular"));
    let backup = a.layers.get_by_index(2).unwrap();
    assert!(!backup.is_master_layer());
    assert_eq!(font.master_for_layer(backup).map(|m| m.id.as_str()), Some("m01"));
    assert_eq!(font.layer_name(backup).as_deref(), Some("Jan 12 17, 10:00"));
    let open = &backup.paths[0];
    assert!(!open.closed);
    assert_eq!(open.nodes[1].nodetype, NodeType::OffCurve);
    assert_eq!(open.nodes[1].x, 120.5);
    assert!(open.nodes[3].smooth);

    let aacute = font.glyph("Aacute").unwrap();
    let component = &aacute.layers.get("m01").unwrap().components[1];
    assert_eq!(component.name, "acutecomb");
    assert_eq!(component.transform, Affine::translate((152.0, 0.0)));

    let acutecomb = font.glyph("acutecomb").unwrap();
    assert!(!acutecomb.export);
    assert_eq!(acutecomb.sub_category.as_deref(), Some("Nonspacing"));
    let anchor = acutecomb.get_layer("m02").unwrap().get_anchor("_top").unwrap();
    assert_eq!(anchor.position, Point::new(150.0, 700.0));

    assert_eq!(font.kerning.get("m01", "@MMK_L_A", "V"), Some(-40.0));
    assert_eq!(font.instances[1].name, "Bold");
    assert!(!font.instances[1].exports);
    assert!(font.features[0].automatic);
    assert_eq!(font.features[0].code, "sub A by Aacute;\nsub space by space;");
    Ok(())
}

#[test]
fn test_handwritten_reload_is_stable() -> Result<(), GlyphsError> {
    let text = fs::read_to_string("resources/Handwritten.glyphs").unwrap();
    let first = load(&text)?;
    let saved = save(&first);
    let second = load(&saved)?;
    assert_eq!(first, second);
    // Saving again changes nothing.
    assert_same_text(&saved, &save(&second));
    Ok(())
}

#[test]
fn test_load_handwritten() -> Result<(), GlyphsError> {
    let font = load(&fs::read_to_string("resources/Handwritten.glyphs").unwrap())?;

    assert_eq!(font.grid_length, 0);
    assert_eq!(font.units_per_em, 2048);
    // The offset is not kept; the instant is.
    assert_eq!(
        font.date.map(|d| d.naive_utc().to_string()),
        Some("2016-11-02 17:30:00".to_string())
    );
    assert!(font.other.contains_key("someFutureKey"));
    assert!(save(&font).contains("threshold = 0.50;"));

    let master = font.master("MASTER-1").unwrap();
    assert_eq!(master.name(), "Book");
    assert_eq!(master.x_height, 1024.0);
    assert_eq!(
        master.custom_parameters.value("ascender"),
        Some(&ParameterValue::Integer(1500))
    );
    assert_eq!(
        master.custom_parameters.value("postscriptBlueScale"),
        Some(&ParameterValue::Float(0.0396))
    );

    let f = font.glyph("f").unwrap();
    assert_eq!(f.note.as_deref(), Some("Has a \"quoted\" note\nover two lines"));
    assert_eq!(f.color, Some(Color::Components(vec![255, 0, 0, 1])));
    let master_layer = f.get_layer("MASTER-1").unwrap();
    assert!(master_layer.is_master_layer());
    assert_eq!(master_layer.width, 1100.25);
    assert_eq!(master_layer.hints.len(), 2);
    assert!(master_layer.hints[0].horizontal);
    assert_eq!(
        master_layer.hints[1].target,
        Some(HintTarget::Direction("up".into()))
    );
    assert_eq!(master_layer.paths[0].nodes[2].nodetype, NodeType::Line);
    assert!(master_layer.paths[0].nodes[2].smooth);
    let background = master_layer.background.as_ref().unwrap();
    assert!(!background.paths[0].closed);
    assert_eq!(master_layer.annotations[0].angle, 45.0);

    // A layer without an id gets one, and keeps its unknown keys.
    let brace = f.layers.get_by_index(1).unwrap();
    assert_eq!(brace.layer_id.len(), 36);
    assert_eq!(brace.name.as_deref(), Some("{ 600 }"));
    assert_eq!(brace.associated_master_id, None);
    assert!(brace.other.contains_key("mysteryLayerKey"));
    assert_eq!(brace.parent(), Some("f"));

    let ff = font.glyph("f_f").unwrap();
    assert_eq!(ff.color, Some(Color::Index(4)));
    assert_eq!(ff.parts_settings[0].top_value, 100);
    let components = &ff.get_layer("MASTER-1").unwrap().components;
    assert_eq!(components[0].alignment, -1);
    assert_eq!(components[1].transform.as_coeffs()[4], 600.5);
    assert!(components[1].piece.contains_key("Width"));

    assert_eq!(font.kerning.get("MASTER-1", "f", "f"), Some(-20.0));
    assert_eq!(font.kerning.get("MASTER-1", "f", "parenright"), Some(35.0));

    assert_eq!(font.features[0].code, "sub f f by f_f;\n# \"quoted\"");

    let parameters = &font.custom_parameters;
    assert_eq!(parameters.owner(), &ParameterOwner::Font);
    match parameters.value("GASP Table") {
        Some(ParameterValue::Dict(gasp)) => {
            assert_eq!(gasp.get("65535").and_then(|v| v.as_i64()), Some(15));
        }
        other => panic!("GASP Table decoded as {other:?}"),
    }
    match parameters.value("Some Unknown Parameter") {
        Some(ParameterValue::List(items)) => assert_eq!(items.len(), 3),
        other => panic!("Unknown parameter decoded as {other:?}"),
    }
    assert_eq!(
        parameters.value("Another One"),
        Some(&ParameterValue::String("42".into()))
    );
    assert_eq!(
        parameters.value("panose"),
        Some(&ParameterValue::IntList(vec![2, 11, 5, 2, 4, 5, 4, 2, 2, 4]))
    );

    let instance = &font.instances[0];
    assert_eq!(instance.interpolation_weight, 60.5);
    assert_eq!(
        instance.custom_parameters.value("weightClass"),
        Some(&ParameterValue::Integer(350))
    );
    assert_eq!(
        instance.custom_parameters.owner(),
        &ParameterOwner::Instance("Book".into())
    );
    Ok(())
}

#[test]
fn test_three_node_path() -> Result<(), GlyphsError> {
    let source = concat!(
        "{\n",
        "familyName = Minimal;\n",
        "fontMaster = (\n{\nid = m01;\n}\n);\n",
        "glyphs = (\n{\nglyphname = A;\nlayers = (\n{\nlayerId = m01;\n",
        "paths = (\n{\nclosed = 1;\nnodes = (\n",
        "\"0 0 LINE\",\n\"300 700 LINE\",\n\"600 0 LINE\"\n",
        ");\n}\n);\n",
        "width = 600;\n",
        "}\n);\n}\n);\n",
        "unitsPerEm = 1000;\n",
        "versionMajor = 1;\n",
        "versionMinor = 0;\n",
        "}\n"
    );
    let saved = save(&load(source)?);
    assert_eq!(saved, source.replace("width = 600;\n", ""));
    assert!(saved.contains("closed = 1;"));
    Ok(())
}

#[test]
fn test_number_like_strings_reload() -> Result<(), GlyphsError> {
    let first = load(concat!(
        "{ familyName = \"1.2.3\"; ",
        "userData = { a = \"0.5\"; b = 0.5; }; ",
        "someFutureKey = (\"0.25\", 1.2.3); }"
    ))?;
    let saved = save(&first);
    assert!(saved.contains("familyName = 1.2.3;"));
    assert!(saved.contains("a = \"0.5\";"));
    let second = load(&saved)?;
    assert_eq!(second.family_name, "1.2.3");
    assert_eq!(second.user_data.get("a"), Some(&Plist::from("0.5")));
    assert_eq!(second.user_data.get("b"), Some(&Plist::from(0.5)));
    assert_eq!(first, second);
    assert_same_text(&saved, &save(&second));
    Ok(())
}

#[test]
fn test_untyped_floats_keep_their_digits() -> Result<(), GlyphsError> {
    let first = load(concat!(
        "{ userData = { k = 0.123456; }; ",
        "customParameters = ({ name = Foo; value = (0.123456); }); }"
    ))?;
    let saved = save(&first);
    assert!(saved.contains("k = 0.123456;"));
    assert!(saved.contains("value = (\n0.123456\n);"));
    assert_eq!(first, load(&saved)?);
    Ok(())
}

#[test]
fn test_master_metrics_are_kept() -> Result<(), GlyphsError> {
    let font = load("{ fontMaster = ({ ascender = 800; id = m; xHeight = 500; }); }")?;
    let saved = save(&font);
    assert!(saved.contains("ascender = 800;\nid = m;\nxHeight = 500;\n"));

    let font = load("{ fontMaster = ({ id = m; }); }")?;
    let master = font.master("m").unwrap();
    assert_eq!((master.ascender, master.cap_height), (0.0, 0.0));
    assert_eq!((master.descender, master.x_height), (0.0, 0.0));
    Ok(())
}

#[test]
fn test_exponents() -> Result<(), GlyphsError> {
    let font = load(concat!(
        "{ fontMaster = ({ id = m; italicAngle = 1.5e1; }); ",
        "glyphs = ({ glyphname = Adotbelow; unicode = 1E00; }); ",
        "userData = { big = 1e5; }; }"
    ))?;
    assert_eq!(font.master("m").unwrap().italic_angle, 15.0);
    let glyph = font.glyph("Adotbelow").unwrap();
    assert_eq!(glyph.unicode.as_deref(), Some("1E00"));
    assert_eq!(glyph.codepoint(), Some(0x1E00));
    assert_eq!(font.user_data.get("big"), Some(&Plist::from("1e5")));
    assert!(save(&font).contains("big = 1e5;"));
    Ok(())
}

#[test]
fn test_instance_exports() -> Result<(), GlyphsError> {
    let mut font = load("{ instances = ({ name = Light; }); }")?;
    assert!(font.instances[0].exports);
    assert!(!save(&font).contains("exports"));
    font.instances[0].exports = false;
    assert!(save(&font).contains("exports = 0;"));
    Ok(())
}

#[test]
fn test_kerning_string_value() -> Result<(), GlyphsError> {
    let font = load("{ kerning = { m01 = { A = { V = \"-20\"; }; }; }; }")?;
    assert_eq!(font.kerning.get("m01", "A", "V"), Some(-20.0));
    Ok(())
}

#[test]
fn test_parameter_typing() -> Result<(), GlyphsError> {
    let font = load(concat!(
        "{ customParameters = (",
        "{ name = ascender; value = 750; },",
        "{ name = isFixedPitch; value = 1; },",
        "{ name = \"Some Name\"; value = (1, 2, 3); }",
        "); }"
    ))?;
    let parameters = &font.custom_parameters;
    assert_eq!(parameters.value("ascender"), Some(&ParameterValue::Integer(750)));
    assert_eq!(parameters.value("isFixedPitch"), Some(&ParameterValue::Bool(true)));
    assert_eq!(
        parameters.value("Some Name"),
        Some(&ParameterValue::List(vec![
            Plist::Integer(1),
            Plist::Integer(2),
            Plist::Integer(3)
        ]))
    );
    Ok(())
}

#[test]
fn test_errors_abort_the_load() {
    assert!(matches!(
        load("{ familyName = Test; glyphs = ({ glyphname = A; }"),
        Err(GlyphsError::Syntax(_))
    ));
    assert!(matches!(
        load("{ glyphs = ({ layers = ({ width = (1); }); }); }"),
        Err(GlyphsError::TypeMismatch { entity: "GSLayer", .. })
    ));
    assert!(matches!(
        load("{ customParameters = ({ name = ascender; value = tall; }); }"),
        Err(GlyphsError::InvalidLiteral { codec: "integer", .. })
    ));
    assert!(matches!(
        load("{ versionMinor = 1000; }"),
        Err(GlyphsError::VersionOutOfRange(1000))
    ));
}

#[test]
fn test_json_dump() -> Result<(), GlyphsError> {
    let font = load(&fs::read_to_string("resources/TestSans.glyphs").unwrap())?;
    let json = serde_json::to_value(&font).unwrap();
    assert_eq!(json["family_name"], "Test Sans");
    assert_eq!(json["masters"][1]["weight"], "Bold");
    assert_eq!(json["glyphs"][0]["name"], "A");
    Ok(())
}
