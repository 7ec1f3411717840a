//! Reading tests: well-formed files, tolerated defects and fatal errors.

mod common;

use ac3drust::io::ac::{parse, parse_many, AcReader};
use ac3drust::notification::NotificationType;
use ac3drust::scene::DEFAULT_MATERIAL_NAME;
use ac3drust::{AcError, Directive, FormatVersion, NodeKind, SurfaceType, Vector2, Vector3};
use common::{
    read_str, read_str_dropping_unknown, test_output_path, write_str, CUBE_SAMPLE, RICH_SAMPLE,
};

#[test]
fn test_cube_sample() {
    let scene = read_str(CUBE_SAMPLE);

    assert_eq!(scene.version, FormatVersion::bare());
    assert_eq!(scene.materials.len(), 1);
    assert_eq!(scene.materials[0].name, "DefaultWhite");
    assert!(scene.root.is_world());
    assert_eq!(scene.root.children.len(), 1);

    let cube = &scene.root.children[0];
    assert_eq!(cube.name.as_deref(), Some("cube"));
    let poly = cube.polygon_data().expect("cube is a poly object");
    assert_eq!(poly.vertices.len(), 3);
    assert_eq!(poly.surfaces.len(), 1);

    let surface = &poly.surfaces[0];
    assert_eq!(surface.surface_type(), Some(SurfaceType::Polygon));
    assert_eq!(surface.material, 0);
    assert_eq!(surface.refs.len(), 3);
    assert_eq!(surface.refs[1].uv, Vector2::new(1.0, 0.0));

    assert!(!scene.repaired);
    assert!(scene.notifications.is_empty());
}

#[test]
fn test_rich_sample() {
    let scene = read_str(RICH_SAMPLE);
    assert_eq!(scene.version, FormatVersion::current());
    assert_eq!(scene.materials.len(), 2);
    assert_eq!(scene.materials[1].extra_tokens, vec!["refl", "0.3"]);
    assert_eq!(scene.extras.len(), 1);
    assert_eq!(scene.extras[0].after_materials, 1);

    let car = scene.root.find_by_name("car").unwrap();
    assert!(matches!(car.kind, NodeKind::Group));
    assert_eq!(car.transform.translation, Some(Vector3::new(10.0, 0.0, -2.5)));

    let body = scene.root.find_by_name("body").unwrap();
    assert_eq!(body.data.as_deref(), Some("hello\nworld!"));
    assert_eq!(body.texture.as_deref(), Some("body.png"));
    assert_eq!(body.texture_repeat, Some(Vector2::new(2.0, 2.0)));
    assert_eq!(body.texture_offset, Some(Vector2::new(0.5, 0.0)));
    assert_eq!(body.subdiv, Some(1));
    assert_eq!(body.crease_angle(), Some(30.0));
    assert_eq!(body.url.as_deref(), Some("http://example.com/car"));
    assert_eq!(body.extras.len(), 1);
    assert_eq!(body.extras[0].after, Some(Directive::Crease));

    let poly = body.polygon_data().unwrap();
    assert!(poly.surfaces[0].flags.is_smooth());
    assert!(poly.surfaces[0].flags.is_two_sided());
    assert_eq!(poly.surfaces[1].surface_type(), Some(SurfaceType::ClosedLine));

    let sun = scene.root.find_by_name("sun").unwrap();
    assert!(matches!(sun.kind, NodeKind::Light));

    // world <- car <- body: rotation then both translations
    let m = scene.world_transform(&[0, 0]).unwrap();
    assert_eq!(m[(0, 3)], 10.0);
    assert_eq!(m[(0, 1)], -1.0);

    assert!(scene.notifications.has_type(NotificationType::UnknownDirective));
    assert_eq!(scene.notifications.of_type(NotificationType::UnknownDirective).len(), 3);
}

#[test]
fn test_two_ref_polygon_is_degenerate_warning() {
    let text = CUBE_SAMPLE.replace("refs 3\n0 0 0\n1 1 0\n2 0 1\n", "refs 2\n0 0 0\n1 1 0\n");
    let scene = read_str(&text);
    let poly = scene.root.children[0].polygon_data().unwrap();
    assert_eq!(poly.surfaces[0].refs.len(), 2);
    assert!(scene.notifications.has_type(NotificationType::DegenerateGeometry));
}

#[test]
fn test_kids_count_mismatch_before_eof() {
    let text = CUBE_SAMPLE.replace("OBJECT world\nkids 1", "OBJECT world\nkids 2");
    let err = parse(text.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::Structural { .. }), "got {err:?}");
}

#[test]
fn test_kids_count_mismatch_before_material() {
    let text = format!(
        "{}MATERIAL \"late\" rgb 1 1 1 amb 1 1 1 emis 0 0 0 spec 0 0 0 shi 0 trans 0\n",
        CUBE_SAMPLE.replace("OBJECT world\nkids 1", "OBJECT world\nkids 2")
    );
    let err = parse(text.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::Structural { line: 19, .. }), "got {err:?}");
}

#[test]
fn test_out_of_range_material_is_repaired() {
    let text = CUBE_SAMPLE.replace("mat 0", "mat 5");
    let scene = read_str(&text);
    assert!(scene.repaired);
    // the existing DefaultWhite is identical to the substitute and is reused
    assert_eq!(scene.materials.len(), 1);
    assert_eq!(scene.root.children[0].polygon_data().unwrap().surfaces[0].material, 0);
    assert!(scene.notifications.has_type(NotificationType::RepairedReference));

    let text = text.replace("\"DefaultWhite\" rgb 1 1 1", "\"white\" rgb 1 1 1");
    let scene = read_str(&text);
    assert_eq!(scene.materials.len(), 2);
    assert_eq!(scene.materials[1].name, DEFAULT_MATERIAL_NAME);
    assert_eq!(scene.root.children[0].polygon_data().unwrap().surfaces[0].material, 1);
}

#[test]
fn test_out_of_range_vertex_is_fatal() {
    let text = CUBE_SAMPLE.replace("2 0 1\n", "3 0 1\n");
    let err = parse(text.as_bytes()).unwrap_err();
    match err {
        AcError::VertexReference { node, surface, index, vertex_count } => {
            assert_eq!(node, "cube");
            assert_eq!(surface, 0);
            assert_eq!(index, 3);
            assert_eq!(vertex_count, 3);
        }
        other => panic!("expected VertexReference, got {other:?}"),
    }
}

#[test]
fn test_unterminated_string_is_lex_error() {
    let text = CUBE_SAMPLE.replace("name \"cube\"", "name \"cube");
    let err = parse(text.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::Lex { line: 6, .. }), "got {err:?}");
}

#[test]
fn test_vendor_lines_with_digit_led_words_are_kept() {
    let text = "AC3Db\nOBJECT world\nshader 3d_toon\nkids 0\n";
    let scene = read_str(text);
    assert_eq!(scene.root.extras[0].directive.raw(), "shader 3d_toon");
    assert_eq!(write_str(&scene), text);

    let bad = CUBE_SAMPLE.replace("1 0 0\n0 1 0\n", "1 0 0\n0 1.0.0 0\n");
    let err = parse(bad.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::Lex { line: 10, .. }), "got {err:?}");
}

#[test]
fn test_geometry_arity_errors() {
    let short_vertex = CUBE_SAMPLE.replace("1 0 0\n0 1 0\n", "1 0\n0 1 0\n");
    let err = parse(short_vertex.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::GeometryParse { ref node, surface: None, .. } if node == "cube"));

    let long_ref = CUBE_SAMPLE.replace("2 0 1\n", "2 0 1 7\n");
    let err = parse(long_ref.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::GeometryParse { surface: Some(0), .. }), "got {err:?}");
}

#[test]
fn test_huge_declared_counts_are_parse_errors() {
    let vertices = CUBE_SAMPLE.replace("numvert 3", "numvert 1e18");
    let err = parse(vertices.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::GeometryParse { surface: None, .. }), "got {err:?}");

    let refs = CUBE_SAMPLE.replace("refs 3", "refs 100000000000000");
    let err = parse(refs.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::GeometryParse { surface: Some(0), .. }), "got {err:?}");

    let results = parse_many(&[refs.as_bytes(), CUBE_SAMPLE.as_bytes()]);
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
}

#[test]
fn test_material_arity_error() {
    let text = CUBE_SAMPLE.replace("amb 1 1 1", "amb 1 1");
    let err = parse(text.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::MaterialParse { line: 2, .. }), "got {err:?}");
}

#[test]
fn test_data_length_mismatch() {
    let text = CUBE_SAMPLE.replace("name \"cube\"\n", "name \"cube\"\ndata 3\nabcdef\n");
    let err = parse(text.as_bytes()).unwrap_err();
    assert!(matches!(err, AcError::Structural { .. }), "got {err:?}");
}

#[test]
fn test_header_errors() {
    assert!(matches!(
        parse(b"AC3Dz\nOBJECT world\nkids 0\n"),
        Err(AcError::Structural { line: 1, .. })
    ));
    assert!(matches!(
        parse(b"AC3De\nOBJECT world\nkids 0\n"),
        Err(AcError::UnsupportedVersion(_))
    ));
    assert!(matches!(
        parse(b"AC3Db extra\nOBJECT world\nkids 0\n"),
        Err(AcError::Structural { line: 1, .. })
    ));
}

#[test]
fn test_dropping_unknown_fields() {
    let scene = read_str_dropping_unknown(RICH_SAMPLE);
    assert!(scene.extras.is_empty());
    assert!(scene.materials[1].extra_tokens.is_empty());
    assert!(scene.root.find_by_name("body").unwrap().extras.is_empty());
    assert!(scene.notifications.has_type(NotificationType::UnknownDirective));
}

#[test]
fn test_crlf_input() {
    let text = CUBE_SAMPLE.replace('\n', "\r\n");
    let scene = read_str(&text);
    assert_eq!(scene.root.children[0].display_name(), "cube");
}

#[test]
fn test_read_from_file() {
    let path = test_output_path("reading_cube.ac");
    std::fs::write(&path, CUBE_SAMPLE).unwrap();
    let scene = AcReader::from_file(&path).unwrap().read().unwrap();
    assert_eq!(scene, read_str(CUBE_SAMPLE));

    assert!(matches!(
        AcReader::from_file(test_output_path("does_not_exist.ac")),
        Err(AcError::Io(_))
    ));
}
