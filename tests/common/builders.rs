//! Scene builders shared by the integration tests.

#![allow(dead_code)]

use ac3drust::scene::{AnchoredDirective, OpaqueDirective, PositionedDirective};
use ac3drust::{
    Directive, Material, Rgb, SceneGraph, SceneNode, Surface, SurfaceFlags, SurfaceRef,
    SurfaceType, Vector2, Vector3,
};

/// Unit square poly node: 4 vertices, one textured quad using `material`.
pub fn square_node(name: &str, material: usize) -> SceneNode {
    let mut node = SceneNode::polygon(name);
    let poly = node.polygon_data_mut().expect("poly node");
    poly.vertices = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ];
    poly.surfaces.push(Surface::polygon(
        material,
        vec![
            SurfaceRef::new(0, 0.0, 0.0),
            SurfaceRef::new(1, 1.0, 0.0),
            SurfaceRef::new(2, 1.0, 1.0),
            SurfaceRef::new(3, 0.0, 1.0),
        ],
    ));
    node
}

/// Scene with one material and one square.
pub fn square_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_material(Material::default());
    scene.root.add_child(square_node("square", 0));
    scene
}

/// Scene exercising every modelled field plus opaque directives.
pub fn full_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();

    let mut red = Material::new("red");
    red.diffuse = Rgb::new(1.0, 0.0, 0.0);
    red.shininess = 64;
    scene.add_material(red);

    let mut glass = Material::new("glass");
    glass.transparency = 0.75;
    glass.extra_tokens = vec!["refl".into(), "0.25".into()];
    scene.add_material(glass);

    scene.extras.push(PositionedDirective {
        after_materials: 1,
        directive: OpaqueDirective::new("PALETTE", "2"),
    });

    scene.root.name = Some("scene".into());

    let group = scene.root.add_child(SceneNode::group("assembly"));
    group.transform.translation = Some(Vector3::new(0.0, 2.5, -1.0));
    group.url = Some("http://example.com".into());

    let mut body = square_node("body", 1);
    body.data = Some("line one\nline two".into());
    body.texture = Some("tex/body.png".into());
    body.texture_repeat = Some(Vector2::new(2.0, 4.0));
    body.texture_offset = Some(Vector2::new(0.5, 0.0));
    body.subdiv = Some(2);
    body.transform.rotation = Some(ac3drust::Transform::rotation_from_row_major(&[
        0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]));
    body.extras.push(AnchoredDirective {
        after: Some(Directive::Texture),
        directive: OpaqueDirective::new("shader", "\"toon\" 3"),
    });
    body.extras.push(AnchoredDirective {
        after: None,
        directive: OpaqueDirective::new("locked", ""),
    });
    if let Some(poly) = body.polygon_data_mut() {
        poly.crease = Some(61.5);
        poly.surfaces[0].flags = SurfaceFlags::compose(SurfaceType::Polygon, true, true);
        poly.surfaces.push(Surface {
            flags: SurfaceFlags::compose(SurfaceType::Line, false, false),
            material: 0,
            refs: vec![SurfaceRef::untextured(0), SurfaceRef::untextured(2)],
        });
    }
    group.add_child(body);

    let mut light = SceneNode::new(ac3drust::NodeKind::Light).with_name("lamp");
    light.transform.translation = Some(Vector3::new(0.0, 10.0, 0.0));
    scene.root.add_child(light);

    scene
}
