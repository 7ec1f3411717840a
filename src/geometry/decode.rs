//! Surface records to primitives (import direction)

use super::primitive::{Corner, Face, MeshPrimitives, Polyline, Primitive};
use crate::error::{AcError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::scene::{SceneNode, Surface, SurfaceType};
use crate::types::Vector2;

/// Build host primitives from a `poly` node.
///
/// The node's vertex list is passed through unchanged, so surfaces that
/// reference the same index share one vertex; separate indices are never
/// merged. Other node kinds decode to an empty mesh.
///
/// A polygon with two refs becomes a two-sided edge. Surfaces with fewer
/// than two refs, or with an undefined type, produce no primitive. Both
/// cases are reported, never silently dropped.
pub fn decode(node: &SceneNode) -> Result<(MeshPrimitives, NotificationCollection)> {
    let mut notifications = NotificationCollection::new();
    let mut mesh = MeshPrimitives::new();

    let poly = match node.polygon_data() {
        Some(poly) => poly,
        None => return Ok((mesh, notifications)),
    };
    let name = node.display_name();
    mesh.vertices = poly.vertices.clone();

    for (index, surface) in poly.surfaces.iter().enumerate() {
        if let Some(bad) = surface.refs.iter().find(|r| r.vertex >= poly.vertices.len()) {
            return Err(AcError::VertexReference {
                node: name.to_string(),
                surface: index,
                index: bad.vertex,
                vertex_count: poly.vertices.len(),
            });
        }

        match decode_surface(surface) {
            Decoded::Primitive(primitive) => mesh.primitives.push(primitive),
            Decoded::Edge(line) => {
                notifications.notify(
                    NotificationType::DegenerateGeometry,
                    format!("object {:?}, surface {}: polygon with 2 refs decoded as an edge", name, index),
                );
                mesh.primitives.push(Primitive::Line(line));
            }
            Decoded::Skipped(reason) => notifications.notify(
                NotificationType::DegenerateGeometry,
                format!("object {:?}, surface {}: {}, skipped", name, index, reason),
            ),
        }
    }

    Ok((mesh, notifications))
}

enum Decoded {
    Primitive(Primitive),
    Edge(Polyline),
    Skipped(String),
}

fn decode_surface(surface: &Surface) -> Decoded {
    let smooth = surface.flags.is_smooth();
    let two_sided = surface.flags.is_two_sided();
    let surface_type = match surface.surface_type() {
        Some(ty) => ty,
        None => return Decoded::Skipped(format!("undefined surface flags {:#x}", surface.flags.bits())),
    };

    if surface.refs.len() < 2 {
        return Decoded::Skipped(format!("only {} ref(s)", surface.refs.len()));
    }

    match surface_type {
        SurfaceType::Polygon if surface.refs.len() == 2 => Decoded::Edge(Polyline {
            corners: line_corners(surface),
            material: surface.material,
            smooth,
            two_sided: true,
        }),
        SurfaceType::Polygon => Decoded::Primitive(Primitive::Face(Face {
            corners: surface
                .refs
                .iter()
                .map(|r| Corner::new(r.vertex, r.uv))
                .collect(),
            material: surface.material,
            smooth,
            two_sided,
        })),
        SurfaceType::Line | SurfaceType::ClosedLine => {
            let mut corners = line_corners(surface);
            if surface_type == SurfaceType::ClosedLine {
                corners.push(corners[0]);
            }
            Decoded::Primitive(Primitive::Line(Polyline {
                corners,
                material: surface.material,
                smooth,
                two_sided,
            }))
        }
    }
}

/// Lines carry no texture coordinates
fn line_corners(surface: &Surface) -> Vec<Corner> {
    surface
        .refs
        .iter()
        .map(|r| Corner::new(r.vertex, Vector2::zeros()))
        .collect()
}
