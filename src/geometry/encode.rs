//! Primitives to surface records (export direction)

use super::primitive::{Corner, MeshPrimitives, Primitive};
use crate::error::{AcError, Result};
use crate::scene::{SceneNode, Surface, SurfaceFlags, SurfaceRef, SurfaceType};
use crate::types::Vector3;
use indexmap::IndexMap;

type PositionKey = [u64; 3];

/// Vertex list and surfaces ready for a `poly` node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedGeometry {
    pub vertices: Vec<Vector3<f64>>,
    pub surfaces: Vec<Surface>,
}

/// Reduce host primitives to the `numvert`/`numsurf` encoding of one node.
///
/// Vertices with the same position share one index; the first occurrence
/// keeps its place in the list. Flags are recomputed from each primitive's
/// `smooth`/`two_sided` attributes. A line whose first and last vertex
/// coincide becomes a closed line without the repeated vertex; lines never
/// get texture coordinates.
pub fn encode(mesh: &MeshPrimitives) -> Result<EncodedGeometry> {
    let mut pool: IndexMap<PositionKey, Vector3<f64>, ahash::RandomState> =
        IndexMap::with_hasher(ahash::RandomState::new());

    let mut remap = Vec::with_capacity(mesh.vertices.len());
    for position in &mesh.vertices {
        let key = position_key(position)?;
        let entry = pool.entry(key);
        remap.push(entry.index());
        entry.or_insert(*position);
    }

    let mut surfaces = Vec::with_capacity(mesh.primitives.len());
    for (index, primitive) in mesh.primitives.iter().enumerate() {
        let corners = primitive
            .corners()
            .iter()
            .map(|c| match remap.get(c.vertex) {
                Some(vertex) => Ok(Corner::new(*vertex, c.uv)),
                None => Err(AcError::VertexReference {
                    node: String::new(),
                    surface: index,
                    index: c.vertex,
                    vertex_count: mesh.vertices.len(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        surfaces.push(match primitive {
            Primitive::Face(face) => Surface {
                flags: SurfaceFlags::compose(SurfaceType::Polygon, face.smooth, face.two_sided),
                material: face.material,
                refs: corners.iter().map(|c| SurfaceRef::new(c.vertex, c.uv.x, c.uv.y)).collect(),
            },
            Primitive::Line(line) => {
                let closed = corners.len() > 2
                    && corners.first().map(|c| c.vertex) == corners.last().map(|c| c.vertex);
                let (surface_type, kept) = if closed {
                    (SurfaceType::ClosedLine, &corners[..corners.len() - 1])
                } else {
                    (SurfaceType::Line, &corners[..])
                };
                Surface {
                    flags: SurfaceFlags::compose(surface_type, line.smooth, line.two_sided),
                    material: line.material,
                    refs: kept.iter().map(|c| SurfaceRef::untextured(c.vertex)).collect(),
                }
            }
        });
    }

    Ok(EncodedGeometry {
        vertices: pool.into_values().collect(),
        surfaces,
    })
}

/// Encode `mesh` and store it as the geometry of a `poly` node.
///
/// The crease angle and every other directive of the node are left alone.
pub fn encode_into(node: &mut SceneNode, mesh: &MeshPrimitives) -> Result<()> {
    let name = node.display_name().to_string();
    let poly = node.polygon_data_mut().ok_or_else(|| {
        AcError::InvalidValue(format!("object {:?} is not a poly object", name))
    })?;
    let encoded = encode(mesh).map_err(|err| match err {
        AcError::VertexReference {
            surface,
            index,
            vertex_count,
            ..
        } => AcError::VertexReference {
            node: name.clone(),
            surface,
            index,
            vertex_count,
        },
        other => other,
    })?;
    poly.vertices = encoded.vertices;
    poly.surfaces = encoded.surfaces;
    Ok(())
}

/// Bit pattern of a position, with `-0.0` folded into `0.0`
fn position_key(position: &Vector3<f64>) -> Result<PositionKey> {
    let mut key = [0u64; 3];
    for (slot, value) in key.iter_mut().zip(position.iter()) {
        if !value.is_finite() {
            return Err(AcError::InvalidValue(format!(
                "vertex position {} is not finite",
                value
            )));
        }
        *slot = if *value == 0.0 { 0 } else { value.to_bits() };
    }
    Ok(key)
}
