//! Host-neutral primitives
//!
//! What a host sees of a `poly` node: a vertex list local to the node and a
//! list of faces and polylines indexing into it. Shading attributes travel
//! with each primitive; nothing is baked into the geometry.

use crate::types::{Vector2, Vector3};

/// One corner of a primitive: vertex index plus texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub vertex: usize,
    pub uv: Vector2<f64>,
}

impl Corner {
    pub fn new(vertex: usize, uv: Vector2<f64>) -> Self {
        Self { vertex, uv }
    }

    /// Corner without texture coordinate
    pub fn at(vertex: usize) -> Self {
        Self::new(vertex, Vector2::zeros())
    }
}

// ============================================================================
// Face
// ============================================================================

/// A polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Corners in winding order
    pub corners: Vec<Corner>,
    /// Index into the material table
    pub material: usize,
    pub smooth: bool,
    pub two_sided: bool,
}

impl Face {
    /// Flat, single-sided face
    pub fn new(material: usize, corners: Vec<Corner>) -> Self {
        Self {
            corners,
            material,
            smooth: false,
            two_sided: false,
        }
    }

    /// Untextured triangle
    pub fn triangle(material: usize, v0: usize, v1: usize, v2: usize) -> Self {
        Self::new(material, vec![Corner::at(v0), Corner::at(v1), Corner::at(v2)])
    }

    pub fn vertex_count(&self) -> usize {
        self.corners.len()
    }

    /// Vertex indices in winding order
    pub fn indices(&self) -> Vec<usize> {
        self.corners.iter().map(|c| c.vertex).collect()
    }

    /// Edges as pairs of vertex indices, closing back to the first corner
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.corners.len();
        (0..n)
            .map(|i| (self.corners[i].vertex, self.corners[(i + 1) % n].vertex))
            .collect()
    }

    /// Reverses the winding order of the face.
    pub fn reverse(&mut self) {
        self.corners.reverse();
    }
}

// ============================================================================
// Polyline
// ============================================================================

/// A line strip. A closed line repeats its first corner at the end.
///
/// Corners may carry UVs when built by a host; they are never written.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub corners: Vec<Corner>,
    pub material: usize,
    pub smooth: bool,
    pub two_sided: bool,
}

impl Polyline {
    /// Open line through the given vertices
    pub fn new(material: usize, vertices: &[usize]) -> Self {
        Self {
            corners: vertices.iter().map(|v| Corner::at(*v)).collect(),
            material,
            smooth: false,
            two_sided: false,
        }
    }

    /// Closed loop through the given vertices
    pub fn closed(material: usize, vertices: &[usize]) -> Self {
        let mut line = Self::new(material, vertices);
        if let Some(first) = line.corners.first().copied() {
            line.corners.push(first);
        }
        line
    }

    pub fn indices(&self) -> Vec<usize> {
        self.corners.iter().map(|c| c.vertex).collect()
    }

    /// First and last corner share a vertex
    pub fn is_closed(&self) -> bool {
        match (self.corners.first(), self.corners.last()) {
            (Some(first), Some(last)) => self.corners.len() > 2 && first.vertex == last.vertex,
            _ => false,
        }
    }
}

/// A face or a line
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Face(Face),
    Line(Polyline),
}

impl Primitive {
    pub fn material(&self) -> usize {
        match self {
            Primitive::Face(face) => face.material,
            Primitive::Line(line) => line.material,
        }
    }

    pub fn corners(&self) -> &[Corner] {
        match self {
            Primitive::Face(face) => &face.corners,
            Primitive::Line(line) => &line.corners,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Primitive::Line(_))
    }
}

impl From<Face> for Primitive {
    fn from(face: Face) -> Self {
        Primitive::Face(face)
    }
}

impl From<Polyline> for Primitive {
    fn from(line: Polyline) -> Self {
        Primitive::Line(line)
    }
}

/// Vertices and primitives of one node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshPrimitives {
    pub vertices: Vec<Vector3<f64>>,
    pub primitives: Vec<Primitive>,
}

impl MeshPrimitives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, vertex: Vector3<f64>) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Face(face) => Some(face),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Number of triangles a fan triangulation of every face would give
    pub fn triangle_count(&self) -> usize {
        self.faces().map(|f| f.vertex_count().saturating_sub(2)).sum()
    }
}
