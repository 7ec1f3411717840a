//! Neutral in-memory scene model
//!
//! This is the contract between the codec and whatever host consumes it: a
//! material table, one `world` root owning a tree of nodes, and the opaque
//! directives needed for faithful round trips.

pub mod material;
pub mod node;
pub mod opaque;
pub mod surface;

pub use material::{Material, DEFAULT_MATERIAL_NAME, MAX_SHININESS};
pub use node::{NodeKind, PolygonData, SceneNode, DEFAULT_CREASE_ANGLE};
pub use opaque::{AnchoredDirective, OpaqueDirective, PositionedDirective};
pub use surface::{Surface, SurfaceFlags, SurfaceRef, SurfaceType};

use crate::error::{AcError, Result};
use crate::notification::NotificationCollection;
use crate::types::{FormatVersion, Matrix4};

/// A whole `.ac` file
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// Header revision
    pub version: FormatVersion,
    /// Material table; order is significant
    pub materials: Vec<Material>,
    /// The single `world` object
    pub root: SceneNode,
    /// File-level directives kept verbatim
    pub extras: Vec<PositionedDirective>,
    /// Set when the reader substituted a default for a bad reference
    pub repaired: bool,
    /// Non-fatal issues found while reading
    pub notifications: NotificationCollection,
}

impl SceneGraph {
    /// Empty scene: current revision, no materials, empty world
    pub fn new() -> Self {
        Self {
            version: FormatVersion::current(),
            materials: Vec::new(),
            root: SceneNode::world(),
            extras: Vec::new(),
            repaired: false,
            notifications: NotificationCollection::new(),
        }
    }

    /// Append a material and return its index
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Index of the substitute used for out-of-range material references.
    ///
    /// Reuses an unmodified `DefaultWhite` material if the table already has
    /// one, otherwise appends it.
    pub fn default_material_index(&mut self) -> usize {
        let default = Material::default();
        match self.materials.iter().position(|m| *m == default) {
            Some(index) => index,
            None => self.add_material(default),
        }
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Transform from the local space of the node at `path` (child indices
    /// from the root) to world space
    pub fn world_transform(&self, path: &[usize]) -> Option<Matrix4<f64>> {
        let mut node = &self.root;
        let mut matrix = node.transform.to_matrix();
        for index in path {
            node = node.children.get(*index)?;
            matrix *= node.transform.to_matrix();
        }
        Some(matrix)
    }

    /// Check that the graph can be written and read back unchanged.
    ///
    /// The root must be the only `world` object, shininess must lie in
    /// `0..=128`, every surface type must be defined, and vertex and material
    /// indices must address the owning node's vertex list and the material
    /// table. The writer runs this before emitting anything, since hosts may
    /// edit the tree freely after a read.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_world() {
            return Err(AcError::InvalidValue(format!(
                "root object must be world, found {}",
                self.root.kind.keyword()
            )));
        }
        for (index, material) in self.materials.iter().enumerate() {
            if !(0..=MAX_SHININESS).contains(&material.shininess) {
                return Err(AcError::InvalidValue(format!(
                    "material {} {:?}: shininess {} outside 0..={}",
                    index, material.name, material.shininess, MAX_SHININESS
                )));
            }
        }

        let material_count = self.materials.len();
        let mut result = Ok(());
        self.root.walk(&mut |node, depth| {
            if result.is_err() {
                return;
            }
            if depth > 0 && node.is_world() {
                result = Err(AcError::InvalidValue(format!(
                    "world object {:?} below the root",
                    node.display_name()
                )));
            } else if let Some(poly) = node.polygon_data() {
                result = validate_polygon(node.display_name(), poly, material_count);
            }
        });
        result
    }
}

fn validate_polygon(name: &str, poly: &PolygonData, material_count: usize) -> Result<()> {
    let vertex_count = poly.vertices.len();
    for (surface_index, surface) in poly.surfaces.iter().enumerate() {
        if surface.surface_type().is_none() {
            return Err(AcError::InvalidValue(format!(
                "object {:?}, surface {}: undefined surface type in flags {:#x}",
                name,
                surface_index,
                surface.flags.bits()
            )));
        }
        if surface.material >= material_count {
            return Err(AcError::MaterialReference {
                node: name.to_string(),
                surface: surface_index,
                index: surface.material,
                material_count,
            });
        }
        if let Some(bad) = surface.refs.iter().find(|r| r.vertex >= vertex_count) {
            return Err(AcError::VertexReference {
                node: name.to_string(),
                surface: surface_index,
                index: bad.vertex,
                vertex_count,
            });
        }
    }
    Ok(())
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality: notifications and the `repaired` marker describe how
/// a graph was read, not what it contains, and are ignored.
impl PartialEq for SceneGraph {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.materials == other.materials
            && self.root == other.root
            && self.extras == other.extras
    }
}
