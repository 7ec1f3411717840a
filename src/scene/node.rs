//! OBJECT blocks and the node tree

use super::opaque::AnchoredDirective;
use super::surface::Surface;
use crate::types::{Transform, Vector2, Vector3};

/// Crease angle of a polygon node without a `crease` directive
pub const DEFAULT_CREASE_ANGLE: f64 = 45.0;

/// Geometry of a `poly` object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonData {
    /// Vertex positions, local to the node
    pub vertices: Vec<Vector3<f64>>,
    pub surfaces: Vec<Surface>,
    /// `crease` directive, degrees
    pub crease: Option<f64>,
}

impl PolygonData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective crease angle in degrees
    pub fn crease_angle(&self) -> f64 {
        self.crease.unwrap_or(DEFAULT_CREASE_ANGLE)
    }
}

/// Object type, tagged with the data only polygons carry
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    World,
    Group,
    Polygon(PolygonData),
    Light,
}

impl NodeKind {
    /// Keyword after `OBJECT`
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeKind::World => "world",
            NodeKind::Group => "group",
            NodeKind::Polygon(_) => "poly",
            NodeKind::Light => "light",
        }
    }

    /// Kind for an `OBJECT` keyword; matching is case-insensitive because
    /// older exporters wrote `OBJECT Poly`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "world" => Some(NodeKind::World),
            "group" => Some(NodeKind::Group),
            "poly" => Some(NodeKind::Polygon(PolygonData::new())),
            "light" => Some(NodeKind::Light),
            _ => None,
        }
    }
}

/// One OBJECT block. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub name: Option<String>,
    /// Free text of the `data` directive
    pub data: Option<String>,
    /// Texture path
    pub texture: Option<String>,
    /// `texrep`, default (1, 1)
    pub texture_repeat: Option<Vector2<f64>>,
    /// `texoff`, default (0, 0)
    pub texture_offset: Option<Vector2<f64>>,
    pub transform: Transform,
    pub url: Option<String>,
    pub subdiv: Option<u32>,
    pub children: Vec<SceneNode>,
    /// Directives kept verbatim, with their position
    pub extras: Vec<AnchoredDirective>,
}

impl SceneNode {
    /// Create an empty node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            data: None,
            texture: None,
            texture_repeat: None,
            texture_offset: None,
            transform: Transform::identity(),
            url: None,
            subdiv: None,
            children: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub fn world() -> Self {
        Self::new(NodeKind::World)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Group).with_name(name)
    }

    pub fn polygon(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Polygon(PolygonData::new())).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child and return a mutable reference to it
    pub fn add_child(&mut self, child: SceneNode) -> &mut SceneNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Name, or the empty string
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_world(&self) -> bool {
        matches!(self.kind, NodeKind::World)
    }

    pub fn polygon_data(&self) -> Option<&PolygonData> {
        match &self.kind {
            NodeKind::Polygon(data) => Some(data),
            _ => None,
        }
    }

    pub fn polygon_data_mut(&mut self) -> Option<&mut PolygonData> {
        match &mut self.kind {
            NodeKind::Polygon(data) => Some(data),
            _ => None,
        }
    }

    /// Effective texture repeat
    pub fn texture_repeat_or_default(&self) -> Vector2<f64> {
        self.texture_repeat.unwrap_or_else(|| Vector2::new(1.0, 1.0))
    }

    /// Effective texture offset
    pub fn texture_offset_or_default(&self) -> Vector2<f64> {
        self.texture_offset.unwrap_or_else(Vector2::zeros)
    }

    /// Crease angle for polygon nodes
    pub fn crease_angle(&self) -> Option<f64> {
        self.polygon_data().map(PolygonData::crease_angle)
    }

    /// Visit this node and its descendants in pre-order, with depth
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a SceneNode, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(&'a SceneNode, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Visit every node mutably in pre-order
    pub fn walk_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut SceneNode),
    {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// First node in pre-order with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&SceneNode> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_name(name))
    }

    /// Node reached by following child indices from this node
    pub fn descendant(&self, path: &[usize]) -> Option<&SceneNode> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get(*first)?.descendant(rest),
        }
    }
}
