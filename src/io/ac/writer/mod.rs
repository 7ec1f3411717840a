//! AC3D writer module

mod scene_writer;
mod text_writer;

pub use scene_writer::SceneWriter;
pub use text_writer::{format_flags, format_number, quote, AcTextWriter};

use crate::error::Result;
use crate::scene::SceneGraph;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Options for the AC3D writer.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write [`Material::mirror`](crate::scene::Material::mirror), when set,
    /// in the `emis` slot, as legacy exporters did.
    ///
    /// Default: `false`
    pub mirror_as_emissive: bool,
    /// Write [`Material::mirror`](crate::scene::Material::mirror), when set,
    /// in the `amb` slot. Both slots carry it when both flags are set.
    ///
    /// Default: `false`
    pub mirror_as_ambient: bool,
    /// Write back opaque directives and trailing material tokens.
    ///
    /// Default: `true`
    pub preserve_unknown_fields: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            mirror_as_emissive: false,
            mirror_as_ambient: false,
            preserve_unknown_fields: true,
        }
    }
}

/// AC3D file writer
pub struct AcWriter<'g> {
    graph: &'g SceneGraph,
    options: WriteOptions,
}

impl<'g> AcWriter<'g> {
    /// Create a writer for the given scene
    pub fn new(graph: &'g SceneGraph) -> Self {
        Self {
            graph,
            options: WriteOptions::default(),
        }
    }

    /// Set the writer options
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // no file is created for an invalid graph
        self.graph.validate()?;
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to any writer.
    ///
    /// The graph is validated first; nothing is written if a vertex or
    /// material reference is out of range.
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.graph.validate()?;
        let mut out = AcTextWriter::new(writer);
        SceneWriter::new(&mut out, &self.options).write_scene(self.graph)?;
        out.flush()
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        self.graph.validate()?;
        let mut buffer = Vec::new();
        {
            let mut out = AcTextWriter::new(&mut buffer);
            SceneWriter::new(&mut out, &self.options).write_scene(self.graph)?;
        }
        Ok(buffer)
    }

    /// Get a reference to the scene
    pub fn graph(&self) -> &SceneGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcError;
    use crate::scene::{Material, SceneNode, Surface, SurfaceRef};
    use crate::types::{Rgb, Vector3};

    fn write(graph: &SceneGraph, options: WriteOptions) -> String {
        let bytes = AcWriter::new(graph).with_options(options).write_to_vec().unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_empty_world() {
        let graph = SceneGraph::new();
        assert_eq!(write(&graph, WriteOptions::default()), "AC3Db\nOBJECT world\nkids 0\n");
    }

    #[test]
    fn test_directive_order() {
        let mut graph = SceneGraph::new();
        graph.add_material(Material::new("m"));
        let mut node = SceneNode::polygon("p");
        node.transform.translation = Some(Vector3::new(1.0, 2.0, 3.0));
        node.texture = Some("t.png".into());
        if let Some(poly) = node.polygon_data_mut() {
            poly.vertices = vec![Vector3::zeros(), Vector3::x(), Vector3::y()];
            poly.surfaces.push(Surface::polygon(
                0,
                vec![
                    SurfaceRef::new(0, 0.0, 0.0),
                    SurfaceRef::new(1, 1.0, 0.0),
                    SurfaceRef::new(2, 0.0, 1.0),
                ],
            ));
        }
        graph.root.add_child(node);

        let text = write(&graph, WriteOptions::default());
        let expected = "AC3Db\n\
MATERIAL \"m\" rgb 1 1 1 amb 1 1 1 emis 0 0 0 spec 0.5 0.5 0.5 shi 10 trans 0\n\
OBJECT world\n\
kids 1\n\
OBJECT poly\n\
name \"p\"\n\
texture \"t.png\"\n\
loc 1 2 3\n\
numvert 3\n\
0 0 0\n\
1 0 0\n\
0 1 0\n\
numsurf 1\n\
SURF 0x00\n\
mat 0\n\
refs 3\n\
0 0 0\n\
1 1 0\n\
2 0 1\n\
kids 0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_mirror_as_emissive() {
        let mut graph = SceneGraph::new();
        let mut material = Material::new("chrome");
        material.mirror = Some(Rgb::new(0.25, 0.5, 0.75));
        graph.add_material(material);

        let plain = write(&graph, WriteOptions::default());
        assert!(plain.contains("emis 0 0 0"));

        let options = WriteOptions {
            mirror_as_emissive: true,
            ..Default::default()
        };
        assert!(write(&graph, options).contains("emis 0.25 0.5 0.75"));
    }

    #[test]
    fn test_invalid_graph_is_rejected() {
        let mut graph = SceneGraph::new();
        let mut node = SceneNode::polygon("p");
        if let Some(poly) = node.polygon_data_mut() {
            poly.vertices.push(Vector3::zeros());
            poly.surfaces.push(Surface::polygon(0, vec![SurfaceRef::untextured(0)]));
        }
        graph.root.add_child(node);
        let err = AcWriter::new(&graph).write_to_vec().unwrap_err();
        assert!(matches!(err, AcError::MaterialReference { .. }));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let mut graph = SceneGraph::new();
        graph.root.transform.translation = Some(Vector3::new(f64::NAN, 0.0, 0.0));
        let err = AcWriter::new(&graph).write_to_vec().unwrap_err();
        assert!(matches!(err, AcError::InvalidValue(_)));
    }
}
