//! Writes the material table and the object tree

use super::text_writer::{format_flags, format_number, quote, AcTextWriter};
use super::WriteOptions;
use crate::error::Result;
use crate::scene::{Material, NodeKind, SceneGraph, SceneNode, Surface};
use crate::types::{Directive, Transform, Vector2};
use std::io::Write;

/// Emits a validated [`SceneGraph`] in file order.
pub struct SceneWriter<'w, W: Write> {
    out: &'w mut AcTextWriter<W>,
    options: &'w WriteOptions,
}

impl<'w, W: Write> SceneWriter<'w, W> {
    pub fn new(out: &'w mut AcTextWriter<W>, options: &'w WriteOptions) -> Self {
        Self { out, options }
    }

    pub fn write_scene(&mut self, graph: &SceneGraph) -> Result<()> {
        self.out.write_raw_line(&graph.version.header())?;

        for index in 0..=graph.materials.len() {
            if self.options.preserve_unknown_fields {
                for extra in &graph.extras {
                    let slot = extra.after_materials.min(graph.materials.len());
                    if slot == index {
                        self.out.write_raw_line(&extra.directive.raw())?;
                    }
                }
            }
            if let Some(material) = graph.materials.get(index) {
                self.write_material(material)?;
            }
        }

        self.write_object(&graph.root)
    }

    pub fn write_material(&mut self, material: &Material) -> Result<()> {
        let ambient = material.written_ambient(self.options.mirror_as_ambient);
        let emissive = material.written_emissive(self.options.mirror_as_emissive);
        let mut fields = vec![quote(&material.name)];
        for (key, color) in [
            ("rgb", material.diffuse),
            ("amb", ambient),
            ("emis", emissive),
            ("spec", material.specular),
        ] {
            fields.push(key.to_string());
            for channel in color.to_array() {
                fields.push(format_number(channel)?);
            }
        }
        fields.push("shi".to_string());
        fields.push(material.shininess.to_string());
        fields.push("trans".to_string());
        fields.push(format_number(material.transparency)?);
        if self.options.preserve_unknown_fields {
            fields.extend(material.extra_tokens.iter().cloned());
        }
        self.out.write_line("MATERIAL", &fields)
    }

    /// Write a node and its subtree in pre-order
    pub fn write_object(&mut self, node: &SceneNode) -> Result<()> {
        self.out.write_line("OBJECT", &[node.kind.keyword().to_string()])?;
        self.write_extras(node, None)?;

        for directive in Directive::ALL {
            self.write_directive(node, directive)?;
            if directive != Directive::Kids {
                self.write_extras(node, Some(directive))?;
            }
        }

        for child in &node.children {
            self.write_object(child)?;
        }
        Ok(())
    }

    fn write_extras(&mut self, node: &SceneNode, after: Option<Directive>) -> Result<()> {
        if !self.options.preserve_unknown_fields {
            return Ok(());
        }
        for extra in node.extras.iter().filter(|e| e.after == after) {
            self.out.write_raw_line(&extra.directive.raw())?;
        }
        Ok(())
    }

    fn write_directive(&mut self, node: &SceneNode, directive: Directive) -> Result<()> {
        let keyword = directive.keyword();
        let poly = match &node.kind {
            NodeKind::Polygon(poly) => Some(poly),
            _ => None,
        };

        match directive {
            Directive::Name => {
                if let Some(name) = &node.name {
                    self.out.write_string(keyword, name)?;
                }
            }
            Directive::Data => {
                if let Some(data) = &node.data {
                    self.out.write_data(data)?;
                }
            }
            Directive::Texture => {
                if let Some(texture) = &node.texture {
                    self.out.write_string(keyword, texture)?;
                }
            }
            Directive::TexRep => {
                if let Some(rep) = node.texture_repeat {
                    self.out.write_numbers(keyword, &[rep.x, rep.y])?;
                }
            }
            Directive::TexOff => {
                if let Some(off) = node.texture_offset {
                    self.out.write_numbers(keyword, &[off.x, off.y])?;
                }
            }
            Directive::Subdiv => {
                if let Some(level) = node.subdiv {
                    self.out.write_count(keyword, level as usize)?;
                }
            }
            Directive::Crease => {
                if let Some(angle) = poly.and_then(|p| p.crease) {
                    self.out.write_numbers(keyword, &[angle])?;
                }
            }
            Directive::Rot => {
                if let Some(rotation) = &node.transform.rotation {
                    self.out
                        .write_numbers(keyword, &Transform::rotation_row_major(rotation))?;
                }
            }
            Directive::Loc => {
                if let Some(t) = node.transform.translation {
                    self.out.write_numbers(keyword, &[t.x, t.y, t.z])?;
                }
            }
            Directive::Url => {
                if let Some(url) = &node.url {
                    self.out.write_string(keyword, url)?;
                }
            }
            Directive::NumVert => {
                if let Some(poly) = poly.filter(|p| !p.vertices.is_empty()) {
                    self.out.write_count(keyword, poly.vertices.len())?;
                    for v in &poly.vertices {
                        self.out.write_values(&[v.x, v.y, v.z])?;
                    }
                }
            }
            Directive::NumSurf => {
                if let Some(poly) = poly.filter(|p| !p.surfaces.is_empty()) {
                    self.out.write_count(keyword, poly.surfaces.len())?;
                    for surface in &poly.surfaces {
                        self.write_surface(surface)?;
                    }
                }
            }
            Directive::Kids => self.out.write_count(keyword, node.children.len())?,
        }
        Ok(())
    }

    fn write_surface(&mut self, surface: &Surface) -> Result<()> {
        self.out.write_line("SURF", &[format_flags(surface.flags)])?;
        self.out.write_count("mat", surface.material)?;
        self.out.write_count("refs", surface.refs.len())?;
        // lines carry no texture coordinates
        let is_line = surface.surface_type().map_or(false, |t| t.is_line());
        for r in &surface.refs {
            let uv = if is_line { Vector2::zeros() } else { r.uv };
            let fields = [format_number(uv.x)?, format_number(uv.y)?];
            self.out.write_line(&r.vertex.to_string(), &fields)?;
        }
        Ok(())
    }
}
