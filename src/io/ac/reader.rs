//! AC3D file reader

mod geometry_reader;
mod lexer;
mod line_reader;
mod material_reader;
mod object_reader;

pub use lexer::{Lexer, Line, SpannedToken, Token};

use line_reader::LineReader;
use material_reader::read_material;
use object_reader::ObjectReader;

use crate::error::{AcError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::scene::{OpaqueDirective, PositionedDirective, SceneGraph, SceneNode};
use crate::types::FormatVersion;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Configuration for the AC3D reader.
#[derive(Debug, Clone)]
pub struct AcReaderConfiguration {
    /// Keep unrecognized directives and trailing material tokens so they
    /// are written back on export.
    ///
    /// Default: `true`
    pub preserve_unknown_fields: bool,
    /// Encoding used for names and data blocks that are not valid UTF-8.
    ///
    /// Default: Windows-1252
    pub fallback_encoding: &'static Encoding,
}

impl Default for AcReaderConfiguration {
    fn default() -> Self {
        Self {
            preserve_unknown_fields: true,
            fallback_encoding: encoding_rs::WINDOWS_1252,
        }
    }
}

/// AC3D file reader
pub struct AcReader {
    data: Vec<u8>,
    config: AcReaderConfiguration,
}

impl AcReader {
    /// Create a reader over bytes already in memory
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            config: AcReaderConfiguration::default(),
        }
    }

    /// Create a new reader from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut buf_reader = BufReader::new(reader);
        let mut data = Vec::new();
        buf_reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes(data))
    }

    /// Create a new reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: AcReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the whole file into a scene graph
    pub fn read(self) -> Result<SceneGraph> {
        let lexer = Lexer::new(&self.data).with_encoding(self.config.fallback_encoding);
        let mut lines = LineReader::new(lexer);
        let mut notifications = NotificationCollection::new();

        let version = read_header(&mut lines, &mut notifications)?;
        let mut graph = SceneGraph::new();
        graph.version = version;

        let preserve = self.config.preserve_unknown_fields;
        let mut root: Option<SceneNode> = None;

        while let Some(line) = lines.read_line()? {
            let keyword = match line.keyword() {
                Some(keyword) => keyword,
                None => {
                    return Err(AcError::structural(
                        line.number,
                        "expected MATERIAL or OBJECT",
                    ))
                }
            };

            match keyword {
                "MATERIAL" => {
                    if root.is_some() {
                        return Err(AcError::structural(
                            line.number,
                            "MATERIAL after the object tree",
                        ));
                    }
                    let material = read_material(&line, preserve, &mut notifications)?;
                    graph.add_material(material);
                }
                "OBJECT" => {
                    if root.is_some() {
                        return Err(AcError::structural(
                            line.number,
                            "more than one top-level object",
                        ));
                    }
                    let node = ObjectReader::new(&mut lines, version, preserve, &mut notifications)
                        .read_object(&line)?;
                    if !node.is_world() {
                        return Err(AcError::structural(
                            line.number,
                            format!("top-level object must be world, found {}", node.kind.keyword()),
                        ));
                    }
                    root = Some(node);
                }
                other => {
                    notifications.notify_at(
                        NotificationType::UnknownDirective,
                        line.number,
                        format!(
                            "unknown file-level directive {:?} {}",
                            other,
                            if preserve { "kept" } else { "dropped" }
                        ),
                    );
                    if preserve {
                        graph.extras.push(PositionedDirective {
                            after_materials: graph.materials.len(),
                            directive: OpaqueDirective::new(other, line.rest.clone()),
                        });
                    }
                }
            }
        }

        graph.root = root.ok_or_else(|| {
            AcError::structural(lines.line(), "file has no world object")
        })?;
        resolve_material_references(&mut graph, &mut notifications);
        graph.notifications = notifications;
        Ok(graph)
    }
}

fn read_header(
    lines: &mut LineReader<'_>,
    notifications: &mut NotificationCollection,
) -> Result<FormatVersion> {
    let line = lines
        .read_line()?
        .ok_or_else(|| AcError::structural(1, "empty input, expected AC3D header"))?;

    let token = match line.tokens.as_slice() {
        [token] => token.raw(),
        _ => {
            return Err(AcError::structural(
                line.number,
                "header line must be a single AC3D token",
            ))
        }
    };
    let version = FormatVersion::parse_header(&token, line.number)?;

    if let Some(revision) = version.declared_revision() {
        if revision < FormatVersion::CURRENT_REVISION {
            notifications.notify_at(
                NotificationType::Warning,
                line.number,
                format!("old revision {}, newer directives will be kept verbatim", version),
            );
        }
    }
    Ok(version)
}

/// Replace out-of-range material indices with the default material.
///
/// The default is reused if an identical one exists, otherwise appended
/// once. Sets [`SceneGraph::repaired`] when anything was replaced.
fn resolve_material_references(graph: &mut SceneGraph, notifications: &mut NotificationCollection) {
    let material_count = graph.materials.len();

    let mut broken = false;
    graph.root.walk(&mut |node, _| {
        if let Some(poly) = node.polygon_data() {
            broken |= poly.surfaces.iter().any(|s| s.material >= material_count);
        }
    });
    if !broken {
        return;
    }

    let default_index = graph.default_material_index();
    graph.root.walk_mut(&mut |node| {
        let name = node.display_name().to_string();
        if let Some(poly) = node.polygon_data_mut() {
            for (index, surface) in poly.surfaces.iter_mut().enumerate() {
                if surface.material < material_count {
                    continue;
                }
                notifications.notify(
                    NotificationType::RepairedReference,
                    format!(
                        "object {:?}, surface {}: material {} out of range ({} materials), using {}",
                        name, index, surface.material, material_count, default_index
                    ),
                );
                surface.material = default_index;
            }
        }
    });
    graph.repaired = true;
}
