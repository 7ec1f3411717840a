//! OBJECT block reader (recursive descent over the node tree)

use super::geometry_reader::GeometryReader;
use super::lexer::{Line, Token};
use super::line_reader::{
    check_numbers, exact_numbers, token_count, token_number, token_text, LineReader,
};
use crate::error::{AcError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::scene::{
    AnchoredDirective, NodeKind, OpaqueDirective, SceneNode, SurfaceType,
};
use crate::types::{Directive, FormatVersion, Transform, Vector2, Vector3};

/// Reads one `OBJECT` block and, recursively, its children.
pub struct ObjectReader<'r, 'a> {
    lines: &'r mut LineReader<'a>,
    version: FormatVersion,
    preserve_unknown: bool,
    notifications: &'r mut NotificationCollection,
}

impl<'r, 'a> ObjectReader<'r, 'a> {
    pub fn new(
        lines: &'r mut LineReader<'a>,
        version: FormatVersion,
        preserve_unknown: bool,
        notifications: &'r mut NotificationCollection,
    ) -> Self {
        Self {
            lines,
            version,
            preserve_unknown,
            notifications,
        }
    }

    /// Read the object whose `OBJECT <type>` line has just been consumed.
    pub fn read_object(&mut self, header: &Line) -> Result<SceneNode> {
        let kind = match header.args() {
            [token] => token
                .as_text()
                .and_then(|t| NodeKind::from_keyword(t.trim_matches('"')))
                .ok_or_else(|| {
                    AcError::structural(
                        header.number,
                        format!("unknown object type {:?}", token.raw()),
                    )
                })?,
            _ => {
                return Err(AcError::structural(
                    header.number,
                    "expected `OBJECT <type>`",
                ))
            }
        };

        let mut node = SceneNode::new(kind);
        let kids = self.read_body(&mut node, header.number)?;
        self.check_references(&node, header.number)?;

        for read in 0..kids {
            let line = match self.lines.read_line()? {
                Some(line) if line.keyword() == Some("OBJECT") => line,
                other => {
                    let at = other.map_or(self.lines.line(), |l| l.number);
                    return Err(AcError::structural(
                        at,
                        format!(
                            "object {:?} declares kids {} but only {} OBJECT block(s) follow",
                            node.display_name(),
                            kids,
                            read
                        ),
                    ));
                }
            };
            let child = self.read_object(&line)?;
            if child.is_world() {
                return Err(AcError::structural(
                    line.number,
                    "world object is only allowed at the top level",
                ));
            }
            node.children.push(child);
        }

        Ok(node)
    }

    /// Read directives up to and including `kids`; returns the kids count.
    fn read_body(&mut self, node: &mut SceneNode, header_line: usize) -> Result<usize> {
        let mut anchor: Option<Directive> = None;

        loop {
            let line = match self.lines.read_line()? {
                Some(line) => line,
                None => {
                    self.missing_kids(node, header_line);
                    return Ok(0);
                }
            };

            let keyword = match line.keyword() {
                Some(keyword) => keyword.to_string(),
                None => {
                    return Err(AcError::structural(
                        line.number,
                        format!(
                            "expected a directive in object {:?}, found {:?}",
                            node.display_name(),
                            line.tokens.first().map(Token::raw).unwrap_or_default()
                        ),
                    ))
                }
            };

            if keyword == "OBJECT" || keyword == "MATERIAL" {
                self.lines.push_back(line);
                self.missing_kids(node, header_line);
                return Ok(0);
            }

            let directive = Directive::from_keyword(&keyword)
                .filter(|d| self.version.supports(*d))
                .filter(|d| *d != Directive::Crease || node.polygon_data().is_some());

            match directive {
                Some(Directive::Kids) => {
                    check_numbers(line.args(), line.number)?;
                    return single_arg(&line)
                        .and_then(token_count)
                        .ok_or_else(|| arity_error(&line, "kids expects one non-negative integer"));
                }
                Some(directive) => {
                    self.read_directive(node, directive, &line)?;
                    anchor = Some(directive);
                }
                None => self.keep_unknown(node, anchor, keyword, &line),
            }
        }
    }

    fn read_directive(&mut self, node: &mut SceneNode, directive: Directive, line: &Line) -> Result<()> {
        if !matches!(directive, Directive::Name | Directive::Texture | Directive::Url) {
            check_numbers(line.args(), line.number)?;
        }
        match directive {
            Directive::Name => {
                let name = single_arg(line).map(token_text);
                node.name = Some(name.ok_or_else(|| arity_error(line, "name expects one string"))?);
            }
            Directive::Data => {
                let len = single_arg(line)
                    .and_then(token_count)
                    .ok_or_else(|| arity_error(line, "data expects a byte count"))?;
                node.data = Some(self.lines.read_raw(len)?);
            }
            Directive::Texture => {
                let path = single_arg(line).map(token_text);
                node.texture = Some(path.ok_or_else(|| arity_error(line, "texture expects one path"))?);
            }
            Directive::TexRep => {
                let [u, v] = exact_numbers::<2>(line.args())
                    .ok_or_else(|| arity_error(line, "texrep expects 2 numbers"))?;
                node.texture_repeat = Some(Vector2::new(u, v));
            }
            Directive::TexOff => {
                let [u, v] = exact_numbers::<2>(line.args())
                    .ok_or_else(|| arity_error(line, "texoff expects 2 numbers"))?;
                node.texture_offset = Some(Vector2::new(u, v));
            }
            Directive::Subdiv => {
                let level = single_arg(line)
                    .and_then(token_count)
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| arity_error(line, "subdiv expects one non-negative integer"))?;
                node.subdiv = Some(level);
            }
            Directive::Crease => {
                let angle = single_arg(line)
                    .and_then(token_number)
                    .ok_or_else(|| arity_error(line, "crease expects one number"))?;
                if let Some(poly) = node.polygon_data_mut() {
                    poly.crease = Some(angle);
                }
            }
            Directive::Rot => {
                let values = exact_numbers::<9>(line.args())
                    .ok_or_else(|| arity_error(line, "rot expects 9 numbers"))?;
                node.transform.rotation = Some(Transform::rotation_from_row_major(&values));
            }
            Directive::Loc => {
                let [x, y, z] = exact_numbers::<3>(line.args())
                    .ok_or_else(|| arity_error(line, "loc expects 3 numbers"))?;
                node.transform.translation = Some(Vector3::new(x, y, z));
            }
            Directive::Url => {
                let url = single_arg(line).map(token_text);
                node.url = Some(url.ok_or_else(|| arity_error(line, "url expects one string"))?);
            }
            Directive::NumVert | Directive::NumSurf => {
                let count = single_arg(line)
                    .and_then(token_count)
                    .ok_or_else(|| arity_error(line, "expected one non-negative count"))?;
                let name = node.display_name().to_string();
                let poly = node.polygon_data_mut().ok_or_else(|| {
                    AcError::structural(
                        line.number,
                        format!("{} in a non-poly object {:?}", directive.keyword(), name),
                    )
                })?;
                let mut geometry = GeometryReader::new(self.lines, &name);
                if directive == Directive::NumVert {
                    poly.vertices = geometry.read_vertices(count)?;
                } else {
                    poly.surfaces = geometry.read_surfaces(count)?;
                }
            }
            Directive::Kids => {}
        }
        Ok(())
    }

    fn keep_unknown(&mut self, node: &mut SceneNode, anchor: Option<Directive>, keyword: String, line: &Line) {
        let verb = if self.preserve_unknown { "kept" } else { "dropped" };
        self.notifications.notify_at(
            NotificationType::UnknownDirective,
            line.number,
            format!("object {:?}: unknown directive {:?} {}", node.display_name(), keyword, verb),
        );
        if self.preserve_unknown {
            node.extras.push(AnchoredDirective {
                after: anchor,
                directive: OpaqueDirective::new(keyword, line.rest.clone()),
            });
        }
    }

    fn missing_kids(&mut self, node: &SceneNode, header_line: usize) {
        self.notifications.notify_at(
            NotificationType::Warning,
            header_line,
            format!("object {:?} has no kids directive, assuming 0", node.display_name()),
        );
    }

    /// Node finalization: every vertex reference must resolve; degenerate
    /// surfaces are reported and kept.
    fn check_references(&mut self, node: &SceneNode, header_line: usize) -> Result<()> {
        let poly = match node.polygon_data() {
            Some(poly) => poly,
            None => return Ok(()),
        };
        let name = node.display_name();
        let vertex_count = poly.vertices.len();

        for (index, surface) in poly.surfaces.iter().enumerate() {
            if let Some(bad) = surface.refs.iter().find(|r| r.vertex >= vertex_count) {
                return Err(AcError::VertexReference {
                    node: name.to_string(),
                    surface: index,
                    index: bad.vertex,
                    vertex_count,
                });
            }

            if !surface.is_degenerate() {
                continue;
            }
            let message = match (surface.surface_type(), surface.refs.len()) {
                (Some(SurfaceType::Polygon), 2) => format!(
                    "object {:?}, surface {}: polygon with 2 refs treated as a degenerate two-sided edge",
                    name, index
                ),
                (_, count) => format!(
                    "object {:?}, surface {}: only {} ref(s)",
                    name, index, count
                ),
            };
            self.notifications
                .notify_at(NotificationType::DegenerateGeometry, header_line, message);
        }
        Ok(())
    }
}

fn single_arg(line: &Line) -> Option<&Token> {
    match line.args() {
        [token] => Some(token),
        _ => None,
    }
}

fn arity_error(line: &Line, message: &str) -> AcError {
    AcError::structural(line.number, message)
}
