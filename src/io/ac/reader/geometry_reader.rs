//! numvert / numsurf / SURF / refs blocks of a `poly` object

use super::lexer::{Line, Token};
use super::line_reader::{check_numbers, exact_numbers, token_count, token_number, LineReader};
use crate::error::{AcError, Result};
use crate::scene::{Surface, SurfaceFlags, SurfaceRef, SurfaceType};
use crate::types::Vector3;

/// Cap on the capacity reserved from a declared count
const PREALLOCATION_LIMIT: usize = 1024;

/// Reads the geometry records of one node.
pub struct GeometryReader<'r, 'a> {
    lines: &'r mut LineReader<'a>,
    node: &'r str,
}

impl<'r, 'a> GeometryReader<'r, 'a> {
    pub fn new(lines: &'r mut LineReader<'a>, node: &'r str) -> Self {
        Self { lines, node }
    }

    fn error(&self, surface: Option<usize>, line: usize, message: impl Into<String>) -> AcError {
        AcError::GeometryParse {
            node: self.node.to_string(),
            surface,
            line,
            message: message.into(),
        }
    }

    fn next_line(&mut self, surface: Option<usize>, what: &str) -> Result<Line> {
        match self.lines.read_line()? {
            Some(line) => Ok(line),
            None => {
                let line = self.lines.line();
                Err(self.error(surface, line, format!("end of input while reading {}", what)))
            }
        }
    }

    /// Read `count` vertex lines of exactly three numbers each
    pub fn read_vertices(&mut self, count: usize) -> Result<Vec<Vector3<f64>>> {
        let mut vertices = Vec::with_capacity(count.min(PREALLOCATION_LIMIT));
        for index in 0..count {
            let line = self.next_line(None, &format!("vertex {} of {}", index, count))?;
            check_numbers(&line.tokens, line.number)?;
            let [x, y, z] = exact_numbers::<3>(&line.tokens).ok_or_else(|| {
                self.error(
                    None,
                    line.number,
                    format!("vertex {}: expected 3 numbers, found {} token(s)", index, line.tokens.len()),
                )
            })?;
            vertices.push(Vector3::new(x, y, z));
        }
        Ok(vertices)
    }

    /// Read `count` SURF blocks
    pub fn read_surfaces(&mut self, count: usize) -> Result<Vec<Surface>> {
        let mut surfaces = Vec::with_capacity(count.min(PREALLOCATION_LIMIT));
        for index in 0..count {
            surfaces.push(self.read_surface(index)?);
        }
        Ok(surfaces)
    }

    fn read_surface(&mut self, index: usize) -> Result<Surface> {
        let at = Some(index);

        let line = self.next_line(at, "SURF")?;
        let flags = match (line.keyword(), line.args()) {
            (Some("SURF"), [arg]) => parse_flags(arg)
                .ok_or_else(|| self.error(at, line.number, format!("invalid SURF flags {:?}", arg.raw())))?,
            _ => return Err(self.error(at, line.number, "expected `SURF <flags>`")),
        };
        let surface_type = flags.surface_type().ok_or_else(|| {
            self.error(at, line.number, format!("undefined surface type in flags {:#x}", flags.bits()))
        })?;

        let mut surface = Surface::new(flags, 0);

        let mut line = self.next_line(at, "mat/refs")?;
        if line.keyword() == Some("mat") {
            check_numbers(line.args(), line.number)?;
            surface.material = match line.args() {
                [arg] => token_count(arg),
                _ => None,
            }
            .ok_or_else(|| self.error(at, line.number, "mat expects one non-negative integer"))?;
            line = self.next_line(at, "refs")?;
        }

        let ref_count = match (line.keyword(), line.args()) {
            (Some("refs"), [arg]) => {
                check_numbers(line.args(), line.number)?;
                token_count(arg)
                    .ok_or_else(|| self.error(at, line.number, "refs expects one non-negative integer"))?
            }
            _ => return Err(self.error(at, line.number, "expected `refs <count>`")),
        };

        surface.refs.reserve(ref_count.min(PREALLOCATION_LIMIT));
        for n in 0..ref_count {
            let line = self.next_line(at, &format!("ref {} of {}", n, ref_count))?;
            check_numbers(&line.tokens, line.number)?;
            let parsed = parse_ref(&line.tokens, surface_type);
            let surface_ref = parsed.ok_or_else(|| {
                self.error(
                    at,
                    line.number,
                    format!("ref {}: expected `<vertex> <u> <v>`, found {} token(s)", n, line.tokens.len()),
                )
            })?;
            surface.refs.push(surface_ref);
        }

        Ok(surface)
    }
}

/// SURF flags are hexadecimal, with or without `0x`
fn parse_flags(token: &Token) -> Option<SurfaceFlags> {
    let raw = token.raw();
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(&raw);
    u32::from_str_radix(digits, 16)
        .ok()
        .map(SurfaceFlags::from_bits_retain)
}

/// Polygons need `index u v`; lines accept a bare index and drop any UV.
fn parse_ref(tokens: &[Token], surface_type: SurfaceType) -> Option<SurfaceRef> {
    let vertex = token_count(tokens.first()?)?;
    match (surface_type.is_line(), tokens.len()) {
        (true, 1) => Some(SurfaceRef::untextured(vertex)),
        (true, 3) => {
            token_number(&tokens[1])?;
            token_number(&tokens[2])?;
            Some(SurfaceRef::untextured(vertex))
        }
        (false, 3) => Some(SurfaceRef::new(
            vertex,
            token_number(&tokens[1])?,
            token_number(&tokens[2])?,
        )),
        _ => None,
    }
}
