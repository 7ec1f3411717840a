//! AC3D format revision and the directives each revision understands
//!
//! The header line is `AC3D` followed by a single hexadecimal revision digit
//! (`AC3Db` is revision 11, the current one). Which object directives a file
//! may use depends on that revision; the mapping lives in one table instead of
//! being spread across the reader.

use crate::error::{AcError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;

const MAGIC: &str = "AC3D";

/// Directives that may appear inside an `OBJECT` body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Directive {
    Name,
    Data,
    Texture,
    TexRep,
    TexOff,
    Subdiv,
    Crease,
    Rot,
    Loc,
    Url,
    NumVert,
    NumSurf,
    Kids,
}

impl Directive {
    /// Every directive, in the order the writer emits them
    pub const ALL: [Directive; 13] = [
        Directive::Name,
        Directive::Data,
        Directive::Texture,
        Directive::TexRep,
        Directive::TexOff,
        Directive::Subdiv,
        Directive::Crease,
        Directive::Rot,
        Directive::Loc,
        Directive::Url,
        Directive::NumVert,
        Directive::NumSurf,
        Directive::Kids,
    ];

    /// Look up a directive by its keyword (case-sensitive, as in the format)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.keyword() == keyword)
    }

    /// Keyword as written in the file
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Name => "name",
            Directive::Data => "data",
            Directive::Texture => "texture",
            Directive::TexRep => "texrep",
            Directive::TexOff => "texoff",
            Directive::Subdiv => "subdiv",
            Directive::Crease => "crease",
            Directive::Rot => "rot",
            Directive::Loc => "loc",
            Directive::Url => "url",
            Directive::NumVert => "numvert",
            Directive::NumSurf => "numsurf",
            Directive::Kids => "kids",
        }
    }
}

/// First revision that understands each directive.
static DIRECTIVE_REVISIONS: Lazy<IndexMap<Directive, u8>> = Lazy::new(|| {
    let mut table = IndexMap::new();
    for directive in Directive::ALL {
        let since = match directive {
            Directive::TexOff | Directive::Subdiv | Directive::Crease => 0xb,
            _ => 0x0,
        };
        table.insert(directive, since);
    }
    table
});

/// Revision of an AC3D file, as declared by its header.
///
/// A bare `AC3D` header (no revision digit) is accepted and treated as the
/// current revision; it is written back bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatVersion {
    revision: Option<u8>,
}

impl FormatVersion {
    /// Latest revision the codec reads and writes (`b`)
    pub const CURRENT_REVISION: u8 = 0xb;

    /// Current revision with an explicit digit (`AC3Db`)
    pub const fn current() -> Self {
        Self {
            revision: Some(Self::CURRENT_REVISION),
        }
    }

    /// Header without revision digit (`AC3D`)
    pub const fn bare() -> Self {
        Self { revision: None }
    }

    /// Explicit revision; fails for revisions newer than the current one
    pub fn with_revision(revision: u8) -> Result<Self> {
        if revision > Self::CURRENT_REVISION {
            return Err(AcError::UnsupportedVersion(format!("{}{:x}", MAGIC, revision)));
        }
        Ok(Self {
            revision: Some(revision),
        })
    }

    /// Parse the header token (`AC3Db`, `AC3D`, ...)
    pub fn parse_header(token: &str, line: usize) -> Result<Self> {
        let rest = token.strip_prefix(MAGIC).ok_or_else(|| {
            AcError::structural(line, format!("missing AC3D header, found {:?}", token))
        })?;

        if rest.is_empty() {
            return Ok(Self::bare());
        }

        let mut chars = rest.chars();
        match (chars.next().and_then(|c| c.to_digit(16)), chars.next()) {
            (Some(digit), None) => Self::with_revision(digit as u8),
            _ => Err(AcError::structural(
                line,
                format!("malformed AC3D header {:?}", token),
            )),
        }
    }

    /// Declared revision digit, if any
    pub fn declared_revision(&self) -> Option<u8> {
        self.revision
    }

    /// Revision used to decide which directives are understood
    pub fn effective_revision(&self) -> u8 {
        self.revision.unwrap_or(Self::CURRENT_REVISION)
    }

    /// Whether this revision understands the directive
    pub fn supports(&self, directive: Directive) -> bool {
        DIRECTIVE_REVISIONS
            .get(&directive)
            .map_or(false, |since| self.effective_revision() >= *since)
    }

    /// Header token to write
    pub fn header(&self) -> String {
        match self.revision {
            Some(revision) => format!("{}{:x}", MAGIC, revision),
            None => MAGIC.to_string(),
        }
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header())
    }
}
