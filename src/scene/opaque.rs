//! Directives kept verbatim for round trips
//!
//! Anything syntactically valid that the codec does not model (a directive
//! from a newer revision, a vendor extension) is stored here together with
//! the place it was found, and written back at the same place.

use crate::types::Directive;

/// A directive line the codec does not interpret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueDirective {
    /// First token of the line
    pub keyword: String,
    /// Remainder of the line as it appeared in the file, trimmed
    pub rest: String,
}

impl OpaqueDirective {
    pub fn new(keyword: impl Into<String>, rest: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            rest: rest.into(),
        }
    }

    /// Full line text
    pub fn raw(&self) -> String {
        if self.rest.is_empty() {
            self.keyword.clone()
        } else {
            format!("{} {}", self.keyword, self.rest)
        }
    }
}

/// Opaque directive inside an `OBJECT` body.
///
/// `after` names the last modelled directive read before it; `None` means
/// it came straight after the `OBJECT` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredDirective {
    pub after: Option<Directive>,
    pub directive: OpaqueDirective,
}

/// Opaque directive at file level, placed after `after_materials` materials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedDirective {
    pub after_materials: usize,
    pub directive: OpaqueDirective,
}
