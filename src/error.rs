//! Error types for ac3drust library

use std::io;
use thiserror::Error;

/// Main error type for AC3D codec operations
#[derive(Debug, Error)]
pub enum AcError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed token stream (unterminated string, bad numeric literal)
    #[error("Lex error at line {line}: {message}")]
    Lex { line: usize, message: String },

    /// Header, root cardinality, kids count or data length violation
    #[error("Structural error at line {line}: {message}")]
    Structural { line: usize, message: String },

    /// Header revision newer than the supported one
    #[error("Unsupported AC3D version: {0:?}")]
    UnsupportedVersion(String),

    /// MATERIAL line with missing fields or wrong arity
    #[error("Material parse error at line {line}: {message}")]
    MaterialParse { line: usize, message: String },

    /// Arity mismatch inside a numvert/numsurf/SURF/refs block
    #[error("Geometry parse error in object {node:?}{} at line {line}: {message}", surface_suffix(.surface))]
    GeometryParse {
        node: String,
        surface: Option<usize>,
        line: usize,
        message: String,
    },

    /// Surface references a vertex that its node does not have
    #[error("Vertex index {index} out of range in object {node:?}, surface {surface} ({vertex_count} vertices)")]
    VertexReference {
        node: String,
        surface: usize,
        index: usize,
        vertex_count: usize,
    },

    /// Surface references a material that the table does not have
    #[error("Material index {index} out of range in object {node:?}, surface {surface} ({material_count} materials)")]
    MaterialReference {
        node: String,
        surface: usize,
        index: usize,
        material_count: usize,
    },

    /// A value or tree shape that cannot be represented in the format
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

fn surface_suffix(surface: &Option<usize>) -> String {
    match surface {
        Some(index) => format!(", surface {}", index),
        None => String::new(),
    }
}

impl AcError {
    /// Build a lexer error
    pub fn lex(line: usize, message: impl Into<String>) -> Self {
        AcError::Lex {
            line,
            message: message.into(),
        }
    }

    /// Build a structural error
    pub fn structural(line: usize, message: impl Into<String>) -> Self {
        AcError::Structural {
            line,
            message: message.into(),
        }
    }

    /// Line number the error points at, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            AcError::Lex { line, .. }
            | AcError::Structural { line, .. }
            | AcError::MaterialParse { line, .. }
            | AcError::GeometryParse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for ac3drust operations
pub type Result<T> = std::result::Result<T, AcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AcError::UnsupportedVersion("AC3Dc".to_string());
        assert_eq!(err.to_string(), "Unsupported AC3D version: \"AC3Dc\"");
    }

    #[test]
    fn test_geometry_error_names_node_and_surface() {
        let err = AcError::GeometryParse {
            node: "cube".to_string(),
            surface: Some(3),
            line: 42,
            message: "expected 3 values".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("\"cube\""));
        assert!(text.contains("surface 3"));
        assert!(text.contains("line 42"));
        assert_eq!(err.line(), Some(42));
    }

    #[test]
    fn test_geometry_error_without_surface() {
        let err = AcError::GeometryParse {
            node: "cube".to_string(),
            surface: None,
            line: 7,
            message: "short vertex line".to_string(),
        };
        assert!(!err.to_string().contains("surface"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: AcError = io_err.into();
        assert!(matches!(err, AcError::Io(_)));
        assert_eq!(err.line(), None);
    }
}
