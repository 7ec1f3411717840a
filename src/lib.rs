//! # ac3drust
//!
//! A pure Rust library for reading and writing AC3D (`.ac`) scene files.
//!
//! The crate is a codec between `.ac` text and a neutral, host-independent
//! scene graph: a material table plus a tree of `world`, `group`, `poly` and
//! `light` objects. Anything the format allows that the model does not
//! interpret is kept verbatim so that it survives a read/write cycle.
//!
//! ## Features
//!
//! - Read and write AC3D files (revisions up to `AC3Db`)
//! - Materials, object hierarchy, transforms, textures, vertex/surface data
//! - Faithful round trips, including unknown directives and `data` blocks
//! - Conversion of surface records to host-neutral faces and lines, and back
//! - Non-fatal diagnostics (degenerate surfaces, repaired references)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ac3drust::io::ac::{AcReader, AcWriter};
//!
//! // Read an AC3D file
//! let scene = AcReader::from_file("model.ac")?.read()?;
//!
//! for notification in &scene.notifications {
//!     println!("{}", notification);
//! }
//!
//! // Decode the first object into faces and lines
//! let (mesh, _) = ac3drust::geometry::decode(&scene.root.children[0])?;
//! println!("{} faces", mesh.faces().count());
//!
//! // Write it back
//! AcWriter::new(&scene).write_to_file("out.ac")?;
//! # Ok::<(), ac3drust::error::AcError>(())
//! ```
//!
//! ## Architecture
//!
//! - `io::ac` - lexer, readers and writers for the text format
//! - `scene` - the scene graph shared by both directions
//! - `geometry` - faces/lines for hosts, built from surface records
//! - `notification` - diagnostics returned alongside a successful read

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod scene;
pub mod types;

// Re-export commonly used types
pub use error::{AcError, Result};
pub use types::{Directive, FormatVersion, Rgb, Transform, Vector2, Vector3};

// Re-export scene types
pub use scene::{
    Material, NodeKind, PolygonData, SceneGraph, SceneNode, Surface, SurfaceFlags, SurfaceRef,
    SurfaceType,
};

// Re-export I/O types
pub use io::ac::{parse, parse_many, write, AcReader, AcReaderConfiguration, AcWriter, WriteOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
