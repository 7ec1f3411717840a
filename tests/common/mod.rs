//! Shared test utilities for ac3drust integration tests.
//!
//! Read/write helpers, sample files and output paths used by every test
//! crate via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use ac3drust::io::ac::{parse, write, AcReader, AcReaderConfiguration, WriteOptions};
use ac3drust::SceneGraph;
use std::path::PathBuf;

// ===========================================================================
// Sample files
// ===========================================================================

/// The single-triangle file used throughout the format description.
pub const CUBE_SAMPLE: &str = "AC3D
MATERIAL \"DefaultWhite\" rgb 1 1 1 amb 1 1 1 emis 0 0 0 spec 0.5 0.5 0.5 shi 10 trans 0
OBJECT world
kids 1
OBJECT poly
name \"cube\"
numvert 3
0 0 0
1 0 0
0 1 0
numsurf 1
SURF 0x00
mat 0
refs 3
0 0 0
1 1 0
2 0 1
kids 0
";

/// A richer file: hierarchy, transforms, textures, data block, lines,
/// an unknown object directive and an unknown file-level directive.
pub const RICH_SAMPLE: &str = "AC3Db
MATERIAL \"red\" rgb 1 0 0 amb 0.2 0.2 0.2 emis 0 0 0 spec 0.5 0.5 0.5 shi 32 trans 0
PALETTE 4
MATERIAL \"glass\" rgb 0.8 0.9 1 amb 0.2 0.2 0.2 emis 0 0 0 spec 1 1 1 shi 128 trans 0.6 refl 0.3
OBJECT world
name \"scene\"
kids 2
OBJECT group
name \"car\"
loc 10 0 -2.5
kids 1
OBJECT poly
name \"body\"
data 12
hello
world!
texture \"body.png\"
texrep 2 2
texoff 0.5 0
subdiv 1
crease 30
shader \"toon\" 3
rot 0 -1 0 1 0 0 0 0 1
url \"http://example.com/car\"
numvert 4
0 0 0
1 0 0
1 1 0
0 1 0
numsurf 2
SURF 0x30
mat 1
refs 4
0 0 0
1 1 0
2 1 1
3 0 1
SURF 0x02
mat 0
refs 3
0 0 0
1 0 0
2 0 0
kids 0
OBJECT light
name \"sun\"
loc 0 10 0
kids 0
";

// ===========================================================================
// Path helpers
// ===========================================================================

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

// ===========================================================================
// Read / write helpers
// ===========================================================================

/// Parse text, panicking with the error on failure.
pub fn read_str(text: &str) -> SceneGraph {
    parse(text.as_bytes()).unwrap_or_else(|e| panic!("parse failed: {e}"))
}

/// Parse with preservation of unknown fields switched off.
pub fn read_str_dropping_unknown(text: &str) -> SceneGraph {
    let config = AcReaderConfiguration {
        preserve_unknown_fields: false,
        ..Default::default()
    };
    AcReader::from_bytes(text.as_bytes())
        .with_configuration(config)
        .read()
        .unwrap_or_else(|e| panic!("parse failed: {e}"))
}

/// Write with default options and return the text.
pub fn write_str(scene: &SceneGraph) -> String {
    write_str_with(scene, &WriteOptions::default())
}

pub fn write_str_with(scene: &SceneGraph, options: &WriteOptions) -> String {
    let bytes = write(scene, options).unwrap_or_else(|e| panic!("write failed: {e}"));
    String::from_utf8(bytes).expect("writer output is UTF-8")
}

/// Write, then read back.
pub fn roundtrip(scene: &SceneGraph) -> SceneGraph {
    read_str(&write_str(scene))
}

/// Lines of `text`, ignoring surrounding whitespace and blank lines.
pub fn normalized_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect()
}
