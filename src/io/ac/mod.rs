//! AC3D (`.ac`) reading and writing

mod reader;
mod writer;

pub use reader::{AcReader, AcReaderConfiguration, Lexer, Line, SpannedToken, Token};
pub use writer::{
    format_flags, format_number, quote, AcTextWriter, AcWriter, SceneWriter, WriteOptions,
};

use crate::error::Result;
use crate::scene::SceneGraph;
use rayon::prelude::*;

/// Parse an in-memory `.ac` file with the default configuration
pub fn parse(input: &[u8]) -> Result<SceneGraph> {
    AcReader::from_bytes(input).read()
}

/// Serialize a scene graph to `.ac` text
pub fn write(graph: &SceneGraph, options: &WriteOptions) -> Result<Vec<u8>> {
    AcWriter::new(graph).with_options(options.clone()).write_to_vec()
}

/// Parse several independent files in parallel; results keep input order
pub fn parse_many(inputs: &[&[u8]]) -> Vec<Result<SceneGraph>> {
    inputs.par_iter().map(|input| parse(input)).collect()
}

/// Read, then write back with default options
pub fn roundtrip(input: &[u8]) -> Result<Vec<u8>> {
    let graph = parse(input)?;
    write(&graph, &WriteOptions::default())
}
