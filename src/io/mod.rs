//! I/O module for reading and writing AC3D files

pub mod ac;

pub use ac::{AcReader, AcReaderConfiguration, AcWriter, WriteOptions};
