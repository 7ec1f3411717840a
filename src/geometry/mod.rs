//! Geometry reconstruction
//!
//! Converts the vertex and surface records of a `poly` node into faces and
//! lines a host can consume ([`decode`]), and back ([`encode`]). Nodes are
//! independent coordinate spaces: nothing is shared or merged across nodes.

mod decode;
mod encode;
mod primitive;

pub use decode::decode;
pub use encode::{encode, encode_into, EncodedGeometry};
pub use primitive::{Corner, Face, MeshPrimitives, Polyline, Primitive};
