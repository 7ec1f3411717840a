//! Core value types shared by the scene model and the codec

pub mod color;
pub mod transform;
pub mod version;

pub use color::Rgb;
pub use transform::Transform;
pub use version::{Directive, FormatVersion};

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3};
