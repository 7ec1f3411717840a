//! Local object transforms
//!
//! An AC3D object carries an optional `rot` (3x3, row-major) and an optional
//! `loc` (translation relative to the parent). Presence is tracked so that a
//! file that omits them is written back without them.

use nalgebra::{Matrix3, Matrix4, Vector3};
use std::ops::Mul;

/// Rotation + translation of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// `rot` directive; `None` means identity
    pub rotation: Option<Matrix3<f64>>,
    /// `loc` directive; `None` means zero
    pub translation: Option<Vector3<f64>>,
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self {
            rotation: None,
            translation: None,
        }
    }

    /// Create translation transform
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            rotation: None,
            translation: Some(translation),
        }
    }

    /// Create rotation transform
    pub fn from_rotation(rotation: Matrix3<f64>) -> Self {
        Self {
            rotation: Some(rotation),
            translation: None,
        }
    }

    /// Create a rotation from the nine row-major values of a `rot` directive
    pub fn rotation_from_row_major(values: &[f64; 9]) -> Matrix3<f64> {
        Matrix3::from_row_slice(values)
    }

    /// The rotation as nine row-major values, ready for a `rot` directive
    pub fn rotation_row_major(rotation: &Matrix3<f64>) -> [f64; 9] {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = rotation[(row, col)];
            }
        }
        out
    }

    /// Effective rotation
    pub fn rotation_or_identity(&self) -> Matrix3<f64> {
        self.rotation.unwrap_or_else(Matrix3::identity)
    }

    /// Effective translation
    pub fn translation_or_zero(&self) -> Vector3<f64> {
        self.translation.unwrap_or_else(Vector3::zeros)
    }

    /// Homogeneous matrix mapping local points into the parent's space
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let mut m = self.rotation_or_identity().to_homogeneous();
        let t = self.translation_or_zero();
        m[(0, 3)] = t.x;
        m[(1, 3)] = t.y;
        m[(2, 3)] = t.z;
        m
    }

    /// Apply transform to a point
    pub fn apply(&self, point: Vector3<f64>) -> Vector3<f64> {
        self.rotation_or_identity() * point + self.translation_or_zero()
    }

    /// Check if transform is identity, whether or not directives are present
    pub fn is_identity(&self) -> bool {
        self.rotation_or_identity() == Matrix3::identity()
            && self.translation_or_zero() == Vector3::zeros()
    }
}

impl Mul<Vector3<f64>> for &Transform {
    type Output = Vector3<f64>;

    fn mul(self, rhs: Vector3<f64>) -> Vector3<f64> {
        self.apply(rhs)
    }
}
