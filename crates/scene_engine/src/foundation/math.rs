//! Math types used by game objects
//!
//! The scene only needs local transforms and their composition; everything
//! else comes straight from nalgebra.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Unit quaternion for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local position, rotation and scale of a game object
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation relative to the parent
    pub rotation: Quat,

    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Transform from its three parts
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Identity transform: origin, no rotation, unit scale
    pub fn identity() -> Self {
        Self::default()
    }

    /// Identity transform moved to `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Move by `offset` in parent space
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Apply `rotation` after the current rotation
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = rotation * self.rotation;
    }

    /// Scale, then rotate, then translate
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// `self` applied on top of `child`: a child transform expressed in the parent's space
    ///
    /// Exact for uniform scale; non-uniform scale combined with rotation
    /// cannot be represented as a single `Transform`.
    pub fn combine(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * self.scale.component_mul(&child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }
}
