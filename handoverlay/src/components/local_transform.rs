use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The transform of a bound model in scene space.
///
/// Rotation is kept as XYZ Euler angles in radians, since that's the form the pose mapper produces
/// and the form models are configured with. Hand poses only ever rotate about Z.
///
/// Written by `hand_models_system` each frame a matching hand is detected, and composed into a
/// [`super::GlobalTransform`] by `update_global_transform_system`.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct LocalTransform {
    /// The translation of the model
    pub translation: Vec3,
    /// The rotation of the model, as XYZ Euler angles in radians
    pub rotation: Vec3,
    /// The scale of the model
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Create a transform from its parts
    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// The rotation as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Convenience function to convert the [`LocalTransform`] into a [`glam::Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            self.rotation_quat(),
            self.translation,
        )
    }

    /// Set the translation
    pub fn set_position(&mut self, position: Vec3) {
        self.translation = position;
    }

    /// Set the rotation, as XYZ Euler angles in radians
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Are all of the components finite?
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}
