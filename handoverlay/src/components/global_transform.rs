use glam::{Affine3A, Quat, Vec3};

use super::LocalTransform;

/// Component used to represent the transform of a bound model in the renderer.
/// This is the transformation from model space to scene space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform(pub Affine3A);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Affine3A::IDENTITY)
    }
}

impl GlobalTransform {
    /// Convenience function to decompose the [`GlobalTransform`] into its components
    pub fn to_scale_rotation_translation(&self) -> (Vec3, Quat, Vec3) {
        self.0.to_scale_rotation_translation()
    }
}

impl From<LocalTransform> for GlobalTransform {
    fn from(l: LocalTransform) -> Self {
        GlobalTransform(l.to_affine())
    }
}
