use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    components::{Landmark, LandmarkIdx, LocalTransform},
    HandOverlayError, HandOverlayResult,
};

/// Number of landmarks needed to address the wrist, thumb tip and index fingertip
pub const REQUIRED_LANDMARKS: usize = LandmarkIdx::IndexFingerTip as usize + 1;

/// Multiplier from the palm-to-pinch distance (in normalised image units) to model scale
pub const DEFAULT_SCALE_FACTOR: f32 = 0.05;
/// Offset added to the hand's angle so a model's "up" lines up with the pinch
pub const DEFAULT_ROTATION_OFFSET: f32 = -FRAC_PI_2;
/// Width of the scene range that `[0, 1]` image coordinates are mapped onto
pub const DEFAULT_POSITION_RANGE: f32 = 2.0;
/// Multiplier from landmark depth to scene depth
pub const DEFAULT_DEPTH_SCALE: f32 = 2.0;

/// The visually tuned constants used when mapping a hand onto a model.
///
/// Every field has a default, so a configuration only needs to name the ones it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConstants {
    /// See [`DEFAULT_SCALE_FACTOR`]
    pub scale_factor: f32,
    /// See [`DEFAULT_ROTATION_OFFSET`]
    pub rotation_offset: f32,
    /// See [`DEFAULT_POSITION_RANGE`]
    pub position_range: f32,
    /// See [`DEFAULT_DEPTH_SCALE`]
    pub depth_scale: f32,
}

impl Default for PoseConstants {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            rotation_offset: DEFAULT_ROTATION_OFFSET,
            position_range: DEFAULT_POSITION_RANGE,
            depth_scale: DEFAULT_DEPTH_SCALE,
        }
    }
}

impl PoseConstants {
    /// Check that these constants can only ever produce finite, non-negative scales
    pub fn validate(&self) -> HandOverlayResult<()> {
        let all = [
            ("scale_factor", self.scale_factor),
            ("rotation_offset", self.rotation_offset),
            ("position_range", self.position_range),
            ("depth_scale", self.depth_scale),
        ];
        if let Some((name, value)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HandOverlayError::InvalidConfig(format!(
                "pose constant {name} must be finite, got {value}"
            )));
        }
        if self.scale_factor < 0.0 {
            return Err(HandOverlayError::InvalidConfig(format!(
                "pose constant scale_factor must not be negative, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}

/// Maps a hand's landmarks onto a model transform.
///
/// - The wrist sets the position: image space `[0, 1]` becomes scene space `[-1, 1]`, with `y`
///   flipped so moving a hand up the screen moves the model up, and depth flipped so a hand moving
///   toward the camera moves the model toward the viewer.
/// - The direction from the wrist to the midpoint of the thumb tip and index fingertip sets the
///   rotation about Z.
/// - The length of that same vector sets a uniform scale.
///
/// Mapping is pure, so a `PoseMapper` can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseMapper {
    constants: PoseConstants,
}

impl PoseMapper {
    /// Create a mapper with custom constants
    pub fn new(constants: PoseConstants) -> HandOverlayResult<Self> {
        constants.validate()?;
        Ok(Self { constants })
    }

    /// The constants this mapper was created with
    pub fn constants(&self) -> &PoseConstants {
        &self.constants
    }

    /// Compute the transform of a model bound to a hand with these landmarks.
    ///
    /// Fails with [`HandOverlayError::InvalidLandmarkSet`] if there are too few landmarks to
    /// address the index fingertip.
    pub fn compute_transform(&self, landmarks: &[Landmark]) -> HandOverlayResult<LocalTransform> {
        if landmarks.len() < REQUIRED_LANDMARKS {
            return Err(HandOverlayError::InvalidLandmarkSet {
                len: landmarks.len(),
                required: REQUIRED_LANDMARKS,
            });
        }

        let palm = landmarks[LandmarkIdx::Wrist as usize];
        let thumb = landmarks[LandmarkIdx::ThumbTip as usize];
        let index = landmarks[LandmarkIdx::IndexFingerTip as usize];

        let translation = self.position(&palm);

        let pinch = (index.xy() + thumb.xy()) / 2.0;
        let palm_to_pinch = pinch - palm.xy();

        // atan2(0, 0) is 0, so a collapsed hand just points "up".
        let angle = -palm_to_pinch.y.atan2(palm_to_pinch.x) + self.constants.rotation_offset;
        let scale = Self::length(palm_to_pinch) * self.constants.scale_factor;

        Ok(LocalTransform {
            translation,
            rotation: Vec3::new(0.0, 0.0, angle),
            scale: Vec3::splat(scale),
        })
    }

    fn position(&self, palm: &Landmark) -> Vec3 {
        let range = self.constants.position_range;
        Vec3::new(
            (palm.x - 0.5) * range,
            -(palm.y - 0.5) * range,
            -palm.z * self.constants.depth_scale,
        )
    }

    // hypot doesn't overflow for large but finite inputs.
    fn length(v: Vec2) -> f32 {
        v.x.hypot(v.y)
    }
}
