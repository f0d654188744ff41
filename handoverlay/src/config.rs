use std::{fs::File, io::BufReader, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    components::{Handedness, HandModel, LocalTransform},
    pose_mapper::PoseConstants,
    HandOverlayError, HandOverlayResult,
};

/// The number of hands the recogniser is asked to track
pub const DEFAULT_MAX_HANDS: usize = 2;

fn default_max_hands() -> usize {
    DEFAULT_MAX_HANDS
}

fn default_base_scale() -> Vec3 {
    Vec3::ONE
}

/// One model to bind to a hand when the session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Identifier of the model's asset, eg. a path to a glTF file
    pub asset: String,
    /// Scale before the hand is first seen
    #[serde(default = "default_base_scale")]
    pub base_scale: Vec3,
    /// Position before the hand is first seen
    #[serde(default)]
    pub base_position: Vec3,
    /// Rotation before the hand is first seen, as XYZ Euler angles in radians
    #[serde(default)]
    pub base_rotation: Vec3,
    /// The hand that drives this model
    pub handedness: Handedness,
}

impl ModelConfig {
    /// Bind `asset` to `handedness` with an identity base transform
    pub fn new(asset: impl Into<String>, handedness: Handedness) -> Self {
        Self {
            asset: asset.into(),
            base_scale: Vec3::ONE,
            base_position: Vec3::ZERO,
            base_rotation: Vec3::ZERO,
            handedness,
        }
    }

    /// The transform the model starts with
    pub fn base_transform(&self) -> LocalTransform {
        LocalTransform::new(self.base_position, self.base_rotation, self.base_scale)
    }

    /// The component binding this model to its hand
    pub fn hand_model(&self) -> HandModel {
        HandModel {
            handedness: self.handedness,
            asset: self.asset.clone(),
            base_transform: self.base_transform(),
        }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Models to bind, in registration order
    pub models: Vec<ModelConfig>,
    /// Constants used to map hands onto models
    #[serde(default)]
    pub pose: PoseConstants,
    /// Hands beyond this many distinct hands in a single frame are ignored
    #[serde(default = "default_max_hands")]
    pub max_hands: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            pose: Default::default(),
            max_hands: DEFAULT_MAX_HANDS,
        }
    }
}

impl SessionConfig {
    /// Load and validate a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> HandOverlayResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SessionConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string
    pub fn from_json(json: &str) -> HandOverlayResult<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can be used to build a session
    pub fn validate(&self) -> HandOverlayResult<()> {
        self.pose.validate()?;

        if self.max_hands == 0 {
            return Err(HandOverlayError::InvalidConfig(
                "max_hands must be at least 1".to_string(),
            ));
        }

        for (i, model) in self.models.iter().enumerate() {
            if !model.base_transform().is_finite() {
                return Err(HandOverlayError::InvalidConfig(format!(
                    "model {i} ({}) has a non-finite base transform",
                    model.asset
                )));
            }
            if self.models[..i]
                .iter()
                .any(|m| m.handedness == model.handedness)
            {
                return Err(HandOverlayError::DuplicateHandedness(model.handedness));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose_mapper::DEFAULT_SCALE_FACTOR;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "models": [
                {
                    "asset": "models/glove.glb",
                    "base_scale": [0.1, 0.1, 0.1],
                    "base_position": [0.0, -1.0, 0.0],
                    "handedness": "Left"
                },
                { "asset": "models/wand.glb", "handedness": "Right" }
            ],
            "pose": { "rotation_offset": 0.0 }
        }"#;
        let config = SessionConfig::from_json(json).unwrap();

        assert_eq!(config.max_hands, DEFAULT_MAX_HANDS);
        assert_eq!(config.pose.rotation_offset, 0.0);
        assert_eq!(config.pose.scale_factor, DEFAULT_SCALE_FACTOR);

        let glove = &config.models[0];
        assert_eq!(glove.handedness, Handedness::Left);
        assert_eq!(glove.base_scale, Vec3::splat(0.1));
        assert_eq!(glove.base_position, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(glove.base_rotation, Vec3::ZERO);

        let wand = &config.models[1];
        assert_eq!(wand.base_transform(), LocalTransform::default());
        let hand_model = wand.hand_model();
        assert_eq!(hand_model.handedness, Handedness::Right);
        assert_eq!(hand_model.asset, "models/wand.glb");
        assert_eq!(hand_model.base_transform, LocalTransform::default());
    }

    #[test]
    fn test_duplicate_handedness_is_rejected() {
        let config = SessionConfig {
            models: vec![
                ModelConfig::new("a.glb", Handedness::Right),
                ModelConfig::new("b.glb", Handedness::Right),
            ],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HandOverlayError::DuplicateHandedness(Handedness::Right))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut model = ModelConfig::new("a.glb", Handedness::Left);
        model.base_scale.x = f32::NAN;
        let config = SessionConfig {
            models: vec![model],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HandOverlayError::InvalidConfig(_))
        ));

        let config = SessionConfig {
            max_hands: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(matches!(
            SessionConfig::from_json(r#"{ "models": [{ "asset": "a", "handedness": "left" }] }"#),
            Err(HandOverlayError::Json(_))
        ));
    }
}
