use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Handedness;

/// Number of landmarks the recogniser reports for each detected hand
pub const LANDMARK_COUNT: usize = 21;

/// A single tracked point on a hand.
///
/// `x` and `y` are normalised to `[0, 1]` relative to the frame's width and height, with the
/// origin in the top left corner and `y` increasing downwards. `z` is a relative depth in the same
/// scale as `x`: smaller (more negative) values are closer to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalised to the frame width
    pub x: f32,
    /// Vertical position, normalised to the frame height
    pub y: f32,
    /// Relative depth
    pub z: f32,
}

impl Landmark {
    /// Create a new landmark
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The image space position of this landmark, ignoring depth
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Landmark { x, y, z }
    }
}

/// Names for the hand landmarks, in the order the recogniser reports them.
///
/// - **CMC**: Carpometacarpal joint, the lowest joint of the thumb.
/// - **MCP**: Metacarpophalangeal joint, the knuckles.
/// - **PIP**: Proximal interphalangeal joint.
/// - **DIP**: Distal interphalangeal joint.
/// - **Tip**: The tip of the finger.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// A gesture the recogniser classified a hand as making, eg. "Open_Palm" or "Pointing_Up"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    /// Category name reported by the recogniser
    pub category: String,
    /// Confidence in the category, between 0.0 and 1.0
    pub score: f32,
}

/// One hand detected in a single frame.
///
/// Absence of a hand is represented by absence of a detection, never by an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    /// Which hand the recogniser believes this is
    pub handedness: Handedness,
    /// The hand's landmarks, indexed by [`LandmarkIdx`]
    pub landmarks: Vec<Landmark>,
    /// Confidence in the handedness classification
    #[serde(default)]
    pub score: Option<f32>,
    /// The gesture this hand is making, if one was recognised
    #[serde(default)]
    pub gesture: Option<Gesture>,
}

impl HandDetection {
    /// Create a detection with no score or gesture
    pub fn new(handedness: Handedness, landmarks: Vec<Landmark>) -> Self {
        Self {
            handedness,
            landmarks,
            score: None,
            gesture: None,
        }
    }

    /// Get a landmark by name, if the detection is long enough to contain it
    pub fn landmark(&self, idx: LandmarkIdx) -> Option<&Landmark> {
        self.landmarks.get(idx as usize)
    }
}
