use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::HandOverlayError;

/// The "side" or "handedness" of a tracked hand.
/// Used as the join key between a frame's detections and the models bound in the registry.
#[derive(Debug, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand side
    Left,
    /// Right hand side
    Right,
}

impl Handedness {
    /// Every handedness, in the order the recogniser reports them
    pub const ALL: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    /// The label used by the gesture recogniser for this hand
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Handedness {
    type Err = HandOverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Handedness::Left),
            "Right" => Ok(Handedness::Right),
            other => Err(HandOverlayError::UnknownHandedness(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_handedness() {
        assert_eq!("Left".parse::<Handedness>().unwrap(), Handedness::Left);
        assert_eq!("Right".parse::<Handedness>().unwrap(), Handedness::Right);

        // Labels are case sensitive, just like the recogniser's output.
        assert!(matches!(
            "left".parse::<Handedness>(),
            Err(HandOverlayError::UnknownHandedness(label)) if label == "left"
        ));
        assert!("".parse::<Handedness>().is_err());
    }

    #[test]
    fn test_label_round_trips() {
        for handedness in Handedness::ALL {
            assert_eq!(handedness.label().parse::<Handedness>().unwrap(), handedness);
            assert_eq!(handedness.to_string(), handedness.label());
        }
    }
}
