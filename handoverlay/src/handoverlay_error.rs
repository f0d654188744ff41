use thiserror::Error;

use crate::components::Handedness;

/// Everything that can go wrong while mapping hands onto models
#[derive(Error, Debug)]
pub enum HandOverlayError {
    /// A landmark set was too short to address the wrist, thumb tip and index fingertip
    #[error("Landmark set has {len} points, at least {required} are needed")]
    InvalidLandmarkSet {
        /// Number of points received
        len: usize,
        /// Number of points required
        required: usize,
    },
    /// A second model was bound to a hand that already has one
    #[error("A model is already bound to the {0:?} hand")]
    DuplicateHandedness(Handedness),
    /// A handedness label was neither "Left" nor "Right"
    #[error("Unknown handedness label {0:?}, expected \"Left\" or \"Right\"")]
    UnknownHandedness(String),
    /// No model is bound to the requested hand
    #[error("No model is bound to the {0:?} hand")]
    BindingNotFound(Handedness),
    /// The session configuration was rejected
    #[error("The configuration is invalid: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    #[allow(missing_docs)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    #[allow(missing_docs)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    #[allow(missing_docs)]
    Other(#[from] anyhow::Error),
}
