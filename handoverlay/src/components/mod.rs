/// Render-facing transform of a bound model
pub mod global_transform;
/// Handedness, the join key between detections and models
pub mod hand;
/// Binding of a model to a hand
pub mod hand_model;
/// Debugging information
pub mod info;
/// Raw hand landmarks as delivered by the recogniser
pub mod landmark;
/// Transform of a bound model
pub mod local_transform;
/// Visibility marker
pub mod visible;

pub use global_transform::GlobalTransform;
pub use hand::Handedness;
pub use hand_model::HandModel;
pub use info::Info;
pub use landmark::{Gesture, HandDetection, Landmark, LandmarkIdx, LANDMARK_COUNT};
pub use local_transform::LocalTransform;
pub use visible::Visible;
