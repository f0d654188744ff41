use super::{Handedness, LocalTransform};

/// A component that binds a renderable model to one of the user's hands.
///
/// The model is shown only while its hand is being detected, and its [`LocalTransform`] follows
/// the hand's pose. At most one `HandModel` exists per [`Handedness`]; see `ModelRegistry`.
/// Requires `hand_models_system`
#[derive(Debug, Clone, PartialEq)]
pub struct HandModel {
    /// Which hand drives this model?
    pub handedness: Handedness,
    /// Identifier of the model's asset, as given in the configuration
    pub asset: String,
    /// The transform the model was configured with, applied when it is bound and when it is reset
    pub base_transform: LocalTransform,
}

