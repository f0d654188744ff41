use itertools::Itertools;
use log::{debug, trace, warn};

use crate::{
    components::{HandDetection, Handedness},
    contexts::ModelRegistry,
    pose_mapper::PoseMapper,
    HandOverlayResult,
};

/// What `hand_models_system` did with a frame's detections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandModelsUpdate {
    /// Hands whose models were shown and moved this frame
    pub updated: Vec<Handedness>,
    /// Hands whose models were left untouched because their landmarks were unusable
    pub invalid: Vec<Handedness>,
    /// Hands whose models were hidden this frame
    pub hidden: Vec<Handedness>,
    /// Detections for hands that have no model bound
    pub unmatched: usize,
}

/// Hand models system
/// Shows each model whose hand was detected this frame and moves it to follow the hand, then hides
/// every model whose hand wasn't detected.
///
/// Visibility is recomputed from scratch every frame: a hand that drops out for a single frame
/// hides its model, and its next detection shows it again at a freshly computed pose.
/// Detections for hands with no bound model are ignored.
///
/// A detection whose landmarks can't be mapped leaves its model exactly as it was, neither moved
/// nor hidden. Nothing that happens to one binding stops the others from being reconciled.
pub fn hand_models_system(
    detections: &[HandDetection],
    registry: &mut ModelRegistry,
    pose_mapper: &PoseMapper,
) -> HandModelsUpdate {
    let mut update = HandModelsUpdate::default();
    let mut detected = Vec::with_capacity(detections.len());

    for detection in detections {
        let handedness = detection.handedness;
        if registry.find(handedness).is_none() {
            trace!("[HAND_MODELS] No model bound to the {handedness} hand, ignoring detection");
            update.unmatched += 1;
            continue;
        }
        detected.push(handedness);

        if let Some(gesture) = &detection.gesture {
            debug!(
                "[HAND_MODELS] {handedness} hand is making {} ({:.2})",
                gesture.category, gesture.score
            );
        }

        match apply_detection(detection, registry, pose_mapper) {
            Ok(()) => update.updated.push(handedness),
            Err(e) => {
                warn!("[HAND_MODELS] Not updating the {handedness} hand's model this frame: {e}");
                update.invalid.push(handedness);
            }
        }
    }

    let undetected = registry
        .iter()
        .map(|(handedness, _)| handedness)
        .filter(|handedness| !detected.contains(handedness))
        .collect_vec();
    for handedness in undetected {
        match registry.set_visible(handedness, false) {
            Ok(()) => update.hidden.push(handedness),
            Err(e) => warn!("[HAND_MODELS] Unable to hide the {handedness} hand's model: {e}"),
        }
    }

    debug!(
        "[HAND_MODELS] {} detections: updated [{}], hidden [{}]",
        detections.len(),
        update.updated.iter().join(", "),
        update.hidden.iter().join(", "),
    );

    update
}

fn apply_detection(
    detection: &HandDetection,
    registry: &mut ModelRegistry,
    pose_mapper: &PoseMapper,
) -> HandOverlayResult<()> {
    // Map first, so a bad landmark set leaves the binding untouched.
    let transform = pose_mapper.compute_transform(&detection.landmarks)?;
    registry.set_visible(detection.handedness, true)?;
    registry.set_local_transform(detection.handedness, transform)?;
    trace!(
        "[HAND_MODELS] {} hand model is now at {:?}",
        detection.handedness,
        transform
    );
    Ok(())
}
