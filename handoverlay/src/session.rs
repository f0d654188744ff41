use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use hecs::PreparedQuery;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    components::{GlobalTransform, HandDetection, LocalTransform},
    config::SessionConfig,
    contexts::ModelRegistry,
    pose_mapper::PoseMapper,
    systems::{hand_models_system, update_global_transform_system, HandModelsUpdate},
    HandOverlayResult,
};

/// One batch of detections, as produced by the recogniser for a single video frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Timestamp of the video frame the detections came from, in milliseconds
    pub timestamp: f64,
    /// Every hand detected in the frame, in the order the recogniser reported them
    #[serde(default)]
    pub detections: Vec<HandDetection>,
}

impl Frame {
    /// Create a frame
    pub fn new(timestamp: f64, detections: Vec<HandDetection>) -> Self {
        Self {
            timestamp,
            detections,
        }
    }
}

/// Something that delivers at most one [`Frame`] per tick.
pub trait TickSource {
    /// Get the next frame, or `None` if the input has closed
    fn next_frame(&mut self) -> Option<Frame>;
}

/// A [`TickSource`] that plays back frames held in memory
#[derive(Debug, Clone, Default)]
pub struct VecTickSource {
    frames: VecDeque<Frame>,
}

impl From<Vec<Frame>> for VecTickSource {
    fn from(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl TickSource for VecTickSource {
    fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }
}

/// The result of calling `tick()` on a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame was new and the bindings were reconciled with it
    Reconciled(HandModelsUpdate),
    /// The frame was no newer than the last one processed, so nothing was changed
    Stale,
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames that were reconciled
    pub processed: usize,
    /// Frames skipped because the video hadn't advanced
    pub skipped: usize,
    /// Detections whose landmarks couldn't be mapped
    pub invalid_landmark_sets: usize,
    /// Detections for hands with no model bound
    pub unmatched_detections: usize,
    /// Detections dropped because their hand was beyond the configured number of hands
    pub dropped_detections: usize,
    /// Time spent reconciling the most recent frame
    pub last_reconcile_time: Duration,
    /// Time spent reconciling every processed frame
    pub total_reconcile_time: Duration,
}

impl FrameStats {
    /// Mean time spent reconciling a frame, or zero if none have been processed
    pub fn average_reconcile_time(&self) -> Duration {
        match u32::try_from(self.processed) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(processed) => self.total_reconcile_time / processed,
        }
    }

    fn record(&mut self, update: &HandModelsUpdate, reconcile_time: Duration) {
        self.processed += 1;
        self.invalid_landmark_sets += update.invalid.len();
        self.unmatched_detections += update.unmatched;
        self.last_reconcile_time = reconcile_time;
        self.total_reconcile_time += reconcile_time;
    }
}

/// Everything the frame loop needs, held in one place rather than in globals.
///
/// A session owns the [`ModelRegistry`] and the [`PoseMapper`]. Each call to [`Session::tick`]
/// reconciles the bindings with exactly one frame of detections and then updates the transforms a
/// render pass reads. Ticks never overlap, since `tick` takes `&mut self`.
pub struct Session {
    registry: ModelRegistry,
    pose_mapper: PoseMapper,
    max_hands: usize,
    last_timestamp: Option<f64>,
    stats: FrameStats,
    global_transform_query: PreparedQuery<(&'static LocalTransform, &'static mut GlobalTransform)>,
}

impl Session {
    /// Start a session, binding every configured model
    pub fn new(config: &SessionConfig) -> HandOverlayResult<Self> {
        config.validate()?;
        let registry = ModelRegistry::from_config(&config.models)?;
        let pose_mapper = PoseMapper::new(config.pose)?;
        info!(
            "[SESSION] Starting session with {} models, tracking up to {} hands",
            registry.len(),
            config.max_hands
        );
        Ok(Self::from_parts(registry, pose_mapper, config.max_hands))
    }

    /// Start a session from an existing registry and mapper
    pub fn from_parts(registry: ModelRegistry, pose_mapper: PoseMapper, max_hands: usize) -> Self {
        Self {
            registry,
            pose_mapper,
            max_hands,
            last_timestamp: None,
            stats: Default::default(),
            global_transform_query: Default::default(),
        }
    }

    /// Process one frame of detections.
    ///
    /// A frame whose timestamp isn't newer than the last processed frame's is skipped: the video
    /// hasn't advanced, so there is nothing new to reconcile.
    pub fn tick(&mut self, frame: &Frame) -> TickOutcome {
        if !frame.timestamp.is_finite() {
            warn!(
                "[SESSION] Skipping frame with invalid timestamp {}",
                frame.timestamp
            );
            self.stats.skipped += 1;
            return TickOutcome::Stale;
        }
        if let Some(last) = self.last_timestamp {
            if frame.timestamp <= last {
                debug!(
                    "[SESSION] Skipping stale frame at {}ms, last processed {last}ms",
                    frame.timestamp
                );
                self.stats.skipped += 1;
                return TickOutcome::Stale;
            }
        }
        self.last_timestamp = Some(frame.timestamp);
        let tick_start = Instant::now();

        let detections = self.bounded_detections(&frame.detections);
        let update = hand_models_system(&detections, &mut self.registry, &self.pose_mapper);
        update_global_transform_system(
            &mut self.global_transform_query,
            self.registry.world_mut(),
        );

        let reconcile_time = tick_start.elapsed();
        self.stats.record(&update, reconcile_time);
        trace!("[SESSION] Reconciled frame at {}ms in {reconcile_time:?}", frame.timestamp);

        TickOutcome::Reconciled(update)
    }

    /// Keep every detection of the first `max_hands` distinct hands in the frame.
    ///
    /// The bound counts hands, not entries, so a hand reported twice never pushes another hand out
    /// of the frame.
    fn bounded_detections(&mut self, detections: &[HandDetection]) -> Vec<HandDetection> {
        let mut hands = Vec::with_capacity(self.max_hands);
        let mut kept = Vec::with_capacity(detections.len());
        for detection in detections {
            if !hands.contains(&detection.handedness) {
                if hands.len() >= self.max_hands {
                    debug!(
                        "[SESSION] Dropping {} hand detection, already tracking {} hands",
                        detection.handedness, self.max_hands
                    );
                    self.stats.dropped_detections += 1;
                    continue;
                }
                hands.push(detection.handedness);
            }
            kept.push(detection.clone());
        }
        kept
    }

    /// Tick until `source` closes or `should_quit` is set, one frame per tick.
    pub fn run<S: TickSource>(&mut self, source: &mut S, should_quit: &AtomicBool) -> FrameStats {
        loop {
            if should_quit.load(Ordering::Acquire) {
                info!("[SESSION] Quit requested, stopping");
                break;
            }
            match source.next_frame() {
                Some(frame) => {
                    self.tick(&frame);
                }
                None => {
                    info!("[SESSION] Input closed, stopping");
                    break;
                }
            }
        }

        info!(
            "[SESSION] Processed {} frames, skipped {}, average reconcile time {:?}",
            self.stats.processed,
            self.stats.skipped,
            self.stats.average_reconcile_time()
        );
        self.stats
    }

    /// The bound models
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Mutable access to the bound models, eg. to bind another model mid-session
    pub fn registry_mut(&mut self) -> &mut ModelRegistry {
        &mut self.registry
    }

    /// The mapper used to pose models
    pub fn pose_mapper(&self) -> &PoseMapper {
        &self.pose_mapper
    }

    /// Running totals for this session
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}
