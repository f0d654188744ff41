use std::{f32::consts::FRAC_PI_4, sync::atomic::AtomicBool};

use approx::assert_relative_eq;
use glam::Vec3;
use handoverlay::{
    components::{GlobalTransform, HandDetection, HandModel, Handedness, Landmark, Visible},
    config::SessionConfig,
    hecs::With,
    session::{Frame, VecTickSource},
    Session,
};

const CONFIG: &str = r#"{
    "models": [
        { "asset": "models/left_glove.glb", "handedness": "Left", "base_scale": [0.2, 0.2, 0.2] },
        { "asset": "models/right_glove.glb", "handedness": "Right" }
    ]
}"#;

fn pinching_hand(handedness: Handedness) -> HandDetection {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); 21];
    landmarks[4] = Landmark::new(0.6, 0.5, 0.0);
    landmarks[8] = Landmark::new(0.5, 0.4, 0.0);
    HandDetection::new(handedness, landmarks)
}

fn visible_assets(session: &Session) -> Vec<String> {
    let mut assets: Vec<String> = session
        .registry()
        .world()
        .query::<With<(&HandModel, &GlobalTransform), &Visible>>()
        .iter()
        .map(|(_, (model, _))| model.asset.clone())
        .collect();
    assets.sort();
    assets
}

#[test]
fn test_replay_session() {
    let config = SessionConfig::from_json(CONFIG).unwrap();
    let mut session = Session::new(&config).unwrap();

    // Nothing is shown until a hand is seen.
    assert!(visible_assets(&session).is_empty());
    let left_base = session.registry().snapshot().unwrap()[0].transform;
    assert_eq!(left_base.scale, Vec3::splat(0.2));

    let frames = vec![
        Frame::new(0.0, vec![pinching_hand(Handedness::Right)]),
        Frame::new(33.0, vec![pinching_hand(Handedness::Right), pinching_hand(Handedness::Left)]),
        // The video hasn't advanced, so this frame is skipped.
        Frame::new(33.0, vec![]),
        Frame::new(66.0, vec![pinching_hand(Handedness::Left)]),
    ];
    let mut source = VecTickSource::from(frames);
    let stats = session.run(&mut source, &AtomicBool::new(false));

    assert_eq!(stats.processed, 3);
    assert_eq!(stats.skipped, 1);
    assert_eq!(visible_assets(&session), vec!["models/left_glove.glb"]);

    let snapshot = session.registry().snapshot().unwrap();
    let left = &snapshot[0];
    assert!(left.visible);
    assert_relative_eq!(left.transform.translation, Vec3::ZERO);
    assert_relative_eq!(left.transform.rotation.z, -FRAC_PI_4, epsilon = 1e-5);
    assert_relative_eq!(left.transform.scale.x, 0.003_54, epsilon = 1e-5);

    let right = &snapshot[1];
    assert!(!right.visible);
    assert_eq!(right.transform, left.transform);
}

#[test]
fn test_unbound_and_broken_hands_never_stop_the_loop() {
    let config = SessionConfig::from_json(
        r#"{ "models": [{ "asset": "wand.glb", "handedness": "Left" }] }"#,
    )
    .unwrap();
    let mut session = Session::new(&config).unwrap();

    let broken = HandDetection::new(Handedness::Left, vec![Landmark::default(); 2]);
    let frames = vec![
        Frame::new(0.0, vec![pinching_hand(Handedness::Right)]),
        Frame::new(1.0, vec![broken]),
        Frame::new(2.0, vec![pinching_hand(Handedness::Left)]),
    ];
    let stats = session.run(&mut VecTickSource::from(frames), &AtomicBool::new(false));

    assert_eq!(stats.processed, 3);
    assert_eq!(stats.unmatched_detections, 1);
    assert_eq!(stats.invalid_landmark_sets, 1);
    assert_eq!(visible_assets(&session), vec!["wand.glb"]);
}
