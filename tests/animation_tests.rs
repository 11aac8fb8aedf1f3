//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step interpolation and range clamping
//! - Interpolatable trait implementations (f32, Vec3, Quat)
//! - AnimationAction loop modes (Once, Loop) and pause/enable flags
//! - AnimationClip duration auto-computation
//! - AnimationMixer blending and transform write-back

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Quat, Vec3};

use lumen::animation::action::{AnimationAction, LoopMode};
use lumen::animation::binder::Binder;
use lumen::animation::binding::TargetPath;
use lumen::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use lumen::animation::mixer::AnimationMixer;
use lumen::animation::tracks::{Interpolation, KeyframeTrack};
use lumen::animation::values::Interpolatable;
use lumen::scene::Scene;
use lumen::scene::node::Node;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// KeyframeTrack: Linear Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], Interpolation::Linear);
    let val = track.sample(0.5);
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframes() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        Interpolation::Linear,
    );
    assert!(approx(track.sample(0.0), 0.0));
    assert!(approx(track.sample(1.0), 10.0));
    assert!(approx(track.sample(2.0), 20.0));
}

#[test]
fn track_linear_f32_clamp_beyond_range() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], Interpolation::Linear);

    // Sampling beyond the last keyframe should clamp to the last value
    let val = track.sample(5.0);
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn track_linear_f32_before_first() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0_f32, 20.0], Interpolation::Linear);

    // Before the first keyframe: should clamp to the first value
    let val = track.sample(0.5);
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn track_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32], Interpolation::Linear);
    assert!(approx(track.sample(5.0), 42.0));
}

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        Interpolation::Linear,
    );
    let val = track.sample(0.5);
    assert!(approx_vec3(val, Vec3::new(5.0, 10.0, 15.0)));
}

#[test]
fn track_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], Interpolation::Linear);

    let val = track.sample(0.5);
    let expected = q0.slerp(q1, 0.5);
    let angle = val.angle_between(expected);
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

// ============================================================================
// KeyframeTrack: Step Interpolation
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        Interpolation::Step,
    );

    // Step should hold the current keyframe value until the next one
    assert!(approx(track.sample(0.0), 0.0));
    assert!(approx(track.sample(0.5), 0.0));
    assert!(approx(track.sample(0.99), 0.0));
    assert!(approx(track.sample(1.0), 100.0));
    assert!(approx(track.sample(1.5), 100.0));
    assert!(approx(track.sample(2.0), 200.0));
}

// ============================================================================
// Interpolatable Implementations
// ============================================================================

#[test]
fn interpolatable_f32_linear() {
    let result = f32::interpolate_linear(0.0, 10.0, 0.25);
    assert!(approx(result, 2.5));
}

#[test]
fn interpolatable_vec3_linear() {
    let result = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), 0.5);
    assert!(approx_vec3(result, Vec3::new(5.0, 10.0, 15.0)));
}

#[test]
fn interpolatable_quat_linear_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let result = Quat::interpolate_linear(a, b, 0.5);

    let expected = a.slerp(b, 0.5);
    let angle = result.angle_between(expected);
    assert!(angle < 1e-4, "Slerp mismatch: angle={angle}");
}

// ============================================================================
// AnimationAction Loop Modes
// ============================================================================

fn make_simple_clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "test".to_string(),
        vec![Track {
            meta: TrackMeta {
                node_name: "node".to_string(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, duration],
                vec![Vec3::ZERO, Vec3::X],
                Interpolation::Linear,
            )),
        }],
    ))
}

#[test]
fn action_loop_mode_once() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Once;

    // Advance past end
    action.update(3.0);
    assert!(
        approx(action.time, 2.0),
        "Once: should clamp to duration, got {}",
        action.time
    );
    assert!(action.paused, "Once: should auto-pause at end");
}

#[test]
fn action_loop_mode_loop() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Loop;

    // Advance past end by 0.5
    action.update(2.5);
    assert!(
        approx(action.time, 0.5),
        "Loop: should wrap to 0.5, got {}",
        action.time
    );
    assert!(!action.paused, "Loop: should NOT auto-pause");
}

#[test]
fn action_loop_reverse_playback() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Loop;
    action.time_scale = -1.0;
    action.time = 0.5;

    // time = 0.5 - 1.0 = -0.5 → wraps from the end
    action.update(1.0);
    assert!(
        action.time > 0.0 && action.time <= 2.0,
        "Loop reverse: time should stay within [0, duration], got {}",
        action.time
    );
}

#[test]
fn action_paused_no_update() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.paused = true;
    action.time = 0.5;

    action.update(1.0);
    assert!(approx(action.time, 0.5), "Paused action should not advance");
}

#[test]
fn action_disabled_no_update() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.enabled = false;
    action.time = 0.5;

    action.update(1.0);
    assert!(
        approx(action.time, 0.5),
        "Disabled action should not advance"
    );
}

#[test]
fn action_time_scale() {
    let mut action = AnimationAction::new(make_simple_clip(4.0));
    action.loop_mode = LoopMode::Once;
    action.time_scale = 2.0;

    action.update(1.0); // effective dt = 2.0
    assert!(approx(action.time, 2.0), "Expected 2.0, got {}", action.time);
}

#[test]
fn action_reset_restarts() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Once;
    action.update(3.0);
    assert!(action.paused);

    action.reset();
    assert!(approx(action.time, 0.0));
    assert!(!action.paused);
}

// ============================================================================
// AnimationClip Auto-Duration
// ============================================================================

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "test".to_string(),
        vec![
            Track {
                meta: TrackMeta {
                    node_name: "a".to_string(),
                    target: TargetPath::Translation,
                },
                data: TrackData::Vector3(KeyframeTrack::new(
                    vec![0.0, 1.5],
                    vec![Vec3::ZERO, Vec3::X],
                    Interpolation::Linear,
                )),
            },
            Track {
                meta: TrackMeta {
                    node_name: "b".to_string(),
                    target: TargetPath::Rotation,
                },
                data: TrackData::Quaternion(KeyframeTrack::new(
                    vec![0.0, 3.0],
                    vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
                    Interpolation::Linear,
                )),
            },
        ],
    );

    assert!(
        approx(clip.duration, 3.0),
        "Duration should be max of all tracks (3.0), got {}",
        clip.duration
    );
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("empty".to_string(), vec![]);
    assert!(approx(clip.duration, 0.0));
}

// ============================================================================
// Binder + Mixer: blending and transform write-back
// ============================================================================

fn translation_clip(name: &str, node: &str, from: Vec3, to: Vec3) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        name.to_string(),
        vec![Track {
            meta: TrackMeta {
                node_name: node.to_string(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![from, to],
                Interpolation::Linear,
            )),
        }],
    ))
}

#[test]
fn mixer_writes_sampled_value_into_transform() {
    let mut scene = Scene::new();
    let root = scene.create_node("Rig");
    let bone = scene.add_to_parent(Node::new("Bone"), root);

    let clip = translation_clip("move", "Bone", Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
    let bindings = Binder::bind(&scene, root, &clip);
    assert_eq!(bindings.len(), 1, "One track should resolve to one binding");

    let mut mixer = AnimationMixer::new();
    mixer.add_action(AnimationAction::new(clip).with_bindings(bindings));

    mixer.update(0.5, &mut scene);

    let position = scene.get_node(bone).map(|n| n.transform.position);
    assert_eq!(
        position,
        Some(Vec3::new(1.0, 0.0, 0.0)),
        "Midpoint sample should land in the bone transform"
    );
}

#[test]
fn mixer_blends_complementary_weights() {
    let mut scene = Scene::new();
    let root = scene.create_node("Rig");
    let bone = scene.add_to_parent(Node::new("Bone"), root);

    // Two constant-value clips, blended 25/75
    let a = translation_clip("a", "Bone", Vec3::ZERO, Vec3::ZERO);
    let b = translation_clip("b", "Bone", Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0));

    let mut mixer = AnimationMixer::new();
    let bindings_a = Binder::bind(&scene, root, &a);
    let bindings_b = Binder::bind(&scene, root, &b);
    let ia = mixer.add_action(AnimationAction::new(a).with_bindings(bindings_a));
    let ib = mixer.add_action(AnimationAction::new(b).with_bindings(bindings_b));

    if let Some(action) = mixer.action_mut(ia) {
        action.weight = 0.25;
    }
    if let Some(action) = mixer.action_mut(ib) {
        action.weight = 0.75;
    }

    mixer.update(0.0, &mut scene);

    let position = scene.get_node(bone).map(|n| n.transform.position);
    assert!(
        position.is_some_and(|p| approx_vec3(p, Vec3::new(3.0, 0.0, 0.0))),
        "0.25*0 + 0.75*4 should blend to 3.0, got {position:?}"
    );
}

#[test]
fn mixer_skips_disabled_and_zero_weight_actions() {
    let mut scene = Scene::new();
    let root = scene.create_node("Rig");
    let bone = scene.add_to_parent(Node::new("Bone"), root);

    let clip = translation_clip("move", "Bone", Vec3::X, Vec3::X);
    let bindings = Binder::bind(&scene, root, &clip);

    let mut mixer = AnimationMixer::new();
    let index = mixer.add_action(AnimationAction::new(clip).with_bindings(bindings));
    if let Some(action) = mixer.action_mut(index) {
        action.weight = 0.0;
    }
    mixer.update(0.5, &mut scene);

    let position = scene.get_node(bone).map(|n| n.transform.position);
    assert_eq!(
        position,
        Some(Vec3::ZERO),
        "Zero-weight action must not touch the transform"
    );

    if let Some(action) = mixer.action_mut(index) {
        action.weight = 1.0;
        action.enabled = false;
    }
    mixer.update(0.5, &mut scene);

    let position = scene.get_node(bone).map(|n| n.transform.position);
    assert_eq!(
        position,
        Some(Vec3::ZERO),
        "Disabled action must not touch the transform"
    );
}

#[test]
fn active_set_membership_is_the_enabled_flag() {
    let mut scene = Scene::new();
    let root = scene.create_node("Rig");
    scene.add_to_parent(Node::new("Bone"), root);

    let clip = translation_clip("move", "Bone", Vec3::ZERO, Vec3::X);
    let bindings = Binder::bind(&scene, root, &clip);

    let mut mixer = AnimationMixer::new();
    let index = mixer.add_action(AnimationAction::new(clip).with_bindings(bindings));

    // An enabled action just starting a fade-in is active at weight zero
    if let Some(action) = mixer.action_mut(index) {
        action.weight = 0.0;
    }
    assert_eq!(mixer.active_count(), 1);

    // Retiring happens by disabling, regardless of the remaining weight
    if let Some(action) = mixer.action_mut(index) {
        action.weight = 1.0;
        action.enabled = false;
    }
    assert_eq!(mixer.active_count(), 0);
}

#[test]
fn binder_skips_unresolved_targets() {
    let mut scene = Scene::new();
    let root = scene.create_node("Rig");

    let clip = translation_clip("move", "NoSuchBone", Vec3::ZERO, Vec3::X);
    let bindings = Binder::bind(&scene, root, &clip);
    assert!(
        bindings.is_empty(),
        "Unresolvable track targets are skipped, not an error"
    );
}
