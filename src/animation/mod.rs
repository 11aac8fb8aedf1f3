//! Animation module.
//!
//! - `KeyframeTrack`: immutable sampled track data
//! - `AnimationClip`: named, fixed-duration set of tracks
//! - `Binder`: resolves track target names to scene nodes
//! - `AnimationAction`: a playable instance of one clip, with weight and time
//! - `AnimationMixer`: advances active actions and writes blended values
//! - `AnimationController`: named-clip playback with timed crossfades

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod controller;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use controller::{AnimationController, ControllerState};
pub use mixer::AnimationMixer;
pub use tracks::{Interpolation, KeyframeTrack};
pub use values::Interpolatable;
