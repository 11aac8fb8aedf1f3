use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::binding::PropertyBinding;
use crate::animation::clip::{AnimationClip, TrackData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
}

/// A playable binding of one clip to a mixer.
///
/// Carries its own local time and blend weight; the controller drives the
/// weight during crossfades, the mixer advances the time.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    /// Blend weight in `[0, 1]`.
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            bindings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<PropertyBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Restarts playback from the beginning of the clip.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.paused = false;
    }

    /// Advances local time, honoring the loop mode.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true; // hold the final pose
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // reverse playback wraps from the end
                    self.time = duration + (self.time % duration);
                }
            }
        }
    }

    /// Samples the given track at the action's current time.
    #[must_use]
    pub fn sample_track(&self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;

        Some(match &track.data {
            TrackData::Vector3(t) => TrackValue::Vector3(t.sample(self.time)),
            TrackData::Quaternion(t) => TrackValue::Quaternion(t.sample(self.time)),
            TrackData::Scalar(t) => TrackValue::Scalar(t.sample(self.time)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
    Scalar(f32),
}
