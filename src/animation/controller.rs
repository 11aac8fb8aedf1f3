use std::collections::HashMap;
use std::sync::Arc;

use crate::animation::action::AnimationAction;
use crate::animation::binder::Binder;
use crate::animation::clip::AnimationClip;
use crate::animation::mixer::AnimationMixer;
use crate::errors::{LumenError, Result};
use crate::scene::{NodeKey, Scene};

/// Playback state of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    /// No model loaded; `advance` is a no-op.
    Idle,
    /// One clip playing at full weight.
    Playing { clip: String },
    /// Crossfading from one clip to another.
    Transitioning {
        from: String,
        to: String,
        elapsed: f32,
    },
}

/// Named-clip playback with timed crossfade transitions for one loaded model.
///
/// The controller starts `Idle` and stays there until a model's clip set is
/// registered through [`initialize`](Self::initialize). Render-loop ticks may
/// occur before the asset load completes, so `advance` tolerates the `Idle`
/// state. During a crossfade the outgoing and incoming actions hold
/// complementary weights, so the blended pose never pops.
pub struct AnimationController {
    mixer: AnimationMixer,
    actions_by_name: HashMap<String, usize>,
    state: ControllerState,
    /// Crossfade duration in seconds.
    fade_duration: f32,
    /// Weight the outgoing action started the current fade with. 1.0 for a
    /// fade out of steady-state playback; lower when a fade was retargeted
    /// mid-transition.
    from_start_weight: f32,
}

impl AnimationController {
    #[must_use]
    pub fn new(fade_duration: f32) -> Self {
        Self {
            mixer: AnimationMixer::new(),
            actions_by_name: HashMap::new(),
            state: ControllerState::Idle,
            fade_duration: fade_duration.max(1e-3),
            from_start_weight: 1.0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// The clip currently winning the blend: the playing clip, or the
    /// incoming clip while transitioning.
    #[must_use]
    pub fn current_clip(&self) -> Option<&str> {
        match &self.state {
            ControllerState::Idle => None,
            ControllerState::Playing { clip } => Some(clip),
            ControllerState::Transitioning { to, .. } => Some(to),
        }
    }

    /// Registered clip names, unordered.
    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.actions_by_name.keys().map(String::as_str)
    }

    /// Current blend weight of a named clip's action.
    #[must_use]
    pub fn clip_weight(&self, name: &str) -> Option<f32> {
        let index = *self.actions_by_name.get(name)?;
        self.mixer.action(index).map(|a| a.weight)
    }

    /// Number of actions in the mixer's active set: one while playing,
    /// two for the whole extent of a transition.
    #[must_use]
    pub fn active_action_count(&self) -> usize {
        self.mixer.active_count()
    }

    /// Registers a loaded model's clip set and starts the default clip.
    ///
    /// Track targets are resolved by name within the subtree rooted at
    /// `model_root`. If `default_clip` is absent from the clip set this fails
    /// with [`LumenError::UnknownClip`] and the controller stays `Idle`:
    /// a missing default is a configuration error, caught at initialization.
    pub fn initialize(
        &mut self,
        scene: &Scene,
        model_root: NodeKey,
        clips: &[Arc<AnimationClip>],
        default_clip: &str,
    ) -> Result<()> {
        if !clips.iter().any(|c| c.name == default_clip) {
            return Err(LumenError::UnknownClip(default_clip.to_string()));
        }

        self.mixer = AnimationMixer::new();
        self.actions_by_name.clear();

        for clip in clips {
            let bindings = Binder::bind(scene, model_root, clip);
            let mut action = AnimationAction::new(clip.clone()).with_bindings(bindings);
            action.enabled = false;
            action.weight = 0.0;
            let index = self.mixer.add_action(action);
            self.actions_by_name.insert(clip.name.clone(), index);
        }

        let default_index = self.actions_by_name[default_clip];
        if let Some(action) = self.mixer.action_mut(default_index) {
            action.enabled = true;
            action.weight = 1.0;
            action.reset();
        }

        self.state = ControllerState::Playing {
            clip: default_clip.to_string(),
        };
        self.from_start_weight = 1.0;

        Ok(())
    }

    /// Starts a crossfade to the named clip.
    ///
    /// Selecting the clip that is already current is a no-op; an unknown name
    /// is rejected with [`LumenError::UnknownClip`] and leaves state and
    /// weights untouched. A selection issued mid-transition retargets the
    /// fade: the previously incoming clip becomes the outgoing one at its
    /// current weight.
    pub fn change_animation(&mut self, name: &str) -> Result<()> {
        if self.current_clip() == Some(name) {
            return Ok(());
        }

        let Some(&incoming_index) = self.actions_by_name.get(name) else {
            return Err(LumenError::UnknownClip(name.to_string()));
        };

        let (outgoing, outgoing_weight) = match self.state.clone() {
            ControllerState::Idle => {
                // No model state to fade from; cannot happen for known names
                // because initialize is the only way to register them.
                return Err(LumenError::UnknownClip(name.to_string()));
            }
            ControllerState::Playing { clip } => (clip, 1.0),
            ControllerState::Transitioning { from, to, .. } => {
                // Drop the old outgoing action entirely; the previously
                // incoming action now fades back out from where it got to.
                if let Some(&old_from) = self.actions_by_name.get(&from)
                    && let Some(action) = self.mixer.action_mut(old_from)
                {
                    action.enabled = false;
                    action.weight = 0.0;
                }
                let weight = self.clip_weight(&to).unwrap_or(1.0);
                (to, weight)
            }
        };

        if let Some(action) = self.mixer.action_mut(incoming_index) {
            action.reset();
            action.enabled = true;
            action.weight = 0.0;
        }

        self.from_start_weight = outgoing_weight;
        self.state = ControllerState::Transitioning {
            from: outgoing,
            to: name.to_string(),
            elapsed: 0.0,
        };

        Ok(())
    }

    /// Advances animation time by `dt` and applies blended values to the scene.
    ///
    /// Called once per render-loop tick. While `Idle` this is a no-op, which
    /// covers ticks that land before asset loading completes.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) {
        match self.state.clone() {
            ControllerState::Idle => return,
            ControllerState::Playing { .. } => {}
            ControllerState::Transitioning { from, to, elapsed } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / self.fade_duration).clamp(0.0, 1.0);

                let from_weight = self.from_start_weight * (1.0 - t);
                let to_weight = 1.0 - from_weight;

                if let Some(&i) = self.actions_by_name.get(&from)
                    && let Some(action) = self.mixer.action_mut(i)
                {
                    action.weight = from_weight.clamp(0.0, 1.0);
                }
                if let Some(&i) = self.actions_by_name.get(&to)
                    && let Some(action) = self.mixer.action_mut(i)
                {
                    action.weight = to_weight.clamp(0.0, 1.0);
                }

                if elapsed >= self.fade_duration {
                    // Retire the outgoing action from the active set
                    if let Some(&i) = self.actions_by_name.get(&from)
                        && let Some(action) = self.mixer.action_mut(i)
                    {
                        action.enabled = false;
                        action.weight = 0.0;
                    }
                    if let Some(&i) = self.actions_by_name.get(&to)
                        && let Some(action) = self.mixer.action_mut(i)
                    {
                        action.weight = 1.0;
                    }
                    self.state = ControllerState::Playing { clip: to };
                    self.from_start_weight = 1.0;
                } else {
                    self.state = ControllerState::Transitioning { from, to, elapsed };
                }
            }
        }

        self.mixer.update(dt, scene);
    }
}
