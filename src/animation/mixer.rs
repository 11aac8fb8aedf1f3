use std::collections::HashMap;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binding::TargetPath;
use crate::scene::{NodeKey, Scene};

/// Owns the live set of [`AnimationAction`]s for one model.
///
/// Each tick the mixer advances every action's local time by `dt`, samples
/// the contributing actions (enabled with positive weight) and writes the
/// weight-blended values into the scene's node transforms. With complementary
/// crossfade weights at most two actions contribute per target, so the blend
/// cost is independent of how many clips the model carries.
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Adds an action and returns its stable index.
    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        self.actions.push(action);
        self.actions.len() - 1
    }

    #[must_use]
    pub fn action(&self, index: usize) -> Option<&AnimationAction> {
        self.actions.get(index)
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut AnimationAction> {
        self.actions.get_mut(index)
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    /// Number of actions in the active set. Membership is the `enabled` flag:
    /// an incoming crossfade action still at weight zero is already active,
    /// and retiring is done by disabling, not by reaching weight zero.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.actions.iter().filter(|a| a.enabled).count()
    }

    /// Advances all actions and applies blended values to the scene.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for action in &mut self.actions {
            action.update(dt);
        }

        // Accumulate weighted contributions per (node, property). Blending is
        // incremental: each new contribution is mixed in with
        // t = w / (w_accumulated + w), which for two complementary weights
        // reduces to the plain linear crossfade.
        let mut blended: HashMap<(NodeKey, TargetPath), (TrackValue, f32)> = HashMap::new();

        for action in &self.actions {
            if !action.enabled || action.weight <= 0.0 {
                continue;
            }

            for binding in &action.bindings {
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };

                let slot = (binding.node, binding.target);
                match blended.get_mut(&slot) {
                    None => {
                        blended.insert(slot, (value, action.weight));
                    }
                    Some((accumulated, total_weight)) => {
                        let t = action.weight / (*total_weight + action.weight);
                        *accumulated = mix(*accumulated, value, t);
                        *total_weight += action.weight;
                    }
                }
            }
        }

        for ((node_key, target), (value, _)) in blended {
            let Some(node) = scene.get_node_mut(node_key) else {
                continue;
            };
            match (target, value) {
                (TargetPath::Translation, TrackValue::Vector3(v)) => {
                    node.transform.position = v;
                    node.transform.mark_dirty();
                }
                (TargetPath::Scale, TrackValue::Vector3(v)) => {
                    node.transform.scale = v;
                    node.transform.mark_dirty();
                }
                (TargetPath::Rotation, TrackValue::Quaternion(q)) => {
                    node.transform.rotation = q;
                    node.transform.mark_dirty();
                }
                _ => {}
            }
        }
    }
}

fn mix(a: TrackValue, b: TrackValue, t: f32) -> TrackValue {
    match (a, b) {
        (TrackValue::Vector3(va), TrackValue::Vector3(vb)) => TrackValue::Vector3(va.lerp(vb, t)),
        (TrackValue::Quaternion(qa), TrackValue::Quaternion(qb)) => {
            TrackValue::Quaternion(qa.slerp(qb, t))
        }
        (TrackValue::Scalar(sa), TrackValue::Scalar(sb)) => {
            TrackValue::Scalar(sa + (sb - sa) * t)
        }
        // Mismatched kinds for the same target: keep the first contribution
        (first, _) => first,
    }
}
