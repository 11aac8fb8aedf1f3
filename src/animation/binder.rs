use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeKey, Scene};

pub struct Binder;

impl Binder {
    /// Resolves a clip's track target names to node keys within the subtree
    /// rooted at `root`. Tracks whose target name is absent from the subtree
    /// are silently skipped, matching the tolerant binding of retained-mode
    /// scene libraries.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeKey, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            if let Some(node) = scene.find_node_by_name(root, &track.meta.node_name) {
                bindings.push(PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                });
            } else {
                log::debug!(
                    "animation track target '{}' not found under model root",
                    track.meta.node_name
                );
            }
        }

        bindings
    }
}
