//! Transform system.
//!
//! Walks the scene hierarchy and refreshes world matrices, decoupled from
//! `Scene` so it only borrows the node pool and the camera pool. Uses an
//! explicit stack instead of recursion so deep hierarchies cannot overflow.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::{CameraKey, NodeKey};

/// Updates world matrices for every node reachable from `roots`.
///
/// A child recomputes its world matrix when its own local matrix changed or
/// any ancestor's did. Camera components attached to updated nodes get their
/// view matrices refreshed from the new world transform.
pub fn update_hierarchy(
    nodes: &mut SlotMap<NodeKey, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    roots: &[NodeKey],
) {
    // (node, parent world matrix, ancestor changed)
    let mut stack: Vec<(NodeKey, Affine3A, bool)> = roots
        .iter()
        .map(|&r| (r, Affine3A::IDENTITY, false))
        .collect();

    while let Some((key, parent_world, ancestor_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(key) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let changed = local_changed || ancestor_changed;

        if changed {
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);

            if let Some(camera_key) = node.camera
                && let Some(camera) = cameras.get_mut(camera_key)
            {
                camera.update_view_matrix(&world);
            }
        }

        let world = *node.transform.world_matrix();
        for &child in &node.children {
            stack.push((child, world, changed));
        }
    }
}
