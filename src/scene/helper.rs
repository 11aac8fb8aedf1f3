use crate::scene::{NodeKey, Scene};
use crate::utils::BoundingBox;

/// World-space bounding-box visualization for a model subtree.
///
/// Tracks one node and recomputes the enclosing AABB of its subtree each
/// frame, after the transform pass. The runtime refreshes this on every tick
/// while a model is loaded; a renderer can draw the box as a wireframe.
#[derive(Debug, Clone)]
pub struct BoxHelper {
    pub target: NodeKey,
    pub bbox: Option<BoundingBox>,
}

impl BoxHelper {
    #[must_use]
    pub fn new(target: NodeKey) -> Self {
        Self {
            target,
            bbox: None,
        }
    }

    /// Recomputes the subtree AABB from current world matrices.
    pub fn update(&mut self, scene: &Scene) {
        self.bbox = subtree_bounding_box(scene, self.target);
    }
}

/// Enclosing world-space AABB of the subtree rooted at `root`.
///
/// Mesh nodes contribute their transformed shape bounds; bone and empty nodes
/// contribute their world position, so a skinned model without meshes at the
/// root still produces a usable box.
#[must_use]
pub fn subtree_bounding_box(scene: &Scene, root: NodeKey) -> Option<BoundingBox> {
    let node = scene.get_node(root)?;

    let mut combined: Option<BoundingBox> = None;

    let own = if let Some(mesh) = node.mesh.and_then(|key| scene.meshes.get(key)) {
        Some(
            mesh.primitive
                .local_bounding_box()
                .transform(node.world_matrix()),
        )
    } else {
        let mut point_box = BoundingBox::empty();
        point_box.expand_to_point(node.world_matrix().translation.into());
        Some(point_box)
    };

    if let Some(own_box) = own {
        combined = Some(own_box);
    }

    for &child in node.children() {
        if let Some(child_box) = subtree_bounding_box(scene, child) {
            combined = Some(match combined {
                Some(existing) => existing.union(&child_box),
                None => child_box,
            });
        }
    }

    combined
}
