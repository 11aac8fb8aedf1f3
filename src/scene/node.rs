use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeKey, SkeletonKey};
use glam::Affine3A;

/// A scene node.
///
/// Nodes form a tree through parent/child handles. Heavyweight components
/// (mesh, camera, light, skeleton binding) live in the scene's component
/// pools; the node only carries their keys plus the hot per-frame data:
/// hierarchy links and the [`Transform`].
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    pub transform: Transform,
    pub visible: bool,

    // Component keys into the scene's pools
    pub mesh: Option<MeshKey>,
    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
    pub skeleton: Option<SkeletonKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
            camera: None,
            light: None,
            skeleton: None,
        }
    }

    /// Parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Read-only slice of child handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// World transformation matrix, updated by the transform pass each frame.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
