use crate::scene::NodeKey;

/// The node property a track writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // transform.position
    Rotation,    // transform.rotation
    Scale,       // transform.scale
}

/// Maps track `track_index` of a clip to the target property of a resolved
/// scene node.
#[derive(Debug, Clone)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeKey,
    pub target: TargetPath,
}
