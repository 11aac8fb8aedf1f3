use crate::scene::NodeKey;

/// Skeleton component: the ordered set of bone nodes a skinned model animates.
///
/// Joint-matrix computation is a renderer concern and out of scope here; the
/// runtime only needs the bone set so animation tracks can be bound to it.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub bones: Vec<NodeKey>,
}

impl Skeleton {
    #[must_use]
    pub fn new(bones: Vec<NodeKey>) -> Self {
        Self { bones }
    }
}
