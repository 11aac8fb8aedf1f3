//! Scene graph module.
//!
//! Manages the scene hierarchy and its components:
//! - `Node`: scene node (parent/child links and a transform)
//! - `Transform`: TRS component with cached matrices and dirty tracking
//! - `Scene`: the container that owns everything rendered each frame
//! - `Camera`: perspective projection component
//! - `Light`: directional / point / area light component
//! - `Mesh`: placeholder geometry component
//! - `transform_system`: decoupled world-matrix update pass

pub mod camera;
pub mod helper;
pub mod light;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use camera::Camera;
pub use helper::BoxHelper;
pub use light::{AreaLight, Light, LightKind, PointLight, ShadowConfig};
pub use mesh::{Mesh, Primitive};
pub use node::Node;
pub use scene::Scene;
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
    pub struct SkeletonKey;
}
