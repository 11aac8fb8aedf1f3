use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Affine3A, Vec3};
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform_system;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeKey, SkeletonKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// The scene graph.
///
/// `Scene` is a pure data layer: it owns the node hierarchy and the component
/// pools (meshes, cameras, lights, skeletons) and exposes the mutation API.
/// It performs no I/O and holds no render resources; the renderer observes it
/// through the [`crate::render::RenderTarget`] boundary.
pub struct Scene {
    pub id: u32,

    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,

    // ==== Component pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,
    pub skeletons: SlotMap<SkeletonKey, Skeleton>,

    /// Uniform ambient term (color, intensity).
    pub ambient: (Vec3, f32),

    pub active_camera: Option<NodeKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),

            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            skeletons: SlotMap::with_key(),

            ambient: (Vec3::ONE, 0.0),

            active_camera: None,
        }
    }

    // ========================================================================
    // Node management
    // ========================================================================

    /// Creates an empty root-level node.
    pub fn create_node(&mut self, name: &str) -> NodeKey {
        self.add_node(Node::new(name))
    }

    /// Adds a prebuilt node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Adds a prebuilt node as a child of `parent`.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeKey) -> NodeKey {
        let key = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        if let Some(c) = self.nodes.get_mut(key) {
            c.parent = Some(parent);
        }

        key
    }

    /// Removes a node and its whole subtree, cleaning up attached components.
    pub fn remove_node(&mut self, key: NodeKey) {
        let children = if let Some(node) = self.nodes.get(key) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        let parent = self.nodes.get(key).and_then(|n| n.parent);
        if let Some(parent_key) = parent {
            if let Some(p) = self.nodes.get_mut(parent_key)
                && let Some(pos) = p.children.iter().position(|&c| c == key)
            {
                p.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&r| r == key) {
            self.root_nodes.remove(pos);
        }

        if let Some(node) = self.nodes.get(key) {
            if let Some(mesh) = node.mesh {
                self.meshes.remove(mesh);
            }
            if let Some(camera) = node.camera {
                self.cameras.remove(camera);
            }
            if let Some(light) = node.light {
                self.lights.remove(light);
            }
            if let Some(skeleton) = node.skeleton {
                self.skeletons.remove(skeleton);
            }
        }

        if self.active_camera == Some(key) {
            self.active_camera = None;
        }

        self.nodes.remove(key);
    }

    /// Re-parents `child` under `parent`, detaching it from its old parent.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&c| c == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&r| r == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        } else {
            log::error!("Parent node not found during attach");
            self.root_nodes.push(child);
            return;
        }

        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Depth-first name lookup within the subtree rooted at `root`.
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeKey, name: &str) -> Option<NodeKey> {
        let node = self.get_node(root)?;
        if node.name == name {
            return Some(root);
        }
        for &child in &node.children {
            if let Some(found) = self.find_node_by_name(child, name) {
                return Some(found);
            }
        }
        None
    }

    // ========================================================================
    // Component helpers
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeKey {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_node(node)
    }

    pub fn add_camera(&mut self, camera: Camera) -> NodeKey {
        let mut node = Node::new("Camera");
        node.camera = Some(self.cameras.insert(camera));
        self.add_node(node)
    }

    pub fn add_light(&mut self, light: Light) -> NodeKey {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_node(node)
    }

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skeletons.insert(skeleton)
    }

    /// The active camera component, resolved through its node.
    #[must_use]
    pub fn active_camera_component(&self) -> Option<&Camera> {
        let node = self.get_node(self.active_camera?)?;
        self.cameras.get(node.camera?)
    }

    pub fn active_camera_component_mut(&mut self) -> Option<&mut Camera> {
        let camera_key = self.get_node(self.active_camera?)?.camera?;
        self.cameras.get_mut(camera_key)
    }

    /// Iterates lights attached to visible nodes, with their world matrices.
    pub fn iter_active_lights(&self) -> impl Iterator<Item = (&Light, &Affine3A)> {
        self.nodes.iter().filter_map(|(_, node)| {
            if !node.visible {
                return None;
            }
            let light = self.lights.get(node.light?)?;
            Some((light, &node.transform.world_matrix))
        })
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Refreshes world matrices for the whole graph. Must run once per tick
    /// before rendering.
    pub fn update(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &mut self.cameras, &self.root_nodes);
    }
}
