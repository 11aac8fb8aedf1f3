use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::Deserialize;

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::tracks::{Interpolation, KeyframeTrack};
use crate::errors::{LumenError, Result};
use crate::scene::mesh::{Mesh, Primitive};
use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::{NodeKey, Scene};

// ============================================================================
// Document schema (serde)
// ============================================================================

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

#[derive(Debug, Deserialize)]
struct ModelDoc {
    name: String,
    nodes: Vec<NodeDoc>,
    #[serde(default)]
    skeleton: Vec<usize>,
    #[serde(default)]
    clips: Vec<ClipDoc>,
}

#[derive(Debug, Deserialize)]
struct NodeDoc {
    name: String,
    #[serde(default)]
    parent: Option<usize>,
    #[serde(default)]
    translation: [f32; 3],
    #[serde(default = "default_rotation")]
    rotation: [f32; 4],
    #[serde(default = "default_scale")]
    scale: [f32; 3],
    #[serde(default)]
    mesh: Option<Primitive>,
    #[serde(default)]
    cast_shadows: bool,
}

#[derive(Debug, Deserialize)]
struct ClipDoc {
    name: String,
    tracks: Vec<TrackDoc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TargetDoc {
    Translation,
    Rotation,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum InterpolationDoc {
    Linear,
    Step,
}

impl Default for InterpolationDoc {
    fn default() -> Self {
        Self::Linear
    }
}

#[derive(Debug, Deserialize)]
struct TrackDoc {
    node: String,
    target: TargetDoc,
    #[serde(default)]
    interpolation: InterpolationDoc,
    times: Vec<f32>,
    /// One inner array per keyframe: 3 components for translation/scale,
    /// 4 (xyzw) for rotation.
    values: Vec<Vec<f32>>,
}

// ============================================================================
// Parsed asset
// ============================================================================

/// One node record of a parsed model.
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    /// Index into the asset's node list; parents always precede children.
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub mesh: Option<Primitive>,
    pub cast_shadows: bool,
}

/// A fully parsed and validated model: mesh hierarchy, optional skeleton,
/// animation clip set.
///
/// Parsing and validation happen before any scene mutation, so instantiation
/// is all-or-nothing: either the whole model enters the scene graph, or the
/// scene is left untouched.
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub name: String,
    pub nodes: Vec<ModelNode>,
    pub skeleton: Vec<usize>,
    pub clips: Vec<Arc<AnimationClip>>,
}

impl ModelAsset {
    /// Parses and validates a JSON model document.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let doc: ModelDoc = serde_json::from_slice(bytes)?;
        Self::from_doc(doc)
    }

    fn from_doc(doc: ModelDoc) -> Result<Self> {
        let node_count = doc.nodes.len();

        let mut nodes = Vec::with_capacity(node_count);
        for (index, node) in doc.nodes.into_iter().enumerate() {
            if let Some(parent) = node.parent {
                // Requiring parents to precede children keeps the hierarchy
                // acyclic and lets instantiation run in a single pass.
                if parent >= index {
                    return Err(LumenError::MalformedAsset(format!(
                        "node '{}' references parent {parent}, which does not precede it",
                        node.name
                    )));
                }
            }
            let rotation = Quat::from_array(node.rotation);
            // normalize() on a zero quaternion yields NaN components
            if rotation.length_squared() < 1e-6 {
                return Err(LumenError::MalformedAsset(format!(
                    "node '{}' has a zero-length rotation quaternion",
                    node.name
                )));
            }
            nodes.push(ModelNode {
                name: node.name,
                parent: node.parent,
                translation: Vec3::from_array(node.translation),
                rotation: rotation.normalize(),
                scale: Vec3::from_array(node.scale),
                mesh: node.mesh,
                cast_shadows: node.cast_shadows,
            });
        }

        for &bone in &doc.skeleton {
            if bone >= node_count {
                return Err(LumenError::MalformedAsset(format!(
                    "skeleton bone index {bone} out of range ({node_count} nodes)"
                )));
            }
        }

        let mut clips = Vec::with_capacity(doc.clips.len());
        for clip in doc.clips {
            clips.push(Arc::new(build_clip(clip)?));
        }

        Ok(Self {
            name: doc.name,
            nodes,
            skeleton: doc.skeleton,
            clips,
        })
    }

    /// Instantiates the model into the scene, returning the new root node.
    ///
    /// Validation already happened in [`parse`](Self::parse); this only
    /// performs insertions and cannot fail partway.
    pub fn instantiate(&self, scene: &mut Scene) -> NodeKey {
        let root = scene.create_node(&self.name);

        let mut keys = Vec::with_capacity(self.nodes.len());
        for record in &self.nodes {
            let mut node = Node::new(&record.name);
            node.transform.position = record.translation;
            node.transform.rotation = record.rotation;
            node.transform.scale = record.scale;

            if let Some(primitive) = record.mesh {
                let mut mesh = Mesh::new(&record.name, primitive);
                mesh.cast_shadows = record.cast_shadows;
                node.mesh = Some(scene.meshes.insert(mesh));
            }

            // Parents precede children, so the parent key already exists
            let parent_key = record.parent.map_or(root, |p| keys[p]);
            let key = scene.add_to_parent(node, parent_key);
            keys.push(key);
        }

        if !self.skeleton.is_empty() {
            let bones = self.skeleton.iter().map(|&i| keys[i]).collect();
            let skeleton_key = scene.add_skeleton(Skeleton::new(bones));
            if let Some(root_node) = scene.get_node_mut(root) {
                root_node.skeleton = Some(skeleton_key);
            }
        }

        root
    }
}

fn build_clip(doc: ClipDoc) -> Result<AnimationClip> {
    let clip_name = doc.name;
    let mut tracks = Vec::with_capacity(doc.tracks.len());

    for track in doc.tracks {
        if track.times.is_empty() {
            return Err(LumenError::MalformedAsset(format!(
                "clip '{clip_name}': track for '{}' has no keyframes",
                track.node
            )));
        }
        if track.times.len() != track.values.len() {
            return Err(LumenError::MalformedAsset(format!(
                "clip '{clip_name}': track for '{}' has {} times but {} values",
                track.node,
                track.times.len(),
                track.values.len()
            )));
        }
        if track.times.windows(2).any(|w| w[1] < w[0]) {
            return Err(LumenError::MalformedAsset(format!(
                "clip '{clip_name}': track for '{}' has non-ascending times",
                track.node
            )));
        }

        let interpolation = match track.interpolation {
            InterpolationDoc::Linear => Interpolation::Linear,
            InterpolationDoc::Step => Interpolation::Step,
        };

        let components = match track.target {
            TargetDoc::Rotation => 4,
            TargetDoc::Translation | TargetDoc::Scale => 3,
        };
        if let Some(bad) = track.values.iter().find(|v| v.len() != components) {
            return Err(LumenError::MalformedAsset(format!(
                "clip '{clip_name}': track for '{}' expects {components}-component values, got {}",
                track.node,
                bad.len()
            )));
        }

        let (target, data) = match track.target {
            TargetDoc::Translation | TargetDoc::Scale => {
                let values = track
                    .values
                    .iter()
                    .map(|v| Vec3::new(v[0], v[1], v[2]))
                    .collect();
                let target = if track.target == TargetDoc::Translation {
                    TargetPath::Translation
                } else {
                    TargetPath::Scale
                };
                (
                    target,
                    TrackData::Vector3(KeyframeTrack::new(track.times, values, interpolation)),
                )
            }
            TargetDoc::Rotation => {
                let mut values = Vec::with_capacity(track.values.len());
                for v in &track.values {
                    let q = Quat::from_xyzw(v[0], v[1], v[2], v[3]);
                    if q.length_squared() < 1e-6 {
                        return Err(LumenError::MalformedAsset(format!(
                            "clip '{clip_name}': track for '{}' has a zero-length rotation keyframe",
                            track.node
                        )));
                    }
                    values.push(q.normalize());
                }
                (
                    TargetPath::Rotation,
                    TrackData::Quaternion(KeyframeTrack::new(track.times, values, interpolation)),
                )
            }
        };

        tracks.push(Track {
            meta: TrackMeta {
                node_name: track.node,
                target,
            },
            data,
        });
    }

    Ok(AnimationClip::new(clip_name, tracks))
}
