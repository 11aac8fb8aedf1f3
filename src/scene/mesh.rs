use crate::utils::BoundingBox;
use glam::Vec3;
use serde::Deserialize;

/// Placeholder geometry shapes.
///
/// Real drawing primitives live behind the [`crate::render::RenderTarget`]
/// boundary; the scene only needs enough shape data for setup and for
/// bounding-volume computation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Plane { width: f32, height: f32 },
    Cuboid { x: f32, y: f32, z: f32 },
    Sphere { radius: f32 },
}

impl Primitive {
    /// Local-space bounding box of the shape, centered at the origin.
    #[must_use]
    pub fn local_bounding_box(&self) -> BoundingBox {
        match *self {
            Primitive::Plane { width, height } => BoundingBox::from_min_max(
                Vec3::new(-width * 0.5, -height * 0.5, 0.0),
                Vec3::new(width * 0.5, height * 0.5, 0.0),
            ),
            Primitive::Cuboid { x, y, z } => BoundingBox::from_min_max(
                Vec3::new(-x * 0.5, -y * 0.5, -z * 0.5),
                Vec3::new(x * 0.5, y * 0.5, z * 0.5),
            ),
            Primitive::Sphere { radius } => {
                BoundingBox::from_min_max(Vec3::splat(-radius), Vec3::splat(radius))
            }
        }
    }
}

/// Mesh component: a named placeholder shape plus shadow flags.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub primitive: Primitive,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str, primitive: Primitive) -> Self {
        Self {
            name: name.to_string(),
            primitive,
            cast_shadows: false,
            receive_shadows: false,
        }
    }
}
