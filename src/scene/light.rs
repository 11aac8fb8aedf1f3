use glam::Vec3;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Shadow-casting configuration.
///
/// A shadow-casting light owns an orthographic shadow-camera sub-frustum:
/// `extent` is the half-size of the square slab, `near`/`far` bound it along
/// the light direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowConfig {
    /// Shadow map resolution (square, in texels).
    pub map_size: u32,
    /// Half-extent of the orthographic shadow frustum.
    pub extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 1024,
            extent: 700.0,
            near: 100.0,
            far: 900.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionalLight;

#[derive(Debug, Clone)]
pub struct PointLight {
    pub range: f32,
}

/// Rectangular area light, emitting from a `width` x `height` panel.
#[derive(Debug, Clone)]
pub struct AreaLight {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub enum LightKind {
    Directional(DirectionalLight),
    Point(PointLight),
    Area(AreaLight),
}

/// Light component.
#[derive(Debug, Clone)]
pub struct Light {
    pub uuid: Uuid,
    pub id: u64,
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,

    pub cast_shadows: bool,
    pub shadow: Option<ShadowConfig>,
}

impl Light {
    fn generate_id_from_uuid(uuid: &Uuid) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        uuid.hash(&mut hasher);
        hasher.finish()
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            id: Self::generate_id_from_uuid(&uuid),
            color,
            intensity,
            kind: LightKind::Directional(DirectionalLight),
            cast_shadows: false,
            shadow: None,
        }
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, range: f32) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            id: Self::generate_id_from_uuid(&uuid),
            color,
            intensity,
            kind: LightKind::Point(PointLight { range }),
            cast_shadows: false,
            shadow: None,
        }
    }

    #[must_use]
    pub fn new_area(color: Vec3, intensity: f32, width: f32, height: f32) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            id: Self::generate_id_from_uuid(&uuid),
            color,
            intensity,
            kind: LightKind::Area(AreaLight { width, height }),
            cast_shadows: false,
            shadow: None,
        }
    }

    /// Enables shadow casting with the given frustum configuration.
    #[must_use]
    pub fn with_shadow(mut self, shadow: ShadowConfig) -> Self {
        self.cast_shadows = true;
        self.shadow = Some(shadow);
        self
    }
}
