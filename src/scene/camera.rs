use glam::{Affine3A, Mat4};
use std::borrow::Cow;
use uuid::Uuid;

/// Perspective camera component.
///
/// The aspect ratio is derived from the output surface and is only written by
/// the resize path ([`crate::engine::Engine::resize`]); nothing else mutates it.
#[derive(Debug, Clone)]
pub struct Camera {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,

    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Camera {
    /// Creates a perspective camera. `fov_degrees` is the vertical field of
    /// view in degrees.
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            uuid: Uuid::new_v4(),
            name: Cow::Borrowed("Camera"),
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    /// Sets the aspect ratio and rebuilds the projection matrix.
    ///
    /// Called by the resize path; `aspect` must be finite and positive.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        // glam's perspective_rh targets the WGPU/Vulkan depth range (0 to 1)
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    /// Refreshes the view matrices from the owning node's world transform.
    pub fn update_view_matrix(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }
}
