//! Render output boundary.
//!
//! The runtime produces a fully updated scene graph each tick; what happens
//! to it afterwards is behind [`RenderTarget`]. GPU submission, swapchain
//! management and shading live on the far side of this trait and are out of
//! scope here. [`HeadlessTarget`] is the built-in implementation used by the
//! default application shell and by tests.

use crate::scene::{Camera, Scene};

/// Abstract render output.
///
/// The target is the single owner of the output dimensions; nothing else in
/// the runtime stores a viewport size.
pub trait RenderTarget {
    /// Current output size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Resizes the output surface. Callers guarantee both dimensions are
    /// non-zero.
    fn set_size(&mut self, width: u32, height: u32);

    /// Presents one frame of the given scene through the given camera.
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// A render target that consumes frames without producing pixels.
#[derive(Debug)]
pub struct HeadlessTarget {
    width: u32,
    height: u32,
    frames_rendered: u64,
}

impl HeadlessTarget {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames_rendered: 0,
        }
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl RenderTarget for HeadlessTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, _scene: &Scene, _camera: &Camera) {
        self.frames_rendered += 1;
    }
}
