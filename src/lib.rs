//! Lumen: a minimal real-time rendering and animation runtime.
//!
//! The crate is organized around an explicit [`Engine`] context that owns a
//! [`Scene`] graph, an [`AnimationController`] with named-clip crossfades,
//! background model loading, and a frame scheduler. The windowed shell in
//! [`app`] drives the engine from a winit event loop; tests and headless
//! consumers drive it directly.

pub mod animation;
pub mod app;
pub mod assets;
pub mod engine;
pub mod errors;
pub mod render;
pub mod scene;
pub mod utils;

pub use animation::{
    AnimationAction, AnimationClip, AnimationController, AnimationMixer, Binder, ControllerState,
    LoopMode,
};
pub use app::{App, ExitHandle};
pub use assets::{ModelAsset, ModelLoader, PendingModel};
pub use engine::{Command, Engine, EngineConfig, FrameScheduler};
pub use errors::{LumenError, Result};
pub use render::{HeadlessTarget, RenderTarget};
pub use scene::{Camera, Light, Node, Scene};
pub use utils::{BoundingBox, Timer};
