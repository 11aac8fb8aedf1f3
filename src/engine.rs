//! The engine context.
//!
//! [`Engine`] is the explicit aggregate of everything the runtime mutates
//! each tick: the scene graph, the animation controller, in-flight asset
//! loads, the command queue and the frame scheduler. There is no global
//! state; callers own the engine and pass it where it is needed.

use std::collections::VecDeque;

use crate::animation::{AnimationController, ControllerState};
use crate::assets::{ModelLoader, PendingModel};
use crate::errors::Result;
use crate::render::RenderTarget;
use crate::scene::helper::BoxHelper;
use crate::scene::{NodeKey, Scene};

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Clip started automatically when a model finishes loading.
    pub default_clip: String,
    /// Crossfade duration in seconds.
    pub fade_duration: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_clip: "Idle".to_string(),
            fade_duration: 0.5,
        }
    }
}

/// A deferred request against the engine.
///
/// Commands are queued from anywhere that holds the engine (input handling,
/// UI, tests) and drained at the start of the next tick, so all mutation
/// happens at one well-defined point in the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Crossfade to the named animation clip.
    SelectAnimation(String),
}

/// Tracks whether a frame callback is outstanding.
///
/// At most one frame is ever pending: [`request`](Self::request) is
/// idempotent while a frame is outstanding, and [`take`](Self::take) clears
/// the flag when the tick runs. Teardown with a pending request is fine; the
/// flag simply goes stale with the scheduler.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a frame. Returns `false` if one is already pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consumes the pending request at the start of a tick.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// The per-application runtime context.
pub struct Engine {
    config: EngineConfig,

    pub scene: Scene,
    pub controller: AnimationController,
    pub scheduler: FrameScheduler,

    commands: VecDeque<Command>,
    pending_model: Option<PendingModel>,
    model_root: Option<NodeKey>,
    box_helper: Option<BoxHelper>,

    time: f32,
    frame_count: u64,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let controller = AnimationController::new(config.fade_duration);
        Self {
            config,
            scene: Scene::new(),
            controller,
            scheduler: FrameScheduler::new(),
            commands: VecDeque::new(),
            pending_model: None,
            model_root: None,
            box_helper: None,
            time: 0.0,
            frame_count: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Root node of the loaded model, once a load has completed successfully.
    #[must_use]
    pub fn model_root(&self) -> Option<NodeKey> {
        self.model_root
    }

    /// Bounding-box helper tracking the loaded model.
    #[must_use]
    pub fn box_helper(&self) -> Option<&BoxHelper> {
        self.box_helper.as_ref()
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Starts loading a model file in the background.
    ///
    /// The result is picked up at the start of a later tick. Issuing a new
    /// load while one is in flight abandons the earlier one.
    pub fn load_model(&mut self, path: impl Into<String>) {
        let path = path.into();
        if let Some(pending) = &self.pending_model {
            log::warn!(
                "Replacing in-flight load of '{}' with '{path}'",
                pending.path()
            );
        }
        log::info!("Loading model '{path}'");
        self.pending_model = Some(ModelLoader::spawn(path));
    }

    /// Queues a command for the next tick.
    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Runs one simulation tick: drain commands, poll in-flight loads,
    /// advance animation, refresh world matrices and helpers.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.frame_count += 1;

        self.drain_commands();
        self.poll_pending_load();

        self.controller.advance(dt, &mut self.scene);
        self.scene.update();

        if let Some(helper) = &mut self.box_helper {
            helper.update(&self.scene);
        }
    }

    /// Presents the scene through the active camera. Returns `false` when no
    /// active camera is set.
    pub fn render(&mut self, target: &mut dyn RenderTarget) -> bool {
        let Some(camera) = self.scene.active_camera_component() else {
            return false;
        };
        target.render(&self.scene, camera);
        true
    }

    /// Applies a viewport size change to the camera and the render target.
    ///
    /// A zero dimension (minimized window) carries no usable aspect ratio;
    /// the previous projection and surface size are kept and the event is
    /// logged. Returns whether the resize was applied.
    pub fn resize(&mut self, width: u32, height: u32, target: &mut dyn RenderTarget) -> bool {
        if width == 0 || height == 0 {
            log::warn!("Ignoring degenerate viewport size {width}x{height}");
            return false;
        }

        if let Some(camera) = self.scene.active_camera_component_mut() {
            camera.set_aspect(width as f32 / height as f32);
        }
        target.set_size(width, height);
        true
    }

    fn drain_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::SelectAnimation(name) => {
                    if let Err(e) = self.controller.change_animation(&name) {
                        log::warn!("Animation selection rejected: {e}");
                    }
                }
            }
        }
    }

    fn poll_pending_load(&mut self) {
        let Some(result) = self.pending_model.as_ref().and_then(PendingModel::poll) else {
            return;
        };
        let Some(pending) = self.pending_model.take() else {
            return;
        };

        match result {
            Ok(asset) => {
                let root = asset.instantiate(&mut self.scene);

                match self.controller.initialize(
                    &self.scene,
                    root,
                    &asset.clips,
                    &self.config.default_clip,
                ) {
                    Ok(()) => {
                        log::info!(
                            "Model '{}' loaded: {} nodes, {} clips",
                            asset.name,
                            asset.nodes.len(),
                            asset.clips.len()
                        );
                        // A replacement load supplants the previous model;
                        // its subtree must not linger in the scene.
                        if let Some(old_root) = self.model_root.take() {
                            self.scene.remove_node(old_root);
                        }
                        self.model_root = Some(root);
                        self.box_helper = Some(BoxHelper::new(root));
                    }
                    Err(e) => {
                        log::error!(
                            "Model '{}' from '{}' rejected: {e}",
                            asset.name,
                            pending.path()
                        );
                        self.scene.remove_node(root);
                    }
                }
            }
            Err(e) => {
                // A failed load leaves the scene untouched; the loop keeps
                // running whatever is already in it.
                log::error!("Failed to load model '{}': {e}", pending.path());
            }
        }
    }

    /// Crossfades to the named clip immediately, bypassing the command queue.
    pub fn select_animation(&mut self, name: &str) -> Result<()> {
        self.controller.change_animation(name)
    }

    /// Whether a model load is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending_model.is_some()
    }

    /// Whether the animation controller has a model to drive.
    #[must_use]
    pub fn has_animation(&self) -> bool {
        !matches!(self.controller.state(), ControllerState::Idle)
    }
}
