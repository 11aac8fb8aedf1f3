//! Windowed application shell.
//!
//! [`App`] wires an [`Engine`] into a winit event loop: `RedrawRequested`
//! drives one engine tick, window resizes flow into [`Engine::resize`], and
//! close requests (or an [`ExitHandle`] trip) tear the loop down. Frame
//! pacing goes through the engine's [`FrameScheduler`]: each tick consumes
//! the pending request and schedules exactly one successor, so no callbacks
//! pile up and none leak past shutdown.
//!
//! [`FrameScheduler`]: crate::engine::FrameScheduler

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::engine::{Engine, EngineConfig};
use crate::errors::Result;
use crate::render::{HeadlessTarget, RenderTarget};
use crate::utils::Timer;

/// Per-frame user callback: engine, total time, delta time (seconds).
pub type UpdateFn = Box<dyn FnMut(&mut Engine, f32, f32)>;

/// Cloneable handle that requests event-loop shutdown from anywhere.
#[derive(Debug, Clone, Default)]
pub struct ExitHandle {
    flag: Arc<AtomicBool>,
}

impl ExitHandle {
    pub fn request_exit(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub struct App {
    window: Option<Arc<Window>>,
    pub title: String,
    pub engine: Engine,
    target: Box<dyn RenderTarget>,

    update_fn: Option<UpdateFn>,
    timer: Timer,
    exit: ExitHandle,
}

impl App {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            window: None,
            title: "Lumen".into(),
            engine: Engine::new(config),
            target: Box::new(HeadlessTarget::new(1, 1)),
            update_fn: None,
            timer: Timer::new(),
            exit: ExitHandle::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the render target (configuration stage).
    #[must_use]
    pub fn with_target(mut self, target: Box<dyn RenderTarget>) -> Self {
        self.target = target;
        self
    }

    pub fn set_update_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Engine, f32, f32) + 'static,
    {
        self.update_fn = Some(Box::new(f));
        self
    }

    /// A handle that shuts the event loop down when tripped.
    #[must_use]
    pub fn exit_handle(&self) -> ExitHandle {
        self.exit.clone()
    }

    pub fn run(mut self) -> Result<()> {
        let _ = env_logger::try_init();

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn tick(&mut self) {
        self.timer.tick();
        let dt = self.timer.dt_seconds();
        let total = self.timer.elapsed.as_secs_f32();

        if let Some(update_fn) = &mut self.update_fn {
            update_fn(&mut self.engine, total, dt);
        }

        self.engine.scheduler.take();
        self.engine.update(dt);
        self.engine.render(self.target.as_mut());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.engine.resize(size.width, size.height, self.target.as_mut());

        self.window = Some(window.clone());
        self.timer = Timer::new();

        self.engine.scheduler.request();
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.exit.request_exit();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.engine
                    .resize(physical_size.width, physical_size.height, self.target.as_mut());
            }
            WindowEvent::RedrawRequested => {
                if self.exit.is_set() {
                    event_loop.exit();
                    return;
                }

                self.tick();

                if self.engine.scheduler.request()
                    && let Some(window) = &self.window
                {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit.is_set() {
            event_loop.exit();
            return;
        }
        if self.engine.scheduler.is_pending()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop the window before the loop unwinds; the stale scheduler flag
        // dies with the engine, so no callback outlives shutdown.
        self.engine.scheduler.take();
        self.window = None;
        log::info!("Shut down after {} frames", self.engine.frame_count());
    }
}
