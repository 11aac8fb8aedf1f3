//! Asset loading.
//!
//! Models are described by a JSON document (node hierarchy, optional
//! skeleton, animation clips) parsed into a [`ModelAsset`]. Loading runs on a
//! worker thread and delivers its result through a single-slot completion
//! channel that the engine polls between ticks. Completion timing relative
//! to render ticks is unordered, but the result is only ever applied at the
//! start of a tick.

pub mod loader;
pub mod model;

pub use loader::{ModelLoader, PendingModel};
pub use model::ModelAsset;
