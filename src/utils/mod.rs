//! Small utilities shared across the runtime.

pub mod bbox;
pub mod time;

pub use bbox::BoundingBox;
pub use time::Timer;
