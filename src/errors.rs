//! Error Types
//!
//! The main error type [`LumenError`] covers all failure modes of the runtime:
//! asset loading and decoding, animation clip lookup, and the windowing shell.
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, LumenError>`. Errors are always returned to the
//! caller as values; a render tick never propagates an error partway.

use thiserror::Error;

/// The main error type for the Lumen runtime.
#[derive(Error, Debug)]
pub enum LumenError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// File I/O error while reading an asset.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The model description failed to parse.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model description parsed but is internally inconsistent
    /// (e.g. a node refers to a parent index that does not exist).
    #[error("Malformed asset: {0}")]
    MalformedAsset(String),

    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The background loader worker disappeared without delivering a result.
    #[error("Asset loader disconnected before completion")]
    LoaderDisconnected,

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A clip name was requested that is not present in the loaded clip set.
    #[error("Unknown animation clip: {0}")]
    UnknownClip(String),

    // ========================================================================
    // Application Shell Errors
    // ========================================================================
    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation error (winit).
    #[error("Window error: {0}")]
    Os(#[from] winit::error::OsError),
}

/// Alias for `Result<T, LumenError>`.
pub type Result<T> = std::result::Result<T, LumenError>;
