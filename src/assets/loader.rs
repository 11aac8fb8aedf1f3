use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::thread;

use crate::assets::model::ModelAsset;
use crate::errors::{LumenError, Result};

/// Spawns background model loads.
pub struct ModelLoader;

impl ModelLoader {
    /// Starts loading a model file on a worker thread.
    ///
    /// Returns immediately; the result arrives through the returned
    /// [`PendingModel`], which the engine polls between ticks.
    pub fn spawn(path: impl Into<String>) -> PendingModel {
        let path = path.into();
        let (sender, receiver) = flume::bounded(1);

        let worker_path = path.clone();
        thread::spawn(move || {
            let result = load_model_file(&worker_path);
            // The receiver may already be gone if the engine shut down
            let _ = sender.send(result);
        });

        PendingModel { path, receiver }
    }
}

/// Reads and parses a model file synchronously.
pub fn load_model_file(path: impl AsRef<Path>) -> Result<ModelAsset> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            LumenError::AssetNotFound(path.display().to_string())
        } else {
            LumenError::Io(e)
        }
    })?;
    ModelAsset::parse(&bytes)
}

/// Handle to an in-flight model load.
///
/// The worker delivers exactly one result through a single-slot channel;
/// [`poll`](Self::poll) never blocks, so render ticks proceed at full rate
/// while the load is in flight.
pub struct PendingModel {
    path: String,
    receiver: flume::Receiver<Result<ModelAsset>>,
}

impl PendingModel {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checks for a completed load without blocking.
    ///
    /// `None` means still loading. A dead worker that never delivered shows
    /// up as [`LumenError::LoaderDisconnected`].
    pub fn poll(&self) -> Option<Result<ModelAsset>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => Some(Err(LumenError::LoaderDisconnected)),
        }
    }
}
