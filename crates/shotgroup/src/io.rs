//! Seams for the two external services.
//!
//! The detection service and the persistence sink are black boxes to the
//! engine; these traits pin down the shapes crossing the boundary. The
//! file-backed implementations serve the CLI and tests, standing in for
//! the remote services.

use std::fs;
use std::path::{Path, PathBuf};

use crate::response::{DetectionParseError, DetectionResponse};
use crate::result::TrainingResult;

/// Errors from a detection source.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("failed to read detection response: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] DetectionParseError),
}

/// Errors from a result sink. The caller keeps the session intact on
/// failure so the user's corrections survive a retry.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("failed to write training result: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode training result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Produces candidate holes for an already-captured image.
pub trait DetectionSource {
    fn detect(&mut self, image: &Path) -> Result<DetectionResponse, SourceError>;
}

/// Accepts the final, user-corrected point set plus an optional edited
/// snapshot image.
pub trait ResultSink {
    fn store(&mut self, result: &TrainingResult, snapshot: Option<&[u8]>) -> Result<(), SinkError>;
}

/// Detection source reading a pre-recorded response from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileSource {
        JsonFileSource { path: path.into() }
    }
}

impl DetectionSource for JsonFileSource {
    fn detect(&mut self, _image: &Path) -> Result<DetectionResponse, SourceError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(DetectionResponse::parse(&json)?)
    }
}

/// Result sink writing pretty-printed JSON (and the snapshot bytes, when
/// given) next to each other on disk.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileSink {
        JsonFileSink { path: path.into() }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.path.with_extension("snapshot.png")
    }
}

impl ResultSink for JsonFileSink {
    fn store(&mut self, result: &TrainingResult, snapshot: Option<&[u8]>) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(result)?;
        fs::write(&self.path, json)?;
        if let Some(bytes) = snapshot {
            fs::write(self.snapshot_path(), bytes)?;
        }
        log::info!(
            "stored training result with {} points at {}",
            result.points.len(),
            self.path.display()
        );
        Ok(())
    }
}
