use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::artifacts::resolver::Slot;

// ---------------------------------------------------------------------------
// Start-up errors
// ---------------------------------------------------------------------------

/// An artifact file exists but could not be turned into a usable component.
///
/// Absent files are never reported through this type; they simply leave
/// their slot empty.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("cannot read {slot} artifact {}: {source}", path.display())]
    Read {
        slot: Slot,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {slot} artifact {}: {source}", path.display())]
    Parse {
        slot: Slot,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} holds a '{found}' artifact, expected '{}'", path.display(), slot.kind())]
    WrongKind {
        slot: Slot,
        path: PathBuf,
        found: &'static str,
    },

    #[error("invalid {slot} artifact {}: {reason}", path.display())]
    Invalid {
        slot: Slot,
        path: PathBuf,
        reason: String,
    },
}

impl ArtifactLoadError {
    pub fn slot(&self) -> Slot {
        match self {
            ArtifactLoadError::Read { slot, .. }
            | ArtifactLoadError::Parse { slot, .. }
            | ArtifactLoadError::WrongKind { slot, .. }
            | ArtifactLoadError::Invalid { slot, .. } => *slot,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-request errors
// ---------------------------------------------------------------------------

/// Which step of the inference pipeline raised a [`PredictError::Prediction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pipeline,
    Scaler,
    Model,
    Decoder,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pipeline => "pipeline",
            Stage::Scaler => "scaler",
            Stage::Model => "model",
            Stage::Decoder => "label decoder",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong while turning one feature row into a
/// displayable prediction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    #[error(
        "no model available: neither {} nor {} was loaded",
        Slot::Pipeline.file_name(),
        Slot::Model.file_name()
    )]
    NoModelAvailable,

    #[error("column mismatch (missing: {missing:?}, unexpected: {unexpected:?})")]
    ColumnMismatch {
        /// Columns the feature order asks for but the row lacks.
        missing: Vec<String>,
        /// Row columns the feature order does not name (strict policy only).
        unexpected: Vec<String>,
    },

    #[error("{stage} failed: {reason}")]
    Prediction { stage: Stage, reason: String },
}

impl PredictError {
    pub fn at(stage: Stage, reason: impl Into<String>) -> Self {
        PredictError::Prediction {
            stage,
            reason: reason.into(),
        }
    }
}
