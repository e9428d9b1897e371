//! Artifact layer: on-disk formats, capabilities, and start-up resolution.
//!
//! Architecture:
//! ```text
//!  pipeline.json ─┐         (present → the other four are never read)
//!  student_model.json
//!  scaler.json     ├──►┌──────────┐
//!  label_encoder.json  │ resolver │  exists? parse + kind check
//!  features.json  ─┘   └──────────┘
//!                            │
//!                            ▼
//!                    ┌────────────────┐
//!                    │ ArtifactBundle │  immutable, shared via Arc
//!                    └────────────────┘
//! ```
//!
//! Each loaded component is reached only through the capability it
//! guarantees, so the assembler never has to guess what a file contains.

pub mod bundle;
pub mod model;
pub mod resolver;

use crate::error::PredictError;
use crate::features::{ColumnPolicy, FeatureTable};

/// Numeric matrix: rows of feature values.
pub type Matrix = Vec<Vec<f64>>;

/// Predict-only capability (a trained model).
pub trait Predict: Send + Sync {
    /// One prediction per input row.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, PredictError>;
}

/// Numeric transform capability (a fitted scaler).
pub trait Transform: Send + Sync {
    fn transform(&self, x: &[Vec<f64>]) -> Result<Matrix, PredictError>;
}

/// Mapping between model output codes and the original labels.
pub trait InverseMap: Send + Sync {
    fn inverse_map(&self, code: f64) -> Result<String, PredictError>;

    /// Every label the decoder knows, in code order.
    fn labels(&self) -> Vec<String>;
}

/// Combined transform + predict capability working on named columns.
pub trait PredictTable: Send + Sync {
    /// `policy` decides what happens to columns the pipeline's own feature
    /// order does not name.
    fn predict_table(
        &self,
        table: &FeatureTable,
        policy: ColumnPolicy,
    ) -> Result<Vec<f64>, PredictError>;
}
