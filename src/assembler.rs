use std::fmt;

use crate::artifacts::bundle::ArtifactBundle;
use crate::error::{PredictError, Stage};
use crate::features::{ColumnPolicy, FeatureRow, FeatureTable};

// ---------------------------------------------------------------------------
// Prediction – what the user sees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Decoded class label.
    Label(String),
    /// Raw model output (no decoder loaded).
    Score(f64),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Label(s) => write!(f, "{s}"),
            Prediction::Score(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.0}"),
            Prediction::Score(v) => write!(f, "{v:.2}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Turns one [`FeatureRow`] into a [`Prediction`] using whatever the bundle
/// provides.
///
/// Flow:
/// ```text
///  row ─► canonical table ─┬─ pipeline? ──► predict_table ──────────┐
///                          └─ otherwise ─► reorder? ► scale? ► model ┤
///                                                                    ▼
///                                                         decode? ─► Prediction
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    pub policy: ColumnPolicy,
}

impl Assembler {
    pub fn new(policy: ColumnPolicy) -> Self {
        Self { policy }
    }

    pub fn predict(
        &self,
        bundle: &ArtifactBundle,
        row: &FeatureRow,
    ) -> Result<Prediction, PredictError> {
        let table = FeatureTable::from_row(row);
        let raw = self.raw_prediction(bundle, &table)?;

        // A pipeline brings its own encoding; only the component path decodes.
        let decoder = match bundle.pipeline() {
            Some(_) => None,
            None => bundle.label_decoder(),
        };
        match decoder {
            Some(decoder) => decoder.inverse_map(raw).map(Prediction::Label),
            None => Ok(Prediction::Score(raw)),
        }
    }

    fn raw_prediction(
        &self,
        bundle: &ArtifactBundle,
        table: &FeatureTable,
    ) -> Result<f64, PredictError> {
        if let Some(pipeline) = bundle.pipeline() {
            log::debug!("Predicting through pipeline");
            return first(pipeline.predict_table(table, self.policy)?, Stage::Pipeline);
        }

        let model = bundle.model().ok_or(PredictError::NoModelAvailable)?;

        let table = match bundle.feature_order() {
            Some(order) => table.select(order, self.policy)?,
            None => table.clone(),
        };
        let x = match bundle.scaler() {
            Some(scaler) => scaler.transform(&table.to_matrix())?,
            None => table.to_matrix(),
        };
        log::debug!("Predicting with model on columns {:?}", table.columns());

        first(model.predict(&x)?, Stage::Model)
    }
}

fn first(output: Vec<f64>, stage: Stage) -> Result<f64, PredictError> {
    output
        .into_iter()
        .next()
        .ok_or_else(|| PredictError::at(stage, "empty prediction output"))
}
