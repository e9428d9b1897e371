use serde::{Deserialize, Serialize};

use super::{InverseMap, Matrix, Predict, PredictTable, Transform};
use crate::error::{PredictError, Stage};
use crate::features::{ColumnPolicy, FeatureTable};

// ---------------------------------------------------------------------------
// Artifact – one file on disk
// ---------------------------------------------------------------------------

/// Contents of a single artifact file, tagged by `kind`.
///
/// ```json
/// { "kind": "scaler", "scaler": { "type": "standard", "mean": [...], "scale": [...] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    Pipeline(PipelineArtifact),
    Model(ModelArtifact),
    Scaler(ScalerArtifact),
    LabelEncoder(LabelEncoder),
    FeatureOrder(FeatureOrder),
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::Pipeline(_) => "pipeline",
            Artifact::Model(_) => "model",
            Artifact::Scaler(_) => "scaler",
            Artifact::LabelEncoder(_) => "label_encoder",
            Artifact::FeatureOrder(_) => "feature_order",
        }
    }

    /// Shape checks that can be done without any input row.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Artifact::Pipeline(p) => p.validate(),
            Artifact::Model(m) => m.estimator.validate(),
            Artifact::Scaler(s) => s.scaler.validate(),
            Artifact::LabelEncoder(e) => e.validate(),
            Artifact::FeatureOrder(o) => o.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub estimator: Estimator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub scaler: Scaler,
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// A trained predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    /// Always predicts `value`.
    Constant { value: f64 },
    /// Regression score `coef · x + intercept`.
    Linear { coef: Vec<f64>, intercept: f64 },
    /// Linear classifier returning the winning class code.
    ///
    /// A single coefficient row with two classes is the binary form: a
    /// positive decision picks `classes[1]`.
    Logistic {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        classes: Vec<f64>,
    },
}

impl Estimator {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Estimator::Constant { .. } => Ok(()),
            Estimator::Linear { coef, .. } if coef.is_empty() => {
                Err("linear estimator has no coefficients".to_string())
            }
            Estimator::Linear { .. } => Ok(()),
            Estimator::Logistic {
                coef,
                intercept,
                classes,
            } => {
                if classes.len() < 2 {
                    return Err(format!("need at least 2 classes, got {}", classes.len()));
                }
                let binary = coef.len() == 1 && classes.len() == 2;
                if !binary && coef.len() != classes.len() {
                    return Err(format!(
                        "{} coefficient rows for {} classes",
                        coef.len(),
                        classes.len()
                    ));
                }
                if intercept.len() != coef.len() {
                    return Err(format!(
                        "{} intercepts for {} coefficient rows",
                        intercept.len(),
                        coef.len()
                    ));
                }
                let width = coef[0].len();
                if coef.iter().any(|row| row.len() != width) {
                    return Err("coefficient rows differ in length".to_string());
                }
                Ok(())
            }
        }
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, PredictError> {
        match self {
            Estimator::Constant { value } => Ok(*value),
            Estimator::Linear { coef, intercept } => {
                Ok(dot(coef, row, Stage::Model)? + intercept)
            }
            Estimator::Logistic {
                coef,
                intercept,
                classes,
            } => {
                let scores = coef
                    .iter()
                    .zip(intercept)
                    .map(|(w, b)| dot(w, row, Stage::Model).map(|s| s + b))
                    .collect::<Result<Vec<f64>, PredictError>>()?;

                let winner = if scores.len() == 1 {
                    usize::from(scores[0] > 0.0)
                } else {
                    scores
                        .iter()
                        .enumerate()
                        .max_by(|a, b| a.1.total_cmp(b.1))
                        .map(|(i, _)| i)
                        .ok_or_else(|| PredictError::at(Stage::Model, "no decision scores"))?
                };

                classes.get(winner).copied().ok_or_else(|| {
                    PredictError::at(Stage::Model, format!("class index {winner} out of range"))
                })
            }
        }
    }
}

impl Predict for Estimator {
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, PredictError> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }
}

fn dot(weights: &[f64], row: &[f64], stage: Stage) -> Result<f64, PredictError> {
    if weights.len() != row.len() {
        return Err(PredictError::at(
            stage,
            format!("expected {} features, got {}", weights.len(), row.len()),
        ));
    }
    Ok(weights.iter().zip(row).map(|(w, x)| w * x).sum())
}

// ---------------------------------------------------------------------------
// Scaler
// ---------------------------------------------------------------------------

/// A fitted numeric transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`; a zero scale leaves the centred value as is.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// Maps `[data_min, data_max]` onto `[0, 1]`; a zero range maps to 0.
    MinMax { data_min: Vec<f64>, data_max: Vec<f64> },
}

impl Scaler {
    pub fn validate(&self) -> Result<(), String> {
        let (a, b) = self.params();
        if a.is_empty() {
            return Err("scaler has no parameters".to_string());
        }
        if a.len() != b.len() {
            return Err(format!("parameter lengths differ ({} vs {})", a.len(), b.len()));
        }
        Ok(())
    }

    fn params(&self) -> (&[f64], &[f64]) {
        match self {
            Scaler::Standard { mean, scale } => (mean.as_slice(), scale.as_slice()),
            Scaler::MinMax { data_min, data_max } => (data_min.as_slice(), data_max.as_slice()),
        }
    }

    fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        let (a, b) = self.params();
        if row.len() != a.len() {
            return Err(PredictError::at(
                Stage::Scaler,
                format!("expected {} features, got {}", a.len(), row.len()),
            ));
        }

        let out = row
            .iter()
            .zip(a.iter().zip(b))
            .map(|(&x, (&p, &q))| match self {
                Scaler::Standard { .. } => {
                    let scale = if q == 0.0 { 1.0 } else { q };
                    (x - p) / scale
                }
                Scaler::MinMax { .. } => {
                    let range = q - p;
                    if range.abs() < f64::EPSILON {
                        0.0
                    } else {
                        (x - p) / range
                    }
                }
            })
            .collect();
        Ok(out)
    }
}

impl Transform for Scaler {
    fn transform(&self, x: &[Vec<f64>]) -> Result<Matrix, PredictError> {
        x.iter().map(|row| self.transform_row(row)).collect()
    }
}

// ---------------------------------------------------------------------------
// LabelEncoder
// ---------------------------------------------------------------------------

/// Code `i` stands for `classes[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }
        Ok(())
    }

    /// Forward direction (label → code).
    #[cfg(test)]
    pub fn encode(&self, label: &str) -> Result<f64, PredictError> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| i as f64)
            .ok_or_else(|| PredictError::at(Stage::Decoder, format!("unknown label '{label}'")))
    }
}

impl InverseMap for LabelEncoder {
    fn inverse_map(&self, code: f64) -> Result<String, PredictError> {
        if code.fract() != 0.0 || code < 0.0 {
            return Err(PredictError::at(
                Stage::Decoder,
                format!("{code} is not a class code"),
            ));
        }
        self.classes.get(code as usize).cloned().ok_or_else(|| {
            PredictError::at(
                Stage::Decoder,
                format!("code {code} outside 0..{}", self.classes.len()),
            )
        })
    }

    fn labels(&self) -> Vec<String> {
        self.classes.clone()
    }
}

// ---------------------------------------------------------------------------
// FeatureOrder
// ---------------------------------------------------------------------------

/// Column sequence a model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureOrder {
    pub columns: Vec<String>,
}

impl FeatureOrder {
    pub fn validate(&self) -> Result<(), String> {
        if self.columns.is_empty() {
            return Err("feature order is empty".to_string());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PipelineArtifact
// ---------------------------------------------------------------------------

/// Column selection, scaling and prediction bundled in one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    #[serde(default)]
    pub feature_order: Option<Vec<String>>,
    #[serde(default)]
    pub scaler: Option<Scaler>,
    pub estimator: Estimator,
}

impl PipelineArtifact {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(cols) = &self.feature_order {
            if cols.is_empty() {
                return Err("pipeline feature order is empty".to_string());
            }
        }
        if let Some(scaler) = &self.scaler {
            scaler.validate().map_err(|e| format!("pipeline scaler: {e}"))?;
        }
        self.estimator
            .validate()
            .map_err(|e| format!("pipeline estimator: {e}"))
    }
}

impl PredictTable for PipelineArtifact {
    fn predict_table(
        &self,
        table: &FeatureTable,
        policy: ColumnPolicy,
    ) -> Result<Vec<f64>, PredictError> {
        let selected = match &self.feature_order {
            Some(order) => table.select(order.as_slice(), policy)?,
            None => table.clone(),
        };
        let x = match &self.scaler {
            Some(scaler) => scaler.transform(&selected.to_matrix())?,
            None => selected.to_matrix(),
        };
        self.estimator.predict(&x)
    }
}
