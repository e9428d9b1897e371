use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::artifacts::bundle::ArtifactBundle;
use crate::artifacts::resolver::{self, Resolution};
use crate::assembler::{Assembler, Prediction};
use crate::color::ColorMap;
use crate::error::{ArtifactLoadError, PredictError};
use crate::features::FeatureRow;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Directory the current bundle was resolved from.
    pub artifact_dir: PathBuf,

    /// Components resolved at start-up (or on the last reload). Never mutated,
    /// only replaced.
    pub bundle: Arc<ArtifactBundle>,

    /// Artifact files that exist but failed to load.
    pub load_failures: Vec<ArtifactLoadError>,

    /// Current form values.
    pub row: FeatureRow,

    pub assembler: Assembler,

    /// Result of the last "Predict" click.
    pub outcome: Option<Result<Prediction, PredictError>>,

    /// Colours for decoded labels.
    pub label_colors: Option<ColorMap>,
}

impl AppState {
    pub fn new(resolution: Resolution, assembler: Assembler) -> Self {
        let mut state = Self {
            artifact_dir: PathBuf::new(),
            bundle: Arc::new(ArtifactBundle::default()),
            load_failures: Vec::new(),
            row: FeatureRow::default(),
            assembler,
            outcome: None,
            label_colors: None,
        };
        state.set_resolution(resolution);
        state
    }

    /// Swap in a freshly resolved bundle.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        let Resolution {
            directory,
            bundle,
            failures,
        } = resolution;

        self.label_colors = bundle
            .label_decoder()
            .map(|decoder| ColorMap::new(&decoder.labels()));
        self.artifact_dir = directory;
        self.bundle = Arc::new(bundle);
        self.load_failures = failures;
        self.outcome = None;
    }

    /// Re-resolve `dir` and replace the current bundle.
    pub fn load_artifacts(&mut self, dir: &Path) {
        log::info!("Resolving artifacts in {}", dir.display());
        self.set_resolution(resolver::resolve(dir));
    }

    pub fn reload(&mut self) {
        let dir = self.artifact_dir.clone();
        self.load_artifacts(&dir);
    }

    /// Run the assembler on the current form values.
    pub fn predict(&mut self) {
        let outcome = self.assembler.predict(&self.bundle, &self.row);
        match &outcome {
            Ok(p) => log::info!("Predicted grade: {p}"),
            Err(e) => log::warn!("Prediction failed: {e}"),
        }
        self.outcome = Some(outcome);
    }

    /// One-line summary of what is loaded, naming any slot that failed.
    pub fn status_line(&self) -> String {
        let dir = self.artifact_dir.display();
        let mut line = if self.bundle.is_empty() {
            format!("No artifacts loaded from {dir}")
        } else {
            let names: Vec<String> = self
                .bundle
                .loaded_slots()
                .iter()
                .map(ToString::to_string)
                .collect();
            format!("Loaded {} from {dir}", names.join(", "))
        };
        if !self.load_failures.is_empty() {
            let failed: Vec<String> = self
                .load_failures
                .iter()
                .map(|e| e.slot().to_string())
                .collect();
            line.push_str(&format!(" ({} failed)", failed.join(", ")));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::resolver::Slot;
    use crate::features::Feature;

    fn write_components(dir: &Path) {
        std::fs::write(
            Slot::Model.path_in(dir),
            r#"{ "kind": "model", "estimator": { "type": "logistic",
                 "coef": [[0.1]], "intercept": [-7.0], "classes": [0, 1] } }"#,
        )
        .unwrap();
        std::fs::write(
            Slot::FeatureOrder.path_in(dir),
            r#"{ "kind": "feature_order", "columns": ["Total_Score"] }"#,
        )
        .unwrap();
        std::fs::write(
            Slot::LabelDecoder.path_in(dir),
            r#"{ "kind": "label_encoder", "classes": ["Fail", "Pass"] }"#,
        )
        .unwrap();
    }

    #[test]
    fn predicts_from_resolved_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_components(dir.path());

        let mut state = AppState::new(resolver::resolve(dir.path()), Assembler::default());
        assert!(state.load_failures.is_empty());
        assert!(state.label_colors.is_some());

        state.row.set(Feature::TotalScore, 90.0);
        state.predict();
        assert_eq!(
            state.outcome,
            Some(Ok(Prediction::Label("Pass".to_string())))
        );

        state.row.set(Feature::TotalScore, 40.0);
        state.predict();
        assert_eq!(
            state.outcome,
            Some(Ok(Prediction::Label("Fail".to_string())))
        );
    }

    #[test]
    fn empty_directory_fails_at_prediction_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(resolver::resolve(dir.path()), Assembler::default());
        assert!(state.status_line().starts_with("No artifacts loaded"));

        state.predict();
        assert_eq!(state.outcome, Some(Err(PredictError::NoModelAvailable)));
    }

    #[test]
    fn reload_picks_up_new_files_and_clears_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(resolver::resolve(dir.path()), Assembler::default());
        state.predict();
        assert!(state.outcome.is_some());

        write_components(dir.path());
        state.reload();
        assert!(state.outcome.is_none());
        assert_eq!(
            state.status_line(),
            format!(
                "Loaded model, label decoder, feature order from {}",
                dir.path().display()
            )
        );
    }

    #[test]
    fn status_line_names_failed_slots() {
        let dir = tempfile::tempdir().unwrap();
        write_components(dir.path());
        std::fs::write(Slot::Scaler.path_in(dir.path()), "{ not json").unwrap();

        let state = AppState::new(resolver::resolve(dir.path()), Assembler::default());
        assert_eq!(state.load_failures.len(), 1);
        assert_eq!(
            state.status_line(),
            format!(
                "Loaded model, label decoder, feature order from {} (scaler failed)",
                dir.path().display()
            )
        );
    }
}
