use std::fmt;
use std::path::{Path, PathBuf};

use super::bundle::ArtifactBundle;
use super::model::Artifact;
use crate::error::ArtifactLoadError;

// ---------------------------------------------------------------------------
// Slot – the closed set of artifact files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Pipeline,
    Model,
    Scaler,
    LabelDecoder,
    FeatureOrder,
}

impl Slot {
    /// Slots looked up when no pipeline file is present.
    pub const COMPONENTS: [Slot; 4] = [
        Slot::Model,
        Slot::Scaler,
        Slot::LabelDecoder,
        Slot::FeatureOrder,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Slot::Pipeline => "pipeline.json",
            Slot::Model => "student_model.json",
            Slot::Scaler => "scaler.json",
            Slot::LabelDecoder => "label_encoder.json",
            Slot::FeatureOrder => "features.json",
        }
    }

    /// The `kind` tag a file in this slot must carry.
    pub fn kind(self) -> &'static str {
        match self {
            Slot::Pipeline => "pipeline",
            Slot::Model => "model",
            Slot::Scaler => "scaler",
            Slot::LabelDecoder => "label_encoder",
            Slot::FeatureOrder => "feature_order",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Pipeline => "pipeline",
            Slot::Model => "model",
            Slot::Scaler => "scaler",
            Slot::LabelDecoder => "label decoder",
            Slot::FeatureOrder => "feature order",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of probing an artifact directory.
#[derive(Debug)]
pub struct Resolution {
    pub directory: PathBuf,
    pub bundle: ArtifactBundle,
    /// Files that exist but could not be loaded. Their slots stay empty.
    pub failures: Vec<ArtifactLoadError>,
}

impl Resolution {
    /// Fail on the first broken file instead of carrying on without it.
    pub fn into_strict(mut self) -> Result<ArtifactBundle, ArtifactLoadError> {
        if self.failures.is_empty() {
            Ok(self.bundle)
        } else {
            Err(self.failures.remove(0))
        }
    }
}

/// Look in `dir` for the known artifact files and load whichever exist.
///
/// A present pipeline file wins outright: the component files are not read
/// at all, even when the pipeline itself fails to load.
pub fn resolve(dir: &Path) -> Resolution {
    let mut bundle = ArtifactBundle::default();
    let mut failures = Vec::new();

    let slots: &[Slot] = if Slot::Pipeline.path_in(dir).exists() {
        &[Slot::Pipeline]
    } else {
        &Slot::COMPONENTS
    };

    for &slot in slots {
        let path = slot.path_in(dir);
        if !path.exists() {
            log::debug!("No {slot} artifact at {}", path.display());
            continue;
        }
        match load_artifact(&path, slot) {
            Ok(artifact) => {
                log::info!("Loaded {slot} artifact from {}", path.display());
                bundle = install(bundle, artifact);
            }
            Err(e) => {
                log::error!("{e}");
                failures.push(e);
            }
        }
    }

    log::info!(
        "Resolved artifacts in {}: {:?} ({} failed)",
        dir.display(),
        bundle.loaded_slots(),
        failures.len()
    );

    Resolution {
        directory: dir.to_path_buf(),
        bundle,
        failures,
    }
}

/// Read, parse and check a single artifact file.
pub fn load_artifact(path: &Path, slot: Slot) -> Result<Artifact, ArtifactLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactLoadError::Read {
        slot,
        path: path.to_path_buf(),
        source,
    })?;

    let artifact: Artifact =
        serde_json::from_str(&text).map_err(|source| ArtifactLoadError::Parse {
            slot,
            path: path.to_path_buf(),
            source,
        })?;

    if artifact.kind() != slot.kind() {
        return Err(ArtifactLoadError::WrongKind {
            slot,
            path: path.to_path_buf(),
            found: artifact.kind(),
        });
    }

    artifact
        .validate()
        .map_err(|reason| ArtifactLoadError::Invalid {
            slot,
            path: path.to_path_buf(),
            reason,
        })?;

    Ok(artifact)
}

fn install(bundle: ArtifactBundle, artifact: Artifact) -> ArtifactBundle {
    match artifact {
        Artifact::Pipeline(p) => bundle.with_pipeline(p),
        Artifact::Model(m) => bundle.with_model(m.estimator),
        Artifact::Scaler(s) => bundle.with_scaler(s.scaler),
        Artifact::LabelEncoder(e) => bundle.with_label_decoder(e),
        Artifact::FeatureOrder(o) => bundle.with_feature_order(o.columns),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{Assembler, Prediction};
    use crate::features::{ColumnPolicy, Feature, FeatureKind, FeatureRow};
    use crate::generate_artifacts::write_artifacts;

    const MODEL: &str = r#"{ "kind": "model", "estimator": { "type": "constant", "value": 1.0 } }"#;
    const SCALER: &str = r#"{ "kind": "scaler", "scaler": { "type": "standard", "mean": [0.0], "scale": [1.0] } }"#;
    const ENCODER: &str = r#"{ "kind": "label_encoder", "classes": ["F", "P"] }"#;
    const FEATURES: &str = r#"{ "kind": "feature_order", "columns": ["Final_Score"] }"#;
    const PIPELINE: &str = r#"{ "kind": "pipeline", "estimator": { "type": "constant", "value": 3.0 } }"#;

    fn write(dir: &Path, slot: Slot, body: &str) {
        std::fs::write(slot.path_in(dir), body).unwrap();
    }

    #[test]
    fn empty_directory_gives_empty_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let res = resolve(dir.path());
        assert!(res.bundle.is_empty());
        assert!(res.failures.is_empty());
        assert_eq!(res.directory, dir.path());
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = resolve(&dir.path().join("nope"));
        assert!(res.bundle.is_empty());
        assert!(res.failures.is_empty());
    }

    #[test]
    fn loads_any_subset_of_components() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::Model, MODEL);
        write(dir.path(), Slot::LabelDecoder, ENCODER);

        let res = resolve(dir.path());
        assert!(res.failures.is_empty());
        assert_eq!(
            res.bundle.loaded_slots(),
            vec![Slot::Model, Slot::LabelDecoder]
        );
    }

    #[test]
    fn loads_all_components() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::Model, MODEL);
        write(dir.path(), Slot::Scaler, SCALER);
        write(dir.path(), Slot::LabelDecoder, ENCODER);
        write(dir.path(), Slot::FeatureOrder, FEATURES);

        let bundle = resolve(dir.path()).into_strict().unwrap();
        assert_eq!(bundle.loaded_slots(), Slot::COMPONENTS.to_vec());
        assert_eq!(bundle.feature_order(), Some(&["Final_Score".to_string()][..]));
    }

    #[test]
    fn pipeline_suppresses_components() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::Pipeline, PIPELINE);
        write(dir.path(), Slot::Model, MODEL);
        write(dir.path(), Slot::Scaler, SCALER);
        write(dir.path(), Slot::LabelDecoder, ENCODER);
        write(dir.path(), Slot::FeatureOrder, FEATURES);

        let res = resolve(dir.path());
        assert!(res.failures.is_empty());
        assert_eq!(res.bundle.loaded_slots(), vec![Slot::Pipeline]);
    }

    #[test]
    fn broken_pipeline_still_suppresses_components() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::Pipeline, "not json");
        write(dir.path(), Slot::Model, MODEL);

        let res = resolve(dir.path());
        assert!(res.bundle.is_empty());
        assert_eq!(res.failures.len(), 1);
        assert_eq!(res.failures[0].slot(), Slot::Pipeline);
    }

    #[test]
    fn corrupt_file_is_reported_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::Model, "{ \"kind\": \"model\"");
        write(dir.path(), Slot::Scaler, SCALER);

        let res = resolve(dir.path());
        assert_eq!(res.bundle.loaded_slots(), vec![Slot::Scaler]);
        assert_eq!(res.failures.len(), 1);
        assert!(matches!(
            res.failures[0],
            ArtifactLoadError::Parse {
                slot: Slot::Model,
                ..
            }
        ));

        let err = res.into_strict().unwrap_err();
        assert_eq!(err.slot(), Slot::Model);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::Scaler, MODEL);

        let res = resolve(dir.path());
        assert!(res.bundle.is_empty());
        match &res.failures[0] {
            ArtifactLoadError::WrongKind { slot, found, .. } => {
                assert_eq!(*slot, Slot::Scaler);
                assert_eq!(*found, "model");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_shape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Slot::LabelDecoder, r#"{ "kind": "label_encoder", "classes": [] }"#);

        let res = resolve(dir.path());
        assert!(matches!(
            res.failures[0],
            ArtifactLoadError::Invalid {
                slot: Slot::LabelDecoder,
                ..
            }
        ));
    }

    /// Every graded feature at its best end (lowest stress), or its worst.
    fn extreme_row(best: bool) -> FeatureRow {
        let mut row = FeatureRow::default();
        for feature in Feature::ALL {
            if let FeatureKind::Numeric { min, max } = feature.kind() {
                let high = best != (feature == Feature::StressLevel);
                row.set(feature, if high { max } else { min });
            }
        }
        row
    }

    #[test]
    fn demo_components_resolve_and_predict_grades() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(write_artifacts(dir.path(), false).unwrap().len(), 4);

        let res = resolve(dir.path());
        assert!(res.failures.is_empty(), "{:?}", res.failures);
        assert_eq!(res.bundle.loaded_slots(), Slot::COMPONENTS.to_vec());

        let assembler = Assembler::new(ColumnPolicy::Strict);
        assert_eq!(
            assembler.predict(&res.bundle, &extreme_row(true)),
            Ok(Prediction::Label("A".to_string()))
        );
        assert_eq!(
            assembler.predict(&res.bundle, &extreme_row(false)),
            Ok(Prediction::Label("F".to_string()))
        );
        match assembler.predict(&res.bundle, &FeatureRow::default()) {
            Ok(Prediction::Label(grade)) => {
                assert!(["A", "B", "C", "D", "F"].contains(&grade.as_str()))
            }
            other => panic!("expected a grade, got {other:?}"),
        }
    }

    #[test]
    fn demo_pipeline_resolves_and_predicts_grade_points() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(write_artifacts(dir.path(), true).unwrap().len(), 1);

        let res = resolve(dir.path());
        assert!(res.failures.is_empty(), "{:?}", res.failures);
        assert_eq!(res.bundle.loaded_slots(), vec![Slot::Pipeline]);

        let assembler = Assembler::new(ColumnPolicy::Strict);
        assert_eq!(
            assembler.predict(&res.bundle, &extreme_row(true)),
            Ok(Prediction::Score(4.0))
        );
        assert_eq!(
            assembler.predict(&res.bundle, &extreme_row(false)),
            Ok(Prediction::Score(0.0))
        );
    }
}
