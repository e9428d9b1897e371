//! Writes a demo set of artifacts for trying the app without a trained model.
//!
//! ```text
//! cargo run --bin generate_artifacts -- [--pipeline] [DIR]
//! ```
//!
//! Without `--pipeline` the component files (model, scaler, label encoder,
//! feature order) are written; with it, a single `pipeline.json`.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

const COLUMNS: [&str; 14] = [
    "Attendance (%)",
    "Midterm_Score",
    "Final_Score",
    "Assignments_Avg",
    "Quizzes_Avg",
    "Participation_Score",
    "Projects_Score",
    "Total_Score",
    "Study_Hours_per_Week",
    "Extracurricular_Activities",
    "Internet_Access_at_Home",
    "Parent_Education_Level",
    "Stress_Level (1-10)",
    "Sleep_Hours_per_Night",
];

/// Rough cohort statistics used as the standard-scaler parameters.
const MEAN: [f64; 14] = [
    75.0, 70.0, 70.0, 72.0, 68.0, 70.0, 72.0, 72.0, 15.0, 0.4, 0.8, 1.5, 5.0, 7.0,
];
const SCALE: [f64; 14] = [
    12.0, 15.0, 15.0, 12.0, 14.0, 14.0, 13.0, 12.0, 8.0, 0.5, 0.4, 1.1, 2.5, 1.5,
];

/// Direction in scaled feature space along which grades improve.
const DIRECTION: [f64; 14] = [
    0.10, 0.15, 0.20, 0.10, 0.05, 0.05, 0.10, 0.35, 0.05, 0.0, 0.0, 0.0, -0.05, 0.02,
];

/// Position of each grade along `DIRECTION`, best first.
const GRADE_CENTRES: [(&str, f64, f64); 5] = [
    ("A", 1.5, 4.0),
    ("B", 0.5, 3.0),
    ("C", -0.3, 2.0),
    ("D", -1.0, 1.0),
    ("F", -2.0, 0.0),
];

/// Nearest-centre classifier on the projected score, expressed as a linear
/// model: class k scores `c_k * (d · z) - c_k² / 2`.
fn estimator(classes: Vec<f64>) -> Value {
    let coef: Vec<Vec<f64>> = GRADE_CENTRES
        .iter()
        .map(|&(_, c, _)| DIRECTION.iter().map(|d| c * d).collect())
        .collect();
    let intercept: Vec<f64> = GRADE_CENTRES
        .iter()
        .map(|&(_, c, _)| -c * c / 2.0)
        .collect();
    json!({ "type": "logistic", "coef": coef, "intercept": intercept, "classes": classes })
}

fn scaler() -> Value {
    json!({ "type": "standard", "mean": MEAN, "scale": SCALE })
}

fn write(dir: &Path, name: &str, value: &Value) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Write the demo set into `dir` and return the paths written.
pub fn write_artifacts(dir: &Path, pipeline: bool) -> std::io::Result<Vec<PathBuf>> {
    if pipeline {
        // Grade points straight out of the pipeline; no label encoder.
        let points = GRADE_CENTRES.iter().map(|&(_, _, p)| p).collect();
        let path = write(
            dir,
            "pipeline.json",
            &json!({
                "kind": "pipeline",
                "feature_order": COLUMNS,
                "scaler": scaler(),
                "estimator": estimator(points),
            }),
        )?;
        return Ok(vec![path]);
    }

    let codes = (0..GRADE_CENTRES.len()).map(|i| i as f64).collect();
    let labels: Vec<&str> = GRADE_CENTRES.iter().map(|&(l, _, _)| l).collect();
    Ok(vec![
        write(
            dir,
            "student_model.json",
            &json!({ "kind": "model", "estimator": estimator(codes) }),
        )?,
        write(dir, "scaler.json", &json!({ "kind": "scaler", "scaler": scaler() }))?,
        write(
            dir,
            "label_encoder.json",
            &json!({ "kind": "label_encoder", "classes": labels }),
        )?,
        write(
            dir,
            "features.json",
            &json!({ "kind": "feature_order", "columns": COLUMNS }),
        )?,
    ])
}

fn main() {
    let mut pipeline = false;
    let mut dir = PathBuf::from(".");
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pipeline" => pipeline = true,
            other => dir = PathBuf::from(other),
        }
    }
    std::fs::create_dir_all(&dir).expect("Failed to create output directory");

    let written = write_artifacts(&dir, pipeline).expect("Failed to write artifacts");
    for path in written {
        println!("Wrote {}", path.display());
    }
}
