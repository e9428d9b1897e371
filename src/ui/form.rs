use eframe::egui::{self, Color32, RichText, Ui};

use crate::assembler::Prediction;
use crate::features::{Feature, FeatureKind};
use crate::state::AppState;

/// Features shown in the left column; the rest go right.
const LEFT_COLUMN: usize = 7;

// ---------------------------------------------------------------------------
// Input form
// ---------------------------------------------------------------------------

/// Render the 14 inputs in two columns.
pub fn student_form(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Enter Student Details");
    ui.add_space(4.0);

    let features = Feature::ALL;
    let (left, right) = features.split_at(LEFT_COLUMN);
    ui.columns(2, |cols: &mut [Ui]| {
        for (col, features) in cols.iter_mut().zip([left, right]) {
            for &feature in features {
                feature_input(col, state, feature);
            }
        }
    });
}

fn feature_input(ui: &mut Ui, state: &mut AppState, feature: Feature) {
    let mut value = state.row.get(feature);
    ui.label(feature.label());

    let changed = match feature.kind() {
        FeatureKind::Numeric { min, max } => ui
            .add(egui::Slider::new(&mut value, min..=max).step_by(1.0))
            .changed(),
        FeatureKind::Categorical { choices } => {
            let before = value;
            egui::ComboBox::from_id_salt(feature.column_name())
                .selected_text(format!("{value:.0}"))
                .show_ui(ui, |ui: &mut Ui| {
                    for &choice in choices {
                        ui.selectable_value(&mut value, choice, format!("{choice:.0}"));
                    }
                });
            value != before
        }
    };

    if changed {
        state.row.set(feature, value);
    }
    ui.add_space(2.0);
}

// ---------------------------------------------------------------------------
// Predict button and outcome
// ---------------------------------------------------------------------------

pub fn predict_section(ui: &mut Ui, state: &mut AppState) {
    if ui
        .button(RichText::new("Predict Grade").size(16.0))
        .clicked()
    {
        state.predict();
    }
    ui.add_space(6.0);

    match &state.outcome {
        Some(Ok(prediction)) => {
            let color = match (prediction, &state.label_colors) {
                (Prediction::Label(label), Some(colors)) => colors.color_for(label),
                _ => Color32::DARK_GREEN,
            };
            ui.label(
                RichText::new(format!("Predicted Grade: {prediction}"))
                    .size(18.0)
                    .strong()
                    .color(color),
            );
        }
        Some(Err(e)) => {
            ui.label(RichText::new(format!("Prediction failed: {e}")).color(Color32::RED));
        }
        None => {}
    }
}
