use eframe::egui::{self, Color32, RichText, Ui};

use crate::artifacts::resolver::Slot;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Artifacts", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.status_line());
    });
}

/// Start-up (or reload) failures, shown until the next successful reload.
pub fn load_failures(ui: &mut Ui, state: &AppState) {
    if state.load_failures.is_empty() {
        return;
    }
    ui.label(
        RichText::new(format!(
            "{} artifact file(s) could not be loaded:",
            state.load_failures.len()
        ))
        .color(Color32::RED)
        .strong(),
    );
    for failure in &state.load_failures {
        ui.label(RichText::new(format!("• {failure}")).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.small(format!(
        "Place {} (or {} with optional {}, {}, {}) in the artifact folder.",
        Slot::Pipeline.file_name(),
        Slot::Model.file_name(),
        Slot::Scaler.file_name(),
        Slot::LabelDecoder.file_name(),
        Slot::FeatureOrder.file_name(),
    ));
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Choose artifact folder")
        .set_directory(&state.artifact_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.load_artifacts(&dir);
        if !state.load_failures.is_empty() {
            log::error!(
                "{} artifact(s) failed to load from {}",
                state.load_failures.len(),
                dir.display()
            );
        }
    }
}
