use eframe::egui;

use crate::state::AppState;
use crate::ui::{form, panels, preview};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GradePredictorApp {
    pub state: AppState,
}

impl GradePredictorApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GradePredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + load failures ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            panels::load_failures(ui, &self.state);
        });

        // ---- Bottom panel: hint about artifact files ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Central panel: form, preview, prediction ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Student Performance Prediction");
                    ui.add_space(6.0);

                    form::student_form(ui, &mut self.state);
                    ui.separator();

                    preview::input_preview(ui, &self.state);
                    ui.separator();

                    form::predict_section(ui, &mut self.state);
                });
        });
    }
}
