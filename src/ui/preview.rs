use eframe::egui::{Color32, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use crate::features::{FeatureTable, FEATURE_COUNT};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Input preview: the assembled row as a table and a bar chart
// ---------------------------------------------------------------------------

pub fn input_preview(ui: &mut Ui, state: &AppState) {
    let table = FeatureTable::from_row(&state.row);
    ui.strong("Input preview");
    ui.add_space(4.0);

    ScrollArea::horizontal()
        .id_salt("preview_table")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), FEATURE_COUNT)
                .header(20.0, |mut header| {
                    for column in table.columns() {
                        header.col(|ui| {
                            ui.strong(column.as_str());
                        });
                    }
                })
                .body(|mut body| {
                    body.row(18.0, |mut row| {
                        for value in table.values() {
                            row.col(|ui| {
                                ui.label(format!("{value:.0}"));
                            });
                        }
                    });
                });
        });

    ui.add_space(6.0);

    let bars: Vec<Bar> = table
        .columns()
        .iter()
        .zip(table.values())
        .enumerate()
        .map(|(i, (column, &value))| Bar::new(i as f64, value).name(column).width(0.7))
        .collect();

    Plot::new("row_preview")
        .height(160.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .y_axis_label("Value")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(Color32::LIGHT_BLUE)
                    .name("Input"),
            );
        });
}
