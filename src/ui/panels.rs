use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::{load_coverage, load_point_cloud};
use crate::state::{CoverageState, ScatterState};

// ---------------------------------------------------------------------------
// Scatter window – top bar
// ---------------------------------------------------------------------------

/// Render the scatter window's menu / toolbar.
pub fn scatter_top_bar(ui: &mut Ui, state: &mut ScatterState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open point cloud…").clicked() {
                open_cloud_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("New facet").clicked() {
            state.resample();
        }

        ui.separator();

        ui.label(format!(
            "{} samples × {} coordinates, {} on facet",
            state.cloud.len(),
            state.cloud.dim(),
            state.selection.len()
        ));

        ui.separator();
        ui.label(state.source.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Coverage window – top bar
// ---------------------------------------------------------------------------

pub fn coverage_top_bar(ui: &mut Ui, state: &mut CoverageState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open coverage report…").clicked() {
                open_coverage_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} facets", state.report.len()));

        ui.separator();

        if ui
            .selectable_label(state.show_ideal, "Ideal y = x")
            .clicked()
        {
            state.show_ideal = !state.show_ideal;
        }

        ui.separator();
        ui.label(state.source.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Coverage window – legend and deviation table
// ---------------------------------------------------------------------------

/// Legend with per-facet visibility toggles, followed by the deviation table.
pub fn coverage_side_panel(ui: &mut Ui, state: &mut CoverageState) {
    ui.heading("Facets");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.show_all();
        }
        if ui.small_button("None").clicked() {
            state.hide_all();
        }
    });
    ui.separator();

    let ids = state.report.facet_ids();

    ScrollArea::vertical()
        .id_salt("facet_legend")
        .max_height(ui.available_height() * 0.5)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for facet in &ids {
                let text =
                    RichText::new(format!("Facet {facet}")).color(state.colors.color_for(*facet));
                let mut checked = state.is_visible(*facet);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_facet(*facet);
                }
            }
        });

    ui.separator();
    ui.strong("Deviation from uniform (%)");

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Facet");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Max");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Avg");
            });
        })
        .body(|mut body| {
            for row in &state.deviations {
                body.row(16.0, |mut table_row| {
                    table_row.col(|ui: &mut Ui| {
                        ui.label(row.facet.to_string());
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", row.max_dev_pct));
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", row.avg_dev_pct));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_cloud_dialog(state: &mut ScatterState) {
    let file = rfd::FileDialog::new()
        .set_title("Open point cloud")
        .add_filter("Supported files", &["txt", "dat", "csv", "json", "parquet", "pq"])
        .add_filter("Text", &["txt", "dat"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let result = load_point_cloud(&path).and_then(|cloud| state.replace_cloud(cloud, path));
        if let Err(e) = result {
            log::error!("Failed to load point cloud: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn open_coverage_dialog(state: &mut CoverageState) {
    let file = rfd::FileDialog::new()
        .set_title("Open coverage report")
        .add_filter("Text", &["txt"])
        .pick_file();

    if let Some(path) = file {
        match load_coverage(&path) {
            Ok(report) => state.set_report(report, &path),
            Err(e) => {
                log::error!("Failed to load coverage report: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
