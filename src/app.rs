use eframe::egui;

use crate::state::{CoverageState, ScatterState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Scatter window
// ---------------------------------------------------------------------------

pub struct ScatterApp {
    pub state: ScatterState,
}

impl ScatterApp {
    pub fn new(state: ScatterState) -> Self {
        Self { state }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("scatter_top_bar").show(ctx, |ui| {
            panels::scatter_top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Coverage window
// ---------------------------------------------------------------------------

pub struct CoverageApp {
    pub state: CoverageState,
}

impl CoverageApp {
    pub fn new(state: CoverageState) -> Self {
        Self { state }
    }
}

impl eframe::App for CoverageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("coverage_top_bar").show(ctx, |ui| {
            panels::coverage_top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: legend + deviations ----
        egui::SidePanel::right("coverage_legend")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::coverage_side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::coverage_plot(ui, &self.state);
        });
    }
}
