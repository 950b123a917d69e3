use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::data::coverage::finite_segments;
use crate::state::{CoverageState, ScatterState};

// ---------------------------------------------------------------------------
// Facet scatter plot
// ---------------------------------------------------------------------------

/// Render the projected facet samples and their centroid.
pub fn scatter_plot(ui: &mut Ui, state: &ScatterState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(state.title());
    });

    if state.selection.is_empty() {
        ui.label(
            RichText::new("No samples lie on this facet; try \"New facet\".")
                .color(Color32::YELLOW),
        );
    }

    let (i, j) = state.axes;
    let samples = Points::new(PlotPoints::new(state.projected_points()))
        .name("Samples")
        .radius(2.0)
        .color(Color32::from_rgba_unmultiplied(70, 130, 220, 180));

    let center = state.projected_centroid().map(|c| {
        Points::new(PlotPoints::new(vec![c]))
            .name("Center")
            .shape(MarkerShape::Asterisk)
            .radius(9.0)
            .color(Color32::RED)
    });

    Plot::new("facet_scatter")
        .legend(Legend::default())
        .x_axis_label(format!("x_{i}"))
        .y_axis_label(format!("x_{j}"))
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(samples);
            if let Some(center) = center {
                plot_ui.points(center);
            }
        });
}

// ---------------------------------------------------------------------------
// Coverage curves
// ---------------------------------------------------------------------------

/// One line per visible facet: coverage ratio against x^d.
/// The legend lives in the side panel, outside the plot area.
pub fn coverage_plot(ui: &mut Ui, state: &CoverageState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Scaling coverage per facet (vs x^d)");
    });

    if state.report.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No 'Facet' lines found in the coverage report.");
        });
        return;
    }

    Plot::new("coverage_plot")
        .x_axis_label("x^d")
        .y_axis_label("Coverage ratio")
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &state.report.facets {
                if !state.is_visible(series.facet) {
                    continue;
                }
                let color = state.colors.color_for(series.facet);
                for segment in finite_segments(series) {
                    let line = Line::new(PlotPoints::new(segment))
                        .name(format!("Facet {}", series.facet))
                        .color(color)
                        .width(1.5);

                    plot_ui.line(line);
                }
            }

            if state.show_ideal {
                let ideal = Line::new(PlotPoints::new(vec![[0.0, 0.0], [1.0, 1.0]]))
                    .name("ideal (y = x)")
                    .color(Color32::GRAY)
                    .style(LineStyle::dashed_dense());
                plot_ui.line(ideal);
            }
        });
}
