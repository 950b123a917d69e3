use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rand::rngs::StdRng;

use crate::color::FacetColors;
use crate::data::coverage::{CoverageDeviation, deviation_summary};
use crate::data::filter::{FacetSelection, projection_axes};
use crate::data::model::{CoverageReport, PointCloud, Shape};

// ---------------------------------------------------------------------------
// Scatter window state
// ---------------------------------------------------------------------------

/// Everything the scatter window shows, independent of rendering.
pub struct ScatterState {
    pub shape: Shape,
    /// Dimension as entered by the user; used in the title.
    pub dim: usize,
    pub cloud: PointCloud,
    pub selection: FacetSelection,
    /// Projection columns (horizontal, vertical).
    pub axes: (usize, usize),
    pub source: PathBuf,
    rng: StdRng,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ScatterState {
    /// Pick a facet and projection for `cloud`. Fails when the cloud has fewer than two columns.
    pub fn new(
        shape: Shape,
        dim: usize,
        cloud: PointCloud,
        source: PathBuf,
        mut rng: StdRng,
    ) -> Result<Self> {
        if cloud.is_empty() {
            log::warn!("{} contains no samples", source.display());
        }
        if cloud.dim() != dim {
            log::warn!(
                "{} has {} coordinates per sample but {dim} dimensions were requested; using {}",
                source.display(),
                cloud.dim(),
                cloud.dim()
            );
        }
        let selection = FacetSelection::select(&cloud, &shape, &mut rng);
        let axes = projection_axes(cloud.dim(), selection.facet.column, &mut rng)?;
        log::info!(
            "Facet {} holds {} of {} samples; projecting on x_{} / x_{}",
            selection.facet,
            selection.len(),
            cloud.len(),
            axes.0,
            axes.1
        );
        Ok(ScatterState {
            shape,
            dim,
            cloud,
            selection,
            axes,
            source,
            rng,
            status_message: None,
        })
    }

    /// `"<Shape> <dim>D - facet <desc> with <count> points"`
    pub fn title(&self) -> String {
        format!(
            "{} {}D - facet {} with {} points",
            self.shape.title(),
            self.dim,
            self.selection.facet,
            self.selection.len()
        )
    }

    /// Draw a new facet and projection from the same random stream.
    pub fn resample(&mut self) {
        let selection = FacetSelection::select(&self.cloud, &self.shape, &mut self.rng);
        match projection_axes(self.cloud.dim(), selection.facet.column, &mut self.rng) {
            Ok(axes) => {
                log::info!(
                    "Resampled facet {} ({} points) on x_{} / x_{}",
                    selection.facet,
                    selection.len(),
                    axes.0,
                    axes.1
                );
                self.selection = selection;
                self.axes = axes;
                self.status_message = None;
            }
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }

    /// Replace the cloud, keeping shape and dimension. On failure the old cloud stays.
    pub fn replace_cloud(&mut self, cloud: PointCloud, source: PathBuf) -> Result<()> {
        let selection = FacetSelection::select(&cloud, &self.shape, &mut self.rng);
        let axes = projection_axes(cloud.dim(), selection.facet.column, &mut self.rng)?;
        self.cloud = cloud;
        self.selection = selection;
        self.axes = axes;
        self.source = source;
        self.status_message = None;
        Ok(())
    }

    /// Projected facet points as `[x_i, x_j]`.
    pub fn projected_points(&self) -> Vec<[f64; 2]> {
        let (i, j) = self.axes;
        self.selection
            .indices
            .iter()
            .map(|&r| [self.cloud.value(r, i), self.cloud.value(r, j)])
            .collect()
    }

    pub fn projected_centroid(&self) -> Option<[f64; 2]> {
        let (i, j) = self.axes;
        self.selection.centroid.as_ref().map(|c| [c[i], c[j]])
    }
}

// ---------------------------------------------------------------------------
// Coverage window state
// ---------------------------------------------------------------------------

pub struct CoverageState {
    pub report: CoverageReport,
    pub deviations: Vec<CoverageDeviation>,
    pub colors: FacetColors,
    /// Facets hidden from the plot via the legend panel.
    pub hidden: BTreeSet<i64>,
    /// Draw the uniform reference `cov = x`.
    pub show_ideal: bool,
    pub source: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl CoverageState {
    pub fn new(report: CoverageReport, source: PathBuf) -> Self {
        let deviations = deviation_summary(&report);
        log_deviations(&deviations);
        CoverageState {
            colors: FacetColors::new(&report.facet_ids()),
            report,
            deviations,
            hidden: BTreeSet::new(),
            show_ideal: false,
            source,
            status_message: None,
        }
    }

    /// Swap in a freshly loaded report.
    pub fn set_report(&mut self, report: CoverageReport, source: &Path) {
        *self = CoverageState {
            show_ideal: self.show_ideal,
            ..CoverageState::new(report, source.to_path_buf())
        };
    }

    pub fn is_visible(&self, facet: i64) -> bool {
        !self.hidden.contains(&facet)
    }

    pub fn toggle_facet(&mut self, facet: i64) {
        if !self.hidden.remove(&facet) {
            self.hidden.insert(facet);
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    pub fn hide_all(&mut self) {
        self.hidden = self.report.facet_ids().into_iter().collect();
    }
}

fn log_deviations(rows: &[CoverageDeviation]) {
    log::info!("Facet  Max deviation (%)  Avg deviation (%)");
    for row in rows {
        log::info!(
            "{:>5}  {:>17.2}  {:>17.2}",
            row.facet,
            row.max_dev_pct,
            row.avg_dev_pct
        );
    }
}
