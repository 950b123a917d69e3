mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;

use app::{CoverageApp, ScatterApp};
use cli::Args;
use data::loader::{load_coverage, load_point_cloud};
use state::{CoverageState, ScatterState};

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let inputs = {
        let stdin = std::io::stdin();
        cli::resolve_inputs(&args, &mut stdin.lock(), &mut std::io::stdout())?
    };
    log::info!(
        "Shape '{}' in {} dimensions: {} / {}",
        inputs.shape,
        inputs.dim,
        inputs.run_path().display(),
        inputs.coverage_path().display()
    );

    let rng = cli::make_rng(args.seed);
    let run_path = inputs.run_path();
    let cloud = load_point_cloud(&run_path)?;
    let scatter = ScatterState::new(inputs.shape.clone(), inputs.dim, cloud, run_path, rng)?;

    show_window(
        "Facet Viewer – Samples",
        [720.0, 760.0],
        ScatterApp::new(scatter),
    )?;

    if args.no_coverage {
        return Ok(());
    }

    let coverage_path = inputs.coverage_path();
    let report = load_coverage(&coverage_path)?;
    let coverage = CoverageState::new(report, coverage_path);

    show_window(
        "Facet Viewer – Coverage",
        [1000.0, 680.0],
        CoverageApp::new(coverage),
    )
}

/// Open a native window and block until the user closes it.
fn show_window<A: eframe::App + 'static>(title: &str, size: [f32; 2], app: A) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("{title}: {e}"))
}
