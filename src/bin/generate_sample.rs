//! Writes a synthetic run file and coverage report so the viewer can be
//! tried without the C++ sampler. Samples lie exactly on random facets;
//! coverage curves are the uniform ideal plus noise.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DemoShape {
    Cube,
    Simplex,
}

impl DemoShape {
    fn label(self) -> &'static str {
        match self {
            DemoShape::Cube => "cube",
            DemoShape::Simplex => "simplex",
        }
    }

    fn facet_count(self, dim: usize) -> usize {
        match self {
            DemoShape::Cube => 2 * dim,
            DemoShape::Simplex => dim + 1,
        }
    }
}

#[derive(Parser)]
#[command(about = "Generate demo input for facet-viewer")]
struct Cmd {
    #[arg(long, value_enum, default_value_t = DemoShape::Cube)]
    shape: DemoShape,
    #[arg(long, default_value_t = 3)]
    dim: usize,
    #[arg(long, default_value_t = 2000)]
    samples: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "build")]
    out_dir: PathBuf,
}

/// Uniform in [-1, 1]^d with one random coordinate pinned to ±1.
fn cube_boundary_point(dim: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut p: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..=1.0)).collect();
    let col = rng.gen_range(0..dim);
    p[col] = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    p
}

/// Uniform on the face `x_col = 0` of the standard simplex.
fn simplex_boundary_point(dim: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut e: Vec<f64> = (0..=dim)
        .map(|_| -(1.0 - rng.gen::<f64>()).ln())
        .collect();
    e[rng.gen_range(0..dim)] = 0.0;
    let total: f64 = e.iter().sum();
    e.truncate(dim);
    e.into_iter().map(|v| v / total).collect()
}

fn run_file(shape: DemoShape, dim: usize, samples: usize, rng: &mut StdRng) -> String {
    let mut out = String::new();
    for _ in 0..samples {
        let p = match shape {
            DemoShape::Cube => cube_boundary_point(dim, rng),
            DemoShape::Simplex => simplex_boundary_point(dim, rng),
        };
        let line: Vec<String> = p.iter().map(|v| v.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn coverage_file(shape: DemoShape, dim: usize, rng: &mut StdRng) -> String {
    let mut out = String::new();
    for facet in 0..shape.facet_count(dim) {
        let pairs: Vec<String> = (1..=10)
            .map(|k| {
                let x = 0.1 * k as f64;
                let cov = (x + rng.gen_range(-0.03..=0.03)).clamp(0.0, 1.0);
                format!("{x:.2}:{cov:.4}")
            })
            .collect();
        out.push_str(&format!(
            "Facet {facet} : x^d coverage {}\n",
            pairs.join(", ")
        ));
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let cmd = Cmd::parse();
    if cmd.dim < 2 {
        bail!("--dim must be at least 2 to be plotted");
    }

    let mut rng = StdRng::seed_from_u64(cmd.seed);
    fs::create_dir_all(&cmd.out_dir)
        .with_context(|| format!("creating {}", cmd.out_dir.display()))?;

    let stem = format!("sb_{}_{}", cmd.shape.label(), cmd.dim);
    let run_path = cmd.out_dir.join(format!("{stem}_run.txt"));
    let coverage_path = cmd.out_dir.join(format!("{stem}_coverage.txt"));

    fs::write(&run_path, run_file(cmd.shape, cmd.dim, cmd.samples, &mut rng))
        .with_context(|| format!("writing {}", run_path.display()))?;
    fs::write(&coverage_path, coverage_file(cmd.shape, cmd.dim, &mut rng))
        .with_context(|| format!("writing {}", coverage_path.display()))?;

    log::info!("Wrote {} and {}", run_path.display(), coverage_path.display());
    println!(
        "Wrote {} samples to {} and {} facets to {}",
        cmd.samples,
        run_path.display(),
        cmd.shape.facet_count(cmd.dim),
        coverage_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_points_sit_on_a_face() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            let p = cube_boundary_point(4, &mut rng);
            assert!(p.iter().all(|v| v.abs() <= 1.0));
            assert!(p.iter().any(|v| v.abs() == 1.0));
        }
    }

    #[test]
    fn simplex_points_sit_on_a_face() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let p = simplex_boundary_point(3, &mut rng);
            assert!(p.iter().all(|&v| v >= 0.0));
            assert!(p.iter().sum::<f64>() <= 1.0 + 1e-12);
            assert!(p.contains(&0.0));
        }
    }

    #[test]
    fn coverage_lines_have_marker_and_pairs() {
        let mut rng = StdRng::seed_from_u64(2);
        let text = coverage_file(DemoShape::Simplex, 3, &mut rng);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(tokens[0], "Facet");
            assert_eq!(tokens[5..].join(" ").split(',').count(), 10);
        }
    }
}
