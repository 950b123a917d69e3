use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::data::model::Shape;

pub const SHAPE_PROMPT: &str =
    "Name of the polytope ('cube', 'simplex', 'birkhoff', or anything else): ";
pub const DIM_PROMPT: &str = "Number of dimensions: ";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Any input not given as a flag is asked for interactively.
#[derive(Debug, Default, Parser)]
#[command(name = "facet-viewer")]
#[command(about = "Plot shake-and-bake boundary samples and per-facet coverage")]
pub struct Args {
    /// Polytope label ('cube', 'simplex', 'birkhoff', or anything else)
    #[arg(long)]
    pub shape: Option<String>,

    /// Number of dimensions used in the sampler's file names
    #[arg(long)]
    pub dim: Option<String>,

    /// Directory holding the sampler output
    #[arg(long, default_value = "build")]
    pub build_dir: PathBuf,

    /// Seed for facet and axis selection; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only show the scatter plot
    #[arg(long)]
    pub no_coverage: bool,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("'{0}' is not a valid number of dimensions")]
    InvalidDimension(String),
    #[error("number of dimensions must be positive")]
    ZeroDimension,
    #[error("input closed before '{0}' was answered")]
    Eof(&'static str),
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Resolved inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub shape: Shape,
    pub dim: usize,
    pub build_dir: PathBuf,
}

impl Inputs {
    fn stem(&self) -> String {
        format!("sb_{}_{}", self.shape.label(), self.dim)
    }

    /// `<build_dir>/sb_<shape>_<dim>_run.txt`
    pub fn run_path(&self) -> PathBuf {
        self.build_dir.join(format!("{}_run.txt", self.stem()))
    }

    /// `<build_dir>/sb_<shape>_<dim>_coverage.txt`
    pub fn coverage_path(&self) -> PathBuf {
        self.build_dir.join(format!("{}_coverage.txt", self.stem()))
    }
}

/// Fill in shape and dimension from `args`, prompting on `output` for whatever is missing.
pub fn resolve_inputs<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    output: &mut W,
) -> Result<Inputs, InputError> {
    let shape = match &args.shape {
        Some(s) => s.trim().to_string(),
        None => prompt(input, output, SHAPE_PROMPT)?,
    };
    let dim_text = match &args.dim {
        Some(d) => d.trim().to_string(),
        None => prompt(input, output, DIM_PROMPT)?,
    };

    Ok(Inputs {
        shape: Shape::parse(&shape),
        dim: parse_dim(&dim_text)?,
        build_dir: args.build_dir.clone(),
    })
}

pub fn parse_dim(text: &str) -> Result<usize, InputError> {
    let dim: usize = text
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidDimension(text.trim().to_string()))?;
    if dim == 0 {
        return Err(InputError::ZeroDimension);
    }
    Ok(dim)
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &'static str,
) -> Result<String, InputError> {
    output.write_all(question.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::Eof(question.trim()));
    }
    Ok(line.trim().to_string())
}

/// Seeded when asked for, otherwise from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Cursor;

    fn args() -> Args {
        Args {
            build_dir: PathBuf::from("build"),
            ..Default::default()
        }
    }

    #[test]
    fn prompts_for_missing_values() {
        let mut input = Cursor::new("  cube \n 3\n");
        let mut output = Vec::new();
        let inputs = resolve_inputs(&args(), &mut input, &mut output).unwrap();
        assert_eq!(inputs.shape, Shape::Cube);
        assert_eq!(inputs.dim, 3);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains(SHAPE_PROMPT));
        assert!(shown.contains(DIM_PROMPT));
    }

    #[test]
    fn flags_skip_prompts() {
        let args = Args {
            shape: Some("birkhoff".into()),
            dim: Some("9".into()),
            ..args()
        };
        let mut output = Vec::new();
        let inputs = resolve_inputs(&args, &mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(inputs.shape, Shape::Birkhoff);
        assert_eq!(inputs.dim, 9);
        assert!(output.is_empty());
    }

    #[test]
    fn file_names_follow_sampler_convention() {
        let inputs = Inputs {
            shape: Shape::parse("weird shape"),
            dim: 4,
            build_dir: PathBuf::from("build"),
        };
        assert_eq!(inputs.run_path(), PathBuf::from("build/sb_weird shape_4_run.txt"));
        assert_eq!(
            inputs.coverage_path(),
            PathBuf::from("build/sb_weird shape_4_coverage.txt")
        );
    }

    #[test]
    fn bad_dimensions_are_rejected() {
        assert!(matches!(parse_dim("three"), Err(InputError::InvalidDimension(_))));
        assert!(matches!(parse_dim("-2"), Err(InputError::InvalidDimension(_))));
        assert!(matches!(parse_dim("0"), Err(InputError::ZeroDimension)));
        assert_eq!(parse_dim(" 12 ").unwrap(), 12);
    }

    #[test]
    fn eof_at_prompt_is_an_error() {
        let err = resolve_inputs(&args(), &mut Cursor::new("cube\n"), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, InputError::Eof(_)));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a: u64 = make_rng(Some(9)).gen();
        let b: u64 = make_rng(Some(9)).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn clap_parses_flags() {
        let args = Args::try_parse_from([
            "facet-viewer",
            "--shape",
            "simplex",
            "--dim",
            "5",
            "--seed",
            "3",
            "--no-coverage",
        ])
        .unwrap();
        assert_eq!(args.shape.as_deref(), Some("simplex"));
        assert_eq!(args.dim.as_deref(), Some("5"));
        assert_eq!(args.seed, Some(3));
        assert!(args.no_coverage);
        assert_eq!(args.build_dir, PathBuf::from("build"));
    }
}
