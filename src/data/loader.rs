use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float32Array, Float64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{CoverageReport, FacetCoverage, PointCloud};

// ---------------------------------------------------------------------------
// Point clouds: public entry-point
// ---------------------------------------------------------------------------

/// Load a sample point cloud from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated coordinates, no header
/// * `.json`    – `[[x0, x1, ...], ...]` or `{ "points": [[...], ...] }`
/// * `.parquet` – one Float64/Float32 column per coordinate
/// * anything else – whitespace-delimited text as written by the sampler
pub fn load_point_cloud(path: &Path) -> Result<PointCloud> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let cloud = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        _ => load_text(path),
    }
    .with_context(|| format!("loading point cloud {}", path.display()))?;

    log::info!(
        "Loaded {} samples × {} coordinates from {}",
        cloud.len(),
        cloud.dim(),
        path.display()
    );
    Ok(cloud)
}

// ---------------------------------------------------------------------------
// Whitespace text loader
// ---------------------------------------------------------------------------

fn load_text(path: &Path) -> Result<PointCloud> {
    let file = File::open(path).context("opening text file")?;
    parse_text_cloud(BufReader::new(file))
}

/// One sample per line, coordinates separated by any whitespace.
/// Everything after a `#` is a comment; lines left blank are skipped.
pub fn parse_text_cloud<R: BufRead>(reader: R) -> Result<PointCloud> {
    let mut rows = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        let line = line.split_once('#').map_or(line.as_str(), |(data, _)| data).trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(j, tok)| {
                tok.parse::<f64>()
                    .with_context(|| format!("Line {}, column {j}: '{tok}' is not a number", line_no + 1))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    PointCloud::from_rows(rows)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Headerless CSV, one sample per record.
fn load_csv(path: &Path) -> Result<PointCloud> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, tok)| {
                tok.parse::<f64>()
                    .with_context(|| format!("Row {row_no}, column {j}: '{tok}' is not a number"))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    PointCloud::from_rows(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Accepted JSON layouts:
///
/// ```json
/// [[0.5, 1.0, -0.2], [0.1, -1.0, 0.3]]
/// ```
/// or
/// ```json
/// { "points": [[0.5, 1.0, -0.2], [0.1, -1.0, 0.3]] }
/// ```
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCloud {
    Rows(Vec<Vec<f64>>),
    Object { points: Vec<Vec<f64>> },
}

fn load_json(path: &Path) -> Result<PointCloud> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let parsed: JsonCloud = serde_json::from_str(&text).context("parsing JSON")?;
    let rows = match parsed {
        JsonCloud::Rows(rows) | JsonCloud::Object { points: rows } => rows,
    };
    PointCloud::from_rows(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every floating-point column is one coordinate, in schema order.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<PointCloud> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let coord_cols: Vec<usize> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| matches!(f.data_type(), DataType::Float64 | DataType::Float32))
            .map(|(i, _)| i)
            .collect();
        if coord_cols.is_empty() {
            bail!("Parquet file has no Float64/Float32 columns");
        }
        if columns.is_empty() {
            columns = vec![Vec::new(); coord_cols.len()];
        } else if columns.len() != coord_cols.len() {
            bail!(
                "Record batches disagree on coordinate count ({} vs {})",
                columns.len(),
                coord_cols.len()
            );
        }

        for (out, &col_idx) in columns.iter_mut().zip(&coord_cols) {
            let name = schema.field(col_idx).name();
            out.extend(
                extract_f64_column(batch.column(col_idx))
                    .with_context(|| format!("reading column '{name}'"))?,
            );
        }
    }

    PointCloud::from_columns(columns)
}

/// Float column → `Vec<f64>`; nulls become NaN.
fn extract_f64_column(col: &Arc<dyn Array>) -> Result<Vec<f64>> {
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect())
    } else {
        bail!("expected Float64 or Float32, got {:?}", col.data_type())
    }
}

// ---------------------------------------------------------------------------
// Coverage report parser
// ---------------------------------------------------------------------------

/// Marker token opening every coverage line.
pub const FACET_MARKER: &str = "Facet";

/// Fatal coverage-report problems. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum CoverageError {
    #[error("line {line}: missing facet id after 'Facet'")]
    MissingFacetId { line: usize },
    #[error("line {line}: facet id '{token}' is not an integer")]
    InvalidFacetId { line: usize, token: String },
    #[error("line {line}: pair '{pair}' has no ':' separator")]
    MissingColon { line: usize, pair: String },
    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },
    #[error("reading line {line}: {message}")]
    Io { line: usize, message: String },
}

/// Read and parse a coverage report. The file is closed on every exit path.
pub fn load_coverage(path: &Path) -> Result<CoverageReport> {
    let report = {
        let file = File::open(path)
            .with_context(|| format!("opening coverage report {}", path.display()))?;
        parse_coverage(BufReader::new(file))
            .with_context(|| format!("parsing coverage report {}", path.display()))?
    };
    log::info!(
        "Parsed coverage for {} facets from {}",
        report.len(),
        path.display()
    );
    Ok(report)
}

/// Parse `Facet <id> <ignored> <ignored> <ignored> x:cov, x:cov, ...` lines.
///
/// Lines not starting with [`FACET_MARKER`] are skipped. Any malformed
/// content after the marker aborts the whole parse.
pub fn parse_coverage<R: BufRead>(reader: R) -> Result<CoverageReport, CoverageError> {
    let mut report = CoverageReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| CoverageError::Io {
            line: line_no,
            message: e.to_string(),
        })?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&FACET_MARKER) {
            continue;
        }

        let id_tok = tokens
            .get(1)
            .ok_or(CoverageError::MissingFacetId { line: line_no })?;
        let facet = id_tok
            .parse::<i64>()
            .map_err(|_| CoverageError::InvalidFacetId {
                line: line_no,
                token: id_tok.to_string(),
            })?;

        let tail = tokens.get(5..).unwrap_or_default().join(" ");
        let mut xs = Vec::new();
        let mut coverage = Vec::new();
        for piece in tail.split(',') {
            let pair = piece.trim().trim_end_matches(',');
            if pair.is_empty() {
                continue;
            }
            let (x_str, cov_str) =
                pair.split_once(':')
                    .ok_or_else(|| CoverageError::MissingColon {
                        line: line_no,
                        pair: pair.to_string(),
                    })?;
            xs.push(parse_number(x_str, line_no)?);
            coverage.push(parse_number(cov_str, line_no)?);
        }

        report.insert(FacetCoverage {
            facet,
            xs,
            coverage,
        });
    }

    Ok(report)
}

fn parse_number(tok: &str, line: usize) -> Result<f64, CoverageError> {
    let tok = tok.trim();
    tok.parse::<f64>().map_err(|_| CoverageError::InvalidNumber {
        line,
        token: tok.to_string(),
    })
}
