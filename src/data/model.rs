use std::fmt;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Shape – which convex body the samples were drawn from
// ---------------------------------------------------------------------------

/// The sampled body. Only the three exact lowercase labels are recognised;
/// anything else is kept verbatim and shown as a full cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Cube,
    Simplex,
    Birkhoff,
    Other(String),
}

impl Shape {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "cube" => Shape::Cube,
            "simplex" => Shape::Simplex,
            "birkhoff" => Shape::Birkhoff,
            other => Shape::Other(other.to_string()),
        }
    }

    /// The label as it appears in file names.
    pub fn label(&self) -> &str {
        match self {
            Shape::Cube => "cube",
            Shape::Simplex => "simplex",
            Shape::Birkhoff => "birkhoff",
            Shape::Other(s) => s,
        }
    }

    /// Label with the first letter upper-cased and the rest lower-cased, for titles.
    pub fn title(&self) -> String {
        let mut chars = self.label().chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Facet – coordinate index and target value
// ---------------------------------------------------------------------------

/// A facet is identified by the coordinate pinned to `value`.
/// `column == None` means no facet was chosen and the full cloud is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub column: Option<usize>,
    pub value: f64,
}

impl Facet {
    pub fn full_cloud() -> Self {
        Facet {
            column: None,
            value: 0.0,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(col) if self.value == 0.0 => write!(f, "x_{col}≈0"),
            Some(col) => write!(f, "x_{col}≈{:.1}", self.value),
            None => write!(f, "full cloud"),
        }
    }
}

// ---------------------------------------------------------------------------
// PointCloud – n samples × d coordinates
// ---------------------------------------------------------------------------

/// Row-major sample table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    values: Vec<f64>,
    rows: usize,
    dim: usize,
}

impl PointCloud {
    /// Build from rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                bail!("Row {i}: expected {dim} coordinates, found {}", row.len());
            }
            values.extend_from_slice(row);
        }
        Ok(PointCloud {
            values,
            rows: rows.len(),
            dim,
        })
    }

    /// Build from equally long columns (used by the Parquet loader).
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        let n = columns.first().map_or(0, Vec::len);
        if let Some((j, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != n) {
            bail!("Column {j}: expected {n} values, found {}", col.len());
        }
        let dim = columns.len();
        let mut values = Vec::with_capacity(n * dim);
        for i in 0..n {
            values.extend(columns.iter().map(|c| c[i]));
        }
        Ok(PointCloud {
            values,
            rows: n,
            dim,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of coordinates per sample.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.dim..(i + 1) * self.dim]
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dim + j]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunk size must be non-zero
        self.values.chunks_exact(self.dim.max(1)).take(self.rows)
    }
}

// ---------------------------------------------------------------------------
// Coverage report
// ---------------------------------------------------------------------------

/// Coverage ratios of one facet, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetCoverage {
    pub facet: i64,
    pub xs: Vec<f64>,
    pub coverage: Vec<f64>,
}

/// Parsed coverage report, ordered by first appearance of each facet id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    pub facets: Vec<FacetCoverage>,
}

impl CoverageReport {
    /// Insert or replace a facet's series. A replaced facet keeps its position.
    pub fn insert(&mut self, entry: FacetCoverage) {
        match self.facets.iter_mut().find(|f| f.facet == entry.facet) {
            Some(existing) => *existing = entry,
            None => self.facets.push(entry),
        }
    }

    pub fn facet_ids(&self) -> Vec<i64> {
        self.facets.iter().map(|f| f.facet).collect()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}
