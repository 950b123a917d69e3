/// Data layer: core types, loading, facet filtering and coverage analysis.
///
/// Architecture:
/// ```text
///  sb_<shape>_<dim>_run.txt          sb_<shape>_<dim>_coverage.txt
///        │                                   │
///        ▼                                   ▼
///   ┌──────────┐                       ┌──────────┐
///   │  loader   │  → PointCloud        │  loader   │  → CoverageReport
///   └──────────┘                       └──────────┘
///        │                                   │
///        ▼                                   ▼
///   ┌──────────┐                       ┌──────────┐
///   │  filter   │  facet mask,         │ coverage  │  deviation from
///   └──────────┘  centroid, axes       └──────────┘  uniform per facet
/// ```

pub mod coverage;
pub mod filter;
pub mod loader;
pub mod model;
