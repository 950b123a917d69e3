use super::model::{CoverageReport, FacetCoverage};

// ---------------------------------------------------------------------------
// Uniformity deviation per facet
// ---------------------------------------------------------------------------

/// How far a facet's coverage curve strays from the uniform ideal `cov = x`.
/// Both figures are percentages; NaN when the facet has no finite point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageDeviation {
    pub facet: i64,
    pub max_dev_pct: f64,
    pub avg_dev_pct: f64,
}

impl CoverageDeviation {
    pub fn of(series: &FacetCoverage) -> Self {
        let devs: Vec<f64> = series
            .xs
            .iter()
            .zip(&series.coverage)
            .map(|(x, cov)| (cov - x).abs() * 100.0)
            .filter(|d| d.is_finite())
            .collect();

        let (max_dev_pct, avg_dev_pct) = if devs.is_empty() {
            (f64::NAN, f64::NAN)
        } else {
            let max = devs.iter().copied().fold(0.0, f64::max);
            let avg = devs.iter().sum::<f64>() / devs.len() as f64;
            (max, avg)
        };

        CoverageDeviation {
            facet: series.facet,
            max_dev_pct,
            avg_dev_pct,
        }
    }
}

/// Runs of consecutive finite `[x, cov]` points. A NaN or infinite value
/// ends the current run, so a curve drawn per run leaves a gap there.
pub fn finite_segments(series: &FacetCoverage) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&x, &cov) in series.xs.iter().zip(&series.coverage) {
        if x.is_finite() && cov.is_finite() {
            current.push([x, cov]);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// One row per facet, in report order.
pub fn deviation_summary(report: &CoverageReport) -> Vec<CoverageDeviation> {
    report.facets.iter().map(CoverageDeviation::of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(facet: i64, xs: &[f64], coverage: &[f64]) -> FacetCoverage {
        FacetCoverage {
            facet,
            xs: xs.to_vec(),
            coverage: coverage.to_vec(),
        }
    }

    #[test]
    fn deviation_from_uniform() {
        let dev = CoverageDeviation::of(&series(0, &[0.1, 0.5, 1.0], &[0.12, 0.45, 1.0]));
        assert!((dev.max_dev_pct - 5.0).abs() < 1e-9);
        assert!((dev.avg_dev_pct - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn nan_points_are_ignored() {
        let dev = CoverageDeviation::of(&series(1, &[0.2, 0.4], &[f64::NAN, 0.3]));
        assert!((dev.max_dev_pct - 10.0).abs() < 1e-9);
        assert!((dev.avg_dev_pct - 10.0).abs() < 1e-9);

        let dev = CoverageDeviation::of(&series(2, &[0.2], &[f64::NAN]));
        assert!(dev.max_dev_pct.is_nan() && dev.avg_dev_pct.is_nan());
    }

    #[test]
    fn nan_splits_curve_into_segments() {
        let s = series(
            0,
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            &[0.1, f64::NAN, 0.3, 0.4, f64::NAN, f64::NAN],
        );
        assert_eq!(
            finite_segments(&s),
            vec![vec![[0.1, 0.1]], vec![[0.3, 0.3], [0.4, 0.4]]]
        );
        assert!(finite_segments(&series(1, &[0.1], &[f64::NAN])).is_empty());
        assert_eq!(
            finite_segments(&series(2, &[0.1, 0.2], &[0.1, 0.2])),
            vec![vec![[0.1, 0.1], [0.2, 0.2]]]
        );
    }

    #[test]
    fn summary_follows_report_order() {
        let mut report = CoverageReport::default();
        report.insert(series(5, &[1.0], &[1.0]));
        report.insert(series(2, &[1.0], &[0.5]));
        let rows = deviation_summary(&report);
        assert_eq!(rows.iter().map(|r| r.facet).collect::<Vec<_>>(), vec![5, 2]);
        assert_eq!(rows[0].max_dev_pct, 0.0);
        assert_eq!(rows[1].max_dev_pct, 50.0);
    }
}
