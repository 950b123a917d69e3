use rand::Rng;
use thiserror::Error;

use super::model::{Facet, PointCloud, Shape};

/// Absolute tolerance for "lies on the facet".
pub const FACET_TOLERANCE: f64 = 1e-7;

// ---------------------------------------------------------------------------
// Facet choice and masking
// ---------------------------------------------------------------------------

/// Pick the facet to inspect for `shape` in a `dim`-dimensional cloud.
///
/// * cube → random coordinate pinned to a random sign (±1)
/// * simplex / birkhoff → random coordinate pinned to 0
/// * anything else → no facet, the full cloud is kept
pub fn choose_facet<R: Rng + ?Sized>(shape: &Shape, dim: usize, rng: &mut R) -> Facet {
    if dim == 0 {
        return Facet::full_cloud();
    }
    match shape {
        Shape::Cube => {
            let column = rng.gen_range(0..dim);
            let value = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            Facet {
                column: Some(column),
                value,
            }
        }
        Shape::Simplex | Shape::Birkhoff => Facet {
            column: Some(rng.gen_range(0..dim)),
            value: 0.0,
        },
        Shape::Other(_) => Facet::full_cloud(),
    }
}

/// Per-row membership in `facet`.
pub fn facet_mask(cloud: &PointCloud, facet: &Facet) -> Vec<bool> {
    match facet.column {
        Some(col) => cloud
            .rows()
            .map(|row| (row[col] - facet.value).abs() < FACET_TOLERANCE)
            .collect(),
        None => vec![true; cloud.len()],
    }
}

/// Column-wise mean over the rows at `indices`. `None` when nothing is selected.
pub fn centroid(cloud: &PointCloud, indices: &[usize]) -> Option<Vec<f64>> {
    if indices.is_empty() {
        return None;
    }
    let mut sum = vec![0.0; cloud.dim()];
    for &i in indices {
        for (acc, v) in sum.iter_mut().zip(cloud.row(i)) {
            *acc += v;
        }
    }
    let n = indices.len() as f64;
    Some(sum.into_iter().map(|s| s / n).collect())
}

// ---------------------------------------------------------------------------
// FacetSelection – facet + the rows on it + their centroid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FacetSelection {
    pub facet: Facet,
    /// Row indices of the cloud lying on the facet.
    pub indices: Vec<usize>,
    pub centroid: Option<Vec<f64>>,
}

impl FacetSelection {
    /// Draw a facet for `shape` and collect the rows on it.
    pub fn select<R: Rng + ?Sized>(cloud: &PointCloud, shape: &Shape, rng: &mut R) -> Self {
        let facet = choose_facet(shape, cloud.dim(), rng);
        Self::for_facet(cloud, facet)
    }

    pub fn for_facet(cloud: &PointCloud, facet: Facet) -> Self {
        let indices: Vec<usize> = facet_mask(cloud, &facet)
            .into_iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(i))
            .collect();
        let centroid = centroid(cloud, &indices);
        if centroid.is_none() {
            log::warn!("No samples lie on facet {facet}");
        }
        FacetSelection {
            facet,
            indices,
            centroid,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Projection axes
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AxisError {
    #[error("cannot project a {0}-dimensional cloud onto two distinct axes")]
    TooFewColumns(usize),
}

/// Two distinct columns for the 2D projection, drawn without replacement.
///
/// The facet column is excluded unless that leaves fewer than two candidates,
/// in which case every column is eligible again.
pub fn projection_axes<R: Rng + ?Sized>(
    dim: usize,
    exclude: Option<usize>,
    rng: &mut R,
) -> Result<(usize, usize), AxisError> {
    let mut candidates: Vec<usize> = (0..dim).filter(|&c| Some(c) != exclude).collect();
    if candidates.len() < 2 {
        candidates = (0..dim).collect();
    }
    if candidates.len() < 2 {
        return Err(AxisError::TooFewColumns(dim));
    }
    let picked = rand::seq::index::sample(rng, candidates.len(), 2);
    Ok((candidates[picked.index(0)], candidates[picked.index(1)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cloud(rows: &[&[f64]]) -> PointCloud {
        PointCloud::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn cube_mask_respects_tolerance() {
        let c = cloud(&[
            &[1.0, 0.3, -0.2],
            &[1.0 - 5e-8, -0.9, 0.4],
            &[1.0 - 2e-7, 0.1, 0.1],
            &[-1.0, 0.5, 0.5],
            &[0.2, 1.0, 1.0],
        ]);
        let facet = Facet {
            column: Some(0),
            value: 1.0,
        };
        assert_eq!(facet_mask(&c, &facet), vec![true, true, false, false, false]);

        let facet = Facet {
            column: Some(0),
            value: -1.0,
        };
        assert_eq!(facet_mask(&c, &facet), vec![false, false, false, true, false]);
    }

    #[test]
    fn cube_facet_is_a_signed_unit_coordinate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let f = choose_facet(&Shape::Cube, 4, &mut rng);
            assert!(f.column.unwrap() < 4);
            assert!(f.value == 1.0 || f.value == -1.0);
        }
    }

    #[test]
    fn simplex_and_birkhoff_pin_to_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for shape in [Shape::Simplex, Shape::Birkhoff] {
            let f = choose_facet(&shape, 3, &mut rng);
            assert!(f.column.unwrap() < 3);
            assert_eq!(f.value, 0.0);
        }
    }

    #[test]
    fn unknown_shape_keeps_every_row() {
        let c = cloud(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let mut rng = StdRng::seed_from_u64(3);
        let sel = FacetSelection::select(&c, &Shape::Other("zonotope".into()), &mut rng);
        assert_eq!(sel.facet.column, None);
        assert_eq!(sel.indices, vec![0, 1, 2]);
        assert_eq!(sel.centroid, Some(vec![3.0, 4.0]));
    }

    #[test]
    fn centroid_is_mean_of_masked_rows() {
        let c = cloud(&[
            &[0.0, 1.0, 2.0],
            &[0.0, 3.0, -2.0],
            &[0.5, 9.0, 9.0],
            &[0.0, 5.0, 3.0],
        ]);
        let sel = FacetSelection::for_facet(
            &c,
            Facet {
                column: Some(0),
                value: 0.0,
            },
        );
        assert_eq!(sel.indices, vec![0, 1, 3]);
        assert_eq!(sel.centroid, Some(vec![0.0, 3.0, 1.0]));
    }

    #[test]
    fn empty_selection_has_no_centroid() {
        let c = cloud(&[&[0.3, 0.4], &[0.5, 0.6]]);
        let sel = FacetSelection::for_facet(
            &c,
            Facet {
                column: Some(1),
                value: 1.0,
            },
        );
        assert!(sel.is_empty());
        assert_eq!(sel.centroid, None);
    }

    #[test]
    fn axes_skip_facet_column() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let (i, j) = projection_axes(3, Some(1), &mut rng).unwrap();
            assert_ne!(i, j);
            assert_ne!(i, 1);
            assert_ne!(j, 1);
        }
    }

    #[test]
    fn axes_fall_back_to_all_columns() {
        let mut rng = StdRng::seed_from_u64(5);
        let (i, j) = projection_axes(2, Some(0), &mut rng).unwrap();
        assert_ne!(i, j);
        assert!(i < 2 && j < 2);
        assert_eq!(
            projection_axes(1, None, &mut rng),
            Err(AxisError::TooFewColumns(1))
        );
    }

    #[test]
    fn same_seed_same_choices() {
        let c = cloud(&[&[1.0, 0.0, 0.0], &[-1.0, 0.5, 0.5]]);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            FacetSelection::select(&c, &Shape::Cube, &mut a),
            FacetSelection::select(&c, &Shape::Cube, &mut b)
        );
        assert_eq!(
            projection_axes(3, Some(0), &mut a),
            projection_axes(3, Some(0), &mut b)
        );
    }

    proptest! {
        #[test]
        fn centroid_matches_direct_mean(
            rows in proptest::collection::vec(proptest::collection::vec(-10.0f64..10.0, 3), 1..40),
            keep in proptest::collection::vec(any::<bool>(), 40),
        ) {
            let c = PointCloud::from_rows(rows.clone()).unwrap();
            let indices: Vec<usize> = (0..rows.len()).filter(|&i| keep[i]).collect();
            let got = centroid(&c, &indices);
            if indices.is_empty() {
                prop_assert!(got.is_none());
            } else {
                let got = got.unwrap();
                for j in 0..3 {
                    let mean = indices.iter().map(|&i| rows[i][j]).sum::<f64>() / indices.len() as f64;
                    prop_assert!((got[j] - mean).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn mask_matches_tolerance_rule(
            values in proptest::collection::vec(prop_oneof![Just(1.0f64), -1.5f64..1.5], 1..50),
        ) {
            let c = PointCloud::from_rows(values.iter().map(|&v| vec![v, 0.0]).collect()).unwrap();
            let facet = Facet { column: Some(0), value: 1.0 };
            let mask = facet_mask(&c, &facet);
            for (m, v) in mask.iter().zip(&values) {
                prop_assert_eq!(*m, (v - 1.0).abs() < FACET_TOLERANCE);
            }
        }
    }
}
