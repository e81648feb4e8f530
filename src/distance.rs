//! Dense distance matrix over a POI catalog.

use crate::poi::Poi;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Built once per catalog (spec §4.1): operators, the fitness evaluator and
/// the route simulator all look up travel time through this matrix rather
/// than recomputing Euclidean distance, since a single evolutionary run
/// performs tens of millions of such lookups.
///
/// # Examples
///
/// ```
/// use toptw_hga::poi::{Category, Poi, TimeWindow};
/// use toptw_hga::distance::DistanceMatrix;
///
/// let horizon = TimeWindow::new(0.0, 600.0).unwrap();
/// let pois = vec![
///     Poi::depot(0.0, 0.0, horizon),
///     Poi::new(1, 3.0, 4.0, 10.0, horizon, 30.0, 5.0, Category::FoodDrink),
/// ];
/// let matrix = DistanceMatrix::from_pois(&pois);
/// assert!((matrix.travel_time(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(matrix.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix for a POI catalog.
    ///
    /// Iterates the upper triangle and mirrors it, per spec §4.1.
    pub fn from_pois(pois: &[Poi]) -> Self {
        let n = pois.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = pois[i].distance_to(&pois[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Travel time (== Euclidean distance) from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.travel_time(i, j) - self.travel_time(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::{Category, TimeWindow};

    fn sample_pois() -> Vec<Poi> {
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        vec![
            Poi::depot(0.0, 0.0, horizon),
            Poi::new(1, 3.0, 4.0, 10.0, horizon, 30.0, 5.0, Category::FoodDrink),
            Poi::new(2, 0.0, 8.0, 20.0, horizon, 30.0, 5.0, Category::Shopping),
        ]
    }

    #[test]
    fn from_pois_computes_euclidean_distance() {
        let matrix = DistanceMatrix::from_pois(&sample_pois());
        assert_eq!(matrix.size(), 3);
        assert!((matrix.travel_time(0, 1) - 5.0).abs() < 1e-10);
        assert!((matrix.travel_time(0, 2) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn diagonal_is_zero() {
        let matrix = DistanceMatrix::from_pois(&sample_pois());
        for i in 0..matrix.size() {
            assert_eq!(matrix.travel_time(i, i), 0.0);
        }
    }

    #[test]
    fn matrix_is_symmetric() {
        let matrix = DistanceMatrix::from_pois(&sample_pois());
        assert!(matrix.is_symmetric(1e-10));
    }

    #[test]
    fn single_poi_matrix() {
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        let matrix = DistanceMatrix::from_pois(&[Poi::depot(0.0, 0.0, horizon)]);
        assert_eq!(matrix.size(), 1);
        assert_eq!(matrix.travel_time(0, 0), 0.0);
    }
}
