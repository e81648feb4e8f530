//! The route chromosome evolved by the genetic algorithm.

use std::collections::HashSet;

/// A depot-rooted route: `[depot, p_1, ..., p_k, depot]`.
///
/// Interior POIs (everything but the first and last element) are pairwise
/// distinct and exclude the depot. The five cached metrics are only
/// meaningful after a call to [`crate::fitness::evaluate`]; until then they
/// default to zero, which is also the correct state for a depot-only route
/// (spec §3, §8 invariant 2).
///
/// # Examples
///
/// ```
/// use toptw_hga::individual::Individual;
///
/// let ind = Individual::new(vec![0, 3, 7, 0]);
/// assert_eq!(ind.interior(), &[3, 7]);
/// assert!(!ind.is_depot_only());
/// ```
#[derive(Debug, Clone)]
pub struct Individual {
    route: Vec<usize>,
    fitness: f64,
    total_score: f64,
    total_cost: f64,
    total_time: f64,
    total_wait: f64,
}

impl Individual {
    /// Wraps a route. `route` must start and end at the depot (not
    /// enforced here — callers constructing routes directly are expected to
    /// uphold spec §3's invariant; [`Individual::depot_only`] and the
    /// initializer/operators in this crate always do).
    pub fn new(route: Vec<usize>) -> Self {
        Self {
            route,
            fitness: 0.0,
            total_score: 0.0,
            total_cost: 0.0,
            total_time: 0.0,
            total_wait: 0.0,
        }
    }

    /// A route visiting no interior POIs: `[depot, depot]`.
    pub fn depot_only(depot_id: usize) -> Self {
        Self::new(vec![depot_id, depot_id])
    }

    /// The full route, depot sentinels included.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// A mutable view of the full route. Operators that need to reattach
    /// depot sentinels after mutating the interior should prefer
    /// [`Individual::interior_mut`].
    pub fn route_mut(&mut self) -> &mut Vec<usize> {
        &mut self.route
    }

    /// The interior POI sequence, excluding both depot sentinels.
    pub fn interior(&self) -> &[usize] {
        if self.route.len() < 2 {
            &[]
        } else {
            &self.route[1..self.route.len() - 1]
        }
    }

    /// A mutable view of the interior slice.
    pub fn interior_mut(&mut self) -> &mut [usize] {
        let len = self.route.len();
        if len < 2 {
            &mut self.route[..0]
        } else {
            &mut self.route[1..len - 1]
        }
    }

    /// Replaces the interior slice, preserving the depot sentinels.
    pub fn set_interior(&mut self, interior: Vec<usize>) {
        let depot = self.depot_id();
        self.route = std::iter::once(depot)
            .chain(interior)
            .chain(std::iter::once(depot))
            .collect();
    }

    /// The depot id both ends of the route share.
    pub fn depot_id(&self) -> usize {
        self.route[0]
    }

    /// `true` if the route visits no interior POIs.
    pub fn is_depot_only(&self) -> bool {
        self.interior().is_empty()
    }

    /// The set of interior POI ids, used by the evolution loop's
    /// order-independent diversity filter (spec §4.7).
    pub fn interior_id_set(&self) -> HashSet<usize> {
        self.interior().iter().copied().collect()
    }

    /// Cached fitness from the last [`crate::fitness::evaluate`] call.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Cached total collected score.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Cached total accumulated cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Cached total elapsed time (arrival back at the depot).
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Cached total accumulated waiting time.
    pub fn total_wait(&self) -> f64 {
        self.total_wait
    }

    /// Overwrites the cached metrics. Called only by
    /// [`crate::fitness::evaluate`].
    pub(crate) fn set_metrics(
        &mut self,
        fitness: f64,
        total_score: f64,
        total_cost: f64,
        total_time: f64,
        total_wait: f64,
    ) {
        self.fitness = fitness;
        self.total_score = total_score;
        self.total_cost = total_cost;
        self.total_time = total_time;
        self.total_wait = total_wait;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depot_only_has_empty_interior() {
        let ind = Individual::depot_only(0);
        assert!(ind.is_depot_only());
        assert_eq!(ind.route(), &[0, 0]);
    }

    #[test]
    fn interior_excludes_sentinels() {
        let ind = Individual::new(vec![0, 1, 2, 3, 0]);
        assert_eq!(ind.interior(), &[1, 2, 3]);
    }

    #[test]
    fn set_interior_preserves_depot_sentinels() {
        let mut ind = Individual::new(vec![0, 1, 2, 0]);
        ind.set_interior(vec![5, 6, 7]);
        assert_eq!(ind.route(), &[0, 5, 6, 7, 0]);
    }

    #[test]
    fn interior_id_set_is_order_independent() {
        let a = Individual::new(vec![0, 1, 2, 3, 0]);
        let b = Individual::new(vec![0, 3, 1, 2, 0]);
        assert_eq!(a.interior_id_set(), b.interior_id_set());
    }

    #[test]
    fn metrics_default_to_zero_before_evaluation() {
        let ind = Individual::new(vec![0, 1, 0]);
        assert_eq!(ind.fitness(), 0.0);
        assert_eq!(ind.total_score(), 0.0);
    }
}
