//! Forward simulation of a route: timing, feasibility and the feasibility
//! probe operators build on top of it (spec §4.2).

use crate::catalog::Catalog;
use crate::distance::DistanceMatrix;
use crate::preferences::UserPreferences;

/// The per-node timing and aggregate outcome of simulating a route.
///
/// All four timing vectors are indexed in lock-step with the route
/// (`arrivals[0]` is the departure from the starting depot). `late_excess`
/// holds `max(0, start - close_time)` per node for the fitness evaluator's
/// penalty terms; it is zero everywhere on a feasible route.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// `false` if any node's close_time was violated, or the final cost or
    /// time budget was exceeded.
    pub feasible: bool,
    /// Raw arrival time at each route position, before any waiting.
    pub arrivals: Vec<f64>,
    /// Waiting time incurred at each route position.
    pub waits: Vec<f64>,
    /// Service start time at each route position (`arrival + wait`).
    pub starts: Vec<f64>,
    /// Departure time from each route position (`start + service_duration`).
    pub leaves: Vec<f64>,
    /// `max(0, start - close_time)` at each route position.
    pub late_excess: Vec<f64>,
    /// Total price accumulated across the route.
    pub total_cost: f64,
    /// Arrival time back at the terminal depot.
    pub final_time: f64,
    /// Sum of waiting time across the whole route.
    pub total_wait: f64,
}

/// Forward-simulates `route` and returns full per-node timing.
///
/// Implements spec §4.2's five-step transition rule: a close_time
/// violation is recorded in `late_excess` but does not stop the
/// simulation — the route's remaining legs are still timed, matching the
/// reference implementation's behavior of continuing from the late
/// `arrival` rather than snapping to `close_time` (spec §9).
pub fn simulate(
    route: &[usize],
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
) -> SimResult {
    run(route, catalog, matrix, prefs, false)
}

/// Strict feasibility check with early exit on the first violation.
///
/// Cheaper than `simulate(..).feasible` when the caller only needs the
/// boolean, which is the common case inside operators and the initializer.
pub fn is_feasible(
    route: &[usize],
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
) -> bool {
    run(route, catalog, matrix, prefs, true).feasible
}

/// Tests whether appending `candidate` just before the trailing depot
/// keeps the route feasible (spec §4.2), without mutating `route`.
pub fn try_insert(
    route: &[usize],
    candidate: usize,
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
) -> bool {
    let mut candidate_route = route.to_vec();
    let insert_at = candidate_route.len().saturating_sub(1);
    candidate_route.insert(insert_at, candidate);
    is_feasible(&candidate_route, catalog, matrix, prefs)
}

fn run(
    route: &[usize],
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    early_exit: bool,
) -> SimResult {
    let n = route.len();
    let mut arrivals = vec![0.0; n];
    let mut waits = vec![0.0; n];
    let mut starts = vec![0.0; n];
    let mut leaves = vec![0.0; n];
    let mut late_excess = vec![0.0; n];

    let mut feasible = true;
    let mut total_cost = 0.0;
    let mut total_wait = 0.0;

    if n == 0 {
        return SimResult {
            feasible: true,
            arrivals,
            waits,
            starts,
            leaves,
            late_excess,
            total_cost,
            final_time: prefs.start_time(),
            total_wait,
        };
    }

    arrivals[0] = prefs.start_time();
    starts[0] = prefs.start_time();
    leaves[0] = prefs.start_time();

    let mut current_time = prefs.start_time();

    for i in 1..n {
        let from = route[i - 1];
        let to = route[i];
        let poi = match catalog.get(to) {
            Some(poi) => poi,
            None => {
                feasible = false;
                if early_exit {
                    break;
                }
                continue;
            }
        };

        let travel = matrix.travel_time(from, to);
        let raw_arrival = current_time + travel;
        let tw = poi.time_window();
        let wait = tw.waiting_time(raw_arrival);
        let start = raw_arrival + wait;

        if tw.is_violated(start) {
            feasible = false;
            late_excess[i] = start - tw.close_time();
            if early_exit {
                arrivals[i] = raw_arrival;
                waits[i] = wait;
                starts[i] = start;
                break;
            }
        }

        let leave = start + poi.service_duration();

        arrivals[i] = raw_arrival;
        waits[i] = wait;
        starts[i] = start;
        leaves[i] = leave;

        total_cost += poi.price();
        total_wait += wait;
        current_time = leave;
    }

    let final_time = current_time;

    if total_cost > prefs.budget() {
        feasible = false;
    }
    if final_time > prefs.end_time() {
        feasible = false;
    }

    SimResult {
        feasible,
        arrivals,
        waits,
        starts,
        leaves,
        late_excess,
        total_cost,
        final_time,
        total_wait,
    }
}
