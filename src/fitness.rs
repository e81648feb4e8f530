//! Fitness evaluation: collected score minus shaped infeasibility penalties.

use crate::catalog::Catalog;
use crate::distance::DistanceMatrix;
use crate::individual::Individual;
use crate::preferences::UserPreferences;
use crate::simulation::simulate;

/// Penalty per unit of time a node's close_time was exceeded by.
pub const LATE_ARRIVAL_COEFF: f64 = 100.0;
/// Penalty per unit of time the route returned to the depot late.
pub const LATE_RETURN_COEFF: f64 = 100.0;
/// Penalty per unit of cost the route exceeded its budget by.
pub const BUDGET_COEFF: f64 = 0.5;
/// Penalty per unit of time spent waiting at a node.
pub const WAIT_COEFF: f64 = 0.2;

/// Evaluates `individual` in place, caching its fitness and aggregate
/// metrics, and returns the fitness value.
///
/// Infeasible routes are not discarded: a route that breaks a time window
/// or the budget is scored with the shaped penalty terms above rather than
/// rejected outright, so the genetic operators can still recombine its
/// otherwise-useful POI selection (spec §4.3, §9).
pub fn evaluate(
    individual: &mut Individual,
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
) -> f64 {
    let route = individual.route().to_vec();
    let sim = simulate(&route, catalog, matrix, prefs);

    let total_score: f64 = individual
        .interior()
        .iter()
        .filter_map(|&id| catalog.get(id))
        .map(|poi| poi.base_score() * prefs.weight_for(poi.category()))
        .sum();

    let late_arrival_penalty: f64 = sim.late_excess.iter().sum();
    let late_return_penalty = (sim.final_time - prefs.end_time()).max(0.0);
    let budget_penalty = (sim.total_cost - prefs.budget()).max(0.0);
    let wait_penalty = sim.total_wait;

    let fitness = total_score
        - LATE_ARRIVAL_COEFF * late_arrival_penalty
        - LATE_RETURN_COEFF * late_return_penalty
        - BUDGET_COEFF * budget_penalty
        - WAIT_COEFF * wait_penalty;

    individual.set_metrics(fitness, total_score, sim.total_cost, sim.final_time, sim.total_wait);
    fitness
}
