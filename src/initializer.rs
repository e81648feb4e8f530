//! Initial population construction: Labadie-style greedy insertion for the
//! majority of individuals, pure random insertion order for the rest.

use rand::seq::IndexedRandom;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::distance::DistanceMatrix;
use crate::individual::Individual;
use crate::population::Population;
use crate::preferences::UserPreferences;
use crate::simulation::try_insert;

/// Size of the restricted candidate list used by the greedy heuristic
/// (spec §4.4).
pub const RCL_SIZE: usize = 3;

/// Fraction of the initial population built by the greedy heuristic; the
/// remainder is built by pure random insertion order, to seed diversity
/// the heuristic alone wouldn't reach.
pub const HEURISTIC_FRACTION: f64 = 0.8;

/// Labadie desirability ratio of inserting `candidate` right after
/// `from`: weighted score per unit of travel distance.
fn desirability(from_id: usize, candidate_id: usize, catalog: &Catalog, matrix: &DistanceMatrix, prefs: &UserPreferences) -> f64 {
    let poi = match catalog.get(candidate_id) {
        Some(poi) => poi,
        None => return 0.0,
    };
    let distance = matrix.travel_time(from_id, candidate_id);
    if distance <= 0.0 {
        return f64::INFINITY;
    }
    (poi.base_score() * prefs.weight_for(poi.category())) / distance
}

/// Builds one individual by repeatedly appending, to the end of the
/// interior, a POI drawn at random from the restricted candidate list of
/// the `RCL_SIZE` most desirable feasible remaining insertions.
pub fn build_heuristic_individual<R: Rng + ?Sized>(
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    rng: &mut R,
) -> Individual {
    let depot = catalog.depot_id();
    let mut route = vec![depot, depot];
    let mut remaining: Vec<usize> = catalog
        .pois()
        .iter()
        .filter(|p| p.id() != depot)
        .map(|p| p.id())
        .collect();

    loop {
        let last_visited = route[route.len() - 2];

        let mut scored: Vec<(usize, f64)> = remaining
            .iter()
            .filter(|&&id| try_insert(&route, id, catalog, matrix, prefs))
            .map(|&id| (id, desirability(last_visited, id, catalog, matrix, prefs)))
            .collect();

        if scored.is_empty() {
            break;
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        scored.truncate(RCL_SIZE);

        let &(chosen, _) = scored.choose(rng).expect("non-empty RCL");
        let insert_at = route.len() - 1;
        route.insert(insert_at, chosen);
        remaining.retain(|&id| id != chosen);
    }

    Individual::new(route)
}

/// Builds one individual by visiting candidates in a random order,
/// appending each only if it keeps the route feasible.
pub fn build_random_individual<R: Rng + ?Sized>(
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    rng: &mut R,
) -> Individual {
    let depot = catalog.depot_id();
    let mut route = vec![depot, depot];
    let mut order: Vec<usize> = catalog
        .pois()
        .iter()
        .filter(|p| p.id() != depot)
        .map(|p| p.id())
        .collect();
    order.shuffle(rng);

    for id in order {
        if try_insert(&route, id, catalog, matrix, prefs) {
            let insert_at = route.len() - 1;
            route.insert(insert_at, id);
        }
    }

    Individual::new(route)
}

/// Builds an initial population of `size` individuals: `HEURISTIC_FRACTION`
/// of them via [`build_heuristic_individual`], the rest via
/// [`build_random_individual`] (spec §4.4).
pub fn population<R: Rng + ?Sized>(
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    size: usize,
    rng: &mut R,
) -> Population {
    let heuristic_count = ((size as f64) * HEURISTIC_FRACTION).round() as usize;
    let mut individuals = Vec::with_capacity(size);

    for _ in 0..heuristic_count.min(size) {
        individuals.push(build_heuristic_individual(catalog, matrix, prefs, rng));
    }
    for _ in individuals.len()..size {
        individuals.push(build_random_individual(catalog, matrix, prefs, rng));
    }

    Population::new(individuals)
}
