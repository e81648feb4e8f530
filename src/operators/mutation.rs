//! Mutation dispatch: 2-opt reversal, pairwise swap, or best-feasible
//! insertion of an unvisited POI (spec §4.5).

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::distance::DistanceMatrix;
use crate::individual::Individual;
use crate::preferences::UserPreferences;
use crate::simulation::is_feasible;

/// Reverses a random contiguous interior sub-segment. A no-op on routes
/// with fewer than two interior POIs.
pub fn two_opt<R: Rng + ?Sized>(ind: &mut Individual, rng: &mut R) {
    let len = ind.interior().len();
    if len < 2 {
        return;
    }
    let mut i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len);
    if i > j {
        std::mem::swap(&mut i, &mut j);
    }
    ind.interior_mut()[i..=j].reverse();
}

/// Swaps two distinct randomly chosen interior positions. A no-op on
/// routes with fewer than two interior POIs.
pub fn swap<R: Rng + ?Sized>(ind: &mut Individual, rng: &mut R) {
    let len = ind.interior().len();
    if len < 2 {
        return;
    }
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len);
    while j == i {
        j = rng.random_range(0..len);
    }
    ind.interior_mut().swap(i, j);
}

/// Picks a random unvisited POI and inserts it at whichever interior
/// position keeps the route feasible at the smallest added travel
/// distance. A no-op if every POI is already visited or no feasible
/// position exists.
pub fn best_insertion<R: Rng + ?Sized>(
    ind: &mut Individual,
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    rng: &mut R,
) {
    let visited: HashSet<usize> = ind.interior_id_set();
    let depot = ind.depot_id();
    let candidates: Vec<usize> = catalog
        .pois()
        .iter()
        .map(|p| p.id())
        .filter(|id| *id != depot && !visited.contains(id))
        .collect();
    let Some(&candidate) = candidates.choose(rng) else {
        return;
    };

    let route = ind.route().to_vec();
    let mut best: Option<(usize, f64)> = None;
    for pos in 1..route.len() {
        let mut trial = route.clone();
        trial.insert(pos, candidate);
        if !is_feasible(&trial, catalog, matrix, prefs) {
            continue;
        }
        let service_duration = catalog.get(candidate).unwrap().service_duration();
        let delta = matrix.travel_time(route[pos - 1], candidate)
            + service_duration
            + matrix.travel_time(candidate, route[pos])
            - matrix.travel_time(route[pos - 1], route[pos]);
        if best.is_none_or(|(_, best_delta)| delta < best_delta) {
            best = Some((pos, delta));
        }
    }

    if let Some((pos, _)) = best {
        let mut route = route;
        route.insert(pos, candidate);
        *ind.route_mut() = route;
    }
}

/// Applies one of the three mutation kinds, chosen with weights 30%
/// 2-opt / 30% swap / 40% best-insertion (spec §4.5). Routes too short for
/// 2-opt/swap always fall through to best-insertion.
pub fn mutate<R: Rng + ?Sized>(
    ind: &mut Individual,
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    rng: &mut R,
) {
    if ind.interior().len() < 2 {
        best_insertion(ind, catalog, matrix, prefs, rng);
        return;
    }
    let roll: f64 = rng.random_range(0.0..1.0);
    if roll < 0.3 {
        two_opt(ind, rng);
    } else if roll < 0.6 {
        swap(ind, rng);
    } else {
        best_insertion(ind, catalog, matrix, prefs, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::{Category, Poi, TimeWindow};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn catalog() -> Catalog {
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        Catalog::from_pois(vec![
            Poi::depot(0.0, 0.0, horizon),
            Poi::new(1, 3.0, 4.0, 10.0, horizon, 30.0, 5.0, Category::FoodDrink),
            Poi::new(2, 0.0, 8.0, 20.0, horizon, 30.0, 5.0, Category::Shopping),
            Poi::new(3, -6.0, 0.0, 5.0, horizon, 10.0, 1.0, Category::NatureParks),
        ])
        .unwrap()
    }

    fn prefs() -> UserPreferences {
        let stars: HashMap<Category, u8> =
            Category::all_interests().into_iter().map(|c| (c, 3)).collect();
        UserPreferences::new(100.0, 0.0, 600.0, 0, stars).unwrap()
    }

    #[test]
    fn two_opt_preserves_the_multiset_of_ids() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ind = Individual::new(vec![0, 1, 2, 3, 0]);
        two_opt(&mut ind, &mut rng);
        let mut interior = ind.interior().to_vec();
        interior.sort();
        assert_eq!(interior, vec![1, 2, 3]);
    }

    #[test]
    fn two_opt_on_short_route_is_a_no_op() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ind = Individual::new(vec![0, 1, 0]);
        two_opt(&mut ind, &mut rng);
        assert_eq!(ind.interior(), &[1]);
    }

    #[test]
    fn swap_preserves_the_multiset_of_ids() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ind = Individual::new(vec![0, 1, 2, 3, 0]);
        swap(&mut ind, &mut rng);
        let mut interior = ind.interior().to_vec();
        interior.sort();
        assert_eq!(interior, vec![1, 2, 3]);
    }

    #[test]
    fn best_insertion_adds_a_previously_unvisited_poi() {
        let catalog = catalog();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ind = Individual::new(vec![0, 1, 0]);
        best_insertion(&mut ind, &catalog, &matrix, &p, &mut rng);
        assert!(ind.interior().len() >= 1);
    }

    #[test]
    fn best_insertion_never_produces_an_infeasible_route() {
        let catalog = catalog();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut ind = Individual::new(vec![0, 1, 0]);
        best_insertion(&mut ind, &catalog, &matrix, &p, &mut rng);
        assert!(is_feasible(ind.route(), &catalog, &matrix, &p));
    }

    #[test]
    fn best_insertion_on_fully_visited_route_is_a_no_op() {
        let catalog = catalog();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ind = Individual::new(vec![0, 1, 2, 3, 0]);
        best_insertion(&mut ind, &catalog, &matrix, &p, &mut rng);
        assert_eq!(ind.interior().len(), 3);
    }
}
