//! Feasibility repair: strip interior POIs from an infeasible route until
//! it satisfies every time window, the budget and the return deadline
//! (spec §4.6).

use crate::catalog::Catalog;
use crate::distance::DistanceMatrix;
use crate::individual::Individual;
use crate::preferences::UserPreferences;
use crate::simulation::simulate;

/// Finds the interior position whose removal gives up the least weighted
/// score per unit of marginal time cost (`d(prev,poi) + service(poi) +
/// d(poi,next) − d(prev,next)`) — the POI that is "costing" the route the
/// most relative to what it delivers. A non-positive marginal cost is
/// treated as infinite, so that node is never picked as the worst.
fn worst_ratio_index(
    route: &[usize],
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
) -> Option<usize> {
    let len = route.len();
    if len < 3 {
        return None;
    }
    let mut worst: Option<(usize, f64)> = None;
    for i in 1..len - 1 {
        let prev = route[i - 1];
        let cur = route[i];
        let next = route[i + 1];
        let poi = match catalog.get(cur) {
            Some(poi) => poi,
            None => continue,
        };
        let marginal_time_cost = matrix.travel_time(prev, cur)
            + poi.service_duration()
            + matrix.travel_time(cur, next)
            - matrix.travel_time(prev, next);
        let score = poi.base_score() * prefs.weight_for(poi.category());
        let ratio = if marginal_time_cost <= 0.0 {
            f64::INFINITY
        } else {
            score / marginal_time_cost
        };
        if worst.is_none_or(|(_, worst_ratio)| ratio < worst_ratio) {
            worst = Some((i, ratio));
        }
    }
    worst.map(|(i, _)| i)
}

/// Repeatedly removes one interior POI at a time until `individual`'s
/// route is feasible or empty.
///
/// A late-return violation (arriving back at the depot past the end of
/// the horizon) is handled by dropping the node immediately before the
/// return leg rather than the worst-ratio node: the value/distance ratio
/// targets interior legs and doesn't necessarily shorten the final leg
/// back to the depot, which is what a late return actually needs.
pub fn repair(
    individual: &mut Individual,
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
) {
    loop {
        let route = individual.route().to_vec();
        let sim = simulate(&route, catalog, matrix, prefs);
        if sim.feasible {
            return;
        }
        if individual.interior().is_empty() {
            return;
        }

        let late_return = sim.final_time > prefs.end_time();
        let idx = if late_return {
            route.len() - 2
        } else {
            worst_ratio_index(&route, catalog, matrix, prefs).unwrap_or(route.len() - 2)
        };

        let mut new_route = route;
        new_route.remove(idx);
        *individual.route_mut() = new_route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::{Category, Poi, TimeWindow};
    use crate::simulation::is_feasible;
    use std::collections::HashMap;

    fn prefs(budget: f64) -> UserPreferences {
        let stars: HashMap<Category, u8> =
            Category::all_interests().into_iter().map(|c| (c, 3)).collect();
        UserPreferences::new(budget, 0.0, 600.0, 0, stars).unwrap()
    }

    #[test]
    fn feasible_route_is_left_untouched() {
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        let catalog = Catalog::from_pois(vec![
            Poi::depot(0.0, 0.0, horizon),
            Poi::new(1, 3.0, 4.0, 10.0, horizon, 30.0, 5.0, Category::FoodDrink),
        ])
        .unwrap();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs(100.0);
        let mut ind = Individual::new(vec![0, 1, 0]);
        repair(&mut ind, &catalog, &matrix, &p);
        assert_eq!(ind.route(), &[0, 1, 0]);
    }

    #[test]
    fn over_budget_route_sheds_pois_until_feasible() {
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        let catalog = Catalog::from_pois(vec![
            Poi::depot(0.0, 0.0, horizon),
            Poi::new(1, 1.0, 0.0, 5.0, horizon, 5.0, 50.0, Category::FoodDrink),
            Poi::new(2, 2.0, 0.0, 5.0, horizon, 5.0, 50.0, Category::Shopping),
            Poi::new(3, 3.0, 0.0, 5.0, horizon, 5.0, 50.0, Category::NatureParks),
        ])
        .unwrap();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs(60.0);
        let mut ind = Individual::new(vec![0, 1, 2, 3, 0]);
        repair(&mut ind, &catalog, &matrix, &p);
        assert!(is_feasible(ind.route(), &catalog, &matrix, &p));
    }

    #[test]
    fn late_return_drops_the_node_before_the_final_leg() {
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        let catalog = Catalog::from_pois(vec![
            Poi::depot(0.0, 0.0, horizon),
            Poi::new(1, 1.0, 0.0, 5.0, horizon, 5.0, 1.0, Category::FoodDrink),
            Poi::new(2, 500.0, 0.0, 5.0, horizon, 5.0, 1.0, Category::Shopping),
        ])
        .unwrap();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs(100.0);
        let mut ind = Individual::new(vec![0, 1, 2, 0]);
        repair(&mut ind, &catalog, &matrix, &p);
        assert!(is_feasible(ind.route(), &catalog, &matrix, &p));
        assert!(!ind.interior().contains(&2));
    }

    #[test]
    fn fully_infeasible_route_repairs_down_to_depot_only() {
        let tight = TimeWindow::new(0.0, 0.1).unwrap();
        let horizon = TimeWindow::new(0.0, 600.0).unwrap();
        let catalog = Catalog::from_pois(vec![
            Poi::depot(0.0, 0.0, horizon),
            Poi::new(1, 100.0, 0.0, 5.0, tight, 5.0, 1.0, Category::FoodDrink),
        ])
        .unwrap();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs(100.0);
        let mut ind = Individual::new(vec![0, 1, 0]);
        repair(&mut ind, &catalog, &matrix, &p);
        assert!(ind.is_depot_only());
    }
}
