//! The crate's external entry point: validates input, runs the
//! evolutionary loop, and shapes the best individual into a human-facing
//! itinerary (spec §7).

use std::sync::Arc;
use std::time::Instant;

use rand::Rng;

use crate::catalog::Catalog;
use crate::config::HgaConfig;
use crate::distance::DistanceMatrix;
use crate::error::SolverError;
use crate::evolution::{CancellationToken, EvolutionLoop};
use crate::poi::Category;
use crate::preferences::UserPreferences;
use crate::simulation::simulate;

/// One stop on the produced itinerary, depot included at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryItem {
    /// 1-based position in the itinerary; `1` and `items.len()` are
    /// always the depot.
    pub order: usize,
    /// The visited POI's id.
    pub poi_id: usize,
    /// A display name; the depot is always `"Depot"`.
    pub name: String,
    /// The visited POI's category.
    pub category: Category,
    /// Raw arrival time, `HH:MM`.
    pub arrival: String,
    /// Service start time (after any waiting), `HH:MM`.
    pub start: String,
    /// Departure time, `HH:MM`.
    pub leave: String,
    /// Minutes spent waiting for this stop to open, rounded.
    pub wait_minutes: u32,
    /// This stop's entry price (`0.0` for the depot).
    pub cost: f64,
    /// This stop's interest-weighted score (`0.0` for the depot).
    pub score: f64,
}

/// The result of a completed solve: an ordered itinerary plus its
/// aggregate metrics.
#[derive(Debug, Clone)]
pub struct SolverOutput {
    items: Vec<ItineraryItem>,
    total_score: f64,
    total_cost: f64,
    total_duration_hours: f64,
    generations_run: usize,
    execution_time_secs: f64,
}

impl SolverOutput {
    /// The full itinerary, depot bookends included (spec §6).
    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    /// Sum of the weighted scores of every visited POI.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Sum of the entry prices of every visited POI.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Elapsed time from departure to return, in hours.
    pub fn total_duration_hours(&self) -> f64 {
        self.total_duration_hours
    }

    /// Number of generations the evolutionary loop actually ran.
    pub fn generations_run(&self) -> usize {
        self.generations_run
    }

    /// Wall-clock time the solve took, in seconds.
    pub fn execution_time_secs(&self) -> f64 {
        self.execution_time_secs
    }

    /// Number of non-depot POIs visited.
    pub fn visited_count(&self) -> usize {
        self.items.len().saturating_sub(2)
    }

    /// `true` if the itinerary visits no POI.
    pub fn is_empty(&self) -> bool {
        self.visited_count() == 0
    }

    /// Converts an empty itinerary into [`SolverError::NoFeasibleRoute`].
    ///
    /// `solve` always succeeds once its input passes validation — an
    /// empty itinerary is a legitimate (if disappointing) result, not a
    /// solver failure. Callers that want to treat "nothing to visit" as
    /// an error reach for this instead of inspecting `is_empty` by hand.
    pub fn require_nonempty(self) -> Result<Self, SolverError> {
        if self.is_empty() {
            Err(SolverError::NoFeasibleRoute)
        } else {
            Ok(self)
        }
    }
}

fn format_hhmm(minutes: f64) -> String {
    let total_minutes = minutes.round().max(0.0) as i64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Solves a single-tour Team Orienteering Problem with Time Windows using
/// a hybrid genetic algorithm.
///
/// Holds a catalog and its derived distance matrix so repeated calls to
/// [`TopTwSolver::solve`] with different preferences reuse both (spec §5).
pub struct TopTwSolver {
    catalog: Arc<Catalog>,
    matrix: Arc<DistanceMatrix>,
    config: HgaConfig,
}

impl TopTwSolver {
    /// Builds a solver over a shared, immutable catalog.
    pub fn new(catalog: Arc<Catalog>, config: HgaConfig) -> Self {
        let matrix = Arc::new(DistanceMatrix::from_pois(catalog.pois()));
        Self {
            catalog,
            matrix,
            config,
        }
    }

    /// Solves for one set of user preferences.
    ///
    /// Returns [`SolverError::InvalidInput`] if `prefs.start_node_id()`
    /// isn't the catalog's depot, or [`SolverError::EmptyCatalog`] if the
    /// catalog has no non-depot POIs to visit. Otherwise runs the
    /// evolutionary loop and always returns `Ok`, even when the best
    /// route found visits nothing.
    pub fn solve<R: Rng + ?Sized>(
        &self,
        prefs: &UserPreferences,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> Result<SolverOutput, SolverError> {
        let started_at = Instant::now();

        if prefs.start_node_id() != self.catalog.depot_id() {
            return Err(SolverError::InvalidInput {
                reason: format!(
                    "start_node_id {} does not match catalog depot {}",
                    prefs.start_node_id(),
                    self.catalog.depot_id()
                ),
            });
        }
        if self.catalog.num_interests() == 0 {
            return Err(SolverError::EmptyCatalog);
        }

        log::info!(
            "solving for budget={} horizon=[{}, {}]",
            prefs.budget(),
            prefs.start_time(),
            prefs.end_time()
        );

        let evolution = EvolutionLoop::new(&self.catalog, &self.matrix, prefs, self.config);
        let outcome = evolution.run(rng, cancel);

        let best = outcome.population.best().ok_or_else(|| SolverError::InternalFault {
            reason: "evolution loop produced an empty population".to_string(),
        })?;

        let sim = simulate(best.route(), &self.catalog, &self.matrix, prefs);
        let route = best.route();

        let mut items = Vec::with_capacity(route.len());
        for (position, &poi_id) in route.iter().enumerate() {
            let poi = self.catalog.get(poi_id).ok_or_else(|| SolverError::InternalFault {
                reason: format!("route references unknown POI id {poi_id}"),
            })?;
            let name = if poi.category() == Category::Depot {
                "Depot".to_string()
            } else {
                format!("POI {poi_id}")
            };
            items.push(ItineraryItem {
                order: position + 1,
                poi_id,
                name,
                category: poi.category(),
                arrival: format_hhmm(sim.arrivals[position]),
                start: format_hhmm(sim.starts[position]),
                leave: format_hhmm(sim.leaves[position]),
                wait_minutes: sim.waits[position].round().max(0.0) as u32,
                cost: poi.price(),
                score: poi.base_score() * prefs.weight_for(poi.category()),
            });
        }

        log::info!(
            "solved in {} generations: {} stops, score {:.2}",
            outcome.generations_run,
            best.interior().len(),
            best.total_score()
        );

        Ok(SolverOutput {
            items,
            total_score: best.total_score(),
            total_cost: best.total_cost(),
            total_duration_hours: (best.total_time() - prefs.start_time()) / 60.0,
            generations_run: outcome.generations_run,
            execution_time_secs: started_at.elapsed().as_secs_f64(),
        })
    }
}
