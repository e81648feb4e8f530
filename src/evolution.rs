//! The generational loop: selection, crossover, mutation, repair and
//! survivor selection, repeated until the generation cap or a stagnation
//! limit is reached (spec §4.7).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::catalog::Catalog;
use crate::config::HgaConfig;
use crate::distance::DistanceMatrix;
use crate::fitness;
use crate::individual::Individual;
use crate::initializer;
use crate::operators::{crossover, mutation, selection};
use crate::population::Population;
use crate::preferences::UserPreferences;
use crate::repair;

/// A cooperative stop signal an external caller can flip to interrupt a
/// long-running [`EvolutionLoop::run`] between generations.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that starts out not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation. Visible to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// `true` once [`CancellationToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Replaces any child whose interior POI set duplicates one already seen
/// in this generation with a fresh randomly built individual, so the
/// population doesn't collapse onto a handful of routes (spec §4.7).
fn apply_diversity_filter<R: Rng + ?Sized>(
    children: &mut [Individual],
    catalog: &Catalog,
    matrix: &DistanceMatrix,
    prefs: &UserPreferences,
    rng: &mut R,
) {
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    for child in children.iter_mut() {
        let mut key: Vec<usize> = child.interior_id_set().into_iter().collect();
        key.sort_unstable();

        if seen.insert(key) {
            continue;
        }

        log::warn!("diversity filter: replacing duplicate child with a fresh random individual");
        let mut replacement = initializer::build_random_individual(catalog, matrix, prefs, rng);
        fitness::evaluate(&mut replacement, catalog, matrix, prefs);
        *child = replacement;
    }
}

/// The final state of a completed [`EvolutionLoop::run`] call.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The fitness-sorted final population.
    pub population: Population,
    /// Number of generations actually executed before stopping.
    pub generations_run: usize,
}

/// Drives the hybrid genetic algorithm to completion for one catalog and
/// one set of user preferences.
pub struct EvolutionLoop<'a> {
    catalog: &'a Catalog,
    matrix: &'a DistanceMatrix,
    prefs: &'a UserPreferences,
    config: HgaConfig,
}

impl<'a> EvolutionLoop<'a> {
    /// Builds a loop over a fixed catalog, distance matrix and user
    /// preferences.
    pub fn new(
        catalog: &'a Catalog,
        matrix: &'a DistanceMatrix,
        prefs: &'a UserPreferences,
        config: HgaConfig,
    ) -> Self {
        Self {
            catalog,
            matrix,
            prefs,
            config,
        }
    }

    /// Runs the generational loop to completion, returning the final
    /// fitness-sorted population.
    ///
    /// Stops on whichever comes first: the configured generation cap,
    /// `config.stagnation_limit()` consecutive generations without a
    /// fitness improvement, or `cancel` being signalled.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R, cancel: &CancellationToken) -> EvolutionOutcome {
        let mut population = initializer::population(
            self.catalog,
            self.matrix,
            self.prefs,
            self.config.population_size(),
            rng,
        );
        for individual in population.individuals_mut() {
            fitness::evaluate(individual, self.catalog, self.matrix, self.prefs);
        }
        population.sort_by_fitness();

        let mut best_fitness = population
            .best()
            .map(Individual::fitness)
            .unwrap_or(f64::NEG_INFINITY);
        let mut stagnant_generations = 0usize;
        let mut generations_run = 0usize;

        for generation in 0..self.config.generations() {
            if cancel.is_cancelled() {
                log::info!("evolution cancelled at generation {generation}");
                break;
            }
            if stagnant_generations >= self.config.stagnation_limit() {
                log::info!(
                    "stopping at generation {generation}: no improvement for {} generations",
                    self.config.stagnation_limit()
                );
                break;
            }
            generations_run = generation + 1;

            let mut children = self.breed_generation(&population, rng);
            apply_diversity_filter(&mut children, self.catalog, self.matrix, self.prefs, rng);
            children.sort_by(|a, b| b.fitness().partial_cmp(&a.fitness()).unwrap());

            let elite_count = self.config.elitism_count().min(population.len());
            let mut next_individuals: Vec<Individual> =
                population.individuals()[..elite_count].to_vec();
            let remaining = self.config.population_size().saturating_sub(next_individuals.len());
            next_individuals.extend(children.into_iter().take(remaining));

            population.replace(next_individuals);
            population.sort_by_fitness();

            let current_best = population
                .best()
                .map(Individual::fitness)
                .unwrap_or(f64::NEG_INFINITY);
            if current_best > best_fitness + self.config.improvement_threshold() {
                best_fitness = current_best;
                stagnant_generations = 0;
            } else {
                stagnant_generations += 1;
            }
            log::debug!("generation {generation}: best fitness {current_best:.3}");
        }

        EvolutionOutcome {
            population,
            generations_run,
        }
    }

    fn breed_generation<R: Rng + ?Sized>(&self, population: &Population, rng: &mut R) -> Vec<Individual> {
        let mut children = Vec::with_capacity(self.config.population_size());
        while children.len() < self.config.population_size() {
            let parent_a = selection::tournament_select(population, self.config.tournament_size(), rng);
            let parent_b = selection::tournament_select(population, self.config.tournament_size(), rng);

            let mut child = crossover::crossover(&parent_a, &parent_b, rng);

            if rng.random_bool(self.config.mutation_rate()) {
                mutation::mutate(&mut child, self.catalog, self.matrix, self.prefs, rng);
            }

            repair::repair(&mut child, self.catalog, self.matrix, self.prefs);
            fitness::evaluate(&mut child, self.catalog, self.matrix, self.prefs);
            children.push(child);
        }
        children
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
        let mut pois = vec![Poi::depot(0.0, 0.0, horizon)];
        for i in 1..12 {
            pois.push(Poi::new(
                i,
                (i as f64) * 5.0,
                (i as f64 % 3.0) * 4.0,
                10.0 + i as f64,
                horizon,
                15.0,
                2.0,
                Category::FoodDrink,
            ));
        }
        Catalog::from_pois(pois).unwrap()
    }

    fn prefs() -> UserPreferences {
        let stars: HashMap<Category, u8> =
            Category::all_interests().into_iter().map(|c| (c, 3)).collect();
        UserPreferences::new(200.0, 0.0, 600.0, 0, stars).unwrap()
    }

    #[test]
    fn run_never_decreases_the_population_best_fitness() {
        let catalog = catalog();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs();
        let config = HgaConfig::default().with_population_size(12).with_generations(5);
        let loop_ = EvolutionLoop::new(&catalog, &matrix, &p, config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cancel = CancellationToken::new();

        let initial_best = {
            let mut pop = initializer::population(&catalog, &matrix, &p, 12, &mut ChaCha8Rng::seed_from_u64(1));
            for ind in pop.individuals_mut() {
                fitness::evaluate(ind, &catalog, &matrix, &p);
            }
            pop.sort_by_fitness();
            pop.best().map(Individual::fitness).unwrap_or(f64::NEG_INFINITY)
        };

        let outcome = loop_.run(&mut rng, &cancel);
        let final_best = outcome
            .population
            .best()
            .map(Individual::fitness)
            .unwrap_or(f64::NEG_INFINITY);
        assert!(final_best >= initial_best - 1e-6);
    }

    #[test]
    fn cancellation_stops_the_loop_promptly() {
        let catalog = catalog();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs();
        let config = HgaConfig::default().with_population_size(8).with_generations(1000);
        let loop_ = EvolutionLoop::new(&catalog, &matrix, &p, config);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = loop_.run(&mut rng, &cancel);
        assert!(!outcome.population.is_empty());
        assert_eq!(outcome.generations_run, 0);
    }

    #[test]
    fn result_population_is_sorted_descending() {
        let catalog = catalog();
        let matrix = DistanceMatrix::from_pois(catalog.pois());
        let p = prefs();
        let config = HgaConfig::default().with_population_size(8).with_generations(3);
        let loop_ = EvolutionLoop::new(&catalog, &matrix, &p, config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cancel = CancellationToken::new();

        let outcome = loop_.run(&mut rng, &cancel);
        let fitnesses: Vec<f64> = outcome
            .population
            .individuals()
            .iter()
            .map(Individual::fitness)
            .collect();
        for pair in fitnesses.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert_eq!(outcome.generations_run, 3);
    }
}
