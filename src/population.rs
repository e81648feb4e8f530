//! A fixed-size, fitness-sorted collection of individuals.

use crate::individual::Individual;

/// An ordered sequence of individuals, sorted by descending fitness after
/// every call to [`Population::sort_by_fitness`] (spec §3).
///
/// The evolution loop relies on index 0 being the current best after each
/// sort; elitism and the diversity filter both read from that ordering.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Wraps an already-built vector of individuals.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Number of individuals currently held.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// `true` if the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// A read-only view of the individuals, in their current order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// A mutable view, for in-place mutation by the operators.
    pub fn individuals_mut(&mut self) -> &mut Vec<Individual> {
        &mut self.individuals
    }

    /// Sorts individuals by descending fitness. Every individual must have
    /// already been scored by [`crate::fitness::evaluate`].
    pub fn sort_by_fitness(&mut self) {
        self.individuals
            .sort_by(|a, b| b.fitness().partial_cmp(&a.fitness()).unwrap());
    }

    /// The best individual, if any, assuming the population is sorted.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Truncates to the `n` best individuals, assuming the population is
    /// already sorted by descending fitness.
    pub fn truncate(&mut self, n: usize) {
        self.individuals.truncate(n);
    }

    /// Replaces the contents wholesale, e.g. at the start of a new
    /// generation.
    pub fn replace(&mut self, individuals: Vec<Individual>) {
        self.individuals = individuals;
    }
}
