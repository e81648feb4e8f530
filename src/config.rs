//! Tunable parameters of the hybrid genetic algorithm (spec §4).

/// Builder-configured parameters for [`crate::evolution::EvolutionLoop`].
///
/// # Examples
///
/// ```
/// use toptw_hga::config::HgaConfig;
///
/// let config = HgaConfig::default()
///     .with_population_size(80)
///     .with_generations(300);
/// assert_eq!(config.population_size(), 80);
/// assert_eq!(config.generations(), 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HgaConfig {
    population_size: usize,
    generations: usize,
    tournament_size: usize,
    mutation_rate: f64,
    elitism_count: usize,
    stagnation_limit: usize,
    improvement_threshold: f64,
}

impl Default for HgaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 200,
            tournament_size: 3,
            mutation_rate: 0.3,
            elitism_count: 2,
            stagnation_limit: 15,
            improvement_threshold: 1e-4,
        }
    }
}

impl HgaConfig {
    /// Number of individuals held in the population at any time.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Maximum number of generations to run before stopping unconditionally.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Sets the generation cap.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Number of contenders drawn per tournament selection.
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    /// Probability that a freshly produced child is mutated.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Number of top individuals carried over unmodified into the next
    /// generation.
    pub fn elitism_count(&self) -> usize {
        self.elitism_count
    }

    /// Sets the elitism count.
    pub fn with_elitism_count(mut self, elitism_count: usize) -> Self {
        self.elitism_count = elitism_count;
        self
    }

    /// Number of consecutive generations without a fitness improvement
    /// before the evolution loop stops early.
    pub fn stagnation_limit(&self) -> usize {
        self.stagnation_limit
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, stagnation_limit: usize) -> Self {
        self.stagnation_limit = stagnation_limit;
        self
    }

    /// Minimum improvement in best fitness required to reset the
    /// stagnation counter.
    pub fn improvement_threshold(&self) -> f64 {
        self.improvement_threshold
    }

    /// Sets the improvement threshold.
    pub fn with_improvement_threshold(mut self, improvement_threshold: f64) -> Self {
        self.improvement_threshold = improvement_threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = HgaConfig::default();
        assert_eq!(config.population_size(), 50);
        assert_eq!(config.generations(), 200);
        assert_eq!(config.tournament_size(), 3);
        assert_eq!(config.elitism_count(), 2);
        assert_eq!(config.stagnation_limit(), 15);
        assert_eq!(config.mutation_rate(), 0.3);
        assert_eq!(config.improvement_threshold(), 1e-4);
    }

    #[test]
    fn builder_methods_chain() {
        let config = HgaConfig::default()
            .with_population_size(10)
            .with_mutation_rate(0.1)
            .with_improvement_threshold(1e-3);
        assert_eq!(config.population_size(), 10);
        assert_eq!(config.mutation_rate(), 0.1);
        assert_eq!(config.improvement_threshold(), 1e-3);
    }
}
