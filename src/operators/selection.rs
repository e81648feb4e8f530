//! Tournament selection.

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::individual::Individual;
use crate::population::Population;

/// Default number of contenders drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Draws `tournament_size` individuals at random (with replacement across
/// repeated calls, without replacement within a single tournament) and
/// returns a clone of the fittest contender.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn tournament_select<R: Rng + ?Sized>(
    population: &Population,
    tournament_size: usize,
    rng: &mut R,
) -> Individual {
    let contenders: Vec<&Individual> = population
        .individuals()
        .iter()
        .choose_multiple(rng, tournament_size.max(1));
    contenders
        .into_iter()
        .max_by(|a, b| a.fitness().partial_cmp(&b.fitness()).unwrap())
        .expect("population must be non-empty")
        .clone()
}
