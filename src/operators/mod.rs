//! Genetic operators: selection, recombination and mutation (spec §4.5).

pub mod crossover;
pub mod mutation;
pub mod selection;
