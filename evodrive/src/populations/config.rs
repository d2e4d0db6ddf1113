use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for generation assembly.
///
/// The three quota proportions are applied by round-to-nearest against
/// the generation size; whatever slots remain after the new, elite,
/// and mutated-elite quotas are filled in offspring pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of genomes in every generation.
    pub size: NonZeroUsize,
    /// Proportion of each generation synthesized from scratch.
    pub new_rate: f64,
    /// Proportion of each generation copied unchanged from the
    /// previous generation's best.
    pub elite_rate: f64,
    /// Proportion of each generation built by mutating genomes
    /// fitness-selected from the previous generation's breeding pool.
    pub mutated_elite_rate: f64,
    /// Chance that an offspring pair is mutated after crossover, and
    /// the target proportion of mutated offspring among all offspring.
    pub offspring_mutation_chance: f64,
    /// Fraction of the previous generation, best first, eligible as
    /// mutated-elite source material.
    pub breeding_pool_fraction: f64,
    /// Attempts at producing a crossover pair distinct from both
    /// parents and from each other before giving up and mutating.
    pub crossover_retries: usize,
}

impl PopulationConfig {
    /// Returns a zero-valued configuration (size 1). Useful as a base
    /// to set relevant fields on, mainly in tests.
    pub fn zero() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(1).unwrap(),
            new_rate: 0.0,
            elite_rate: 0.0,
            mutated_elite_rate: 0.0,
            offspring_mutation_chance: 0.0,
            breeding_pool_fraction: 0.0,
            crossover_retries: 0,
        }
    }
}
