use crate::genomics::GeneticConfig;
use crate::populations::{EvolutionError, Generation, PopulationConfig};

use tracing::warn;

/// Drives the generation lifecycle for simulations that score their
/// agents by reporting deaths.
///
/// A cohort owns one live [`Generation`] at a time, with one scoring
/// slot per genome. Agents report their death (and final fitness) at
/// most once each; duplicate reports are ignored, so a simulation may
/// let several independent death causes fire in the same tick without
/// bookkeeping on its side. The next generation can only be assembled
/// once every slot has reported.
///
/// # Examples
/// ```
/// use evodrive::genomics::GeneticConfig;
/// use evodrive::populations::{Cohort, PopulationConfig};
/// use std::num::NonZeroUsize;
///
/// let genetic = GeneticConfig {
///     hidden_layer_sizes: vec![3],
///     ..GeneticConfig::zero()
/// };
/// let config = PopulationConfig {
///     size: NonZeroUsize::new(10).unwrap(),
///     new_rate: 0.2,
///     elite_rate: 0.2,
///     mutated_elite_rate: 0.2,
///     offspring_mutation_chance: 0.5,
///     breeding_pool_fraction: 0.2,
///     crossover_retries: 5,
/// };
///
/// let mut cohort = Cohort::new(genetic, config);
/// for generation in 0..3 {
///     assert_eq!(cohort.generation().number(), generation);
///     for agent in 0..cohort.generation().size() {
///         cohort.report_death(agent, 1.0 + agent as f64);
///     }
///     cohort.advance().unwrap();
/// }
/// ```
pub struct Cohort {
    genetic: GeneticConfig,
    config: PopulationConfig,
    generation: Generation,
    scored: Vec<bool>,
}

impl Cohort {
    /// Creates a cohort and seeds its generation 0.
    ///
    /// # Panics
    /// Panics if `genetic` describes a malformed topology.
    pub fn new(genetic: GeneticConfig, config: PopulationConfig) -> Cohort {
        let generation = Generation::seed(&genetic, &config);
        let scored = vec![false; generation.size()];
        Cohort {
            genetic,
            config,
            generation,
            scored,
        }
    }

    /// Returns the live generation.
    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Returns the number of agents that haven't reported yet.
    pub fn alive_count(&self) -> usize {
        self.scored.iter().filter(|scored| !**scored).count()
    }

    /// Whether every agent has reported its death.
    pub fn is_complete(&self) -> bool {
        self.scored.iter().all(|scored| *scored)
    }

    /// Records the death of the agent at `index` with its final
    /// fitness. Only the first report per agent counts; duplicates
    /// are ignored and return `false`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or the fitness is invalid.
    pub fn report_death(&mut self, index: usize, fitness: f64) -> bool {
        if self.scored[index] {
            warn!(index, "duplicate death report ignored");
            return false;
        }
        self.scored[index] = true;
        self.generation.set_fitness(index, fitness);
        true
    }

    /// Replaces the fully scored generation with its successor and
    /// returns it.
    ///
    /// Fails with [`EvolutionError::GenerationInProgress`] while any
    /// agent is still unreported.
    pub fn advance(&mut self) -> Result<&Generation, EvolutionError> {
        if !self.is_complete() {
            return Err(EvolutionError::GenerationInProgress(self.alive_count()));
        }
        self.generation = Generation::from_previous(&self.generation, &self.genetic, &self.config);
        self.scored = vec![false; self.generation.size()];
        Ok(&self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::ActivationType;

    use std::num::NonZeroUsize;

    fn test_cohort() -> Cohort {
        let genetic = GeneticConfig {
            input_count: NonZeroUsize::new(3).unwrap(),
            output_count: NonZeroUsize::new(2).unwrap(),
            hidden_layer_sizes: vec![4],
            output_activation: ActivationType::TanH,
            heterogeneous_hidden_activation: true,
            weight_mutation_rate: 0.1,
            activation_mutation_rate: 0.0,
            crossover_passes: 3,
            cross_activations: false,
        };
        let config = PopulationConfig {
            size: NonZeroUsize::new(10).unwrap(),
            new_rate: 0.1,
            elite_rate: 0.1,
            mutated_elite_rate: 0.2,
            offspring_mutation_chance: 0.5,
            breeding_pool_fraction: 0.2,
            crossover_retries: 5,
        };
        Cohort::new(genetic, config)
    }

    #[test]
    fn a_fresh_cohort_has_every_agent_alive() {
        let cohort = test_cohort();
        assert_eq!(cohort.alive_count(), 10);
        assert!(!cohort.is_complete());
        assert_eq!(cohort.generation().number(), 0);
    }

    #[test]
    fn advancing_before_all_reports_is_an_error() {
        let mut cohort = test_cohort();
        for agent in 0..7 {
            cohort.report_death(agent, 1.0);
        }

        assert_eq!(
            cohort.advance().unwrap_err(),
            EvolutionError::GenerationInProgress(3)
        );
        assert_eq!(cohort.generation().number(), 0);
    }

    #[test]
    fn advancing_a_scored_cohort_replaces_the_generation() {
        let mut cohort = test_cohort();
        for agent in 0..10 {
            cohort.report_death(agent, 1.0 + agent as f64);
        }
        assert!(cohort.is_complete());

        let next_number = cohort.advance().unwrap().number();
        assert_eq!(next_number, 1);
        assert_eq!(cohort.alive_count(), 10);
        assert!(!cohort.is_complete());
    }

    #[test]
    fn duplicate_death_reports_are_ignored() {
        let mut cohort = test_cohort();

        assert!(cohort.report_death(4, 5.0));
        assert!(!cohort.report_death(4, 9.0));

        let fitness = cohort.generation().genomes().nth(4).unwrap().fitness();
        assert_eq!(fitness, 5.0);
        assert_eq!(cohort.alive_count(), 9);
    }

    #[test]
    #[should_panic]
    fn out_of_range_reports_panic() {
        let mut cohort = test_cohort();
        cohort.report_death(10, 1.0);
    }
}
