//! An implementation of fixed-topology neuroevolution for populations
//! of feed-forward network controllers.
//!
//! Evolution proceeds in discrete generations of equal size. Every
//! genome shares one network topology, so the evolutionary operators
//! work on flat gene sequences: fitness-proportionate parent
//! selection, repeated single-point crossover, and proportional
//! weight mutation. Scored generations are replaced wholesale by a
//! mix of elite copies, mutated elites, offspring pairs, and fresh
//! random genomes.
//!
//! The expected workflow is:
//! * Create a [`GeneticConfig`](genomics::GeneticConfig) describing
//!   the shared topology and operator severities, and a
//!   [`PopulationConfig`](populations::PopulationConfig) describing
//!   the generation makeup.
//! * Create a [`Cohort`](populations::Cohort), decode each genome
//!   into a [`Network`](networks::Network), and run the simulation,
//!   reporting each agent's death and final fitness.
//! * [`advance`](populations::Cohort::advance) the cohort and repeat.
//!
//! # Examples
//! ```
//! use evodrive::genomics::{ActivationType, GeneticConfig};
//! use evodrive::networks::Network;
//! use evodrive::populations::{Cohort, PopulationConfig};
//! use std::num::NonZeroUsize;
//!
//! let genetic = GeneticConfig {
//!     input_count: NonZeroUsize::new(3).unwrap(),
//!     output_count: NonZeroUsize::new(2).unwrap(),
//!     hidden_layer_sizes: vec![4, 4],
//!     output_activation: ActivationType::TanH,
//!     heterogeneous_hidden_activation: true,
//!     weight_mutation_rate: 0.05,
//!     activation_mutation_rate: 0.01,
//!     crossover_passes: 3,
//!     cross_activations: false,
//! };
//! let config = PopulationConfig {
//!     size: NonZeroUsize::new(20).unwrap(),
//!     new_rate: 0.05,
//!     elite_rate: 0.05,
//!     mutated_elite_rate: 0.2,
//!     offspring_mutation_chance: 0.5,
//!     breeding_pool_fraction: 0.2,
//!     crossover_retries: 5,
//! };
//!
//! let mut cohort = Cohort::new(genetic, config);
//! for _ in 0..5 {
//!     let fitnesses: Vec<f64> = cohort
//!         .generation()
//!         .genomes()
//!         .map(|dna| {
//!             let network = Network::from(dna);
//!             // A real simulation would run the agent to its death
//!             // here instead of scoring one evaluation.
//!             1.0 + network.evaluate(&[0.1, 0.5, 0.9])[0].abs()
//!         })
//!         .collect();
//!     for (agent, fitness) in fitnesses.into_iter().enumerate() {
//!         cohort.report_death(agent, fitness);
//!     }
//!     cohort.advance().unwrap();
//! }
//!
//! assert_eq!(cohort.generation().number(), 5);
//! ```
pub mod genomics;
pub mod networks;
pub mod populations;

/// A process-unique genome identifier.
///
/// Ids identify genome instances, never genes: gene-equal genomes
/// with different ids compare equal, and a genome deserialized from
/// storage receives a fresh id.
pub type DnaId = u64;
