use crate::genomics::ActivationType;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for genome generation and inter-genome operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of inputs fed to decoded networks.
    pub input_count: NonZeroUsize,
    /// Number of outputs produced by decoded networks.
    pub output_count: NonZeroUsize,
    /// Neuron count of each hidden layer, in input-to-output order.
    /// Must be non-empty, with every width at least 1.
    pub hidden_layer_sizes: Vec<usize>,
    /// Activation assigned to every output neuron. Output activation
    /// genes are fixed: neither mutation nor crossover touches them.
    pub output_activation: ActivationType,
    /// Whether hidden neurons receive uniformly random activations on
    /// synthesis. If false, hidden neurons use `output_activation` too.
    pub heterogeneous_hidden_activation: bool,
    /// Proportion of a genome's weight genes rewritten by one
    /// mutation pass.
    pub weight_mutation_rate: f64,
    /// Proportion of a genome's mutable activation genes rewritten by
    /// one mutation pass. Non-positive values disable activation
    /// mutation entirely.
    pub activation_mutation_rate: f64,
    /// Number of single-point swaps applied per crossover. Even counts
    /// are raised by one, as an even number of swaps can cancel out.
    pub crossover_passes: usize,
    /// Whether crossover also recombines activation genes. If false,
    /// each child keeps its like-numbered parent's activations.
    pub cross_activations: bool,
}

impl GeneticConfig {
    /// Returns a zero-valued configuration. Useful as a base to
    /// set relevant fields on, mainly in tests.
    ///
    /// Note that `hidden_layer_sizes` is empty, which genome synthesis
    /// rejects, so at minimum that field must be overridden.
    pub fn zero() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::new(1).unwrap(),
            output_count: NonZeroUsize::new(1).unwrap(),
            hidden_layer_sizes: vec![],
            output_activation: ActivationType::BinaryStep,
            heterogeneous_hidden_activation: false,
            weight_mutation_rate: 0.0,
            activation_mutation_rate: 0.0,
            crossover_passes: 0,
            cross_activations: false,
        }
    }
}
