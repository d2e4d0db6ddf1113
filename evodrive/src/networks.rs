//! Decoded phenotypes: evaluable feed-forward networks built from
//! genomes.
//!
//! Decoding partitions the genome's flat weight sequence into
//! per-neuron groups following its shape, and pairs each group with
//! the matching activation gene. Evaluation is pure: a network holds
//! no activation state between calls.
use crate::genomics::{ActivationType, Dna};

/// A single decoded neuron: bias, one weight per neuron of the
/// previous layer, and an activation function.
#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    bias: f64,
    weights: Vec<f64>,
    activation: ActivationType,
}

impl Neuron {
    /// Weighted sum of the inputs plus bias, passed through the
    /// neuron's activation.
    fn compute(&self, inputs: &[f64]) -> f64 {
        let sum: f64 = self
            .weights
            .iter()
            .zip(inputs)
            .map(|(weight, input)| weight * input)
            .sum();
        self.activation.apply(self.bias + sum)
    }
}

/// A feed-forward network decoded from a genome.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    shape: Vec<usize>,
    layers: Vec<Vec<Neuron>>,
}

impl From<&Dna> for Network {
    fn from(dna: &Dna) -> Network {
        let shape = dna.shape().to_vec();
        let mut weights = dna.weights().iter().copied();
        let mut activations = dna.activations().iter().copied();

        let mut layers = Vec::with_capacity(shape.len() - 1);
        for layer in 1..shape.len() {
            let incoming = shape[layer - 1];
            let mut neurons = Vec::with_capacity(shape[layer]);
            for _ in 0..shape[layer] {
                // Genome invariants guarantee both sequences are
                // exactly long enough for the shape.
                let bias = weights.next().unwrap();
                let incoming_weights = weights.by_ref().take(incoming).collect();
                let activation = activations.next().unwrap();
                neurons.push(Neuron {
                    bias,
                    weights: incoming_weights,
                    activation,
                });
            }
            layers.push(neurons);
        }

        Network { shape, layers }
    }
}

impl Network {
    /// Feeds `inputs` through the network and returns the output
    /// layer's values.
    ///
    /// # Panics
    /// Panics if `inputs.len()` doesn't match the network's input
    /// layer width.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::{Dna, GeneticConfig};
    /// use evodrive::networks::Network;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     hidden_layer_sizes: vec![4],
    ///     ..GeneticConfig::zero()
    /// };
    /// let network = Network::from(&Dna::random(&config));
    ///
    /// assert_eq!(network.evaluate(&[0.0, 0.5, 1.0]).len(), 2);
    /// ```
    pub fn evaluate(&self, inputs: &[f64]) -> Vec<f64> {
        assert_eq!(
            inputs.len(),
            self.shape[0],
            "network evaluated with {} inputs, expected {}",
            inputs.len(),
            self.shape[0]
        );

        let mut signal = inputs.to_vec();
        for layer in &self.layers {
            signal = layer.iter().map(|neuron| neuron.compute(&signal)).collect();
        }
        signal
    }

    /// Returns the network's input layer width.
    pub fn input_count(&self) -> usize {
        self.shape[0]
    }

    /// Returns the network's output layer width.
    pub fn output_count(&self) -> usize {
        *self.shape.last().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shape [2, 1, 2]: one hidden neuron (bias 0.5, weights [1, -1]),
    // two output neurons (bias 0, weight 2) and (bias 1, weight -0.5).
    fn test_dna(activation: ActivationType) -> Dna {
        Dna::from_parts(
            vec![2, 1, 2],
            vec![0.5, 1.0, -1.0, 0.0, 2.0, 1.0, -0.5],
            vec![activation; 3],
        )
    }

    #[test]
    fn decoding_partitions_weights_per_neuron() {
        let network = Network::from(&test_dna(ActivationType::Relu));

        assert_eq!(network.layers.len(), 2);
        assert_eq!(
            network.layers[0],
            vec![Neuron {
                bias: 0.5,
                weights: vec![1.0, -1.0],
                activation: ActivationType::Relu,
            }]
        );
        assert_eq!(
            network.layers[1],
            vec![
                Neuron {
                    bias: 0.0,
                    weights: vec![2.0],
                    activation: ActivationType::Relu,
                },
                Neuron {
                    bias: 1.0,
                    weights: vec![-0.5],
                    activation: ActivationType::Relu,
                },
            ]
        );
        assert_eq!(network.input_count(), 2);
        assert_eq!(network.output_count(), 2);
    }

    #[test]
    fn evaluation_matches_hand_computed_binary_step() {
        let network = Network::from(&test_dna(ActivationType::BinaryStep));

        // Hidden: step(0.5 + 1×1 + (-1)×2) = step(-0.5) = 0.
        // Outputs: step(0 + 2×0) = 0, step(1 + (-0.5)×0) = 1.
        assert_eq!(network.evaluate(&[1.0, 2.0]), vec![0.0, 1.0]);

        // Hidden: step(0.5 + 1×1 + (-1)×0) = 1.
        // Outputs: step(0 + 2×1) = 1, step(1 + (-0.5)×1) = 1.
        assert_eq!(network.evaluate(&[1.0, 0.0]), vec![1.0, 1.0]);
    }

    #[test]
    fn evaluation_matches_hand_computed_tanh() {
        let network = Network::from(&test_dna(ActivationType::TanH));

        let hidden = (0.5 + 1.0 * 0.25 + -1.0 * -0.75_f64).tanh();
        let expected = vec![(2.0 * hidden).tanh(), (1.0 + -0.5 * hidden).tanh()];
        assert_eq!(network.evaluate(&[0.25, -0.75]), expected);
    }

    #[test]
    fn evaluation_is_pure() {
        let network = Network::from(&test_dna(ActivationType::Sigmoid));
        let first = network.evaluate(&[0.3, 0.6]);
        network.evaluate(&[-5.0, 5.0]);
        assert_eq!(network.evaluate(&[0.3, 0.6]), first);
    }

    #[test]
    #[should_panic]
    fn evaluation_with_the_wrong_input_count_panics() {
        let network = Network::from(&test_dna(ActivationType::Relu));
        network.evaluate(&[1.0, 2.0, 3.0]);
    }
}
