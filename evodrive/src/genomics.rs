//! Genomes are the unit of evolution: a fixed feed-forward topology
//! (the genome's *shape*) plus the flat weight and activation gene
//! sequences that parameterize it.
//!
//! Genomes are immutable once built. Every operator ([`Dna::random`],
//! [`Dna::crossover`], [`Dna::mutated`], [`Dna::elite_clone`]) returns
//! fresh genomes carrying a new process-unique id, a [`Heritage`] tag
//! recording how they came to exist, and the ids of their parents.
//!
//! Genome equality and hashing consider genes only (shape, weights,
//! activations): two genomes with identical genes are equal even if
//! their ids, fitness, or heritage differ. Use [`Dna::same_instance`]
//! to compare identities instead.
mod activation;
mod config;
mod errors;

pub use activation::ActivationType;
pub use config::GeneticConfig;
pub use errors::ShapeMismatchError;

use crate::DnaId;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fitness assigned to every freshly built genome. Positive, so a
/// never-evaluated pool is still selectable by fitness-weighted draw.
pub const DEFAULT_FITNESS: f64 = 1.0;

/// Chance that a mutated weight gene is replaced outright instead of
/// rescaled.
const WEIGHT_SCRAMBLE_CHANCE: f64 = 0.25;

static NEXT_DNA_ID: AtomicU64 = AtomicU64::new(0);

fn next_dna_id() -> DnaId {
    NEXT_DNA_ID.fetch_add(1, Ordering::Relaxed)
}

/// How a genome came to exist. Purely diagnostic: heritage never
/// affects genome equality or any operator's behaviour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Heritage {
    /// Synthesized from scratch.
    New,
    /// Verbatim copy of a previous-generation genome.
    Elite,
    /// Produced by crossover.
    Offspring,
    /// Produced by crossover and then mutated.
    MutatedOffspring,
    /// Mutated copy of a previous-generation genome.
    MutatedElite,
}

/// A complete genome: the genotypical representation of one
/// feed-forward network controller.
///
/// The weight sequence is grouped per neuron, in layer order: each
/// neuron of layer `i` contributes `shape[i - 1] + 1` consecutive
/// genes, the first being its bias. The activation sequence holds one
/// gene per non-input neuron, and its final `shape.last()` entries
/// always equal the configured output activation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dna {
    shape: Vec<usize>,
    weights: Vec<f64>,
    activations: Vec<ActivationType>,
    fitness: f64,
    heritage: Heritage,
    #[serde(skip, default = "next_dna_id")]
    id: DnaId,
    #[serde(skip)]
    parents: Vec<DnaId>,
}

impl Dna {
    /// Synthesizes a random genome for the topology described by
    /// `config`: weights uniform in `[-1, 1]`, hidden activations
    /// uniformly random if `heterogeneous_hidden_activation` is set and
    /// `output_activation` otherwise, output activations always
    /// `output_activation`.
    ///
    /// # Panics
    /// Panics if `config.hidden_layer_sizes` is empty or contains a
    /// zero width.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::{Dna, GeneticConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     hidden_layer_sizes: vec![4],
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let dna = Dna::random(&config);
    /// assert_eq!(dna.shape(), &[3, 4, 2]);
    /// // 4 × (3 + 1) hidden genes plus 2 × (4 + 1) output genes.
    /// assert_eq!(dna.weights().len(), 26);
    /// assert_eq!(dna.activations().len(), 6);
    /// ```
    pub fn random(config: &GeneticConfig) -> Dna {
        assert!(
            !config.hidden_layer_sizes.is_empty(),
            "genome synthesis requires at least one hidden layer"
        );
        assert!(
            config.hidden_layer_sizes.iter().all(|&width| width >= 1),
            "genome synthesis requires hidden layers of width at least 1"
        );

        let shape: Vec<usize> = std::iter::once(config.input_count.get())
            .chain(config.hidden_layer_sizes.iter().copied())
            .chain(std::iter::once(config.output_count.get()))
            .collect();

        let output_count = config.output_count.get();
        let hidden_neuron_count = neuron_count_of(&shape) - output_count;

        let mut rng = rand::thread_rng();
        let weights = (0..weight_count_of(&shape))
            .map(|_| rng.gen_range(-1.0..=1.0))
            .collect();
        let activations = (0..hidden_neuron_count)
            .map(|_| {
                if config.heterogeneous_hidden_activation {
                    ActivationType::random(&mut rng)
                } else {
                    config.output_activation
                }
            })
            .chain(std::iter::repeat(config.output_activation).take(output_count))
            .collect();

        Dna {
            shape,
            weights,
            activations,
            fitness: DEFAULT_FITNESS,
            heritage: Heritage::New,
            id: next_dna_id(),
            parents: vec![],
        }
    }

    /// Builds a genome directly from its gene sequences, tagged
    /// [`Heritage::New`]. Mainly useful for loading externally stored
    /// genomes and for constructing exact networks.
    ///
    /// # Panics
    /// Panics if the shape has fewer than two layers, contains a zero
    /// width, or if the gene sequence lengths don't match the shape.
    pub fn from_parts(
        shape: Vec<usize>,
        weights: Vec<f64>,
        activations: Vec<ActivationType>,
    ) -> Dna {
        assert!(shape.len() >= 2, "genome shape requires at least two layers");
        assert!(
            shape.iter().all(|&width| width >= 1),
            "genome shape requires layers of width at least 1"
        );
        assert_eq!(
            weights.len(),
            weight_count_of(&shape),
            "weight gene count doesn't match genome shape"
        );
        assert_eq!(
            activations.len(),
            neuron_count_of(&shape),
            "activation gene count doesn't match genome shape"
        );

        Dna {
            shape,
            weights,
            activations,
            fitness: DEFAULT_FITNESS,
            heritage: Heritage::New,
            id: next_dna_id(),
            parents: vec![],
        }
    }

    /// Recombines two genomes by repeated single-point crossover,
    /// returning two children tagged [`Heritage::Offspring`] with both
    /// parents recorded in their lineage.
    ///
    /// `passes` single-point swaps are applied at independently chosen
    /// split points; even pass counts are raised by one, as an even
    /// number of swaps can reproduce the parents verbatim. Activation
    /// genes are recombined the same way when `cross_activations` is
    /// set, and inherited whole from the like-numbered parent
    /// otherwise.
    ///
    /// Returns `Err` if the parents' shapes differ.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::{Dna, GeneticConfig, Heritage};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     hidden_layer_sizes: vec![3],
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let parent1 = Dna::random(&config);
    /// let parent2 = Dna::random(&config);
    /// let (child1, child2) = Dna::crossover(&parent1, &parent2, 1, false).unwrap();
    /// assert_eq!(child1.heritage(), Heritage::Offspring);
    /// assert_eq!(child2.shape(), parent1.shape());
    /// ```
    pub fn crossover(
        parent1: &Dna,
        parent2: &Dna,
        passes: usize,
        cross_activations: bool,
    ) -> Result<(Dna, Dna), ShapeMismatchError> {
        if parent1.shape != parent2.shape {
            return Err(ShapeMismatchError::new(
                parent1.shape.clone(),
                parent2.shape.clone(),
            ));
        }

        let (weights1, weights2) =
            single_point_crossover(&parent1.weights, &parent2.weights, passes);
        let (activations1, activations2) = if cross_activations {
            single_point_crossover(&parent1.activations, &parent2.activations, passes)
        } else {
            (parent1.activations.clone(), parent2.activations.clone())
        };

        let parents = vec![parent1.id, parent2.id];
        let child1 = Dna {
            shape: parent1.shape.clone(),
            weights: weights1,
            activations: activations1,
            fitness: DEFAULT_FITNESS,
            heritage: Heritage::Offspring,
            id: next_dna_id(),
            parents: parents.clone(),
        };
        let child2 = Dna {
            shape: parent1.shape.clone(),
            weights: weights2,
            activations: activations2,
            fitness: DEFAULT_FITNESS,
            heritage: Heritage::Offspring,
            id: next_dna_id(),
            parents,
        };
        Ok((child1, child2))
    }

    /// Returns a mutated copy of the genome, tagged `heritage`, with
    /// the parent recorded in its lineage.
    ///
    /// `ceil(weight_rate × weight count)` distinct weight genes are
    /// rewritten, at least one. Each selected gene draws `r ∈ [0, 1)`:
    /// with `r < 0.25` the gene is replaced by `r × 8 − 1`, otherwise
    /// it is scaled by `0.5 + r` (between -50% and +50%). If the pass
    /// happens to leave every weight bit-identical, one gene is
    /// re-randomized so mutation is always observable.
    ///
    /// `ceil(activation_rate × mutable count)` hidden activation genes
    /// are replaced with uniformly random activations; the trailing
    /// output activation genes are never touched. A non-positive
    /// `activation_rate` disables activation mutation.
    ///
    /// A non-positive `weight_rate` skips the pass entirely and
    /// returns an unmutated copy carrying the requested tag.
    pub fn mutated(&self, heritage: Heritage, weight_rate: f64, activation_rate: f64) -> Dna {
        if weight_rate <= 0.0 {
            return self.reissued(heritage);
        }

        let mut rng = rand::thread_rng();

        let mut weights = self.weights.clone();
        let count = ((weight_rate * weights.len() as f64).ceil() as usize).clamp(1, weights.len());
        for i in rand::seq::index::sample(&mut rng, weights.len(), count).iter() {
            let r = rng.gen::<f64>();
            if r < WEIGHT_SCRAMBLE_CHANCE {
                weights[i] = r * 8.0 - 1.0;
            } else {
                weights[i] *= 0.5 + r;
            }
        }
        if weights == self.weights {
            // Scaling a zero weight is invisible. Mutation must produce
            // an observably different genome.
            let i = rng.gen_range(0..weights.len());
            weights[i] = rng.gen_range(-1.0..=1.0);
        }

        let mut activations = self.activations.clone();
        if activation_rate > 0.0 {
            let mutable = activations.len() - self.output_count();
            if mutable > 0 {
                let count =
                    ((activation_rate * mutable as f64).ceil() as usize).clamp(1, mutable);
                for i in rand::seq::index::sample(&mut rng, mutable, count).iter() {
                    activations[i] = ActivationType::random(&mut rng);
                }
            }
        }

        Dna {
            shape: self.shape.clone(),
            weights,
            activations,
            fitness: DEFAULT_FITNESS,
            heritage,
            id: next_dna_id(),
            parents: vec![self.id],
        }
    }

    /// Returns an exact gene-level copy of the genome, tagged
    /// [`Heritage::Elite`], with a fresh id, default fitness, and the
    /// original recorded as its parent.
    pub fn elite_clone(&self) -> Dna {
        self.reissued(Heritage::Elite)
    }

    /// Gene-level copy with a fresh id and the given tag.
    pub(crate) fn reissued(&self, heritage: Heritage) -> Dna {
        Dna {
            shape: self.shape.clone(),
            weights: self.weights.clone(),
            activations: self.activations.clone(),
            fitness: DEFAULT_FITNESS,
            heritage,
            id: next_dna_id(),
            parents: vec![self.id],
        }
    }

    /// Compares the weight genes of two same-shaped genomes, returning
    /// the fraction of weights that differ and the summed absolute
    /// difference as a proportion of `first`'s total absolute weight.
    ///
    /// # Panics
    /// Panics if the genomes' shapes differ.
    pub fn compare_weights(first: &Dna, second: &Dna) -> (f64, f64) {
        assert_eq!(
            first.shape, second.shape,
            "can't compare weights of genomes with different shapes"
        );

        let differing = first
            .weights
            .iter()
            .zip(&second.weights)
            .filter(|(a, b)| a != b)
            .count();
        let absolute_difference: f64 = first
            .weights
            .iter()
            .zip(&second.weights)
            .map(|(a, b)| (a - b).abs())
            .sum();
        let total: f64 = first.weights.iter().map(|w| w.abs()).sum();

        (
            differing as f64 / first.weights.len() as f64,
            absolute_difference / total,
        )
    }

    /// Returns the genome's process-unique id.
    pub fn id(&self) -> DnaId {
        self.id
    }

    /// Whether `self` and `other` are the same genome instance, as
    /// opposed to gene-level equality.
    pub fn same_instance(&self, other: &Dna) -> bool {
        self.id == other.id
    }

    /// Returns the genome's layer widths, inputs first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the genome's weight genes, grouped per neuron with the
    /// bias gene leading each group.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the genome's activation genes, one per non-input
    /// neuron.
    pub fn activations(&self) -> &[ActivationType] {
        &self.activations
    }

    /// Returns the genome's input layer width.
    pub fn input_count(&self) -> usize {
        self.shape[0]
    }

    /// Returns the genome's output layer width.
    pub fn output_count(&self) -> usize {
        *self.shape.last().unwrap()
    }

    /// Returns the genome's current fitness.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Sets the genome's fitness.
    ///
    /// # Panics
    /// Panics if the fitness is negative or not a number.
    pub fn set_fitness(&mut self, fitness: f64) {
        assert!(fitness >= 0.0, "invalid fitness value: {}", fitness);
        self.fitness = fitness;
    }

    /// Returns the genome's heritage tag.
    pub fn heritage(&self) -> Heritage {
        self.heritage
    }

    /// Returns the ids of the genomes this one was derived from.
    /// Empty for synthesized and deserialized genomes.
    pub fn parents(&self) -> &[DnaId] {
        &self.parents
    }
}

impl PartialEq for Dna {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.activations == other.activations
            && self.weights == other.weights
    }
}

// Operators only ever emit weights drawn from bounded uniform ranges
// or finite scalings thereof, never NaN.
impl Eq for Dna {}

impl Hash for Dna {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
        self.activations.hash(state);
        for weight in &self.weights {
            weight.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dna")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("heritage", &self.heritage)
            .field("fitness", &self.fitness)
            .finish()
    }
}

/// Sum of per-neuron gene-group sizes over all non-input layers.
fn weight_count_of(shape: &[usize]) -> usize {
    shape
        .windows(2)
        .map(|pair| pair[1] * (pair[0] + 1))
        .sum()
}

/// Number of non-input neurons.
fn neuron_count_of(shape: &[usize]) -> usize {
    shape.iter().skip(1).sum()
}

/// Applies `passes` single-point swaps to copies of the two sequences.
/// Even pass counts are raised by one.
fn single_point_crossover<T: Clone>(first: &[T], second: &[T], passes: usize) -> (Vec<T>, Vec<T>) {
    if first.len() == 1 {
        warn!("single-gene sequence can't be split, swapping whole sequences");
        return (second.to_vec(), first.to_vec());
    }

    let passes = if passes % 2 == 0 { passes + 1 } else { passes };
    let mut rng = rand::thread_rng();
    let mut first = first.to_vec();
    let mut second = second.to_vec();
    for _ in 0..passes {
        let split = rng.gen_range(1..first.len());
        for i in split..first.len() {
            std::mem::swap(&mut first[i], &mut second[i]);
        }
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::hash_map::DefaultHasher;

    fn test_config() -> GeneticConfig {
        GeneticConfig {
            input_count: std::num::NonZeroUsize::new(5).unwrap(),
            output_count: std::num::NonZeroUsize::new(3).unwrap(),
            hidden_layer_sizes: vec![4, 3, 6],
            output_activation: ActivationType::TanH,
            heterogeneous_hidden_activation: true,
            weight_mutation_rate: 0.2,
            activation_mutation_rate: 0.0,
            crossover_passes: 3,
            cross_activations: false,
        }
    }

    fn hash_of(dna: &Dna) -> u64 {
        let mut hasher = DefaultHasher::new();
        dna.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn random_genomes_have_the_configured_dimensions() {
        let dna = Dna::random(&test_config());

        assert_eq!(dna.shape(), &[5, 4, 3, 6, 3]);
        // 4×6 + 3×5 + 6×4 + 3×7
        assert_eq!(dna.weights().len(), 84);
        assert_eq!(dna.activations().len(), 16);
        assert!(dna.weights().iter().all(|w| (-1.0..=1.0).contains(w)));
        assert_eq!(dna.heritage(), Heritage::New);
        assert_eq!(dna.fitness(), DEFAULT_FITNESS);
        assert!(dna.parents().is_empty());
    }

    #[test]
    fn random_genomes_pin_output_activations() {
        let dna = Dna::random(&test_config());
        assert!(dna.activations()[13..]
            .iter()
            .all(|a| *a == ActivationType::TanH));
    }

    #[test]
    fn homogeneous_synthesis_uses_the_output_activation_everywhere() {
        let config = GeneticConfig {
            heterogeneous_hidden_activation: false,
            ..test_config()
        };
        let dna = Dna::random(&config);
        assert!(dna.activations().iter().all(|a| *a == ActivationType::TanH));
    }

    #[test]
    #[should_panic]
    fn synthesis_without_hidden_layers_panics() {
        Dna::random(&GeneticConfig::zero());
    }

    #[test]
    #[should_panic]
    fn synthesis_with_a_zero_width_layer_panics() {
        let config = GeneticConfig {
            hidden_layer_sizes: vec![4, 0, 6],
            ..test_config()
        };
        Dna::random(&config);
    }

    #[test]
    fn random_genomes_have_distinct_ids() {
        let config = test_config();
        let first = Dna::random(&config);
        let second = Dna::random(&config);
        assert_ne!(first.id(), second.id());
        assert!(!first.same_instance(&second));
    }

    #[test]
    fn crossover_conserves_weight_mass() {
        let config = test_config();
        let parent1 = Dna::random(&config);
        let parent2 = Dna::random(&config);

        let (child1, child2) = Dna::crossover(&parent1, &parent2, 3, true).unwrap();

        let parent_mass: f64 =
            parent1.weights().iter().sum::<f64>() + parent2.weights().iter().sum::<f64>();
        let child_mass: f64 =
            child1.weights().iter().sum::<f64>() + child2.weights().iter().sum::<f64>();
        assert!((parent_mass - child_mass).abs() < 1e-9);

        let parent_activation_mass: usize = parent1
            .activations()
            .iter()
            .chain(parent2.activations())
            .map(|a| a.index())
            .sum();
        let child_activation_mass: usize = child1
            .activations()
            .iter()
            .chain(child2.activations())
            .map(|a| a.index())
            .sum();
        assert_eq!(parent_activation_mass, child_activation_mass);
    }

    #[test]
    fn crossover_changes_both_children() {
        let config = test_config();
        let parent1 = Dna::random(&config);
        let parent2 = Dna::random(&config);

        let (child1, child2) = Dna::crossover(&parent1, &parent2, 3, false).unwrap();

        assert_ne!(child1, parent1);
        assert_ne!(child1, parent2);
        assert_ne!(child2, parent1);
        assert_ne!(child2, parent2);
        assert_ne!(child1, child2);
    }

    #[test]
    fn crossover_without_activation_recombination_keeps_parental_activations() {
        let config = test_config();
        let parent1 = Dna::random(&config);
        let parent2 = Dna::random(&config);

        let (child1, child2) = Dna::crossover(&parent1, &parent2, 1, false).unwrap();

        assert_eq!(child1.activations(), parent1.activations());
        assert_eq!(child2.activations(), parent2.activations());
    }

    #[test]
    fn crossover_records_lineage() {
        let config = test_config();
        let parent1 = Dna::random(&config);
        let parent2 = Dna::random(&config);

        let (child1, child2) = Dna::crossover(&parent1, &parent2, 1, false).unwrap();

        assert_eq!(child1.parents(), &[parent1.id(), parent2.id()]);
        assert_eq!(child2.parents(), &[parent1.id(), parent2.id()]);
        assert_eq!(child1.heritage(), Heritage::Offspring);
        assert_eq!(child2.heritage(), Heritage::Offspring);
        assert_ne!(child1.id(), child2.id());
    }

    #[test]
    fn crossover_of_mismatched_shapes_is_an_error() {
        let parent1 = Dna::random(&test_config());
        let parent2 = Dna::random(&GeneticConfig {
            hidden_layer_sizes: vec![4, 3],
            ..test_config()
        });

        assert!(Dna::crossover(&parent1, &parent2, 1, false).is_err());
    }

    #[test]
    fn mutation_rewrites_the_expected_number_of_weights() {
        let dna = Dna::random(&test_config());
        let mutated = dna.mutated(Heritage::MutatedElite, 0.2, 0.0);

        let changed = dna
            .weights()
            .iter()
            .zip(mutated.weights())
            .filter(|(a, b)| a != b)
            .count();
        // ceil(0.2 × 84)
        assert_eq!(changed, 17);
        assert_eq!(mutated.heritage(), Heritage::MutatedElite);
        assert_eq!(mutated.parents(), &[dna.id()]);
    }

    #[test]
    fn tiny_mutation_rates_still_change_at_least_one_weight() {
        let dna = Dna::random(&test_config());
        let mutated = dna.mutated(Heritage::MutatedOffspring, 1e-9, 0.0);

        let changed = dna
            .weights()
            .iter()
            .zip(mutated.weights())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn mutation_never_touches_output_activations() {
        let config = GeneticConfig {
            hidden_layer_sizes: vec![40],
            ..test_config()
        };
        let dna = Dna::random(&config);
        let mutated = dna.mutated(Heritage::MutatedElite, 0.2, 0.8);

        assert_eq!(&mutated.activations()[40..], &dna.activations()[40..]);
        assert_ne!(&mutated.activations()[..40], &dna.activations()[..40]);
    }

    #[test]
    fn non_positive_weight_rate_returns_an_unmutated_copy() {
        let dna = Dna::random(&test_config());
        let copy = dna.mutated(Heritage::MutatedOffspring, 0.0, 0.5);

        assert_eq!(copy, dna);
        assert_eq!(copy.heritage(), Heritage::MutatedOffspring);
        assert_ne!(copy.id(), dna.id());
    }

    #[test]
    fn elite_clones_are_gene_equal_but_distinct_instances() {
        let mut dna = Dna::random(&test_config());
        dna.set_fitness(42.0);
        let clone = dna.elite_clone();

        assert_eq!(clone, dna);
        assert_eq!(clone.heritage(), Heritage::Elite);
        assert_eq!(clone.fitness(), DEFAULT_FITNESS);
        assert_eq!(clone.parents(), &[dna.id()]);
        assert!(!clone.same_instance(&dna));
    }

    #[test]
    fn equality_and_hashing_ignore_identity_and_fitness() {
        let dna = Dna::random(&test_config());
        let mut clone = dna.elite_clone();
        clone.set_fitness(99.0);

        assert_eq!(clone, dna);
        assert_eq!(hash_of(&clone), hash_of(&dna));
    }

    #[test]
    fn equality_detects_a_single_weight_change() {
        let dna = Dna::random(&test_config());
        let mut changed = dna.clone();
        changed.weights[17] += 0.5;

        assert_ne!(changed, dna);
        assert_ne!(hash_of(&changed), hash_of(&dna));
    }

    #[test]
    #[should_panic]
    fn negative_fitness_is_rejected() {
        let mut dna = Dna::random(&test_config());
        dna.set_fitness(-1.0);
    }

    #[test]
    fn compare_weights_on_identical_genomes_is_zero() {
        let dna = Dna::random(&test_config());
        assert_eq!(Dna::compare_weights(&dna, &dna.elite_clone()), (0.0, 0.0));
    }

    #[test]
    fn compare_weights_reports_fraction_and_magnitude() {
        let shape = vec![1, 99, 1];
        // 99 × 2 + 1 × 100
        let weights = vec![1.0; 298];
        let activations = vec![ActivationType::Relu; 100];
        let first = Dna::from_parts(shape.clone(), weights.clone(), activations.clone());

        let mut second_weights = weights;
        second_weights[0] = -148.0;
        let second = Dna::from_parts(shape, second_weights, activations);

        let (fraction, magnitude) = Dna::compare_weights(&first, &second);
        assert!((fraction - 1.0 / 298.0).abs() < 1e-12);
        assert!((magnitude - 0.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn compare_weights_of_mismatched_shapes_panics() {
        let first = Dna::random(&test_config());
        let second = Dna::random(&GeneticConfig {
            hidden_layer_sizes: vec![4],
            ..test_config()
        });
        Dna::compare_weights(&first, &second);
    }

    #[test]
    fn serde_round_trip_preserves_genes_and_reissues_the_id() {
        let mut dna = Dna::random(&test_config());
        dna.set_fitness(7.5);

        let serialized = serde_json::to_string(&dna).unwrap();
        let deserialized: Dna = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, dna);
        assert_eq!(deserialized.fitness(), 7.5);
        assert_eq!(deserialized.heritage(), dna.heritage());
        assert_ne!(deserialized.id(), dna.id());
        assert!(deserialized.parents().is_empty());
    }

    #[test]
    fn single_gene_crossover_swaps_whole_sequences() {
        let (first, second) = single_point_crossover(&[1.0], &[2.0], 5);
        assert_eq!(first, vec![2.0]);
        assert_eq!(second, vec![1.0]);
    }
}
