//! Generations are fixed-size pools of genomes bred from one another
//! in discrete steps.
//!
//! Each generation after the first is assembled from its scored
//! predecessor out of four ingredient quotas: fresh random genomes,
//! verbatim elite copies of the previous best, mutated copies of
//! fitness-selected breeding-pool members, and crossover offspring
//! pairs (a configured share of which is mutated after recombination).
//! Would-be duplicate genomes are replaced with mutated copies on
//! admission, so a generation never contains two gene-equal genomes.
//!
//! [`Cohort`] wraps this cycle behind a scoring barrier for
//! simulations that score agents by reporting their deaths.
mod cohort;
mod config;
mod errors;
mod log;

pub use cohort::Cohort;
pub use config::PopulationConfig;
pub use errors::EvolutionError;
pub use log::{
    EvolutionLogger, GenerationLog, GenerationMemberRecord, GenerationStats, ReportingLevel,
};

use crate::genomics::{Dna, GeneticConfig, Heritage};
use crate::DnaId;

use ahash::RandomState;
use rand::prelude::{Rng, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use std::collections::HashMap;

/// Selects a genome from `pool` with probability proportional to its
/// share of the candidates' total fitness, excluding at most one
/// genome instance from candidacy.
///
/// A pool whose candidates all have zero fitness degrades to a
/// uniformly random pick, logged as a diagnostic.
///
/// # Panics
/// Panics if the candidate pool is empty.
pub fn select_fitness_weighted<'a>(pool: &[&'a Dna], excluding: Option<&Dna>) -> &'a Dna {
    let candidates: Vec<&Dna> = match excluding {
        Some(excluded) => pool
            .iter()
            .filter(|dna| !dna.same_instance(excluded))
            .copied()
            .collect(),
        None => pool.to_vec(),
    };
    assert!(
        !candidates.is_empty(),
        "fitness-weighted selection from an empty candidate pool"
    );

    let total: f64 = candidates.iter().map(|dna| dna.fitness()).sum();
    let dice = rand::thread_rng().gen::<f64>();
    let mut cumulative = 0.0;
    for candidate in candidates.iter().copied() {
        cumulative += candidate.fitness() / total;
        if dice < cumulative {
            return candidate;
        }
    }

    // Reached when the total fitness is zero or accumulated float
    // error leaves the walk short of 1.0.
    warn!("fitness-weighted walk was inconclusive, falling back to a uniform pick");
    candidates.choose(&mut rand::thread_rng()).copied().unwrap()
}

/// A fixed-size pool of genomes evolved as one cohort.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Generation {
    number: usize,
    pool: Vec<Dna>,
    composition: HashMap<Heritage, usize, RandomState>,
    #[serde(skip)]
    selected_for_breeding: Vec<DnaId>,
}

impl Generation {
    fn empty(number: usize, capacity: usize) -> Generation {
        Generation {
            number,
            pool: Vec::with_capacity(capacity),
            composition: HashMap::default(),
            selected_for_breeding: vec![],
        }
    }

    /// Creates generation 0: `config.size` randomly synthesized
    /// genomes.
    ///
    /// # Panics
    /// Panics if `genetic` describes a malformed topology.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::{GeneticConfig, Heritage};
    /// use evodrive::populations::{Generation, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let genetic = GeneticConfig {
    ///     hidden_layer_sizes: vec![3],
    ///     ..GeneticConfig::zero()
    /// };
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    ///
    /// let generation = Generation::seed(&genetic, &config);
    /// assert_eq!(generation.number(), 0);
    /// assert_eq!(generation.count_of(Heritage::New), 10);
    /// ```
    pub fn seed(genetic: &GeneticConfig, config: &PopulationConfig) -> Generation {
        let mut generation = Generation::empty(0, config.size.get());
        for _ in 0..config.size.get() {
            generation.admit(Dna::random(genetic), genetic);
        }
        generation
    }

    /// Assembles the successor of a scored generation.
    ///
    /// Quotas are rounded to the nearest whole genome: `new_rate` of
    /// the pool is synthesized from scratch, `elite_rate` copied
    /// verbatim from the previous best, and `mutated_elite_rate`
    /// (plus one if needed to make the remaining slot count even)
    /// bred by mutating genomes fitness-selected from the top
    /// `breeding_pool_fraction` of the previous pool. All remaining
    /// slots are filled in crossover offspring pairs; each pair is
    /// mutated after recombination with `offspring_mutation_chance`
    /// until the mutated-offspring quota is met, and unconditionally
    /// when crossover could not produce children distinct from their
    /// parents within `crossover_retries` attempts.
    ///
    /// # Panics
    /// Panics if the three quota proportions round to more genomes
    /// than the generation holds.
    pub fn from_previous(
        previous: &Generation,
        genetic: &GeneticConfig,
        config: &PopulationConfig,
    ) -> Generation {
        let size = config.size.get();
        let mut next = Generation::empty(previous.number + 1, size);

        let new_quota = quota(size, config.new_rate);
        for _ in 0..new_quota {
            next.admit(Dna::random(genetic), genetic);
        }

        let mut by_fitness: Vec<&Dna> = previous.pool.iter().collect();
        by_fitness.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .expect("genome fitness is never NaN")
        });

        let elite_quota = quota(size, config.elite_rate);
        for elite in by_fitness.iter().take(elite_quota) {
            next.admit(elite.elite_clone(), genetic);
        }

        let mut mutated_elite_quota = quota(size, config.mutated_elite_rate);
        assert!(
            new_quota + elite_quota + mutated_elite_quota <= size,
            "population quotas exceed the generation size"
        );
        // Offspring are bred in pairs, so the remaining slot count
        // must be even.
        if (size - (new_quota + elite_quota + mutated_elite_quota)) % 2 == 1 {
            mutated_elite_quota += 1;
        }

        let breeding_pool: Vec<&Dna> = by_fitness
            .iter()
            .take(quota(size, config.breeding_pool_fraction).max(1))
            .copied()
            .collect();
        for _ in 0..mutated_elite_quota {
            let source = select_fitness_weighted(&breeding_pool, None);
            next.admit(
                source.mutated(
                    Heritage::MutatedElite,
                    genetic.weight_mutation_rate,
                    genetic.activation_mutation_rate,
                ),
                genetic,
            );
        }

        let free_slots = size - (new_quota + elite_quota + mutated_elite_quota);
        let mutated_offspring_target = quota(free_slots, config.offspring_mutation_chance);
        let mut mutated_offspring = 0;
        let parent_pool: Vec<&Dna> = previous.pool.iter().collect();
        let mut rng = rand::thread_rng();
        for _ in 0..free_slots / 2 {
            let parent1 = select_fitness_weighted(&parent_pool, None);
            let parent2 = select_fitness_weighted(&parent_pool, Some(parent1));
            next.selected_for_breeding.push(parent1.id());
            next.selected_for_breeding.push(parent2.id());

            let (child1, child2, crossover_failed) =
                breed(parent1, parent2, genetic, config.crossover_retries);

            if crossover_failed
                || (mutated_offspring < mutated_offspring_target
                    && rng.gen::<f64>() < config.offspring_mutation_chance)
            {
                next.admit(
                    child1.mutated(
                        Heritage::MutatedOffspring,
                        genetic.weight_mutation_rate,
                        genetic.activation_mutation_rate,
                    ),
                    genetic,
                );
                next.admit(
                    child2.mutated(
                        Heritage::MutatedOffspring,
                        genetic.weight_mutation_rate,
                        genetic.activation_mutation_rate,
                    ),
                    genetic,
                );
                mutated_offspring += 2;
            } else {
                next.admit(child1, genetic);
                next.admit(child2, genetic);
            }
        }

        next
    }

    /// Admits a genome, replacing it with a same-tag mutated copy if
    /// a gene-equal genome is already pooled.
    fn admit(&mut self, dna: Dna, genetic: &GeneticConfig) {
        let admitted = if self.pool.contains(&dna) {
            debug!(id = dna.id(), "duplicate genome replaced with a mutated copy");
            dna.mutated(
                dna.heritage(),
                genetic.weight_mutation_rate,
                genetic.activation_mutation_rate,
            )
        } else {
            dna
        };
        *self.composition.entry(admitted.heritage()).or_insert(0) += 1;
        self.pool.push(admitted);
    }

    /// Returns the generation's sequence number, counted from 0.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the number of genomes in the generation.
    pub fn size(&self) -> usize {
        self.pool.len()
    }

    /// Iterates over the generation's genomes in admission order.
    pub fn genomes(&self) -> impl Iterator<Item = &Dna> {
        self.pool.iter()
    }

    /// Scores every genome with the given fitness function.
    pub fn evaluate_fitness(&mut self, mut evaluator: impl FnMut(&Dna) -> f64) {
        for dna in &mut self.pool {
            let fitness = evaluator(dna);
            dna.set_fitness(fitness);
        }
    }

    /// Sets the fitness of the genome at `index` (admission order).
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or the fitness is invalid.
    pub fn set_fitness(&mut self, index: usize, fitness: f64) {
        self.pool[index].set_fitness(fitness);
    }

    /// Returns the genome with the highest fitness.
    pub fn champion(&self) -> Option<&Dna> {
        self.pool.iter().max_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .expect("genome fitness is never NaN")
        })
    }

    /// Returns aggregate fitness statistics for the generation.
    pub fn performance(&self) -> GenerationStats {
        GenerationStats::from_fitnesses(self.pool.iter().map(|dna| dna.fitness()))
    }

    /// Returns the per-heritage tally of the generation's genomes.
    pub fn composition(&self) -> &HashMap<Heritage, usize, RandomState> {
        &self.composition
    }

    /// Returns the number of pooled genomes with the given heritage.
    pub fn count_of(&self, heritage: Heritage) -> usize {
        self.composition.get(&heritage).copied().unwrap_or(0)
    }

    /// Returns the ids of the previous-generation genomes selected as
    /// crossover parents while assembling this generation. Empty for
    /// generation 0 and deserialized generations.
    pub fn selected_for_breeding(&self) -> &[DnaId] {
        &self.selected_for_breeding
    }
}

/// Produces one offspring pair, retrying crossover until the children
/// are gene-distinct from both parents and from each other. The
/// returned flag demands mutation: it is set when every attempt came
/// out degenerate, or when the parents' shapes were incompatible and
/// plain copies were substituted.
fn breed(
    parent1: &Dna,
    parent2: &Dna,
    genetic: &GeneticConfig,
    retries: usize,
) -> (Dna, Dna, bool) {
    let mut last_pair = None;
    for _ in 0..retries.max(1) {
        match Dna::crossover(
            parent1,
            parent2,
            genetic.crossover_passes,
            genetic.cross_activations,
        ) {
            Ok((child1, child2)) => {
                let degenerate = child1 == *parent1
                    || child1 == *parent2
                    || child2 == *parent1
                    || child2 == *parent2
                    || child1 == child2;
                if !degenerate {
                    return (child1, child2, false);
                }
                last_pair = Some((child1, child2));
            }
            Err(error) => {
                warn!(%error, "crossover between incompatible parents, substituting copies");
                return (
                    parent1.reissued(Heritage::Offspring),
                    parent2.reissued(Heritage::Offspring),
                    true,
                );
            }
        }
    }

    warn!("crossover produced no distinct children, mutating the last pair");
    let (child1, child2) = last_pair.expect("at least one crossover attempt is made");
    (child1, child2, true)
}

/// Rounds `rate`'s share of `size` to the nearest whole genome.
fn quota(size: usize, rate: f64) -> usize {
    (size as f64 * rate).round() as usize
}
