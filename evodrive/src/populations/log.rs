use crate::genomics::{Dna, Heritage};
use crate::populations::Generation;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::fmt;

/// Aggregate fitness results of a generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub total_fitness: f64,
    pub best_fitness: f64,
    pub average_fitness: f64,
}

impl GenerationStats {
    /// Computes aggregate statistics over a sequence of fitness
    /// values. Zero-valued for an empty sequence.
    pub fn from_fitnesses(fitnesses: impl Iterator<Item = f64>) -> GenerationStats {
        let mut total = 0.0;
        let mut best = 0.0_f64;
        let mut count = 0_usize;
        for fitness in fitnesses {
            total += fitness;
            best = best.max(fitness);
            count += 1;
        }
        GenerationStats {
            total_fitness: total,
            best_fitness: best,
            average_fitness: if count == 0 { 0.0 } else { total / count as f64 },
        }
    }
}

/// Degree of per-genome detail captured by an [`EvolutionLogger`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReportingLevel {
    /// Snapshot every genome of each logged generation.
    AllGenomes,
    /// Snapshot only each logged generation's champion.
    Champion,
    /// Keep statistics and composition only.
    NoGenomes,
}

/// Per-genome detail stored in a [`GenerationLog`], according to the
/// logger's [`ReportingLevel`].
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord {
    All(Vec<Dna>),
    Champion(Dna),
    None,
}

/// Snapshot of one generation's results.
#[derive(Clone, Debug)]
pub struct GenerationLog {
    pub generation_number: usize,
    pub stats: GenerationStats,
    pub composition: HashMap<Heritage, usize, RandomState>,
    pub members: GenerationMemberRecord,
}

impl fmt::Display for GenerationLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "generation {}: total {:.3}, best {:.3}, average {:.3}",
            self.generation_number,
            self.stats.total_fitness,
            self.stats.best_fitness,
            self.stats.average_fitness
        )
    }
}

/// Records the evolutionary history of a population, one snapshot per
/// logged generation. Log generations after scoring and before
/// advancing, or the statistics reflect default fitness only.
#[derive(Clone, Debug)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<GenerationLog>,
}

impl EvolutionLogger {
    /// Returns a logger that captures per-genome detail according to
    /// `reporting_level`.
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Snapshots a generation.
    pub fn log(&mut self, generation: &Generation) {
        let members = match self.reporting_level {
            ReportingLevel::AllGenomes => {
                GenerationMemberRecord::All(generation.genomes().cloned().collect())
            }
            ReportingLevel::Champion => match generation.champion() {
                Some(champion) => GenerationMemberRecord::Champion(champion.clone()),
                None => GenerationMemberRecord::None,
            },
            ReportingLevel::NoGenomes => GenerationMemberRecord::None,
        };
        self.logs.push(GenerationLog {
            generation_number: generation.number(),
            stats: generation.performance(),
            composition: generation.composition().clone(),
            members,
        });
    }

    /// Iterates over all snapshots taken so far.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationLog> {
        self.logs.iter()
    }

    /// Renders the fitness history as CSV, one row per snapshot.
    pub fn fitness_csv(&self) -> String {
        let mut out = String::from("generation,total_fitness,best_fitness,average_fitness\n");
        for log in &self.logs {
            out.push_str(&format!(
                "{},{},{},{}\n",
                log.generation_number,
                log.stats.total_fitness,
                log.stats.best_fitness,
                log.stats.average_fitness
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_from_fitnesses() {
        let stats = GenerationStats::from_fitnesses([1.0, 2.0, 3.0].into_iter());
        assert_eq!(stats.total_fitness, 6.0);
        assert_eq!(stats.best_fitness, 3.0);
        assert_eq!(stats.average_fitness, 2.0);
    }

    #[test]
    fn stats_of_nothing_are_zero() {
        let stats = GenerationStats::from_fitnesses(std::iter::empty());
        assert_eq!(stats.total_fitness, 0.0);
        assert_eq!(stats.best_fitness, 0.0);
        assert_eq!(stats.average_fitness, 0.0);
    }

    #[test]
    fn csv_rendering_includes_header_and_rows() {
        let mut logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
        logger.logs.push(GenerationLog {
            generation_number: 0,
            stats: GenerationStats::from_fitnesses([1.0, 3.0].into_iter()),
            composition: HashMap::default(),
            members: GenerationMemberRecord::None,
        });

        let csv = logger.fitness_csv();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("generation,total_fitness,best_fitness,average_fitness")
        );
        assert_eq!(lines.next(), Some("0,4,3,2"));
        assert_eq!(lines.next(), None);
    }
}
