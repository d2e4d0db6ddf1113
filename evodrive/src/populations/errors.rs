use std::error::Error;
use std::fmt;

/// Error type for population lifecycle operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvolutionError {
    /// The current generation can't be replaced yet: the contained
    /// number of genomes still await a fitness report.
    GenerationInProgress(usize),
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvolutionError::GenerationInProgress(unscored) => write!(
                f,
                "can't assemble the next generation, {} genomes are still unscored",
                unscored
            ),
        }
    }
}

impl Error for EvolutionError {}
