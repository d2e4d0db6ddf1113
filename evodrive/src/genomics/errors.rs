use std::error::Error;
use std::fmt;

/// Error type for attempted recombination of genomes whose
/// topologies differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeMismatchError {
    first: Vec<usize>,
    second: Vec<usize>,
}

impl ShapeMismatchError {
    pub(crate) fn new(first: Vec<usize>, second: Vec<usize>) -> ShapeMismatchError {
        ShapeMismatchError { first, second }
    }

    /// Returns the shapes of the two genomes involved.
    pub fn shapes(&self) -> (&[usize], &[usize]) {
        (&self.first, &self.second)
    }
}

impl fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "attempted crossover between genomes of mismatched shapes {:?} and {:?}",
            self.first, self.second
        )
    }
}

impl Error for ShapeMismatchError {}
