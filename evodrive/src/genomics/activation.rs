use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scalar nonlinearities available to neurons.
///
/// The declared order is part of the genome encoding: activation genes are
/// persisted and mutated as indexes into [`ActivationType::ALL`], so
/// reordering variants changes the meaning of saved genomes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ActivationType {
    /// 1 if the input is positive, 0 otherwise.
    BinaryStep,
    /// Hyperbolic tangent, output in (-1, 1).
    TanH,
    /// Logistic function, output in (0, 1).
    Sigmoid,
    /// Identity for positive inputs, 0.01x otherwise.
    LeakyRelu,
    /// Identity for positive inputs, 0 otherwise.
    Relu,
}

impl ActivationType {
    /// All activation types, in encoding order.
    pub const ALL: [ActivationType; 5] = [
        ActivationType::BinaryStep,
        ActivationType::TanH,
        ActivationType::Sigmoid,
        ActivationType::LeakyRelu,
        ActivationType::Relu,
    ];

    /// Number of available activation types.
    pub const COUNT: usize = ActivationType::ALL.len();

    /// Returns the activation type's index in the encoding order.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::TanH.index(), 1);
    /// ```
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the activation type at `index` in the encoding order,
    /// or `None` if the index is out of range.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::from_index(4), Some(ActivationType::Relu));
    /// assert_eq!(ActivationType::from_index(17), None);
    /// ```
    pub fn from_index(index: usize) -> Option<ActivationType> {
        ActivationType::ALL.get(index).copied()
    }

    /// Returns a uniformly random activation type.
    pub(crate) fn random<R: Rng>(rng: &mut R) -> ActivationType {
        ActivationType::ALL[rng.gen_range(0..ActivationType::COUNT)]
    }

    /// Applies the activation function to `x`.
    ///
    /// # Examples
    /// ```
    /// use evodrive::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::Relu.apply(-3.0), 0.0);
    /// assert_eq!(ActivationType::LeakyRelu.apply(-3.0), -0.03);
    /// assert_eq!(ActivationType::BinaryStep.apply(0.5), 1.0);
    /// ```
    pub fn apply(self, x: f64) -> f64 {
        match self {
            ActivationType::BinaryStep => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationType::TanH => x.tanh(),
            ActivationType::Sigmoid => {
                let k = x.exp();
                k / (1.0 + k)
            }
            ActivationType::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    0.01 * x
                }
            }
            ActivationType::Relu => x.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_from_index() {
        for activation in ActivationType::ALL {
            assert_eq!(
                ActivationType::from_index(activation.index()),
                Some(activation)
            );
        }
        assert_eq!(ActivationType::from_index(ActivationType::COUNT), None);
    }

    #[test]
    fn binary_step_is_zero_at_the_origin() {
        assert_eq!(ActivationType::BinaryStep.apply(0.0), 0.0);
        assert_eq!(ActivationType::BinaryStep.apply(f64::MIN_POSITIVE), 1.0);
    }

    #[test]
    fn sigmoid_is_centered_at_one_half() {
        assert!((ActivationType::Sigmoid.apply(0.0) - 0.5).abs() < 1e-12);
        assert!(ActivationType::Sigmoid.apply(10.0) > 0.999);
        assert!(ActivationType::Sigmoid.apply(-10.0) < 0.001);
    }

    #[test]
    fn tanh_matches_std() {
        assert_eq!(ActivationType::TanH.apply(0.7), 0.7_f64.tanh());
    }

    #[test]
    fn rectifiers_pass_positive_inputs_through() {
        assert_eq!(ActivationType::Relu.apply(2.5), 2.5);
        assert_eq!(ActivationType::LeakyRelu.apply(2.5), 2.5);
        assert_eq!(ActivationType::Relu.apply(-2.5), 0.0);
        assert_eq!(ActivationType::LeakyRelu.apply(-2.5), -0.025);
    }
}
