//! Absorption results over a shared denominator.

use std::fmt;

use absorb_rational::{Rational, lcm_of_denominators};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::MarkovError;

/// Exact absorption probabilities from the start state.
///
/// Probability `k` is `numerators()[k] / denominator()` and belongs to
/// absorbing state `absorbing_states()[k]`. States are in ascending original
/// index order. The numerators sum to the denominator, and the denominator is
/// the least common multiple of the reduced probabilities' denominators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsorptionResult {
    absorbing: Vec<usize>,
    numerators: Vec<BigInt>,
    denominator: BigInt,
}

impl AbsorptionResult {
    /// Result for a start state that is itself absorbing: probability one at
    /// `start`, zero elsewhere, denominator one.
    pub(crate) fn certain(absorbing: Vec<usize>, start: usize) -> Self {
        let numerators = absorbing
            .iter()
            .map(|&s| if s == start { BigInt::one() } else { BigInt::zero() })
            .collect();
        Self {
            absorbing,
            numerators,
            denominator: BigInt::one(),
        }
    }

    /// Scales reduced probabilities onto their least common denominator.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::Rational`] if a scaled probability is not an
    /// integer, which cannot happen for a correct denominator.
    pub(crate) fn from_probabilities(
        absorbing: Vec<usize>,
        probabilities: &[Rational],
    ) -> Result<Self, MarkovError> {
        let denominator = lcm_of_denominators(probabilities);
        let scale = Rational::from_integer(denominator.clone());
        let numerators = probabilities
            .iter()
            .map(|p| (p * &scale).to_integer_exact())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            absorbing,
            numerators,
            denominator,
        })
    }

    /// Original indices of the absorbing states, ascending.
    pub fn absorbing_states(&self) -> &[usize] {
        &self.absorbing
    }

    /// One numerator per absorbing state.
    pub fn numerators(&self) -> &[BigInt] {
        &self.numerators
    }

    /// The shared denominator.
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Number of absorbing states.
    pub fn len(&self) -> usize {
        self.absorbing.len()
    }

    /// Returns `true` if the chain has no absorbing states.
    pub fn is_empty(&self) -> bool {
        self.absorbing.is_empty()
    }

    /// Each absorbing state paired with its probability in lowest terms.
    pub fn probabilities(&self) -> Vec<(usize, Rational)> {
        self.absorbing
            .iter()
            .zip(&self.numerators)
            .map(|(&s, n)| {
                let p = Rational::new(n.clone(), self.denominator.clone())
                    .expect("denominator is positive");
                (s, p)
            })
            .collect()
    }

    /// Numerators followed by the denominator.
    pub fn to_vec(&self) -> Vec<BigInt> {
        self.numerators
            .iter()
            .chain(std::iter::once(&self.denominator))
            .cloned()
            .collect()
    }

    /// Numerators followed by the denominator, as `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::Overflow`] if any value does not fit.
    pub fn to_i64_vec(&self) -> Result<Vec<i64>, MarkovError> {
        self.to_vec()
            .iter()
            .map(|v| {
                v.to_i64().ok_or_else(|| MarkovError::Overflow {
                    value: v.to_string(),
                })
            })
            .collect()
    }
}

impl fmt::Display for AbsorptionResult {
    /// Space-separated numerators followed by the denominator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in &self.numerators {
            write!(f, "{n} ")?;
        }
        write!(f, "{}", self.denominator)
    }
}
