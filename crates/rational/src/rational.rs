//! The [`Rational`] value type.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{CheckedDiv, One, Signed, ToPrimitive, Zero};

use crate::error::RationalError;

/// An exact fraction over arbitrary-precision integers.
///
/// Wraps [`BigRational`], which keeps every value in lowest terms with a
/// positive denominator, and replaces its panicking constructors with
/// fallible ones. Zero is stored as `0/1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rational(BigRational);

impl Rational {
    /// Constructs `numer / denom` in lowest terms.
    ///
    /// The sign is carried by the numerator, so `Rational::new(1, -2)` is
    /// `-1/2`.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if `denom` is zero.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, RationalError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self(BigRational::new(numer.into(), denom)))
    }

    /// Constructs the integer `n` as `n/1`.
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(n.into()))
    }

    /// Returns `0/1`.
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Returns `1/1`.
    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Returns the numerator (carries the sign).
    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    /// Returns the denominator (always positive).
    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Returns `true` if this value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Returns the reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if this value is zero.
    pub fn invert(&self) -> Result<Self, RationalError> {
        if self.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self(self.0.recip()))
    }

    /// Divides `self` by `other`.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Rational) -> Result<Self, RationalError> {
        CheckedDiv::checked_div(&self.0, &other.0)
            .map(Self)
            .ok_or(RationalError::DivisionByZero)
    }

    /// Returns the underlying integer when the denominator is one.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::NotIntegral`] for a proper fraction.
    pub fn to_integer_exact(&self) -> Result<BigInt, RationalError> {
        if self.is_integer() {
            Ok(self.numerator().clone())
        } else {
            Err(RationalError::NotIntegral {
                value: self.to_string(),
            })
        }
    }

    /// Lossy floating-point approximation, for diagnostics only.
    pub fn to_f64(&self) -> f64 {
        match (self.numerator().to_f64(), self.denominator().to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }
}

/// Least common multiple of the denominators of `values`.
///
/// Returns one for an empty input.
pub fn lcm_of_denominators<'a, I>(values: I) -> BigInt
where
    I: IntoIterator<Item = &'a Rational>,
{
    values
        .into_iter()
        .fold(BigInt::one(), |acc, r| acc.lcm(r.denominator()))
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<u64> for Rational {
    fn from(n: u64) -> Self {
        Self::from_integer(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl FromStr for Rational {
    type Err = RationalError;

    /// Parses `"n"` or `"n/d"`, surrounding whitespace allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed.parse::<BigRational>().map(Self).map_err(|_| {
            let zero_denom = trimmed
                .split_once('/')
                .and_then(|(n, d)| n.parse::<BigInt>().ok().and(d.parse::<BigInt>().ok()))
                .is_some_and(|d| d.is_zero());
            if zero_denom {
                RationalError::DivisionByZero
            } else {
                RationalError::Parse {
                    input: s.to_string(),
                }
            }
        })
    }
}

/// Implements a binary operator for every owned/borrowed operand pairing by
/// delegating to the wrapped [`BigRational`].
macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational((&self.0).$method(&rhs.0))
            }
        }

        impl $imp<Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational(self.0.$method(rhs.0))
            }
        }

        impl $imp<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational(self.0.$method(&rhs.0))
            }
        }

        impl $imp<Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational((&self.0).$method(rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Sum for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Self {
        Self(iter.map(|r| r.0).sum())
    }
}

impl<'a> Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        Self(iter.map(|r| &r.0).sum())
    }
}
