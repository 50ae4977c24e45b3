//! Exact rational arithmetic for the absorb workspace.
//!
//! [`Rational`] is an immutable fraction of two arbitrary-precision integers,
//! always kept in lowest terms with a positive denominator. Because the
//! representation is canonical, structural equality is numeric equality.
//!
//! # Quick start
//!
//! ```rust
//! use absorb_rational::Rational;
//!
//! let a = Rational::new(2, 4).unwrap();
//! let b = Rational::new(-1, -3).unwrap();
//!
//! assert_eq!(a.to_string(), "1/2");
//! assert_eq!((&a + &b).to_string(), "5/6");
//! assert!(Rational::new(1, 0).is_err());
//! ```

pub mod error;
pub mod rational;

pub use error::RationalError;
pub use rational::{Rational, lcm_of_denominators};
