//! Valuations and the MacLane engine interface
//!
//! - [`Value`] - valuation values: exact rationals extended by +infinity
//! - [`padic`] - the p-adic valuation on Q and its unramified extensions
//! - [`maclane`] - the approximant/limit-valuation traits consumed by the
//!   ramification pipeline, with an exact implementation for Eisenstein
//!   presentations

mod maclane;
mod padic;

pub use maclane::{
    ApproximantSearch, EisensteinEngine, EisensteinApproximant, ExtensionValuation,
    MacLaneApproximant, PiAdicValuation, ValuationEngine,
};
pub use padic::{rational_valuation, unramified_extension, UnramifiedValuation};

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use num_rational::BigRational;

/// A valuation value: a rational number or +infinity (the value of 0)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A finite rational value
    Finite(BigRational),
    /// The value of zero, larger than every finite value
    Infinity,
}

impl Value {
    /// A finite value from a rational
    pub fn finite(value: BigRational) -> Self {
        Value::Finite(value)
    }

    /// A finite value from a machine integer
    pub fn from_integer(value: i64) -> Self {
        Value::Finite(BigRational::from_integer(value.into()))
    }

    /// Whether this value is +infinity
    pub fn is_infinite(&self) -> bool {
        matches!(self, Value::Infinity)
    }

    /// The finite value, if any
    pub fn as_finite(&self) -> Option<&BigRational> {
        match self {
            Value::Finite(v) => Some(v),
            Value::Infinity => None,
        }
    }

    /// Multiply by a rational factor (> 0); infinity is fixed
    pub fn scale(&self, factor: &BigRational) -> Value {
        match self {
            Value::Finite(v) => Value::Finite(v * factor),
            Value::Infinity => Value::Infinity,
        }
    }
}

impl Add<&Value> for &Value {
    type Output = Value;

    fn add(self, other: &Value) -> Value {
        match (self, other) {
            (Value::Finite(a), Value::Finite(b)) => Value::Finite(a + b),
            _ => Value::Infinity,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Finite(a), Value::Finite(b)) => a.cmp(b),
            (Value::Finite(_), Value::Infinity) => Ordering::Less,
            (Value::Infinity, Value::Finite(_)) => Ordering::Greater,
            (Value::Infinity, Value::Infinity) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Finite(v) => write!(f, "{v}"),
            Value::Infinity => write!(f, "oo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_infinity_dominates() {
        assert!(Value::Infinity > Value::from_integer(1_000_000));
        assert_eq!(Value::Infinity, Value::Infinity);
    }

    #[test]
    fn test_finite_ordering_is_rational() {
        assert!(Value::finite(rat(1, 3)) < Value::finite(rat(1, 2)));
    }

    #[test]
    fn test_addition_absorbs_infinity() {
        let sum = &Value::from_integer(2) + &Value::Infinity;
        assert!(sum.is_infinite());
        let sum = &Value::from_integer(2) + &Value::finite(rat(1, 2));
        assert_eq!(sum, Value::finite(rat(5, 2)));
    }

    #[test]
    fn test_scaling_fixes_infinity() {
        assert!(Value::Infinity.scale(&rat(6, 1)).is_infinite());
        assert_eq!(
            Value::finite(rat(1, 6)).scale(&rat(6, 1)),
            Value::from_integer(1)
        );
    }
}
