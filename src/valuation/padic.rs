//! The p-adic valuation on Q and its unramified extensions
//!
//! An unramified extension of Q_p of residue degree n is presented by the
//! number field built on the lifted GF(p^n) defining polynomial; the p-adic
//! valuation extends to it as the coefficient-wise minimum (the Gauss
//! valuation), which is exact because the modulus stays irreducible mod p.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::Value;
use crate::algebra::{defining_polynomial, NfElement, NumberField};

/// The p-adic valuation of a rational number, normalized with `v(p) = 1`
pub fn rational_valuation(p: &BigInt, x: &BigRational) -> Value {
    if x.is_zero() {
        return Value::Infinity;
    }
    let v = integer_valuation(p, x.numer()) - integer_valuation(p, x.denom());
    Value::Finite(BigRational::from_integer(BigInt::from(v)))
}

/// Exact power of p dividing a nonzero integer
fn integer_valuation(p: &BigInt, n: &BigInt) -> i64 {
    debug_assert!(!n.is_zero());
    let mut n = n.clone();
    let mut v = 0;
    loop {
        let (q, r) = (&n / p, &n % p);
        if !r.is_zero() {
            return v;
        }
        n = q;
        v += 1;
    }
}

/// The canonical valuation on the unramified extension `K^nr` of Q_p
///
/// For residue degree 1 this is the p-adic valuation on Q itself.
#[derive(Debug, Clone)]
pub struct UnramifiedValuation {
    prime: BigInt,
    field: Arc<NumberField>,
}

impl UnramifiedValuation {
    /// The residue characteristic
    pub fn prime(&self) -> &BigInt {
        &self.prime
    }

    /// The number field whose completion is `K^nr`
    pub fn field(&self) -> &Arc<NumberField> {
        &self.field
    }

    /// Residue degree of `K^nr` over Q_p
    pub fn residue_degree(&self) -> u64 {
        self.field.degree() as u64
    }

    /// Value of a field element, normalized with `v(p) = 1`
    pub fn value(&self, element: &NfElement) -> Value {
        debug_assert!(Arc::ptr_eq(element.field(), &self.field) || element.field() == &self.field);
        element
            .coeffs()
            .iter()
            .map(|c| rational_valuation(&self.prime, c))
            .min()
            .unwrap_or(Value::Infinity)
    }
}

/// The valuation whose completion is the unramified extension of Q_p of
/// residue degree n
///
/// Deterministic and cheap: for `n = 1` the p-adic valuation on Q; otherwise
/// the Gauss extension to the number field lifted from GF(p^n).
pub fn unramified_extension(p: &BigInt, n: u64) -> UnramifiedValuation {
    let field = if n == 1 {
        NumberField::rationals()
    } else {
        let modulus = defining_polynomial(p, n);
        NumberField::from_integer_modulus(&modulus)
            .expect("lifted defining polynomial is monic of positive degree")
    };
    UnramifiedValuation {
        prime: p.clone(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test_case(3, 18, 2; "three divides 18 twice")]
    #[test_case(3, 5, 0; "unit")]
    #[test_case(2, 96, 5; "two divides 96 five times")]
    fn test_integer_valuations(p: i64, n: i64, expected: i64) {
        assert_eq!(
            rational_valuation(&BigInt::from(p), &rat(n, 1)),
            Value::from_integer(expected)
        );
    }

    #[test]
    fn test_negative_valuation_of_fraction() {
        assert_eq!(
            rational_valuation(&BigInt::from(3), &rat(1, 9)),
            Value::from_integer(-2)
        );
    }

    #[test]
    fn test_value_of_zero_is_infinite() {
        assert!(rational_valuation(&BigInt::from(5), &BigRational::zero()).is_infinite());
    }

    #[test]
    fn test_unramified_degree_one_is_plain_padic() {
        let v = unramified_extension(&BigInt::from(3), 1);
        assert_eq!(v.residue_degree(), 1);
        let x = NfElement::from_rational(v.field(), rat(6, 1));
        assert_eq!(v.value(&x), Value::from_integer(1));
    }

    #[test]
    fn test_gauss_valuation_takes_coefficient_minimum() {
        let v = unramified_extension(&BigInt::from(3), 2);
        assert_eq!(v.residue_degree(), 2);

        // 9 + 3z has value min(2, 1) = 1
        let field = v.field();
        let element = NfElement::from_rational(field, rat(9, 1))
            .add(&NfElement::generator(field).scale(&rat(3, 1)));
        assert_eq!(v.value(&element), Value::from_integer(1));

        assert!(v.value(&NfElement::zero(field)).is_infinite());
    }
}
