//! Absolute number fields `Q[z]/(g)`
//!
//! A field is defined by a monic modulus `g` with rational coefficients;
//! elements are dense coefficient vectors of length `deg g`, reduced on
//! multiplication. The degree-1 field (modulus `z`) is Q itself, so the
//! valuation and polynomial layers handle the rational base field and its
//! unramified extensions uniformly.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::RamificationError;

/// An absolute number field `Q[z]/(g)` with `g` monic
#[derive(Debug, PartialEq, Eq)]
pub struct NumberField {
    /// Monic modulus, ascending coefficients, length `degree + 1`
    modulus: Vec<BigRational>,
}

impl NumberField {
    /// The rational field Q, presented as the degree-1 field `Q[z]/(z)`
    pub fn rationals() -> Arc<Self> {
        Arc::new(Self {
            modulus: vec![BigRational::zero(), BigRational::one()],
        })
    }

    /// Build a field from a monic modulus of degree >= 1
    pub fn new(modulus: Vec<BigRational>) -> Result<Arc<Self>, RamificationError> {
        if modulus.len() < 2 {
            return Err(RamificationError::InvalidPolynomial(
                "number field modulus must have degree >= 1".to_string(),
            ));
        }
        if !modulus.last().expect("non-empty modulus").is_one() {
            return Err(RamificationError::InvalidPolynomial(
                "number field modulus must be monic".to_string(),
            ));
        }
        Ok(Arc::new(Self { modulus }))
    }

    /// Build a field from a monic modulus with integer coefficients
    pub fn from_integer_modulus(coeffs: &[BigInt]) -> Result<Arc<Self>, RamificationError> {
        Self::new(
            coeffs
                .iter()
                .map(|c| BigRational::from_integer(c.clone()))
                .collect(),
        )
    }

    /// Degree over Q
    pub fn degree(&self) -> usize {
        self.modulus.len() - 1
    }

    /// Whether this field is Q itself
    pub fn is_rationals(&self) -> bool {
        self.degree() == 1
    }

    /// The defining modulus (ascending coefficients)
    pub fn modulus(&self) -> &[BigRational] {
        &self.modulus
    }
}

/// An element of a [`NumberField`], as a reduced coefficient vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfElement {
    field: Arc<NumberField>,
    /// Coefficients of `1, z, ..., z^(degree-1)`
    coeffs: Vec<BigRational>,
}

impl NfElement {
    /// The zero element
    pub fn zero(field: &Arc<NumberField>) -> Self {
        Self {
            field: Arc::clone(field),
            coeffs: vec![BigRational::zero(); field.degree()],
        }
    }

    /// The multiplicative identity
    pub fn one(field: &Arc<NumberField>) -> Self {
        Self::from_rational(field, BigRational::one())
    }

    /// Embed a rational number
    pub fn from_rational(field: &Arc<NumberField>, value: BigRational) -> Self {
        let mut coeffs = vec![BigRational::zero(); field.degree()];
        coeffs[0] = value;
        Self {
            field: Arc::clone(field),
            coeffs,
        }
    }

    /// The canonical generator `z` (zero in the degree-1 field)
    pub fn generator(field: &Arc<NumberField>) -> Self {
        let mut coeffs = vec![BigRational::zero(); field.degree()];
        if field.degree() > 1 {
            coeffs[1] = BigRational::one();
        }
        Self {
            field: Arc::clone(field),
            coeffs,
        }
    }

    /// The field this element lives in
    pub fn field(&self) -> &Arc<NumberField> {
        &self.field
    }

    /// Coefficients of `1, z, ..., z^(degree-1)`
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Whether this is the zero element
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Zero::is_zero)
    }

    /// Sum of two elements of the same field
    pub fn add(&self, other: &NfElement) -> NfElement {
        debug_assert_eq!(self.field.modulus, other.field.modulus);
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| a + b)
            .collect();
        Self {
            field: Arc::clone(&self.field),
            coeffs,
        }
    }

    /// Difference of two elements of the same field
    pub fn sub(&self, other: &NfElement) -> NfElement {
        debug_assert_eq!(self.field.modulus, other.field.modulus);
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| a - b)
            .collect();
        Self {
            field: Arc::clone(&self.field),
            coeffs,
        }
    }

    /// Additive inverse
    pub fn neg(&self) -> NfElement {
        Self {
            field: Arc::clone(&self.field),
            coeffs: self.coeffs.iter().map(|a| -a).collect(),
        }
    }

    /// Product, reduced modulo the field's modulus
    pub fn mul(&self, other: &NfElement) -> NfElement {
        debug_assert_eq!(self.field.modulus, other.field.modulus);
        let n = self.field.degree();
        // schoolbook convolution up to degree 2n-2
        let mut prod = vec![BigRational::zero(); 2 * n.max(1) - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                if b.is_zero() {
                    continue;
                }
                prod[i + j] += a * b;
            }
        }
        reduce_mod(&mut prod, &self.field.modulus);
        prod.truncate(n);
        prod.resize(n, BigRational::zero());
        Self {
            field: Arc::clone(&self.field),
            coeffs: prod,
        }
    }

    /// Multiply by a rational scalar
    pub fn scale(&self, factor: &BigRational) -> NfElement {
        Self {
            field: Arc::clone(&self.field),
            coeffs: self.coeffs.iter().map(|a| a * factor).collect(),
        }
    }
}

/// Reduce a coefficient vector modulo a monic modulus, in place
fn reduce_mod(coeffs: &mut Vec<BigRational>, modulus: &[BigRational]) {
    let n = modulus.len() - 1;
    while coeffs.len() > n {
        let lead = coeffs.pop().expect("non-empty coefficient vector");
        if lead.is_zero() {
            continue;
        }
        let shift = coeffs.len() - n;
        for (i, m) in modulus.iter().take(n).enumerate() {
            let delta = &lead * m;
            coeffs[shift + i] -= delta;
        }
    }
}

impl fmt::Display for NfElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{c}")?,
                1 => write!(f, "{c}*z")?,
                _ => write!(f, "{c}*z^{i}")?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn test_rationals_are_degree_one() {
        let q = NumberField::rationals();
        assert_eq!(q.degree(), 1);
        assert!(q.is_rationals());

        let a = NfElement::from_rational(&q, rat(3));
        let b = NfElement::from_rational(&q, rat(-5));
        assert_eq!(a.mul(&b), NfElement::from_rational(&q, rat(-15)));
        assert_eq!(a.add(&b), NfElement::from_rational(&q, rat(-2)));
    }

    #[test]
    fn test_modulus_must_be_monic() {
        let result = NumberField::new(vec![rat(1), rat(2)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quadratic_field_arithmetic() {
        // Q(i) = Q[z]/(z^2 + 1)
        let field = NumberField::new(vec![rat(1), rat(0), rat(1)]).unwrap();
        let i = NfElement::generator(&field);

        // i^2 = -1
        let minus_one = NfElement::from_rational(&field, rat(-1));
        assert_eq!(i.mul(&i), minus_one);

        // (1 + i)(1 - i) = 2
        let one = NfElement::one(&field);
        let a = one.add(&i);
        let b = one.sub(&i);
        assert_eq!(a.mul(&b), NfElement::from_rational(&field, rat(2)));
    }

    #[test]
    fn test_reduction_of_high_powers() {
        // Q(cbrt(2)) = Q[z]/(z^3 - 2): z^2 * z^2 = 2z
        let field = NumberField::new(vec![rat(-2), rat(0), rat(0), rat(1)]).unwrap();
        let z = NfElement::generator(&field);
        let z2 = z.mul(&z);
        let z4 = z2.mul(&z2);
        assert_eq!(z4, z.scale(&rat(2)));
    }
}
