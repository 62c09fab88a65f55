//! Dense univariate polynomials over a number field
//!
//! Coefficients ascend; the zero polynomial has an empty coefficient vector.
//! Besides ring arithmetic this module computes the *ramification quotient*
//! `P(x + π)/x` of a monic polynomial: the coefficients of the quotient are
//! returned as polynomials in `π` over the same base field, ready for
//! valuation.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::binomial;
use num_rational::BigRational;

use super::{NfElement, NumberField};
use crate::RamificationError;

/// A dense univariate polynomial over a [`NumberField`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfPoly {
    field: Arc<NumberField>,
    /// Ascending coefficients, no trailing zeros
    coeffs: Vec<NfElement>,
}

impl NfPoly {
    /// The zero polynomial
    pub fn zero(field: &Arc<NumberField>) -> Self {
        Self {
            field: Arc::clone(field),
            coeffs: Vec::new(),
        }
    }

    /// The constant polynomial 1
    pub fn one(field: &Arc<NumberField>) -> Self {
        Self::constant(NfElement::one(field))
    }

    /// A constant polynomial
    pub fn constant(value: NfElement) -> Self {
        let field = Arc::clone(value.field());
        let mut poly = Self {
            field,
            coeffs: vec![value],
        };
        poly.trim();
        poly
    }

    /// Build from an ascending coefficient vector
    pub fn from_coeffs(field: &Arc<NumberField>, coeffs: Vec<NfElement>) -> Self {
        let mut poly = Self {
            field: Arc::clone(field),
            coeffs,
        };
        poly.trim();
        poly
    }

    /// Build from ascending rational coefficients, embedded into `field`
    pub fn from_rational_coeffs(field: &Arc<NumberField>, coeffs: &[BigRational]) -> Self {
        Self::from_coeffs(
            field,
            coeffs
                .iter()
                .map(|c| NfElement::from_rational(field, c.clone()))
                .collect(),
        )
    }

    /// Build from ascending machine-integer coefficients
    pub fn from_integer_coeffs(field: &Arc<NumberField>, coeffs: &[i64]) -> Self {
        let rationals: Vec<BigRational> = coeffs
            .iter()
            .map(|&c| BigRational::from_integer(BigInt::from(c)))
            .collect();
        Self::from_rational_coeffs(field, &rationals)
    }

    fn trim(&mut self) {
        while self.coeffs.last().map(NfElement::is_zero).unwrap_or(false) {
            self.coeffs.pop();
        }
    }

    /// The coefficient field
    pub fn field(&self) -> &Arc<NumberField> {
        &self.field
    }

    /// Degree; the zero polynomial reports 0
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Whether this is the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Whether the leading coefficient is 1
    pub fn is_monic(&self) -> bool {
        self.coeffs
            .last()
            .map(|c| *c == NfElement::one(&self.field))
            .unwrap_or(false)
    }

    /// The `i`-th coefficient (zero beyond the degree)
    pub fn coeff(&self, i: usize) -> NfElement {
        self.coeffs
            .get(i)
            .cloned()
            .unwrap_or_else(|| NfElement::zero(&self.field))
    }

    /// All coefficients, ascending, without trailing zeros
    pub fn coeffs(&self) -> &[NfElement] {
        &self.coeffs
    }

    /// Polynomial product
    pub fn mul(&self, other: &NfPoly) -> NfPoly {
        if self.is_zero() || other.is_zero() {
            return NfPoly::zero(&self.field);
        }
        let mut coeffs =
            vec![NfElement::zero(&self.field); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j].add(&a.mul(b));
            }
        }
        NfPoly::from_coeffs(&self.field, coeffs)
    }

    /// Product of a family of polynomials; empty input gives the constant 1
    pub fn product<'a, I>(field: &Arc<NumberField>, polys: I) -> NfPoly
    where
        I: IntoIterator<Item = &'a NfPoly>,
    {
        polys
            .into_iter()
            .fold(NfPoly::one(field), |acc, p| acc.mul(p))
    }

    /// Reinterpret a polynomial over Q as a polynomial over `target`
    ///
    /// Only rational coefficients can be embedded; polynomials over a proper
    /// extension are rejected.
    pub fn embed(&self, target: &Arc<NumberField>) -> Result<NfPoly, RamificationError> {
        if !self.field.is_rationals() {
            return Err(RamificationError::InvalidPolynomial(
                "only polynomials over Q can be reinterpreted over an extension".to_string(),
            ));
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| NfElement::from_rational(target, c.coeffs()[0].clone()))
            .collect();
        Ok(NfPoly::from_coeffs(target, coeffs))
    }

    /// Coefficients of the ramification quotient `G(x) = P(x + π)/x`
    ///
    /// `P` must be monic of degree `d >= 1` with root `π`; since `P(π) = 0`,
    /// the constant term of `P(x + π)` vanishes and the quotient is a monic
    /// polynomial of degree `d - 1`. Each returned entry `G_i` is a polynomial
    /// in `π` over the base field,
    ///
    /// ```text
    /// G_i = Σ_k  C(k+i+1, i+1) · a_{k+i+1} · π^k,
    /// ```
    ///
    /// of `π`-degree < d, so no reduction modulo `P` is ever needed.
    pub fn ramification_quotient(&self) -> Result<Vec<NfPoly>, RamificationError> {
        if self.coeffs.len() < 2 {
            return Err(RamificationError::InvalidPolynomial(
                "ramification quotient needs degree >= 1".to_string(),
            ));
        }
        if !self.is_monic() {
            return Err(RamificationError::InvalidPolynomial(
                "ramification quotient needs a monic polynomial".to_string(),
            ));
        }
        let d = self.degree();
        let mut quotient = Vec::with_capacity(d);
        for i in 0..d {
            let mut pi_coeffs = Vec::with_capacity(d - i);
            for k in 0..=(d - i - 1) {
                let binom = binomial(BigInt::from(k + i + 1), BigInt::from(i + 1));
                pi_coeffs.push(self.coeff(k + i + 1).scale(&BigRational::from_integer(binom)));
            }
            quotient.push(NfPoly::from_coeffs(&self.field, pi_coeffs));
        }
        Ok(quotient)
    }
}

impl fmt::Display for NfPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "({c})")?,
                1 => write!(f, "({c})*x")?,
                _ => write!(f, "({c})*x^{i}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q() -> Arc<NumberField> {
        NumberField::rationals()
    }

    #[test]
    fn test_product_of_linear_factors() {
        let field = q();
        let a = NfPoly::from_integer_coeffs(&field, &[-1, 1]); // x - 1
        let b = NfPoly::from_integer_coeffs(&field, &[1, 1]); // x + 1
        let product = NfPoly::product(&field, [&a, &b]);
        assert_eq!(product, NfPoly::from_integer_coeffs(&field, &[-1, 0, 1]));
    }

    #[test]
    fn test_empty_product_is_one() {
        let field = q();
        let product = NfPoly::product(&field, std::iter::empty::<&NfPoly>());
        assert_eq!(product, NfPoly::one(&field));
    }

    #[test]
    fn test_ramification_quotient_quadratic() {
        // P = x^2 - 3: G = P(x + π)/x = x + 2π
        let field = q();
        let p = NfPoly::from_integer_coeffs(&field, &[-3, 0, 1]);
        let g = p.ramification_quotient().unwrap();

        assert_eq!(g.len(), 2);
        // G_0 = 2π
        assert_eq!(g[0], NfPoly::from_integer_coeffs(&field, &[0, 2]));
        // G_1 = 1
        assert_eq!(g[1], NfPoly::one(&field));
    }

    #[test]
    fn test_ramification_quotient_kummer_sextic() {
        // P = x^6 - 3: G_i = C(6, i+1) π^(5-i)
        let field = q();
        let p = NfPoly::from_integer_coeffs(&field, &[-3, 0, 0, 0, 0, 0, 1]);
        let g = p.ramification_quotient().unwrap();

        assert_eq!(g.len(), 6);
        assert_eq!(g[2], NfPoly::from_integer_coeffs(&field, &[0, 0, 0, 20]));
        assert_eq!(g[4], NfPoly::from_integer_coeffs(&field, &[0, 6]));
        assert_eq!(g[5], NfPoly::one(&field));
    }

    #[test]
    fn test_ramification_quotient_rejects_non_monic() {
        let field = q();
        let p = NfPoly::from_integer_coeffs(&field, &[1, 0, 2]);
        assert!(p.ramification_quotient().is_err());
    }
}
