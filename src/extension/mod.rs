//! Weak Galois extensions and their ramification filtrations
//!
//! [`WeakExtension`] ties the pipeline together: it asks a base field for a
//! weak splitting field, enlarges it to meet the requested minimal
//! ramification, recovers the degree-`e` factor of the generator's minimal
//! polynomial over `K^nr` through the valuation engine, and reads the jumps
//! off the Newton polygon of the ramification polynomial. All derived data
//! is memoized; the extension is immutable after construction.
//!
//! The base field itself is a collaborator behind [`PAdicBaseField`].
//! [`PresentedCompletion`] implements it for fields presented by explicit
//! invariants and a known generator polynomial - the workflow where the
//! splitting field is taken from a table such as the database of local
//! fields rather than computed.

mod jumps;

pub use jumps::{lower_jumps, upper_from_lower, Filtration, Jump};

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Zero;
use tracing::{debug, warn};

use crate::algebra::{defining_polynomial, NfPoly, NumberField};
use crate::polygon::NewtonPolygon;
use crate::valuation::{
    rational_valuation, unramified_extension, ApproximantSearch, ExtensionValuation,
    MacLaneApproximant, Value, ValuationEngine,
};
use crate::RamificationError;

/// Iteration budget of the approximant refinement loop
///
/// The bound is heuristic: exhausting it without reaching `μ = ∞` does not
/// prove the polygon wrong, but the result is tagged [`Convergence::Truncated`]
/// so callers can tell.
const MAX_REFINEMENT_STEPS: usize = 10;

/// A p-adic field consumed through a narrow interface
///
/// Absolute invariants are over Q_p; `weak_splitting_field` and
/// `ramified_extension` produce further fields of the same representation.
pub trait PAdicBaseField: Sized + fmt::Debug + fmt::Display {
    /// Whether this field is Q_p itself
    fn is_base_prime_field(&self) -> bool;

    /// The residue characteristic
    fn prime(&self) -> &BigInt;

    /// The number field whose completion this field is
    fn number_field(&self) -> &Arc<NumberField>;

    /// Minimal polynomial over Q of the canonical generator
    fn generator_polynomial(&self) -> &NfPoly;

    /// A weak splitting field of `poly` over this field
    fn weak_splitting_field(&self, poly: &NfPoly) -> Result<Self, RamificationError>;

    /// A ramified extension of relative degree `m`
    fn ramified_extension(&self, m: u64) -> Result<Self, RamificationError>;

    /// Absolute degree over Q_p
    fn absolute_degree(&self) -> u64;

    /// Absolute ramification index over Q_p
    fn absolute_ramification_degree(&self) -> u64;

    /// Absolute inertia degree over Q_p
    fn absolute_inertia_degree(&self) -> u64;
}

/// A p-adic field presented by explicit invariants
///
/// The field is the completion of `Q[x]/(g)` at a place over `p`, where `g`
/// is the generator polynomial; ramification and inertia degrees are part of
/// the presentation. A presented field may carry a *splitting target*: the
/// field its `weak_splitting_field` returns, known in advance (for example
/// from the database of local fields). Without a target the field answers
/// that the input already splits over its own maximal unramified extension.
#[derive(Debug, Clone)]
pub struct PresentedCompletion {
    prime: BigInt,
    number_field: Arc<NumberField>,
    generator_polynomial: NfPoly,
    ramification_degree: u64,
    inertia_degree: u64,
    splitting_target: Option<Arc<PresentedCompletion>>,
}

impl PresentedCompletion {
    /// Q_p itself
    pub fn rationals(p: u64) -> Self {
        let field = NumberField::rationals();
        let generator_polynomial = NfPoly::from_integer_coeffs(&field, &[0, 1]);
        Self {
            prime: BigInt::from(p),
            number_field: field,
            generator_polynomial,
            ramification_degree: 1,
            inertia_degree: 1,
            splitting_target: None,
        }
    }

    /// A totally ramified extension of Q_p presented by an Eisenstein
    /// generator polynomial (ascending integer coefficients)
    pub fn eisenstein(p: u64, coeffs: &[i64]) -> Result<Self, RamificationError> {
        let rationals = NumberField::rationals();
        let poly = NfPoly::from_integer_coeffs(&rationals, coeffs);
        Self::eisenstein_from_poly(BigInt::from(p), poly)
    }

    fn eisenstein_from_poly(
        prime: BigInt,
        poly: NfPoly,
    ) -> Result<Self, RamificationError> {
        if poly.is_zero() || poly.degree() < 1 || !poly.is_monic() {
            return Err(RamificationError::InvalidPolynomial(
                "generator must be monic of degree >= 1".to_string(),
            ));
        }
        let one = Value::from_integer(1);
        for i in 0..poly.degree() {
            let coeff = poly.coeff(i);
            let v = rational_valuation(&prime, &coeff.coeffs()[0]);
            if v < one {
                return Err(RamificationError::InvalidPolynomial(format!(
                    "coefficient {i} has valuation {v} < 1, generator is not Eisenstein"
                )));
            }
        }
        if rational_valuation(&prime, &poly.coeff(0).coeffs()[0]) != one {
            return Err(RamificationError::InvalidPolynomial(
                "constant term must have valuation exactly 1".to_string(),
            ));
        }

        let degree = poly.degree() as u64;
        let modulus: Vec<BigRational> = (0..=poly.degree())
            .map(|i| poly.coeff(i).coeffs()[0].clone())
            .collect();
        let number_field = NumberField::new(modulus)?;
        Ok(Self {
            prime,
            number_field,
            generator_polynomial: poly,
            ramification_degree: degree,
            inertia_degree: 1,
            splitting_target: None,
        })
    }

    /// The unramified extension of Q_p of residue degree `f`
    pub fn unramified(p: u64, f: u64) -> Self {
        let prime = BigInt::from(p);
        let modulus = defining_polynomial(&prime, f);
        let number_field = NumberField::from_integer_modulus(&modulus)
            .expect("lifted defining polynomial is monic of positive degree");
        let rationals = NumberField::rationals();
        let coeffs: Vec<BigRational> = modulus
            .iter()
            .map(|c| BigRational::from_integer(c.clone()))
            .collect();
        let generator_polynomial = NfPoly::from_rational_coeffs(&rationals, &coeffs);
        Self {
            prime,
            number_field,
            generator_polynomial,
            ramification_degree: 1,
            inertia_degree: f,
            splitting_target: None,
        }
    }

    /// Attach the field that `weak_splitting_field` should return
    pub fn with_splitting_field(mut self, target: PresentedCompletion) -> Self {
        self.splitting_target = Some(Arc::new(target));
        self
    }

    /// A polynomial over the number field underlying this field, from
    /// ascending integer coefficients (input polynomials for splitting)
    pub fn polynomial_over_rationals(&self, coeffs: &[i64]) -> NfPoly {
        NfPoly::from_integer_coeffs(&self.number_field, coeffs)
    }
}

impl PAdicBaseField for PresentedCompletion {
    fn is_base_prime_field(&self) -> bool {
        self.number_field.is_rationals()
            && self.ramification_degree == 1
            && self.inertia_degree == 1
    }

    fn prime(&self) -> &BigInt {
        &self.prime
    }

    fn number_field(&self) -> &Arc<NumberField> {
        &self.number_field
    }

    fn generator_polynomial(&self) -> &NfPoly {
        &self.generator_polynomial
    }

    fn weak_splitting_field(&self, _poly: &NfPoly) -> Result<Self, RamificationError> {
        match &self.splitting_target {
            Some(target) => Ok((**target).clone()),
            None => Ok(self.clone()),
        }
    }

    fn ramified_extension(&self, m: u64) -> Result<Self, RamificationError> {
        if m == 1 {
            return Ok(self.clone());
        }
        if self.is_base_prime_field() {
            // x^m - p is Eisenstein and generates a degree-m ramified extension
            let rationals = NumberField::rationals();
            let mut coeffs = vec![BigRational::zero(); m as usize + 1];
            coeffs[0] = BigRational::from_integer(-self.prime.clone());
            coeffs[m as usize] = BigRational::from_integer(BigInt::from(1));
            let poly = NfPoly::from_rational_coeffs(&rationals, &coeffs);
            return Self::eisenstein_from_poly(self.prime.clone(), poly);
        }
        if self.inertia_degree == 1 {
            // a root of P(x^m) is an m-th root of a conjugate of the
            // generator; P(x^m) stays Eisenstein
            let d = self.generator_polynomial.degree();
            let rationals = NumberField::rationals();
            let mut coeffs =
                vec![BigRational::zero(); d * m as usize + 1];
            for i in 0..=d {
                coeffs[i * m as usize] = self.generator_polynomial.coeff(i).coeffs()[0].clone();
            }
            let poly = NfPoly::from_rational_coeffs(&rationals, &coeffs);
            return Self::eisenstein_from_poly(self.prime.clone(), poly);
        }
        Err(RamificationError::UnsupportedExtension(format!(
            "ramified extension of a presented field with inertia degree {} > 1",
            self.inertia_degree
        )))
    }

    fn absolute_degree(&self) -> u64 {
        self.ramification_degree * self.inertia_degree
    }

    fn absolute_ramification_degree(&self) -> u64 {
        self.ramification_degree
    }

    fn absolute_inertia_degree(&self) -> u64 {
        self.inertia_degree
    }
}

impl fmt::Display for PresentedCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_base_prime_field() {
            write!(f, "Q_{}", self.prime)
        } else {
            write!(
                f,
                "completion of degree {} over Q_{} (e = {}, f = {})",
                self.absolute_degree(),
                self.prime,
                self.ramification_degree,
                self.inertia_degree
            )
        }
    }
}

/// Whether the approximant refinement reached an exact factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Convergence {
    /// The invariant `μ` became infinite: the key polynomial is exact
    Exact,
    /// The iteration budget ran out; the polygon may be under-refined
    Truncated,
}

/// The Newton polygon of the ramification polynomial, with its refinement
/// status
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RamificationPolygon {
    /// The polygon itself
    pub polygon: NewtonPolygon,
    /// Whether the refinement loop converged
    pub convergence: Convergence,
}

/// A weak Galois extension `L/K` of p-adic fields
///
/// Constructed once from a base field, input polynomials and a minimal
/// ramification; the polygon and both filtrations are computed lazily and
/// cached for the lifetime of the object. Single-threaded by design - the
/// caches are not synchronized.
#[derive(Debug)]
pub struct WeakExtension<B: PAdicBaseField, E: ValuationEngine> {
    base_field: Arc<B>,
    extension_field: B,
    engine: E,
    degree: u64,
    ramification_degree: u64,
    inertia_degree: u64,
    polygon: OnceCell<RamificationPolygon>,
    lower: OnceCell<Filtration>,
    upper: OnceCell<Filtration>,
}

/// Exact integer ratio of collaborator invariants
fn exact_ratio(numerator: u64, denominator: u64, what: &str) -> Result<u64, RamificationError> {
    if denominator == 0 || numerator % denominator != 0 {
        return Err(RamificationError::NonIntegralRatio(format!(
            "{what}: {numerator}/{denominator}"
        )));
    }
    Ok(numerator / denominator)
}

impl<B: PAdicBaseField, E: ValuationEngine> WeakExtension<B, E> {
    /// Weak splitting field of the product of `polys` over `base_field`,
    /// with ramification index a multiple of `minimal_ramification`
    ///
    /// Preconditions: the base field is Q_p and `minimal_ramification` is
    /// coprime to `p`. An empty `polys` stands for the constant polynomial 1.
    pub fn new(
        base_field: Arc<B>,
        polys: &[NfPoly],
        minimal_ramification: u64,
        engine: E,
    ) -> Result<Self, RamificationError> {
        if !base_field.is_base_prime_field() {
            return Err(RamificationError::NotPrimeBaseField(
                base_field.absolute_degree(),
            ));
        }
        let p = base_field.prime().clone();
        if (BigInt::from(minimal_ramification) % &p).is_zero() {
            return Err(RamificationError::RamificationNotCoprime {
                minimal_ramification,
                prime: p,
            });
        }

        let product = NfPoly::product(base_field.number_field(), polys);
        let mut extension_field = base_field.weak_splitting_field(&product)?;
        let e = exact_ratio(
            extension_field.absolute_ramification_degree(),
            base_field.absolute_ramification_degree(),
            "ramification degree of L over K",
        )?;

        let m = if e % minimal_ramification != 0 {
            // enlarge the ramification index of L until
            // minimal_ramification divides e(L/K)
            let m = e * minimal_ramification / e.gcd(&minimal_ramification);
            if (BigInt::from(m) % &p).is_zero() {
                // if m is not prime to p, L/K may not be weak Galois anymore
                warn!(m, "enlargement degree shares a factor with p");
            }
            extension_field = extension_field.ramified_extension(m)?;
            m
        } else {
            1
        };

        let ramification_degree = e * m;
        let degree = exact_ratio(
            extension_field.absolute_degree(),
            base_field.absolute_degree(),
            "degree of L over K",
        )?;
        let inertia_degree = exact_ratio(
            extension_field.absolute_inertia_degree(),
            base_field.absolute_inertia_degree(),
            "inertia degree of L over K",
        )?;
        if degree != ramification_degree * inertia_degree {
            return Err(RamificationError::DegreeMismatch {
                degree,
                product: ramification_degree * inertia_degree,
            });
        }

        Ok(Self {
            base_field,
            extension_field,
            engine,
            degree,
            ramification_degree,
            inertia_degree,
            polygon: OnceCell::new(),
            lower: OnceCell::new(),
            upper: OnceCell::new(),
        })
    }

    /// Weak splitting field of a single polynomial
    pub fn from_polynomial(
        base_field: Arc<B>,
        poly: &NfPoly,
        minimal_ramification: u64,
        engine: E,
    ) -> Result<Self, RamificationError> {
        Self::new(
            base_field,
            std::slice::from_ref(poly),
            minimal_ramification,
            engine,
        )
    }

    /// The base field `K`
    pub fn base_field(&self) -> &B {
        self.base_field.as_ref()
    }

    /// The extension field `L`
    pub fn extension_field(&self) -> &B {
        &self.extension_field
    }

    /// Degree `[L:K]`
    pub fn degree(&self) -> u64 {
        self.degree
    }

    /// Ramification index `e(L/K)`
    pub fn ramification_degree(&self) -> u64 {
        self.ramification_degree
    }

    /// Inertia degree `f(L/K)`
    pub fn inertia_degree(&self) -> u64 {
        self.inertia_degree
    }

    /// The Newton polygon of the ramification polynomial, cached
    pub fn ramification_polygon(&self) -> Result<&RamificationPolygon, RamificationError> {
        if let Some(polygon) = self.polygon.get() {
            return Ok(polygon);
        }
        let computed = self.compute_ramification_polygon()?;
        Ok(self.polygon.get_or_init(|| computed))
    }

    fn compute_ramification_polygon(&self) -> Result<RamificationPolygon, RamificationError> {
        // guaranteed at construction, re-checked because the polygon only
        // makes sense over the prime field
        if !self.base_field.is_base_prime_field() {
            return Err(RamificationError::NotPrimeBaseField(
                self.base_field.absolute_degree(),
            ));
        }

        let v_nr = unramified_extension(self.base_field.prime(), self.inertia_degree);
        let minimal = self.extension_field.generator_polynomial();
        let over_nr = minimal.embed(v_nr.field())?;

        let mut family =
            self.engine
                .approximants(&v_nr, &over_nr, ApproximantSearch::exhaustive())?;
        debug!(approximants = family.len(), "MacLane approximant family");
        if family.is_empty() {
            return Err(RamificationError::NoApproximant);
        }
        let mut approximant = family.remove(0);

        let mut convergence = Convergence::Truncated;
        for _ in 0..MAX_REFINEMENT_STEPS {
            if approximant.mu().is_infinite() {
                convergence = Convergence::Exact;
                break;
            }
            approximant = approximant.step(&over_nr)?;
        }
        if convergence == Convergence::Truncated && approximant.mu().is_infinite() {
            convergence = Convergence::Exact;
        }
        if convergence == Convergence::Truncated {
            warn!(
                budget = MAX_REFINEMENT_STEPS,
                "refinement budget exhausted, polygon may be under-refined"
            );
        }

        let key = approximant.key_polynomial();
        if key.degree() as u64 != self.ramification_degree {
            return Err(RamificationError::FactorDegreeMismatch {
                expected: self.ramification_degree,
                actual: key.degree() as u64,
            });
        }

        let limit = approximant.limit(&key)?;
        let scaled = limit.scale(&BigRational::from_integer(BigInt::from(
            self.ramification_degree,
        )));
        debug_assert_eq!(scaled.uniformizer_value(), Value::from_integer(1));

        let quotient = key.ramification_quotient()?;
        let points = quotient
            .iter()
            .enumerate()
            .map(|(i, coeff)| (i as i64, scaled.value(coeff)));
        Ok(RamificationPolygon {
            polygon: NewtonPolygon::from_points(points),
            convergence,
        })
    }

    /// The ramification filtration as `(jump, order)` pairs, increasing
    ///
    /// Lower numbering by default; pass `upper_numbering = true` for the
    /// Herbrand-transformed jumps. Cached per numbering.
    pub fn ramification_filtration(
        &self,
        upper_numbering: bool,
    ) -> Result<&Filtration, RamificationError> {
        if upper_numbering {
            if let Some(filtration) = self.upper.get() {
                return Ok(filtration);
            }
            let lower = self.ramification_filtration(false)?;
            let upper = upper_from_lower(lower, self.ramification_degree);
            return Ok(self.upper.get_or_init(|| upper));
        }
        if let Some(filtration) = self.lower.get() {
            return Ok(filtration);
        }
        let computed = if self.ramification_degree == 1 {
            Vec::new()
        } else {
            let polygon = self.ramification_polygon()?;
            lower_jumps(&polygon.polygon, self.ramification_degree)
        };
        Ok(self.lower.get_or_init(|| computed))
    }

    /// The lower jumps, values only
    pub fn lower_jumps(&self) -> Result<Vec<BigRational>, RamificationError> {
        Ok(self
            .ramification_filtration(false)?
            .iter()
            .map(|j| j.jump.clone())
            .collect())
    }

    /// The upper jumps, values only
    pub fn upper_jumps(&self) -> Result<Vec<BigRational>, RamificationError> {
        Ok(self
            .ramification_filtration(true)?
            .iter()
            .map(|j| j.jump.clone())
            .collect())
    }

    /// Subfields fixed by the ramification subgroups, keyed by lower jump
    ///
    /// A declared extension point: always fails with
    /// [`RamificationError::SubfieldsUnsupported`].
    pub fn ramification_subfields(
        &self,
    ) -> Result<BTreeMap<BigRational, B>, RamificationError> {
        Err(RamificationError::SubfieldsUnsupported)
    }

    /// The subfield at a single lower jump; see [`Self::ramification_subfields`]
    pub fn ramification_subfield(&self, _u: &BigRational) -> Result<B, RamificationError> {
        Err(RamificationError::SubfieldsUnsupported)
    }
}

impl<B: PAdicBaseField, E: ValuationEngine> fmt::Display for WeakExtension<B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} as weak Galois extension of {}",
            self.extension_field, self.base_field
        )
    }
}
