//! MacLane approximants and limit valuations
//!
//! General inductive valuations (key polynomials, stepwise refinement, limit
//! construction) live in an external engine; this module fixes the narrow
//! interface the ramification pipeline consumes:
//!
//! - [`ValuationEngine`]: approximant search over `K^nr` with the
//!   square-free / incomparability / maximal-degree flags
//! - [`MacLaneApproximant`]: the invariant `μ`, one refinement step, the key
//!   polynomial, and limit-valuation construction
//! - [`ExtensionValuation`]: evaluation on polynomials in the prime element,
//!   scaling, and the uniformizer value
//!
//! [`EisensteinEngine`] is an exact in-crate implementation for the case
//! where the factor sought is Eisenstein over `K^nr`: the key polynomial is
//! the input itself (`μ = ∞` immediately) and the limit valuation is the
//! π-adic valuation `v(Σ c_j π^j) = min_j (v(c_j) + j/e)`, which is exact
//! because the π-power terms have pairwise distinct values mod 1/e.

use num_bigint::BigInt;
use num_rational::BigRational;

use super::{UnramifiedValuation, Value};
use crate::algebra::NfPoly;
use crate::RamificationError;

/// Flags controlling the approximant search
#[derive(Debug, Clone, Copy)]
pub struct ApproximantSearch {
    /// The input polynomial may be assumed square-free
    pub assume_squarefree: bool,
    /// Returned approximants must be pairwise incomparable
    pub require_incomparability: bool,
    /// Approximants must already have the maximal key-polynomial degree
    pub require_maximal_degree: bool,
}

impl ApproximantSearch {
    /// All flags on - the search used by the ramification pipeline
    pub fn exhaustive() -> Self {
        Self {
            assume_squarefree: true,
            require_incomparability: true,
            require_maximal_degree: true,
        }
    }
}

/// Approximant search over `K^nr` - the entry point of the valuation engine
pub trait ValuationEngine {
    /// Approximant type produced by this engine
    type Approximant: MacLaneApproximant;

    /// Approximating valuations for the irreducible factors of `poly`
    fn approximants(
        &self,
        base: &UnramifiedValuation,
        poly: &NfPoly,
        search: ApproximantSearch,
    ) -> Result<Vec<Self::Approximant>, RamificationError>;
}

/// One approximating valuation, refinable toward an irreducible factor
pub trait MacLaneApproximant: Sized {
    /// The limit valuation type this approximant refines into
    type Limit: ExtensionValuation;

    /// The invariant `μ`; `∞` means the key polynomial is an exact factor
    fn mu(&self) -> Value;

    /// One MacLane refinement step against `poly`
    fn step(&self, poly: &NfPoly) -> Result<Self, RamificationError>;

    /// The current key polynomial
    fn key_polynomial(&self) -> NfPoly;

    /// The limit valuation determined by this approximant and a key `key`
    fn limit(&self, key: &NfPoly) -> Result<Self::Limit, RamificationError>;
}

/// A valuation on the extension generated by a key polynomial
///
/// Elements are handed over as polynomials in the prime element `π` over
/// `K^nr`, of `π`-degree below the key degree.
pub trait ExtensionValuation {
    /// Multiply all values by a positive rational factor
    fn scale(&self, factor: &BigRational) -> Self;

    /// The value of the prime element `π`
    fn uniformizer_value(&self) -> Value;

    /// The value of an element
    fn value(&self, element: &NfPoly) -> Value;
}

/// Exact engine for factors that are Eisenstein over `K^nr`
///
/// Rejects anything else: general factor recovery belongs to an external
/// MacLane implementation behind [`ValuationEngine`].
#[derive(Debug, Clone, Copy)]
pub struct EisensteinEngine;

impl ValuationEngine for EisensteinEngine {
    type Approximant = EisensteinApproximant;

    fn approximants(
        &self,
        base: &UnramifiedValuation,
        poly: &NfPoly,
        _search: ApproximantSearch,
    ) -> Result<Vec<Self::Approximant>, RamificationError> {
        ensure_eisenstein(base, poly)?;
        Ok(vec![EisensteinApproximant {
            base: base.clone(),
            key: poly.clone(),
        }])
    }
}

/// Check the Eisenstein condition with respect to the base valuation:
/// monic, `v(a_i) >= 1` below the degree, `v(a_0) = 1` exactly
fn ensure_eisenstein(
    base: &UnramifiedValuation,
    poly: &NfPoly,
) -> Result<(), RamificationError> {
    if poly.is_zero() || poly.degree() < 1 {
        return Err(RamificationError::Engine(
            "expected a polynomial of degree >= 1".to_string(),
        ));
    }
    if !poly.is_monic() {
        return Err(RamificationError::Engine(
            "Eisenstein engine needs a monic polynomial".to_string(),
        ));
    }
    let one = Value::from_integer(1);
    for i in 0..poly.degree() {
        let v = base.value(&poly.coeff(i));
        if v < one {
            return Err(RamificationError::Engine(format!(
                "coefficient {i} has value {v} < 1, polynomial is not Eisenstein"
            )));
        }
    }
    if base.value(&poly.coeff(0)) != one {
        return Err(RamificationError::Engine(
            "constant term must have value exactly 1".to_string(),
        ));
    }
    Ok(())
}

/// Approximant whose key polynomial is already the exact Eisenstein factor
#[derive(Debug, Clone)]
pub struct EisensteinApproximant {
    base: UnramifiedValuation,
    key: NfPoly,
}

impl MacLaneApproximant for EisensteinApproximant {
    type Limit = PiAdicValuation;

    fn mu(&self) -> Value {
        // the key polynomial is an exact factor from the start
        Value::Infinity
    }

    fn step(&self, _poly: &NfPoly) -> Result<Self, RamificationError> {
        Ok(self.clone())
    }

    fn key_polynomial(&self) -> NfPoly {
        self.key.clone()
    }

    fn limit(&self, key: &NfPoly) -> Result<Self::Limit, RamificationError> {
        Ok(PiAdicValuation::new(
            self.base.clone(),
            key.degree() as u64,
        ))
    }
}

/// The π-adic valuation on the totally ramified extension `K^nr(π)`
///
/// Unscaled it extends the base valuation (`v(p) = 1`, `v(π) = 1/e`); the
/// pipeline scales it by `e` so the uniformizer gets value 1.
#[derive(Debug, Clone)]
pub struct PiAdicValuation {
    base: UnramifiedValuation,
    ramification: u64,
    factor: BigRational,
}

impl PiAdicValuation {
    /// Unscaled valuation for a totally ramified extension of index `e`
    pub fn new(base: UnramifiedValuation, ramification: u64) -> Self {
        Self {
            base,
            ramification,
            factor: BigRational::from_integer(BigInt::from(1)),
        }
    }

    /// The ramification index `e`
    pub fn ramification(&self) -> u64 {
        self.ramification
    }
}

impl ExtensionValuation for PiAdicValuation {
    fn scale(&self, factor: &BigRational) -> Self {
        Self {
            base: self.base.clone(),
            ramification: self.ramification,
            factor: &self.factor * factor,
        }
    }

    fn uniformizer_value(&self) -> Value {
        let e = BigRational::from_integer(BigInt::from(self.ramification));
        Value::Finite(&self.factor * &e.recip())
    }

    fn value(&self, element: &NfPoly) -> Value {
        let e = BigRational::from_integer(BigInt::from(self.ramification));
        let mut best = Value::Infinity;
        for (j, coeff) in element.coeffs().iter().enumerate() {
            let base_value = self.base.value(coeff);
            let shift = Value::Finite(BigRational::from_integer(BigInt::from(j)) / &e);
            let term = &base_value + &shift;
            if term < best {
                best = term;
            }
        }
        best.scale(&self.factor)
    }
}
