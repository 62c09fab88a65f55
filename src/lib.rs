//! # Ramification filtrations of p-adic Galois extensions
//!
//! This library computes the jumps of the higher ramification filtration of a
//! weak Galois extension `L/K` of p-adic fields, in lower and upper numbering,
//! from the Newton polygon of the *ramification polynomial*
//!
//! ```text
//! G(x) = P1(x + π) / x
//! ```
//!
//! where `π` is a prime element generating `L` and `P1` is its minimal
//! polynomial over the maximal unramified subextension `K^nr`.
//!
//! ## Pipeline
//!
//! 1. **Splitting field**: obtain `L` as a weak splitting field of the input
//!    polynomials, enlarged until the requested minimal ramification divides
//!    `e(L/K)`
//! 2. **Factor recovery**: refine a MacLane approximant over `K^nr` until its
//!    key polynomial is the degree-`e` factor `P1`
//! 3. **Polygon**: evaluate the scaled limit valuation on the coefficients of
//!    `G` and take the lower convex hull
//! 4. **Jumps**: read `(slope, vertex)` pairs off the polygon sides and apply
//!    the Herbrand transform for upper numbering
//!
//! The p-adic fields themselves and the general MacLane valuation machinery
//! are collaborators behind narrow traits ([`PAdicBaseField`],
//! [`ValuationEngine`]); this crate ships exact implementations for extensions
//! presented by an Eisenstein generator, which is enough to reproduce entries
//! of the database of local fields:
//!
//! ```
//! use std::sync::Arc;
//! use herbrand::{EisensteinEngine, PresentedCompletion, WeakExtension};
//!
//! // The weak splitting field of x^6 + 6x^4 + 6x^3 + 18 over Q_3, presented
//! // by the Eisenstein generator x^6 + 3x^2 + 3.
//! let target = PresentedCompletion::eisenstein(3, &[3, 0, 3, 0, 0, 0, 1]).unwrap();
//! let base = Arc::new(PresentedCompletion::rationals(3).with_splitting_field(target));
//! let f = base.polynomial_over_rationals(&[18, 0, 0, 6, 6, 0, 1]);
//!
//! let ext = WeakExtension::new(base, &[f], 1, EisensteinEngine).unwrap();
//! let upper: Vec<String> = ext.upper_jumps().unwrap().iter().map(|u| u.to_string()).collect();
//! assert_eq!(upper, ["0", "1/2"]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements a stage of the pipeline
pub mod algebra;    // Number fields and exact polynomial arithmetic
pub mod valuation;  // Valuation values, p-adic valuations, MacLane interfaces
pub mod polygon;    // Newton polygons (lower convex hulls)
pub mod extension;  // Weak Galois extensions and jump extraction

// Re-exports for convenience
pub use algebra::{NfElement, NfPoly, NumberField};
pub use extension::{
    Convergence, Filtration, Jump, PAdicBaseField, PresentedCompletion, RamificationPolygon,
    WeakExtension,
};
pub use polygon::{NewtonPolygon, Side};
pub use valuation::{
    ApproximantSearch, EisensteinEngine, ExtensionValuation, MacLaneApproximant, PiAdicValuation,
    UnramifiedValuation, Value, ValuationEngine,
};

use num_bigint::BigInt;
use thiserror::Error;

/// Errors surfaced by extension construction and the polygon pipeline
#[derive(Error, Debug)]
pub enum RamificationError {
    /// The base field was not Q_p (required precondition)
    #[error("base field must be Q_p, got an extension of absolute degree {0}")]
    NotPrimeBaseField(u64),

    /// The requested minimal ramification shares a factor with p
    #[error("minimal ramification {minimal_ramification} is not coprime to the prime {prime}")]
    RamificationNotCoprime {
        /// Requested minimal ramification
        minimal_ramification: u64,
        /// Residue characteristic of the base field
        prime: BigInt,
    },

    /// Degree bookkeeping failed after construction
    #[error("inconsistent invariants: [L:K] = {degree} but e·f = {product}")]
    DegreeMismatch {
        /// Total degree reported by the splitting-field collaborator
        degree: u64,
        /// Product of ramification index and inertia degree
        product: u64,
    },

    /// A collaborator reported invariants whose ratio is not integral
    #[error("collaborator returned a non-integral invariant ratio: {0}")]
    NonIntegralRatio(String),

    /// The refined key polynomial does not match the ramification degree
    #[error("refined factor has degree {actual}, expected ramification degree {expected}")]
    FactorDegreeMismatch {
        /// Expected degree (the ramification index)
        expected: u64,
        /// Degree of the key polynomial actually produced
        actual: u64,
    },

    /// The approximant search returned an empty family
    #[error("valuation engine returned no approximant")]
    NoApproximant,

    /// The valuation engine rejected its input
    #[error("valuation engine failed: {0}")]
    Engine(String),

    /// A polynomial argument violated a structural requirement
    #[error("invalid polynomial: {0}")]
    InvalidPolynomial(String),

    /// An extension operation outside the supported presentations
    #[error("unsupported extension operation: {0}")]
    UnsupportedExtension(String),

    /// Ramification subfields are a declared extension point, not implemented
    #[error("ramification subfield computation is not supported")]
    SubfieldsUnsupported,
}
