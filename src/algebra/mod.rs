//! Exact algebra layer
//!
//! Number fields `Q[z]/(g)` with arbitrary-precision rational coefficients,
//! dense univariate polynomials over them, and defining polynomials for
//! finite fields (used to present unramified extensions):
//! - [`NumberField`] / [`NfElement`] - simple extensions of Q
//! - [`NfPoly`] - dense polynomials, including the ramification quotient
//!   `P(x + π)/x`
//! - [`defining_polynomial`] - deterministic GF(p^n) defining polynomial

mod finite_field;
mod number_field;
mod polynomial;

pub use finite_field::defining_polynomial;
pub use number_field::{NfElement, NumberField};
pub use polynomial::NfPoly;
