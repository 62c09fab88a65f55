//! Defining polynomials of finite fields GF(p^n)
//!
//! The unramified extension of Q_p of residue degree n is presented by the
//! number field obtained from a degree-n irreducible polynomial over F_p,
//! lifted to Z. The search is deterministic: monic candidates are enumerated
//! with the constant coefficient varying fastest, and the first irreducible
//! one (by the Rabin test) wins, so repeated calls agree.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Monic degree-n polynomial over Z, irreducible modulo p
///
/// Coefficients ascend; the result has length `n + 1` and entries in `[0, p)`.
/// For `n = 1` the polynomial `x` is returned, matching the degree-1
/// presentation of Q itself.
pub fn defining_polynomial(p: &BigInt, n: u64) -> Vec<BigInt> {
    assert!(n >= 1, "residue degree must be positive");
    assert!(*p >= BigInt::from(2), "p must be a prime >= 2");
    if n == 1 {
        return vec![BigInt::zero(), BigInt::one()];
    }

    let n = n as usize;
    let mut lower = vec![BigInt::zero(); n];
    loop {
        // odometer step: constant coefficient varies fastest
        let mut carry = true;
        for digit in lower.iter_mut() {
            if !carry {
                break;
            }
            *digit += 1;
            if *digit == *p {
                digit.set_zero();
            } else {
                carry = false;
            }
        }
        assert!(!carry, "no irreducible polynomial found, p is not prime?");

        if lower[0].is_zero() {
            continue; // divisible by x
        }
        let mut candidate = lower.clone();
        candidate.push(BigInt::one());
        if is_irreducible(&candidate, p) {
            return candidate;
        }
    }
}

/// Rabin irreducibility test for a monic polynomial over F_p
fn is_irreducible(f: &[BigInt], p: &BigInt) -> bool {
    let n = (f.len() - 1) as u64;
    let x = vec![BigInt::zero(), BigInt::one()];

    // x^(p^n) must equal x modulo f
    let frobenius_n = pow_mod(&x, &big_pow(p, n), f, p);
    if trimmed(&frobenius_n) != trimmed(&x) {
        return false;
    }

    // for each prime q | n: gcd(x^(p^(n/q)) - x, f) must be constant
    for q in prime_divisors(n) {
        let power = pow_mod(&x, &big_pow(p, n / q), f, p);
        let diff = sub_mod(&power, &x, p);
        let g = gcd_mod(f, &diff, p);
        if degree(&g) > 0 {
            return false;
        }
    }
    true
}

fn big_pow(p: &BigInt, k: u64) -> BigInt {
    let mut result = BigInt::one();
    for _ in 0..k {
        result *= p;
    }
    result
}

fn trimmed(a: &[BigInt]) -> &[BigInt] {
    let mut len = a.len();
    while len > 0 && a[len - 1].is_zero() {
        len -= 1;
    }
    &a[..len]
}

fn degree(a: &[BigInt]) -> usize {
    trimmed(a).len().saturating_sub(1)
}

fn mul_mod(a: &[BigInt], b: &[BigInt], f: &[BigInt], p: &BigInt) -> Vec<BigInt> {
    let a = trimmed(a);
    let b = trimmed(b);
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut prod = vec![BigInt::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        if ai.is_zero() {
            continue;
        }
        for (j, bj) in b.iter().enumerate() {
            prod[i + j] = (&prod[i + j] + ai * bj) % p;
        }
    }
    rem_mod(&prod, f, p)
}

/// Remainder modulo a monic polynomial, coefficients reduced mod p
fn rem_mod(a: &[BigInt], f: &[BigInt], p: &BigInt) -> Vec<BigInt> {
    let n = f.len() - 1;
    let mut rem: Vec<BigInt> = a.iter().map(|c| ((c % p) + p) % p).collect();
    while trimmed(&rem).len() > n {
        let len = trimmed(&rem).len();
        let lead = rem[len - 1].clone();
        let shift = len - 1 - n;
        for (i, fi) in f.iter().take(n).enumerate() {
            let delta = (&lead * fi) % p;
            rem[shift + i] = ((&rem[shift + i] - delta) % p + p) % p;
        }
        rem[len - 1].set_zero();
    }
    rem.truncate(trimmed(&rem).len());
    rem
}

fn sub_mod(a: &[BigInt], b: &[BigInt], p: &BigInt) -> Vec<BigInt> {
    let len = a.len().max(b.len());
    let mut out = vec![BigInt::zero(); len];
    for (i, slot) in out.iter_mut().enumerate() {
        let ai = a.get(i).cloned().unwrap_or_else(BigInt::zero);
        let bi = b.get(i).cloned().unwrap_or_else(BigInt::zero);
        *slot = ((ai - bi) % p + p) % p;
    }
    out.truncate(trimmed(&out).len());
    out
}

fn pow_mod(base: &[BigInt], exp: &BigInt, f: &[BigInt], p: &BigInt) -> Vec<BigInt> {
    let mut result = vec![BigInt::one()];
    let mut base = rem_mod(base, f, p);
    let mut exp = exp.clone();
    let two = BigInt::from(2);
    while exp > BigInt::zero() {
        if &exp % &two == BigInt::one() {
            result = mul_mod(&result, &base, f, p);
        }
        base = mul_mod(&base, &base, f, p);
        exp = &exp / &two;
    }
    result
}

/// Euclidean gcd over F_p; the result is not normalized to monic
fn gcd_mod(a: &[BigInt], b: &[BigInt], p: &BigInt) -> Vec<BigInt> {
    let mut a = trimmed(a).to_vec();
    let mut b = trimmed(b).to_vec();
    while !b.is_empty() {
        let rem = euclid_rem(&a, &b, p);
        a = b;
        b = rem;
    }
    a
}

fn euclid_rem(a: &[BigInt], b: &[BigInt], p: &BigInt) -> Vec<BigInt> {
    let b = trimmed(b);
    let lead_inv = b[b.len() - 1].modpow(&(p - BigInt::from(2)), p);
    let mut rem = a.to_vec();
    while trimmed(&rem).len() >= b.len() {
        let len = trimmed(&rem).len();
        let factor = (&rem[len - 1] * &lead_inv) % p;
        let shift = len - b.len();
        for (i, bi) in b.iter().enumerate() {
            let delta = (&factor * bi) % p;
            rem[shift + i] = ((&rem[shift + i] - delta) % p + p) % p;
        }
        rem.truncate(trimmed(&rem).len());
        if rem.is_empty() {
            break;
        }
    }
    rem
}

fn prime_divisors(mut n: u64) -> Vec<u64> {
    let mut divisors = Vec::new();
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            divisors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        divisors.push(n);
    }
    divisors
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ints(coeffs: &[i64]) -> Vec<BigInt> {
        coeffs.iter().map(|&c| BigInt::from(c)).collect()
    }

    #[test_case(2, 2, &[1, 1, 1]; "gf4 is x^2+x+1")]
    #[test_case(2, 3, &[1, 1, 0, 1]; "gf8 is x^3+x+1")]
    #[test_case(3, 2, &[1, 0, 1]; "gf9 is x^2+1")]
    #[test_case(3, 3, &[1, 2, 0, 1]; "gf27 is x^3+2x+1")]
    #[test_case(5, 2, &[2, 0, 1]; "gf25 is x^2+2")]
    fn test_defining_polynomial(p: i64, n: u64, expected: &[i64]) {
        assert_eq!(defining_polynomial(&BigInt::from(p), n), ints(expected));
    }

    #[test]
    fn test_degree_one_is_x() {
        assert_eq!(defining_polynomial(&BigInt::from(7), 1), ints(&[0, 1]));
    }

    #[test]
    fn test_search_is_deterministic() {
        let p = BigInt::from(3);
        assert_eq!(defining_polynomial(&p, 4), defining_polynomial(&p, 4));
    }

    #[test]
    fn test_rejects_polynomial_with_root() {
        // x^3 + x + 1 has the root 1 over F_3
        assert!(!is_irreducible(&ints(&[1, 1, 0, 1]), &BigInt::from(3)));
    }

    #[test]
    fn test_accepts_known_irreducible() {
        assert!(is_irreducible(&ints(&[1, 2, 0, 1]), &BigInt::from(3)));
    }
}
