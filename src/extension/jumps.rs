//! Jump extraction and the upper-numbering transform
//!
//! A side of the ramification polygon with slope `s` and right vertex `(x, y)`
//! contributes the jump `u = -s - 1` with subgroup order `x + 1`. Two
//! corrections apply:
//! - at `u = 0` the polygon cannot tell the inertia group Γ from Γ₀, so the
//!   order is the full ramification degree;
//! - a leading `u = 0` entry that repeats the following order is an artifact
//!   of the polygon's left edge, not a jump, and is dropped.
//!
//! Upper numbering is the Herbrand-style cumulative sum
//! `φ(u_i) = φ(u_{i-1}) + (u_i - u_{i-1})·g_i/e` with `φ` extended by
//! `φ(u_0) = u_0·g_0/e`.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::polygon::NewtonPolygon;

/// One jump of the ramification filtration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Jump {
    /// The jump value (lower or upper numbering, depending on context)
    pub jump: BigRational,
    /// Order of the ramification subgroup at this jump
    pub order: u64,
}

/// An ordered list of jumps, increasing in the jump value
pub type Filtration = Vec<Jump>;

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.jump, self.order)
    }
}

/// Lower-numbering jumps read off the polygon sides
///
/// The polygon lists sides by decreasing jump, so the collected pairs are
/// reversed before the artifact check.
pub fn lower_jumps(polygon: &NewtonPolygon, ramification_degree: u64) -> Filtration {
    if ramification_degree == 1 {
        return Vec::new();
    }
    let mut jumps: Filtration = polygon
        .sides()
        .iter()
        .map(|side| {
            // jump = -slope - 1
            let u = -side.slope() - BigRational::one();
            let order = if u.is_zero() {
                // G does not distinguish Gamma and Gamma_0
                ramification_degree
            } else {
                debug_assert!(side.end.0 >= 0);
                (side.end.0 + 1) as u64
            };
            Jump { jump: u, order }
        })
        .collect();
    jumps.reverse();
    if jumps.len() >= 2 && jumps[0].order == jumps[1].order {
        // u = 0 is not a jump here
        jumps.remove(0);
    }
    jumps
}

/// Upper-numbering jumps from the lower-numbering filtration
///
/// Orders are preserved; an empty filtration stays empty.
pub fn upper_from_lower(lower: &[Jump], ramification_degree: u64) -> Filtration {
    if lower.is_empty() {
        return Vec::new();
    }
    let e = BigRational::from_integer(BigInt::from(ramification_degree));
    let mut upper = Vec::with_capacity(lower.len());

    let mut phi = &lower[0].jump * BigRational::from_integer(BigInt::from(lower[0].order)) / &e;
    upper.push(Jump {
        jump: phi.clone(),
        order: lower[0].order,
    });
    for pair in lower.windows(2) {
        let g = BigRational::from_integer(BigInt::from(pair[1].order));
        phi += (&pair[1].jump - &pair[0].jump) * g / &e;
        upper.push(Jump {
            jump: phi.clone(),
            order: pair[1].order,
        });
    }
    upper
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::Value;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn jump(n: i64, d: i64, order: u64) -> Jump {
        Jump {
            jump: rat(n, d),
            order,
        }
    }

    fn polygon(points: &[(i64, i64)]) -> NewtonPolygon {
        NewtonPolygon::from_points(points.iter().map(|&(x, y)| (x, Value::from_integer(y))))
    }

    #[test]
    fn test_lower_jumps_of_kummer_sextic() {
        // slopes -4 and -1: jumps 3 and 0, increasing order after reversal
        let np = polygon(&[(0, 11), (1, 10), (2, 3), (3, 8), (4, 7), (5, 0)]);
        assert_eq!(lower_jumps(&np, 6), vec![jump(0, 1, 6), jump(3, 1, 3)]);
    }

    #[test]
    fn test_trivial_ramification_has_no_jumps() {
        let np = polygon(&[(0, 0)]);
        assert!(lower_jumps(&np, 1).is_empty());
    }

    #[test]
    fn test_zero_jump_records_full_inertia_order() {
        // single side of slope -1: u = 0, order must be e, not end.x + 1
        let np = polygon(&[(0, 1), (1, 0)]);
        assert_eq!(lower_jumps(&np, 2), vec![jump(0, 1, 2)]);
    }

    #[test]
    fn test_leading_artifact_is_dropped() {
        // sides of slopes -2 and -1 give orders 3 and e = 3: the u = 0 entry
        // repeats the next order and is not a genuine jump
        let np = polygon(&[(0, 5), (2, 1), (3, 0)]);
        assert_eq!(lower_jumps(&np, 3), vec![jump(1, 1, 3)]);
    }

    #[test]
    fn test_upper_transform_of_documented_example() {
        let lower = vec![jump(0, 1, 6), jump(1, 1, 3)];
        assert_eq!(
            upper_from_lower(&lower, 6),
            vec![jump(0, 1, 6), jump(1, 2, 3)]
        );
    }

    #[test]
    fn test_upper_transform_of_kummer_sextic() {
        let lower = vec![jump(0, 1, 6), jump(3, 1, 3)];
        assert_eq!(
            upper_from_lower(&lower, 6),
            vec![jump(0, 1, 6), jump(3, 2, 3)]
        );
    }

    #[test]
    fn test_upper_transform_fixes_single_tame_jump() {
        assert_eq!(upper_from_lower(&[jump(2, 1, 2)], 2), vec![jump(2, 1, 2)]);
    }

    #[test]
    fn test_upper_transform_of_empty_is_empty() {
        assert!(upper_from_lower(&[], 6).is_empty());
    }
}
