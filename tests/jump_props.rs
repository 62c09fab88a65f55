//! Property tests for the polygon hull and the jump transforms

use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;

use herbrand::extension::{lower_jumps, upper_from_lower};
use herbrand::{Jump, NewtonPolygon, Value};

fn rational(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

proptest! {
    #[test]
    fn upper_transform_preserves_shape(
        e in 10u64..60,
        raw_jumps in proptest::collection::btree_set(0u32..200, 1..6),
    ) {
        let jumps: Vec<u32> = raw_jumps.into_iter().collect();
        let lower: Vec<Jump> = jumps
            .iter()
            .enumerate()
            .map(|(i, &u)| Jump {
                jump: rational(i64::from(u)),
                // strictly decreasing orders, starting at the full group
                order: e - i as u64,
            })
            .collect();

        let upper = upper_from_lower(&lower, e);

        prop_assert_eq!(upper.len(), lower.len());
        for (low, up) in lower.iter().zip(&upper) {
            // orders survive untouched, values never grow
            prop_assert_eq!(up.order, low.order);
            prop_assert!(up.jump <= low.jump);
        }
        for pair in upper.windows(2) {
            prop_assert!(pair[0].jump < pair[1].jump, "transform must be monotonic");
        }
        // φ(u_0) = u_0 · g_0 / e
        let expected_first =
            &lower[0].jump * rational(lower[0].order as i64) / rational(e as i64);
        prop_assert_eq!(upper[0].jump.clone(), expected_first);
    }

    #[test]
    fn empty_filtration_stays_empty(e in 1u64..100) {
        prop_assert!(upper_from_lower(&[], e).is_empty());
    }

    #[test]
    fn trivial_ramification_has_no_jumps(
        points in proptest::collection::btree_map(0i64..20, -40i64..40, 1..8),
    ) {
        let np = NewtonPolygon::from_points(
            points.iter().map(|(&x, &y)| (x, Value::from_integer(y))),
        );
        prop_assert!(lower_jumps(&np, 1).is_empty());
    }

    #[test]
    fn hull_lies_on_or_below_all_points(
        points in proptest::collection::btree_map(0i64..30, -50i64..50, 2..10),
    ) {
        let np = NewtonPolygon::from_points(
            points.iter().map(|(&x, &y)| (x, Value::from_integer(y))),
        );

        // extreme abscissae are always vertices of the lower hull
        let first = np.vertices().first().unwrap();
        let last = np.vertices().last().unwrap();
        prop_assert_eq!(first.0, *points.keys().min().unwrap());
        prop_assert_eq!(last.0, *points.keys().max().unwrap());

        // slopes strictly increase left to right
        let sides = np.sides();
        for pair in sides.windows(2) {
            prop_assert!(pair[0].slope() < pair[1].slope());
        }

        // no input point lies strictly below the hull
        for (&x, &y) in &points {
            let y = rational(y);
            for side in &sides {
                if side.start.0 <= x && x <= side.end.0 {
                    let run = rational(x - side.start.0);
                    let hull_y = &side.start.1 + side.slope() * run;
                    prop_assert!(y >= hull_y, "point ({}, {}) below hull", x, y);
                }
            }
        }
    }

    #[test]
    fn extracted_jumps_are_well_formed(
        points in proptest::collection::btree_map(0i64..12, 0i64..60, 2..8),
        e in 2u64..30,
    ) {
        let np = NewtonPolygon::from_points(
            points.iter().map(|(&x, &y)| (x, Value::from_integer(y))),
        );
        let lower = lower_jumps(&np, e);
        for pair in lower.windows(2) {
            prop_assert!(pair[0].jump < pair[1].jump);
        }
        let upper = upper_from_lower(&lower, e);
        prop_assert_eq!(upper.len(), lower.len());
    }
}
