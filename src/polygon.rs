//! Newton polygons
//!
//! The Newton polygon of a polynomial with respect to a valuation is the
//! lower convex hull of the points `(i, v(a_i))`. Points at infinity (zero
//! coefficients) do not constrain the hull and are dropped. Vertices run
//! left to right, so side slopes strictly increase; for a ramification
//! polynomial all slopes of interest are negative.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::valuation::Value;

/// A point of the polygon: integer abscissa, exact rational ordinate
pub type Point = (i64, BigRational);

/// Lower convex hull of a finite set of valuation points
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonPolygon {
    /// Hull vertices, strictly increasing abscissae, strictly convex
    vertices: Vec<Point>,
}

/// One side of a Newton polygon, between two adjacent vertices
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Side {
    /// Left vertex
    pub start: Point,
    /// Right vertex
    pub end: Point,
}

impl Side {
    /// Slope of the side (finite by construction)
    pub fn slope(&self) -> BigRational {
        let dy = &self.end.1 - &self.start.1;
        let dx = BigRational::from_integer(BigInt::from(self.end.0 - self.start.0));
        dy / dx
    }

    /// Horizontal length of the side
    pub fn length(&self) -> i64 {
        self.end.0 - self.start.0
    }
}

impl NewtonPolygon {
    /// Build the polygon from `(abscissa, value)` pairs
    ///
    /// Infinite values are skipped. Abscissae must be pairwise distinct.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (i64, Value)>,
    {
        let mut finite: Vec<Point> = points
            .into_iter()
            .filter_map(|(x, v)| v.as_finite().cloned().map(|y| (x, y)))
            .collect();
        finite.sort_by(|a, b| a.0.cmp(&b.0));

        let mut hull: Vec<Point> = Vec::with_capacity(finite.len());
        for point in finite {
            while hull.len() >= 2 {
                let o = &hull[hull.len() - 2];
                let a = &hull[hull.len() - 1];
                if cross(o, a, &point) <= BigRational::from_integer(BigInt::from(0)) {
                    hull.pop();
                } else {
                    break;
                }
            }
            hull.push(point);
        }
        Self { vertices: hull }
    }

    /// Hull vertices, left to right
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Sides between adjacent vertices, left to right (slopes increasing)
    pub fn sides(&self) -> Vec<Side> {
        self.vertices
            .windows(2)
            .map(|pair| Side {
                start: pair[0].clone(),
                end: pair[1].clone(),
            })
            .collect()
    }
}

/// z-component of `(a - o) × (b - o)`; positive for a left turn
fn cross(o: &Point, a: &Point, b: &Point) -> BigRational {
    let ax = BigRational::from_integer(BigInt::from(a.0 - o.0));
    let bx = BigRational::from_integer(BigInt::from(b.0 - o.0));
    let ay = &a.1 - &o.1;
    let by = &b.1 - &o.1;
    ax * by - ay * bx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: i64, y: i64) -> Point {
        (x, BigRational::from_integer(BigInt::from(y)))
    }

    fn points(values: &[(i64, i64)]) -> Vec<(i64, Value)> {
        values
            .iter()
            .map(|&(x, y)| (x, Value::from_integer(y)))
            .collect()
    }

    #[test]
    fn test_hull_of_kummer_sextic_points() {
        // valuation points of the ramification polynomial of x^6 - 3 over Q_3
        let np = NewtonPolygon::from_points(points(&[
            (0, 11),
            (1, 10),
            (2, 3),
            (3, 8),
            (4, 7),
            (5, 0),
        ]));
        assert_eq!(np.vertices(), &[vertex(0, 11), vertex(2, 3), vertex(5, 0)]);

        let sides = np.sides();
        assert_eq!(sides.len(), 2);
        assert_eq!(sides[0].slope(), BigRational::from_integer(BigInt::from(-4)));
        assert_eq!(sides[1].slope(), BigRational::from_integer(BigInt::from(-1)));
        assert_eq!(sides[0].length(), 2);
        assert_eq!(sides[1].length(), 3);
    }

    #[test]
    fn test_collinear_interior_points_are_dropped() {
        let np = NewtonPolygon::from_points(points(&[(0, 2), (1, 1), (2, 0)]));
        assert_eq!(np.vertices(), &[vertex(0, 2), vertex(2, 0)]);
        assert_eq!(np.sides().len(), 1);
    }

    #[test]
    fn test_infinite_points_do_not_constrain() {
        let np = NewtonPolygon::from_points(vec![
            (0, Value::from_integer(3)),
            (1, Value::Infinity),
            (2, Value::from_integer(0)),
        ]);
        assert_eq!(np.vertices(), &[vertex(0, 3), vertex(2, 0)]);
    }

    #[test]
    fn test_degenerate_polygons_have_no_sides() {
        let np = NewtonPolygon::from_points(points(&[(0, 0)]));
        assert_eq!(np.vertices().len(), 1);
        assert!(np.sides().is_empty());

        let empty = NewtonPolygon::from_points(std::iter::empty::<(i64, Value)>());
        assert!(empty.vertices().is_empty());
        assert!(empty.sides().is_empty());
    }
}
