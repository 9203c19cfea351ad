//! Laying out lattice points for display. The primitive grid is `p × p` integer combinations of
//! the basis vectors, row by row. A centered lattice then appends the `(p - 1) × (p - 1)`
//! half-integer combinations, one in the middle of every primitive cell.

use nalgebra::{Point2, Vector2};
use tracing::{instrument, trace};

use crate::lattice::{Lattice2D, LatticeError};

/// The generated points of a lattice, in generation order. The first `stride²` points are the
/// primitive grid and anything after that is a centering point.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticePoints {
    points: Vec<Point2<f64>>,
    stride: usize,
}

impl LatticePoints {
    /// All points, primitive grid first.
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points per row of the primitive grid.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The integer combinations.
    pub fn primitive(&self) -> &[Point2<f64>] {
        &self.points[..self.stride * self.stride]
    }

    /// The half-integer combinations. Empty unless the lattice is centered.
    pub fn centering(&self) -> &[Point2<f64>] {
        &self.points[self.stride * self.stride..]
    }

    /// The points as (x, y) pairs.
    pub fn coordinates(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.x, p.y))
    }

    /// The closed outline of the cell at the origin. See [`unit_cell_outline`].
    pub fn unit_cell(&self) -> Result<[Point2<f64>; 5], LatticeError> {
        unit_cell_outline(&self.points, self.stride)
    }
}

/// Appends `offset + (i, j)` for `i, j` in `0..n`, mapped through the basis. `j` is the outer loop,
/// so consecutive points walk along a.
fn push_grid(out: &mut Vec<Point2<f64>>, lattice: &Lattice2D, n: usize, offset: f64) {
    let m = lattice.basis();
    for j in 0..n {
        for i in 0..n {
            let frac = Vector2::new(i as f64 + offset, j as f64 + offset);
            out.push(Point2::from(m * frac));
        }
    }
}

/// Generates every point of the lattice. Deterministic: the same lattice always gives the same
/// points in the same order.
#[instrument(level = "debug", skip(lattice), fields(stride = lattice.stride(), centered = lattice.centered()))]
pub fn generate(lattice: &Lattice2D) -> LatticePoints {
    let p = lattice.stride();
    let mut points = Vec::with_capacity(lattice.total_point_count());

    push_grid(&mut points, lattice, p, 0.);
    trace!(count = points.len(), "primitive grid");

    if lattice.centered() {
        push_grid(&mut points, lattice, p - 1, 0.5);
        trace!(count = points.len() - p * p, "centering points");
    }

    LatticePoints { points, stride: p }
}

/// Returns the closed path around the first cell of a row-major grid with `stride` points per row:
/// the origin, one step along a, one step along each, one step along b, and back to the origin.
pub fn unit_cell_outline(
    points: &[Point2<f64>],
    stride: usize,
) -> Result<[Point2<f64>; 5], LatticeError> {
    let needed = stride + 2;
    if stride < 2 || points.len() < needed {
        return Err(LatticeError::InsufficientPoints {
            stride,
            len: points.len(),
            needed,
        });
    }

    Ok([
        points[0],
        points[1],
        points[1 + stride],
        points[stride],
        points[0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AngleUnit, LatticeParameters};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lattice(a: f64, b: f64, angle: f64, centered: bool, count: usize) -> Lattice2D {
        LatticeParameters::new(a, b, angle, AngleUnit::Degrees, centered, count)
            .validate()
            .unwrap()
    }

    #[test]
    fn test_square_grid_order() {
        let pts = generate(&lattice(2., 2., 90., false, 9));
        let coords: Vec<(f64, f64)> = pts
            .coordinates()
            .map(|(x, y)| ((x * 1e9).round() / 1e9, (y * 1e9).round() / 1e9))
            .collect();
        assert_eq!(
            coords,
            vec![
                (0., 0.),
                (2., 0.),
                (4., 0.),
                (0., 2.),
                (2., 2.),
                (4., 2.),
                (0., 4.),
                (2., 4.),
                (4., 4.),
            ]
        );
        assert!(pts.centering().is_empty());
    }

    #[test]
    fn test_twenty_five_points_and_cell() {
        let pts = generate(&lattice(1., 1., 120., false, 25));
        assert_eq!(pts.len(), 25);
        let p = pts.as_slice();
        assert_eq!(pts.unit_cell().unwrap(), [p[0], p[1], p[6], p[5], p[0]]);
    }

    #[test]
    fn test_unit_cell_spans_basis() {
        let lat = lattice(3., 1.5, 70., false, 16);
        let cell = generate(&lat).unit_cell().unwrap();
        assert_eq!(cell[0], Point2::origin());
        assert_eq!(cell[4], Point2::origin());
        assert_relative_eq!(cell[1].coords, lat.a_vec(), epsilon = 1e-12);
        assert_relative_eq!(cell[2].coords, lat.a_vec() + lat.b_vec(), epsilon = 1e-12);
        assert_relative_eq!(cell[3].coords, lat.b_vec(), epsilon = 1e-12);
    }

    #[test]
    fn test_centered_points() {
        let lat = lattice(2., 1., 90., true, 9);
        let pts = generate(&lat);
        assert_eq!(pts.len(), 9 + 4);
        assert_eq!(pts.primitive().len(), 9);

        let expected = [(1., 0.5), (3., 0.5), (1., 1.5), (3., 1.5)];
        assert_eq!(pts.centering().len(), expected.len());
        for (pt, (x, y)) in pts.centering().iter().zip(expected) {
            assert_relative_eq!(pt.x, x, epsilon = 1e-12);
            assert_relative_eq!(pt.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_outline_needs_two_per_row() {
        let pts = vec![Point2::origin(); 10];
        assert_eq!(
            unit_cell_outline(&pts, 1),
            Err(LatticeError::InsufficientPoints {
                stride: 1,
                len: 10,
                needed: 3
            })
        );
        assert!(unit_cell_outline(&pts[..4], 3).is_err());
        assert!(unit_cell_outline(&pts[..5], 3).is_ok());
        assert!(unit_cell_outline(&[], 0).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]
        #[test]
        fn test_point_counts(
            p in 3usize..15,
            a in 0.1f64..=10f64,
            b in 0.1f64..=10f64,
            angle in 1f64..179f64,
            centered in any::<bool>(),
        ) {
            let lat = lattice(a, b, angle, centered, p * p);
            let pts = generate(&lat);
            let expected = if centered { p * p + (p - 1) * (p - 1) } else { p * p };
            prop_assert_eq!(pts.len(), expected);
            prop_assert_eq!(pts.len(), lat.total_point_count());
            prop_assert_eq!(pts.primitive().len(), p * p);
            prop_assert!(pts.unit_cell().is_ok());
        }

        #[test]
        fn test_generation_is_idempotent(
            p in 3usize..10,
            a in 0.1f64..=10f64,
            b in 0.1f64..=10f64,
            angle in 1f64..179f64,
            centered in any::<bool>(),
        ) {
            let lat = lattice(a, b, angle, centered, p * p);
            prop_assert_eq!(generate(&lat), generate(&lat));
        }
    }
}
