//! Lattices in two dimensions. There is a similar dichotomy to the one between user input and
//! validated data elsewhere: [`crate::params::LatticeParameters`] is whatever the caller asked for,
//! and a [`Lattice2D`] is what survives validation. Every quantity derived from a [`Lattice2D`]
//! (basis vectors, cell area, lattice points) is infallible; the only thing that can still fail is
//! naming the lattice, because not every valid parallelogram is one of the five Bravais types.

use nalgebra::{Matrix2, Vector2};
use thiserror::Error;

use crate::bravais::{classify, LatticeType, Tolerance};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatticeError {
    #[error("The angle must not be 0 or 180 degrees: got {0} rad")]
    InvalidAngle(f64),
    #[error("The point count must be a square number greater than or equal to {min}: got {count}")]
    InvalidPointCount { count: usize, min: usize },
    #[error(
        "Invalid combination of a = {a}, b = {b}, angle = {theta} rad and centered = {centered}"
    )]
    InvalidLatticeCombination {
        a: f64,
        b: f64,
        theta: f64,
        centered: bool,
    },
    #[error("A unit cell needs at least 2 points per row and {needed} points: got stride {stride} and {len} points")]
    InsufficientPoints {
        stride: usize,
        len: usize,
        needed: usize,
    },
}

/// A validated 2D lattice: two magnitudes, the angle between the basis vectors, whether the lattice
/// carries body-centering points, and the number of points per row of the generated grid.
///
/// The first basis vector always lies along x. Out of every rotation of the lattice that satisfies
/// the parameters, this is the one that is upper triangular as a column matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice2D {
    /// |a|.
    a: f64,
    /// |b|.
    b: f64,
    /// The angle between a and b, in radians, strictly inside (0, π).
    theta: f64,
    /// The angle in degrees as it should be shown to people.
    angle_degrees: f64,
    centered: bool,
    /// Points per row of the primitive grid, the square root of the point count.
    stride: usize,
}

impl Lattice2D {
    /// Only [`crate::params::LatticeParameters::validate`] should build these.
    pub(crate) fn new_validated(
        a: f64,
        b: f64,
        theta: f64,
        angle_degrees: f64,
        centered: bool,
        stride: usize,
    ) -> Self {
        Self {
            a,
            b,
            theta,
            angle_degrees,
            centered,
            stride,
        }
    }

    /// Gets |a|.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Gets |b|.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Gets the angle between the basis vectors, in radians.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Gets the angle between the basis vectors in degrees. When the angle was entered in degrees
    /// this is exactly what was entered, so `120` stays `120` rather than `119.99999999999999`.
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    pub fn centered(&self) -> bool {
        self.centered
    }

    /// Points per row of the primitive grid.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The number of points in the primitive grid.
    pub fn point_count(&self) -> usize {
        self.stride * self.stride
    }

    /// The number of points [`crate::points::generate`] will produce, including centering points.
    pub fn total_point_count(&self) -> usize {
        if self.centered {
            self.point_count() + (self.stride - 1) * (self.stride - 1)
        } else {
            self.point_count()
        }
    }

    /// Gets the first primitive vector, (a, 0).
    pub fn a_vec(&self) -> Vector2<f64> {
        Vector2::new(self.a, 0.)
    }

    /// Gets the second primitive vector, (b cos θ, b sin θ).
    pub fn b_vec(&self) -> Vector2<f64> {
        let (sin_t, cos_t) = self.theta.sin_cos();
        Vector2::new(self.b * cos_t, self.b * sin_t)
    }

    /// Returns the basis as a matrix with the primitive vectors as columns, mapping fractional
    /// coordinates to Cartesian ones.
    pub fn basis(&self) -> Matrix2<f64> {
        Matrix2::from_columns(&[self.a_vec(), self.b_vec()])
    }

    /// Returns the area of the primitive cell, a b sin θ.
    pub fn unit_cell_area(&self) -> f64 {
        self.a * self.b * self.theta.sin()
    }

    /// Names the lattice, using exact comparisons.
    pub fn lattice_type(&self) -> Result<LatticeType, LatticeError> {
        self.lattice_type_with(Tolerance::EXACT)
    }

    /// Names the lattice, treating magnitudes and angles within `tol` of each other as equal.
    pub fn lattice_type_with(&self, tol: Tolerance) -> Result<LatticeType, LatticeError> {
        classify(self.a, self.b, self.theta, self.centered, tol)
    }
}
