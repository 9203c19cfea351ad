//! The five 2D Bravais lattices and the decision procedure that tells them apart.

use std::{f64::consts::PI, fmt::Display};

use approx::abs_diff_eq;
use serde::{Deserialize, Serialize};

use crate::lattice::LatticeError;

/// A 2D Bravais lattice type. Every 2D lattice is one of these, although a particular choice of
/// basis vectors may not make that obvious: see [`classify`] for what is actually recognized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatticeType {
    Oblique,
    Rectangular,
    CenteredRectangular,
    Hexagonal,
    Square,
}

impl LatticeType {
    pub const ALL: [LatticeType; 5] = [
        Self::Oblique,
        Self::Rectangular,
        Self::CenteredRectangular,
        Self::Hexagonal,
        Self::Square,
    ];

    /// The name as it appears in a title.
    pub fn name(&self) -> &'static str {
        match *self {
            Self::Oblique => "Oblique",
            Self::Rectangular => "Rectangular",
            Self::CenteredRectangular => "Centered Rectangular",
            Self::Hexagonal => "Hexagonal",
            Self::Square => "Square",
        }
    }

    /// Whether the conventional cell carries an extra point at its center.
    pub fn is_centered(&self) -> bool {
        matches!(self, Self::CenteredRectangular)
    }
}

impl Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How close two magnitudes or two angles must be to count as equal during classification.
///
/// [`Tolerance::EXACT`] is the default and compares with plain `==`, so `a = 1` and
/// `b = 1.0000000001` are an oblique lattice and 89.9999999° is not a right angle. Callers whose
/// inputs come out of other calculations can widen this, which moves the classification
/// boundaries: a looser tolerance turns near-square oblique lattices into squares.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const EXACT: Tolerance = Tolerance(0.);

    /// An absolute tolerance, applied to magnitudes and to angles in radians.
    pub fn absolute(epsilon: f64) -> Self {
        Self(epsilon.abs())
    }

    pub fn epsilon(&self) -> f64 {
        self.0
    }

    fn same(&self, x: f64, y: f64) -> bool {
        abs_diff_eq!(x, y, epsilon = self.0)
    }
}

/// Names the lattice with magnitudes `a`, `b` and angle `theta` (radians) between the basis
/// vectors. The first matching rule wins:
///
/// | a, b  | θ            | centered | type                   |
/// |-------|--------------|----------|------------------------|
/// | a ≠ b | θ ≠ π/2      | no       | oblique                |
/// | a ≠ b | π/2          | yes      | centered rectangular   |
/// | a ≠ b | π/2          | no       | rectangular            |
/// | a = b | π/3 or 2π/3  | no       | hexagonal              |
/// | a = b | π/2          | no       | square                 |
///
/// Anything else errors. Centering is only recognized on rectangular geometry, so a centered
/// square or a centered oblique lattice is rejected rather than reinterpreted.
pub fn classify(
    a: f64,
    b: f64,
    theta: f64,
    centered: bool,
    tol: Tolerance,
) -> Result<LatticeType, LatticeError> {
    // These are written out rather than taken from FRAC_PI_3 and friends: degree inputs go through
    // x * (π / 180), and only the computed quotients line up with that bit for bit.
    let right = PI / 2.;
    let third = PI / 3.;
    let two_thirds = 2. * PI / 3.;

    let same_length = tol.same(a, b);
    let is_right = tol.same(theta, right);
    let is_hex = tol.same(theta, third) || tol.same(theta, two_thirds);

    match (same_length, is_right, is_hex, centered) {
        (false, false, _, false) => Ok(LatticeType::Oblique),
        (false, true, _, true) => Ok(LatticeType::CenteredRectangular),
        (false, true, _, false) => Ok(LatticeType::Rectangular),
        (true, _, true, false) => Ok(LatticeType::Hexagonal),
        (true, true, _, false) => Ok(LatticeType::Square),
        _ => Err(LatticeError::InvalidLatticeCombination {
            a,
            b,
            theta,
            centered,
        }),
    }
}
