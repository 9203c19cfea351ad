//! User-facing lattice parameters. Nothing here is checked until [`LatticeParameters::validate`]
//! is called, which turns the parameters into a [`Lattice2D`] or reports the first problem found.

use std::f64::consts::PI;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use crate::lattice::{Lattice2D, LatticeError};

/// The smallest point count accepted. 4 points would be a single cell with nothing around it.
pub const MIN_POINT_COUNT: usize = 9;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// The inputs describing a lattice: the magnitudes of the two primitive vectors, the angle between
/// them, whether to add centering points, and how many points to lay out.
///
/// Deserializes from partial JSON: missing fields take their [`Default`] value.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParameters {
    #[serde(deserialize_with = "magnitude")]
    a: f64,
    #[serde(deserialize_with = "magnitude")]
    b: f64,
    angle: f64,
    #[serde(alias = "unit")]
    angle_unit: AngleUnit,
    centered: bool,
    #[serde(alias = "n", alias = "points")]
    point_count: usize,
}

/// Reads a length, dropping its sign.
fn magnitude<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(f64::abs)
}

impl Default for LatticeParameters {
    fn default() -> Self {
        Self {
            a: 1.,
            b: 1.,
            angle: 120.,
            angle_unit: AngleUnit::Degrees,
            centered: false,
            point_count: 16,
        }
    }
}

impl LatticeParameters {
    /// New parameters. Negative magnitudes are taken as their absolute value.
    pub fn new(
        a: f64,
        b: f64,
        angle: f64,
        angle_unit: AngleUnit,
        centered: bool,
        point_count: usize,
    ) -> Self {
        Self {
            a: a.abs(),
            b: b.abs(),
            angle,
            angle_unit,
            centered,
            point_count,
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

    /// The angle as entered, in [`Self::angle_unit`].
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    pub fn centered(&self) -> bool {
        self.centered
    }

    /// The point count as entered. See [`Self::validated_point_count`].
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn with_a(self, a: f64) -> Self {
        Self { a: a.abs(), ..self }
    }

    pub fn with_b(self, b: f64) -> Self {
        Self { b: b.abs(), ..self }
    }

    pub fn with_angle(self, angle: f64, angle_unit: AngleUnit) -> Self {
        Self {
            angle,
            angle_unit,
            ..self
        }
    }

    pub fn with_centered(self, centered: bool) -> Self {
        Self { centered, ..self }
    }

    pub fn with_point_count(self, point_count: usize) -> Self {
        Self {
            point_count,
            ..self
        }
    }

    /// The angle in radians. Errors if it is exactly 0 or exactly π, where the basis vectors are
    /// collinear. The comparison is exact: π + 1e-15 passes.
    pub fn effective_angle(&self) -> Result<f64, LatticeError> {
        let theta = match self.angle_unit {
            AngleUnit::Degrees => self.angle.to_radians(),
            AngleUnit::Radians => self.angle,
        };

        if theta == 0. || theta == PI {
            Err(LatticeError::InvalidAngle(theta))
        } else {
            Ok(theta)
        }
    }

    /// The point count, if it is a perfect square of at least [`MIN_POINT_COUNT`].
    pub fn validated_point_count(&self) -> Result<usize, LatticeError> {
        let root = (self.point_count as f64).sqrt().round() as usize;
        let square = root.checked_mul(root) == Some(self.point_count);
        if square && self.point_count >= MIN_POINT_COUNT {
            Ok(self.point_count)
        } else {
            Err(LatticeError::InvalidPointCount {
                count: self.point_count,
                min: MIN_POINT_COUNT,
            })
        }
    }

    /// The angle in degrees, for display. Uses the entered value directly when it was entered in
    /// degrees.
    pub fn angle_degrees(&self) -> f64 {
        match self.angle_unit {
            AngleUnit::Degrees => self.angle,
            AngleUnit::Radians => self.angle.to_degrees(),
        }
    }

    /// Checks the angle and the point count and produces the lattice they describe. Whether the
    /// lattice is one of the five named types is a separate question: see
    /// [`Lattice2D::lattice_type`].
    #[instrument(level = "debug")]
    pub fn validate(&self) -> Result<Lattice2D, LatticeError> {
        let theta = self.effective_angle()?;
        let count = self.validated_point_count()?;
        let stride = (count as f64).sqrt().round() as usize;
        debug!(theta, stride, "validated lattice parameters");

        Ok(Lattice2D::new_validated(
            self.a(),
            self.b(),
            theta,
            self.angle_degrees(),
            self.centered,
            stride,
        ))
    }
}
