//! Two-dimensional Bravais lattices: validating lattice parameters, naming the lattice, and laying
//! out its points for display.
//!
//! ```
//! use bravais::{generate, AngleUnit, LatticeParameters, LatticeType};
//!
//! let lattice = LatticeParameters::new(2., 1., 90., AngleUnit::Degrees, true, 25)
//!     .validate()
//!     .unwrap();
//! assert_eq!(lattice.lattice_type(), Ok(LatticeType::CenteredRectangular));
//! assert_eq!(generate(&lattice).len(), 25 + 16);
//! ```

pub mod bravais;
pub mod lattice;
pub mod markup;
pub mod params;
pub mod parsing;
pub mod plot;
pub mod points;
pub mod symbols;

pub use bravais::{classify, LatticeType, Tolerance};
pub use lattice::{Lattice2D, LatticeError};
pub use params::{AngleUnit, LatticeParameters};
pub use plot::{render, LatticePlot, PlotError, PlotOptions, PlotSink, RecordingSink, TableSink};
pub use points::{generate, unit_cell_outline, LatticePoints};
