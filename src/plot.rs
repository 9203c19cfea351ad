//! The hand-off to whatever draws the lattice. A [`LatticePlot`] is everything a scatter plot
//! needs: a title, the points, and the closed outline of one unit cell. A [`PlotSink`] consumes it.
//! Building the plot never draws anything; [`render`] is the one place that does both.

use std::io::Write;

use nalgebra::Point2;
use tabled::{settings::Style, Table, Tabled};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    bravais::{LatticeType, Tolerance},
    lattice::{Lattice2D, LatticeError},
    markup::{Block, Render, RenderMode, TitleLines},
    points::{generate, LatticePoints},
    symbols::{DEGREE, THETA},
};

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error("Could not write plot: {0}")]
    Io(#[from] std::io::Error),
}

/// What goes into a plot besides the points themselves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlotOptions {
    /// Adds a line with |a|, |b| and θ to the title.
    pub show_parameters: bool,
    /// Adds a reminder that the two axes may not share a scale.
    pub show_scaling_note: bool,
    /// Used to name the lattice.
    pub tolerance: Tolerance,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            show_parameters: true,
            show_scaling_note: true,
            tolerance: Tolerance::EXACT,
        }
    }
}

/// The title of a lattice plot: the lattice type, then optionally the parameters and a note about
/// axis scaling, one per line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTitle {
    lattice_type: LatticeType,
    a: f64,
    b: f64,
    angle_degrees: f64,
    options: PlotOptions,
}

impl PlotTitle {
    pub fn new(lattice: &Lattice2D, lattice_type: LatticeType, options: PlotOptions) -> Self {
        Self {
            lattice_type,
            a: lattice.a(),
            b: lattice.b(),
            angle_degrees: lattice.angle_degrees(),
            options,
        }
    }

    fn heading(&self) -> Block {
        Block::text(format!("Bravais Lattice: {}", self.lattice_type))
    }

    fn parameters(&self) -> Option<Block> {
        self.options.show_parameters.then(|| {
            Block::concat([
                Block::norm(Block::text("a")),
                Block::text(" = "),
                Block::number(self.a),
                Block::text(", "),
                Block::norm(Block::text("b")),
                Block::text(" = "),
                Block::number(self.b),
                Block::text(", "),
                THETA,
                Block::text(" = "),
                Block::number(self.angle_degrees),
                DEGREE,
            ])
        })
    }

    fn scaling_note(&self) -> Option<Block> {
        self.options
            .show_scaling_note
            .then(|| Block::text("(Axes may be scaled differently)"))
    }
}

impl<M: RenderMode> Render<M> for PlotTitle {
    fn render_lines<'a>(&self, out: &'a mut TitleLines<M>) -> &'a mut TitleLines<M> {
        let lines = (self.heading(), self.parameters(), self.scaling_note());
        Render::<M>::render_lines(&lines, out)
    }
}

/// Everything needed to draw a lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticePlot {
    pub title: String,
    pub lattice_type: LatticeType,
    pub lattice: Lattice2D,
    pub points: LatticePoints,
    /// Origin, a, a + b, b, origin.
    pub unit_cell: [Point2<f64>; 5],
}

impl LatticePlot {
    /// Names the lattice, lays out its points and renders the title in mode `M`.
    pub fn build<M: RenderMode>(
        lattice: &Lattice2D,
        options: PlotOptions,
    ) -> Result<Self, LatticeError> {
        let lattice_type = lattice.lattice_type_with(options.tolerance)?;
        let points = generate(lattice);
        let unit_cell = points.unit_cell()?;
        let title = Render::<M>::render_as_str(&PlotTitle::new(lattice, lattice_type, options));

        Ok(Self {
            title,
            lattice_type,
            lattice: *lattice,
            points,
            unit_cell,
        })
    }
}

/// Something that can draw a [`LatticePlot`]. Nothing drawn is ever read back.
pub trait PlotSink {
    fn draw(&mut self, plot: &LatticePlot) -> Result<(), PlotError>;
}

/// Builds the plot for `lattice` and hands it to `sink`.
#[instrument(level = "debug", skip_all, fields(stride = lattice.stride(), centered = lattice.centered()))]
pub fn render<M: RenderMode, S: PlotSink + ?Sized>(
    lattice: &Lattice2D,
    sink: &mut S,
    options: PlotOptions,
) -> Result<(), PlotError> {
    let plot = LatticePlot::build::<M>(lattice, options)?;
    debug!(
        lattice_type = %plot.lattice_type,
        points = plot.points.len(),
        "drawing lattice"
    );
    sink.draw(&plot)
}

/// Keeps every plot it is handed, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub plots: Vec<LatticePlot>,
}

impl PlotSink for RecordingSink {
    fn draw(&mut self, plot: &LatticePlot) -> Result<(), PlotError> {
        self.plots.push(plot.clone());
        Ok(())
    }
}

fn coord(x: &f64) -> String {
    // keep -1e-17 from printing as -0.0000
    let x = if x.abs() < 5e-5 { 0. } else { *x };
    format!("{x:.4}")
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "#")]
    index: usize,
    kind: &'static str,
    #[tabled(display_with = "coord")]
    x: f64,
    #[tabled(display_with = "coord")]
    y: f64,
}

#[derive(Tabled)]
struct CornerRow {
    corner: &'static str,
    #[tabled(display_with = "coord")]
    x: f64,
    #[tabled(display_with = "coord")]
    y: f64,
}

const CORNERS: [&str; 5] = ["origin", "a", "a + b", "b", "origin"];

/// Writes the plot as text tables: the title, the cell area, every point, then the unit cell.
#[derive(Debug)]
pub struct TableSink<W: Write> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PlotSink for TableSink<W> {
    fn draw(&mut self, plot: &LatticePlot) -> Result<(), PlotError> {
        let primitive = plot.points.primitive().len();
        let rows = plot
            .points
            .as_slice()
            .iter()
            .enumerate()
            .map(|(index, pt)| PointRow {
                index,
                kind: if index < primitive {
                    "lattice"
                } else {
                    "centered"
                },
                x: pt.x,
                y: pt.y,
            });
        let corners = CORNERS
            .iter()
            .zip(plot.unit_cell)
            .map(|(&corner, pt)| CornerRow {
                corner,
                x: pt.x,
                y: pt.y,
            });

        writeln!(self.out, "{}", plot.title)?;
        writeln!(
            self.out,
            "\nunit cell area: {:.4}",
            plot.lattice.unit_cell_area()
        )?;
        writeln!(self.out, "{}", Table::new(rows).with(Style::rounded()))?;
        writeln!(self.out, "unit cell:")?;
        writeln!(self.out, "{}", Table::new(corners).with(Style::rounded()))?;
        self.out.flush()?;
        Ok(())
    }
}
