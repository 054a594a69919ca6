//! # relief
//!
//! Regular grids, a synthetic mountain, and the pictures you draw of it.
//!
//! ## The Problem
//!
//! A textbook chapter on visualization needs one well-behaved scalar field to
//! draw every kind of plot with: quiver arrows, contour lines, labelled
//! contours, shaded surfaces, a path climbing the slope. The field used here is
//! a radially symmetric peak
//!
//! \[
//! h(x, y) = \frac{h_0}{1 + (x^2 + y^2) / R^2}
//! \]
//!
//! sampled on evenly spaced grids, differentiated numerically, and rendered.
//!
//! ## Key Types and Functions
//!
//! | Item | Use Case |
//! |------|----------|
//! | [`AxisSamples`] | Evenly spaced samples over a closed interval |
//! | [`Grid2`] / [`Grid3`] | Coordinate meshes with an explicit [`Indexing`] |
//! | [`Mountain`] | The elevation function and its analytic slope |
//! | [`gradient::partial`] | Finite-difference derivative along one array axis |
//! | [`contour::contour`] | Iso-lines by marching squares |
//! | [`gallery::export`] | Every textbook figure, as SVG and PNG |
//!
//! ## Quick Start
//!
//! ```rust
//! use relief::{AxisSamples, Grid2, Indexing, Mountain};
//!
//! let mountain = Mountain::new(2277.0, 4.0).unwrap();
//! let axis = AxisSamples::new(-10.0, 10.0, 41).unwrap();
//! let grid = Grid2::new(axis.clone(), axis, Indexing::Ij);
//!
//! let h = mountain.sample(&grid);
//! assert_eq!(h[grid.index(20, 20)], 2277.0);
//!
//! let [dhdx, dhdy] = grid.gradient(&h).unwrap();
//! assert_eq!(dhdx.dim(), h.dim());
//! assert_eq!(dhdy.dim(), h.dim());
//! ```
//!
//! ## Layout Conventions
//!
//! Array layout is never implicit. Every grid carries an [`Indexing`]:
//! `Ij` puts x along array axis 0, `Xy` puts y along the rows and x along the
//! columns. Values at a physical point never depend on the choice; use
//! [`Grid2::index`] to look them up.
//!
//! ## What Can Go Wrong
//!
//! 1. **Degenerate radius**: `R = 0` divides by zero, and so does any `R`
//!    small enough that `R²` underflows (around `1e-155`). [`Mountain::new`]
//!    rejects both, along with a non-positive peak.
//! 2. **Single-sample axes**: a derivative needs two points. [`gradient`]
//!    returns [`Error::TooFewPoints`].
//! 3. **Singular fields**: the inverse-square field blows up at the origin;
//!    sampling it there returns [`Error::Singular`] instead of `inf`.

use thiserror::Error;

pub mod contour;
pub mod curve;
pub mod field;
pub mod gallery;
pub mod gradient;
pub mod grid;
pub mod mountain;
pub mod render;

pub use curve::{CurveSample, Spiral};
pub use field::{sample_planar, sample_spatial, InverseSquare, QuadraticShear, VectorField};
pub use grid::{AxisSamples, Grid2, Grid3, Indexing};
pub use mountain::Mountain;

/// Error variants for grid, field, and figure operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An axis was asked for zero samples.
    #[error("axis must have at least one sample")]
    EmptyAxis,

    /// Axis bounds are not finite.
    #[error("axis bounds must be finite, got [{0}, {1}]")]
    NonFiniteBounds(f64, f64),

    /// Mountain radius is zero, negative, not finite, or so small or large
    /// that its square leaves the normal float range.
    #[error("mountain radius must be positive with a finite, non-vanishing square, got {0}")]
    InvalidRadius(f64),

    /// Mountain peak height is zero, negative, or not finite.
    #[error("mountain peak height must be positive and finite, got {0}")]
    InvalidHeight(f64),

    /// Too few samples along an axis to take a derivative.
    #[error("axis {axis} has {len} sample(s); a derivative needs at least 2")]
    TooFewPoints { axis: usize, len: usize },

    /// Requested array axis does not exist.
    #[error("axis {axis} out of range for a {ndim}-dimensional field")]
    AxisOutOfRange { axis: usize, ndim: usize },

    /// Sample spacing is zero or not finite.
    #[error("sample spacing must be non-zero and finite, got {0}")]
    InvalidSpacing(f64),

    /// Field shape does not match its grid.
    #[error("field shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// Dimension count mismatch (expected, got).
    #[error("dimension mismatch: expected {0}, got {1}")]
    DimensionMismatch(usize, usize),

    /// A vector field is not finite at a sample point.
    #[error("vector field is singular at ({x}, {y}, {z})")]
    Singular { x: f64, y: f64, z: f64 },

    /// Contour levels cannot be resolved.
    #[error("invalid contour levels: {0}")]
    InvalidLevels(&'static str),

    /// Domain error (invalid inputs for the mathematical definition).
    #[error("{0}")]
    Domain(&'static str),

    /// Writing a figure failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding a raster figure failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// The plotting backend rejected a drawing operation.
    #[error("failed to draw figure: {0}")]
    Draw(String),
}

/// Result type for relief operations.
pub type Result<T> = std::result::Result<T, Error>;
