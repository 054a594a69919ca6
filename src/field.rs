//! Analytic vector fields and their samples on grids.
//!
//! A field is a pointwise rule: its value at a point never depends on the
//! grid it is sampled on. Sampling just walks the grid in its own layout and
//! stores one array per component.

use crate::{Error, Grid2, Grid3, Result};
use ndarray::{array, Array1, Array2, Array3, ArrayView1, Zip};

/// A vector field over `dim()`-dimensional space.
pub trait VectorField {
    /// Number of spatial components taken and returned.
    fn dim(&self) -> usize;

    /// Evaluate the field at point `p` (`p.len() == dim()`).
    fn velocity(&self, p: &ArrayView1<f64>) -> Array1<f64>;
}

/// The planar textbook field `u = x² + 2y − xy/2`, `v = −3y`.
///
/// ```rust
/// use relief::{QuadraticShear, VectorField};
/// use ndarray::array;
///
/// let v = QuadraticShear.velocity(&array![1.0, 1.0].view());
/// assert_eq!(v, array![2.5, -3.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuadraticShear;

impl QuadraticShear {
    #[inline]
    pub fn at(x: f64, y: f64) -> (f64, f64) {
        (x * x + 2.0 * y - 0.5 * x * y, -3.0 * y)
    }
}

impl VectorField for QuadraticShear {
    fn dim(&self) -> usize {
        2
    }

    fn velocity(&self, p: &ArrayView1<f64>) -> Array1<f64> {
        let (u, v) = Self::at(p[0], p[1]);
        array![u, v]
    }
}

/// Inverse-square field `−strength · p / |p|³` about the origin.
///
/// Positive strength points inward (gravity-like); use a negative strength for
/// the outward `p / |p|³` form. Singular at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSquare {
    pub strength: f64,
}

impl Default for InverseSquare {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

impl InverseSquare {
    #[inline]
    pub fn at(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let r = (x * x + y * y + z * z).sqrt();
        let k = -self.strength / (r * r * r);
        (k * x, k * y, k * z)
    }
}

impl VectorField for InverseSquare {
    fn dim(&self) -> usize {
        3
    }

    fn velocity(&self, p: &ArrayView1<f64>) -> Array1<f64> {
        let (u, v, w) = self.at(p[0], p[1], p[2]);
        array![u, v, w]
    }
}

fn check_finite(v: &Array1<f64>, x: f64, y: f64, z: f64) -> Result<()> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(Error::Singular { x, y, z })
    }
}

/// Sample a planar field on `grid`, returning `[u, v]` in the grid's layout.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `field.dim() != 2`; [`Error::Singular`] at
/// the first point where the field is not finite.
pub fn sample_planar<F: VectorField + ?Sized>(field: &F, grid: &Grid2) -> Result<[Array2<f64>; 2]> {
    if field.dim() != 2 {
        return Err(Error::DimensionMismatch(2, field.dim()));
    }
    let shape = grid.shape();
    let mut u = Array2::zeros(shape);
    let mut v = Array2::zeros(shape);
    let mut failure = None;
    Zip::from(&mut u)
        .and(&mut v)
        .and(grid.xs())
        .and(grid.ys())
        .for_each(|u, v, &x, &y| {
            if failure.is_some() {
                return;
            }
            let val = field.velocity(&array![x, y].view());
            match check_finite(&val, x, y, 0.0) {
                Ok(()) => {
                    *u = val[0];
                    *v = val[1];
                }
                Err(e) => failure = Some(e),
            }
        });
    match failure {
        Some(e) => Err(e),
        None => Ok([u, v]),
    }
}

/// Sample a spatial field on `grid`, returning `[u, v, w]` in the grid's layout.
pub fn sample_spatial<F: VectorField + ?Sized>(field: &F, grid: &Grid3) -> Result<[Array3<f64>; 3]> {
    if field.dim() != 3 {
        return Err(Error::DimensionMismatch(3, field.dim()));
    }
    let shape = grid.shape();
    let mut u = Array3::zeros(shape);
    let mut v = Array3::zeros(shape);
    let mut w = Array3::zeros(shape);
    let mut failure = None;
    Zip::from(&mut u)
        .and(&mut v)
        .and(&mut w)
        .and(grid.xs())
        .and(grid.ys())
        .and(grid.zs())
        .for_each(|u, v, w, &x, &y, &z| {
            if failure.is_some() {
                return;
            }
            let val = field.velocity(&array![x, y, z].view());
            match check_finite(&val, x, y, z) {
                Ok(()) => {
                    *u = val[0];
                    *v = val[1];
                    *w = val[2];
                }
                Err(e) => failure = Some(e),
            }
        });
    match failure {
        Some(e) => Err(e),
        None => Ok([u, v, w]),
    }
}
