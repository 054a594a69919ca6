//! The synthetic mountain: a radially symmetric peak of height `h0` whose
//! elevation halves at distance `R` from the summit.

use crate::field::VectorField;
use crate::{Error, Grid2, Result};
use ndarray::{array, Array1, Array2, ArrayView1};

/// Elevation model `h(x, y) = h0 / (1 + (x² + y²) / R²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mountain {
    h0: f64,
    radius: f64,
}

impl Mountain {
    /// Peak of 2277 m with a 4 km radius.
    pub const TEXTBOOK: Mountain = Mountain {
        h0: 2277.0,
        radius: 4.0,
    };

    /// Same footprint, heights scaled down by 100.
    pub const SCALED: Mountain = Mountain {
        h0: 22.77,
        radius: 4.0,
    };

    /// # Errors
    ///
    /// [`Error::InvalidRadius`] unless `radius` is positive and `radius²` is
    /// a normal float (so neither `1e-170` nor `1e200` gets through);
    /// [`Error::InvalidHeight`] unless `h0` is positive and finite.
    pub fn new(h0: f64, radius: f64) -> Result<Self> {
        if !(radius > 0.0) || !(radius * radius).is_normal() {
            return Err(Error::InvalidRadius(radius));
        }
        if !(h0 > 0.0) || !h0.is_finite() {
            return Err(Error::InvalidHeight(h0));
        }
        Ok(Self { h0, radius })
    }

    pub fn peak(&self) -> f64 {
        self.h0
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Elevation at horizontal distance `r` from the summit.
    #[inline]
    pub fn elevation_at_distance(&self, r: f64) -> f64 {
        self.h0 / (1.0 + (r * r) / (self.radius * self.radius))
    }

    /// Elevation at `(x, y)`.
    ///
    /// ```rust
    /// use relief::Mountain;
    ///
    /// let m = Mountain::TEXTBOOK;
    /// assert_eq!(m.elevation(0.0, 0.0), 2277.0);
    /// assert_eq!(m.elevation(4.0, 0.0), 1138.5);
    /// ```
    #[inline]
    pub fn elevation(&self, x: f64, y: f64) -> f64 {
        self.h0 / (1.0 + (x * x + y * y) / (self.radius * self.radius))
    }

    /// Analytic `(∂h/∂x, ∂h/∂y)`.
    pub fn slope(&self, x: f64, y: f64) -> (f64, f64) {
        let r2 = self.radius * self.radius;
        let q = 1.0 + (x * x + y * y) / r2;
        let k = -2.0 * self.h0 / (r2 * q * q);
        (k * x, k * y)
    }

    /// Elevation at every point of `grid`, in the grid's layout.
    pub fn sample(&self, grid: &Grid2) -> Array2<f64> {
        grid.map(|x, y| self.elevation(x, y))
    }

    /// Analytic slope at every point of `grid`, as `[∂h/∂x, ∂h/∂y]`.
    pub fn sample_slope(&self, grid: &Grid2) -> [Array2<f64>; 2] {
        [
            grid.map(|x, y| self.slope(x, y).0),
            grid.map(|x, y| self.slope(x, y).1),
        ]
    }
}

impl Default for Mountain {
    fn default() -> Self {
        Self::TEXTBOOK
    }
}

/// The mountain's slope field.
impl VectorField for Mountain {
    fn dim(&self) -> usize {
        2
    }

    fn velocity(&self, p: &ArrayView1<f64>) -> Array1<f64> {
        let (dx, dy) = self.slope(p[0], p[1]);
        array![dx, dy]
    }
}
