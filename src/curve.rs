//! A spiral path winding up the mountain.
//!
//! For `s ∈ [0, 2π]` the horizontal radius shrinks linearly from
//! `max_radius` to zero while the height follows the elevation at that radius:
//!
//! \[
//! \rho(s) = \rho_{\max} (1 - s / 2\pi), \quad
//! (x, y, z) = (\rho \cos s,\ \rho \sin s,\ h(\rho))
//! \]

use crate::{AxisSamples, Error, Mountain, Result};
use ndarray::Array1;
use std::f64::consts::TAU;

/// Spiral parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    /// Horizontal radius at `s = 0`.
    pub max_radius: f64,
    /// Number of parameter samples over `[0, 2π]`.
    pub samples: usize,
}

impl Default for Spiral {
    fn default() -> Self {
        Self {
            max_radius: 10.0,
            samples: 100,
        }
    }
}

/// Ordered `(x, y, z)` samples along a curve, with the parameter that made them.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSample {
    pub s: Array1<f64>,
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
}

impl CurveSample {
    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// The `i`-th point.
    pub fn point(&self, i: usize) -> (f64, f64, f64) {
        (self.x[i], self.y[i], self.z[i])
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }
}

impl Spiral {
    /// Horizontal radius at parameter `s`.
    #[inline]
    pub fn radius_at(&self, s: f64) -> f64 {
        self.max_radius * (1.0 - s / TAU)
    }

    /// Sample the spiral over `mountain`.
    ///
    /// ```rust
    /// use relief::{Mountain, Spiral};
    ///
    /// let m = Mountain::TEXTBOOK;
    /// let c = Spiral::default().trace(&m).unwrap();
    /// assert_eq!(c.point(0), (10.0, 0.0, m.elevation_at_distance(10.0)));
    /// ```
    pub fn trace(&self, mountain: &Mountain) -> Result<CurveSample> {
        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(Error::Domain("spiral radius must be finite and non-negative"));
        }
        let s = AxisSamples::new(0.0, TAU, self.samples)?.values().to_owned();
        let rho = s.mapv(|s| self.radius_at(s));
        let x = Array1::from_shape_fn(s.len(), |i| rho[i] * s[i].cos());
        let y = Array1::from_shape_fn(s.len(), |i| rho[i] * s[i].sin());
        let z = rho.mapv(|r| mountain.elevation_at_distance(r));
        Ok(CurveSample { s, x, y, z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_at_the_summit() {
        let m = Mountain::TEXTBOOK;
        let c = Spiral::default().trace(&m).unwrap();
        assert_eq!(c.len(), 100);
        let (x, y, z) = c.point(99);
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
        assert!((z - m.peak()).abs() < 1e-9);
    }

    #[test]
    fn climbs_monotonically() {
        let m = Mountain::TEXTBOOK;
        let c = Spiral::default().trace(&m).unwrap();
        for i in 1..c.len() {
            assert!(c.z[i] > c.z[i - 1]);
        }
    }

    #[test]
    fn is_deterministic() {
        let m = Mountain::SCALED;
        let sp = Spiral {
            max_radius: 7.0,
            samples: 33,
        };
        assert_eq!(sp.trace(&m).unwrap(), sp.trace(&m).unwrap());
    }

    #[test]
    fn rejects_bad_parameters() {
        let m = Mountain::TEXTBOOK;
        let empty = Spiral {
            samples: 0,
            ..Spiral::default()
        };
        assert!(matches!(empty.trace(&m), Err(Error::EmptyAxis)));
        let negative = Spiral {
            max_radius: -1.0,
            ..Spiral::default()
        };
        assert!(matches!(negative.trace(&m), Err(Error::Domain(_))));
    }

    #[test]
    fn single_sample_is_the_start() {
        let m = Mountain::TEXTBOOK;
        let c = Spiral {
            samples: 1,
            ..Spiral::default()
        }
        .trace(&m)
        .unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.point(0).0, 10.0);
    }
}
