//! Orthographic projection of 3D data onto the figure plane.

use super::{Color, Primitive};

/// Viewing direction, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation about the vertical axis.
    pub azimuth: f64,
    /// Angle above the horizontal plane.
    pub elevation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            azimuth: -60.0,
            elevation: 30.0,
        }
    }
}

/// Projects points of a data box, normalised to a unit cube, through a [`Camera`].
///
/// Each axis is scaled independently, so a 20 km wide mountain 2 km high still
/// fills the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    lo: [f64; 3],
    extent: [f64; 3],
    right: [f64; 3],
    up: [f64; 3],
    toward_eye: [f64; 3],
}

impl Projector {
    /// `lo` and `hi` are opposite corners of the data box.
    pub fn new(camera: Camera, lo: [f64; 3], hi: [f64; 3]) -> Self {
        let extent = [0, 1, 2].map(|k| {
            let e = hi[k] - lo[k];
            if e.is_finite() && e > 0.0 {
                e
            } else {
                1.0
            }
        });
        let (az, el) = (camera.azimuth.to_radians(), camera.elevation.to_radians());
        let (sa, ca) = az.sin_cos();
        let (se, ce) = el.sin_cos();
        Self {
            lo,
            extent,
            right: [-sa, ca, 0.0],
            up: [-se * ca, -se * sa, ce],
            toward_eye: [ce * ca, ce * sa, se],
        }
    }

    /// Smallest box around `points`.
    pub fn fit(camera: Camera, points: impl IntoIterator<Item = (f64, f64, f64)>) -> Self {
        let mut lo = [f64::INFINITY; 3];
        let mut hi = [f64::NEG_INFINITY; 3];
        for (x, y, z) in points {
            for (k, v) in [x, y, z].into_iter().enumerate() {
                if v.is_finite() {
                    lo[k] = lo[k].min(v);
                    hi[k] = hi[k].max(v);
                }
            }
        }
        for k in 0..3 {
            if lo[k] > hi[k] {
                lo[k] = 0.0;
                hi[k] = 1.0;
            }
        }
        Self::new(camera, lo, hi)
    }

    fn normalise(&self, p: (f64, f64, f64)) -> [f64; 3] {
        let p = [p.0, p.1, p.2];
        [0, 1, 2].map(|k| (p[k] - self.lo[k]) / self.extent[k] - 0.5)
    }

    /// Figure-plane position of a data point.
    pub fn project(&self, p: (f64, f64, f64)) -> (f64, f64) {
        let n = self.normalise(p);
        (dot(&n, &self.right), dot(&n, &self.up))
    }

    /// Distance towards the viewer; larger is nearer.
    pub fn depth(&self, p: (f64, f64, f64)) -> f64 {
        dot(&self.normalise(p), &self.toward_eye)
    }

    /// The twelve edges of the data box, for orientation.
    pub fn box_edges(&self, stroke: Color) -> Vec<Primitive> {
        let lo = self.lo;
        let hi = [0, 1, 2].map(|k| self.lo[k] + self.extent[k]);
        let corner = |i: usize| {
            (
                if i & 1 == 0 { lo[0] } else { hi[0] },
                if i & 2 == 0 { lo[1] } else { hi[1] },
                if i & 4 == 0 { lo[2] } else { hi[2] },
            )
        };
        let mut edges = Vec::with_capacity(12);
        for a in 0..8usize {
            for bit in [1usize, 2, 4] {
                if a & bit == 0 {
                    let b = a | bit;
                    edges.push(Primitive::line(
                        self.project(corner(a)),
                        self.project(corner(b)),
                        stroke,
                    ));
                }
            }
        }
        edges
    }
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
