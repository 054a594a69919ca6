//! Evenly spaced axes and the coordinate meshes built from them.
//!
//! A mesh stores one coordinate array per spatial axis. Which array axis a
//! spatial axis runs along is fixed by [`Indexing`] when the grid is built and
//! never guessed afterwards: always go through [`Grid2::index`] /
//! [`Grid3::index`] to address a physical sample.

use crate::{gradient, Error, Result};
use ndarray::{Array1, Array2, Array3, ArrayBase, ArrayView1, Axis, Data, Ix2, Ix3, Zip};
use tracing::debug;

/// `count` evenly spaced samples over the closed interval `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSamples {
    start: f64,
    end: f64,
    values: Array1<f64>,
}

impl AxisSamples {
    /// Sample `[start, end]` at `count` evenly spaced points, both ends included.
    ///
    /// A single sample sits at `start`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use relief::AxisSamples;
    ///
    /// let x = AxisSamples::new(-5.0, 5.0, 11).unwrap();
    /// assert_eq!(x.len(), 11);
    /// assert_eq!(x.spacing(), 1.0);
    /// assert_eq!(x.get(10), 5.0);
    /// ```
    pub fn new(start: f64, end: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::EmptyAxis);
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::NonFiniteBounds(start, end));
        }
        let step = if count > 1 {
            (end - start) / (count - 1) as f64
        } else {
            0.0
        };
        let last = count - 1;
        let values = Array1::from_shape_fn(count, |i| {
            // Pin the last sample so the closed interval really is closed.
            if i == last && count > 1 {
                end
            } else {
                start + step * i as f64
            }
        });
        Ok(Self { start, end, values })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; construction rejects empty axes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance between neighbouring samples (`0.0` for a single sample).
    pub fn spacing(&self) -> f64 {
        if self.len() > 1 {
            (self.end - self.start) / (self.len() - 1) as f64
        } else {
            0.0
        }
    }

    /// The `i`-th sample. Panics if `i >= len()`.
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }
}

/// Correspondence between spatial axes (x, y, z) and array axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indexing {
    /// x along array axis 0, y along axis 1, z along axis 2.
    #[default]
    Ij,
    /// Matrix layout: y along the rows (axis 0), x along the columns (axis 1),
    /// z along axis 2.
    Xy,
}

impl Indexing {
    /// Array axis holding spatial axis `spatial` (0 = x, 1 = y, 2 = z).
    pub fn array_axis(self, spatial: usize) -> Axis {
        match (self, spatial) {
            (Indexing::Xy, 0) => Axis(1),
            (Indexing::Xy, 1) => Axis(0),
            (_, s) => Axis(s),
        }
    }

    /// Permute a per-spatial-axis tuple into array-axis order.
    ///
    /// The permutation is its own inverse, so the same call maps an array
    /// index back to per-spatial-axis sample indices.
    pub fn permute<const N: usize>(self, spatial: [usize; N]) -> [usize; N] {
        let mut out = [0; N];
        for (s, &v) in spatial.iter().enumerate() {
            out[self.array_axis(s).index()] = v;
        }
        out
    }
}

fn check_shape(expected: &[usize], got: &[usize]) -> Result<()> {
    if expected != got {
        return Err(Error::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        });
    }
    Ok(())
}

/// A two-dimensional coordinate mesh.
#[derive(Debug, Clone)]
pub struct Grid2 {
    x: AxisSamples,
    y: AxisSamples,
    indexing: Indexing,
    xs: Array2<f64>,
    ys: Array2<f64>,
}

impl Grid2 {
    pub fn new(x: AxisSamples, y: AxisSamples, indexing: Indexing) -> Self {
        let shape = indexing.permute([x.len(), y.len()]);
        let xs = Array2::from_shape_fn((shape[0], shape[1]), |(r, c)| {
            let [ix, _] = indexing.permute([r, c]);
            x.get(ix)
        });
        let ys = Array2::from_shape_fn((shape[0], shape[1]), |(r, c)| {
            let [_, iy] = indexing.permute([r, c]);
            y.get(iy)
        });
        debug!(?shape, ?indexing, "built 2d grid");
        Self {
            x,
            y,
            indexing,
            xs,
            ys,
        }
    }

    /// Square grid with the same axis in x and y.
    pub fn square(axis: AxisSamples, indexing: Indexing) -> Self {
        Self::new(axis.clone(), axis, indexing)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.xs.dim()
    }

    pub fn indexing(&self) -> Indexing {
        self.indexing
    }

    /// Axis samples for spatial axis 0 (x) or 1 (y). Panics otherwise.
    pub fn axis(&self, spatial: usize) -> &AxisSamples {
        match spatial {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Grid2 has no spatial axis {spatial}"),
        }
    }

    pub fn xs(&self) -> &Array2<f64> {
        &self.xs
    }

    pub fn ys(&self) -> &Array2<f64> {
        &self.ys
    }

    /// Array index of the physical sample `(x[ix], y[iy])`.
    pub fn index(&self, ix: usize, iy: usize) -> [usize; 2] {
        self.indexing.permute([ix, iy])
    }

    /// Physical coordinates stored at an array index.
    pub fn point(&self, index: [usize; 2]) -> (f64, f64) {
        (self.xs[index], self.ys[index])
    }

    /// Evaluate `f(x, y)` at every grid point.
    pub fn map(&self, mut f: impl FnMut(f64, f64) -> f64) -> Array2<f64> {
        Zip::from(&self.xs)
            .and(&self.ys)
            .map_collect(|&x, &y| f(x, y))
    }

    /// Numerical `(∂f/∂x, ∂f/∂y)` of a field sampled on this grid.
    ///
    /// Uses each axis's physical spacing and honours the grid's indexing, so
    /// the returned arrays share the field's layout.
    pub fn gradient<S>(&self, field: &ArrayBase<S, Ix2>) -> Result<[Array2<f64>; 2]>
    where
        S: Data<Elem = f64>,
    {
        check_shape(self.xs.shape(), field.shape())?;
        let dx = gradient::partial(field, self.indexing.array_axis(0), self.x.spacing())?;
        let dy = gradient::partial(field, self.indexing.array_axis(1), self.y.spacing())?;
        Ok([dx, dy])
    }
}

/// A three-dimensional coordinate mesh.
#[derive(Debug, Clone)]
pub struct Grid3 {
    axes: [AxisSamples; 3],
    indexing: Indexing,
    coords: [Array3<f64>; 3],
}

impl Grid3 {
    pub fn new(x: AxisSamples, y: AxisSamples, z: AxisSamples, indexing: Indexing) -> Self {
        let shape = indexing.permute([x.len(), y.len(), z.len()]);
        let axes = [x, y, z];
        let coords = [0, 1, 2].map(|s| {
            Array3::from_shape_fn((shape[0], shape[1], shape[2]), |(a, b, c)| {
                let physical = indexing.permute([a, b, c]);
                axes[s].get(physical[s])
            })
        });
        debug!(?shape, ?indexing, "built 3d grid");
        Self {
            axes,
            indexing,
            coords,
        }
    }

    /// Cube grid with the same axis in x, y and z.
    pub fn cube(axis: AxisSamples, indexing: Indexing) -> Self {
        Self::new(axis.clone(), axis.clone(), axis, indexing)
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.coords[0].dim()
    }

    pub fn indexing(&self) -> Indexing {
        self.indexing
    }

    /// Axis samples for spatial axis 0, 1 or 2. Panics otherwise.
    pub fn axis(&self, spatial: usize) -> &AxisSamples {
        &self.axes[spatial]
    }

    pub fn xs(&self) -> &Array3<f64> {
        &self.coords[0]
    }

    pub fn ys(&self) -> &Array3<f64> {
        &self.coords[1]
    }

    pub fn zs(&self) -> &Array3<f64> {
        &self.coords[2]
    }

    /// Array index of the physical sample `(x[ix], y[iy], z[iz])`.
    pub fn index(&self, ix: usize, iy: usize, iz: usize) -> [usize; 3] {
        self.indexing.permute([ix, iy, iz])
    }

    pub fn point(&self, index: [usize; 3]) -> (f64, f64, f64) {
        (
            self.coords[0][index],
            self.coords[1][index],
            self.coords[2][index],
        )
    }

    /// Evaluate `f(x, y, z)` at every grid point.
    pub fn map(&self, mut f: impl FnMut(f64, f64, f64) -> f64) -> Array3<f64> {
        Zip::from(&self.coords[0])
            .and(&self.coords[1])
            .and(&self.coords[2])
            .map_collect(|&x, &y, &z| f(x, y, z))
    }

    /// Numerical `(∂f/∂x, ∂f/∂y, ∂f/∂z)` of a field sampled on this grid.
    pub fn gradient<S>(&self, field: &ArrayBase<S, Ix3>) -> Result<[Array3<f64>; 3]>
    where
        S: Data<Elem = f64>,
    {
        check_shape(self.coords[0].shape(), field.shape())?;
        let dx = gradient::partial(field, self.indexing.array_axis(0), self.axes[0].spacing())?;
        let dy = gradient::partial(field, self.indexing.array_axis(1), self.axes[1].spacing())?;
        let dz = gradient::partial(field, self.indexing.array_axis(2), self.axes[2].spacing())?;
        Ok([dx, dy, dz])
    }
}
