//! Finite-difference gradients of sampled scalar fields.
//!
//! Second-order central differences in the interior, first-order one-sided
//! differences on the two boundary samples of each lane:
//!
//! \[
//! f'_i \approx \frac{f_{i+1} - f_{i-1}}{2h}, \qquad
//! f'_0 \approx \frac{f_1 - f_0}{h}, \qquad
//! f'_{n-1} \approx \frac{f_{n-1} - f_{n-2}}{h}
//! \]
//!
//! These work on any array dimension. For grids with a physical layout, prefer
//! [`Grid2::gradient`](crate::Grid2::gradient), which picks the right axis and
//! spacing for each spatial direction.

use crate::{Error, Result};
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Zip};

/// Derivative of `field` along one array axis with uniform `spacing`.
///
/// The output has exactly the input's shape.
///
/// # Errors
///
/// - [`Error::AxisOutOfRange`] if `axis` is not an axis of `field`.
/// - [`Error::TooFewPoints`] if the axis has fewer than two samples.
/// - [`Error::InvalidSpacing`] if `spacing` is zero or not finite.
///
/// # Example
///
/// ```rust
/// use relief::gradient::partial;
/// use ndarray::{array, Axis};
///
/// let f = array![0.0, 1.0, 4.0, 9.0];
/// let df = partial(&f, Axis(0), 1.0).unwrap();
/// assert_eq!(df, array![1.0, 2.0, 4.0, 5.0]);
/// ```
pub fn partial<S, D>(field: &ArrayBase<S, D>, axis: Axis, spacing: f64) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let ndim = field.ndim();
    if axis.index() >= ndim {
        return Err(Error::AxisOutOfRange {
            axis: axis.index(),
            ndim,
        });
    }
    let n = field.len_of(axis);
    if n < 2 {
        return Err(Error::TooFewPoints {
            axis: axis.index(),
            len: n,
        });
    }
    if spacing == 0.0 || !spacing.is_finite() {
        return Err(Error::InvalidSpacing(spacing));
    }

    let mut out = Array::<f64, D>::zeros(field.raw_dim());
    let inv_h = 1.0 / spacing;
    let inv_2h = 0.5 * inv_h;

    Zip::from(field.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|src, mut dst| {
            dst[0] = (src[1] - src[0]) * inv_h;
            dst[n - 1] = (src[n - 1] - src[n - 2]) * inv_h;
            for i in 1..n - 1 {
                dst[i] = (src[i + 1] - src[i - 1]) * inv_2h;
            }
        });

    Ok(out)
}

/// Derivatives along every array axis, one output per axis.
///
/// `spacings[k]` is the sample spacing along array axis `k`.
pub fn gradient<S, D>(field: &ArrayBase<S, D>, spacings: &[f64]) -> Result<Vec<Array<f64, D>>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if spacings.len() != field.ndim() {
        return Err(Error::DimensionMismatch(field.ndim(), spacings.len()));
    }
    spacings
        .iter()
        .enumerate()
        .map(|(k, &h)| partial(field, Axis(k), h))
        .collect()
}

/// [`gradient`] with unit spacing on every axis (derivatives per sample index).
pub fn gradient_unit<S, D>(field: &ArrayBase<S, D>) -> Result<Vec<Array<f64, D>>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    gradient(field, &vec![1.0; field.ndim()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2, Array3};
    use proptest::prelude::*;

    #[test]
    fn two_samples_use_one_sided_difference() {
        let f = array![1.0, 4.0];
        let df = partial(&f, Axis(0), 0.5).unwrap();
        assert_eq!(df, array![6.0, 6.0]);
    }

    #[test]
    fn single_sample_axis_is_rejected() {
        let f = array![[1.0, 2.0, 3.0]];
        let err = partial(&f, Axis(0), 1.0).unwrap_err();
        assert!(matches!(err, Error::TooFewPoints { axis: 0, len: 1 }));
        // The other axis is fine.
        assert!(partial(&f, Axis(1), 1.0).is_ok());
    }

    #[test]
    fn bad_axis_and_spacing_are_rejected() {
        let f = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(matches!(
            partial(&f, Axis(2), 1.0),
            Err(Error::AxisOutOfRange { axis: 2, ndim: 2 })
        ));
        assert!(matches!(partial(&f, Axis(0), 0.0), Err(Error::InvalidSpacing(_))));
        assert!(matches!(
            partial(&f, Axis(0), f64::NAN),
            Err(Error::InvalidSpacing(_))
        ));
        assert!(matches!(
            gradient(&f, &[1.0]),
            Err(Error::DimensionMismatch(2, 1))
        ));
    }

    #[test]
    fn rows_and_columns_are_differentiated_independently() {
        // f[i, j] = 10 i + j
        let f = Array2::from_shape_fn((3, 4), |(i, j)| 10.0 * i as f64 + j as f64);
        let g = gradient_unit(&f).unwrap();
        assert_eq!(g.len(), 2);
        assert!(g[0].iter().all(|&v| (v - 10.0).abs() < 1e-12));
        assert!(g[1].iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn three_dimensional_field_gives_three_components() {
        let f = Array3::from_shape_fn((3, 4, 5), |(i, j, k)| {
            (i * i) as f64 + 2.0 * j as f64 - k as f64
        });
        let g = gradient(&f, &[1.0, 0.5, 2.0]).unwrap();
        assert_eq!(g.len(), 3);
        for c in &g {
            assert_eq!(c.dim(), f.dim());
        }
        // Central difference of i² at i = 1 is exact: (4 - 0) / 2.
        assert!((g[0][[1, 0, 0]] - 2.0).abs() < 1e-12);
        assert!(g[1].iter().all(|&v| (v - 4.0).abs() < 1e-12));
        assert!(g[2].iter().all(|&v| (v + 0.5).abs() < 1e-12));
    }

    #[test]
    fn works_on_non_contiguous_views() {
        let f = Array2::from_shape_fn((4, 4), |(i, j)| (i * j) as f64);
        let t = f.t();
        let g = gradient_unit(&t).unwrap();
        // t[i, j] = i * j as well, so d/di = j
        assert!((g[0][[2, 3]] - 3.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn output_shape_matches_input(rows in 2usize..12, cols in 2usize..12, h in 0.01f64..10.0) {
            let f = Array2::from_shape_fn((rows, cols), |(i, j)| ((i + 2 * j) as f64).sin());
            let g = gradient(&f, &[h, h]).unwrap();
            prop_assert_eq!(g[0].dim(), (rows, cols));
            prop_assert_eq!(g[1].dim(), (rows, cols));
        }

        #[test]
        fn linear_functions_are_differentiated_exactly(
            a in -10.0f64..10.0,
            b in -10.0f64..10.0,
            n in 2usize..40,
            h in 0.01f64..2.0,
        ) {
            let f = Array2::from_shape_fn((n, 3), |(i, _)| a * i as f64 * h + b);
            let df = partial(&f, Axis(0), h).unwrap();
            for &v in df.iter() {
                prop_assert!((v - a).abs() < 1e-9 * (1.0 + a.abs()));
            }
        }
    }
}
