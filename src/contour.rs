//! Contour levels and iso-line extraction (marching squares).
//!
//! Lines come out as unordered segments in physical coordinates, one
//! [`ContourLine`] per level. That is all a renderer needs to stroke them.

use crate::{Error, Grid2, Result};
use ndarray::{ArrayBase, Data, Ix2};
use tracing::debug;

/// Default number of intervals for [`Levels::Auto`].
pub const AUTO_MAX_BINS: usize = 7;

/// How to choose contour levels.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Levels {
    /// Round-numbered levels, at most [`AUTO_MAX_BINS`] intervals over the data range.
    #[default]
    Auto,
    /// `n` equally spaced levels strictly inside the data range.
    Count(usize),
    /// Exactly these levels.
    Explicit(Vec<f64>),
}

/// Round-numbered levels strictly inside `(lo, hi)`, at most `max_bins` intervals.
///
/// Steps are `{1, 2, 2.5, 5, 10} × 10^k`.
pub fn nice_levels(lo: f64, hi: f64, max_bins: usize) -> Vec<f64> {
    let span = hi - lo;
    if !(span > 0.0) || !span.is_finite() || max_bins == 0 {
        return Vec::new();
    }
    let raw = span / max_bins as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|&s| s >= raw * (1.0 - 1e-12))
        .unwrap_or(10.0 * mag);

    let first = (lo / step).floor() as i64;
    let last = (hi / step).ceil() as i64;
    (first..=last)
        .map(|k| k as f64 * step)
        .filter(|&v| v > lo && v < hi)
        .collect()
}

impl Levels {
    /// Concrete ascending level values for `field`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLevels`] if the field has non-finite values, if an
    /// automatic choice meets a constant field, for `Count(0)`, or for an
    /// empty/non-finite explicit list.
    pub fn resolve<S>(&self, field: &ArrayBase<S, Ix2>) -> Result<Vec<f64>>
    where
        S: Data<Elem = f64>,
    {
        if field.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidLevels("field contains non-finite values"));
        }
        match self {
            Levels::Explicit(values) => {
                if values.is_empty() {
                    return Err(Error::InvalidLevels("explicit level list is empty"));
                }
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(Error::InvalidLevels("explicit levels must be finite"));
                }
                let mut v = values.clone();
                v.sort_by(|a, b| a.total_cmp(b));
                v.dedup();
                Ok(v)
            }
            Levels::Auto | Levels::Count(_) => {
                let (lo, hi) = field
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                if !(hi > lo) {
                    return Err(Error::InvalidLevels("field is constant"));
                }
                match *self {
                    Levels::Count(0) => Err(Error::InvalidLevels("level count must be >= 1")),
                    Levels::Count(n) => Ok((1..=n)
                        .map(|k| lo + (hi - lo) * k as f64 / (n + 1) as f64)
                        .collect()),
                    _ => Ok(nice_levels(lo, hi, AUTO_MAX_BINS)),
                }
            }
        }
    }
}

/// A segment between two physical points.
pub type Segment = [(f64, f64); 2];

/// Iso-line segments for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    pub level: f64,
    pub segments: Vec<Segment>,
}

impl ContourLine {
    /// Where to put this line's label: the midpoint of its longest segment.
    pub fn label_anchor(&self) -> Option<(f64, f64)> {
        let len2 = |s: &Segment| {
            let dx = s[1].0 - s[0].0;
            let dy = s[1].1 - s[0].1;
            dx * dx + dy * dy
        };
        self.segments
            .iter()
            .max_by(|a, b| len2(a).total_cmp(&len2(b)))
            .map(|s| (0.5 * (s[0].0 + s[1].0), 0.5 * (s[0].1 + s[1].1)))
    }

    /// Label text: integers without decimals, otherwise up to three places.
    pub fn label(&self) -> String {
        if self.level.fract() == 0.0 {
            format!("{:.0}", self.level)
        } else {
            let s = format!("{:.3}", self.level);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// All lines of one contour plot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourSet {
    pub lines: Vec<ContourLine>,
}

impl ContourSet {
    pub fn levels(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.level).collect()
    }

    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(|l| l.segments.len()).sum()
    }
}

/// Extract iso-lines of `field` (sampled on `grid`) at the given levels.
///
/// # Example
///
/// ```rust
/// use relief::{AxisSamples, Grid2, Indexing, Mountain};
/// use relief::contour::{contour, Levels};
///
/// let grid = Grid2::square(AxisSamples::new(-10.0, 10.0, 21).unwrap(), Indexing::Ij);
/// let h = Mountain::TEXTBOOK.sample(&grid);
/// let set = contour(&grid, &h, &Levels::Explicit(vec![500.0, 1000.0])).unwrap();
/// assert_eq!(set.levels(), vec![500.0, 1000.0]);
/// assert!(set.lines.iter().all(|l| !l.segments.is_empty()));
/// ```
pub fn contour<S>(grid: &Grid2, field: &ArrayBase<S, Ix2>, levels: &Levels) -> Result<ContourSet>
where
    S: Data<Elem = f64>,
{
    let (n0, n1) = grid.shape();
    if field.dim() != (n0, n1) {
        return Err(Error::ShapeMismatch {
            expected: vec![n0, n1],
            got: field.shape().to_vec(),
        });
    }
    let values = levels.resolve(field)?;
    let lines: Vec<ContourLine> = values
        .into_iter()
        .map(|level| ContourLine {
            level,
            segments: march(grid, field, level),
        })
        .collect();
    let set = ContourSet { lines };
    debug!(
        levels = set.lines.len(),
        segments = set.segment_count(),
        "extracted contours"
    );
    Ok(set)
}

fn march<S>(grid: &Grid2, field: &ArrayBase<S, Ix2>, level: f64) -> Vec<Segment>
where
    S: Data<Elem = f64>,
{
    let (n0, n1) = field.dim();
    let mut out = Vec::new();
    if n0 < 2 || n1 < 2 {
        return out;
    }
    for i in 0..n0 - 1 {
        for j in 0..n1 - 1 {
            // Corners in cyclic order; edge k joins corner k and corner k + 1.
            let corners = [[i, j], [i + 1, j], [i + 1, j + 1], [i, j + 1]];
            let f = corners.map(|c| field[c]);
            let above = f.map(|v| v >= level);

            let mut hits: [Option<(f64, f64)>; 4] = [None; 4];
            for k in 0..4 {
                let k1 = (k + 1) % 4;
                if above[k] != above[k1] {
                    let t = (level - f[k]) / (f[k1] - f[k]);
                    let (x0, y0) = grid.point(corners[k]);
                    let (x1, y1) = grid.point(corners[k1]);
                    hits[k] = Some((x0 + t * (x1 - x0), y0 + t * (y1 - y0)));
                }
            }

            match hits {
                [Some(a), Some(b), Some(c), Some(d)] => {
                    // Saddle: the centre decides which corner pair is connected.
                    let centre = 0.25 * (f[0] + f[1] + f[2] + f[3]);
                    if (centre >= level) == above[0] {
                        out.push([a, b]);
                        out.push([c, d]);
                    } else {
                        out.push([d, a]);
                        out.push([b, c]);
                    }
                }
                _ => {
                    let mut pts = hits.iter().flatten();
                    if let (Some(&p), Some(&q)) = (pts.next(), pts.next()) {
                        out.push([p, q]);
                    }
                }
            }
        }
    }
    out
}
