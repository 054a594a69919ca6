//! Figures as display lists, exported to SVG and PNG.
//!
//! A [`Figure`] is a flat list of [`Primitive`]s in data coordinates. Nothing is
//! laid out until export: [`Viewport`] fixes the plotting rectangle and the data
//! range shown in it (widened for equal aspect), and `plotters` draws the axes
//! and primitives onto an SVG or bitmap backend. 3D figures are projected to
//! the plane first with a [`Projector`], then drawn like any other figure.

mod plot;
mod projection;

pub use projection::{Camera, Projector};

use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const GREY: Color = Color(160, 160, 160);
    pub const BLUE: Color = Color(0, 0, 255);
    pub const RED: Color = Color(255, 0, 0);

    /// Linear blend; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

fn through(stops: &[Color], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let last = stops.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last.saturating_sub(1));
    stops[i].lerp(stops[(i + 1).min(last)], pos - i as f64)
}

/// Sequential ramp for contour levels (dark purple to yellow).
pub fn level_ramp(t: f64) -> Color {
    const STOPS: [Color; 5] = [
        Color(68, 1, 84),
        Color(59, 82, 139),
        Color(33, 145, 140),
        Color(94, 201, 98),
        Color(253, 231, 37),
    ];
    through(&STOPS, t)
}

/// Diverging blue-grey-red ramp for shaded surfaces.
pub fn coolwarm(t: f64) -> Color {
    const STOPS: [Color; 3] = [Color(59, 76, 192), Color(221, 221, 221), Color(180, 4, 38)];
    through(&STOPS, t)
}

/// A drawable element in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Color,
        width: f64,
    },
    Arrow {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Color,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Color,
        stroke: Option<Color>,
    },
    Text {
        at: (f64, f64),
        text: String,
        color: Color,
    },
}

impl Primitive {
    /// Straight segment.
    pub fn line(a: (f64, f64), b: (f64, f64), stroke: Color) -> Self {
        Primitive::Polyline {
            points: vec![a, b],
            stroke,
            width: 1.0,
        }
    }

    fn anchors(&self) -> Vec<(f64, f64)> {
        match self {
            Primitive::Polyline { points, .. } | Primitive::Polygon { points, .. } => points.clone(),
            Primitive::Arrow { from, to, .. } => vec![*from, *to],
            Primitive::Text { at, .. } => vec![*at],
        }
    }
}

/// Arrows for a sampled vector field, scaled so the longest one spans
/// `cell` data units.
///
/// `samples` yields `((x, y), (u, v))`. Zero vectors are skipped.
pub fn quiver(
    samples: impl IntoIterator<Item = ((f64, f64), (f64, f64))>,
    cell: f64,
    stroke: Color,
) -> Vec<Primitive> {
    let samples: Vec<_> = samples.into_iter().collect();
    let longest = samples
        .iter()
        .map(|(_, (u, v))| u.hypot(*v))
        .filter(|n| n.is_finite())
        .fold(0.0_f64, f64::max);
    if longest == 0.0 {
        return Vec::new();
    }
    let k = cell / longest;
    samples
        .into_iter()
        .filter(|(_, (u, v))| (u != &0.0 || v != &0.0) && u.is_finite() && v.is_finite())
        .map(|((x, y), (u, v))| Primitive::Arrow {
            from: (x, y),
            to: (x + k * u, y + k * v),
            stroke,
        })
        .collect()
}

/// Axis-aligned bounding box in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Bounds {
    fn around(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Bounds> {
        let mut b: Option<Bounds> = None;
        for (x, y) in points.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
            b = Some(match b {
                None => Bounds {
                    x0: x,
                    x1: x,
                    y0: y,
                    y1: y,
                },
                Some(b) => Bounds {
                    x0: b.x0.min(x),
                    x1: b.x1.max(x),
                    y0: b.y0.min(y),
                    y1: b.y1.max(y),
                },
            });
        }
        b
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Grow zero-extent sides to one unit so the box can be mapped.
    fn non_degenerate(mut self) -> Bounds {
        if self.width() <= 0.0 {
            self.x0 -= 0.5;
            self.x1 += 0.5;
        }
        if self.height() <= 0.0 {
            self.y0 -= 0.5;
            self.y1 += 0.5;
        }
        self
    }
}

/// Plotting rectangle and visible data range for one figure.
///
/// The rectangle matches the chart layout: [`Viewport::MARGIN`] on every
/// side, plus [`Viewport::LABEL_AREA`] below and to the left when the figure
/// has axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Data range shown; wider than the figure bounds under equal aspect.
    pub bounds: Bounds,
    /// Pixel rectangle `(left, top, right, bottom)`.
    pub frame: (f64, f64, f64, f64),
}

impl Viewport {
    pub const MARGIN: u32 = 16;
    /// Room for tick labels and the axis description.
    pub const LABEL_AREA: u32 = 48;

    pub fn new(bounds: Bounds, width: u32, height: u32, equal_aspect: bool, axes: bool) -> Self {
        let m = Self::MARGIN as f64;
        let label = if axes { Self::LABEL_AREA as f64 } else { 0.0 };
        let (l, t) = (m + label, m);
        let r = (width as f64 - m).max(l + 1.0);
        let b = (height as f64 - m - label).max(t + 1.0);

        let mut bounds = bounds.non_degenerate();
        if equal_aspect {
            // One data unit spans the same number of pixels on both axes;
            // the looser axis gets a wider range, centred on the data.
            let s = ((r - l) / bounds.width()).min((b - t) / bounds.height());
            let (half_w, half_h) = (0.5 * (r - l) / s, 0.5 * (b - t) / s);
            let (cx, cy) = (0.5 * (bounds.x0 + bounds.x1), 0.5 * (bounds.y0 + bounds.y1));
            bounds = Bounds {
                x0: cx - half_w,
                x1: cx + half_w,
                y0: cy - half_h,
                y1: cy + half_h,
            };
        }
        Self {
            bounds,
            frame: (l, t, r, b),
        }
    }

    /// Data point to pixel position (y grows downwards).
    pub fn map(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (l, t, r, b) = self.frame;
        (
            l + (x - self.bounds.x0) / self.bounds.width() * (r - l),
            t + (self.bounds.y1 - y) / self.bounds.height() * (b - t),
        )
    }
}

/// Arrow head triangle in pixel space for a shaft `from -> to`.
fn arrow_head(from: (f64, f64), to: (f64, f64)) -> Option<[(f64, f64); 3]> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if !(len > 0.0) {
        return None;
    }
    let head = (0.3 * len).min(8.0);
    let (ux, uy) = (dx / len, dy / len);
    let base = (to.0 - head * ux, to.1 - head * uy);
    let half = 0.45 * head;
    Some([
        to,
        (base.0 - half * uy, base.1 + half * ux),
        (base.0 + half * uy, base.1 - half * ux),
    ])
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Svg,
    Png,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Svg, Format::Png];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Png => "png",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Format::Svg),
            "png" => Ok(Format::Png),
            _ => Err(Error::Domain("unknown figure format (expected svg or png)")),
        }
    }
}

/// One exportable figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Stable file stem, e.g. `contour_10levels`.
    pub name: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Same scale on both axes.
    pub equal_aspect: bool,
    /// Draw the frame and ticks (off for projected 3D scenes).
    pub axes: bool,
    pub width: u32,
    pub height: u32,
    pub primitives: Vec<Primitive>,
}

impl Figure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_label: None,
            y_label: None,
            equal_aspect: false,
            axes: true,
            width: 640,
            height: 480,
            primitives: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    pub fn equal_aspect(mut self) -> Self {
        self.equal_aspect = true;
        self
    }

    pub fn without_axes(mut self) -> Self {
        self.axes = false;
        self
    }

    pub fn push(&mut self, p: Primitive) {
        self.primitives.push(p);
    }

    pub fn extend(&mut self, ps: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(ps);
    }

    /// Data bounding box of all primitives, `None` for an empty figure.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::around(self.primitives.iter().flat_map(|p| p.anchors()))
    }

    pub fn viewport(&self) -> Viewport {
        let bounds = self.bounds().unwrap_or(Bounds {
            x0: 0.0,
            x1: 1.0,
            y0: 0.0,
            y1: 1.0,
        });
        Viewport::new(bounds, self.width, self.height, self.equal_aspect, self.axes)
    }

    pub fn to_svg(&self) -> Result<String> {
        plot::svg(self)
    }

    /// Rasterize at `width` x `height`, text included.
    pub fn to_image(&self) -> Result<image::RgbImage> {
        plot::raster(self)
    }

    /// Write `<dir>/<name>.<ext>` for each format; returns the paths written.
    pub fn save(&self, dir: &Path, formats: &[Format]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(formats.len());
        for &format in formats {
            let path = dir.join(format!("{}.{}", self.name, format.extension()));
            match format {
                Format::Svg => std::fs::write(&path, self.to_svg()?)?,
                Format::Png => self.to_image()?.save(&path)?,
            }
            info!(path = %path.display(), "wrote figure");
            written.push(path);
        }
        Ok(written)
    }
}
