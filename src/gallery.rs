//! The textbook figure set.
//!
//! Each figure has a stable file stem that names its content. [`export`] writes
//! every figure in every configured format into one directory.

use crate::contour::{contour, ContourSet, Levels};
use crate::render::{coolwarm, level_ramp, quiver, Camera, Color, Figure, Format, Primitive, Projector};
use crate::{
    sample_planar, sample_spatial, AxisSamples, Grid2, Grid3, Indexing, InverseSquare, Mountain,
    QuadraticShear, Result, Spiral,
};
use ndarray::Array2;
use std::path::PathBuf;
use tracing::{debug, info};

/// Explicit levels used by `contour_speclevels`.
pub const EXPLICIT_LEVELS: [f64; 4] = [500.0, 1000.0, 1500.0, 2000.0];

/// Gallery settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Directory the figures are written to (created if missing).
    pub out_dir: PathBuf,
    pub formats: Vec<Format>,
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
    pub mountain: Mountain,
    pub camera: Camera,
    pub spiral: Spiral,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("images"),
            formats: Format::ALL.to_vec(),
            width: 640,
            height: 480,
            mountain: Mountain::TEXTBOOK,
            camera: Camera::default(),
            spiral: Spiral::default(),
        }
    }
}

type Builder = fn(&GalleryConfig) -> Result<Figure>;

const FIGURES: [(&str, Builder); 11] = [
    ("quiver_simple", quiver_simple),
    ("quiver_advanced", quiver_advanced),
    ("default_contour", default_contour),
    ("default_contour3", default_contour3),
    ("contour_10levels", contour_10levels),
    ("contour_10levels_black", contour_10levels_black),
    ("contour_speclevels", contour_speclevels),
    ("contour_clabel", contour_clabel),
    ("simple_plot", simple_plot),
    ("simple_plot_colours", simple_plot_colours),
    ("quiver_gr", quiver_gr),
];

/// File stems of every figure, in build order.
pub fn names() -> Vec<&'static str> {
    FIGURES.iter().map(|(name, _)| *name).collect()
}

/// Build every figure in memory.
pub fn build(cfg: &GalleryConfig) -> Result<Vec<Figure>> {
    FIGURES
        .iter()
        .map(|(name, make)| -> Result<Figure> {
            let fig = make(cfg)?;
            debug!(name = *name, primitives = fig.primitives.len(), "built figure");
            Ok(fig)
        })
        .collect()
}

/// Build every figure and write it in each configured format.
///
/// Returns the written paths, figure by figure.
pub fn export(cfg: &GalleryConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&cfg.out_dir)?;
    let mut written = Vec::new();
    for fig in build(cfg)? {
        written.extend(fig.save(&cfg.out_dir, &cfg.formats)?);
    }
    info!(
        files = written.len(),
        dir = %cfg.out_dir.display(),
        "exported gallery"
    );
    Ok(written)
}

fn blank(cfg: &GalleryConfig, name: &str) -> Figure {
    Figure::new(name).with_size(cfg.width, cfg.height)
}

/// 21×21 grid over [-10, 10] km used by the contour and surface figures.
fn terrain_grid() -> Result<Grid2> {
    Ok(Grid2::square(AxisSamples::new(-10.0, 10.0, 21)?, Indexing::Ij))
}

fn terrain(cfg: &GalleryConfig) -> Result<(Grid2, Array2<f64>)> {
    let grid = terrain_grid()?;
    let h = cfg.mountain.sample(&grid);
    Ok((grid, h))
}

fn planar_arrows(grid: &Grid2, u: &Array2<f64>, v: &Array2<f64>, stroke: Color) -> Vec<Primitive> {
    let samples = grid
        .xs()
        .iter()
        .zip(grid.ys().iter())
        .zip(u.iter().zip(v.iter()))
        .map(|((&x, &y), (&u, &v))| ((x, y), (u, v)));
    let cell = grid.axis(0).spacing().min(grid.axis(1).spacing());
    quiver(samples, cell, stroke)
}

/// Contour segments as lines; one colour for all, or a ramp over the levels.
fn contour_lines(set: &ContourSet, colour: Option<Color>) -> Vec<Primitive> {
    let n = set.lines.len();
    let mut out = Vec::new();
    for (i, line) in set.lines.iter().enumerate() {
        let stroke = colour.unwrap_or_else(|| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            level_ramp(t)
        });
        out.extend(line.segments.iter().map(|s| Primitive::line(s[0], s[1], stroke)));
    }
    out
}

fn contour_figure(cfg: &GalleryConfig, name: &str, levels: Levels, colour: Option<Color>) -> Result<Figure> {
    let (grid, h) = terrain(cfg)?;
    let set = contour(&grid, &h, &levels)?;
    let mut fig = blank(cfg, name).equal_aspect();
    fig.extend(contour_lines(&set, colour));
    Ok(fig)
}

/// Surface quads drawn back to front; `shade` maps mean height in `[0, 1]`
/// to fill and optional edge colour.
fn surface(
    grid: &Grid2,
    h: &Array2<f64>,
    proj: &Projector,
    shade: impl Fn(f64) -> (Color, Option<Color>),
) -> Vec<Primitive> {
    let (n0, n1) = h.dim();
    let (lo, hi) = h
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| (lo.min(z), hi.max(z)));
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut quads = Vec::with_capacity(n0.saturating_sub(1) * n1.saturating_sub(1));
    for i in 0..n0.saturating_sub(1) {
        for j in 0..n1.saturating_sub(1) {
            let corners = [[i, j], [i + 1, j], [i + 1, j + 1], [i, j + 1]].map(|c| {
                let (x, y) = grid.point(c);
                (x, y, h[c])
            });
            let depth = corners.iter().map(|&p| proj.depth(p)).sum::<f64>() / 4.0;
            let mean = corners.iter().map(|p| p.2).sum::<f64>() / 4.0;
            let (fill, stroke) = shade((mean - lo) / span);
            let points = corners.iter().map(|&p| proj.project(p)).collect();
            quads.push((depth, Primitive::Polygon { points, fill, stroke }));
        }
    }
    quads.sort_by(|a, b| a.0.total_cmp(&b.0));
    quads.into_iter().map(|(_, p)| p).collect()
}

fn terrain_projector(cfg: &GalleryConfig, grid: &Grid2, h: &Array2<f64>) -> Projector {
    let points = grid
        .xs()
        .iter()
        .zip(grid.ys().iter())
        .zip(h.iter())
        .map(|((&x, &y), &z)| (x, y, z));
    Projector::fit(cfg.camera, points)
}

fn quiver_simple(cfg: &GalleryConfig) -> Result<Figure> {
    let grid = Grid2::square(AxisSamples::new(-5.0, 5.0, 11)?, Indexing::Ij);
    let [u, v] = sample_planar(&QuadraticShear, &grid)?;
    let mut fig = blank(cfg, "quiver_simple").equal_aspect();
    fig.extend(planar_arrows(&grid, &u, &v, Color::BLUE));
    Ok(fig)
}

fn quiver_advanced(cfg: &GalleryConfig) -> Result<Figure> {
    let (grid, h) = terrain(cfg)?;
    let [dhdx, dhdy] = grid.gradient(&h)?;
    let set = contour(&grid, &h, &Levels::Auto)?;
    let mut fig = blank(cfg, "quiver_advanced").equal_aspect().with_labels("x", "y");
    fig.extend(planar_arrows(&grid, &dhdx, &dhdy, Color::RED));
    fig.extend(contour_lines(&set, None));
    Ok(fig)
}

fn default_contour(cfg: &GalleryConfig) -> Result<Figure> {
    contour_figure(cfg, "default_contour", Levels::Auto, None)
}

fn default_contour3(cfg: &GalleryConfig) -> Result<Figure> {
    let (grid, h) = terrain(cfg)?;
    let proj = terrain_projector(cfg, &grid, &h);
    let set = contour(&grid, &h, &Levels::Auto)?;
    let n = set.lines.len();
    let mut fig = blank(cfg, "default_contour3").without_axes();
    fig.extend(proj.box_edges(Color::GREY));
    for (i, line) in set.lines.iter().enumerate() {
        let stroke = level_ramp(if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 });
        let z = line.level;
        fig.extend(line.segments.iter().map(|s| {
            Primitive::line(
                proj.project((s[0].0, s[0].1, z)),
                proj.project((s[1].0, s[1].1, z)),
                stroke,
            )
        }));
    }
    Ok(fig)
}

fn contour_10levels(cfg: &GalleryConfig) -> Result<Figure> {
    contour_figure(cfg, "contour_10levels", Levels::Count(10), None)
}

fn contour_10levels_black(cfg: &GalleryConfig) -> Result<Figure> {
    contour_figure(cfg, "contour_10levels_black", Levels::Count(10), Some(Color::BLACK))
}

fn contour_speclevels(cfg: &GalleryConfig) -> Result<Figure> {
    contour_figure(cfg, "contour_speclevels", Levels::Explicit(EXPLICIT_LEVELS.to_vec()), None)
}

fn contour_clabel(cfg: &GalleryConfig) -> Result<Figure> {
    let (grid, h) = terrain(cfg)?;
    let set = contour(&grid, &h, &Levels::Auto)?;
    let mut fig = blank(cfg, "contour_clabel").equal_aspect();
    fig.extend(contour_lines(&set, None));
    for line in &set.lines {
        if let Some(at) = line.label_anchor() {
            fig.push(Primitive::Text {
                at,
                text: line.label(),
                color: Color::BLACK,
            });
        }
    }
    Ok(fig)
}

fn simple_plot(cfg: &GalleryConfig) -> Result<Figure> {
    let (grid, h) = terrain(cfg)?;
    let proj = terrain_projector(cfg, &grid, &h);
    let mut fig = blank(cfg, "simple_plot").without_axes();
    fig.extend(proj.box_edges(Color::GREY));
    fig.extend(surface(&grid, &h, &proj, |_| {
        (Color(90, 140, 210), Some(Color(40, 70, 120)))
    }));
    Ok(fig)
}

fn simple_plot_colours(cfg: &GalleryConfig) -> Result<Figure> {
    let (grid, h) = terrain(cfg)?;
    let proj = terrain_projector(cfg, &grid, &h);
    let curve = cfg.spiral.trace(&cfg.mountain)?;
    let mut fig = blank(cfg, "simple_plot_colours").without_axes();
    fig.extend(proj.box_edges(Color::GREY));
    fig.extend(surface(&grid, &h, &proj, |t| (coolwarm(t), None)));
    fig.push(Primitive::Polyline {
        points: curve.points().map(|p| proj.project(p)).collect(),
        stroke: Color::BLACK,
        width: 2.0,
    });
    Ok(fig)
}

fn quiver_gr(cfg: &GalleryConfig) -> Result<Figure> {
    /// Arrow length per unit field strength.
    const LENGTH: f64 = 0.2;

    let grid = Grid3::cube(AxisSamples::new(0.5, 2.0, 8)?, Indexing::Ij);
    let [u, v, w] = sample_spatial(&InverseSquare::default(), &grid)?;
    let proj = Projector::fit(
        cfg.camera,
        grid.xs()
            .iter()
            .zip(grid.ys().iter())
            .zip(grid.zs().iter())
            .map(|((&x, &y), &z)| (x, y, z)),
    );
    let mut fig = blank(cfg, "quiver_gr").without_axes();
    fig.extend(proj.box_edges(Color::GREY));
    for (((&x, &y), &z), ((&du, &dv), &dw)) in grid
        .xs()
        .iter()
        .zip(grid.ys().iter())
        .zip(grid.zs().iter())
        .zip(u.iter().zip(v.iter()).zip(w.iter()))
    {
        fig.push(Primitive::Arrow {
            from: proj.project((x, y, z)),
            to: proj.project((x + LENGTH * du, y + LENGTH * dv, z + LENGTH * dw)),
            stroke: Color::RED,
        });
    }
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_match_figures() {
        let cfg = GalleryConfig::default();
        let figs = build(&cfg).unwrap();
        let names = names();
        assert_eq!(figs.len(), 11);
        for (fig, name) in figs.iter().zip(&names) {
            assert_eq!(&fig.name, name);
            assert!(!fig.primitives.is_empty(), "{name} is empty");
        }
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }

    #[test]
    fn clabel_figure_carries_one_label_per_level() {
        let fig = contour_clabel(&GalleryConfig::default()).unwrap();
        let labels: Vec<_> = fig
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["500", "1000", "1500", "2000"]);
    }

    #[test]
    fn clabel_png_shows_the_labels() {
        let cfg = GalleryConfig {
            width: 400,
            height: 300,
            ..GalleryConfig::default()
        };
        let fig = contour_clabel(&cfg).unwrap();
        let mut unlabelled = fig.clone();
        unlabelled
            .primitives
            .retain(|p| !matches!(p, Primitive::Text { .. }));
        assert!(unlabelled.primitives.len() < fig.primitives.len());
        assert_ne!(fig.to_image().unwrap(), unlabelled.to_image().unwrap());
    }

    #[test]
    fn black_contours_are_black() {
        let fig = contour_10levels_black(&GalleryConfig::default()).unwrap();
        assert!(fig.primitives.iter().all(|p| matches!(
            p,
            Primitive::Polyline { stroke, .. } if *stroke == Color::BLACK
        )));
    }

    #[test]
    fn quiver_gr_has_an_arrow_per_sample() {
        let fig = quiver_gr(&GalleryConfig::default()).unwrap();
        let arrows = fig
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Arrow { .. }))
            .count();
        assert_eq!(arrows, 8 * 8 * 8);
    }

    #[test]
    fn scaled_preset_builds_too() {
        let cfg = GalleryConfig {
            mountain: Mountain::SCALED,
            ..GalleryConfig::default()
        };
        // 500..2000 lie above a 22.77 peak: the explicit figure has no lines.
        let fig = contour_speclevels(&cfg).unwrap();
        assert!(fig.primitives.is_empty());
        assert_eq!(build(&cfg).unwrap().len(), 11);
    }
}
