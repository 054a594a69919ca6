//! Figure drawing through `plotters`.
//!
//! One routine draws a [`Figure`] onto any [`DrawingBackend`]; SVG and PNG
//! differ only in the backend handed to it. Axes, ticks and axis labels come
//! from plotters' mesh; primitives are drawn in data coordinates on the
//! chart's plotting area, arrow heads in pixel space on the root area.

use super::{arrow_head, Color, Figure, Primitive, Viewport};
use crate::{Error, Result};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, DrawingArea, DrawingAreaErrorKind, DrawingBackend, IntoDrawingArea,
    IntoFont, PathElement, Polygon, RGBColor, Rectangle, SVGBackend, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, Color as _, FontStyle};
use std::sync::OnceLock;

/// Family name every text style in this module asks for.
const FONT_FAMILY: &str = "sans-serif";
const TICK_FONT_SIZE: u32 = 13;
const DESC_FONT_SIZE: u32 = 15;
const LABEL_FONT_SIZE: u32 = 13;

/// Register the embedded face once per process; bitmap text needs it.
fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, epaint_default_fonts::UBUNTU_LIGHT).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(Error::Draw("embedded font could not be parsed".into()))
    }
}

fn rgb(c: Color) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn tick_label(v: &f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::Draw(e.to_string())
}

fn draw_figure<DB: DrawingBackend>(
    fig: &Figure,
    root: &DrawingArea<DB, Shift>,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&rgb(Color::WHITE))?;
    let vp = fig.viewport();
    let b = vp.bounds;

    let mut builder = ChartBuilder::on(root);
    builder.margin(Viewport::MARGIN);
    if fig.axes {
        builder
            .x_label_area_size(Viewport::LABEL_AREA)
            .y_label_area_size(Viewport::LABEL_AREA);
    }
    let mut chart = builder.build_cartesian_2d(b.x0..b.x1, b.y0..b.y1)?;

    if fig.axes {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(6)
            .y_labels(6)
            .x_label_formatter(&tick_label)
            .y_label_formatter(&tick_label)
            .label_style((FONT_FAMILY, TICK_FONT_SIZE))
            .axis_desc_style((FONT_FAMILY, DESC_FONT_SIZE));
        if let Some(label) = &fig.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &fig.y_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;
    }

    let area = chart.plotting_area();
    for p in &fig.primitives {
        match p {
            Primitive::Polyline {
                points,
                stroke,
                width,
            } => {
                let w = width.round().max(1.0) as u32;
                area.draw(&PathElement::new(points.clone(), rgb(*stroke).stroke_width(w)))?;
            }
            Primitive::Arrow { from, to, stroke } => {
                let style = rgb(*stroke);
                area.draw(&PathElement::new(vec![*from, *to], style.stroke_width(1)))?;
                let (a, c) = (chart.backend_coord(from), chart.backend_coord(to));
                let shaft = ((a.0 as f64, a.1 as f64), (c.0 as f64, c.1 as f64));
                if let Some(head) = arrow_head(shaft.0, shaft.1) {
                    let pts: Vec<(i32, i32)> = head
                        .iter()
                        .map(|&(x, y)| (x.round() as i32, y.round() as i32))
                        .collect();
                    root.draw(&Polygon::new(pts, style.filled()))?;
                }
            }
            Primitive::Polygon {
                points,
                fill,
                stroke,
            } => {
                area.draw(&Polygon::new(points.clone(), rgb(*fill).filled()))?;
                if let (Some(s), Some(first)) = (stroke, points.first()) {
                    let mut ring = points.clone();
                    ring.push(*first);
                    area.draw(&PathElement::new(ring, rgb(*s).stroke_width(1)))?;
                }
            }
            Primitive::Text { at, text, color } => {
                let style = (FONT_FAMILY, LABEL_FONT_SIZE)
                    .into_font()
                    .color(&rgb(*color))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                area.draw(&Text::new(text.clone(), *at, style))?;
            }
        }
    }

    if fig.axes {
        area.draw(&Rectangle::new(
            [(b.x0, b.y0), (b.x1, b.y1)],
            rgb(Color::BLACK).stroke_width(1),
        ))?;
    }
    root.present()
}

pub(super) fn svg(fig: &Figure) -> Result<String> {
    ensure_font()?;
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, (fig.width, fig.height)).into_drawing_area();
        draw_figure(fig, &root).map_err(draw_error)?;
    }
    Ok(out)
}

pub(super) fn raster(fig: &Figure) -> Result<RgbImage> {
    ensure_font()?;
    let mut buf = vec![0u8; fig.width as usize * fig.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (fig.width, fig.height)).into_drawing_area();
        draw_figure(fig, &root).map_err(draw_error)?;
    }
    RgbImage::from_raw(fig.width, fig.height, buf)
        .ok_or_else(|| Error::Draw("pixel buffer does not match the figure size".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn labelled() -> Figure {
        let mut fig = Figure::new("t").with_size(320, 240).with_labels("x", "y");
        fig.push(Primitive::line((0.0, 0.0), (10.0, 10.0), Color::BLUE));
        fig.push(Primitive::Text {
            at: (5.0, 2.0),
            text: "1500".into(),
            color: Color::BLACK,
        });
        fig
    }

    #[test]
    fn tick_labels_drop_trailing_zeros() {
        assert_eq!(tick_label(&5.0), "5");
        assert_eq!(tick_label(&-2.5), "-2.5");
        assert_eq!(tick_label(&0.25), "0.25");
    }

    #[test]
    fn svg_document_contains_every_primitive() {
        let mut fig = labelled();
        fig.push(Primitive::Arrow {
            from: (0.0, 10.0),
            to: (10.0, 0.0),
            stroke: Color::RED,
        });
        fig.push(Primitive::Polygon {
            points: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
            fill: Color::GREY,
            stroke: Some(Color::BLACK),
        });
        fig.push(Primitive::Text {
            at: (1.0, 1.0),
            text: "a<b".into(),
            color: Color::BLACK,
        });
        let doc = svg(&fig).unwrap();
        assert!(doc.contains("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains("<polyline"));
        assert!(doc.contains("<polygon"));
        assert!(doc.contains("#FF0000"), "arrow colour missing");
        assert!(doc.contains(">1500"));
        assert!(doc.contains("a&lt;b"));
    }

    #[test]
    fn raster_has_requested_size_and_draws_lines() {
        let img = raster(&labelled()).unwrap();
        assert_eq!(img.dimensions(), (320, 240));
        assert!(img.pixels().any(|p| *p == Rgb([0, 0, 255])));
    }

    #[test]
    fn raster_draws_text() {
        let with_text = raster(&labelled()).unwrap();
        let mut bare = labelled();
        bare.primitives.retain(|p| !matches!(p, Primitive::Text { .. }));
        let without_text = raster(&bare).unwrap();
        let differing = with_text
            .pixels()
            .zip(without_text.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(differing > 20, "only {differing} pixels changed by the label");
    }

    #[test]
    fn figure_without_axes_has_no_frame() {
        let mut fig = Figure::new("bare").with_size(200, 160).without_axes();
        fig.push(Primitive::line((0.0, 0.0), (1.0, 1.0), Color::RED));
        let img = raster(&fig).unwrap();
        // Top-left corner of the plotting area stays white without a frame.
        let m = Viewport::MARGIN;
        assert_eq!(*img.get_pixel(m, m), Rgb([255, 255, 255]));
        assert!(img.pixels().any(|p| *p == Rgb([255, 0, 0])));
    }
}
