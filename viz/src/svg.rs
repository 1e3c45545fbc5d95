//! SVG document writer for drawing primitives.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::Path;

use log::{debug, info};

use crate::primitives::{Color, DrawingPrimitive, MarkerShape, Point, TextAlignment};
use crate::raster::rasterize_png;
use crate::{Result, VizError};

/// Width of the reference layout in points (12 in at 72 pt/in).
const REFERENCE_POINTS: f64 = 864.0;

/// Line height as a multiple of the font size
const LINE_HEIGHT: f64 = 1.2;

/// Maps the plot square `[-extent, extent]²` onto a pixel canvas.
///
/// The plot plane has y pointing up; SVG has y pointing down. The square is
/// centered and scaled to fit the shorter side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgCanvas {
    pub width_px: u32,
    pub height_px: u32,
    pub extent: f64,
}

impl SvgCanvas {
    pub fn new(width_px: u32, height_px: u32, extent: f64) -> Result<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(VizError::InvalidCanvas(format!(
                "size must be non-zero, got {width_px}x{height_px}"
            )));
        }
        if !(extent.is_finite() && extent > 0.0) {
            return Err(VizError::InvalidCanvas(format!(
                "extent must be positive, got {extent}"
            )));
        }
        Ok(Self {
            width_px,
            height_px,
            extent,
        })
    }

    fn min_side(&self) -> f64 {
        f64::from(self.width_px.min(self.height_px))
    }

    /// Pixels per plot unit
    pub fn scale(&self) -> f64 {
        self.min_side() / (2.0 * self.extent)
    }

    /// Pixels per point, so that a 12 inch reference layout fills the canvas
    pub fn point_scale(&self) -> f64 {
        self.min_side() / REFERENCE_POINTS
    }

    /// Plot-plane point to pixel coordinates
    pub fn to_pixel(&self, p: Point) -> (f64, f64) {
        let s = self.scale();
        (
            f64::from(self.width_px) / 2.0 + p.x * s,
            f64::from(self.height_px) / 2.0 - p.y * s,
        )
    }

    /// Render primitives, in order, into a complete SVG document.
    pub fn render(&self, primitives: &[DrawingPrimitive]) -> String {
        let mut out = String::with_capacity(256 + primitives.len() * 120);
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width_px,
            h = self.height_px
        );
        for primitive in primitives {
            self.write_primitive(&mut out, primitive);
        }
        out.push_str("</svg>\n");
        debug!("Rendered {} primitives to SVG", primitives.len());
        out
    }

    fn write_primitive(&self, out: &mut String, primitive: &DrawingPrimitive) {
        let pt = self.point_scale();
        match primitive {
            DrawingPrimitive::Background { color } => {
                let _ = writeln!(
                    out,
                    r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"{}/>"#,
                    self.width_px,
                    self.height_px,
                    color.to_svg_rgb(),
                    opacity_attr("fill-opacity", *color, 1.0)
                );
            }
            DrawingPrimitive::Circle {
                center,
                radius,
                stroke_color,
                stroke_width,
                dashed,
                alpha,
            } => {
                let (cx, cy) = self.to_pixel(*center);
                let dash = if *dashed {
                    format!(r#" stroke-dasharray="{:.2} {:.2}""#, 6.0 * pt, 4.0 * pt)
                } else {
                    String::new()
                };
                let _ = writeln!(
                    out,
                    r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{:.2}"{}{dash}/>"#,
                    radius * self.scale(),
                    stroke_color.to_svg_rgb(),
                    stroke_width * pt,
                    opacity_attr("stroke-opacity", *stroke_color, *alpha)
                );
            }
            DrawingPrimitive::Text {
                position,
                content,
                alignment,
                color,
                font_size,
                bold,
            } => self.write_text(out, *position, content, *alignment, *color, *font_size, *bold),
            DrawingPrimitive::Point {
                position,
                size,
                color,
                marker,
                alpha,
            } => self.write_marker(out, *position, *size, *color, *marker, *alpha),
            DrawingPrimitive::LineSegment {
                from,
                to,
                color,
                width,
                alpha,
            } => {
                let (x1, y1) = self.to_pixel(*from);
                let (x2, y2) = self.to_pixel(*to);
                let _ = writeln!(
                    out,
                    r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{:.2}"{}/>"#,
                    color.to_svg_rgb(),
                    width * pt,
                    opacity_attr("stroke-opacity", *color, *alpha)
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_text(
        &self,
        out: &mut String,
        position: Point,
        content: &str,
        alignment: TextAlignment,
        color: Color,
        font_size: f64,
        bold: bool,
    ) {
        let (x, y) = self.to_pixel(position);
        let size_px = font_size * self.point_scale();
        let line_px = size_px * LINE_HEIGHT;
        let lines: Vec<&str> = content.lines().collect();
        let block_height = line_px * lines.len().saturating_sub(1) as f64;

        // Baseline of the first line. Cap height is roughly 0.7 em.
        let first_baseline = match alignment {
            TextAlignment::Top => y + size_px * 0.8,
            TextAlignment::Center => y - block_height / 2.0 + size_px * 0.35,
        };

        let weight = if bold { r#" font-weight="bold""# } else { "" };
        let _ = write!(
            out,
            r#"<text x="{x:.2}" y="{first_baseline:.2}" font-family="sans-serif" font-size="{size_px:.2}" text-anchor="middle" fill="{}"{}{weight}>"#,
            color.to_svg_rgb(),
            opacity_attr("fill-opacity", color, 1.0)
        );
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { line_px };
            let _ = write!(
                out,
                r#"<tspan x="{x:.2}" dy="{dy:.2}">{}</tspan>"#,
                escape_xml(line)
            );
        }
        out.push_str("</text>\n");
    }

    fn write_marker(
        &self,
        out: &mut String,
        position: Point,
        size: f64,
        color: Color,
        marker: MarkerShape,
        alpha: f64,
    ) {
        let (cx, cy) = self.to_pixel(position);
        let r = size * self.point_scale() / 2.0;
        let fill = color.to_svg_rgb();
        match marker {
            MarkerShape::Circle => {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill}"{}/>"#,
                    opacity_attr("fill-opacity", color, alpha)
                );
            }
            MarkerShape::Star => {
                let points = star_polygon(cx, cy, r, r * 0.4);
                let _ = writeln!(
                    out,
                    r#"<polygon points="{points}" fill="{fill}"{}/>"#,
                    opacity_attr("fill-opacity", color, alpha)
                );
            }
            MarkerShape::Plus => {
                let w = (r / 4.0).max(0.5);
                let _ = writeln!(
                    out,
                    r#"<path d="M{:.2} {cy:.2}H{:.2}M{cx:.2} {:.2}V{:.2}" stroke="{fill}" stroke-width="{w:.2}" fill="none"{}/>"#,
                    cx - r,
                    cx + r,
                    cy - r,
                    cy + r,
                    opacity_attr("stroke-opacity", color, alpha)
                );
            }
        }
    }
}

/// Opacity attribute combining the color's alpha with an extra factor;
/// omitted when fully opaque.
fn opacity_attr(name: &str, color: Color, alpha: f64) -> String {
    let opacity = (color.opacity() * alpha).clamp(0.0, 1.0);
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{opacity:.3}""#)
    }
}

/// Five-pointed star with its top point straight up, in pixel space.
fn star_polygon(cx: f64, cy: f64, outer: f64, inner: f64) -> String {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = PI / 5.0 * i as f64;
            format!("{:.2},{:.2}", cx + r * angle.sin(), cy - r * angle.cos())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Write primitives to `path`, as SVG or PNG depending on the extension.
pub fn write_chart<P: AsRef<Path>>(
    primitives: &[DrawingPrimitive],
    canvas: &SvgCanvas,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let svg = canvas.render(primitives);
    match extension.as_str() {
        "svg" => std::fs::write(path, svg)?,
        "png" => rasterize_png(&svg, path)?,
        other => return Err(VizError::UnsupportedFormat(other.to_string())),
    }
    info!("Chart written to {}", path.display());
    Ok(())
}
