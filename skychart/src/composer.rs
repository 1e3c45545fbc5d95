//! Turns a catalog, an observer and an instant into drawing primitives.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ephemeris::{cardinal_azimuths, HorizontalPoint, ObserverLocation, Transformer};
use log::{debug, info, trace};
use rayon::prelude::*;
use starfield::{SkyCatalog, StarCatalog};
use viz::{DrawingPrimitive, MarkerShape, Point, TextAlignment};

use crate::error::ComposeError;
use crate::projection::{magnitude_to_size, project, ring_radius};
use crate::style::ChartStyle;

/// Where one star ended up for this render
#[derive(Debug, Clone, Copy)]
struct StarPlacement {
    horizontal: HorizontalPoint,
    plot: Point,
}

impl StarPlacement {
    fn visible(&self) -> bool {
        self.horizontal.is_above_horizon()
    }
}

/// Counts gathered while composing a chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartStats {
    pub total_stars: usize,
    /// Above the horizon
    pub visible_stars: usize,
    /// Visible and inside the chart bound
    pub drawn_stars: usize,
    pub drawn_edges: usize,
    /// Edges with a missing or hidden endpoint
    pub skipped_edges: usize,
}

/// A composed chart: primitives in paint order plus statistics
#[derive(Debug, Clone, PartialEq)]
pub struct SkyChart {
    pub primitives: Vec<DrawingPrimitive>,
    pub stats: ChartStats,
}

/// Builds sky charts with a fixed style.
#[derive(Debug, Clone, Default)]
pub struct ChartComposer {
    style: ChartStyle,
}

impl ChartComposer {
    /// Fails with [`ComposeError::Style`] if the style cannot be drawn.
    pub fn new(style: ChartStyle) -> Result<Self, ComposeError> {
        style.validate()?;
        Ok(Self { style })
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Compose a chart titled with the bare coordinates.
    pub fn compose(
        &self,
        catalog: &SkyCatalog,
        location: &ObserverLocation,
        time: DateTime<Utc>,
    ) -> Result<SkyChart, ComposeError> {
        self.compose_named(catalog, location, None, time)
    }

    /// Compose a chart, naming the location in the title when given.
    ///
    /// Paint order is background, horizon and altitude rings, cardinal
    /// labels, stars, constellation lines, then zenith marker and title.
    /// Stars are emitted by ascending id and lines by constellation name, so
    /// identical inputs give identical output.
    pub fn compose_named(
        &self,
        catalog: &SkyCatalog,
        location: &ObserverLocation,
        display_name: Option<&str>,
        time: DateTime<Utc>,
    ) -> Result<SkyChart, ComposeError> {
        let transformer = Transformer::new(*location, time)?;
        info!(
            "Composing chart for {} stars at {}",
            catalog.len(),
            time.format("%Y-%m-%d %H:%M:%S UTC")
        );

        let placements: HashMap<usize, StarPlacement> = catalog
            .star_map()
            .par_iter()
            .map(|(&id, star)| -> Result<(usize, StarPlacement), ComposeError> {
                let horizontal = transformer.to_horizontal(&star.position)?;
                let plot = project(&horizontal);
                Ok((id, StarPlacement { horizontal, plot }))
            })
            .collect::<Result<_, ComposeError>>()?;

        let mut stats = ChartStats {
            total_stars: catalog.len(),
            visible_stars: placements.values().filter(|p| p.visible()).count(),
            ..ChartStats::default()
        };

        let mut primitives = Vec::with_capacity(catalog.len() + 16);
        self.draw_grid(&mut primitives);
        self.draw_cardinal_labels(&mut primitives);
        self.draw_stars(&mut primitives, catalog, &placements, &mut stats);
        self.draw_constellation_lines(&mut primitives, catalog, &placements, &mut stats);
        self.draw_title(&mut primitives, location, display_name, time);

        debug!(
            "Chart stats: {} visible of {}, {} drawn, {} edges drawn, {} skipped",
            stats.visible_stars,
            stats.total_stars,
            stats.drawn_stars,
            stats.drawn_edges,
            stats.skipped_edges
        );
        Ok(SkyChart { primitives, stats })
    }

    fn draw_grid(&self, out: &mut Vec<DrawingPrimitive>) {
        let s = &self.style;
        out.push(DrawingPrimitive::Background {
            color: s.palette.background,
        });
        out.push(DrawingPrimitive::Circle {
            center: Point::ORIGIN,
            radius: ring_radius(0.0),
            stroke_color: s.palette.horizon,
            stroke_width: s.horizon_width,
            dashed: false,
            alpha: 1.0,
        });
        for &altitude in &s.ring_altitudes {
            let radius = ring_radius(altitude);
            if radius < s.bound {
                out.push(DrawingPrimitive::Circle {
                    center: Point::ORIGIN,
                    radius,
                    stroke_color: s.palette.altitude_circles,
                    stroke_width: s.ring_width,
                    dashed: true,
                    alpha: s.ring_alpha,
                });
            }
        }
    }

    fn draw_cardinal_labels(&self, out: &mut Vec<DrawingPrimitive>) {
        let s = &self.style;
        for (direction, azimuth) in cardinal_azimuths() {
            let on_horizon = project(&HorizontalPoint::new(0.0, azimuth));
            out.push(DrawingPrimitive::Text {
                position: Point::new(on_horizon.x * s.label_margin, on_horizon.y * s.label_margin),
                content: direction.label().to_string(),
                alignment: TextAlignment::Center,
                color: s.palette.cardinal_text,
                font_size: s.label_font_size,
                bold: true,
            });
        }
    }

    fn draw_stars(
        &self,
        out: &mut Vec<DrawingPrimitive>,
        catalog: &SkyCatalog,
        placements: &HashMap<usize, StarPlacement>,
        stats: &mut ChartStats,
    ) {
        let s = &self.style;
        let bound_sq = s.bound * s.bound;
        for star in catalog.stars() {
            let Some(placement) = placements.get(&star.id) else {
                continue;
            };
            if !placement.visible() || placement.plot.norm_squared() > bound_sq {
                continue;
            }
            trace!(
                "star {} alt {:.3} az {:.3}",
                star.id,
                placement.horizontal.altitude,
                placement.horizontal.azimuth
            );
            out.push(DrawingPrimitive::Point {
                position: placement.plot,
                size: magnitude_to_size(
                    star.magnitude,
                    s.min_star_size,
                    s.max_star_size,
                    s.magnitude_ceiling,
                ),
                color: s.palette.stars,
                marker: MarkerShape::Star,
                alpha: s.star_alpha,
            });
            stats.drawn_stars += 1;
        }
    }

    fn draw_constellation_lines(
        &self,
        out: &mut Vec<DrawingPrimitive>,
        catalog: &SkyCatalog,
        placements: &HashMap<usize, StarPlacement>,
        stats: &mut ChartStats,
    ) {
        let s = &self.style;
        for (name, edges) in catalog.constellations() {
            for edge in edges {
                let endpoints = placements
                    .get(&edge.star_a)
                    .zip(placements.get(&edge.star_b))
                    .filter(|(a, b)| a.visible() && b.visible());
                match endpoints {
                    Some((a, b)) => {
                        out.push(DrawingPrimitive::LineSegment {
                            from: a.plot,
                            to: b.plot,
                            color: s.palette.constellation_lines,
                            width: s.line_width,
                            alpha: s.line_alpha,
                        });
                        stats.drawn_edges += 1;
                    }
                    None => {
                        trace!("{name}: skipping edge {}-{}", edge.star_a, edge.star_b);
                        stats.skipped_edges += 1;
                    }
                }
            }
        }
    }

    fn draw_title(
        &self,
        out: &mut Vec<DrawingPrimitive>,
        location: &ObserverLocation,
        display_name: Option<&str>,
        time: DateTime<Utc>,
    ) {
        let s = &self.style;
        out.push(DrawingPrimitive::Point {
            position: Point::ORIGIN,
            size: s.zenith_marker_size,
            color: s.palette.cardinal_text,
            marker: MarkerShape::Plus,
            alpha: s.zenith_alpha,
        });
        out.push(DrawingPrimitive::Text {
            position: Point::new(0.0, -0.1),
            content: "Zenith".to_string(),
            alignment: TextAlignment::Top,
            color: s.palette.cardinal_text,
            font_size: s.zenith_font_size,
            bold: false,
        });
        out.push(DrawingPrimitive::Text {
            position: Point::new(0.0, s.bound + s.title_offset),
            content: title_text(location, display_name, time),
            alignment: TextAlignment::Top,
            color: s.palette.cardinal_text,
            font_size: s.title_font_size,
            bold: true,
        });
    }
}

/// Three-line chart title: heading, location, UTC time to the minute.
pub fn title_text(
    location: &ObserverLocation,
    display_name: Option<&str>,
    time: DateTime<Utc>,
) -> String {
    let coordinates = format!(
        "Lat: {:.2}°, Lon: {:.2}°",
        location.latitude, location.longitude
    );
    let location_line = match display_name {
        Some(name) if !name.is_empty() => format!("{name} ({coordinates})"),
        _ => coordinates,
    };
    format!(
        "Night Sky View\n{}\n{}",
        location_line,
        time.format("%Y-%m-%d %H:%M UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleError;
    use chrono::TimeZone;

    #[test]
    fn test_title_text() {
        let location = ObserverLocation::new(40.7128, -74.006, 0.0).unwrap();
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 3, 4, 59).unwrap();

        assert_eq!(
            title_text(&location, None, time),
            "Night Sky View\nLat: 40.71°, Lon: -74.01°\n2024-01-15 03:04 UTC"
        );
        assert_eq!(
            title_text(&location, Some("New York City"), time),
            "Night Sky View\nNew York City (Lat: 40.71°, Lon: -74.01°)\n2024-01-15 03:04 UTC"
        );
    }

    #[test]
    fn test_rings_outside_bound_omitted() {
        let style = ChartStyle {
            bound: 0.5,
            ..ChartStyle::default()
        };
        let composer = ChartComposer::new(style).unwrap();
        let mut out = Vec::new();
        composer.draw_grid(&mut out);

        // background, horizon, and only the 60° ring (radius ≈ 0.27)
        assert_eq!(out.len(), 3);
        assert!(matches!(out[2], DrawingPrimitive::Circle { dashed: true, .. }));
    }

    #[test]
    fn test_horizon_circle_matches_boundary() {
        let composer = ChartComposer::default();
        let mut out = Vec::new();
        composer.draw_grid(&mut out);

        let radius = match &out[1] {
            DrawingPrimitive::Circle {
                radius, dashed, ..
            } => {
                assert!(!dashed);
                *radius
            }
            other => panic!("expected the horizon circle, got {other:?}"),
        };
        for p in crate::projection::horizon_boundary(16) {
            assert!((p.norm_squared().sqrt() - radius).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cardinal_labels_positions() {
        let composer = ChartComposer::default();
        let mut out = Vec::new();
        composer.draw_cardinal_labels(&mut out);
        assert_eq!(out.len(), 4);

        match &out[1] {
            DrawingPrimitive::Text {
                position, content, ..
            } => {
                assert_eq!(content, "East");
                assert!((position.x - 1.1).abs() < 1e-12);
                assert!(position.y.abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_style_rejected() {
        let style = ChartStyle {
            bound: -1.0,
            ..ChartStyle::default()
        };
        assert!(matches!(
            ChartComposer::new(style),
            Err(ComposeError::Style(StyleError::NotPositive { field: "bound", .. }))
        ));

        let style = ChartStyle {
            min_star_size: 9.0,
            ..ChartStyle::default()
        };
        assert!(matches!(
            ChartComposer::new(style),
            Err(ComposeError::Style(StyleError::InvertedSizes { .. }))
        ));
    }
}
