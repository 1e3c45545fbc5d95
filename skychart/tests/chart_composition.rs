//! End-to-end checks of chart composition: catalog + observer + instant in,
//! drawing primitives out.

use chrono::{DateTime, TimeZone, Utc};
use ephemeris::{
    local_sidereal_time, to_horizontal, HorizontalPoint, ObserverLocation, Transformer,
};
use rstest::rstest;
use skychart::{ChartComposer, ChartStyle, SkyChart};
use starfield::catalogs::embedded::sample_catalog;
use starfield::{ConstellationEdge, SkyCatalog, StarCatalog, StarRecord};
use viz::{DrawingPrimitive, MarkerShape};

fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap()
}

fn new_york() -> ObserverLocation {
    ObserverLocation::new(40.7128, -74.006, 0.0).unwrap()
}

/// A star placed at a chosen altitude and azimuth for `transformer`
fn star_at(
    transformer: &Transformer,
    id: usize,
    altitude: f64,
    azimuth: f64,
    mag: f64,
) -> StarRecord {
    let position = transformer
        .to_celestial(&HorizontalPoint::new(altitude, azimuth))
        .unwrap();
    StarRecord::new(id, position.ra, position.dec, mag).unwrap()
}

fn star_points(chart: &SkyChart) -> Vec<&DrawingPrimitive> {
    chart
        .primitives
        .iter()
        .filter(|p| {
            matches!(
                p,
                DrawingPrimitive::Point {
                    marker: MarkerShape::Star,
                    ..
                }
            )
        })
        .collect()
}

fn segments(chart: &SkyChart) -> usize {
    chart
        .primitives
        .iter()
        .filter(|p| matches!(p, DrawingPrimitive::LineSegment { .. }))
        .count()
}

#[rstest]
#[case(40.7128, -74.006, 2024, 1, 15, 22)]
#[case(-33.8688, 151.2093, 2024, 6, 21, 12)]
#[case(64.1466, -21.9426, 2023, 12, 1, 3)]
#[case(0.0, 0.0, 2025, 3, 20, 0)]
fn test_only_visible_stars_are_drawn(
    #[case] lat: f64,
    #[case] lon: f64,
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] hour: u32,
) {
    test_helpers::init_test_logging();
    let location = ObserverLocation::new(lat, lon, 0.0).unwrap();
    let time = Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap();
    let catalog = sample_catalog().unwrap();

    let chart = ChartComposer::default()
        .compose(&catalog, &location, time)
        .unwrap();

    let expected_visible = catalog
        .stars()
        .filter(|s| {
            to_horizontal(&s.position, &location, time)
                .unwrap()
                .is_above_horizon()
        })
        .count();
    assert_eq!(chart.stats.total_stars, 18);
    assert_eq!(chart.stats.visible_stars, expected_visible);
    // Every visible star lies inside the unit circle, so inside the default bound
    assert_eq!(chart.stats.drawn_stars, expected_visible);

    let points = star_points(&chart);
    assert_eq!(points.len(), expected_visible);
    for p in points {
        if let DrawingPrimitive::Point { position, .. } = p {
            assert!(position.norm_squared() < 1.0, "{position:?} outside horizon");
        }
    }
    assert_eq!(chart.stats.drawn_edges + chart.stats.skipped_edges, 16);
    assert_eq!(segments(&chart), chart.stats.drawn_edges);
}

#[test]
fn test_edge_needs_both_endpoints_visible() {
    let location = new_york();
    let time = instant();
    let transformer = Transformer::new(location, time).unwrap();

    let mut catalog = SkyCatalog::from_stars([
        star_at(&transformer, 1, 10.0, 45.0, 2.0),
        star_at(&transformer, 2, -5.0, 60.0, 2.0),
        star_at(&transformer, 3, 40.0, 200.0, 2.0),
    ]);
    catalog.add_constellation(
        "Test",
        [
            ConstellationEdge::new(1, 2),
            ConstellationEdge::new(1, 3),
            ConstellationEdge::new(3, 999),
        ],
    );

    let chart = ChartComposer::default()
        .compose(&catalog, &location, time)
        .unwrap();

    assert_eq!(chart.stats.visible_stars, 2);
    assert_eq!(chart.stats.drawn_edges, 1);
    assert_eq!(chart.stats.skipped_edges, 2);
    assert_eq!(segments(&chart), 1);
}

#[test]
fn test_edges_ignore_chart_bound() {
    let location = new_york();
    let time = instant();
    let transformer = Transformer::new(location, time).unwrap();

    let mut catalog = SkyCatalog::from_stars([
        star_at(&transformer, 1, 10.0, 90.0, 1.0),
        star_at(&transformer, 2, 80.0, 0.0, 1.0),
    ]);
    catalog.add_constellation("Test", [ConstellationEdge::new(1, 2)]);

    // r(10°) = tan(40°) ≈ 0.84, outside a 0.5 bound
    let style = ChartStyle {
        bound: 0.5,
        ..ChartStyle::default()
    };
    let chart = ChartComposer::new(style)
        .unwrap()
        .compose(&catalog, &location, time)
        .unwrap();

    assert_eq!(chart.stats.visible_stars, 2);
    assert_eq!(chart.stats.drawn_stars, 1);
    assert_eq!(segments(&chart), 1);
}

#[test]
fn test_composition_is_idempotent() {
    let catalog = sample_catalog().unwrap();
    let composer = ChartComposer::default();

    let first = composer
        .compose_named(&catalog, &new_york(), Some("New York City"), instant())
        .unwrap();
    let second = composer
        .compose_named(&catalog, &new_york(), Some("New York City"), instant())
        .unwrap();
    assert_eq!(first, second);

    let canvas = viz::SvgCanvas::new(600, 600, composer.style().canvas_extent()).unwrap();
    assert_eq!(canvas.render(&first.primitives), canvas.render(&second.primitives));
}

#[test]
fn test_empty_catalog_draws_grid_and_title_only() {
    let chart = ChartComposer::default()
        .compose(&SkyCatalog::new(), &new_york(), instant())
        .unwrap();

    let kinds: Vec<&str> = chart.primitives.iter().map(|p| p.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "background",
            "circle",
            "circle",
            "circle",
            "text",
            "text",
            "text",
            "text",
            "point",
            "text",
            "text",
        ]
    );
    assert_eq!(chart.stats, skychart::ChartStats::default());
}

#[test]
fn test_paint_order() {
    let catalog = sample_catalog().unwrap();
    // Cassiopeia is high in the north at this hour
    let chart = ChartComposer::default()
        .compose(&catalog, &new_york(), instant())
        .unwrap();
    assert!(chart.stats.drawn_stars > 0);
    assert!(chart.stats.drawn_edges > 0);

    let rank = |p: &DrawingPrimitive| match p {
        DrawingPrimitive::Background { .. } => 0,
        DrawingPrimitive::Circle { .. } => 1,
        DrawingPrimitive::Text { content, .. } if content.len() <= 5 => 2,
        DrawingPrimitive::Point {
            marker: MarkerShape::Star,
            ..
        } => 3,
        DrawingPrimitive::LineSegment { .. } => 4,
        _ => 5,
    };
    let ranks: Vec<u8> = chart.primitives.iter().map(rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");

    match chart.primitives.last() {
        Some(DrawingPrimitive::Text { content, bold, .. }) => {
            assert!(content.starts_with("Night Sky View\n"));
            assert!(content.ends_with("2024-01-15 22:00 UTC"));
            assert!(*bold);
        }
        other => panic!("title should be last, got {other:?}"),
    }
}

#[test]
fn test_stars_emitted_in_id_order() {
    let location = new_york();
    let time = instant();
    let transformer = Transformer::new(location, time).unwrap();
    let catalog = SkyCatalog::from_stars([
        star_at(&transformer, 30, 50.0, 0.0, 1.0),
        star_at(&transformer, 10, 50.0, 90.0, 1.0),
        star_at(&transformer, 20, 50.0, 180.0, 1.0),
    ]);

    let chart = ChartComposer::default()
        .compose(&catalog, &location, time)
        .unwrap();
    let ys: Vec<f64> = star_points(&chart)
        .into_iter()
        .filter_map(|p| match p {
            DrawingPrimitive::Point { position, .. } => Some(position.y),
            _ => None,
        })
        .collect();
    // ids 10 (east, y≈0), 20 (south, y<0), 30 (north, y>0)
    assert_eq!(ys.len(), 3);
    assert!(ys[0].abs() < 1e-9);
    assert!(ys[1] < 0.0);
    assert!(ys[2] > 0.0);
}

#[test]
fn test_star_at_sidereal_meridian_lands_at_origin() {
    let location = ObserverLocation::new(0.0, 0.0, 0.0).unwrap();
    let time = instant();
    let lst_hours = local_sidereal_time(&location, time).unwrap();

    let catalog =
        SkyCatalog::from_stars([StarRecord::new(7, lst_hours * 15.0, 0.0, 0.0).unwrap()]);
    let chart = ChartComposer::default()
        .compose(&catalog, &location, time)
        .unwrap();

    let points = star_points(&chart);
    assert_eq!(points.len(), 1);
    match points[0] {
        DrawingPrimitive::Point { position, size, .. } => {
            assert!(position.x.abs() < 1e-6 && position.y.abs() < 1e-6, "{position:?}");
            assert_eq!(*size, 8.0);
        }
        _ => unreachable!(),
    }
}

#[rstest]
#[case(0.0, 8.0)]
#[case(3.0, 4.5)]
#[case(6.0, 1.0)]
#[case(10.0, 1.0)]
#[case(-1.5, 8.0)]
fn test_star_sizes_follow_magnitude(#[case] magnitude: f64, #[case] expected: f64) {
    let location = new_york();
    let time = instant();
    let transformer = Transformer::new(location, time).unwrap();
    let catalog = SkyCatalog::from_stars([star_at(&transformer, 1, 45.0, 120.0, magnitude)]);

    let chart = ChartComposer::default()
        .compose(&catalog, &location, time)
        .unwrap();
    let points = star_points(&chart);
    assert_eq!(points.len(), 1);
    match points[0] {
        DrawingPrimitive::Point { size, .. } => assert!((size - expected).abs() < 1e-12),
        other => panic!("expected a star, got {other:?}"),
    }
}

#[test]
fn test_invalid_location_is_an_error() {
    let bad = ObserverLocation {
        latitude: 95.0,
        longitude: 0.0,
        elevation: 0.0,
    };
    let result = ChartComposer::default().compose(&sample_catalog().unwrap(), &bad, instant());
    assert!(matches!(result, Err(skychart::ComposeError::Transform(_))));
}
