//! Chart layout and color configuration.
//!
//! Every constant the composer uses lives in [`ChartStyle`]. Styles are stored
//! as JSON; missing fields take their default, so a file only needs the
//! values it overrides:
//!
//! ```json
//! { "bound": 2.5, "palette": { "stars": "#ffeecc" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use viz::Color;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("minimum star size {min} exceeds maximum {max}")]
    InvertedSizes { min: f64, max: f64 },

    #[error("ring altitude {0} outside (-90, 90)")]
    RingAltitude(f64),

    #[error("{field} must be in [0, 1], got {value}")]
    Alpha { field: &'static str, value: f64 },
}

/// Colors of each chart element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub horizon: Color,
    pub stars: Color,
    pub constellation_lines: Color,
    pub cardinal_text: Color,
    pub altitude_circles: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x00, 0x00, 0x11),
            horizon: Color::rgb(0x44, 0x44, 0x44),
            stars: Color::rgb(0xff, 0xff, 0xff),
            constellation_lines: Color::rgb(0x88, 0x88, 0x88),
            cardinal_text: Color::rgb(0xcc, 0xcc, 0xcc),
            altitude_circles: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

/// Layout, sizing and palette for a chart.
///
/// Lengths such as `bound` are in plot units (horizon radius = 1); widths,
/// sizes and font sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Stars farther than this from the center are not drawn
    pub bound: f64,
    /// Magnitude drawn at `min_star_size`
    pub magnitude_ceiling: f64,
    pub min_star_size: f64,
    pub max_star_size: f64,
    /// Dashed altitude circles, in degrees; only drawn inside `bound`
    pub ring_altitudes: Vec<f64>,
    /// Cardinal labels sit at this multiple of the horizon radius
    pub label_margin: f64,
    /// Title sits this far above `bound`
    pub title_offset: f64,
    /// Extra room around `bound` on the output canvas
    pub canvas_margin: f64,
    pub horizon_width: f64,
    pub ring_width: f64,
    pub ring_alpha: f64,
    pub line_width: f64,
    pub line_alpha: f64,
    pub star_alpha: f64,
    pub zenith_marker_size: f64,
    pub zenith_alpha: f64,
    pub label_font_size: f64,
    pub title_font_size: f64,
    pub zenith_font_size: f64,
    pub palette: Palette,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bound: 2.0,
            magnitude_ceiling: 6.0,
            min_star_size: 1.0,
            max_star_size: 8.0,
            ring_altitudes: vec![30.0, 60.0],
            label_margin: 1.1,
            title_offset: 0.3,
            canvas_margin: 0.4,
            horizon_width: 2.0,
            ring_width: 1.0,
            ring_alpha: 0.5,
            line_width: 1.0,
            line_alpha: 0.7,
            star_alpha: 0.9,
            zenith_marker_size: 4.5,
            zenith_alpha: 0.8,
            label_font_size: 12.0,
            title_font_size: 14.0,
            zenith_font_size: 10.0,
            palette: Palette::default(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), StyleError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StyleError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), StyleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StyleError::Negative { field, value })
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), StyleError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StyleError::Alpha { field, value })
    }
}

impl ChartStyle {
    /// Check that the style describes a drawable chart.
    ///
    /// The magnitude ceiling may be non-positive; every star is then drawn
    /// at `max_star_size`.
    pub fn validate(&self) -> Result<(), StyleError> {
        positive("bound", self.bound)?;
        positive("label_margin", self.label_margin)?;
        positive("min_star_size", self.min_star_size)?;
        positive("max_star_size", self.max_star_size)?;
        positive("label_font_size", self.label_font_size)?;
        positive("title_font_size", self.title_font_size)?;
        positive("zenith_font_size", self.zenith_font_size)?;
        positive("zenith_marker_size", self.zenith_marker_size)?;
        positive("horizon_width", self.horizon_width)?;
        positive("ring_width", self.ring_width)?;
        positive("line_width", self.line_width)?;
        non_negative("title_offset", self.title_offset)?;
        non_negative("canvas_margin", self.canvas_margin)?;
        if self.min_star_size > self.max_star_size {
            return Err(StyleError::InvertedSizes {
                min: self.min_star_size,
                max: self.max_star_size,
            });
        }
        for &alt in &self.ring_altitudes {
            if !(alt > -90.0 && alt < 90.0) {
                return Err(StyleError::RingAltitude(alt));
            }
        }
        unit_interval("ring_alpha", self.ring_alpha)?;
        unit_interval("line_alpha", self.line_alpha)?;
        unit_interval("star_alpha", self.star_alpha)?;
        unit_interval("zenith_alpha", self.zenith_alpha)?;
        Ok(())
    }

    /// Half-width of the plot square needed to show the whole chart
    pub fn canvas_extent(&self) -> f64 {
        self.bound + self.canvas_margin
    }

    /// Save the style as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load a style from JSON and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let style: ChartStyle = serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        style
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_valid() {
        let style = ChartStyle::default();
        assert!(style.validate().is_ok());
        assert_eq!(style.ring_altitudes, vec![30.0, 60.0]);
        assert_eq!(style.palette.background.to_hex(), "#000011");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let style: ChartStyle =
            serde_json::from_str(r##"{"bound": 2.5, "palette": {"stars": "#ffeecc"}}"##).unwrap();
        assert_eq!(style.bound, 2.5);
        assert_eq!(style.magnitude_ceiling, 6.0);
        assert_eq!(style.palette.stars, Color::rgb(0xff, 0xee, 0xcc));
        assert_eq!(style.palette.horizon, Palette::default().horizon);
    }

    #[test]
    fn test_validate_rejects() {
        let mut style = ChartStyle::default();
        style.bound = 0.0;
        assert!(matches!(
            style.validate(),
            Err(StyleError::NotPositive { field: "bound", .. })
        ));

        let mut style = ChartStyle::default();
        style.min_star_size = 9.0;
        assert!(matches!(style.validate(), Err(StyleError::InvertedSizes { .. })));

        let mut style = ChartStyle::default();
        style.ring_altitudes = vec![30.0, 90.0];
        assert_eq!(style.validate(), Err(StyleError::RingAltitude(90.0)));

        let mut style = ChartStyle::default();
        style.line_alpha = 1.5;
        assert!(matches!(style.validate(), Err(StyleError::Alpha { .. })));
    }

    #[rstest]
    #[case("horizon_width", r#"{"horizon_width": -2.0}"#)]
    #[case("ring_width", r#"{"ring_width": 0.0}"#)]
    #[case("line_width", r#"{"line_width": -1.0}"#)]
    #[case("zenith_marker_size", r#"{"zenith_marker_size": -4.5}"#)]
    fn test_widths_must_be_positive(#[case] field: &str, #[case] json: &str) {
        let style: ChartStyle = serde_json::from_str(json).unwrap();
        match style.validate() {
            Err(StyleError::NotPositive { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }

    #[rstest]
    #[case("title_offset", r#"{"title_offset": -0.3}"#)]
    #[case("canvas_margin", r#"{"canvas_margin": -0.1}"#)]
    fn test_offsets_must_be_non_negative(#[case] field: &str, #[case] json: &str) {
        let style: ChartStyle = serde_json::from_str(json).unwrap();
        match style.validate() {
            Err(StyleError::Negative { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_margins_allowed() {
        let mut style = ChartStyle::default();
        style.title_offset = 0.0;
        style.canvas_margin = 0.0;
        assert!(style.validate().is_ok());
        assert_eq!(style.canvas_extent(), style.bound);
    }

    #[test]
    fn test_non_positive_ceiling_allowed() {
        let mut style = ChartStyle::default();
        style.magnitude_ceiling = 0.0;
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart_style.json");

        let mut style = ChartStyle::default();
        style.label_margin = 1.2;
        style.palette.constellation_lines = Color::rgba(0x88, 0x88, 0x88, 0x80);
        style.save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"#88888880\""));

        let loaded = ChartStyle::load_from_file(&path).unwrap();
        assert_eq!(loaded, style);
    }

    #[test]
    fn test_load_invalid_style_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"min_star_size": 10.0}"#).unwrap();

        let err = ChartStyle::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
