use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::VizError;

/// Point in the plot plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance from the origin
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

/// Color in RGBA format.
///
/// Serialized as a `#RRGGBB` or `#RRGGBBAA` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create color from hex string (e.g., "#FF0000" or "#FF0000FF")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Lowercase hex, with the alpha byte only when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// RGB part only, for SVG paint attributes
    pub fn to_svg_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha channel as an opacity in [0, 1]
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s.trim()).ok_or_else(|| VizError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Vertical anchor of a text block. Text is always centered horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    /// Block centered on the position
    Center,
    /// Top edge of the first line at the position
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Star,
    Plus,
}

/// One drawing instruction, in plot-plane coordinates.
///
/// Sizes, widths and font sizes are in points; the canvas decides how many
/// pixels a point is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingPrimitive {
    Background {
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        stroke_color: Color,
        stroke_width: f64,
        dashed: bool,
        alpha: f64,
    },
    Text {
        position: Point,
        content: String,
        alignment: TextAlignment,
        color: Color,
        font_size: f64,
        bold: bool,
    },
    Point {
        position: Point,
        size: f64,
        color: Color,
        marker: MarkerShape,
        alpha: f64,
    },
    LineSegment {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
        alpha: f64,
    },
}

impl DrawingPrimitive {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawingPrimitive::Background { .. } => "background",
            DrawingPrimitive::Circle { .. } => "circle",
            DrawingPrimitive::Text { .. } => "text",
            DrawingPrimitive::Point { .. } => "point",
            DrawingPrimitive::LineSegment { .. } => "line_segment",
        }
    }
}
