//! Visualization toolkit for sky charts.
//!
//! Charts are described as an ordered list of [`DrawingPrimitive`]s in an
//! abstract plot plane (x to the right, y up). An [`SvgCanvas`] turns that
//! list into an SVG document, which can be written as-is or rasterized to PNG.

use thiserror::Error;

pub mod primitives;
pub mod raster;
pub mod svg;

pub use primitives::{Color, DrawingPrimitive, MarkerShape, Point, TextAlignment};
pub use raster::{rasterize_png, render_pixmap};
pub use svg::{write_chart, SvgCanvas};

/// Error types for chart output.
#[derive(Debug, Error)]
pub enum VizError {
    /// Canvas dimensions or extent unusable
    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    /// Generated SVG could not be parsed back
    #[error("SVG error: {0}")]
    Svg(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encode(String),

    /// Output path has an extension other than `.svg` or `.png`
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid color '{0}'")]
    InvalidColor(String),
}

/// Standard Result type for all visualization operations.
pub type Result<T> = std::result::Result<T, VizError>;
