use ephemeris::TransformError;
use thiserror::Error;

use crate::style::StyleError;

/// Errors that abort composing a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    #[error("Invalid observation input: {0}")]
    Transform(#[from] TransformError),

    #[error("Invalid chart style: {0}")]
    Style(#[from] StyleError),
}
