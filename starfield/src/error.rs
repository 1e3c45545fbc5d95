use ephemeris::TransformError;
use thiserror::Error;

/// Errors produced while obtaining or parsing a star catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Star {id} has an invalid position: {source}")]
    InvalidPosition {
        id: usize,
        #[source]
        source: TransformError,
    },

    #[error("Catalog '{0}' contains no usable stars")]
    Empty(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Download(err.to_string())
    }
}
