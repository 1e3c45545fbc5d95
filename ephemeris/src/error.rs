use thiserror::Error;

/// Errors raised at the transform boundary.
///
/// The transform itself is closed-form trigonometry and cannot fail; the only
/// failure mode is an input that lies outside its physical domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl TransformError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        TransformError::InvalidInput {
            field,
            value,
            reason,
        }
    }
}

/// Reject non-finite values and values outside `[min, max]`.
pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), TransformError> {
    if !value.is_finite() {
        return Err(TransformError::invalid(field, value, "not a finite number"));
    }
    if value < min || value > max {
        return Err(TransformError::invalid(field, value, "out of range"));
    }
    Ok(())
}
