use thiserror::Error;

use crate::field::FieldName;
use crate::value::Shape;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field name: {0}")]
    UnknownField(String),
    #[error("field {field} expects a {expected} value, got {actual}")]
    ShapeMismatch {
        field: FieldName,
        expected: Shape,
        actual: Shape,
    },
    #[error("invalid submission id: {0:?}")]
    InvalidSubmissionId(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
