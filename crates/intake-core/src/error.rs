//! Error types for form sessions.

use thiserror::Error;

use intake_model::{FieldName, ModelError};
use intake_validate::SchemaError;

/// Errors raised by the session and the submission sink.
///
/// Validation failures are not errors: they are returned as an
/// [`ErrorMap`](intake_model::ErrorMap).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormError {
    /// Invalid value or settings.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The schema failed its construction checks.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// A select field was given a value outside its current option list.
    #[error("{value:?} is not an option of {field}")]
    UnknownOption { field: FieldName, value: String },

    /// A value was written to a field that is currently hidden.
    #[error("{field} is hidden by the current selections")]
    HiddenField { field: FieldName },

    /// The id generator produced an id already present in the history.
    #[error("submission id {0} was already used")]
    DuplicateSubmissionId(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
