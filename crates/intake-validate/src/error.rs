use thiserror::Error;

use intake_model::FieldName;

/// Schema construction errors.
///
/// These are configuration mistakes, caught when the schema is built and
/// never shown to the person filling the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A known field has no rule.
    #[error("no rule declared for field {0}")]
    MissingRule(FieldName),

    /// A field has more than one rule.
    #[error("field {0} has more than one rule")]
    DuplicateRule(FieldName),

    /// A rule or cascade refers to the field it belongs to.
    #[error("field {0} depends on itself")]
    SelfReference(FieldName),

    /// A condition reads a field that is not declared before the dependent one.
    #[error("field {field} depends on {depends_on}, which is not declared before it")]
    NotUpstream {
        field: FieldName,
        depends_on: FieldName,
    },

    /// A cascade edge clears nothing.
    #[error("cascade from {0} has no downstream fields")]
    EmptyCascade(FieldName),

    /// A conditionally visible field is never cleared when its controlling
    /// field changes, so a stale hidden value could survive.
    #[error("field {field} is shown by {depends_on} but no cascade from {depends_on} clears it")]
    UncoveredVisibility {
        field: FieldName,
        depends_on: FieldName,
    },
}
