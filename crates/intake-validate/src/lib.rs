//! Visibility, cascade and validation rules for the intake form.
//!
//! The crate is pure: every function reads a [`FormValues`] snapshot and a
//! [`Schema`] and returns data. Mutation lives in `intake-core`.
//!
//! [`FormValues`]: intake_model::FormValues

mod cascade;
mod error;
mod evaluator;
mod schema;
mod standard;
mod visibility;

pub use cascade::{Reset, resolve_cascade};
pub use error::SchemaError;
pub use evaluator::{evaluate, evaluate_with, is_email, is_required, required_fields};
pub use schema::{
    CascadeEdge, Check, Condition, FieldCheck, FieldRule, Predicate, Requirement, ResetPolicy,
    Schema, SchemaBuilder,
};
pub use standard::{
    MSG_INVALID_EMAIL, MSG_PICK_ONE, MSG_REQUIRED, MSG_SPECIFY, MSG_TOO_LONG, MSG_TOO_SHORT,
    standard_schema,
};
pub use visibility::Visibility;
