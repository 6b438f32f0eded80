//! Validation error mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldName;
use crate::value::FieldMeta;

/// Field → message for every field whose current value is invalid.
///
/// A missing key means the field is valid. Iteration follows form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<FieldName, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Errors the user should see: only those of touched fields.
    pub fn touched_only(&self, meta: &BTreeMap<FieldName, FieldMeta>) -> ErrorMap {
        let errors = self
            .errors
            .iter()
            .filter(|(field, _)| meta.get(*field).is_some_and(|m| m.touched))
            .map(|(field, message)| (*field, message.clone()))
            .collect();
        ErrorMap { errors }
    }
}

impl FromIterator<(FieldName, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}
