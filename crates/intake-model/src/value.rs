//! Field values and the full value set of a form.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldName;

/// Storage shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Scalar,
    Multi,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("single"),
            Self::Multi => f.write_str("multi"),
        }
    }
}

/// A single field value.
///
/// An empty string or an empty list means the field is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::Scalar,
            Self::Multi(_) => Shape::Multi,
        }
    }

    pub fn is_unset(&self) -> bool {
        match self {
            Self::Scalar(value) => value.is_empty(),
            Self::Multi(values) => values.is_empty(),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::Multi(values) => Some(values),
        }
    }

    /// Character count for text, item count for lists.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(value) => value.chars().count(),
            Self::Multi(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_unset()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(String::from).collect())
    }
}

/// The value of every known field.
///
/// Always holds exactly one value per [`FieldName`], each with the shape the
/// field expects. Deserialization fills missing fields with their unset value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<FieldName, FieldValue>")]
pub struct FormValues {
    #[serde(flatten)]
    values: BTreeMap<FieldName, FieldValue>,
}

impl FormValues {
    /// Every field unset.
    pub fn empty() -> Self {
        let values = FieldName::ALL
            .into_iter()
            .map(|field| (field, field.unset_value()))
            .collect();
        Self { values }
    }

    pub fn get(&self, field: FieldName) -> &FieldValue {
        // The constructor and `set` keep the map total.
        &self.values[&field]
    }

    /// Text of a single-valued field; empty for list fields.
    pub fn text(&self, field: FieldName) -> &str {
        self.get(field).as_scalar().unwrap_or_default()
    }

    /// Replace a field value, rejecting values of the wrong shape.
    pub fn set(&mut self, field: FieldName, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        check_shape(field, &value)?;
        self.values.insert(field, value);
        Ok(())
    }

    /// Builder-style [`FormValues::set`].
    pub fn with(mut self, field: FieldName, value: impl Into<FieldValue>) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// Fields that currently hold a value.
    pub fn set_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.iter()
            .filter(|(_, value)| !value.is_unset())
            .map(|(field, _)| field)
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<BTreeMap<FieldName, FieldValue>> for FormValues {
    type Error = ModelError;

    fn try_from(raw: BTreeMap<FieldName, FieldValue>) -> Result<Self> {
        let mut values = Self::empty();
        for (field, value) in raw {
            values.set(field, value)?;
        }
        Ok(values)
    }
}

fn check_shape(field: FieldName, value: &FieldValue) -> Result<()> {
    let expected = field.shape();
    let actual = value.shape();
    if expected != actual {
        return Err(ModelError::ShapeMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Per-field interaction state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// The user interacted with the field or attempted a submission.
    pub touched: bool,
}
