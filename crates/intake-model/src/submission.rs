//! Accepted submissions and the session history.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::value::FormValues;

/// Opaque unique identifier of a submission.
///
/// Kept exactly as generated; only blank ids are refused, on construction
/// and on deserialization alike.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::InvalidSubmissionId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubmissionId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, ModelError> {
        Self::new(value)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A completed form, frozen at the moment it was accepted.
///
/// There are no mutating accessors: once built, a submission never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    id: SubmissionId,
    values: FormValues,
    submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(id: SubmissionId, values: FormValues, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            values,
            submitted_at,
        }
    }

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// Accepted submissions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionHistory {
    entries: VecDeque<Submission>,
}

impl SubmissionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission at index 0.
    pub fn push_newest(&mut self, submission: Submission) {
        self.entries.push_front(submission);
    }

    pub fn get(&self, index: usize) -> Option<&Submission> {
        self.entries.get(index)
    }

    pub fn newest(&self) -> Option<&Submission> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_id(&self, id: &SubmissionId) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::ops::Index<usize> for SubmissionHistory {
    type Output = Submission;

    fn index(&self, index: usize) -> &Submission {
        &self.entries[index]
    }
}
