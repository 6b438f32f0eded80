//! Dependency cascade resolution.
//!
//! Given a field change, works out which downstream fields must be cleared so
//! that no value survives once the selection that governs it has changed.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use intake_model::{FieldName, FieldValue, FormValues};

use crate::schema::Schema;

/// One downstream field to clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reset {
    pub field: FieldName,
    /// Unset value to write.
    pub value: FieldValue,
    /// Value held before the reset.
    pub previous: FieldValue,
}

/// Resets triggered by `field` changing to `new_value`.
///
/// Follows edges transitively: a cleared field fires its own edges with its
/// unset value. The result is deduplicated and in schema order, and depends
/// only on the arguments, so repeated calls return the same resets.
pub fn resolve_cascade(
    field: FieldName,
    new_value: &FieldValue,
    current: &FormValues,
    schema: &Schema,
) -> Vec<Reset> {
    let mut cleared = BTreeSet::new();
    let mut pending = VecDeque::from([(field, new_value.clone())]);

    while let Some((upstream, value)) = pending.pop_front() {
        for edge in schema.cascades_from(upstream) {
            if !edge.policy.fires(&value) {
                continue;
            }
            for &downstream in &edge.downstream {
                if downstream != field && cleared.insert(downstream) {
                    pending.push_back((downstream, downstream.unset_value()));
                }
            }
        }
    }

    let mut resets: Vec<Reset> = cleared
        .into_iter()
        .map(|target| Reset {
            field: target,
            value: target.unset_value(),
            previous: current.get(target).clone(),
        })
        .collect();
    resets.sort_by_key(|reset| schema.position(reset.field));

    if !resets.is_empty() {
        debug!(
            field = %field,
            cleared = ?resets.iter().map(|r| r.field.as_str()).collect::<Vec<_>>(),
            "cascade resolved"
        );
    }
    resets
}
