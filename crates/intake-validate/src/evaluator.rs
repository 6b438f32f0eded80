//! Conditional validation.
//!
//! [`evaluate`] is a pure function of the values and the schema: it reads a
//! snapshot and returns every current error, independent of touched flags.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use intake_model::{ErrorMap, FieldName, FormValues};

use crate::schema::{FieldRule, Schema};
use crate::visibility::Visibility;

/// `local@domain.tld` with no whitespace.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Whether text has the shape of an email address.
pub fn is_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text)
}

/// Validate every field in schema order.
pub fn evaluate(values: &FormValues, schema: &Schema) -> ErrorMap {
    let visibility = Visibility::derive(values, schema);
    let errors = evaluate_with(values, schema, &visibility);
    debug!(error_count = errors.len(), "form evaluated");
    errors
}

/// [`evaluate`] with a visibility the caller already derived.
pub fn evaluate_with(values: &FormValues, schema: &Schema, visibility: &Visibility) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for rule in schema.rules() {
        // Hidden fields never apply.
        if !visibility.is_visible(rule.field) {
            continue;
        }
        if let Some(message) = rule_error(rule, values) {
            errors.insert(rule.field, message);
        }
    }
    errors
}

/// Whether a field currently must hold a value.
pub fn is_required(rule: &FieldRule, values: &FormValues, visibility: &Visibility) -> bool {
    if !visibility.is_visible(rule.field) {
        return false;
    }
    match &rule.requirement {
        None => false,
        Some(requirement) => requirement
            .when
            .as_ref()
            .is_none_or(|condition| condition.holds(values)),
    }
}

/// Fields that currently must hold a value, in schema order.
pub fn required_fields(values: &FormValues, schema: &Schema) -> Vec<FieldName> {
    let visibility = Visibility::derive(values, schema);
    schema
        .rules()
        .iter()
        .filter(|rule| is_required(rule, values, &visibility))
        .map(|rule| rule.field)
        .collect()
}

fn rule_error<'a>(rule: &'a FieldRule, values: &FormValues) -> Option<&'a str> {
    let value = values.get(rule.field);

    if let Some(requirement) = &rule.requirement {
        // A requirement whose condition does not hold makes the field fully
        // optional, base checks included.
        if let Some(condition) = &requirement.when
            && !condition.holds(values)
        {
            return None;
        }
        if value.is_unset() {
            return Some(requirement.message.as_str());
        }
    }

    rule.checks
        .iter()
        .find(|field_check| !field_check.check.passes(value))
        .map(|field_check| field_check.message.as_str())
}
