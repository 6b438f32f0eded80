//! Declarative field rules and cascade edges.
//!
//! A [`Schema`] is an ordered list of [`FieldRule`]s plus the [`CascadeEdge`]s
//! that clear downstream fields. Conditions name the field they read, so the
//! builder can verify every reference when the schema is constructed:
//!
//! - every known field has exactly one rule
//! - a condition only reads a field declared before the dependent field
//! - a conditionally visible field is cleared by a cascade from its
//!   controlling field

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use intake_model::{FieldName, FieldValue, FormValues};

use crate::error::SchemaError;

/// Test applied to the value of a controlling field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Predicate {
    /// The value equals the given option.
    Equals(String),
    /// The value is one of the given options.
    OneOf(Vec<String>),
}

impl Predicate {
    /// Evaluate against a value. List values match when any item matches.
    pub fn matches(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Scalar(text) => self.matches_text(text),
            FieldValue::Multi(items) => items.iter().any(|item| self.matches_text(item)),
        }
    }

    fn matches_text(&self, text: &str) -> bool {
        match self {
            Self::Equals(expected) => text == expected,
            Self::OneOf(allowed) => allowed.iter().any(|candidate| candidate == text),
        }
    }
}

/// A predicate over one named field of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: FieldName,
    pub predicate: Predicate,
}

impl Condition {
    pub fn equals(field: FieldName, value: impl Into<String>) -> Self {
        Self {
            field,
            predicate: Predicate::Equals(value.into()),
        }
    }

    pub fn one_of<I, S>(field: FieldName, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            predicate: Predicate::OneOf(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn holds(&self, values: &FormValues) -> bool {
        self.predicate.matches(values.get(self.field))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::Equals(value) => write!(f, "{} = {}", self.field, value),
            Predicate::OneOf(values) => write!(f, "{} in [{}]", self.field, values.join(", ")),
        }
    }
}

/// Base constraint on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Check {
    /// At least this many characters. Unset values pass.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// `local@domain.tld` shape. Unset values pass.
    Email,
    /// The list holds at least one item.
    NonEmptySet,
}

impl Check {
    pub fn passes(&self, value: &FieldValue) -> bool {
        match self {
            Self::MinLength(min) => value.is_unset() || value.len() >= *min,
            Self::MaxLength(max) => value.len() <= *max,
            Self::Email => {
                value.is_unset() || value.as_scalar().is_some_and(crate::evaluator::is_email)
            }
            Self::NonEmptySet => !value.is_unset(),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength(min) => write!(f, "min length {min}"),
            Self::MaxLength(max) => write!(f, "max length {max}"),
            Self::Email => f.write_str("email"),
            Self::NonEmptySet => f.write_str("at least one"),
        }
    }
}

/// A check and the message recorded when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub check: Check,
    pub message: String,
}

/// The field must hold a value, optionally only while `when` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub when: Option<Condition>,
    pub message: String,
}

/// Validation and visibility rule for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub field: FieldName,
    /// Shown only while this holds (and its controlling field is shown).
    pub visible_when: Option<Condition>,
    pub requirement: Option<Requirement>,
    pub checks: Vec<FieldCheck>,
}

impl FieldRule {
    pub fn new(field: FieldName) -> Self {
        Self {
            field,
            visible_when: None,
            requirement: None,
            checks: Vec::new(),
        }
    }

    #[must_use]
    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.requirement = Some(Requirement {
            when: None,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn required_when(mut self, condition: Condition, message: impl Into<String>) -> Self {
        self.requirement = Some(Requirement {
            when: Some(condition),
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn check(mut self, check: Check, message: impl Into<String>) -> Self {
        self.checks.push(FieldCheck {
            check,
            message: message.into(),
        });
        self
    }

    /// Fields read by this rule's conditions.
    pub fn dependencies(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.visible_when
            .iter()
            .chain(self.requirement.iter().filter_map(|req| req.when.as_ref()))
            .map(|condition| condition.field)
    }
}

/// When a cascade edge clears its downstream fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResetPolicy {
    /// On every change of the upstream field.
    Always,
    /// Unless the upstream field changed to this value.
    UnlessEquals(String),
}

impl ResetPolicy {
    pub fn fires(&self, new_value: &FieldValue) -> bool {
        match self {
            Self::Always => true,
            Self::UnlessEquals(keep) => new_value.as_scalar() != Some(keep.as_str()),
        }
    }
}

/// Changing `upstream` clears `downstream` when `policy` fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeEdge {
    pub upstream: FieldName,
    pub downstream: Vec<FieldName>,
    pub policy: ResetPolicy,
}

impl CascadeEdge {
    pub fn new(upstream: FieldName, downstream: &[FieldName], policy: ResetPolicy) -> Self {
        Self {
            upstream,
            downstream: downstream.to_vec(),
            policy,
        }
    }
}

/// Validated, ordered set of field rules and cascade edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    rules: Vec<FieldRule>,
    cascades: Vec<CascadeEdge>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: FieldName) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    pub fn cascades(&self) -> &[CascadeEdge] {
        &self.cascades
    }

    /// Cascade edges triggered by changes to `field`.
    pub fn cascades_from(&self, field: FieldName) -> impl Iterator<Item = &CascadeEdge> {
        self.cascades
            .iter()
            .filter(move |edge| edge.upstream == field)
    }

    /// Position of a field in evaluation order.
    pub fn position(&self, field: FieldName) -> Option<usize> {
        self.rules.iter().position(|rule| rule.field == field)
    }
}

/// Collects rules and edges, verified by [`SchemaBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    rules: Vec<FieldRule>,
    cascades: Vec<CascadeEdge>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn cascade(mut self, edge: CascadeEdge) -> Self {
        self.cascades.push(edge);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let schema = Schema {
            rules: self.rules,
            cascades: self.cascades,
        };
        verify_rules(&schema)?;
        verify_cascades(&schema)?;
        verify_visibility_coverage(&schema)?;
        Ok(schema)
    }
}

fn verify_rules(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();
    for rule in schema.rules() {
        if !seen.insert(rule.field) {
            return Err(SchemaError::DuplicateRule(rule.field));
        }
    }
    if let Some(missing) = FieldName::ALL.into_iter().find(|f| !seen.contains(f)) {
        return Err(SchemaError::MissingRule(missing));
    }

    for (index, rule) in schema.rules().iter().enumerate() {
        for depends_on in rule.dependencies() {
            check_upstream(schema, rule.field, depends_on, index)?;
        }
    }
    Ok(())
}

fn verify_cascades(schema: &Schema) -> Result<(), SchemaError> {
    for edge in schema.cascades() {
        if edge.downstream.is_empty() {
            return Err(SchemaError::EmptyCascade(edge.upstream));
        }
        // Rules are total at this point, so every upstream has a position.
        let Some(upstream_index) = schema.position(edge.upstream) else {
            return Err(SchemaError::MissingRule(edge.upstream));
        };
        for &field in &edge.downstream {
            let Some(index) = schema.position(field) else {
                return Err(SchemaError::MissingRule(field));
            };
            if index <= upstream_index {
                return Err(if field == edge.upstream {
                    SchemaError::SelfReference(field)
                } else {
                    SchemaError::NotUpstream {
                        field,
                        depends_on: edge.upstream,
                    }
                });
            }
        }
    }
    Ok(())
}

fn verify_visibility_coverage(schema: &Schema) -> Result<(), SchemaError> {
    for rule in schema.rules() {
        let Some(condition) = &rule.visible_when else {
            continue;
        };
        let covered = schema
            .cascades_from(condition.field)
            .any(|edge| edge.downstream.contains(&rule.field));
        if !covered {
            return Err(SchemaError::UncoveredVisibility {
                field: rule.field,
                depends_on: condition.field,
            });
        }
    }
    Ok(())
}

fn check_upstream(
    schema: &Schema,
    field: FieldName,
    depends_on: FieldName,
    field_index: usize,
) -> Result<(), SchemaError> {
    if depends_on == field {
        return Err(SchemaError::SelfReference(field));
    }
    match schema.position(depends_on) {
        Some(index) if index < field_index => Ok(()),
        _ => Err(SchemaError::NotUpstream { field, depends_on }),
    }
}
