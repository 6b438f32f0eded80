//! The host-facing form session.
//!
//! A [`FormSession`] owns the value store and the history. Every mutation runs
//! to completion: set, cascade, then re-evaluation, so a snapshot never shows
//! a half-cascaded state.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};

use intake_model::{
    ErrorMap, FieldName, FieldValue, FormSettings, FormValues, ModelError, OptionCatalog,
    SelectOption, Submission, SubmissionHistory,
};
use intake_validate::{
    Schema, Visibility, evaluate, required_fields, resolve_cascade, standard_schema,
};

use crate::error::{FormError, Result};
use crate::sink::{SubmissionSink, SubmitOutcome};
use crate::store::ValueStore;

/// A session shared between threads. Cascade and evaluation run under the
/// same lock as the write that triggered them.
pub type SharedFormSession = Arc<Mutex<FormSession>>;

/// Read-only view of the form at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub values: FormValues,
    pub touched: BTreeMap<FieldName, bool>,
    /// Every current error, touched or not.
    pub errors: ErrorMap,
    /// Errors of touched fields only.
    pub visible_errors: ErrorMap,
    pub visibility: Visibility,
    pub required: Vec<FieldName>,
}

/// Outcome of [`FormSession::attempt_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    Accepted(Submission),
    Rejected(ErrorMap),
}

/// One form instance: schema, options, values, errors and history.
#[derive(Debug)]
pub struct FormSession {
    schema: Schema,
    catalog: OptionCatalog,
    store: ValueStore,
    errors: ErrorMap,
    history: SubmissionHistory,
    sink: SubmissionSink,
}

impl FormSession {
    pub fn new(schema: Schema, catalog: OptionCatalog, sink: SubmissionSink) -> Self {
        let store = ValueStore::new();
        let errors = evaluate(store.values(), &schema);
        Self {
            schema,
            catalog,
            store,
            errors,
            history: SubmissionHistory::new(),
            sink,
        }
    }

    /// Session over the standard schema built from `settings`.
    pub fn from_settings(settings: &FormSettings, sink: SubmissionSink) -> Result<Self> {
        let schema = standard_schema(settings)?;
        Ok(Self::new(schema, settings.catalog.clone(), sink))
    }

    pub fn into_shared(self) -> SharedFormSession {
        Arc::new(Mutex::new(self))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn values(&self) -> &FormValues {
        self.store.values()
    }

    /// Full error map, independent of touched flags.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn history(&self) -> &SubmissionHistory {
        &self.history
    }

    /// Current option list of a select field; `None` for text fields.
    ///
    /// State options depend on the selected country.
    pub fn options_for(&self, field: FieldName) -> Option<&[SelectOption]> {
        self.catalog.options_for(field, self.store.values())
    }

    /// Set a field, apply its cascade and re-evaluate.
    ///
    /// Values of the wrong shape, values for hidden fields, and select values
    /// outside the field's current options are rejected and leave the session
    /// unchanged. Clearing a field is always accepted.
    ///
    /// Every other field whose visibility flips is cleared and untouched,
    /// so a flag picked up while hidden never shows an error once visible.
    pub fn change_field(&mut self, field: FieldName, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        if value.shape() != field.shape() {
            return Err(ModelError::ShapeMismatch {
                field,
                expected: field.shape(),
                actual: value.shape(),
            }
            .into());
        }
        let before = Visibility::derive(self.store.values(), &self.schema);
        if !value.is_unset() && !before.is_visible(field) {
            warn!(field = %field, "rejected value for hidden field");
            return Err(FormError::HiddenField { field });
        }
        self.check_options(field, &value)?;

        self.store.set(field, value.clone())?;
        let resets = resolve_cascade(field, &value, self.store.values(), &self.schema);
        for reset in &resets {
            self.store.apply_reset(reset)?;
        }
        let after = Visibility::derive(self.store.values(), &self.schema);
        let flipped: Vec<FieldName> = FieldName::ALL
            .into_iter()
            .filter(|&other| {
                other != field && before.is_visible(other) != after.is_visible(other)
            })
            .collect();
        for &other in &flipped {
            self.store.clear(other)?;
        }
        self.recompute();
        debug!(
            field = %field,
            resets = resets.len(),
            flipped = flipped.len(),
            error_count = self.errors.len(),
            "field changed"
        );
        Ok(())
    }

    /// Mark a field touched and re-evaluate.
    pub fn blur_field(&mut self, field: FieldName) {
        self.store.mark_touched(field);
        self.recompute();
    }

    /// Touch every field, evaluate, and submit if nothing fails.
    ///
    /// An accepted submission resets the form; a rejected one returns the
    /// failing errors, all of which are now visible.
    pub fn attempt_submit(&mut self) -> Result<SubmitAttempt> {
        self.store.touch_all();
        self.recompute();

        match self
            .sink
            .submit(self.store.values(), &self.errors, &mut self.history)?
        {
            SubmitOutcome::Accepted(submission) => {
                self.store.reset();
                self.recompute();
                Ok(SubmitAttempt::Accepted(submission))
            }
            SubmitOutcome::Rejected => Ok(SubmitAttempt::Rejected(self.errors.clone())),
        }
    }

    /// Restore the initial values and clear touched flags. History is kept.
    pub fn reset(&mut self) {
        self.store.reset();
        self.recompute();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        let values = self.store.values();
        let touched = self
            .store
            .meta()
            .iter()
            .map(|(field, meta)| (*field, meta.touched))
            .collect();
        Snapshot {
            values: values.clone(),
            touched,
            errors: self.errors.clone(),
            visible_errors: self.errors.touched_only(self.store.meta()),
            visibility: Visibility::derive(values, &self.schema),
            required: required_fields(values, &self.schema),
        }
    }

    fn recompute(&mut self) {
        self.errors = evaluate(self.store.values(), &self.schema);
    }

    fn check_options(&self, field: FieldName, value: &FieldValue) -> Result<()> {
        if let Some(unknown) = self
            .catalog
            .unknown_choice(field, value, self.store.values())
        {
            warn!(field = %field, "rejected value outside the option list");
            return Err(FormError::UnknownOption {
                field,
                value: unknown.to_string(),
            });
        }
        Ok(())
    }
}
