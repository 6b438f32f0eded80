//! Drive a session from a script and collect the outcome.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, trace, warn};

use intake_core::{
    FixedClock, FormError, FormSession, SequentialIds, Snapshot, SubmissionSink, SubmitAttempt,
    SystemClock, UuidGenerator,
};
use intake_model::{
    ErrorMap, FieldName, FieldValue, FormSettings, FormValues, ModelError, SubmissionHistory,
};
use intake_validate::{evaluate, standard_schema};

use crate::logging::redact_value;
use crate::script::{Action, Script};

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Actions the session refused, in script order.
    pub rejected: Vec<RejectedAction>,
    /// Errors returned by submits that did not go through.
    pub failed_submits: Vec<ErrorMap>,
    pub snapshot: Snapshot,
    pub history: SubmissionHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedAction {
    pub index: usize,
    pub field: FieldName,
    pub reason: String,
}

/// A fresh session over the standard schema.
///
/// Deterministic sessions number submissions `submission-1`, `submission-2`,
/// ... and stamp them with the Unix epoch.
pub fn new_session(settings: &FormSettings, deterministic: bool) -> Result<FormSession> {
    let sink = if deterministic {
        SubmissionSink::new(SequentialIds::default(), FixedClock::epoch())
    } else {
        SubmissionSink::new(UuidGenerator, SystemClock)
    };
    FormSession::from_settings(settings, sink).context("build form session")
}

/// Apply every action in order.
///
/// Changes the session refuses (unknown option, wrong value shape, hidden
/// field) are recorded in [`ReplayReport::rejected`] and the replay goes on.
/// Any other error stops it.
pub fn replay(session: &mut FormSession, script: &Script) -> Result<ReplayReport> {
    let mut rejected = Vec::new();
    let mut failed_submits = Vec::new();

    for (index, action) in script.actions.iter().enumerate() {
        debug!(index, action = action.name(), "apply action");
        match action {
            Action::Change { field, value } => {
                trace!(index, field = %field, value = redact_value(&display_value(value)));
                match session.change_field(*field, value.clone()) {
                    Ok(()) => {}
                    Err(
                        error @ (FormError::UnknownOption { .. }
                        | FormError::HiddenField { .. }
                        | FormError::Model(ModelError::ShapeMismatch { .. })),
                    ) => {
                        warn!(index, field = %field, "change rejected");
                        rejected.push(RejectedAction {
                            index,
                            field: *field,
                            reason: error.to_string(),
                        });
                    }
                    Err(error) => {
                        return Err(error)
                            .with_context(|| format!("action {index}: change {field}"));
                    }
                }
            }
            Action::Blur { field } => session.blur_field(*field),
            Action::Submit => {
                let attempt = session
                    .attempt_submit()
                    .with_context(|| format!("action {index}: submit"))?;
                if let SubmitAttempt::Rejected(errors) = attempt {
                    debug!(index, error_count = errors.len(), "submit blocked");
                    failed_submits.push(errors);
                }
            }
            Action::Reset => session.reset(),
            Action::ClearHistory => session.clear_history(),
        }
    }

    Ok(ReplayReport {
        rejected,
        failed_submits,
        snapshot: session.snapshot(),
        history: session.history().clone(),
    })
}

/// Outcome of checking a values document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Errors with every field touched.
    pub errors: ErrorMap,
    /// Selections outside the configured option lists, in form order.
    pub unknown_options: Vec<UnknownOption>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.unknown_options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownOption {
    pub field: FieldName,
    pub value: String,
}

/// Check a values document the way a session would see it.
///
/// Option membership uses the same catalog lookup that `change_field`
/// applies, so a document the session would refuse never checks clean.
pub fn check_values(settings: &FormSettings, values: &FormValues) -> Result<CheckReport> {
    let schema = standard_schema(settings).context("build schema")?;
    let unknown_options: Vec<UnknownOption> = settings
        .catalog
        .unknown_options(values)
        .into_iter()
        .map(|(field, value)| UnknownOption { field, value })
        .collect();
    for unknown in &unknown_options {
        warn!(field = %unknown.field, value = redact_value(&unknown.value), "unknown option");
    }
    Ok(CheckReport {
        errors: evaluate(values, &schema),
        unknown_options,
    })
}

/// Comma-joined text of a value.
pub fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Scalar(text) => text.clone(),
        FieldValue::Multi(items) => items.join(", "),
    }
}
