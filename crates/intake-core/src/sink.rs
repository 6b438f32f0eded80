//! Submission sink: turns a valid value set into a history entry.

use std::fmt;

use tracing::{debug, info};

use intake_model::{ErrorMap, FormValues, Submission, SubmissionHistory, SubmissionId};

use crate::clock::{Clock, IdGenerator};
use crate::error::{FormError, Result};

/// Result of handing a value set to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Recorded at index 0 of the history.
    Accepted(Submission),
    /// The error map was not empty; nothing was recorded.
    Rejected,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Packages accepted values into submissions.
pub struct SubmissionSink {
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl SubmissionSink {
    pub fn new(ids: impl IdGenerator + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            ids: Box::new(ids),
            clock: Box::new(clock),
        }
    }

    /// Record `values` if `errors` is empty.
    ///
    /// The caller resets its value store after an accepted submission.
    pub fn submit(
        &mut self,
        values: &FormValues,
        errors: &ErrorMap,
        history: &mut SubmissionHistory,
    ) -> Result<SubmitOutcome> {
        if !errors.is_empty() {
            debug!(error_count = errors.len(), "submission rejected");
            return Ok(SubmitOutcome::Rejected);
        }

        let id = SubmissionId::new(self.ids.next_id())?;
        if history.contains_id(&id) {
            return Err(FormError::DuplicateSubmissionId(id.to_string()));
        }
        let submission = Submission::new(id, values.clone(), self.clock.now());
        history.push_newest(submission.clone());
        info!(
            submission_id = %submission.id(),
            history_len = history.len(),
            "submission accepted"
        );
        Ok(SubmitOutcome::Accepted(submission))
    }
}

impl fmt::Debug for SubmissionSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionSink").finish_non_exhaustive()
    }
}
