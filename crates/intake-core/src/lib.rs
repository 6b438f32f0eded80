//! Form session for the intake form.
//!
//! Ties the pieces together: the [`ValueStore`] holds values and touched
//! flags, cascades and validation come from `intake-validate`, and the
//! [`SubmissionSink`] records accepted forms. Hosts drive everything through
//! [`FormSession`].

pub mod clock;
pub mod error;
pub mod session;
pub mod sink;
pub mod store;

pub use clock::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use error::{FormError, Result};
pub use session::{FormSession, SharedFormSession, Snapshot, SubmitAttempt};
pub use sink::{SubmissionSink, SubmitOutcome};
pub use store::ValueStore;
