pub mod error;
pub mod errors;
pub mod field;
pub mod options;
pub mod settings;
pub mod submission;
pub mod value;

pub use error::{ModelError, Result};
pub use errors::ErrorMap;
pub use field::{FieldKind, FieldName};
pub use options::{OTHER_OPTION, OptionCatalog, SelectOption, label_for};
pub use settings::{DEFAULT_FULL_NAME_MIN_LEN, DEFAULT_NOTES_MAX_LEN, FormSettings};
pub use submission::{Submission, SubmissionHistory, SubmissionId};
pub use value::{FieldMeta, FieldValue, FormValues, Shape};
