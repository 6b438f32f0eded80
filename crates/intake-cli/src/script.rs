//! Scripted form events for `intake replay`.
//!
//! A script is a JSON document listing user actions in order:
//!
//! ```json
//! {
//!   "actions": [
//!     { "action": "change", "field": "country", "value": "usa" },
//!     { "action": "blur", "field": "country" },
//!     { "action": "submit" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use intake_model::{FieldName, FieldValue};

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    Change { field: FieldName, value: FieldValue },
    Blur { field: FieldName },
    Submit,
    Reset,
    ClearHistory,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Change { .. } => "change",
            Self::Blur { .. } => "blur",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::ClearHistory => "clearHistory",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse script {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
