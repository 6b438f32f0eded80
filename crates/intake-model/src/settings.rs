//! Form settings loaded from an optional JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::OptionCatalog;

/// Default minimum length of the full name.
pub const DEFAULT_FULL_NAME_MIN_LEN: usize = 2;

/// Default maximum length of the notes field.
pub const DEFAULT_NOTES_MAX_LEN: usize = 500;

/// Tunable limits and option tables of the form.
///
/// Every key is optional in the JSON document; missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSettings {
    pub full_name_min_len: usize,
    pub notes_max_len: usize,
    pub catalog: OptionCatalog,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            full_name_min_len: DEFAULT_FULL_NAME_MIN_LEN,
            notes_max_len: DEFAULT_NOTES_MAX_LEN,
            catalog: OptionCatalog::default(),
        }
    }
}

impl FormSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
