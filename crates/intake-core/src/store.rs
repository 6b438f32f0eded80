//! Value store: current values and touched flags.

use std::collections::BTreeMap;

use intake_model::{FieldMeta, FieldName, FieldValue, FormValues};
use intake_validate::Reset;

use crate::error::Result;

/// Holds the value and touched flag of every field.
///
/// Plain get/set/reset storage: `set` never clears dependent fields, callers
/// run the cascade themselves.
#[derive(Debug, Clone)]
pub struct ValueStore {
    values: FormValues,
    meta: BTreeMap<FieldName, FieldMeta>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self {
            values: FormValues::empty(),
            meta: untouched(),
        }
    }

    pub fn get(&self, field: FieldName) -> &FieldValue {
        self.values.get(field)
    }

    pub fn set(&mut self, field: FieldName, value: FieldValue) -> Result<()> {
        self.values.set(field, value)?;
        Ok(())
    }

    pub fn mark_touched(&mut self, field: FieldName) {
        self.meta.entry(field).or_default().touched = true;
    }

    pub fn touch_all(&mut self) {
        for field in FieldName::ALL {
            self.mark_touched(field);
        }
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.meta.get(&field).is_some_and(|meta| meta.touched)
    }

    /// Write a cascade reset: unset value, untouched.
    pub fn apply_reset(&mut self, reset: &Reset) -> Result<()> {
        self.values.set(reset.field, reset.value.clone())?;
        self.meta.insert(reset.field, FieldMeta::default());
        Ok(())
    }

    /// Unset one field and clear its touched flag.
    pub fn clear(&mut self, field: FieldName) -> Result<()> {
        self.values.set(field, field.unset_value())?;
        self.meta.insert(field, FieldMeta::default());
        Ok(())
    }

    /// Restore initial values and clear every touched flag.
    pub fn reset(&mut self) {
        self.values = FormValues::empty();
        self.meta = untouched();
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn meta(&self) -> &BTreeMap<FieldName, FieldMeta> {
        &self.meta
    }
}

impl Default for ValueStore {
    fn default() -> Self {
        Self::new()
    }
}

fn untouched() -> BTreeMap<FieldName, FieldMeta> {
    FieldName::ALL
        .into_iter()
        .map(|field| (field, FieldMeta::default()))
        .collect()
}
