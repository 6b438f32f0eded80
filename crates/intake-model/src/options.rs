//! Option lists offered by select fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldName;
use crate::value::{FieldValue, FormValues};

/// Option value that asks the user to specify the answer in a text field.
pub const OTHER_OPTION: &str = "other";

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Option tables for the select fields of the form.
///
/// `states` maps a country value to its state/province options. A country
/// with an entry here shows the state field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionCatalog {
    pub categories: Vec<SelectOption>,
    pub countries: Vec<SelectOption>,
    pub states: BTreeMap<String, Vec<SelectOption>>,
    pub interests: Vec<SelectOption>,
}

impl OptionCatalog {
    /// State/province options for a country, if it has any.
    pub fn states_for(&self, country: &str) -> Option<&[SelectOption]> {
        self.states.get(country).map(Vec::as_slice)
    }

    /// Countries that offer a state/province choice.
    pub fn countries_with_states(&self) -> Vec<String> {
        self.states.keys().cloned().collect()
    }

    /// Current option list of a select field; `None` for text fields.
    ///
    /// State options follow the country selected in `values`.
    pub fn options_for(&self, field: FieldName, values: &FormValues) -> Option<&[SelectOption]> {
        match field {
            FieldName::Category => Some(self.categories.as_slice()),
            FieldName::Country => Some(self.countries.as_slice()),
            FieldName::Interests => Some(self.interests.as_slice()),
            FieldName::State => Some(
                self.states_for(values.text(FieldName::Country))
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// First choice in `value` outside the field's current options.
    ///
    /// An unset value never counts as unknown.
    pub fn unknown_choice<'a>(
        &self,
        field: FieldName,
        value: &'a FieldValue,
        values: &FormValues,
    ) -> Option<&'a str> {
        let options = self.options_for(field, values)?;
        chosen(value).find(|candidate| !options.iter().any(|option| option.value == *candidate))
    }

    /// Every selected value outside its field's options, in form order.
    pub fn unknown_options(&self, values: &FormValues) -> Vec<(FieldName, String)> {
        let mut unknown = Vec::new();
        for (field, value) in values.iter() {
            let Some(options) = self.options_for(field, values) else {
                continue;
            };
            for candidate in chosen(value) {
                if !options.iter().any(|option| option.value == candidate) {
                    unknown.push((field, candidate.to_string()));
                }
            }
        }
        unknown
    }
}

impl Default for OptionCatalog {
    fn default() -> Self {
        let mut states = BTreeMap::new();
        states.insert(
            "usa".to_string(),
            options(&[
                ("ca", "California"),
                ("ny", "New York"),
                ("tx", "Texas"),
                (OTHER_OPTION, "Other"),
            ]),
        );
        states.insert(
            "canada".to_string(),
            options(&[
                ("on", "Ontario"),
                ("qc", "Quebec"),
                ("bc", "British Columbia"),
                (OTHER_OPTION, "Other"),
            ]),
        );

        Self {
            categories: options(&[
                ("software", "Software"),
                ("hardware", "Hardware"),
                ("services", "Services"),
                (OTHER_OPTION, "Other"),
            ]),
            countries: options(&[
                ("usa", "United States"),
                ("canada", "Canada"),
                (OTHER_OPTION, "Other"),
            ]),
            states,
            interests: options(&[
                ("react", "React"),
                ("redux", "Redux"),
                ("formik", "Formik"),
                ("yup", "Yup"),
                ("typescript", "TypeScript"),
                ("testing", "Testing"),
            ]),
        }
    }
}

fn chosen(value: &FieldValue) -> impl Iterator<Item = &str> {
    let items: Vec<&str> = match value {
        FieldValue::Scalar(text) if text.is_empty() => Vec::new(),
        FieldValue::Scalar(text) => vec![text.as_str()],
        FieldValue::Multi(items) => items.iter().map(String::as_str).collect(),
    };
    items.into_iter()
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}

/// Look up the label of an option value.
pub fn label_for<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label.as_str())
}
