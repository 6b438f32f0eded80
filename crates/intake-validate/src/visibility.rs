//! Field visibility derived from the current values.

use std::collections::BTreeMap;

use serde::Serialize;

use intake_model::{FieldName, FormValues};

use crate::schema::Schema;

/// Which fields currently apply, given upstream selections.
///
/// Recomputed from the values on demand; never stored alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Visibility {
    visible: BTreeMap<FieldName, bool>,
}

impl Visibility {
    /// Derive visibility in schema order.
    ///
    /// A field is visible when it has no condition, or when its condition
    /// holds and the field the condition reads is itself visible.
    pub fn derive(values: &FormValues, schema: &Schema) -> Self {
        let mut visible = BTreeMap::new();
        for rule in schema.rules() {
            let shown = match &rule.visible_when {
                None => true,
                Some(condition) => {
                    visible.get(&condition.field).copied().unwrap_or(false)
                        && condition.holds(values)
                }
            };
            visible.insert(rule.field, shown);
        }
        Self { visible }
    }

    pub fn is_visible(&self, field: FieldName) -> bool {
        self.visible.get(&field).copied().unwrap_or(false)
    }

    pub fn hidden(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.visible
            .iter()
            .filter(|(_, shown)| !**shown)
            .map(|(field, _)| *field)
    }

    pub fn visible(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.visible
            .iter()
            .filter(|(_, shown)| **shown)
            .map(|(field, _)| *field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_schema;
    use intake_model::FormSettings;

    fn schema() -> Schema {
        standard_schema(&FormSettings::default()).expect("standard schema")
    }

    #[test]
    fn empty_form_hides_every_dependent_field() {
        let visibility = Visibility::derive(&FormValues::empty(), &schema());
        let hidden: Vec<_> = visibility.hidden().collect();
        assert_eq!(
            hidden,
            vec![
                FieldName::CategoryOther,
                FieldName::CountryOther,
                FieldName::State,
                FieldName::StateOther,
            ]
        );
    }

    #[test]
    fn state_other_needs_visible_state() {
        // A stale `state = other` under a country without states stays hidden.
        let values = FormValues::empty()
            .with(FieldName::Country, "other")
            .and_then(|v| v.with(FieldName::State, "other"))
            .unwrap();
        let visibility = Visibility::derive(&values, &schema());
        assert!(visibility.is_visible(FieldName::CountryOther));
        assert!(!visibility.is_visible(FieldName::State));
        assert!(!visibility.is_visible(FieldName::StateOther));
    }

    #[test]
    fn states_follow_the_catalog() {
        let mut settings = FormSettings::default();
        settings
            .catalog
            .states
            .insert("mexico".to_string(), Vec::new());
        let schema = standard_schema(&settings).unwrap();
        let values = FormValues::empty()
            .with(FieldName::Country, "mexico")
            .unwrap();
        assert!(Visibility::derive(&values, &schema).is_visible(FieldName::State));
    }
}
