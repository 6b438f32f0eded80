//! Property tests for visibility, cascades and evaluation.

use proptest::prelude::*;

use intake_model::{FieldName, FormSettings, FormValues};
use intake_validate::{Schema, Visibility, evaluate, resolve_cascade, standard_schema};

fn schema() -> Schema {
    standard_schema(&FormSettings::default()).expect("standard schema")
}

fn choice(options: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(options).prop_map(String::from)
}

prop_compose! {
    fn arb_values()(
        full_name in "[A-Za-z ]{0,6}",
        email in prop_oneof![Just(String::new()), Just("ada@example.com".to_string()), "[a-z@.]{1,10}"],
        category in choice(&["", "software", "hardware", "services", "other"]),
        category_other in "[a-z]{0,4}",
        country in choice(&["", "usa", "canada", "other", "atlantis"]),
        country_other in "[a-z]{0,4}",
        state in choice(&["", "ca", "ny", "on", "qc", "other"]),
        state_other in "[a-z]{0,4}",
        interests in prop::collection::vec(choice(&["react", "redux", "yup"]), 0..3),
        notes in "[a-z]{0,8}",
    ) -> FormValues {
        FormValues::empty()
            .with(FieldName::FullName, full_name)
            .and_then(|v| v.with(FieldName::Email, email))
            .and_then(|v| v.with(FieldName::Category, category))
            .and_then(|v| v.with(FieldName::CategoryOther, category_other))
            .and_then(|v| v.with(FieldName::Country, country))
            .and_then(|v| v.with(FieldName::CountryOther, country_other))
            .and_then(|v| v.with(FieldName::State, state))
            .and_then(|v| v.with(FieldName::StateOther, state_other))
            .and_then(|v| v.with(FieldName::Interests, interests))
            .and_then(|v| v.with(FieldName::Notes, notes))
            .expect("shapes match fields")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Hidden fields never carry an error.
    #[test]
    fn prop_hidden_fields_have_no_error(values in arb_values()) {
        let schema = schema();
        let visibility = Visibility::derive(&values, &schema);
        let errors = evaluate(&values, &schema);
        for field in visibility.hidden() {
            prop_assert!(!errors.contains(field), "{} hidden but has error", field);
        }
    }

    /// State fields only apply to countries with a state table.
    #[test]
    fn prop_state_errors_need_state_country(values in arb_values()) {
        let errors = evaluate(&values, &schema());
        let country = values.text(FieldName::Country);
        if country != "usa" && country != "canada" {
            prop_assert!(!errors.contains(FieldName::State));
            prop_assert!(!errors.contains(FieldName::StateOther));
        }
    }

    /// The interests error is present exactly when nothing is picked.
    #[test]
    fn prop_interests_error_iff_empty(values in arb_values()) {
        let errors = evaluate(&values, &schema());
        prop_assert_eq!(
            errors.contains(FieldName::Interests),
            values.get(FieldName::Interests).is_unset()
        );
    }

    /// Evaluation depends only on its inputs.
    #[test]
    fn prop_evaluate_is_pure(values in arb_values()) {
        let schema = schema();
        let before = values.clone();
        let first = evaluate(&values, &schema);
        let second = evaluate(&values, &schema);
        prop_assert_eq!(first, second);
        prop_assert_eq!(values, before);
    }

    /// Resolving the same change twice yields the same resets.
    #[test]
    fn prop_cascade_is_idempotent(
        values in arb_values(),
        country in choice(&["", "usa", "canada", "other"]),
    ) {
        let schema = schema();
        let new_value = country.as_str().into();
        let first = resolve_cascade(FieldName::Country, &new_value, &values, &schema);
        let second = resolve_cascade(FieldName::Country, &new_value, &values, &schema);
        prop_assert_eq!(&first, &second);

        let cleared: Vec<_> = first.iter().map(|reset| reset.field).collect();
        prop_assert!(cleared.contains(&FieldName::State));
        prop_assert!(cleared.contains(&FieldName::StateOther));
        prop_assert_eq!(cleared.contains(&FieldName::CountryOther), country != "other");
    }

    /// After applying a cascade no hidden field keeps a value it could be
    /// judged by once it reappears.
    #[test]
    fn prop_cascade_leaves_no_stale_dependents(
        values in arb_values(),
        category in choice(&["", "software", "other"]),
    ) {
        let schema = schema();
        let mut next = values.clone();
        next.set(FieldName::Category, category.clone()).unwrap();
        let new_value = next.get(FieldName::Category).clone();
        for reset in resolve_cascade(FieldName::Category, &new_value, &next, &schema) {
            next.set(reset.field, reset.value).unwrap();
        }
        if category != "other" {
            prop_assert!(next.get(FieldName::CategoryOther).is_unset());
        }
    }
}
