//! Session behaviour: cascades, touch filtering and submissions.

use std::thread;

use chrono::{TimeZone, Utc};
use intake_core::{
    FixedClock, FormError, FormSession, SequentialIds, SubmissionSink, SubmitAttempt,
};
use intake_model::{FieldName, FieldValue, FormSettings, FormValues, ModelError};

fn session() -> FormSession {
    let sink = SubmissionSink::new(
        SequentialIds::new("sub"),
        FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
    );
    FormSession::from_settings(&FormSettings::default(), sink).expect("standard session")
}

fn fill_ada(session: &mut FormSession) {
    session.change_field(FieldName::FullName, "Ada Lovelace").unwrap();
    session.change_field(FieldName::Email, "ada@example.com").unwrap();
    session.change_field(FieldName::Category, "other").unwrap();
    session.change_field(FieldName::CategoryOther, "Consulting").unwrap();
    session.change_field(FieldName::Country, "usa").unwrap();
    session.change_field(FieldName::State, "other").unwrap();
    session.change_field(FieldName::StateOther, "Atlantis").unwrap();
    session.change_field(FieldName::Interests, vec!["react"]).unwrap();
    session.change_field(FieldName::Notes, "").unwrap();
}

#[test]
fn submit_on_empty_form_touches_everything_and_reports_required_fields() {
    let mut session = session();
    let attempt = session.attempt_submit().unwrap();

    let SubmitAttempt::Rejected(errors) = attempt else {
        panic!("empty form must be rejected");
    };
    let fields: Vec<_> = errors.fields().collect();
    assert_eq!(
        fields,
        vec![
            FieldName::FullName,
            FieldName::Email,
            FieldName::Category,
            FieldName::Country,
            FieldName::Interests,
        ]
    );
    assert!(session.history().is_empty());

    let snapshot = session.snapshot();
    assert!(snapshot.touched.values().all(|touched| *touched));
    assert_eq!(snapshot.visible_errors, snapshot.errors);
}

#[test]
fn ada_submission_is_recorded_and_form_resets() {
    let mut session = session();
    fill_ada(&mut session);
    assert!(session.errors().is_empty());
    let before = session.history().len();

    let attempt = session.attempt_submit().unwrap();
    let SubmitAttempt::Accepted(submission) = attempt else {
        panic!("complete form must be accepted");
    };

    assert_eq!(session.history().len(), before + 1);
    let newest = &session.history()[0];
    assert_eq!(newest, &submission);
    assert_eq!(newest.values().text(FieldName::FullName), "Ada Lovelace");
    assert_eq!(newest.values().text(FieldName::StateOther), "Atlantis");
    assert_eq!(newest.id().as_str(), "sub-1");
    assert_eq!(newest.submitted_at().to_rfc3339(), "2024-01-15T10:30:00+00:00");

    assert_eq!(session.values(), &FormValues::empty());
    assert!(session.snapshot().touched.values().all(|touched| !*touched));
}

#[test]
fn consecutive_submissions_are_newest_first() {
    let mut session = session();
    fill_ada(&mut session);
    session.attempt_submit().unwrap();

    fill_ada(&mut session);
    session.change_field(FieldName::FullName, "Grace Hopper").unwrap();
    session.attempt_submit().unwrap();

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].values().text(FieldName::FullName), "Grace Hopper");
    assert_eq!(history[0].id().as_str(), "sub-2");
    assert_eq!(history[1].values().text(FieldName::FullName), "Ada Lovelace");
}

#[test]
fn country_switch_resets_state_chain() {
    let mut session = session();
    session.change_field(FieldName::Country, "usa").unwrap();
    session.change_field(FieldName::State, "other").unwrap();
    session.change_field(FieldName::StateOther, "Atlantis").unwrap();
    session.blur_field(FieldName::State);
    session.blur_field(FieldName::StateOther);

    // Canada also offers `other`; the state is still cleared.
    session.change_field(FieldName::Country, "canada").unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.values.get(FieldName::State).is_unset());
    assert!(snapshot.values.get(FieldName::StateOther).is_unset());
    assert!(!snapshot.touched[&FieldName::State]);
    assert!(!snapshot.touched[&FieldName::StateOther]);
    assert!(snapshot.visibility.is_visible(FieldName::State));
    assert!(!snapshot.visibility.is_visible(FieldName::StateOther));
    assert_eq!(snapshot.errors.get(FieldName::State), Some("Required"));
    // Untouched after the reset, so not shown yet.
    assert!(!snapshot.visible_errors.contains(FieldName::State));
}

#[test]
fn blur_while_hidden_does_not_survive_reveal() {
    let mut session = session();
    session.blur_field(FieldName::CategoryOther);
    assert!(session.snapshot().touched[&FieldName::CategoryOther]);

    session.change_field(FieldName::Category, "other").unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.visibility.is_visible(FieldName::CategoryOther));
    assert!(!snapshot.touched[&FieldName::CategoryOther]);
    assert_eq!(snapshot.errors.get(FieldName::CategoryOther), Some("Please specify"));
    assert!(!snapshot.visible_errors.contains(FieldName::CategoryOther));
}

#[test]
fn rejected_submit_does_not_touch_fields_revealed_later() {
    let mut session = session();
    session.attempt_submit().unwrap();
    session.change_field(FieldName::Country, "other").unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.touched[&FieldName::Country]);
    assert!(!snapshot.touched[&FieldName::CountryOther]);
    assert!(snapshot.errors.contains(FieldName::CountryOther));
    assert!(!snapshot.visible_errors.contains(FieldName::CountryOther));

    session.change_field(FieldName::Country, "usa").unwrap();
    let snapshot = session.snapshot();
    assert!(!snapshot.touched[&FieldName::State]);
    assert!(!snapshot.visible_errors.contains(FieldName::State));
    // Fields whose visibility did not change keep their flags.
    assert!(snapshot.touched[&FieldName::FullName]);
    assert_eq!(snapshot.visible_errors.get(FieldName::FullName), Some("Required"));
}

#[test]
fn leaving_other_category_clears_specification() {
    let mut session = session();
    session.change_field(FieldName::Category, "other").unwrap();
    session.change_field(FieldName::CategoryOther, "Consulting").unwrap();
    session.change_field(FieldName::Category, "hardware").unwrap();

    assert!(session.values().get(FieldName::CategoryOther).is_unset());
    assert!(!session.snapshot().visibility.is_visible(FieldName::CategoryOther));
    assert!(!session.errors().contains(FieldName::CategoryOther));
}

#[test]
fn leaving_other_country_clears_country_other() {
    let mut session = session();
    session.change_field(FieldName::Country, "other").unwrap();
    session.change_field(FieldName::CountryOther, "Atlantis").unwrap();
    assert!(session.errors().get(FieldName::CountryOther).is_none());

    session.change_field(FieldName::Country, "usa").unwrap();
    assert!(session.values().get(FieldName::CountryOther).is_unset());
}

#[test]
fn blur_reveals_errors_of_touched_fields_only() {
    let mut session = session();
    session.change_field(FieldName::FullName, "A").unwrap();
    assert!(session.snapshot().visible_errors.is_empty());

    session.blur_field(FieldName::FullName);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.visible_errors.len(), 1);
    assert_eq!(snapshot.visible_errors.get(FieldName::FullName), Some("Too short"));
    assert!(snapshot.errors.contains(FieldName::Email));
}

#[test]
fn interests_error_follows_selection() {
    let mut session = session();
    assert_eq!(
        session.errors().get(FieldName::Interests),
        Some("Pick at least one")
    );
    session.change_field(FieldName::Interests, vec!["react", "yup"]).unwrap();
    assert!(!session.errors().contains(FieldName::Interests));
    session
        .change_field(FieldName::Interests, Vec::<String>::new())
        .unwrap();
    assert_eq!(
        session.errors().get(FieldName::Interests),
        Some("Pick at least one")
    );
}

#[test]
fn unknown_options_are_rejected_without_mutation() {
    let mut session = session();
    let err = session
        .change_field(FieldName::Country, "atlantis")
        .unwrap_err();
    assert!(matches!(
        err,
        FormError::UnknownOption { field: FieldName::Country, ref value } if value == "atlantis"
    ));
    assert!(session.values().get(FieldName::Country).is_unset());

    // States belong to the selected country.
    session.change_field(FieldName::Country, "canada").unwrap();
    assert!(session.change_field(FieldName::State, "ny").is_err());
    session.change_field(FieldName::State, "qc").unwrap();

    assert!(
        session
            .change_field(FieldName::Interests, vec!["react", "cobol"])
            .is_err()
    );
    // Clearing a select is always allowed.
    session.change_field(FieldName::State, "").unwrap();
}

#[test]
fn hidden_fields_cannot_be_written() {
    let mut session = session();
    let err = session
        .change_field(FieldName::StateOther, "Atlantis")
        .unwrap_err();
    assert!(matches!(
        err,
        FormError::HiddenField {
            field: FieldName::StateOther
        }
    ));
    assert!(session.values().get(FieldName::StateOther).is_unset());
    session.change_field(FieldName::StateOther, "").unwrap();

    session.change_field(FieldName::Category, "other").unwrap();
    session.change_field(FieldName::CategoryOther, "Consulting").unwrap();
}

#[test]
fn snapshot_serializes_with_wire_names() {
    let mut session = session();
    session.change_field(FieldName::Country, "usa").unwrap();
    session.blur_field(FieldName::Country);

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["values"]["country"], "usa");
    assert_eq!(json["touched"]["country"], true);
    assert_eq!(json["visibility"]["state"], true);
    assert_eq!(json["visibility"]["stateOther"], false);
    assert_eq!(json["errors"]["state"], "Required");
    assert!(json["visibleErrors"].get("state").is_none());
    assert_eq!(json["required"][3], "country");
}

#[test]
fn wrong_shape_is_rejected() {
    let mut session = session();
    let err = session
        .change_field(FieldName::Interests, FieldValue::from("react"))
        .unwrap_err();
    assert!(matches!(err, FormError::Model(ModelError::ShapeMismatch { .. })));
}

#[test]
fn options_for_state_follow_country() {
    let mut session = session();
    assert_eq!(session.options_for(FieldName::State).map(<[_]>::len), Some(0));
    session.change_field(FieldName::Country, "usa").unwrap();
    let states: Vec<_> = session
        .options_for(FieldName::State)
        .unwrap()
        .iter()
        .map(|option| option.value.as_str())
        .collect();
    assert_eq!(states, vec!["ca", "ny", "tx", "other"]);
    assert!(session.options_for(FieldName::Notes).is_none());
}

#[test]
fn reset_keeps_history() {
    let mut session = session();
    fill_ada(&mut session);
    session.attempt_submit().unwrap();
    session.change_field(FieldName::FullName, "Grace").unwrap();
    session.blur_field(FieldName::FullName);

    session.reset();
    assert_eq!(session.values(), &FormValues::empty());
    assert!(session.snapshot().visible_errors.is_empty());
    assert_eq!(session.history().len(), 1);

    session.clear_history();
    assert!(session.history().is_empty());
}

#[test]
fn shared_session_serializes_edits() {
    let shared = session().into_shared();
    let handles: Vec<_> = ["usa", "canada"]
        .into_iter()
        .map(|country| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut session = shared.lock().expect("session lock");
                session.change_field(FieldName::Country, country).unwrap();
                session.change_field(FieldName::State, "other").unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("edit thread");
    }

    let session = shared.lock().expect("session lock");
    assert_eq!(session.values().text(FieldName::State), "other");
    assert!(session.errors().contains(FieldName::StateOther));
}
