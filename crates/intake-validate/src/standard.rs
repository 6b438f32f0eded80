//! The intake form's schema.

use intake_model::{FieldName, FormSettings, OTHER_OPTION};

use crate::error::SchemaError;
use crate::schema::{CascadeEdge, Check, Condition, FieldRule, ResetPolicy, Schema};

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_SPECIFY: &str = "Please specify";
pub const MSG_TOO_SHORT: &str = "Too short";
pub const MSG_INVALID_EMAIL: &str = "Invalid email";
pub const MSG_PICK_ONE: &str = "Pick at least one";
pub const MSG_TOO_LONG: &str = "Keep it brief";

/// Build the form schema for the given settings.
///
/// The state field applies to every country listed in the settings'
/// country→states table.
pub fn standard_schema(settings: &FormSettings) -> Result<Schema, SchemaError> {
    let category_other = Condition::equals(FieldName::Category, OTHER_OPTION);
    let country_other = Condition::equals(FieldName::Country, OTHER_OPTION);
    let has_states = Condition::one_of(
        FieldName::Country,
        settings.catalog.countries_with_states(),
    );
    let state_other = Condition::equals(FieldName::State, OTHER_OPTION);

    Schema::builder()
        .rule(
            FieldRule::new(FieldName::FullName)
                .required(MSG_REQUIRED)
                .check(Check::MinLength(settings.full_name_min_len), MSG_TOO_SHORT),
        )
        .rule(
            FieldRule::new(FieldName::Email)
                .required(MSG_REQUIRED)
                .check(Check::Email, MSG_INVALID_EMAIL),
        )
        .rule(FieldRule::new(FieldName::Category).required(MSG_REQUIRED))
        .rule(
            FieldRule::new(FieldName::CategoryOther)
                .visible_when(category_other.clone())
                .required_when(category_other, MSG_SPECIFY),
        )
        .rule(FieldRule::new(FieldName::Country).required(MSG_REQUIRED))
        .rule(
            FieldRule::new(FieldName::CountryOther)
                .visible_when(country_other.clone())
                .required_when(country_other, MSG_SPECIFY),
        )
        .rule(
            FieldRule::new(FieldName::State)
                .visible_when(has_states.clone())
                .required_when(has_states, MSG_REQUIRED),
        )
        .rule(
            FieldRule::new(FieldName::StateOther)
                .visible_when(state_other.clone())
                .required_when(state_other, MSG_SPECIFY),
        )
        .rule(FieldRule::new(FieldName::Interests).check(Check::NonEmptySet, MSG_PICK_ONE))
        .rule(
            FieldRule::new(FieldName::Notes)
                .check(Check::MaxLength(settings.notes_max_len), MSG_TOO_LONG),
        )
        .cascade(CascadeEdge::new(
            FieldName::Category,
            &[FieldName::CategoryOther],
            ResetPolicy::UnlessEquals(OTHER_OPTION.to_string()),
        ))
        .cascade(CascadeEdge::new(
            FieldName::Country,
            &[FieldName::State, FieldName::StateOther],
            ResetPolicy::Always,
        ))
        .cascade(CascadeEdge::new(
            FieldName::Country,
            &[FieldName::CountryOther],
            ResetPolicy::UnlessEquals(OTHER_OPTION.to_string()),
        ))
        .cascade(CascadeEdge::new(
            FieldName::State,
            &[FieldName::StateOther],
            ResetPolicy::UnlessEquals(OTHER_OPTION.to_string()),
        ))
        .build()
}
