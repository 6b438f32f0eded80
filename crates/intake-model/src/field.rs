//! Field identifiers and their static metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::value::{FieldValue, Shape};

/// The known fields of the intake form, in display order.
///
/// The derived `Ord` follows declaration order, so ordered maps keyed by
/// `FieldName` iterate in form order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FullName,
    Email,
    Category,
    CategoryOther,
    Country,
    CountryOther,
    State,
    StateOther,
    Interests,
    Notes,
}

/// How a field is edited by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Single choice from an option list.
    Select,
    /// Any number of choices from an option list.
    MultiSelect,
    /// Multi-line free text.
    TextArea,
}

impl FieldKind {
    /// Value shape stored for this kind of field.
    pub const fn shape(&self) -> Shape {
        match self {
            Self::MultiSelect => Shape::Multi,
            Self::Text | Self::Select | Self::TextArea => Shape::Scalar,
        }
    }

    /// Whether values must come from an option list.
    pub const fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Select => "Select",
            Self::MultiSelect => "Multi-select",
            Self::TextArea => "Text area",
        }
    }
}

impl FieldName {
    /// Every field in form order.
    pub const ALL: [FieldName; 10] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::Category,
        FieldName::CategoryOther,
        FieldName::Country,
        FieldName::CountryOther,
        FieldName::State,
        FieldName::StateOther,
        FieldName::Interests,
        FieldName::Notes,
    ];

    /// Wire name used in JSON documents and scripts.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Category => "category",
            Self::CategoryOther => "categoryOther",
            Self::Country => "country",
            Self::CountryOther => "countryOther",
            Self::State => "state",
            Self::StateOther => "stateOther",
            Self::Interests => "interests",
            Self::Notes => "notes",
        }
    }

    /// Human-readable label shown next to the input.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Category => "Category",
            Self::CategoryOther => "Specify category",
            Self::Country => "Country",
            Self::CountryOther => "Specify country",
            Self::State => "State/Province",
            Self::StateOther => "Specify state/province",
            Self::Interests => "Interests",
            Self::Notes => "Notes",
        }
    }

    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Category | Self::Country | Self::State => FieldKind::Select,
            Self::Interests => FieldKind::MultiSelect,
            Self::Notes => FieldKind::TextArea,
            Self::FullName
            | Self::Email
            | Self::CategoryOther
            | Self::CountryOther
            | Self::StateOther => FieldKind::Text,
        }
    }

    pub const fn shape(&self) -> Shape {
        self.kind().shape()
    }

    /// The unset value for this field: an empty string or an empty list.
    pub fn unset_value(&self) -> FieldValue {
        match self.shape() {
            Shape::Scalar => FieldValue::Scalar(String::new()),
            Shape::Multi => FieldValue::Multi(Vec::new()),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ModelError;

    /// Exact wire names only, the same rule serde applies.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
