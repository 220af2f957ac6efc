use serde::{Deserialize, Serialize};

use super::{Entity, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub favorite_color: String,
    /// Free-form date string, stored as given.
    pub birthday: String,
}

impl Entity for Contact {
    const COLLECTION: &'static str = "contacts";
    const LABEL: &'static str = "Contact";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("firstName"),
        FieldSpec::text("lastName"),
        FieldSpec::text("email"),
        FieldSpec::text("favoriteColor"),
        FieldSpec::text("birthday"),
    ];
    const VALIDATION_MESSAGE: &'static str =
        "All fields (firstName, lastName, email, favoriteColor, birthday) are required.";
    const DELETED_MESSAGE: &'static str = "Contact deleted successfully.";
}
