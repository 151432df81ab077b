//! The users content type.
//!
//! Roles come from configuration and are passed in; nothing here reads
//! global state.

use punchcard_types::config::RoleConfig;
use punchcard_types::content_type::{
    AttributeDef, ContentType, ContentTypeBuilder, InputDef, Required, SelectOption,
};
use punchcard_types::error::ContentTypeError;

pub const USERS_TYPE_ID: &str = "users";
pub const CREATE_USER_TYPE_ID: &str = "users-create";

/// Role choices for the `role` select input.
pub fn role_options(roles: &[RoleConfig]) -> Vec<SelectOption> {
    roles
        .iter()
        .map(|role| SelectOption {
            label: role.name.clone(),
            value: role.id.clone(),
        })
        .collect()
}

/// The `users` content type, keyed by email.
pub fn structure(roles: &[RoleConfig]) -> ContentType {
    ContentType {
        id: USERS_TYPE_ID.to_string(),
        name: "Users".to_string(),
        description: "An individual user".to_string(),
        identifier: Some("email".to_string()),
        attributes: vec![
            AttributeDef::new("email", "email", "Email")
                .with_description("Email address for user")
                .with_required(Required::Save),
            AttributeDef::new("password", "password", "Password").with_description(
                "CAUTION: Adding a password here will change the user's password.",
            ),
            AttributeDef::new("role", "select", "Authorization role")
                .with_description("Select authorization level")
                .with_input(
                    "select",
                    InputDef {
                        options: role_options(roles),
                        ..InputDef::default()
                    },
                ),
        ],
    }
}

/// Content type used when creating a user: the password becomes required.
pub fn create(roles: &[RoleConfig]) -> Result<ContentType, ContentTypeError> {
    ContentTypeBuilder::from(structure(roles))
        .id(CREATE_USER_TYPE_ID)
        .name("Create New User")
        .description("Create a new user")
        .with_overrides([AttributeDef::new("password", "password", "Password")
            .with_description("Password for new user")
            .with_required(Required::Save)])
        .build()
}
