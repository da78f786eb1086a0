use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::{errors::ValidationError, Error, Result};

/// Identity anchor: every category, transaction and budget is owned by a user.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Input model for registration. The password arrives already hashed;
/// credential handling lives with the identity layer, not here.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if self.password_hash.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }
        Ok(())
    }
}
