//! User and admin accounts.
//!
//! Stored rows carry a password hash; the public views returned to clients never do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::loose::deserialize_text;

/// Stored user row, hash included.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub user_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub gender: Option<String>,
    pub professional: Option<String>,
    pub social_media_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    pub email: String,
    pub gender: Option<String>,
    pub professional: Option<String>,
    #[serde(rename = "socialmedialink")]
    pub social_media_link: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            user_name: record.user_name,
            phone_number: record.phone_number,
            email: record.email,
            gender: record.gender,
            professional: record.professional,
            social_media_link: record.social_media_link,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<AdminRecord> for Admin {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserSignup {
    #[serde(rename = "userName", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub user_name: String,
    #[serde(rename = "phonenumber", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 5, max = 20))]
    pub phone_number: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Email and password, used by both user and admin sign-in and by admin signup.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default, deserialize_with = "deserialize_text")]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Profile fields a user may change after signup. Blank values leave the field as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub gender: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub professional: String,
    #[serde(rename = "socialmedialink", default, deserialize_with = "deserialize_text")]
    pub social_media_link: String,
}

impl ProfileUpdate {
    fn field(value: &str) -> Option<&str> {
        (!value.is_empty()).then_some(value)
    }

    pub fn gender(&self) -> Option<&str> {
        Self::field(&self.gender)
    }

    pub fn professional(&self) -> Option<&str> {
        Self::field(&self.professional)
    }

    pub fn social_media_link(&self) -> Option<&str> {
        Self::field(&self.social_media_link)
    }
}
