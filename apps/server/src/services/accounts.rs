//! Account service - user and admin signup, sign-in and profiles
//!
//! Passwords are stored as Argon2id PHC strings. Sign-in only verifies the password;
//! no session or token is issued.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;
use validator::Validate;

use crate::db::{AdminRepository, UserRepository};
use crate::models::{Admin, Credentials, ProfileUpdate, User, UserSignup};
use crate::{Error, Result};

#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    admins: AdminRepository,
}

impl AccountService {
    pub fn new(users: UserRepository, admins: AdminRepository) -> Self {
        Self { users, admins }
    }

    pub async fn signup_user(&self, request: UserSignup) -> Result<User> {
        request.validate()?;
        let hash = hash_password(request.password).await?;
        let record = self
            .users
            .create(
                &request.user_name,
                &request.phone_number,
                &request.email,
                &hash,
            )
            .await?;

        tracing::info!(user_id = %record.id, "User signed up");
        Ok(record.into())
    }

    pub async fn signin_user(&self, credentials: Credentials) -> Result<User> {
        credentials.validate()?;
        let record = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| Error::NotFound("User not found!".to_string()))?;

        verify_password(credentials.password, record.password_hash.clone()).await?;
        Ok(record.into())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self
            .users
            .list()
            .await?
            .into_iter()
            .map(User::from)
            .collect())
    }

    /// Blank profile fields leave the stored value unchanged.
    pub async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User> {
        let record = self
            .users
            .update_profile(
                id,
                update.gender(),
                update.professional(),
                update.social_media_link(),
            )
            .await?
            .ok_or_else(|| Error::NotFound("User not found!".to_string()))?;

        Ok(record.into())
    }

    pub async fn signup_admin(&self, credentials: Credentials) -> Result<Admin> {
        credentials.validate()?;
        let hash = hash_password(credentials.password).await?;
        let record = self.admins.create(&credentials.email, &hash).await?;

        tracing::info!(admin_id = %record.id, "Admin signed up");
        Ok(record.into())
    }

    pub async fn signin_admin(&self, credentials: Credentials) -> Result<Admin> {
        credentials.validate()?;
        let record = self
            .admins
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| Error::NotFound("Admin not found!".to_string()))?;

        verify_password(credentials.password, record.password_hash.clone()).await?;
        Ok(record.into())
    }

    pub async fn list_admins(&self) -> Result<Vec<Admin>> {
        Ok(self
            .admins
            .list()
            .await?
            .into_iter()
            .map(Admin::from)
            .collect())
    }
}

// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {e}")))?
}

async fn verify_password(password: String, hash: String) -> Result<()> {
    tokio::task::spawn_blocking(move || verify_password_blocking(&password, &hash))
        .await
        .map_err(|e| Error::Internal(format!("Password verification task failed: {e}")))?
}

fn hash_password_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Failed to hash password: {e}")))
}

fn verify_password_blocking(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Stored password hash is malformed: {e}")))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| Error::InvalidCredentials("Invalid password!".to_string()))
}
