//! User and admin account repositories

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AdminRecord, UserRecord};
use crate::{Error, Result};

const USER_COLUMNS: &str = "id, user_name, phone_number, email, password_hash, gender, \
    professional, social_media_link, created_at";

fn map_unique_violation(e: sqlx::Error, existing: &str) -> Error {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            Error::AlreadyExists(format!("{existing} already exists!"))
        }
        other => Error::Database(other),
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user. A duplicate phone number or email maps to [`Error::AlreadyExists`].
    pub async fn create(
        &self,
        user_name: &str,
        phone_number: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord> {
        let sql = format!(
            "INSERT INTO users (id, user_name, phone_number, email, password_hash) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_name)
            .bind(phone_number)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "User"))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC",
            USER_COLUMNS
        );
        sqlx::query_as::<_, UserRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    /// Set the supplied profile fields; `None` leaves a field unchanged.
    pub async fn update_profile(
        &self,
        id: Uuid,
        gender: Option<&str>,
        professional: Option<&str>,
        social_media_link: Option<&str>,
    ) -> Result<Option<UserRecord>> {
        let sql = format!(
            "UPDATE users SET gender = COALESCE($2, gender), \
             professional = COALESCE($3, professional), \
             social_media_link = COALESCE($4, social_media_link), \
             updated_at = now() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .bind(gender)
            .bind(professional)
            .bind(social_media_link)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }
}

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, email: &str, password_hash: &str) -> Result<AdminRecord> {
        sqlx::query_as::<_, AdminRecord>(
            "INSERT INTO admins (id, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Admin"))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminRecord>> {
        sqlx::query_as::<_, AdminRecord>(
            "SELECT id, email, password_hash, created_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)
    }

    pub async fn list(&self) -> Result<Vec<AdminRecord>> {
        sqlx::query_as::<_, AdminRecord>(
            "SELECT id, email, password_hash, created_at FROM admins \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)
    }
}
