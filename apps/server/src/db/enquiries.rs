//! Enquiry repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Enquiry;
use crate::{Error, Result};

const ENQUIRY_COLUMNS: &str =
    "e.id, e.user_name, e.phone_number, e.user_id, e.listing_id, e.accepted, e.created_at";

#[derive(sqlx::FromRow)]
struct EnquiryRow {
    id: Uuid,
    user_name: String,
    phone_number: String,
    user_id: String,
    listing_id: Uuid,
    accepted: Option<bool>,
    created_at: DateTime<Utc>,
}

impl From<EnquiryRow> for Enquiry {
    fn from(row: EnquiryRow) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            phone_number: row.phone_number,
            user_id: row.user_id,
            listing_id: row.listing_id,
            accepted: row.accepted,
            created_at: row.created_at,
        }
    }
}

/// Which enquiries a listing query should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnquiryScope {
    All,
    ByUser(String),
    ByState(bool),
    /// Enquiries on listings owned by this customer.
    ByListingOwner(String),
}

#[derive(Clone)]
pub struct EnquiryRepository {
    pool: PgPool,
}

impl EnquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_name: &str,
        phone_number: &str,
        user_id: &str,
        listing_id: Uuid,
    ) -> Result<Enquiry> {
        let sql = format!(
            "INSERT INTO enquiries AS e (id, user_name, phone_number, user_id, listing_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ENQUIRY_COLUMNS
        );
        let row = sqlx::query_as::<_, EnquiryRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_name)
            .bind(phone_number)
            .bind(user_id)
            .bind(listing_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    Error::NotFound("Property not found".to_string())
                }
                other => Error::Database(other),
            })?;

        Ok(row.into())
    }

    /// Record the owner's decision. Returns `None` when the enquiry does not exist.
    pub async fn set_accepted(&self, id: Uuid, accepted: bool) -> Result<Option<Enquiry>> {
        let sql = format!(
            "UPDATE enquiries AS e SET accepted = $2 WHERE e.id = $1 RETURNING {}",
            ENQUIRY_COLUMNS
        );
        let row = sqlx::query_as::<_, EnquiryRow>(&sql)
            .bind(id)
            .bind(accepted)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(Enquiry::from))
    }

    /// Enquiries in scope, newest first.
    pub async fn list(&self, scope: &EnquiryScope) -> Result<Vec<Enquiry>> {
        let mut query = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {} FROM enquiries e",
            ENQUIRY_COLUMNS
        ));
        match scope {
            EnquiryScope::All => {}
            EnquiryScope::ByUser(user_id) => {
                query.push(" WHERE e.user_id = ").push_bind(user_id.clone());
            }
            EnquiryScope::ByState(accepted) => {
                query.push(" WHERE e.accepted = ").push_bind(*accepted);
            }
            EnquiryScope::ByListingOwner(customer_id) => {
                query
                    .push(" JOIN listings l ON l.id = e.listing_id WHERE l.customer_id = ")
                    .push_bind(customer_id.clone());
            }
        }
        query.push(" ORDER BY e.created_at DESC, e.id DESC");

        let rows = query
            .build_query_as::<EnquiryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(Enquiry::from).collect())
    }
}
