//! Favorites repository - customer/listing join rows

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Favorite, ToggleOutcome};
use crate::{Error, Result};

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: Uuid,
    customer_id: String,
    customer_name: String,
    listing_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            listing_id: row.listing_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove the (customer, listing) row if present, otherwise insert it.
    ///
    /// Runs in one transaction; the unique constraint on (customer_id, listing_id) keeps a
    /// racing double insert from creating two rows.
    pub async fn toggle(
        &self,
        customer_id: &str,
        customer_name: &str,
        listing_id: Uuid,
    ) -> Result<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let removed = sqlx::query("DELETE FROM favorites WHERE customer_id = $1 AND listing_id = $2")
            .bind(customer_id)
            .bind(listing_id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?
            .rows_affected();

        let outcome = if removed > 0 {
            ToggleOutcome::Removed
        } else {
            sqlx::query(
                "INSERT INTO favorites (id, customer_id, customer_name, listing_id) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (customer_id, listing_id) DO NOTHING",
            )
            .bind(Uuid::new_v4())
            .bind(customer_id)
            .bind(customer_name)
            .bind(listing_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    Error::NotFound("Property not found".to_string())
                }
                other => Error::Database(other),
            })?;
            ToggleOutcome::Added
        };

        tx.commit().await.map_err(Error::Database)?;
        Ok(outcome)
    }

    /// A customer's favorites, newest first.
    pub async fn list_for_customer(&self, customer_id: &str) -> Result<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, customer_id, customer_name, listing_id, created_at FROM favorites \
             WHERE customer_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }
}
