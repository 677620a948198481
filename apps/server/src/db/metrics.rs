//! Metrics repository - database queries for metrics and monitoring

use sqlx::PgPool;

/// Tables whose row counts are reported, with their metric label.
pub const COUNTED_TABLES: &[(&str, &str)] = &[
    ("listing", "listings"),
    ("favorite", "favorites"),
    ("enquiry", "enquiries"),
    ("user", "users"),
    ("admin", "admins"),
];

#[derive(Clone)]
pub struct MetricsRepository {
    pool: PgPool,
}

impl MetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Row count of one of [`COUNTED_TABLES`].
    pub async fn count_rows(&self, table: &str) -> Result<i64, sqlx::Error> {
        // Table names come from the fixed list above, never from a request.
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let result: (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;

        Ok(result.0)
    }

    /// Round-trip to the database; used by the health check.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn get_pool_size(&self) -> u32 {
        self.pool.size()
    }

    pub fn get_num_idle(&self) -> usize {
        self.pool.num_idle()
    }
}
