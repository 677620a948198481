use super::{query_builder, QueryBuilder, SearchEngine};
use crate::db::listings::ListingRow;
use crate::models::Listing;
use crate::Result;
use sqlx::PgConnection;

impl SearchEngine {
    /// Execute the page query.
    pub(super) async fn execute_search(
        &self,
        conn: &mut PgConnection,
        query: &QueryBuilder<'_>,
    ) -> Result<Vec<Listing>> {
        let (sql, bind_values) = query.build_sql();

        let mut query_builder = sqlx::query_as::<_, ListingRow>(&sql);
        for value in bind_values {
            query_builder = match value {
                query_builder::BindValue::Text(v) => query_builder.bind(v),
                query_builder::BindValue::TextArray(vs) => query_builder.bind(vs),
            };
        }

        let rows = query_builder
            .fetch_all(&mut *conn)
            .await
            .map_err(crate::Error::Database)?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    pub(super) async fn count_total(
        &self,
        conn: &mut PgConnection,
        query: &QueryBuilder<'_>,
    ) -> Result<i64> {
        let (sql, bind_values) = query.build_count_sql();

        let mut query_builder = sqlx::query_scalar::<_, i64>(&sql);
        for value in bind_values {
            query_builder = match value {
                query_builder::BindValue::Text(v) => query_builder.bind(v),
                query_builder::BindValue::TextArray(vs) => query_builder.bind(vs),
            };
        }

        let total = query_builder
            .fetch_one(&mut *conn)
            .await
            .map_err(crate::Error::Database)?;

        Ok(total)
    }
}
