//! Search execution
//!
//! The SearchEngine runs a compiled search against the listings table. The page and the
//! total count are read inside one repeatable-read, read-only transaction so both observe
//! the same snapshot.

use crate::db::search::compile::CompiledSearch;
use crate::db::search::query_builder::{self, QueryBuilder};
use crate::models::Listing;
use crate::Result;
use sqlx::PgPool;

mod execute;

/// One page of matches plus the total number of matches.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub listings: Vec<Listing>,
    pub total: i64,
}

#[derive(Clone)]
pub struct SearchEngine {
    db_pool: PgPool,
}

impl SearchEngine {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn search(&self, compiled: &CompiledSearch) -> Result<SearchPage> {
        let builder = QueryBuilder::new(compiled);

        let mut tx = self
            .db_pool
            .begin()
            .await
            .map_err(crate::Error::Database)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(crate::Error::Database)?;

        let listings = self.execute_search(&mut *tx, &builder).await?;
        let total = self.count_total(&mut *tx, &builder).await?;

        tx.commit().await.map_err(crate::Error::Database)?;

        tracing::debug!(
            clauses = compiled.clauses.len(),
            page = compiled.page.page,
            page_size = compiled.page.size,
            returned = listings.len(),
            total,
            "Listing search executed"
        );

        Ok(SearchPage { listings, total })
    }
}
