//! Search service - listing search
//!
//! Orchestrates search operations by:
//! - Compiling client criteria into filter clauses, sort order and a page window
//! - Running the page and count queries through the search engine
//! - Shaping the paginated envelope

use chrono::Utc;
use serde::Serialize;

use crate::config::SearchConfig;
use crate::db::search::{compile, SearchCriteria, SearchEngine};
use crate::metrics::{outcome_label, LISTING_SEARCH_CLAUSES, LISTING_SEARCH_RESULTS, LISTING_SEARCH_TOTAL};
use crate::models::Listing;
use crate::Result;

/// Paginated search response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub success: bool,
    pub total_count: i64,
    pub current_page: u32,
    pub total_pages: i64,
    pub listings: Vec<Listing>,
}

#[derive(Clone)]
pub struct SearchService {
    engine: SearchEngine,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(engine: SearchEngine, config: SearchConfig) -> Self {
        Self { engine, config }
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResults> {
        let result = self.run(criteria).await;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.status().as_u16(),
        };
        LISTING_SEARCH_TOTAL
            .with_label_values(&[outcome_label(status)])
            .inc();

        result
    }

    async fn run(&self, criteria: &SearchCriteria) -> Result<SearchResults> {
        let compiled = compile(criteria, Utc::now(), &self.config)?;
        let page = self.engine.search(&compiled).await?;

        let sort = compiled.sort.label();
        LISTING_SEARCH_CLAUSES
            .with_label_values(&[sort])
            .observe(compiled.clauses.len() as f64);
        LISTING_SEARCH_RESULTS
            .with_label_values(&[sort])
            .observe(page.total as f64);

        Ok(SearchResults {
            success: true,
            total_count: page.total,
            current_page: compiled.page.page,
            total_pages: compiled.page.total_pages(page.total),
            listings: page.listings,
        })
    }
}
