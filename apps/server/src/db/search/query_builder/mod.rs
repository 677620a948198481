//! SQL query builder for listing searches.
//!
//! Renders a [`CompiledSearch`] into a page query and a count query. Both share the exact
//! same WHERE clause so the total always counts what the page filters.

use super::compile::{CompiledSearch, SortOrder};
use super::numeric::numeric_projection;
use crate::db::listings::LISTING_COLUMNS;

mod bind;
mod clauses;

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
}

pub struct QueryBuilder<'a> {
    search: &'a CompiledSearch,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(search: &'a CompiledSearch) -> Self {
        Self { search }
    }

    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT {} FROM listings l WHERE TRUE", LISTING_COLUMNS);
        let mut bind_params = Vec::new();

        self.push_filters(&mut sql, &mut bind_params);
        self.push_order_by(&mut sql);

        sql.push_str(&format!(
            " LIMIT {} OFFSET {}",
            self.search.page.limit(),
            self.search.page.offset()
        ));

        (sql, bind_params)
    }

    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = String::from("SELECT COUNT(*) FROM listings l WHERE TRUE");
        let mut bind_params = Vec::new();

        self.push_filters(&mut sql, &mut bind_params);

        (sql, bind_params)
    }

    fn push_filters(&self, sql: &mut String, bind_params: &mut Vec<BindValue>) {
        for clause in &self.search.clauses {
            let rendered = clauses::build_clause(clause, bind_params);
            sql.push_str(" AND ");
            sql.push_str(&rendered);
        }
    }

    fn push_order_by(&self, sql: &mut String) {
        // created_at then id keeps pages stable when prices tie or are missing.
        match self.search.sort {
            SortOrder::Latest => sql.push_str(" ORDER BY l.created_at DESC, l.id DESC"),
            SortOrder::PriceAscending | SortOrder::PriceDescending => {
                let direction = if self.search.sort == SortOrder::PriceAscending {
                    "ASC"
                } else {
                    "DESC"
                };
                sql.push_str(&format!(
                    " ORDER BY {} {} NULLS LAST, l.created_at DESC, l.id DESC",
                    numeric_projection("l.expect_price"),
                    direction
                ));
            }
        }
    }
}
