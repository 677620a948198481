//! Metrics service for collecting application metrics

use crate::db::metrics::{MetricsRepository, COUNTED_TABLES};

/// Refreshes gauges that are sampled at scrape time rather than updated inline.
#[derive(Clone)]
pub struct MetricsService {
    repo: MetricsRepository,
}

impl MetricsService {
    pub fn new(repo: MetricsRepository) -> Self {
        Self { repo }
    }

    pub fn update_db_connection_metrics(&self) {
        let pool_size = self.repo.get_pool_size();
        let idle = self.repo.get_num_idle() as u32;

        crate::metrics::DB_CONNECTIONS_ACTIVE.set(pool_size.saturating_sub(idle) as i64);
        crate::metrics::DB_CONNECTIONS_IDLE.set(idle as i64);
    }

    pub async fn update_record_metrics(&self) {
        for &(kind, table) in COUNTED_TABLES {
            match self.repo.count_rows(table).await {
                Ok(count) => crate::metrics::RECORDS_TOTAL
                    .with_label_values(&[kind])
                    .set(count),
                Err(e) => tracing::warn!(table = %table, error = %e, "Failed to count records"),
            }
        }
    }

    /// Refresh sampled gauges and render the service info family.
    pub async fn collect_custom_metrics(&self, server_version: &str) -> String {
        self.update_db_connection_metrics();
        self.update_record_metrics().await;

        let mut output = String::new();
        output.push_str("# HELP estatehub_server_info Listing service information\n");
        output.push_str("# TYPE estatehub_server_info gauge\n");
        output.push_str(&format!(
            "estatehub_server_info{{version=\"{}\"}} 1\n",
            server_version
        ));

        output
    }

    pub async fn database_reachable(&self) -> bool {
        match self.repo.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
