//! Application state shared by every handler

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};

use crate::config::{Config, DatabaseConfig};
use crate::db::{
    AdminRepository, EnquiryRepository, FavoriteRepository, MetricsRepository,
    PostgresListingStore, SearchEngine, UserRepository,
};
use crate::services::{
    AccountService, EnquiryService, FavoriteService, ListingService, MetricsService,
    SearchService, UploadStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub listing_service: Arc<ListingService>,
    pub search_service: Arc<SearchService>,
    pub favorite_service: Arc<FavoriteService>,
    pub enquiry_service: Arc<EnquiryService>,
    pub account_service: Arc<AccountService>,
    pub metrics_service: Arc<MetricsService>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Connect to the configured database and build every service.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let options = PgConnectOptions::from_str(&config.database.url)
            .context("Invalid database.url")?;
        let pool = connect_pool(&config.database, options).await?;
        Self::with_pool(config, pool).await
    }

    /// Build the state around an existing pool, running migrations when enabled.
    pub async fn with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        if config.database.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let uploads = UploadStore::from_config(&config.storage);
        uploads
            .ensure_dir()
            .await
            .with_context(|| format!("Failed to create upload directory {:?}", uploads.dir()))?;

        let store = PostgresListingStore::new(pool.clone());
        let search_engine = SearchEngine::new(pool.clone());

        Ok(Self {
            listing_service: Arc::new(ListingService::new(store.clone())),
            search_service: Arc::new(SearchService::new(search_engine, config.search.clone())),
            favorite_service: Arc::new(FavoriteService::new(
                FavoriteRepository::new(pool.clone()),
                store.clone(),
            )),
            enquiry_service: Arc::new(EnquiryService::new(
                EnquiryRepository::new(pool.clone()),
                store,
            )),
            account_service: Arc::new(AccountService::new(
                UserRepository::new(pool.clone()),
                AdminRepository::new(pool.clone()),
            )),
            metrics_service: Arc::new(MetricsService::new(MetricsRepository::new(pool.clone()))),
            uploads: Arc::new(uploads),
            config: Arc::new(config),
            db_pool: pool,
        })
    }
}

/// Open a pool whose connections all carry the configured statement timeout.
pub async fn connect_pool(
    config: &DatabaseConfig,
    options: PgConnectOptions,
) -> anyhow::Result<PgPool> {
    let statement_timeout_ms = config.statement_timeout_seconds.saturating_mul(1000);

    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                conn.execute(format!("SET statement_timeout = {}", statement_timeout_ms).as_str())
                    .await?;
                Ok(())
            })
        })
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        min_connections = config.pool_min_size,
        max_connections = config.pool_max_size,
        statement_timeout_ms,
        "Database pool ready"
    );
    Ok(pool)
}
