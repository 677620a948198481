pub mod assertions;
pub mod builders;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use estatehub::{api::create_router, AppState, Config};
use futures::FutureExt as _;
use serde_json::Value;
use sqlx::Connection as _;
use tower::ServiceExt as _;
use url::Url;
use uuid::Uuid;

pub use assertions::*;
pub use builders::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    schema: String,
    admin_database_url: String,
    _upload_dir: tempfile::TempDir,
}

/// A multipart part: text field or file.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        file_name: &'a str,
        content: &'a [u8],
    },
}

const BOUNDARY: &str = "estatehub-test-boundary";

impl TestApp {
    async fn new_with_config(
        base: Config,
        configure: impl FnOnce(&mut Config),
    ) -> anyhow::Result<Self> {
        let mut config = base;
        configure(&mut config);

        // Per-test schema, pool and upload directory.
        let admin_database_url = config.database.url.clone();

        let schema = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = sqlx::PgConnection::connect(&admin_database_url)
            .await
            .context("connect admin db for schema create")?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;

        let upload_dir = tempfile::tempdir().context("create upload dir")?;
        config.storage.upload_dir = upload_dir.path().to_path_buf();

        config.database.url = with_search_path(&admin_database_url, &schema)?;
        config.database.pool_min_size = 0;
        // Tests run in parallel, each with its own pool.
        config.database.pool_max_size = 2;
        config.database.pool_timeout_seconds = 30;
        config.database.statement_timeout_seconds = 30;

        let state = AppState::new(config)
            .await
            .context("initialize AppState")?;

        let router = create_router(state.clone());

        Ok(Self {
            router,
            state,
            schema,
            admin_database_url,
            _upload_dir: upload_dir,
        })
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.state.db_pool.close().await;

        let mut admin_conn = sqlx::PgConnection::connect(&self.admin_database_url)
            .await
            .context("connect admin db for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .execute(&mut admin_conn)
            .await
            .context("drop test schema")?;

        Ok(())
    }

    /// JSON request; the response body is parsed as JSON (`Null` when empty or not JSON).
    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Value)> {
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value)?),
            None => Body::empty(),
        };
        let (status, headers, bytes) = self
            .send(method, path_and_query, "application/json", body, &[])
            .await?;
        Ok((status, headers, parse_json(&bytes)))
    }

    pub async fn multipart(
        &self,
        method: Method,
        path: &str,
        parts: &[Part<'_>],
    ) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, bytes) = self
            .send(
                method,
                path,
                &format!("multipart/form-data; boundary={BOUNDARY}"),
                Body::from(multipart_body(parts)),
                &[],
            )
            .await?;
        Ok((status, parse_json(&bytes)))
    }

    pub async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        content_type: &str,
        body: Body,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("content-type", content_type)
            .body(body)
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// Create a listing through the API and return its id.
    pub async fn create_listing(&self, listing: Value) -> anyhow::Result<String> {
        let (status, _headers, body) = self
            .request(Method::POST, "/api/sell/properties", Some(listing))
            .await?;
        assert_status(status, StatusCode::CREATED, "create listing");
        body["property"]["id"]
            .as_str()
            .map(str::to_string)
            .context("created listing id")
    }

    /// POST /api/sell/search and return the envelope.
    pub async fn search(&self, criteria: Value) -> anyhow::Result<Value> {
        let (status, _headers, body) = self
            .request(Method::POST, "/api/sell/search", Some(criteria))
            .await?;
        assert_status(status, StatusCode::OK, "search");
        Ok(body)
    }
}

fn parse_json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                field,
                file_name,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    with_test_app_with_config(|_| {}, f).await
}

/// Runs `f` against a fresh schema. Without a test database the test is skipped.
pub async fn with_test_app_with_config<C, F>(configure: C, f: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let Some(shared) = shared::shared().await? else {
        eprintln!("skipping: ESTATEHUB__DATABASE__TEST_DATABASE_URL is not set");
        return Ok(());
    };
    let app = TestApp::new_with_config(shared.base_config.clone(), configure).await?;

    let result = std::panic::AssertUnwindSafe(f(&app)).catch_unwind().await;
    let cleanup_result = app.cleanup().await;

    if let Err(e) = cleanup_result {
        eprintln!("test schema cleanup failed: {e:?}");
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn with_search_path(database_url: &str, schema: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(database_url).context("parse database URL")?;
    url.query_pairs_mut()
        .append_pair("options", &format!("-c search_path={}", schema));
    Ok(url.to_string())
}
