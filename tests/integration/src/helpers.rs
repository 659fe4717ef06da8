//! Test helpers for integration tests
//!
//! Spawns a test server (after migrating and seeding the database), wraps
//! HTTP calls and provides status assertions.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use cine_api::{create_app, create_app_state};
use cine_common::AppConfig;
use cine_core::SnowflakeGenerator;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

/// API prefix shared by every non-health route
pub const API_PREFIX: &str = "/api/v1";

/// Test server, spawned in-process unless `TEST_API_URL` points elsewhere
pub struct TestServer {
    base_url: String,
    pub client: Client,
    _handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        if let Ok(url) = std::env::var("TEST_API_URL") {
            return Ok(Self {
                base_url: url.trim_end_matches('/').to_string(),
                client,
                _handle: None,
            });
        }

        let config = test_config()?;
        prepare_database(&config).await?;

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            client,
            _handle: Some(handle),
        })
    }

    /// Base URL for the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = if path.starts_with("/health") {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{API_PREFIX}{path}", self.base_url)
        };
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET without credentials
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    /// GET with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(token)).send().await?)
    }

    /// GET sending the access token as a cookie only
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Result<Response> {
        Ok(self
            .request(Method::GET, path, None)
            .header(header::COOKIE, cookie)
            .send()
            .await?)
    }

    /// POST a JSON body without credentials
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    /// POST with cookies and no body
    pub async fn post_with_cookie(&self, path: &str, cookie: &str) -> Result<Response> {
        Ok(self
            .request(Method::POST, path, None)
            .header(header::COOKIE, cookie)
            .send()
            .await?)
    }

    /// POST a JSON body with a bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::POST, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// POST without a body, with a bearer token
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::POST, path, Some(token)).send().await?)
    }

    /// PATCH a JSON body with a bearer token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::PATCH, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// PUT a JSON body with a bearer token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::PUT, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// DELETE with a bearer token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, Some(token)).send().await?)
    }
}

/// Configuration from the environment with a relaxed rate limit
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().context("loading test configuration")?;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    config.database.run_migrations = false;

    Ok(config)
}

/// Migrations and seeding run once per test binary
static DATABASE_READY: OnceCell<()> = OnceCell::const_new();

/// Apply migrations and the default catalog
async fn prepare_database(config: &AppConfig) -> Result<()> {
    DATABASE_READY
        .get_or_try_init(|| migrate_and_seed(config))
        .await?;
    Ok(())
}

async fn migrate_and_seed(config: &AppConfig) -> Result<()> {
    let db_config = cine_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: 2,
        min_connections: 1,
        ..Default::default()
    };
    let pool = cine_db::create_pool(&db_config).await?;
    cine_db::run_migrations(&pool).await?;
    cine_db::seed(&pool, &SnowflakeGenerator::new(config.snowflake.worker_id)).await?;
    pool.close().await;
    Ok(())
}

/// Whether the backing services are configured
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// `name=value` pairs from every `Set-Cookie` header, joined for a `Cookie` header
pub fn cookie_header(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw `Set-Cookie` header for one cookie
pub fn set_cookie<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{name}=")))
}
