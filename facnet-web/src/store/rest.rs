//! Hosted backend client
//!
//! Talks to a PostgREST-style table API (`/rest/v1/<table>`) and an object
//! storage API (`/storage/v1/object/<bucket>/<path>`). Requests carry the
//! project key both as `apikey` and as a bearer token.

use async_trait::async_trait;
use facnet_common::config::BackendConfig;
use facnet_common::models::{
    Center, CenterId, CenterSummary, Comment, CommentId, NewCenter, NewComment,
};
use facnet_common::ClientToken;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Asset, CenterStore, StoreError, StoreResult};

const USER_AGENT: &str = concat!("facnet-web/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;
const SUMMARY_COLUMNS: &str = "id,company_name,location,domain,incubation_center_type,logo_url";

/// REST client for the hosted backend
#[derive(Debug, Clone)]
pub struct RestStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    centers_table: String,
    comments_table: String,
    logo_bucket: String,
}

impl RestStore {
    /// Build a client from backend settings
    ///
    /// Fails with [`StoreError::NotConfigured`] when no URL is set.
    pub fn new(config: &BackendConfig) -> StoreResult<Self> {
        let base_url = config.base_url().ok_or(StoreError::NotConfigured)?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            api_key: config.anon_key.clone().filter(|key| !key.trim().is_empty()),
            centers_table: config.centers_table.clone(),
            comments_table: config.comments_table.clone(),
            logo_bucket: config.logo_bucket.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.logo_bucket, path
        )
    }

    /// Public URL of an uploaded object
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.logo_bucket, path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header("apikey", key).bearer_auth(key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> StoreResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> StoreResult<T> {
        self.send(builder)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Inserts and deletes answer with the affected rows
    async fn first_row<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> StoreResult<Option<T>> {
        let rows: Vec<T> = self
            .send_json(builder.header("Prefer", "return=representation"))
            .await?;
        Ok(rows.into_iter().next())
    }
}

/// Escape LIKE wildcards so `ilike` performs a case-insensitive exact match
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl CenterStore for RestStore {
    fn backend_id(&self) -> &'static str {
        "rest"
    }

    async fn find_approved_center_by_name(&self, name: &str) -> StoreResult<Option<Center>> {
        debug!(name = %name, "Querying center by name");

        let rows: Vec<Center> = self
            .send_json(
                self.request(Method::GET, &self.table_url(&self.centers_table))
                    .query(&[
                        ("select", "*".to_string()),
                        ("company_name", format!("ilike.{}", escape_like(name))),
                        ("is_approved", "eq.true".to_string()),
                        ("order", "created_at.desc".to_string()),
                    ]),
            )
            .await?;

        // PostgREST also treats `*` as a wildcard, so confirm the match here
        let needle = name.to_lowercase();
        let mut matches = rows
            .into_iter()
            .filter(|c| c.company_name.to_lowercase() == needle);
        let found = matches.next();
        if matches.next().is_some() {
            warn!(name = %name, "Several approved centers share this name, using the newest");
        }
        Ok(found)
    }

    async fn find_center_by_id(&self, id: CenterId) -> StoreResult<Option<Center>> {
        let rows: Vec<Center> = self
            .send_json(
                self.request(Method::GET, &self.table_url(&self.centers_table))
                    .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn find_approved_centers(&self) -> StoreResult<Vec<CenterSummary>> {
        self.send_json(
            self.request(Method::GET, &self.table_url(&self.centers_table))
                .query(&[
                    ("select", SUMMARY_COLUMNS),
                    ("is_approved", "eq.true"),
                    ("order", "created_at.desc"),
                ]),
        )
        .await
    }

    async fn list_comments(&self, center_id: CenterId) -> StoreResult<Vec<Comment>> {
        self.send_json(
            self.request(Method::GET, &self.table_url(&self.comments_table))
                .query(&[
                    ("select", "*".to_string()),
                    ("center_id", format!("eq.{}", center_id)),
                    ("order", "created_at.desc".to_string()),
                ]),
        )
        .await
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        self.first_row(
            self.request(Method::POST, &self.table_url(&self.comments_table))
                .json(&[comment]),
        )
        .await?
        .ok_or_else(|| StoreError::Parse("insert returned no comment".to_string()))
    }

    async fn delete_comment(
        &self,
        comment_id: CommentId,
        token: &ClientToken,
    ) -> StoreResult<Option<Comment>> {
        self.first_row(
            self.request(Method::DELETE, &self.table_url(&self.comments_table))
                .query(&[
                    ("id", format!("eq.{}", comment_id)),
                    ("browser_session_id", format!("eq.{}", token)),
                ]),
        )
        .await
    }

    async fn insert_center(&self, center: NewCenter) -> StoreResult<Center> {
        self.first_row(
            self.request(Method::POST, &self.table_url(&self.centers_table))
                .json(&[center]),
        )
        .await?
        .ok_or_else(|| StoreError::Parse("insert returned no center".to_string()))
    }

    async fn upload_asset(&self, asset: Asset) -> StoreResult<String> {
        debug!(path = %asset.path, size = asset.bytes.len(), "Uploading asset");

        self.send(
            self.request(Method::POST, &self.object_url(&asset.path))
                .header(reqwest::header::CONTENT_TYPE, asset.content_type)
                .body(asset.bytes),
        )
        .await?;

        Ok(self.public_url(&asset.path))
    }
}
