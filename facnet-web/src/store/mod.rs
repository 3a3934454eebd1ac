//! Data-access layer
//!
//! Every center, comment and logo operation goes through [`CenterStore`].
//! Backends:
//! - [`RestStore`]: hosted backend (REST tables + object storage)
//! - [`MemoryStore`]: in-process tables for tests and local runs
//! - [`OfflineStore`]: no backend configured, every call fails
//!
//! Store calls may fail independently of application logic. Callers decide
//! how to degrade; nothing here retries.

use async_trait::async_trait;
use facnet_common::models::{
    Center, CenterId, CenterSummary, Comment, CommentId, NewCenter, NewComment,
};
use facnet_common::ClientToken;
use thiserror::Error;

pub mod memory;
pub mod offline;
pub mod rest;

pub use memory::MemoryStore;
pub use offline::OfflineStore;
pub use rest::RestStore;

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Backend not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a lookup that may legitimately find nothing
#[derive(Debug, Clone)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unavailable(StoreError),
}

impl<T> From<StoreResult<Option<T>>> for Lookup<T> {
    fn from(result: StoreResult<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::NotFound,
            Err(e) => Lookup::Unavailable(e),
        }
    }
}

/// Binary payload for object storage
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Object path inside the bucket, e.g. `logos/1700000000000.png`
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Remote operations the directory depends on
#[async_trait]
pub trait CenterStore: Send + Sync {
    /// Backend identifier for logs (e.g. "rest", "memory")
    fn backend_id(&self) -> &'static str;

    /// Case-insensitive exact name match among approved centers
    async fn find_approved_center_by_name(&self, name: &str) -> StoreResult<Option<Center>>;

    /// Lookup by id regardless of approval
    async fn find_center_by_id(&self, id: CenterId) -> StoreResult<Option<Center>>;

    /// Approved centers, newest first
    async fn find_approved_centers(&self) -> StoreResult<Vec<CenterSummary>>;

    /// Comments of one center, newest first
    async fn list_comments(&self, center_id: CenterId) -> StoreResult<Vec<Comment>>;

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;

    /// Delete a comment only when both id and token match
    ///
    /// Returns the deleted comment, or `None` when nothing matched (unknown id
    /// or another client's comment).
    async fn delete_comment(
        &self,
        comment_id: CommentId,
        token: &ClientToken,
    ) -> StoreResult<Option<Comment>>;

    async fn insert_center(&self, center: NewCenter) -> StoreResult<Center>;

    /// Store a file and return its public URL
    async fn upload_asset(&self, asset: Asset) -> StoreResult<String>;
}
