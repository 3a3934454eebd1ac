//! In-process store
//!
//! Keeps centers, comments and uploaded assets in memory. Used by tests and by
//! `--in-memory` runs (data is lost on exit). Availability can be switched off
//! to exercise the degraded paths callers take when the backend is down.

use async_trait::async_trait;
use facnet_common::models::{
    Center, CenterId, CenterSummary, Comment, CommentId, NewCenter, NewComment,
};
use facnet_common::{time, ClientToken};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Asset, CenterStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    centers: Vec<Center>,
    comments: Vec<Comment>,
    assets: Vec<Asset>,
    next_center_id: CenterId,
    next_comment_id: CommentId,
}

/// In-memory [`CenterStore`]
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    available: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                next_center_id: 1,
                next_comment_id: 1,
                ..Default::default()
            })),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate the backend going down (`false`) or coming back (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Insert a center as-is (approval flag included)
    pub async fn seed_center(&self, center: Center) {
        let mut tables = self.tables.write().await;
        tables.next_center_id = tables.next_center_id.max(center.id + 1);
        tables.centers.push(center);
    }

    pub async fn centers(&self) -> Vec<Center> {
        self.tables.read().await.centers.clone()
    }

    pub async fn assets(&self) -> Vec<Asset> {
        self.tables.read().await.assets.clone()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Network("memory store marked unavailable".to_string()))
        }
    }
}

#[async_trait]
impl CenterStore for MemoryStore {
    fn backend_id(&self) -> &'static str {
        "memory"
    }

    async fn find_approved_center_by_name(&self, name: &str) -> StoreResult<Option<Center>> {
        self.check_available()?;

        let needle = name.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .centers
            .iter()
            .find(|c| c.is_approved && c.company_name.to_lowercase() == needle)
            .cloned())
    }

    async fn find_center_by_id(&self, id: CenterId) -> StoreResult<Option<Center>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.centers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_approved_centers(&self) -> StoreResult<Vec<CenterSummary>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut approved: Vec<&Center> = tables.centers.iter().filter(|c| c.is_approved).collect();
        approved.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(approved.into_iter().map(Center::summary).collect())
    }

    async fn list_comments(&self, center_id: CenterId) -> StoreResult<Vec<Comment>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.center_id == center_id)
            .cloned()
            .collect();
        // Ids break ties between comments posted within the same instant
        comments.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(comments)
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let id = tables.next_comment_id;
        tables.next_comment_id += 1;
        let stored = comment.into_comment(id, time::now());
        tables.comments.push(stored.clone());
        Ok(stored)
    }

    async fn delete_comment(
        &self,
        comment_id: CommentId,
        token: &ClientToken,
    ) -> StoreResult<Option<Comment>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let position = tables
            .comments
            .iter()
            .position(|c| c.id == comment_id && c.browser_session_id.as_ref() == Some(token));
        Ok(position.map(|index| tables.comments.remove(index)))
    }

    async fn insert_center(&self, center: NewCenter) -> StoreResult<Center> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let id = tables.next_center_id;
        tables.next_center_id += 1;
        let stored = center.into_center(id, time::now());
        tables.centers.push(stored.clone());
        Ok(stored)
    }

    async fn upload_asset(&self, asset: Asset) -> StoreResult<String> {
        self.check_available()?;
        let url = format!("memory://{}", asset.path);
        self.tables.write().await.assets.push(asset);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_comment(center_id: CenterId, text: &str, token: &ClientToken) -> NewComment {
        NewComment {
            center_id,
            author_name: None,
            comment_text: text.to_string(),
            browser_session_id: token.clone(),
        }
    }

    #[tokio::test]
    async fn test_comments_newest_first() {
        let store = MemoryStore::new();
        let token = ClientToken::generate();

        store.insert_comment(new_comment(1, "first", &token)).await.unwrap();
        store.insert_comment(new_comment(1, "second", &token)).await.unwrap();
        store.insert_comment(new_comment(2, "elsewhere", &token)).await.unwrap();

        let comments = store.list_comments(1).await.unwrap();
        let texts: Vec<&str> = comments.iter().map(|c| c.comment_text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_token() {
        let store = MemoryStore::new();
        let owner = ClientToken::generate();
        let other = ClientToken::generate();
        let comment = store.insert_comment(new_comment(1, "mine", &owner)).await.unwrap();

        assert!(store.delete_comment(comment.id, &other).await.unwrap().is_none());
        assert_eq!(store.list_comments(1).await.unwrap().len(), 1);

        let deleted = store.delete_comment(comment.id, &owner).await.unwrap();
        assert_eq!(deleted.map(|c| c.id), Some(comment.id));
        assert!(store.list_comments(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_calls() {
        let store = MemoryStore::new();
        store.set_available(false);

        assert!(store.list_comments(1).await.is_err());
        assert!(store.find_approved_center_by_name("x").await.is_err());

        store.set_available(true);
        assert!(store.list_comments(1).await.unwrap().is_empty());
    }
}
