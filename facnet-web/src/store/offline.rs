//! Store used when no backend URL is configured

use async_trait::async_trait;
use facnet_common::models::{
    Center, CenterId, CenterSummary, Comment, CommentId, NewCenter, NewComment,
};
use facnet_common::ClientToken;

use super::{Asset, CenterStore, StoreError, StoreResult};

/// Fails every call with [`StoreError::NotConfigured`]
///
/// Pages still render: resolution falls back to the reference list or a
/// placeholder, and comments are kept locally only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineStore;

#[async_trait]
impl CenterStore for OfflineStore {
    fn backend_id(&self) -> &'static str {
        "offline"
    }

    async fn find_approved_center_by_name(&self, _name: &str) -> StoreResult<Option<Center>> {
        Err(StoreError::NotConfigured)
    }

    async fn find_center_by_id(&self, _id: CenterId) -> StoreResult<Option<Center>> {
        Err(StoreError::NotConfigured)
    }

    async fn find_approved_centers(&self) -> StoreResult<Vec<CenterSummary>> {
        Err(StoreError::NotConfigured)
    }

    async fn list_comments(&self, _center_id: CenterId) -> StoreResult<Vec<Comment>> {
        Err(StoreError::NotConfigured)
    }

    async fn insert_comment(&self, _comment: NewComment) -> StoreResult<Comment> {
        Err(StoreError::NotConfigured)
    }

    async fn delete_comment(
        &self,
        _comment_id: CommentId,
        _token: &ClientToken,
    ) -> StoreResult<Option<Comment>> {
        Err(StoreError::NotConfigured)
    }

    async fn insert_center(&self, _center: NewCenter) -> StoreResult<Center> {
        Err(StoreError::NotConfigured)
    }

    async fn upload_asset(&self, _asset: Asset) -> StoreResult<String> {
        Err(StoreError::NotConfigured)
    }
}
