//! Comment threads on center pages
//!
//! Comments are non-critical to rendering a page:
//! - listing degrades to an empty thread when the store fails
//! - posting degrades to a local-only comment with a notice
//! - deleting never touches the local thread unless the store confirmed it
//!
//! Ownership is advisory: the store deletes only rows whose stored client
//! token equals the caller's token.

use facnet_common::models::{CenterId, Comment, CommentId, NewComment};
use facnet_common::{time, ClientToken};
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{CenterStore, StoreError};

/// Notice shown when a comment could not be saved
pub const LOCAL_ONLY_NOTICE: &str = "Comment added locally (backend not available)";

/// Next id for a local-only comment; stored ids are positive
static NEXT_LOCAL_ID: AtomicI64 = AtomicI64::new(-1);

fn next_local_id() -> CommentId {
    NEXT_LOCAL_ID.fetch_sub(1, Ordering::Relaxed)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommentError {
    #[error("Comment text is required")]
    EmptyBody,
}

/// Result of posting a comment
#[derive(Debug, Clone)]
pub enum AddOutcome {
    Persisted(Comment),
    /// Not saved; exists only in the caller's view and is never retried
    LocalOnly { comment: Comment, notice: &'static str },
}

impl AddOutcome {
    pub fn comment(&self) -> &Comment {
        match self {
            AddOutcome::Persisted(comment) | AddOutcome::LocalOnly { comment, .. } => comment,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, AddOutcome::Persisted(_))
    }
}

/// Result of a delete request
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    Deleted(Comment),
    /// Unknown id or a token mismatch
    NotDeleted,
    /// The store could not be reached; nothing changed
    Failed(StoreError),
}

/// Comment as shown to one caller
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author_name: Option<String>,
    pub comment_text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub can_delete: bool,
}

impl CommentView {
    pub fn new(comment: &Comment, caller: &ClientToken) -> Self {
        Self {
            id: comment.id,
            author_name: comment.author_name.clone(),
            comment_text: comment.comment_text.clone(),
            created_at: comment.created_at,
            can_delete: can_delete(comment, caller),
        }
    }
}

/// Whether `caller` may delete `comment`
pub fn can_delete(comment: &Comment, caller: &ClientToken) -> bool {
    comment.can_delete(caller)
}

/// Comments of a center, newest first; empty when the store fails
pub async fn list_comments(store: &dyn CenterStore, center_id: CenterId) -> Vec<Comment> {
    match store.list_comments(center_id).await {
        Ok(comments) => comments,
        Err(e) => {
            warn!(center_id, error = %e, "Comments not available, using empty thread");
            Vec::new()
        }
    }
}

/// Post a comment
///
/// Author and text are trimmed; a blank author is stored as no author. When
/// the store fails the comment is built locally with a negative id unique to
/// this process.
pub async fn post_comment(
    store: &dyn CenterStore,
    center_id: CenterId,
    author_name: Option<&str>,
    comment_text: &str,
    token: &ClientToken,
) -> Result<AddOutcome, CommentError> {
    let comment_text = comment_text.trim();
    if comment_text.is_empty() {
        return Err(CommentError::EmptyBody);
    }
    let author_name = author_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let new_comment = NewComment {
        center_id,
        author_name,
        comment_text: comment_text.to_string(),
        browser_session_id: token.clone(),
    };

    match store.insert_comment(new_comment.clone()).await {
        Ok(comment) => {
            info!(center_id, comment_id = comment.id, "Comment saved");
            Ok(AddOutcome::Persisted(comment))
        }
        Err(e) => {
            warn!(center_id, error = %e, "Comment not saved, keeping it locally");
            Ok(AddOutcome::LocalOnly {
                comment: new_comment.into_comment(next_local_id(), time::now()),
                notice: LOCAL_ONLY_NOTICE,
            })
        }
    }
}

/// Delete a comment owned by `token`
pub async fn delete_comment(
    store: &dyn CenterStore,
    comment_id: CommentId,
    token: &ClientToken,
) -> DeleteOutcome {
    match store.delete_comment(comment_id, token).await {
        Ok(Some(comment)) => {
            info!(comment_id, "Comment deleted");
            DeleteOutcome::Deleted(comment)
        }
        Ok(None) => {
            info!(comment_id, "Comment not deleted (unknown id or not owned by caller)");
            DeleteOutcome::NotDeleted
        }
        Err(e) => {
            warn!(comment_id, error = %e, "Comment delete failed");
            DeleteOutcome::Failed(e)
        }
    }
}

/// One page's view of a center's comments
#[derive(Debug, Clone)]
pub struct CommentThread {
    center_id: CenterId,
    comments: Vec<Comment>,
}

impl CommentThread {
    pub async fn load(store: &dyn CenterStore, center_id: CenterId) -> Self {
        Self {
            center_id,
            comments: list_comments(store, center_id).await,
        }
    }

    pub fn center_id(&self) -> CenterId {
        self.center_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn views(&self, caller: &ClientToken) -> Vec<CommentView> {
        self.comments
            .iter()
            .map(|comment| CommentView::new(comment, caller))
            .collect()
    }

    /// Post a comment and show it first, saved or not
    pub async fn add(
        &mut self,
        store: &dyn CenterStore,
        author_name: Option<&str>,
        comment_text: &str,
        token: &ClientToken,
    ) -> Result<AddOutcome, CommentError> {
        let outcome = post_comment(store, self.center_id, author_name, comment_text, token).await?;
        self.comments.insert(0, outcome.comment().clone());
        Ok(outcome)
    }

    /// Delete a comment; the thread changes only after the store confirmed
    pub async fn delete(
        &mut self,
        store: &dyn CenterStore,
        comment_id: CommentId,
        token: &ClientToken,
    ) -> DeleteOutcome {
        let outcome = delete_comment(store, comment_id, token).await;
        if let DeleteOutcome::Deleted(_) = outcome {
            self.comments.retain(|c| c.id != comment_id);
        }
        outcome
    }
}
