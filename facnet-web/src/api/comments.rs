//! Comment thread endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use facnet_common::models::{CenterId, CommentId};
use facnet_common::ClientToken;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::comments::{self, AddOutcome, CommentView, DeleteOutcome};
use crate::AppState;

/// New comment body
///
/// Accepts the page's form names (`name`, `comment`) as well.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default, alias = "name")]
    pub author_name: Option<String>,
    #[serde(default, alias = "comment")]
    pub comment_text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: CommentView,
    /// False when the backend failed and the comment exists only in the page
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteResponse {
    Deleted { comment_id: CommentId },
    NotDeleted { comment_id: CommentId },
}

/// GET /api/centers/:center_id/comments
pub async fn list_center_comments(
    State(state): State<AppState>,
    Path(center_id): Path<CenterId>,
    Extension(caller): Extension<ClientToken>,
) -> Json<Vec<CommentView>> {
    let comments = comments::list_comments(state.store.as_ref(), center_id).await;
    Json(
        comments
            .iter()
            .map(|comment| CommentView::new(comment, &caller))
            .collect(),
    )
}

/// POST /api/centers/:center_id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Path(center_id): Path<CenterId>,
    Extension(caller): Extension<ClientToken>,
    Json(request): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let outcome = comments::post_comment(
        state.store.as_ref(),
        center_id,
        request.author_name.as_deref(),
        &request.comment_text,
        &caller,
    )
    .await
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let (status, notice) = match &outcome {
        AddOutcome::Persisted(_) => (StatusCode::CREATED, None),
        AddOutcome::LocalOnly { notice, .. } => (StatusCode::OK, Some(notice.to_string())),
    };

    Ok((
        status,
        Json(CommentResponse {
            comment: CommentView::new(outcome.comment(), &caller),
            persisted: outcome.is_persisted(),
            notice,
        }),
    ))
}

/// DELETE /api/comments/:comment_id
///
/// Another client's comment is left alone without an error. A backend failure
/// is reported so the page keeps the comment on screen.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<CommentId>,
    Extension(caller): Extension<ClientToken>,
) -> ApiResult<Json<DeleteResponse>> {
    match comments::delete_comment(state.store.as_ref(), comment_id, &caller).await {
        DeleteOutcome::Deleted(_) => Ok(Json(DeleteResponse::Deleted { comment_id })),
        DeleteOutcome::NotDeleted => Ok(Json(DeleteResponse::NotDeleted { comment_id })),
        DeleteOutcome::Failed(_) => Err(ApiError::Unavailable(
            "Comment could not be deleted. Please try again.".to_string(),
        )),
    }
}
