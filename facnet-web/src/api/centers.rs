//! Center directory and details page

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use facnet_common::models::{Center, CenterId, CenterSummary};
use facnet_common::ClientToken;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{ApiError, ApiResult};
use crate::services::{resolve_center, youtube_embed_url, CommentThread, CommentView, Source};
use crate::store::{CenterStore, Lookup};
use crate::AppState;

/// How the details page presents a center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    /// Approved: full profile with comments
    Profile,
    /// Not approved yet: "details coming soon"
    ComingSoon,
}

/// Everything the details page renders
#[derive(Debug, Clone, Serialize)]
pub struct CenterPage {
    pub presentation: Presentation,
    pub center: Center,
    pub video_embed_url: String,
    pub comments: Vec<CommentView>,
    pub source: Source,
}

/// Assemble the details page for `slug` as seen by `caller`
///
/// Pending centers are shown without their comment thread.
pub async fn load_center_page(
    store: &dyn CenterStore,
    slug: &str,
    caller: &ClientToken,
) -> CenterPage {
    let resolution = resolve_center(store, slug).await;
    let center = resolution.center;

    let (presentation, comments) = if center.is_visible() {
        let thread = CommentThread::load(store, center.id).await;
        (Presentation::Profile, thread.views(caller))
    } else {
        (Presentation::ComingSoon, Vec::new())
    };

    CenterPage {
        presentation,
        video_embed_url: youtube_embed_url(&center.youtube_link),
        center,
        comments,
        source: resolution.source,
    }
}

/// GET /api/incubation/:slug
///
/// The page load runs in its own task so an unexpected failure renders the
/// error panel instead of dropping the connection.
pub async fn center_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(caller): Extension<ClientToken>,
) -> ApiResult<Json<CenterPage>> {
    let store = state.store.clone();
    let task_slug = slug.clone();
    let page = tokio::spawn(async move {
        load_center_page(store.as_ref(), &task_slug, &caller).await
    })
    .await
    .map_err(|e| {
        error!(slug = %slug, error = %e, "Failed to load center details");
        ApiError::PageLoadFailed
    })?;

    Ok(Json(page))
}

/// GET /api/centers
///
/// Approved centers, newest first; empty when the backend is unavailable.
pub async fn list_centers(State(state): State<AppState>) -> Json<Vec<CenterSummary>> {
    match state.store.find_approved_centers().await {
        Ok(centers) => Json(centers),
        Err(e) => {
            warn!(error = %e, "Center directory not available");
            Json(Vec::new())
        }
    }
}

/// GET /api/centers/:center_id
pub async fn get_center(
    State(state): State<AppState>,
    Path(center_id): Path<CenterId>,
) -> ApiResult<Json<Center>> {
    match Lookup::from(state.store.find_center_by_id(center_id).await) {
        Lookup::Found(center) => Ok(Json(center)),
        Lookup::NotFound => Err(ApiError::NotFound(format!("center {}", center_id))),
        Lookup::Unavailable(e) => {
            warn!(center_id, error = %e, "Center lookup failed");
            Err(ApiError::Unavailable(
                "Center details are not available right now".to_string(),
            ))
        }
    }
}
