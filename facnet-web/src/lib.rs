//! facnet-web library - incubation center directory service
//!
//! Serves center details pages resolved from URL slugs, per-center comment
//! threads and the registration intake form.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;
pub mod store;

pub use error::{ApiError, ApiResult};

use store::CenterStore;

/// Request body limit for registration (base64 logo plus form fields)
pub const REGISTRATION_BODY_LIMIT: usize = 4 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend holding centers, comments and logos
    pub store: Arc<dyn CenterStore>,
    /// Server start time, for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn CenterStore>) -> Self {
        Self {
            store,
            startup_time: facnet_common::time::now(),
        }
    }
}

/// Build application router
///
/// Every route sees the caller's client token; the identity middleware issues
/// one on first contact.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post};

    let registration = Router::new()
        .route("/api/registration", post(api::register_center))
        .route("/api/registration/options", get(api::get_options))
        .layer(DefaultBodyLimit::max(REGISTRATION_BODY_LIMIT));

    let centers = Router::new()
        .route("/api/centers", get(api::list_centers))
        .route("/api/centers/:center_id", get(api::get_center))
        .route(
            "/api/centers/:center_id/comments",
            get(api::list_center_comments).post(api::add_comment),
        )
        .route("/api/comments/:comment_id", delete(api::delete_comment))
        .route("/api/incubation/:slug", get(api::center_page));

    Router::new()
        .merge(centers)
        .merge(registration)
        .merge(api::health_routes())
        .layer(middleware::from_fn(api::client_identity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
