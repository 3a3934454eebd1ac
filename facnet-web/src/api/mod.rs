//! HTTP API handlers

pub mod centers;
pub mod comments;
pub mod health;
pub mod identity;
pub mod registration;

pub use centers::{center_page, get_center, list_centers, CenterPage, Presentation};
pub use comments::{add_comment, delete_comment, list_center_comments};
pub use health::health_routes;
pub use identity::client_identity;
pub use registration::{get_options, register_center};
