//! Directory services: slug resolution, comment threads, registration intake
//! and video link handling

pub mod comments;
pub mod reference;
pub mod registration;
pub mod resolver;
pub mod video;

pub use comments::{can_delete, AddOutcome, CommentThread, CommentView, DeleteOutcome};
pub use registration::{submit_registration, RegistrationError, RegistrationForm};
pub use resolver::{resolve_center, Resolution, Source};
pub use video::youtube_embed_url;
