//! # Facilitator Network Common Library
//!
//! Shared code for the Facilitator Network services including:
//! - Center and comment models
//! - Client identity tokens
//! - Configuration loading
//! - Error types
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use identity::ClientToken;
