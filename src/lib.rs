//! A small review-submission service.
//!
//! Clients POST `{"name", "review"}` pairs to `/reviews` and GET the
//! accumulated list back. Reviews live in an in-memory, append-only list
//! and can optionally be mirrored to a SQLite table that is replayed at
//! startup.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use app::{configure, AppState, REVIEWS_PATH};
pub use config::{Config, StorageMode};
pub use db::Database;
pub use error::{ApiError, ServiceError};
pub use models::review::{Review, SubmitAck};
pub use store::ReviewStore;
