//! Wiring between the review store, the optional SQLite mirror and the
//! `/reviews` HTTP resource.
use actix_web::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        Method,
    },
    middleware::DefaultHeaders,
    web,
};
use tracing::{error, info};

use crate::api::{create_review, list_reviews, method_not_allowed, preflight};
use crate::config::{Config, StorageMode};
use crate::db::Database;
use crate::error::ServiceError;
use crate::store::ReviewStore;

pub const REVIEWS_PATH: &str = "/reviews";

/// Shared state handed to every worker through `web::Data`.
#[derive(Debug)]
pub struct AppState {
    pub store: ReviewStore,
    pub mirror: Option<Database>,
}

impl AppState {
    pub fn in_memory(store: ReviewStore) -> Self {
        AppState {
            store,
            mirror: None,
        }
    }

    pub fn with_mirror(store: ReviewStore, db: Database) -> Self {
        AppState {
            store,
            mirror: Some(db),
        }
    }

    /// Build the state for the configured storage mode.
    ///
    /// In sqlite mode the database is opened (and created), the table is
    /// ensured, and stored rows seed the in-memory list. Failing to open or
    /// create the table is fatal; failing to read rows back only means
    /// starting empty.
    pub async fn bootstrap(config: &Config) -> Result<Self, ServiceError> {
        match &config.storage {
            StorageMode::Memory => {
                info!("Running with in-memory storage only");
                Ok(AppState::in_memory(ReviewStore::new()))
            }
            StorageMode::Sqlite { path } => {
                let db = Database::new(path)?;
                db.create_schema().await?;

                let seed = db.load_all().await.unwrap_or_else(|e| {
                    error!("Failed to fetch reviews from the database: {}", e);
                    Vec::new()
                });
                info!("Loaded {} stored reviews into memory", seed.len());

                Ok(AppState::with_mirror(ReviewStore::with_reviews(seed), db))
            }
        }
    }
}

// CORS headers for every response on the resource, errors included
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((ACCESS_CONTROL_ALLOW_METHODS, "POST, GET, OPTIONS"))
        .add((ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

/// Register the `/reviews` resource. Use with `App::configure`.
pub fn configure(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::resource(REVIEWS_PATH)
                .app_data(web::PayloadConfig::new(max_body_bytes))
                .route(web::get().to(list_reviews))
                .route(web::post().to(create_review))
                .route(web::method(Method::OPTIONS).to(preflight))
                .default_service(web::to(method_not_allowed))
                .wrap(cors_headers()),
        );
    }
}
