use actix_web::{http::header::ContentType, web, HttpResponse};
use tracing::{debug, error};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::review::{Review, SubmitAck};

// GET: every review in insertion order, `[]` when there are none
pub async fn list_reviews(state: web::Data<AppState>) -> HttpResponse {
    let reviews = state.store.list().await;
    debug!("[API] Returning {} reviews", reviews.len());
    HttpResponse::Ok().json(reviews)
}

/// POST: decode one review, append it, then mirror it when a database is
/// configured.
///
/// The body is decoded whatever `Content-Type` the client sent. A mirror
/// failure is reported as 500 but the review stays in memory.
pub async fn create_review(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let review: Review = serde_json::from_slice(&body).map_err(|e| {
        debug!("[API] Rejected review payload: {}", e);
        ApiError::MalformedPayload(e.to_string())
    })?;
    debug!("[API] Received review from {:?}", review.name);

    // Append and insert take separate locks, so concurrent POSTs may land in
    // SQLite in a different order than in memory; a restart replays SQLite's.
    state.store.append(review.clone()).await;

    if let Some(db) = &state.mirror {
        db.save(&review).await.map_err(|e| {
            error!("[API] Review kept in memory but not persisted: {}", e);
            ApiError::from(e)
        })?;
    }

    Ok(HttpResponse::Ok().json(SubmitAck::accepted()))
}

// OPTIONS: headers only
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header(ContentType::plaintext())
        .body("Method not allowed")
}
