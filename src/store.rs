use crate::models::review::Review;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Ordered, append-only list of reviews shared by every request handler.
///
/// Cloning is cheap and yields a handle to the same list. A single lock
/// serializes readers and writers; it is only held for one push or one copy.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    reviews: Arc<Mutex<Vec<Review>>>,
}

impl ReviewStore {
    // Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Create a store seeded with rows replayed from the mirror
    pub fn with_reviews(seed: Vec<Review>) -> Self {
        ReviewStore {
            reviews: Arc::new(Mutex::new(seed)),
        }
    }

    /// Add a review to the end of the list. Never fails.
    pub async fn append(&self, review: Review) {
        let mut reviews = self.reviews.lock().await;
        reviews.push(review);
        debug!("Review appended, store now holds {}", reviews.len());
    }

    /// Copy of the list as it stood when the lock was acquired.
    pub async fn list(&self) -> Vec<Review> {
        self.reviews.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.reviews.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.lock().await.is_empty()
    }
}
