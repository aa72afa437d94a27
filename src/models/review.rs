// src/models/review.rs
use serde::{Deserialize, Serialize};

/// A single submitted review. Position in the list is its only identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub name: String,   // Free-form reviewer name, unvalidated
    pub review: String, // Free-form review text, unvalidated
}

impl Review {
    pub fn new(name: impl Into<String>, review: impl Into<String>) -> Self {
        Review {
            name: name.into(),
            review: review.into(),
        }
    }
}

// Body returned for an accepted POST
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmitAck {
    pub success: bool,
}

impl SubmitAck {
    pub fn accepted() -> Self {
        SubmitAck { success: true }
    }
}
