//! Test Helper Utilities
//!
//! Shared utilities for testing readwise-client

#![allow(dead_code)]

pub mod fake_backend;
pub mod mock_server;

pub use fake_backend::{FakeBackend, Failure};
pub use mock_server::{spawn_mock_backend, MockBackend};

use serde_json::{json, Value};

/// Thread JSON as the backend sends it inside a `review` item
pub fn thread_json(id: &str) -> Value {
    json!({
        "_id": id,
        "rating": 4,
        "text": format!("Review {}", id),
        "createdAt": "2024-03-05T14:07:00Z",
        "author": {"userId": "author_1", "name": "Ann"}
    })
}

/// Sampled review JSON as the backend sends it inside a `sampled` item
pub fn sampled_json(id: &str) -> Value {
    json!({
        "_id": id,
        "user_id": "reviewer_123456",
        "rating": 3,
        "review_text": format!("Sampled {}", id),
        "n_votes": 2,
        "n_comments": 1
    })
}

/// Recommendation page JSON with the given items
pub fn page_json(items: Value, is_next: bool) -> Value {
    json!({
        "recommended": items,
        "isNext": is_next,
        "totalRecommendations": 40,
        "page": 1,
        "pageSize": 15
    })
}
