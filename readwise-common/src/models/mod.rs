//! Wire types exchanged with the book/review backend
//!
//! Field names follow the backend's JSON (`_id`, `book_id`, camelCase in some
//! payloads, snake_case in others); Rust names are normalized through serde
//! renames.

pub mod book;
pub mod feed;
pub mod thread;
pub mod user;

pub use book::{Book, BookSummary, SearchQuery, SearchResponse, SearchSort};
pub use feed::{
    DiversifyResponse, FeedItem, Post, PostKind, RecommendationPage, RecommendationRequest,
    SampledPost, ThreadPost,
};
pub use thread::{NewComment, NewThread, PostDetail, SampledReview, Thread, ThreadAuthor};
pub use user::{
    BookAction, CommentCount, LikeRequest, LikeStatus, LikedPost, OnboardStatus,
    OnboardStatusRequest, OnboardingSubmission, PreferenceFacets, Profile,
};

use serde::{Deserialize, Deserializer};

/// Parse an author or genre list that may arrive as a JSON array or as a
/// stringified list (`"['Jane Austen', 'Anonymous']"`).
pub fn parse_string_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        let normalized = trimmed.replace('\'', "\"");
        if let Ok(list) = serde_json::from_str::<Vec<String>>(&normalized) {
            return list;
        }
        return trimmed
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    trimmed
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// serde adapter for [`parse_string_list`]; accepts array, string or null
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(list) => list,
        Raw::Text(text) => parse_string_list(&text),
        Raw::Null(()) => Vec::new(),
    })
}
