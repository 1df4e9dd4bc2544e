//! Recommendation feed: raw items as received and normalized posts
//!
//! The recommender returns a mixed list of items, each tagged by a `type`
//! discriminant. Items nest zero or more reviews; the client flattens them into
//! one post per review (or one post per bare book) before display.

use super::book::BookSummary;
use super::thread::{SampledReview, Thread};
use super::user::PreferenceFacets;
use crate::route::PostKindTag;
use crate::RefId;
use serde::{Deserialize, Serialize};

/// Recommendation item as received from `POST /recommend_with_reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedItem {
    /// Review threads written in-app for one book
    Review {
        book_id: RefId,
        #[serde(default)]
        threads: Vec<Thread>,
    },
    /// Pre-existing reviews sampled for one book
    Sampled {
        book_id: RefId,
        #[serde(default)]
        sampled_reviews: Vec<SampledReview>,
    },
    /// Bare book summary when no review content is available
    Fallback(BookSummary),
    /// Discriminant this client does not know
    #[serde(other)]
    Unrecognized,
}

/// Body of `POST /recommend_with_reviews` and `POST /diversify_recommendations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub interests: Vec<String>,
    pub read_books: Vec<RefId>,
    pub preferred_authors: Vec<RefId>,
    pub liked_books: Vec<RefId>,
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl RecommendationRequest {
    pub fn new(user_id: &str, facets: PreferenceFacets, page_number: u32, page_size: u32) -> Self {
        Self {
            user_id: user_id.to_string(),
            interests: facets.interests,
            read_books: facets.read_books,
            preferred_authors: facets.preferred_authors,
            liked_books: facets.liked_books,
            page_number,
            page_size,
        }
    }
}

/// Response of `POST /recommend_with_reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPage {
    #[serde(default)]
    pub recommended: Vec<FeedItem>,
    #[serde(rename = "isNext", default)]
    pub is_next: bool,
    #[serde(rename = "totalRecommendations", default)]
    pub total_recommendations: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
}

/// Response of `POST /diversify_recommendations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiversifyResponse {
    BookIds(Vec<RefId>),
    /// e.g. `{"message": "No recommendations available"}`
    Message { message: String },
}

/// Discriminant carried by every normalized post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Review,
    Sampled,
    Fallback,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Review => "review",
            PostKind::Sampled => "sampled",
            PostKind::Fallback => "fallback",
        }
    }

    /// Tag used by like, comment and thread-detail endpoints
    pub fn endpoint_tag(&self) -> PostKindTag {
        match self {
            PostKind::Review => PostKindTag::Thread,
            PostKind::Sampled => PostKindTag::Review,
            PostKind::Fallback => PostKindTag::Book,
        }
    }
}

/// Thread expanded out of a `review` item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadPost {
    #[serde(rename = "_id")]
    pub id: String,
    /// Inherited from the parent item
    pub book_id: RefId,
    pub thread: Thread,
}

/// Review expanded out of a `sampled` item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledPost {
    /// Inherited from the parent item
    pub book_id: RefId,
    #[serde(flatten)]
    pub review: SampledReview,
}

/// One displayable post in the flattened feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Post {
    Review(ThreadPost),
    Sampled(SampledPost),
    Fallback(BookSummary),
}

impl Post {
    /// Post identifier; unique within one page-fetch result
    pub fn id(&self) -> &str {
        match self {
            Post::Review(p) => &p.id,
            Post::Sampled(p) => &p.review.id,
            Post::Fallback(b) => &b.id,
        }
    }

    pub fn book_id(&self) -> &RefId {
        match self {
            Post::Review(p) => &p.book_id,
            Post::Sampled(p) => &p.book_id,
            Post::Fallback(b) => &b.book_id,
        }
    }

    pub fn kind(&self) -> PostKind {
        match self {
            Post::Review(_) => PostKind::Review,
            Post::Sampled(_) => PostKind::Sampled,
            Post::Fallback(_) => PostKind::Fallback,
        }
    }

    /// `<kind>_<id>` key used by comment endpoints
    pub fn scoped_id(&self) -> String {
        self.kind().endpoint_tag().scoped_id(self.id())
    }
}
