//! User-scoped payloads: onboarding, preference facets, likes, profile

use crate::avatar::AvatarDescriptor;
use crate::route::PostKindTag;
use crate::RefId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /users/onboardStatus`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardStatusRequest {
    pub user_id: String,
}

/// Response of `POST /users/onboardStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardStatus {
    #[serde(default)]
    pub onboarded: bool,
}

/// Aggregate body of `POST /users/completeOnboarding`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSubmission {
    pub user_id: String,
    pub name: String,
    pub interests: Vec<String>,
    pub followed_authors: Vec<String>,
    #[serde(rename = "avatarConfig")]
    pub avatar: AvatarDescriptor,
}

/// The four preference facets feeding the recommender
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreferenceFacets {
    pub interests: Vec<String>,
    pub preferred_authors: Vec<RefId>,
    pub read_books: Vec<RefId>,
    pub liked_books: Vec<RefId>,
}

/// Body of `POST|DELETE /users/likedBook`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_id: String,
    pub post_id: String,
    pub post_type: PostKindTag,
    pub book_id: RefId,
}

/// Response of `GET /users/likedBook/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LikeStatus {
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
}

/// Response of `GET /getCommentCount`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentCount {
    #[serde(default)]
    pub count: u32,
}

/// Body of `POST /users/{id}/rent|purchase`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAction {
    pub book_id: RefId,
}

/// Response of `GET /users/profile/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "avatarConfig", default)]
    pub avatar: Option<AvatarDescriptor>,
    #[serde(rename = "followedAuthors", default)]
    pub followed_authors: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub liked_books: Vec<RefId>,
    #[serde(default)]
    pub liked_posts: Vec<String>,
    #[serde(default)]
    pub book_history: Vec<RefId>,
    #[serde(default)]
    pub onboarded: bool,
}

/// Entry of `GET /users/{id}/liked-posts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedPost {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PostKindTag,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
