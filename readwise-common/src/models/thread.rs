//! Review threads, sampled reviews and comments

use crate::avatar::AvatarDescriptor;
use crate::RefId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author descriptor embedded in a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadAuthor {
    #[serde(rename = "userId", alias = "id", default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarDescriptor>,
}

/// User-authored review attached to a book, possibly with nested replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "book_Id", skip_serializing_if = "Option::is_none")]
    pub book_id: Option<RefId>,
    /// 0 to 5
    #[serde(default)]
    pub rating: f32,
    pub author: ThreadAuthor,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub children: Vec<Thread>,
    #[serde(default)]
    pub likes: u32,
}

/// Pre-existing review surfaced by the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledReview {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub n_votes: u32,
    #[serde(default)]
    pub n_comments: u32,
}

/// Body of `POST /threads`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewThread {
    pub book_id: RefId,
    pub text: String,
    /// Authoring identity
    pub author: String,
    pub rating: u8,
}

/// Body of `POST /postComment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// `<kind>_<id>` of the commented post
    pub thread_id: String,
    pub comment_text: String,
    pub user_id: String,
}

/// Body of `GET /getComments/{kind}_{id}`: the post itself plus its comments
///
/// The post fields depend on the kind, so they are kept raw until the caller
/// knows which shape to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(rename = "_id")]
    pub id: String,
    /// Comments, oldest first
    #[serde(default)]
    pub children: Vec<Thread>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PostDetail {
    /// Decode the post fields (with `_id` restored) into a concrete shape
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        let mut object = self.fields.clone();
        object.insert("_id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(object))
            .map_err(|e| crate::Error::MalformedResponse(e.to_string()))
    }
}
