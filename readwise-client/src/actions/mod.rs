//! Per-post micro-actions and user mutations

pub mod commerce;
pub mod comments;
pub mod likes;
pub mod threads;

pub use commerce::Library;
pub use likes::{LikeState, LikeToggle, PendingLike};
pub use threads::ReviewDraft;

use crate::api::Backend;
use readwise_common::models::Post;
use readwise_common::Identity;

/// Like and comment state of one mounted post card
#[derive(Debug)]
pub struct PostActions {
    pub like: LikeToggle,
    pub comment_count: u32,
}

impl PostActions {
    /// Issue the two per-post reads (like status, comment count) concurrently
    pub async fn mount(backend: &dyn Backend, user: &Identity, post: &Post) -> Self {
        let like = LikeToggle::new(user, post);
        let (_, comment_count) = tokio::join!(
            like.refresh(backend),
            comments::comment_count(backend, post)
        );
        Self {
            like,
            comment_count,
        }
    }
}
