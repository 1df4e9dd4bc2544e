//! Post detail with its comments

use crate::actions::comments;
use crate::api::Backend;
use crate::cards::Card;
use readwise_common::models::{BookSummary, Post, PostDetail, SampledPost, Thread, ThreadPost};
use readwise_common::route::PostKindTag;
use readwise_common::{Error, Identity, Result};
use tracing::debug;

/// One post (thread, sampled review or book) and its comments
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadView {
    pub kind: PostKindTag,
    pub post: Post,
    /// Oldest first
    pub comments: Vec<Thread>,
}

impl ThreadView {
    /// Load by `<kind>_<id>`
    pub async fn load(backend: &dyn Backend, scoped_id: &str) -> Result<Self> {
        let (kind, _) = PostKindTag::parse_scoped(scoped_id)
            .ok_or_else(|| Error::InvalidInput(format!("Not a post reference: {}", scoped_id)))?;

        let detail = backend.post_with_comments(scoped_id).await?;
        let post = decode_post(kind, &detail)?;
        debug!(post = %scoped_id, comments = detail.children.len(), "Thread loaded");

        Ok(Self {
            kind,
            post,
            comments: detail.children,
        })
    }

    pub fn scoped_id(&self) -> String {
        self.kind.scoped_id(self.post.id())
    }

    pub fn card(&self) -> Card {
        Card::from_post(&self.post)
    }

    /// Post a comment, then reload the comment list
    pub async fn reply(&mut self, backend: &dyn Backend, user: &Identity, text: &str) -> Result<()> {
        let scoped = self.scoped_id();
        comments::post_comment(backend, user, &scoped, text).await?;
        let detail = backend.post_with_comments(&scoped).await?;
        self.comments = detail.children;
        Ok(())
    }
}

fn decode_post(kind: PostKindTag, detail: &PostDetail) -> Result<Post> {
    match kind {
        PostKindTag::Thread => {
            let thread: Thread = detail.decode()?;
            let book_id = thread.book_id.clone().ok_or_else(|| {
                Error::MalformedResponse(format!("thread {} has no book reference", detail.id))
            })?;
            Ok(Post::Review(ThreadPost {
                id: thread.id.clone(),
                book_id,
                thread,
            }))
        }
        PostKindTag::Review => Ok(Post::Sampled(detail.decode::<SampledPost>()?)),
        PostKindTag::Book => Ok(Post::Fallback(detail.decode::<BookSummary>()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(value: serde_json::Value) -> PostDetail {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_thread_detail() {
        let d = detail(json!({
            "_id": "t1", "book_Id": 9, "rating": 4, "text": "Great",
            "author": {"userId": "u1", "name": "Ann"},
            "children": [{"_id": "c1", "text": "agree", "author": {"name": "Bo"}}]
        }));
        let post = decode_post(PostKindTag::Thread, &d).unwrap();
        assert_eq!(post.id(), "t1");
        assert_eq!(post.book_id().to_string(), "9");
        assert_eq!(d.children.len(), 1);
    }

    #[test]
    fn test_decode_review_and_book() {
        let review = detail(json!({
            "_id": "s1", "book_id": "5", "user_id": "u", "rating": 3,
            "review_text": "ok", "n_votes": 1, "n_comments": 0
        }));
        assert!(matches!(
            decode_post(PostKindTag::Review, &review).unwrap(),
            Post::Sampled(_)
        ));

        let book = detail(json!({"_id": "b1", "book_id": "100", "title": "T"}));
        assert!(matches!(
            decode_post(PostKindTag::Book, &book).unwrap(),
            Post::Fallback(_)
        ));
    }

    #[test]
    fn test_thread_without_book_is_malformed() {
        let d = detail(json!({"_id": "t1", "author": {"name": "Ann"}}));
        assert!(matches!(
            decode_post(PostKindTag::Thread, &d),
            Err(Error::MalformedResponse(_))
        ));
    }
}
