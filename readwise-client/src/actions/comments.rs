//! Comment count and comment posting

use crate::api::Backend;
use readwise_common::models::{NewComment, Post};
use readwise_common::{Error, Identity, Result};
use tracing::{info, warn};

pub const MIN_BODY_CHARS: usize = 3;
pub const MAX_BODY_CHARS: usize = 500;

/// Check a comment or review body, returning it trimmed
pub fn validate_body(text: &str) -> Result<&str> {
    let body = text.trim();
    let chars = body.chars().count();
    if chars < MIN_BODY_CHARS {
        return Err(Error::InvalidInput("Minimum 3 Characters".to_string()));
    }
    if chars > MAX_BODY_CHARS {
        return Err(Error::InvalidInput(
            "Limit reached, maximum 500 characters allowed".to_string(),
        ));
    }
    Ok(body)
}

/// Comment count for a post; 0 when the read fails
pub async fn comment_count(backend: &dyn Backend, post: &Post) -> u32 {
    let scoped = post.scoped_id();
    match backend.comment_count(&scoped).await {
        Ok(count) => count,
        Err(e) => {
            warn!(post = %scoped, "Failed to fetch comment count: {}", e);
            0
        }
    }
}

/// Post a comment on the thread or review `thread_id`
pub async fn post_comment(
    backend: &dyn Backend,
    user: &Identity,
    thread_id: &str,
    text: &str,
) -> Result<()> {
    let comment = NewComment {
        thread_id: thread_id.to_string(),
        comment_text: validate_body(text)?.to_string(),
        user_id: user.to_string(),
    };
    backend.post_comment(&comment).await?;
    info!(thread_id, user_id = %user, "Comment posted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_body_bounds() {
        assert!(validate_body("ab").is_err());
        assert!(validate_body("   ab   ").is_err());
        assert_eq!(validate_body("  abc ").unwrap(), "abc");
        assert!(validate_body(&"x".repeat(500)).is_ok());
        assert!(validate_body(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        assert!(validate_body("ééé").is_ok());
        assert!(validate_body(&"é".repeat(500)).is_ok());
    }
}
