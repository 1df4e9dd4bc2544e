//! Review thread composition

use super::comments::validate_body;
use crate::api::Backend;
use readwise_common::models::{Book, NewThread};
use readwise_common::{Error, Identity, Result};
use tracing::{error, info};

/// Review being written on the create-thread screen
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub book: Option<Book>,
    /// 0 means not rated yet
    pub rating: u8,
    pub content: String,
}

impl ReviewDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_book(&mut self, book: Book) {
        self.book = Some(book);
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<()> {
        if rating > 5 {
            return Err(Error::InvalidInput(format!("Rating must be 1 to 5, got {}", rating)));
        }
        self.rating = rating;
        Ok(())
    }

    /// Build the create request, checking book, rating and body in that order
    pub fn to_request(&self, author: &Identity) -> Result<NewThread> {
        let book = self
            .book
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("Please select a book for your review.".to_string()))?;
        if !(1..=5).contains(&self.rating) {
            return Err(Error::InvalidInput("Please rate the book.".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::InvalidInput("Please write a review.".to_string()));
        }
        let text = validate_body(&self.content)?;

        Ok(NewThread {
            book_id: book.book_id.clone(),
            text: text.to_string(),
            author: author.to_string(),
            rating: self.rating,
        })
    }

    /// Create the thread; the draft is cleared only on success
    pub async fn submit(&mut self, backend: &dyn Backend, author: &Identity) -> Result<()> {
        let request = self.to_request(author)?;
        match backend.create_thread(&request).await {
            Ok(()) => {
                info!(book_id = %request.book_id, user_id = %author, "Review thread created");
                *self = Self::default();
                Ok(())
            }
            Err(e) => {
                error!(book_id = %request.book_id, "Failed to create review thread: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readwise_common::RefId;

    fn book() -> Book {
        serde_json::from_value(serde_json::json!({"book_id": 12, "title": "Dune"})).unwrap()
    }

    #[test]
    fn test_draft_validation_order() {
        let me = Identity::new("me");
        let mut draft = ReviewDraft::new();
        draft.content = "Loved it".to_string();

        let err = draft.to_request(&me).unwrap_err();
        assert!(err.to_string().contains("select a book"));

        draft.select_book(book());
        let err = draft.to_request(&me).unwrap_err();
        assert!(err.to_string().contains("rate the book"));

        draft.set_rating(4).unwrap();
        let request = draft.to_request(&me).unwrap();
        assert_eq!(request.book_id, RefId::from(12));
        assert_eq!(request.rating, 4);
        assert_eq!(request.author, "me");
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut draft = ReviewDraft::new();
        assert!(draft.set_rating(6).is_err());
        assert_eq!(draft.rating, 0);
    }

    #[test]
    fn test_short_body_rejected() {
        let mut draft = ReviewDraft::new();
        draft.select_book(book());
        draft.set_rating(3).unwrap();
        draft.content = "ok".to_string();
        assert!(draft.to_request(&Identity::new("me")).is_err());
    }
}
