//! Presentation cards
//!
//! Each post kind maps to exactly one card. Cards are plain data with a
//! `Display` rendering for terminal output.

use readwise_common::models::{BookSummary, Post, SampledPost, ThreadPost};
use readwise_common::route::PostKindTag;
use readwise_common::time::format_post_timestamp;
use readwise_common::{RefId, Route};
use std::fmt;

const REVIEW_EXCERPT_CHARS: usize = 200;
const DESCRIPTION_EXCERPT_CHARS: usize = 150;
const MAX_CARD_AUTHORS: usize = 3;

/// Cut `text` to at most `max` characters, marking the cut with "..."
pub fn excerpt(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Card for an in-app review thread
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadCard {
    pub thread_id: String,
    pub book_id: RefId,
    pub author_name: String,
    pub rating: f32,
    pub text: String,
    /// e.g. "2:07 PM - Mar 5, 2024"
    pub posted_at: String,
    pub reply_count: usize,
    pub likes: u32,
}

/// Card for a sampled review
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReviewCard {
    pub review_id: String,
    pub book_id: RefId,
    /// "User " plus the first six characters of the reviewer id
    pub user_label: String,
    pub rating: f32,
    pub votes: u32,
    pub comments: u32,
    pub excerpt: String,
    pub truncated: bool,
}

/// Card for a bare book summary
#[derive(Debug, Clone, PartialEq)]
pub struct BookMetadataCard {
    pub book_id: RefId,
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Thread(ThreadCard),
    SampleReview(SampleReviewCard),
    BookMetadata(BookMetadataCard),
}

impl Card {
    pub fn from_post(post: &Post) -> Card {
        match post {
            Post::Review(p) => Card::Thread(ThreadCard::from(p)),
            Post::Sampled(p) => Card::SampleReview(SampleReviewCard::from(p)),
            Post::Fallback(b) => Card::BookMetadata(BookMetadataCard::from(b)),
        }
    }

    /// Where activating the card navigates
    pub fn route(&self) -> Route {
        match self {
            Card::Thread(c) => Route::Thread {
                kind: PostKindTag::Thread,
                id: c.thread_id.clone(),
            },
            Card::SampleReview(c) => Route::Thread {
                kind: PostKindTag::Review,
                id: c.review_id.clone(),
            },
            Card::BookMetadata(c) => Route::BookDetail(c.book_id.clone()),
        }
    }
}

impl From<&ThreadPost> for ThreadCard {
    fn from(post: &ThreadPost) -> Self {
        let thread = &post.thread;
        Self {
            thread_id: post.id.clone(),
            book_id: post.book_id.clone(),
            author_name: thread.author.name.clone(),
            rating: thread.rating,
            text: thread.text.clone(),
            posted_at: format_post_timestamp(&thread.created_at),
            reply_count: thread.children.len(),
            likes: thread.likes,
        }
    }
}

impl From<&SampledPost> for SampleReviewCard {
    fn from(post: &SampledPost) -> Self {
        let review = &post.review;
        let short_user: String = review.user_id.chars().take(6).collect();
        let excerpt_text = excerpt(&review.review_text, REVIEW_EXCERPT_CHARS);
        Self {
            review_id: review.id.clone(),
            book_id: post.book_id.clone(),
            user_label: format!("User {}", short_user),
            rating: review.rating,
            votes: review.n_votes,
            comments: review.n_comments,
            truncated: excerpt_text.len() != review.review_text.len(),
            excerpt: excerpt_text,
        }
    }
}

impl From<&BookSummary> for BookMetadataCard {
    fn from(book: &BookSummary) -> Self {
        Self {
            book_id: book.book_id.clone(),
            title: book.title.clone(),
            authors: book.authors.iter().take(MAX_CARD_AUTHORS).cloned().collect(),
            description: book
                .description
                .as_deref()
                .map(|d| excerpt(d, DESCRIPTION_EXCERPT_CHARS)),
            image_url: book.image_url.clone(),
            genres: book.genres.clone(),
        }
    }
}

impl fmt::Display for ThreadCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.author_name)?;
        writeln!(f, "Reviewed On Book {}", self.book_id)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f, "{}/5", self.rating)?;
        write!(
            f,
            "{} • {} likes • {} replies",
            self.posted_at, self.likes, self.reply_count
        )
    }
}

impl fmt::Display for SampleReviewCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.user_label)?;
        writeln!(
            f,
            "{}/5 • {} votes • {} comments",
            self.rating, self.votes, self.comments
        )?;
        writeln!(f, "{}", self.excerpt)?;
        write!(f, "Book ID: {}", self.book_id)
    }
}

impl fmt::Display for BookMetadataCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book Name : {}", self.title)?;
        if !self.authors.is_empty() {
            write!(f, "\nBy {}", self.authors.join(", "))?;
        }
        if !self.genres.is_empty() {
            write!(f, "\n[{}]", self.genres.join(", "))?;
        }
        if let Some(description) = &self.description {
            write!(f, "\n{}", description)?;
        }
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Thread(c) => c.fmt(f),
            Card::SampleReview(c) => c.fmt(f),
            Card::BookMetadata(c) => c.fmt(f),
        }
    }
}
