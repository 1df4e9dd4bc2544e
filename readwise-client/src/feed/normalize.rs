//! Flatten recommendation items into posts
//!
//! One post per nested thread (`review`), one per nested sampled review
//! (`sampled`), one per book summary (`fallback`). Server order is kept at both
//! levels.

use readwise_common::models::{FeedItem, Post, SampledPost, ThreadPost};
use std::collections::HashSet;
use tracing::warn;

/// Flattened page content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub posts: Vec<Post>,
    /// Items dropped because their discriminant is unknown
    pub skipped_items: usize,
}

pub fn flatten(items: Vec<FeedItem>) -> Normalized {
    let mut out = Normalized::default();

    for item in items {
        match item {
            FeedItem::Review { book_id, threads } => {
                out.posts.extend(threads.into_iter().map(|thread| {
                    Post::Review(ThreadPost {
                        id: thread.id.clone(),
                        book_id: book_id.clone(),
                        thread,
                    })
                }));
            }
            FeedItem::Sampled {
                book_id,
                sampled_reviews,
            } => {
                out.posts
                    .extend(sampled_reviews.into_iter().map(|review| {
                        Post::Sampled(SampledPost {
                            book_id: book_id.clone(),
                            review,
                        })
                    }));
            }
            FeedItem::Fallback(book) => out.posts.push(Post::Fallback(book)),
            FeedItem::Unrecognized => {
                warn!("Dropping feed item with unrecognized type");
                out.skipped_items += 1;
            }
        }
    }

    out
}

/// Identifiers that occur more than once, in first-repeat order
pub fn duplicate_ids(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for post in posts {
        let id = post.id();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }

    duplicates
}
