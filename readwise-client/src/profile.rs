//! Profile view

use crate::api::Backend;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::{Book, LikedPost, Profile, Thread};
use readwise_common::{Identity, Result};
use tracing::{info, warn};

/// Everything the profile page shows, loaded as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub profile: Profile,
    pub threads: Vec<Thread>,
    pub liked_posts: Vec<LikedPost>,
    pub book_history: Vec<Book>,
    pub rentals: Vec<Book>,
    pub purchases: Vec<Book>,
}

impl ProfileView {
    /// Load all six sections; any failure fails the whole view
    pub async fn load(backend: &dyn Backend, events: &EventBus, user: &Identity) -> Result<Self> {
        let loaded = tokio::try_join!(
            backend.profile(user),
            backend.user_threads(user),
            backend.liked_posts(user),
            backend.book_history(user),
            backend.rentals(user),
            backend.purchases(user),
        );

        match loaded {
            Ok((profile, threads, liked_posts, book_history, rentals, purchases)) => {
                info!(
                    user_id = %user,
                    threads = threads.len(),
                    liked = liked_posts.len(),
                    history = book_history.len(),
                    "Profile loaded"
                );
                Ok(Self {
                    profile,
                    threads,
                    liked_posts,
                    book_history,
                    rentals,
                    purchases,
                })
            }
            Err(e) => {
                warn!(user_id = %user, "Failed to load profile data: {}", e);
                events.emit_lossy(ClientEvent::error("Failed to load profile data"));
                Err(e)
            }
        }
    }

    pub fn display_name(&self) -> &str {
        if self.profile.name.trim().is_empty() {
            self.profile.user_id.as_str()
        } else {
            self.profile.name.as_str()
        }
    }
}
