//! Optimistic like toggle
//!
//! Two phases: [`LikeToggle::begin`] flips the local state at once, then
//! [`LikeToggle::settle`] applies the remote outcome. A failed mutation
//! reverts the flip and surfaces the error.

use crate::api::Backend;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::{LikeRequest, Post};
use readwise_common::{Identity, Result};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Locally displayed like state of one post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeState {
    pub is_liked: bool,
    pub like_count: u32,
}

/// Optimistic flip awaiting its remote outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending like must be settled"]
pub struct PendingLike {
    previous: LikeState,
    liking: bool,
}

impl PendingLike {
    /// True when the flip was unliked → liked
    pub fn liking(&self) -> bool {
        self.liking
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: LikeState,
    pending: bool,
}

/// Like state and toggle for one rendered post
#[derive(Debug)]
pub struct LikeToggle {
    request: LikeRequest,
    inner: Mutex<Inner>,
}

impl LikeToggle {
    /// Initial count comes from the post itself (thread likes, sampled votes)
    pub fn new(user: &Identity, post: &Post) -> Self {
        let like_count = match post {
            Post::Review(p) => p.thread.likes,
            Post::Sampled(p) => p.review.n_votes,
            Post::Fallback(_) => 0,
        };
        let request = LikeRequest {
            user_id: user.to_string(),
            post_id: post.id().to_string(),
            post_type: post.kind().endpoint_tag(),
            book_id: post.book_id().clone(),
        };
        Self::for_request(request, like_count)
    }

    /// Toggle for a post known only by reference
    pub fn for_request(request: LikeRequest, like_count: u32) -> Self {
        Self {
            request,
            inner: Mutex::new(Inner {
                state: LikeState {
                    is_liked: false,
                    like_count,
                },
                pending: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> LikeState {
        self.lock().state
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    /// Read whether the user already likes this post's book
    ///
    /// A failed read leaves the post shown as not liked.
    pub async fn refresh(&self, backend: &dyn Backend) -> LikeState {
        let user = Identity::new(self.request.user_id.clone());
        match backend.like_status(&user, &self.request.book_id).await {
            Ok(is_liked) => {
                let mut inner = self.lock();
                if !inner.pending {
                    inner.state.is_liked = is_liked;
                }
                inner.state
            }
            Err(e) => {
                warn!(post_id = %self.request.post_id, "Failed to fetch like status: {}", e);
                self.state()
            }
        }
    }

    /// Phase 1: flip locally; `None` while another toggle is unsettled
    pub fn begin(&self) -> Option<PendingLike> {
        let mut inner = self.lock();
        if inner.pending {
            return None;
        }

        let previous = inner.state;
        let liking = !previous.is_liked;
        inner.state = LikeState {
            is_liked: liking,
            like_count: if liking {
                previous.like_count.saturating_add(1)
            } else {
                previous.like_count.saturating_sub(1)
            },
        };
        inner.pending = true;
        Some(PendingLike { previous, liking })
    }

    /// Phase 2: keep the flip on success, revert it on failure
    pub fn settle(&self, pending: PendingLike, outcome: Result<()>) -> Result<LikeState> {
        let mut inner = self.lock();
        inner.pending = false;
        match outcome {
            Ok(()) => Ok(inner.state),
            Err(e) => {
                inner.state = pending.previous;
                Err(e)
            }
        }
    }

    /// Flip, send the mutation, reconcile
    ///
    /// Returns the current state unchanged when a toggle is already pending.
    pub async fn toggle(&self, backend: &dyn Backend, events: &EventBus) -> Result<LikeState> {
        let Some(pending) = self.begin() else {
            debug!(post_id = %self.request.post_id, "Like toggle already pending");
            return Ok(self.state());
        };

        let outcome = if pending.liking() {
            backend.like(&self.request).await
        } else {
            backend.unlike(&self.request).await
        };

        self.settle(pending, outcome).map_err(|e| {
            warn!(post_id = %self.request.post_id, "Failed to update like: {}", e);
            events.emit_lossy(ClientEvent::error("Failed to update like"));
            e
        })
    }
}
