//! Home feed view
//!
//! Owns the paginated feed for the signed-in identity. Initialization runs the
//! sign-in and onboarding guard before anything is fetched. Page loads never
//! overlap, and a load whose view was reset (or whose identity changed) while
//! it was in flight is discarded instead of applied.

use super::pagination::PaginatedFeed;
use super::pipeline::FeedPipeline;
use crate::session::{Session, SessionState};
use crate::status::ViewStatus;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::Post;
use readwise_common::{Result, Route};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const LOAD_FAILED: &str = "Failed to load recommendations. Please try again.";

/// Result of [`HomeFeed::initialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeInit {
    /// Session provider still loading; nothing was requested
    Wait,
    Redirect(Route),
    /// First page attempted; see the snapshot for posts or error
    Ready,
}

/// Result of one page load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { page: u32, added: usize, skipped_items: usize },
    /// Another load was outstanding, the feed is exhausted, or no one is signed in
    Ignored,
    /// The view was reset or the identity changed while the request was in flight
    Superseded,
}

/// Copy of the view state for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub posts: Vec<Post>,
    pub page: u32,
    pub has_more: bool,
    pub status: ViewStatus,
}

impl FeedSnapshot {
    /// Empty-state text, distinct from the error state
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.posts.is_empty() && !self.status.loading && !self.status.is_failed())
            .then_some("No recommendations found")
    }

    /// End-of-feed text once pagination is exhausted
    pub fn end_message(&self) -> Option<&'static str> {
        (!self.posts.is_empty() && !self.has_more).then_some("No more recommendations to show")
    }
}

#[derive(Default)]
struct HomeState {
    feed: PaginatedFeed,
    status: ViewStatus,
    in_flight: bool,
    epoch: u64,
}

pub struct HomeFeed {
    pipeline: FeedPipeline,
    session: Arc<dyn Session>,
    events: EventBus,
    state: Mutex<HomeState>,
}

impl HomeFeed {
    pub fn new(pipeline: FeedPipeline, session: Arc<dyn Session>, events: EventBus) -> Self {
        Self {
            pipeline,
            session,
            events,
            state: Mutex::new(HomeState::default()),
        }
    }

    /// Guard, then load page 1
    ///
    /// Signed out → sign-in. Not onboarded → onboarding. A status check
    /// rejected with 401/403 → sign-in; any other status failure → onboarding.
    pub async fn initialize(&self) -> HomeInit {
        let user = match self.session.state() {
            SessionState::Loading => return HomeInit::Wait,
            SessionState::SignedOut => return self.redirect(Route::SignIn),
            SessionState::SignedIn(user) => user,
        };

        match self.pipeline.backend().onboard_status(&user).await {
            Ok(true) => {}
            Ok(false) => {
                info!(user_id = %user, "User not onboarded, redirecting");
                return self.redirect(Route::Onboarding);
            }
            Err(e) if e.is_auth_rejection() => {
                warn!(user_id = %user, "Onboarding status rejected: {}", e);
                return self.redirect(Route::SignIn);
            }
            Err(e) => {
                warn!(user_id = %user, "Onboarding status check failed: {}", e);
                return self.redirect(Route::Onboarding);
            }
        }

        // Failure is recorded in the view status
        let _ = self.load(false).await;
        HomeInit::Ready
    }

    /// Append the next page
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        self.load(true).await
    }

    /// Reload from page 1, replacing loaded posts on success
    pub async fn retry(&self) -> Result<LoadOutcome> {
        self.load(false).await
    }

    /// Drop all state; in-flight results will be discarded
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let epoch = state.epoch + 1;
        *state = HomeState {
            epoch,
            ..HomeState::default()
        };
        debug!(epoch, "Home feed reset");
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().await;
        FeedSnapshot {
            posts: state.feed.posts().to_vec(),
            page: state.feed.page(),
            has_more: state.feed.has_more(),
            status: state.status.clone(),
        }
    }

    fn redirect(&self, route: Route) -> HomeInit {
        self.events.emit_lossy(ClientEvent::Navigate {
            route: route.clone(),
        });
        HomeInit::Redirect(route)
    }

    async fn load(&self, append: bool) -> Result<LoadOutcome> {
        let user = match self.session.state() {
            SessionState::SignedIn(user) => user,
            _ => return Ok(LoadOutcome::Ignored),
        };

        let (epoch, page) = {
            let mut state = self.state.lock().await;
            if state.in_flight {
                debug!("Feed load already in flight, ignoring");
                return Ok(LoadOutcome::Ignored);
            }
            if append && !state.feed.has_more() {
                return Ok(LoadOutcome::Ignored);
            }
            let page = if append { state.feed.next_page() } else { 1 };
            state.in_flight = true;
            state.status.start();
            (state.epoch, page)
        };

        let result = self.pipeline.fetch_page(&user, page).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            debug!(page, "Discarding feed page for a reset view");
            return Ok(LoadOutcome::Superseded);
        }
        state.in_flight = false;
        if self.session.state().identity() != Some(&user) {
            debug!(page, user_id = %user, "Discarding feed page for a previous identity");
            state.status.succeed();
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(fetched) => {
                let added = fetched.posts.len();
                state.feed.apply(
                    page,
                    fetched.posts,
                    fetched.items_received,
                    fetched.has_more,
                    append,
                );
                state.status.succeed();
                self.events.emit_lossy(ClientEvent::FeedUpdated {
                    page,
                    total_posts: state.feed.posts().len(),
                    has_more: state.feed.has_more(),
                });
                Ok(LoadOutcome::Applied {
                    page,
                    added,
                    skipped_items: fetched.skipped_items,
                })
            }
            Err(e) => {
                warn!(page, user_id = %user, "Feed page failed: {}", e);
                state.status.fail(LOAD_FAILED);
                self.events.emit_lossy(ClientEvent::error(LOAD_FAILED));
                Err(e)
            }
        }
    }
}
