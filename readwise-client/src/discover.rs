//! Discovery view: diversified recommendations resolved to full books

use crate::actions::Library;
use crate::api::Backend;
use crate::feed::gather_facets;
use crate::session::Session;
use crate::status::ViewStatus;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::{Book, DiversifyResponse, PreferenceFacets, RecommendationRequest};
use readwise_common::{Identity, RefId, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const LOAD_FAILED: &str = "Failed to load recommendations";

#[derive(Default)]
struct DiscoverState {
    user: Option<Identity>,
    facets: Option<PreferenceFacets>,
    library: Library,
    books: Vec<Book>,
    page: u32,
    is_next: bool,
    status: ViewStatus,
}

/// Copy of the view state for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverSnapshot {
    pub books: Vec<Book>,
    pub page: u32,
    pub is_next: bool,
    pub library: Library,
    pub status: ViewStatus,
}

pub struct DiscoverView {
    backend: Arc<dyn Backend>,
    session: Arc<dyn Session>,
    events: EventBus,
    page_size: u32,
    state: Mutex<DiscoverState>,
}

impl DiscoverView {
    pub fn new(
        backend: Arc<dyn Backend>,
        session: Arc<dyn Session>,
        events: EventBus,
        page_size: u32,
    ) -> Self {
        Self {
            backend,
            session,
            events,
            page_size,
            state: Mutex::new(DiscoverState::default()),
        }
    }

    /// Read facets and library, then load page 1
    pub async fn load(&self) -> Result<usize> {
        let user = self.session.require_identity()?;
        let mut state = self.state.lock().await;
        state.status.start();

        let loaded = tokio::try_join!(
            gather_facets(self.backend.as_ref(), &user),
            Library::load(self.backend.as_ref(), &user),
        );
        let (facets, library) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(user_id = %user, "Failed to load discovery preferences: {}", e);
                state.status.fail(e.to_string());
                self.events.emit_lossy(ClientEvent::error(LOAD_FAILED));
                return Err(e);
            }
        };

        state.user = Some(user);
        state.facets = Some(facets);
        state.library = library;
        self.fetch(&mut state, 1).await
    }

    /// Append the next page while the last page was full
    pub async fn load_more(&self) -> Result<usize> {
        let mut state = self.state.lock().await;
        if state.facets.is_none() || !state.is_next {
            return Ok(0);
        }
        let next = state.page + 1;
        self.fetch(&mut state, next).await
    }

    pub async fn rent(&self, book: &RefId) -> Result<()> {
        let user = self.session.require_identity()?;
        let mut state = self.state.lock().await;
        state
            .library
            .rent(self.backend.as_ref(), &self.events, &user, book)
            .await
    }

    pub async fn purchase(&self, book: &RefId) -> Result<()> {
        let user = self.session.require_identity()?;
        let mut state = self.state.lock().await;
        state
            .library
            .purchase(self.backend.as_ref(), &self.events, &user, book)
            .await
    }

    pub async fn snapshot(&self) -> DiscoverSnapshot {
        let state = self.state.lock().await;
        DiscoverSnapshot {
            books: state.books.clone(),
            page: state.page,
            is_next: state.is_next,
            library: state.library.clone(),
            status: state.status.clone(),
        }
    }

    async fn fetch(&self, state: &mut DiscoverState, page: u32) -> Result<usize> {
        let (Some(user), Some(facets)) = (state.user.clone(), state.facets.clone()) else {
            return Ok(0);
        };
        state.status.start();

        match self.fetch_books(&user, facets, page).await {
            Ok(None) => {
                info!(user_id = %user, page, "No diversified recommendations available");
                if page == 1 {
                    state.books.clear();
                }
                state.page = page;
                state.is_next = false;
                state.status.succeed();
                Ok(0)
            }
            Ok(Some((ids, books))) => {
                let added = books.len();
                if page == 1 {
                    state.books = books;
                } else {
                    state.books.extend(books);
                }
                state.page = page;
                state.is_next = ids == self.page_size as usize;
                state.status.succeed();
                debug!(user_id = %user, page, added, is_next = state.is_next, "Discovery page applied");
                Ok(added)
            }
            Err(e) => {
                warn!(user_id = %user, page, "Discovery page failed: {}", e);
                state.status.fail(e.to_string());
                self.events.emit_lossy(ClientEvent::error(LOAD_FAILED));
                Err(e)
            }
        }
    }

    /// Recommended id count and resolved books, or `None` when there are none
    async fn fetch_books(
        &self,
        user: &Identity,
        facets: PreferenceFacets,
        page: u32,
    ) -> Result<Option<(usize, Vec<Book>)>> {
        let request = RecommendationRequest::new(user.as_str(), facets, page, self.page_size);
        let ids = match self.backend.diversify_recommendations(&request).await? {
            DiversifyResponse::BookIds(ids) => ids,
            DiversifyResponse::Message { message } => {
                debug!(page, %message, "Diversify returned a message");
                return Ok(None);
            }
        };
        let books = self.backend.books_by_ids(&ids).await?;
        Ok(Some((ids.len(), books)))
    }
}
