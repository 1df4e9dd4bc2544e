//! Book search view
//!
//! Text and filter changes schedule a debounced page-1 search. Queries shorter
//! than three characters clear the results without a request. Results from a
//! query that has since changed are discarded.

mod debounce;

pub use debounce::Debouncer;

use crate::api::Backend;
use crate::status::ViewStatus;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::{Book, SearchQuery, SearchSort};
use readwise_common::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const MIN_QUERY_CHARS: usize = 3;

/// Optional search filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Comma-separated genre list
    pub genres: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub sort: SearchSort,
}

/// Copy of the view state for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub text: String,
    pub books: Vec<Book>,
    pub total: u64,
    pub page: u32,
    pub has_more: bool,
    pub status: ViewStatus,
}

impl SearchSnapshot {
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.books.is_empty() || self.status.loading || self.status.is_failed() {
            return None;
        }
        if self.text.trim().is_empty() {
            Some("Start typing to search")
        } else {
            Some("No books found")
        }
    }
}

#[derive(Default)]
struct SearchState {
    text: String,
    filters: SearchFilters,
    books: Vec<Book>,
    total: u64,
    page: u32,
    status: ViewStatus,
    generation: u64,
}

impl SearchState {
    fn has_more(&self, page_size: u32) -> bool {
        u64::from(self.page) * u64::from(page_size) < self.total
    }
}

pub struct SearchView {
    backend: Arc<dyn Backend>,
    events: EventBus,
    page_size: u32,
    debouncer: Debouncer,
    state: Mutex<SearchState>,
}

pub fn is_searchable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_QUERY_CHARS
}

impl SearchView {
    pub fn new(
        backend: Arc<dyn Backend>,
        events: EventBus,
        page_size: u32,
        debounce: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            backend,
            events,
            page_size,
            debouncer: Debouncer::new(debounce),
            state: Mutex::new(SearchState::default()),
        })
    }

    /// Update the query text and schedule a debounced search
    pub async fn set_text(self: &Arc<Self>, text: impl Into<String>) {
        {
            let mut state = self.state.lock().await;
            state.text = text.into();
            state.generation += 1;
        }
        self.schedule();
    }

    /// Update the filters and schedule a debounced search
    pub async fn set_filters(self: &Arc<Self>, filters: SearchFilters) {
        {
            let mut state = self.state.lock().await;
            state.filters = filters;
            state.generation += 1;
        }
        self.schedule();
    }

    /// Reset text, filters and results
    pub async fn clear(&self) {
        self.debouncer.cancel();
        let mut state = self.state.lock().await;
        let generation = state.generation + 1;
        *state = SearchState {
            generation,
            ..SearchState::default()
        };
    }

    fn schedule(self: &Arc<Self>) {
        let view = Arc::clone(self);
        let _ = self.debouncer.schedule(async move {
            // Failures are recorded in the view status
            let _ = view.fetch(1).await;
        });
    }

    /// Run the page-1 search immediately, bypassing the debounce
    pub async fn search_now(&self) -> Result<usize> {
        self.debouncer.cancel();
        self.fetch(1).await
    }

    /// Fetch the next page if the total says there is one
    ///
    /// Returns the number of books appended (0 when there is nothing more or a
    /// request is already running).
    pub async fn load_more(&self) -> Result<usize> {
        let next = {
            let state = self.state.lock().await;
            if state.status.loading || !state.has_more(self.page_size) {
                return Ok(0);
            }
            state.page + 1
        };
        self.fetch(next).await
    }

    pub async fn snapshot(&self) -> SearchSnapshot {
        let state = self.state.lock().await;
        SearchSnapshot {
            text: state.text.clone(),
            books: state.books.clone(),
            total: state.total,
            page: state.page,
            has_more: state.has_more(self.page_size),
            status: state.status.clone(),
        }
    }

    async fn fetch(&self, page: u32) -> Result<usize> {
        let (query, generation) = {
            let mut state = self.state.lock().await;
            if !is_searchable(&state.text) {
                if page == 1 {
                    state.books.clear();
                    state.total = 0;
                    state.page = 0;
                    state.status = ViewStatus::default();
                }
                return Ok(0);
            }
            state.status.start();
            let query = SearchQuery {
                text: state.text.trim().to_string(),
                page,
                limit: self.page_size,
                genres: state.filters.genres.clone(),
                year_min: state.filters.year_min,
                year_max: state.filters.year_max,
                sort: state.filters.sort,
            };
            (query, state.generation)
        };

        let result = self.backend.search_books(&query).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(query = %query.text, page, "Discarding results for a changed query");
            return Ok(0);
        }

        match result {
            Ok(response) => {
                let added = response.books.len();
                if page == 1 {
                    state.books = response.books;
                } else {
                    state.books.extend(response.books);
                }
                state.total = response.total;
                state.page = page;
                state.status.succeed();
                debug!(query = %query.text, page, added, total = state.total, "Search results applied");
                Ok(added)
            }
            Err(e) => {
                warn!(query = %query.text, page, "Search failed: {}", e);
                state.status.fail(e.to_string());
                self.events.emit_lossy(ClientEvent::error("Failed to load books"));
                Err(e)
            }
        }
    }
}
