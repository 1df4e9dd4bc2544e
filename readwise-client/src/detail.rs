//! Book detail view

use crate::actions::Library;
use crate::api::Backend;
use crate::status::ViewStatus;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::{Book, Thread};
use readwise_common::{Identity, RefId, Result};
use tracing::warn;

/// Book with its review threads and the user's library state
///
/// The book itself must load; reviews and library failures only set
/// `reviews_status` so the book can still be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetail {
    pub book: Book,
    pub reviews: Vec<Thread>,
    pub library: Library,
    pub reviews_status: ViewStatus,
}

impl BookDetail {
    pub async fn load(
        backend: &dyn Backend,
        events: &EventBus,
        user: &Identity,
        book_id: &RefId,
    ) -> Result<Self> {
        let book = backend.book(book_id).await.map_err(|e| {
            warn!(book_id = %book_id, "Failed to load book details: {}", e);
            events.emit_lossy(ClientEvent::error("Failed to load book details"));
            e
        })?;

        let mut reviews_status = ViewStatus::default();
        let (reviews, library) = match tokio::try_join!(
            backend.book_threads(book_id),
            Library::load(backend, user)
        ) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(book_id = %book_id, "Failed to load reviews or user data: {}", e);
                reviews_status.fail(e.to_string());
                events.emit_lossy(ClientEvent::error("Failed to load reviews or user data"));
                (Vec::new(), Library::default())
            }
        };

        Ok(Self {
            book,
            reviews,
            library,
            reviews_status,
        })
    }

    pub fn is_rented(&self) -> bool {
        self.library.is_rented(&self.book.book_id)
    }

    pub fn is_purchased(&self) -> bool {
        self.library.is_purchased(&self.book.book_id)
    }

    pub async fn rent(&mut self, backend: &dyn Backend, events: &EventBus, user: &Identity) -> Result<()> {
        let book_id = self.book.book_id.clone();
        self.library.rent(backend, events, user, &book_id).await
    }

    pub async fn purchase(
        &mut self,
        backend: &dyn Backend,
        events: &EventBus,
        user: &Identity,
    ) -> Result<()> {
        let book_id = self.book.book_id.clone();
        self.library.purchase(backend, events, user, &book_id).await
    }
}
