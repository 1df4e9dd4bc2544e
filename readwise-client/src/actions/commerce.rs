//! Rentals and purchases

use crate::api::Backend;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::{Identity, RefId, Result};
use tracing::{info, warn};

/// Books the user has rented or bought
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    rented: Vec<RefId>,
    purchased: Vec<RefId>,
}

impl Library {
    /// Read both lists concurrently
    pub async fn load(backend: &dyn Backend, user: &Identity) -> Result<Self> {
        let (rentals, purchases) =
            tokio::try_join!(backend.rentals(user), backend.purchases(user))?;

        Ok(Self {
            rented: rentals.into_iter().map(|b| b.book_id).collect(),
            purchased: purchases.into_iter().map(|b| b.book_id).collect(),
        })
    }

    pub fn is_rented(&self, book: &RefId) -> bool {
        self.rented.iter().any(|id| id.same_as(book))
    }

    pub fn is_purchased(&self, book: &RefId) -> bool {
        self.purchased.iter().any(|id| id.same_as(book))
    }

    pub fn rented(&self) -> &[RefId] {
        &self.rented
    }

    pub fn purchased(&self) -> &[RefId] {
        &self.purchased
    }

    pub async fn rent(
        &mut self,
        backend: &dyn Backend,
        events: &EventBus,
        user: &Identity,
        book: &RefId,
    ) -> Result<()> {
        let result = backend.rent(user, book).await;
        record(&mut self.rented, result, events, book, "Book rented successfully!")
    }

    pub async fn purchase(
        &mut self,
        backend: &dyn Backend,
        events: &EventBus,
        user: &Identity,
        book: &RefId,
    ) -> Result<()> {
        let result = backend.purchase(user, book).await;
        record(&mut self.purchased, result, events, book, "Book purchased successfully!")
    }
}

fn record(
    set: &mut Vec<RefId>,
    result: Result<()>,
    events: &EventBus,
    book: &RefId,
    success: &str,
) -> Result<()> {
    match result {
        Ok(()) => {
            info!(book_id = %book, "{}", success);
            if !set.iter().any(|id| id.same_as(book)) {
                set.push(book.clone());
            }
            events.emit_lossy(ClientEvent::success(success));
            Ok(())
        }
        Err(e) => {
            warn!(book_id = %book, "Commerce action failed: {}", e);
            events.emit_lossy(ClientEvent::error(e.to_string()));
            Err(e)
        }
    }
}
