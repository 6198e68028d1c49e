use std::sync::Arc;

use guestlist_core::{GuestBook, SheetStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState<S> {
    // The store is the only thing shared between requests; nothing is cached
    book: Arc<GuestBook<S>>,
}

impl<S: SheetStore> AppState<S> {
    pub fn new(book: GuestBook<S>) -> Self {
        AppState {
            book: Arc::new(book),
        }
    }

    pub fn book(&self) -> &GuestBook<S> {
        &self.book
    }
}
