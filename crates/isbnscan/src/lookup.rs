//! Resolves a scanned symbol to a [`BookRecord`] using the providers in priority order.

use log::{debug, trace};

use crate::{
    api::{google_books, open_library, Client},
    record::BookRecord,
    Error,
};

/// Resolves `symbol` with Google Books, falling back to Open Library when Google Books has no
/// match.
///
/// `Ok(None)` means neither provider knows the book. Every call goes to the network, nothing is
/// cached.
///
/// # Errors
///
/// An `Err` is returned as soon as either request fails, a failed Google Books request does not
/// fall back to Open Library.
pub fn resolve<C: Client>(symbol: &str) -> Result<Option<BookRecord>, Error> {
    trace!("Resolving '{symbol}'");
    if let Some(record) = google_books::get_book_info::<C>(symbol)? {
        return Ok(Some(record));
    }

    debug!("Google Books has no match for '{symbol}' - trying Open Library");
    open_library::get_book_info::<C>(symbol)
}
