#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # isbnscan
//!
//! isbnscan turns a stream of scanned barcodes into a spreadsheet of books. Each scanned ISBN is
//! looked up with Google Books, falling back to Open Library, and recorded once per session in a
//! [`Ledger`]. When the session is finalized the ledger is written out with an
//! [`export::Exporter`] such as [`export::XlsxExporter`].
//!
//! The whole loop is driven by a [`session::Session`], the barcode reader and the operator
//! facing side plug in through [`source::BarcodeSource`] and [`session::Presenter`].

mod api;
mod error;
pub mod export;
pub mod ledger;
pub mod lookup;
pub mod record;
pub mod session;
pub mod source;
pub mod symbol;

pub use api::Client;
pub use error::{Error, ErrorKind};
pub use ledger::Ledger;
pub use record::{BookRecord, Provider};

use log::trace;

/// The HTTP client used outside of tests.
pub type DefaultClient = reqwest::blocking::Client;

/// Look up `isbn` using the default client, Google Books first and Open Library second.
///
/// # Errors
///
/// An `Err` is returned when a request fails or a response cannot be parsed. No match from either
/// provider is `Ok(None)`.
#[inline]
pub fn book_by_isbn(isbn: &str) -> Result<Option<BookRecord>, Error> {
    trace!("Search book by ISBN of '{isbn}'");
    lookup::resolve::<DefaultClient>(isbn)
}

/// A [`session::Session`] using the default client.
pub type Session<S, P, E> = session::Session<DefaultClient, S, P, E>;
