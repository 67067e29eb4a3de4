//! The normalized book record produced by a successful lookup.

use std::fmt;

/// The metadata provider a [`BookRecord`] was resolved from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    /// Google Books volumes API, always asked first.
    GoogleBooks,
    /// Open Library books API, asked when Google Books has no match.
    OpenLibrary,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::GoogleBooks => f.write_str("Google Books"),
            Provider::OpenLibrary => f.write_str("Open Library"),
        }
    }
}

/// Book metadata for a single scanned ISBN.
///
/// Only the ISBN is required and it cannot be changed once the record exists; every other field
/// is whatever the provider had to offer. List-like values (authors, categories) are already
/// joined with `", "` for display.
#[derive(Clone, Debug, PartialEq)]
pub struct BookRecord {
    isbn: String,
    provider: Provider,
    /// Title of the book.
    pub title: Option<String>,
    /// Author names joined with `", "`.
    pub authors: Option<String>,
    /// Publisher names joined with `", "`.
    pub publisher: Option<String>,
    /// Publication date as given by the provider, formats vary.
    pub published_date: Option<String>,
    /// Description or blurb.
    pub description: Option<String>,
    /// Number of pages.
    pub page_count: Option<u32>,
    /// Categories or subjects joined with `", "`.
    pub categories: Option<String>,
    /// Average rating.
    pub average_rating: Option<f64>,
    /// Number of ratings the average is based on.
    pub ratings_count: Option<u32>,
    /// Language code, e.g. `en`.
    pub language: Option<String>,
    /// Preview link.
    pub preview_link: Option<String>,
    /// Info link.
    pub info_link: Option<String>,
    /// Cover image URL.
    pub thumbnail: Option<String>,
}

impl BookRecord {
    /// Creates an otherwise empty record for `isbn`.
    #[must_use]
    pub fn new<S: Into<String>>(isbn: S, provider: Provider) -> Self {
        Self {
            isbn: isbn.into(),
            provider,
            title: None,
            authors: None,
            publisher: None,
            published_date: None,
            description: None,
            page_count: None,
            categories: None,
            average_rating: None,
            ratings_count: None,
            language: None,
            preview_link: None,
            info_link: None,
            thumbnail: None,
        }
    }

    /// The scanned symbol this record was resolved for.
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Where the metadata came from.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// The first available link for the book, preferring the preview link.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.preview_link
            .as_deref()
            .or(self.info_link.as_deref())
    }

    /// Cover image URL.
    #[must_use]
    pub fn cover(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }
}

/// Joins the non-empty values with `", "`, or `None` when nothing is left.
pub(crate) fn join_names<I, S>(names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names = names
        .into_iter()
        .map(|name| name.as_ref().trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}
