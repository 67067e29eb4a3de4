use log::{info, trace};
use serde::Deserialize;

use crate::{
    record::{join_names, BookRecord, Provider},
    Error,
};

use super::{null_as_default, Client};

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes?q=isbn:";

/// Looks up `isbn` with the Google Books API.
///
/// `Ok(None)` means the request succeeded but no volume matched.
pub(crate) fn get_book_info<C: Client>(isbn: &str) -> Result<Option<BookRecord>, Error> {
    info!("Searching for ISBN '{isbn}' using Google Books API");
    let mut url = GOOGLE_BOOKS_URL.to_owned();
    url.push_str(isbn);

    let client = C::default();
    let GoogleModel { items } = client.get_json(&url)?;

    trace!("Request was successful - {} item(s) found", items.len());

    Ok(items
        .into_iter()
        .next()
        .map(|item| item.volume_info.build(isbn)))
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    // the API leaves out `items` completely when nothing matched
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo", default, deserialize_with = "null_as_default")]
    volume_info: VolumeInfo,
}

/// Volume information from the Google Book API
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    authors: Vec<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    page_count: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    categories: Vec<String>,
    average_rating: Option<f64>,
    ratings_count: Option<u32>,
    language: Option<String>,
    preview_link: Option<String>,
    info_link: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl VolumeInfo {
    // The API does not include the ISBN so it is taken from the request.
    fn build(self, isbn: &str) -> BookRecord {
        let VolumeInfo {
            title,
            authors,
            publisher,
            published_date,
            description,
            page_count,
            categories,
            average_rating,
            ratings_count,
            language,
            preview_link,
            info_link,
            image_links,
        } = self;

        let mut record = BookRecord::new(isbn, Provider::GoogleBooks);
        record.title = title;
        record.authors = join_names(authors);
        record.publisher = publisher;
        record.published_date = published_date;
        record.description = description;
        record.page_count = page_count;
        record.categories = join_names(categories);
        record.average_rating = average_rating;
        record.ratings_count = ratings_count;
        record.language = language;
        record.preview_link = preview_link;
        record.info_link = info_link;
        record.thumbnail = image_links.and_then(|links| links.thumbnail.or(links.small_thumbnail));
        record
    }
}
