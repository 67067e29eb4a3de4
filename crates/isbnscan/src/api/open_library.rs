use std::collections::HashMap;

use log::{info, trace};
use serde::Deserialize;

use crate::{
    record::{join_names, BookRecord, Provider},
    Error,
};

use super::{null_as_default, Client};

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/api/books";

/// Looks up `isbn` with the Open Library books API.
///
/// The response is an object keyed by `ISBN:<isbn>`, a missing key means no match.
pub(crate) fn get_book_info<C: Client>(isbn: &str) -> Result<Option<BookRecord>, Error> {
    info!("Searching for ISBN '{isbn}' using Open Library API");
    let key = format!("ISBN:{isbn}");
    let url = format!("{OPEN_LIBRARY_URL}?bibkeys={key}&format=json&jscmd=data");

    let client = C::default();
    let mut books: HashMap<String, OpenLibraryBook> = client.get_json(&url)?;

    trace!("Request was successful - {} book(s) found", books.len());

    Ok(books.remove(&key).map(|book| book.build(isbn)))
}

#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(default)]
struct OpenLibraryBook {
    title: Option<String>,
    url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    authors: Vec<Named>,
    #[serde(deserialize_with = "null_as_default")]
    publishers: Vec<Named>,
    publish_date: Option<String>,
    number_of_pages: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    subjects: Vec<Named>,
    cover: Option<Cover>,
}

/// Authors, publishers and subjects are all objects carrying a `name`.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Named {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Cover {
    small: Option<String>,
    medium: Option<String>,
    large: Option<String>,
}

impl OpenLibraryBook {
    fn build(self, isbn: &str) -> BookRecord {
        let OpenLibraryBook {
            title,
            url,
            authors,
            publishers,
            publish_date,
            number_of_pages,
            subjects,
            cover,
        } = self;

        let names = |named: Vec<Named>| join_names(named.into_iter().map(|n| n.name));

        let mut record = BookRecord::new(isbn, Provider::OpenLibrary);
        record.title = title;
        record.authors = names(authors);
        record.publisher = names(publishers);
        record.published_date = publish_date;
        record.page_count = number_of_pages;
        record.categories = names(subjects);
        record.info_link = url;
        record.thumbnail = cover.and_then(|c| c.large.or(c.medium).or(c.small));
        record
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{assert_urls, impl_text_producer, MockClient, NetworkErrorProducer},
        record::Provider,
        ErrorKind,
    };

    const OPEN_LIBRARY_JSON: &str = include_str!("../../tests/data/open_library_hobbit.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(OPEN_LIBRARY_JSON.to_owned()),
        EmptyObjectProducer => Ok("{}".to_owned()),
        NullListsProducer => Ok(
            r#"{ "ISBN:0000000000": {
                "title": "T",
                "authors": null,
                "publishers": [{ "name": null }, { "name": "Unwin" }],
                "subjects": null
            } }"#
                .to_owned()
        ),
        TestBookProducer => Ok(
            r#"{ "ISBN:0000000000": { "title": "Test Book", "authors": [{ "name": "A. Author" }] } }"#
                .to_owned()
        ),
    }

    #[test]
    fn bibkeys_url_format_is_correct() {
        assert!(super::get_book_info::<MockClient<EmptyObjectProducer>>("0261102214").is_ok());
        assert_urls!([
            "https://openlibrary.org/api/books?bibkeys=ISBN:0261102214&format=json&jscmd=data"
        ]);
    }

    #[test]
    fn empty_object_is_no_match() {
        let res = super::get_book_info::<MockClient<EmptyObjectProducer>>("1111111111")
            .expect("An empty object is not an error");
        assert!(res.is_none());
    }

    #[test]
    fn other_key_is_no_match() {
        let res = super::get_book_info::<MockClient<ValidJsonProducer>>("1111111111")
            .expect("ValidJsonProducer is valid JSON");
        assert!(res.is_none());
    }

    #[test]
    fn network_error_is_returned() {
        let err = super::get_book_info::<MockClient<NetworkErrorProducer>>("1111111111")
            .expect_err("NetworkErrorProducer always fails");
        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn name_objects_are_joined() {
        let record = super::get_book_info::<MockClient<TestBookProducer>>("0000000000")
            .unwrap()
            .expect("TestBookProducer has a book under the requested key");

        assert_eq!("0000000000", record.isbn());
        assert_eq!(Some("Test Book"), record.title.as_deref());
        assert_eq!(Some("A. Author"), record.authors.as_deref());
        assert_eq!(None, record.publisher);
        assert_eq!(None, record.categories);
        assert_eq!(Provider::OpenLibrary, record.provider());
    }

    #[test]
    fn full_book_maps_every_field() {
        let record = super::get_book_info::<MockClient<ValidJsonProducer>>("9780261102217")
            .unwrap()
            .expect("ValidJsonProducer has a book under the requested key");

        assert_eq!(Some("The Hobbit"), record.title.as_deref());
        assert_eq!(Some("J.R.R. Tolkien"), record.authors.as_deref());
        assert_eq!(Some("HarperCollins, Unwin"), record.publisher.as_deref());
        assert_eq!(Some("1997"), record.published_date.as_deref());
        assert_eq!(Some(310), record.page_count);
        assert_eq!(
            Some("Fantasy, Middle Earth (Imaginary place)"),
            record.categories.as_deref()
        );
        assert_eq!(
            Some("https://openlibrary.org/books/OL9176004M/The_Hobbit"),
            record.link()
        );
        assert_eq!(
            Some("https://covers.openlibrary.org/b/id/6979861-L.jpg"),
            record.cover()
        );
        assert_eq!(None, record.language);
    }

    #[test]
    fn null_lists_are_treated_as_missing() {
        let record = super::get_book_info::<MockClient<NullListsProducer>>("0000000000")
            .expect("null lists are not an error")
            .expect("NullListsProducer has a book under the requested key");

        assert_eq!(Some("T"), record.title.as_deref());
        assert_eq!(None, record.authors);
        assert_eq!(Some("Unwin"), record.publisher.as_deref());
        assert_eq!(None, record.categories);
    }
}
