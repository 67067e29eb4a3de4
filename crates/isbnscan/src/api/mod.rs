use serde::{de::DeserializeOwned, Deserialize, Deserializer};

pub(crate) mod google_books;
pub(crate) mod open_library;

/// Blocking HTTP access used by the provider lookups.
pub trait Client
where
    Self: Default,
{
    /// GET `url` and deserialize the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::IO`] error when the request fails or the status is not a success,
    /// and an [`ErrorKind::Deserialize`] error when the body is not the expected JSON.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

/// Reads an explicit `null` the same way `#[serde(default)]` reads a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
pub(crate) use test::{
    assert_urls, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK,
};

use crate::{Error, ErrorKind};
