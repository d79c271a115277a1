use async_trait::async_trait;
use log::trace;
use reqwest;
use serde_json::Value;

use crate::error::Error;
use crate::models::{
    AggregateRating, Book, BookRecord, NO_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_PUBLISHED_DATE,
    UNKNOWN_TITLE,
};

use super::CatalogApi;

pub const DEFAULT_BASE: &str = "https://www.googleapis.com/books/v1";

pub struct Catalog {
    base: String,
    client: reqwest::Client,
}

impl Catalog {
    pub fn new(base: impl Into<String>) -> Catalog {
        Catalog {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Catalog {
        Catalog::new(DEFAULT_BASE)
    }
}

#[async_trait]
impl CatalogApi for Catalog {
    async fn fetch_book(&self, id: &str) -> Result<BookRecord, Error> {
        trace!("Catalog::fetch_book()");

        let url = format!("{}/volumes/{}", self.base, id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let value = serde_json::from_str::<Value>(&body)?;

        volume_record(&value)
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, Error> {
        trace!("Catalog::search()");

        let url = format!("{}/volumes", self.base);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let value = serde_json::from_str::<Value>(&body)?;

        let items = match value.get("items").and_then(Value::as_array) {
            Some(items) => items,
            None => return Ok(vec![]),
        };

        items
            .iter()
            .map(|item| volume_record(item).map(|record| record.book))
            .collect()
    }
}

/// ```json
/// // Response of {base}/volumes/zyTCAlFPjgYC (truncated)
/// {
///   "id": "zyTCAlFPjgYC",
///   "volumeInfo": {
///     "title": "The Google Story",
///     "authors": ["David A. Vise", "Mark Malseed"],
///     "publishedDate": "2005-11-15",
///     "description": "Here is the story behind one of the most ...",
///     "imageLinks": {
///       "smallThumbnail": "http://books.google.com/books/content?id=zyTCAlFPjgYC&zoom=5",
///       "thumbnail": "http://books.google.com/books/content?id=zyTCAlFPjgYC&zoom=1"
///     },
///     "averageRating": 3.5,
///     "ratingsCount": 136
///   }
/// }
/// ```
pub fn volume_record(value: &Value) -> Result<BookRecord, Error> {
    let info = value
        .get("volumeInfo")
        .ok_or(Error::MissingField("volumeInfo"))?;

    let authors = info
        .get("authors")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .filter(|authors| !authors.is_empty())
        .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]);

    let image_links = info.get("imageLinks");

    let book = Book {
        id: value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        title: str_or(info, "title", UNKNOWN_TITLE),
        authors,
        published_date: str_or(info, "publishedDate", UNKNOWN_PUBLISHED_DATE),
        description: str_or(info, "description", NO_DESCRIPTION),
        thumbnail: image_links
            .map(|links| str_or(links, "thumbnail", ""))
            .unwrap_or_default(),
        small_thumbnail: image_links
            .map(|links| str_or(links, "smallThumbnail", ""))
            .unwrap_or_default(),
    };

    // a zero vote count means no catalog rating at all, not a zero rating
    let count = info.get("ratingsCount").and_then(Value::as_u64).unwrap_or(0);
    let rating = if count > 0 {
        Some(AggregateRating {
            average: info
                .get("averageRating")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            count: count as u32,
        })
    } else {
        None
    };

    Ok(BookRecord { book, rating })
}

fn str_or(value: &Value, key: &str, fallback: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}
