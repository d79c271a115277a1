use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown title";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const UNKNOWN_PUBLISHED_DATE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";

/// One catalog volume. Every field is filled in at parse time, missing
/// optional fields become the fixed placeholders above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published_date: String,
    pub description: String,
    pub thumbnail: String,
    pub small_thumbnail: String,
}

/// Catalog-side rating. Present only when the catalog reports at least one
/// vote, a zero count means no rating at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateRating {
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub book: Book,
    pub rating: Option<AggregateRating>,
}
