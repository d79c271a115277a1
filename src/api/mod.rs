use async_trait::async_trait;

mod auth;
mod catalog;
mod reviews;

pub use auth::Auth;
pub use catalog::{volume_record, Catalog};
pub use reviews::{reviews_from_response, Reviews};

use crate::error::Error;
use crate::models::{
    AuthResponse, Book, BookRecord, LoginCredentials, NewReview, RegisterCredentials, Review,
    ReviewPatch, User,
};

/// Read side of the external catalog service.
#[async_trait]
pub trait CatalogApi {
    /// One volume by id, single attempt. Any non-success status, transport
    /// error, or unusable body is an error, the caller must not fall back
    /// to stale data.
    async fn fetch_book(&self, id: &str) -> Result<BookRecord, Error>;

    async fn search(&self, query: &str) -> Result<Vec<Book>, Error>;
}

/// CRUD against the review store, scoped by book id or review id. All
/// operations are single attempt, no retry or backoff.
#[async_trait]
pub trait ReviewApi {
    /// "No reviews yet" is not exceptional: 404, any other non-success
    /// status, and an unparseable body all degrade to an empty list.
    async fn list_for_book(&self, book_id: &str) -> Vec<Review>;

    /// The id is server-assigned, nothing may assume one before this
    /// resolves.
    async fn create(&self, review: &NewReview) -> Result<Review, Error>;

    async fn update(&self, review_id: &str, patch: &ReviewPatch) -> Result<Review, Error>;

    async fn delete(&self, review_id: &str) -> Result<(), Error>;
}

/// Authentication collaborator. The review core only reads the signed-in
/// identity out of it to gate writes.
#[async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, Error>;

    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthResponse, Error>;

    async fn validate_token(&self, token: &str) -> Result<User, Error>;
}
