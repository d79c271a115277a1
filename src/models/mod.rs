mod book;
mod review;
mod user;

pub use book::{
    AggregateRating, Book, BookRecord, NO_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_PUBLISHED_DATE,
    UNKNOWN_TITLE,
};
pub use review::{NewReview, Review, ReviewDraft, ReviewPatch};
pub use user::{AuthResponse, LoginCredentials, RegisterCredentials, User};
