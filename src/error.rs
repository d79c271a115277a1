use crate::form::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing `{0}` in response body")]
    MissingField(&'static str),

    #[error("review form has invalid fields")]
    Invalid(ValidationErrors),

    #[error("sign in to write a review")]
    AuthRequired,

    #[error("no book is loaded")]
    NoBook,

    #[error("no review is being edited")]
    NoActiveEdit,
}
