use garde::Validate;
use serde::{Deserialize, Serialize};

/// A stored review as the review store returns it.
///
/// Anything this client submits satisfies `rating` in 1..=5 and a review
/// text of at most 200 characters. Rows written before those rules may be
/// longer, they are still displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub user_id: i64,
    pub review_text: String,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Create body. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: String,
    pub user_id: i64,
    pub review_text: String,
    pub rating: i32,
}

/// Partial update body. Only rating and text are mutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

/// Unsaved composition state, used both for a new review and for an open
/// edit. Never owns an id.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ReviewDraft {
    #[garde(range(min = 1, max = 5))]
    pub rating: i32,
    #[garde(length(chars, max = 200))]
    pub text: String,
}

impl Default for ReviewDraft {
    fn default() -> ReviewDraft {
        ReviewDraft {
            rating: 1,
            text: String::new(),
        }
    }
}

impl ReviewDraft {
    pub fn from_review(review: &Review) -> ReviewDraft {
        ReviewDraft {
            rating: review.rating,
            text: review.review_text.clone(),
        }
    }
}
