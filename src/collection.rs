use std::collections::HashSet;

use log::trace;

use crate::form::{validate, ValidationErrors};
use crate::models::{Review, ReviewDraft};
use crate::utils::TextUtil;

/// Review bodies longer than this render as a preview with a read-more
/// affordance.
pub const PREVIEW_CHARS: usize = 50;

/// The one review currently in editing mode, with its captured draft and
/// live error state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub review_id: String,
    pub draft: ReviewDraft,
    pub errors: ValidationErrors,
}

/// In-memory reviews for the current book.
///
/// Mutations mirror confirmed store operations only: the caller applies
/// `add_local` / `replace_local` / `remove_local` after the corresponding
/// network call resolves, never before.
#[derive(Debug, Default)]
pub struct ReviewCollection {
    reviews: Vec<Review>,
    expanded: HashSet<String>,
    edit: Option<EditSession>,
}

impl ReviewCollection {
    pub fn new() -> ReviewCollection {
        ReviewCollection::default()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn get(&self, review_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id == review_id)
    }

    /// Replaces the whole list, dropping per-review presentation and edit
    /// state along with it.
    pub fn set_all(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
        self.expanded.clear();
        self.edit = None;
    }

    pub fn clear(&mut self) {
        self.set_all(vec![]);
    }

    pub fn add_local(&mut self, review: Review) {
        self.reviews.push(review);
    }

    pub fn replace_local(&mut self, review_id: &str, updated: Review) {
        if let Some(slot) = self
            .reviews
            .iter_mut()
            .find(|review| review.id == review_id)
        {
            *slot = updated;
        }
    }

    pub fn remove_local(&mut self, review_id: &str) {
        self.reviews.retain(|review| review.id != review_id);
        self.expanded.remove(review_id);

        if self
            .edit
            .as_ref()
            .is_some_and(|edit| edit.review_id == review_id)
        {
            self.edit = None;
        }
    }

    /// display -> editing. Captures the review's current rating and text
    /// into a fresh draft. An edit already open on another review is closed
    /// first, only one review is ever in editing mode.
    pub fn open_edit(&mut self, review_id: &str) -> bool {
        trace!("ReviewCollection::open_edit()");

        let review = match self.get(review_id) {
            Some(review) => review,
            None => return false,
        };

        let draft = ReviewDraft::from_review(review);
        let errors = validate(&draft);

        self.edit = Some(EditSession {
            review_id: review_id.to_string(),
            draft,
            errors,
        });

        true
    }

    /// editing -> display without saving.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn edit(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub(crate) fn edit_mut(&mut self) -> Option<&mut EditSession> {
        self.edit.as_mut()
    }

    pub fn is_editing(&self, review_id: &str) -> bool {
        self.edit
            .as_ref()
            .is_some_and(|edit| edit.review_id == review_id)
    }

    /// Read-more toggle. Presentation only, stored text is never touched.
    pub fn toggle_expanded(&mut self, review_id: &str) {
        if !self.expanded.remove(review_id) {
            self.expanded.insert(review_id.to_string());
        }
    }

    /// Body text as the view shows it: full when expanded or short enough,
    /// otherwise a preview.
    pub fn display_text(&self, review: &Review) -> String {
        if self.expanded.contains(&review.id) {
            return review.review_text.clone();
        }

        review
            .review_text
            .preview(PREVIEW_CHARS)
            .unwrap_or_else(|| review.review_text.clone())
    }

    /// Whether the read-more affordance is currently shown for a review.
    pub fn is_truncated(&self, review: &Review) -> bool {
        !self.expanded.contains(&review.id)
            && review.review_text.chars().count() > PREVIEW_CHARS
    }
}
