use log::{error, info, trace};

use crate::api::{CatalogApi, ReviewApi};
use crate::collection::ReviewCollection;
use crate::error::Error;
use crate::form::{self, Field, ValidationErrors};
use crate::models::{
    AggregateRating, Book, BookRecord, NewReview, Review, ReviewDraft, ReviewPatch, User,
};

/// Render state of the detail view. A failed book fetch is fatal to the
/// view, there is no partial rendering around a missing book.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error,
    Ready {
        book: Book,
        rating: Option<AggregateRating>,
    },
}

/// Identity of one mount fetch. A completion holding a superseded token is
/// discarded instead of applied, so a slow response for a book the user has
/// already navigated away from never clobbers the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadToken {
    seq: u64,
    book_id: String,
}

impl LoadToken {
    pub fn book_id(&self) -> &str {
        &self.book_id
    }
}

/// What one mount fetch produced. The review side cannot fail, a broken
/// list read arrives here as an empty list.
#[derive(Debug)]
pub struct LoadOutcome {
    pub book: Result<BookRecord, Error>,
    pub reviews: Vec<Review>,
}

/// New-review composition state: the draft plus its live error mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composer {
    pub draft: ReviewDraft,
    pub errors: ValidationErrors,
}

/// Orchestrates one book detail view: loads book metadata and reviews,
/// owns the new-review composer, and runs every write through the auth and
/// validation gates. Local review state changes only after the store
/// confirms (confirm-then-apply, never optimistic).
pub struct BookDetail<C, R> {
    catalog: C,
    store: R,
    seq: u64,
    current: Option<LoadToken>,
    state: ViewState,
    reviews: ReviewCollection,
    composer: Composer,
}

impl<C: CatalogApi, R: ReviewApi> BookDetail<C, R> {
    pub fn new(catalog: C, store: R) -> BookDetail<C, R> {
        BookDetail {
            catalog,
            store,
            seq: 0,
            current: None,
            state: ViewState::Loading,
            reviews: ReviewCollection::new(),
            composer: Composer::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn reviews(&self) -> &ReviewCollection {
        &self.reviews
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Starts a mount fetch. The view drops back to Loading, local state
    /// from the previous book is discarded, and any fetch still in flight
    /// is superseded.
    pub fn begin_load(&mut self, book_id: &str) -> LoadToken {
        trace!("BookDetail::begin_load()");

        self.seq += 1;
        let token = LoadToken {
            seq: self.seq,
            book_id: book_id.to_string(),
        };

        self.current = Some(token.clone());
        self.state = ViewState::Loading;
        self.reviews.clear();
        self.composer = Composer::default();

        token
    }

    /// The fetch itself, touching no view state. Book metadata and the
    /// review list load concurrently, each a single attempt.
    pub async fn fetch(&self, token: &LoadToken) -> LoadOutcome {
        trace!("BookDetail::fetch()");

        let (book, reviews) = tokio::join!(
            self.catalog.fetch_book(&token.book_id),
            self.store.list_for_book(&token.book_id),
        );

        LoadOutcome { book, reviews }
    }

    /// Applies a finished fetch. Returns false when the token was
    /// superseded and the outcome was discarded.
    pub fn finish_load(&mut self, token: &LoadToken, outcome: LoadOutcome) -> bool {
        trace!("BookDetail::finish_load()");

        if self.current.as_ref() != Some(token) {
            info!("discarding stale load for book {}", token.book_id);
            return false;
        }

        match outcome.book {
            Ok(record) => {
                self.reviews.set_all(outcome.reviews);
                self.state = ViewState::Ready {
                    book: record.book,
                    rating: record.rating,
                };
            }
            Err(err) => {
                error!("book fetch failed: {}", err);
                self.state = ViewState::Error;
            }
        }

        true
    }

    /// The common mount path: begin, fetch, apply.
    pub async fn load(&mut self, book_id: &str) {
        let token = self.begin_load(book_id);
        let outcome = self.fetch(&token).await;
        self.finish_load(&token, outcome);
    }

    pub fn rating_changed(&mut self, rating: i32) {
        self.composer.draft.rating = rating;
        self.composer.errors =
            form::revalidate(&self.composer.errors, Field::Rating, &self.composer.draft);
    }

    pub fn text_changed(&mut self, text: impl Into<String>) {
        self.composer.draft.text = text.into();
        self.composer.errors =
            form::revalidate(&self.composer.errors, Field::Text, &self.composer.draft);
    }

    /// Submit control state: disabled whenever any error key is present.
    pub fn can_submit(&self) -> bool {
        self.composer.errors.is_empty()
    }

    /// Add-review flow. Refused without a signed-in user and refused with a
    /// dirty form, in both cases before any network call. On confirmation
    /// the new row is appended and the composer resets to its defaults.
    pub async fn submit(&mut self, user: Option<&User>) -> Result<Review, Error> {
        trace!("BookDetail::submit()");

        let user = user.ok_or(Error::AuthRequired)?;

        let book_id = match &self.state {
            ViewState::Ready { book, .. } => book.id.clone(),
            _ => return Err(Error::NoBook),
        };

        let errors = form::validate(&self.composer.draft);
        if !errors.is_empty() {
            self.composer.errors = errors.clone();
            return Err(Error::Invalid(errors));
        }

        let new = NewReview {
            book_id,
            user_id: user.id,
            review_text: self.composer.draft.text.clone(),
            rating: self.composer.draft.rating,
        };

        let created = self.store.create(&new).await?;
        info!("review {} created for book {}", created.id, created.book_id);

        self.reviews.add_local(created.clone());
        self.composer = Composer::default();

        Ok(created)
    }

    pub fn open_edit(&mut self, review_id: &str) -> bool {
        self.reviews.open_edit(review_id)
    }

    pub fn cancel_edit(&mut self) {
        self.reviews.cancel_edit()
    }

    pub fn edit_rating_changed(&mut self, rating: i32) {
        if let Some(edit) = self.reviews.edit_mut() {
            edit.draft.rating = rating;
            edit.errors = form::revalidate(&edit.errors, Field::Rating, &edit.draft);
        }
    }

    pub fn edit_text_changed(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.reviews.edit_mut() {
            edit.draft.text = text.into();
            edit.errors = form::revalidate(&edit.errors, Field::Text, &edit.draft);
        }
    }

    pub fn can_save_edit(&self) -> bool {
        self.reviews
            .edit()
            .is_some_and(|edit| edit.errors.is_empty())
    }

    /// Saves the active edit through the same gates as submit. Only rating
    /// and text go over the wire, and the local row is replaced with the
    /// confirmed response before the session closes.
    pub async fn save_edit(&mut self, user: Option<&User>) -> Result<Review, Error> {
        trace!("BookDetail::save_edit()");

        user.ok_or(Error::AuthRequired)?;

        let (review_id, draft) = match self.reviews.edit() {
            Some(edit) => (edit.review_id.clone(), edit.draft.clone()),
            None => return Err(Error::NoActiveEdit),
        };

        let errors = form::validate(&draft);
        if !errors.is_empty() {
            if let Some(edit) = self.reviews.edit_mut() {
                edit.errors = errors.clone();
            }
            return Err(Error::Invalid(errors));
        }

        let patch = ReviewPatch {
            review_text: Some(draft.text),
            rating: Some(draft.rating),
        };

        let updated = self.store.update(&review_id, &patch).await?;
        info!("review {} updated", updated.id);

        self.reviews.replace_local(&review_id, updated.clone());
        self.reviews.cancel_edit();

        Ok(updated)
    }

    /// Delete flow. A delete is a write, so it takes the same auth gate,
    /// and the row leaves local state only once the store confirms.
    pub async fn delete_review(&mut self, user: Option<&User>, review_id: &str) -> Result<(), Error> {
        trace!("BookDetail::delete_review()");

        user.ok_or(Error::AuthRequired)?;

        self.store.delete(review_id).await?;
        info!("review {} deleted", review_id);

        self.reviews.remove_local(review_id);

        Ok(())
    }

    pub fn toggle_review_text(&mut self, review_id: &str) {
        self.reviews.toggle_expanded(review_id);
    }
}
