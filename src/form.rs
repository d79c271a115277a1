use garde::Validate;

use crate::models::ReviewDraft;

pub const RATING_MESSAGE: &str = "Rating must be between 1 and 5.";
pub const TEXT_MESSAGE: &str = "Review text must be at most 200 characters.";

/// Field-level error state for the review form. A `None` key means that
/// field is currently valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub rating: Option<String>,
    pub text: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.text.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Rating,
    Text,
}

/// Recomputes both error keys from the draft's current values. Never
/// mutates the draft.
pub fn validate(draft: &ReviewDraft) -> ValidationErrors {
    match Validate::validate(draft) {
        Ok(()) => ValidationErrors::default(),
        Err(report) => ValidationErrors {
            rating: key_error(&report, Field::Rating),
            text: key_error(&report, Field::Text),
        },
    }
}

/// Live-validation reducer: exactly the changed field's key is recomputed
/// from the draft, the other key is carried over as it was.
pub fn revalidate(
    current: &ValidationErrors,
    field: Field,
    draft: &ReviewDraft,
) -> ValidationErrors {
    let changed = match Validate::validate(draft) {
        Ok(()) => None,
        Err(report) => key_error(&report, field),
    };

    match field {
        Field::Rating => ValidationErrors {
            rating: changed,
            text: current.text.clone(),
        },
        Field::Text => ValidationErrors {
            rating: current.rating.clone(),
            text: changed,
        },
    }
}

fn key_error(report: &garde::Report, field: Field) -> Option<String> {
    let (key, message) = match field {
        Field::Rating => ("rating", RATING_MESSAGE),
        Field::Text => ("text", TEXT_MESSAGE),
    };

    report
        .iter()
        .any(|(path, _)| path.to_string() == key)
        .then(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use crate::models::ReviewDraft;

    use super::{revalidate, validate, Field};

    fn draft(rating: i32, text: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            text: text.to_string(),
        }
    }

    #[test]
    fn rating_error_iff_out_of_range() -> anyhow::Result<()> {
        for rating in -10..=20 {
            let errors = validate(&draft(rating, "ok"));

            let expected = !(1..=5).contains(&rating);

            assert_eq!(expected, errors.rating.is_some(), "rating = {}", rating);
        }

        Ok(())
    }

    #[test]
    fn text_error_iff_longer_than_200_chars() -> anyhow::Result<()> {
        let errors = validate(&draft(3, &"a".repeat(200)));
        assert_eq!(None, errors.text);

        let errors = validate(&draft(3, &"a".repeat(201)));
        assert_eq!(true, errors.text.is_some());

        // counted in chars, not bytes
        let errors = validate(&draft(3, &"ö".repeat(200)));
        assert_eq!(None, errors.text);

        let errors = validate(&draft(3, &"ö".repeat(201)));
        assert_eq!(true, errors.text.is_some());

        Ok(())
    }

    #[test]
    fn empty_text_is_valid() -> anyhow::Result<()> {
        let errors = validate(&draft(1, ""));

        assert_eq!(true, errors.is_empty());

        Ok(())
    }

    #[test]
    fn default_draft_is_valid() -> anyhow::Result<()> {
        let errors = validate(&ReviewDraft::default());

        assert_eq!(true, errors.is_empty());

        Ok(())
    }

    #[test]
    fn revalidate_only_touches_the_changed_field() -> anyhow::Result<()> {
        let mut d = draft(0, &"a".repeat(201));
        let errors = validate(&d);
        assert_eq!(true, errors.rating.is_some() && errors.text.is_some());

        // fixing the rating clears its key, the stale text error survives
        d.rating = 4;
        let errors = revalidate(&errors, Field::Rating, &d);
        assert_eq!(None, errors.rating);
        assert_eq!(Some(super::TEXT_MESSAGE.to_string()), errors.text);

        // fixing the text clears the rest
        d.text = String::from("short enough");
        let errors = revalidate(&errors, Field::Text, &d);
        assert_eq!(true, errors.is_empty());

        Ok(())
    }

    #[test]
    fn revalidate_keeps_an_unrelated_error_intact() -> anyhow::Result<()> {
        let mut d = draft(0, "fine");
        let errors = validate(&d);

        d.text = String::from("still fine");
        let errors = revalidate(&errors, Field::Text, &d);

        let expected = Some(super::RATING_MESSAGE.to_string());

        assert_eq!(expected, errors.rating);
        assert_eq!(None, errors.text);

        Ok(())
    }
}
