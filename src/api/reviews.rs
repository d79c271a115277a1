use async_trait::async_trait;
use log::{error, trace};
use reqwest;

use crate::error::Error;
use crate::models::{NewReview, Review, ReviewPatch};

use super::ReviewApi;

pub const DEFAULT_BASE: &str = "http://localhost:4000/reviews";

pub struct Reviews {
    base: String,
    client: reqwest::Client,
}

impl Reviews {
    pub fn new(base: impl Into<String>) -> Reviews {
        Reviews {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for Reviews {
    fn default() -> Reviews {
        Reviews::new(DEFAULT_BASE)
    }
}

#[async_trait]
impl ReviewApi for Reviews {
    async fn list_for_book(&self, book_id: &str) -> Vec<Review> {
        trace!("Reviews::list_for_book()");

        let url = format!("{}/book/{}", self.base, book_id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                error!("review list fetch failed: {}", err);
                return vec![];
            }
        };

        let status = response.status().as_u16();

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                error!("review list body read failed: {}", err);
                return vec![];
            }
        };

        reviews_from_response(status, &body)
    }

    async fn create(&self, review: &NewReview) -> Result<Review, Error> {
        trace!("Reviews::create()");

        let response = self.client.post(&self.base).json(review).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: self.base.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(serde_json::from_str::<Review>(&body)?)
    }

    async fn update(&self, review_id: &str, patch: &ReviewPatch) -> Result<Review, Error> {
        trace!("Reviews::update()");

        let url = format!("{}/{}", self.base, review_id);
        let response = self.client.patch(&url).json(patch).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(serde_json::from_str::<Review>(&body)?)
    }

    async fn delete(&self, review_id: &str) -> Result<(), Error> {
        trace!("Reviews::delete()");

        let url = format!("{}/{}", self.base, review_id);
        let response = self.client.delete(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

/// The read path never surfaces an error: 404 is "no reviews yet", and any
/// other broken response degrades to an empty list rather than failing the
/// whole view.
pub fn reviews_from_response(status: u16, body: &str) -> Vec<Review> {
    if status == 404 {
        return vec![];
    }

    if !(200..300).contains(&status) {
        error!("review list request returned status {}", status);
        return vec![];
    }

    match serde_json::from_str::<Vec<Review>>(body) {
        Ok(reviews) => reviews,
        Err(err) => {
            error!("review list body did not parse: {}", err);
            vec![]
        }
    }
}
