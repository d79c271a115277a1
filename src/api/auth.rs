use async_trait::async_trait;
use log::trace;
use reqwest;
use serde::Deserialize;

use crate::error::Error;
use crate::models::{AuthResponse, LoginCredentials, RegisterCredentials, User};

use super::AuthApi;

pub const DEFAULT_BASE: &str = "http://localhost:4000/users";

pub struct Auth {
    base: String,
    client: reqwest::Client,
}

impl Auth {
    pub fn new(base: impl Into<String>) -> Auth {
        Auth {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for Auth {
    fn default() -> Auth {
        Auth::new(DEFAULT_BASE)
    }
}

#[derive(Deserialize)]
struct ValidateResponse {
    user: User,
}

#[async_trait]
impl AuthApi for Auth {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, Error> {
        trace!("Auth::login()");

        let url = format!("{}/login", self.base);
        let response = self.client.post(&url).json(credentials).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(serde_json::from_str::<AuthResponse>(&body)?)
    }

    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthResponse, Error> {
        trace!("Auth::register()");

        let url = format!("{}/register", self.base);
        let response = self.client.post(&url).json(credentials).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(serde_json::from_str::<AuthResponse>(&body)?)
    }

    async fn validate_token(&self, token: &str) -> Result<User, Error> {
        trace!("Auth::validate_token()");

        let url = format!("{}/validate", self.base);
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let validated = serde_json::from_str::<ValidateResponse>(&body)?;

        Ok(validated.user)
    }
}
