//! REST-backed backend implementation.

use async_trait::async_trait;

use curia_core::traits::Backend;
use curia_core::{AccessToken, ApiUrl, Credentials, Error, Result};

use crate::client::RestClient;
use crate::session::HttpSession;
use crate::wire::{LoginRequest, LoginResponse};

/// Endpoint for administrator login.
const LOGIN: &str = "user/login";

/// A network-backed admin API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    api: ApiUrl,
    client: RestClient,
}

impl HttpBackend {
    /// Create a new backend for the given API base URL.
    pub fn new(api: ApiUrl) -> Self {
        let client = RestClient::new(api.clone());
        Self { api, client }
    }

    /// Returns the API base URL for this instance.
    pub fn url(&self) -> &ApiUrl {
        &self.api
    }
}

#[async_trait]
impl Backend for HttpBackend {
    type Session = HttpSession;

    async fn login(&self, credentials: Credentials) -> Result<Self::Session> {
        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
            mode: "website",
        };

        let response: LoginResponse = self.client.post(LOGIN, &request).await?;

        if !response.success {
            return Err(Error::auth("invalid email or password"));
        }

        let token = response
            .access_token
            .map(AccessToken::new)
            .ok_or_else(|| Error::network("login response carried no access token"))?;

        let account = response
            .user
            .ok_or_else(|| Error::network("login response carried no user"))?
            .key("_id")?;

        Ok(HttpSession::new(self.client.clone(), account, token))
    }
}
