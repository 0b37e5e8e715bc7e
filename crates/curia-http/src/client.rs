//! HTTP client for the admin REST API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use curia_core::{ApiUrl, Error};

use crate::wire::ApiErrorBody;

/// Thin wrapper over reqwest that speaks the API's JSON envelope and folds
/// every failure into the core error taxonomy at this boundary.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl RestClient {
    /// Create a new client for the given API base URL.
    pub(crate) fn new(api: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("curia/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, api }
    }

    pub(crate) fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Unauthenticated POST, for login.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Authenticated GET.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub(crate) async fn get_authed<R>(&self, path: &str, token: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "GET");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Authenticated PUT with a JSON body.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub(crate) async fn put_authed<B, R>(&self, path: &str, body: &B, token: &str) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "PUT");

        let response = self
            .client
            .put(&url)
            .json(body)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Authenticated DELETE; the response body is discarded.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub(crate) async fn delete_authed(&self, path: &str, token: &str) -> Result<(), Error> {
        let url = self.api.endpoint(path);
        debug!(path, "DELETE");

        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Fold a non-2xx response into the error taxonomy, carrying the
    /// server's `message` where it sent one.
    async fn error_from_response(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Error::auth(message),
            404 => Error::not_found(message),
            400 | 422 => Error::validation(message),
            _ => Error::network(if message.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {message}")
            }),
        }
    }
}

/// Fold a reqwest failure into the taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::network("request timed out")
    } else if err.is_connect() {
        Error::network(format!("connection failed: {err}"))
    } else {
        Error::network(err.to_string())
    }
}
