use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::BackendConfig;
use crate::error::{BackendError, error_message};
use crate::rest::TableQuery;

/// Client for the hosted platform's auth, table, and RPC endpoints.
///
/// Clones share one connection pool. The bearer token defaults to the anon
/// key; see [`BackendClient::with_access_token`] and
/// [`BackendClient::service_role`].
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
    credential: Credential,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
    service_role_key: Option<SecretString>,
}

#[derive(Clone)]
enum Credential {
    Anon,
    User(SecretString),
    ServiceRole,
}

/// Which gateway produced an error; decides the [`BackendError`] variant.
#[derive(Clone, Copy)]
pub(crate) enum Surface {
    Auth,
    Rest,
}

impl BackendClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.url.clone(),
                anon_key: config.anon_key.clone(),
                service_role_key: config.service_role_key.clone(),
            }),
            credential: Credential::Anon,
        })
    }

    /// A client that acts as the signed-in user owning `access_token`.
    ///
    /// Row-level security on the platform then sees that user's claims.
    #[must_use]
    pub fn with_access_token(&self, access_token: &SecretString) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            credential: Credential::User(access_token.clone()),
        }
    }

    /// A client that acts with the service-role key.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingServiceKey`] if no key is configured.
    pub fn service_role(&self) -> Result<Self, BackendError> {
        if self.inner.service_role_key.is_none() {
            return Err(BackendError::MissingServiceKey);
        }
        Ok(Self {
            inner: Arc::clone(&self.inner),
            credential: Credential::ServiceRole,
        })
    }

    /// Whether a service-role key is configured.
    #[must_use]
    pub fn has_service_role(&self) -> bool {
        self.inner.service_role_key.is_some()
    }

    /// Start a query against a table.
    #[must_use]
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// Call a remote procedure and decode its result.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the gateway rejects it, or the
    /// result does not decode as `T`.
    #[tracing::instrument(skip(self, args), fields(rpc = %name))]
    pub async fn rpc<T: DeserializeOwned>(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(&format!("rest/v1/rpc/{name}"))?;
        let response = self
            .request(Method::POST, url)
            .json(args)
            .send()
            .await?;
        let response = Self::check(response, Surface::Rest).await?;
        decode_json(response).await
    }

    /// Resolve a path relative to the project base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Build a request carrying `apikey` and `Authorization` for the
    /// current credential.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let (apikey, bearer) = match &self.credential {
            Credential::Anon => (&self.inner.anon_key, &self.inner.anon_key),
            Credential::User(token) => (&self.inner.anon_key, token),
            Credential::ServiceRole => {
                // Checked in `service_role()`.
                let key = self
                    .inner
                    .service_role_key
                    .as_ref()
                    .unwrap_or(&self.inner.anon_key);
                (key, key)
            }
        };

        self.inner
            .client
            .request(method, url)
            .header("apikey", apikey.expose_secret())
            .header(AUTHORIZATION, format!("Bearer {}", bearer.expose_secret()))
    }

    /// Turn a non-success response into the matching [`BackendError`].
    pub(crate) async fn check(
        response: Response,
        surface: Surface,
    ) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let fallback = status.canonical_reason().unwrap_or("request failed");
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, fallback);
        tracing::debug!(status = status.as_u16(), %message, "Backend rejected request");

        Err(match surface {
            Surface::Auth => BackendError::Auth {
                status: status.as_u16(),
                message,
            },
            Surface::Rest => BackendError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Decode a JSON response body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: Response,
) -> Result<T, BackendError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}
