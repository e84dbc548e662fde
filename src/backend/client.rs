use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::resources::{Databases, Messaging, Storage, Users};
use super::BackendError;
use crate::config::BackendConfig;

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// Bound on establishing a TCP connection. Requests themselves have no
/// deadline; a slow backend holds the page render open.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Authenticated client for the managed backend.
///
/// Cloning is cheap: the endpoint and project id are shared, and
/// `reqwest::Client` is itself reference-counted.
#[derive(Clone)]
pub struct Backend {
    endpoint: Arc<Url>,
    project_id: Arc<str>,
    http: reqwest::Client,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("endpoint", &self.endpoint.as_str())
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// Build the client. Fails on an unusable endpoint or a credential
    /// that cannot be sent as a header.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let trimmed = config.endpoint.trim().trim_end_matches('/');
        let endpoint = Url::parse(trimmed)
            .map_err(|e| BackendError::InvalidEndpoint(format!("{trimmed}: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(BackendError::InvalidEndpoint(trimmed.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value(&config.project_id, BackendConfig::PROJECT_VAR)?,
        );
        let mut key = header_value(&config.api_key, BackendConfig::API_KEY_VAR)?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(KEY_HEADER), key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| BackendError::Http(e.to_string()))?;

        tracing::info!(endpoint = %endpoint, project = %config.project_id, "Backend client ready");

        Ok(Self {
            endpoint: Arc::new(endpoint),
            project_id: Arc::from(config.project_id.as_str()),
            http,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn databases(&self) -> Databases {
        Databases::new(self.clone())
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.clone())
    }

    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    pub fn messaging(&self) -> Messaging {
        Messaging::new(self.clone())
    }

    // ── Transport ───────────────────────────────────────────

    /// Endpoint URL with `segments` appended, each percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = (*self.endpoint).clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON resource. A 404 is `Ok(None)`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, BackendError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "Backend GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }

    /// POST a JSON body and decode the JSON reply.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "Backend POST");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        read_json(response).await
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::Connection(self.endpoint.to_string())
        } else if e.is_timeout() {
            BackendError::Http(format!("Request timed out: {e}"))
        } else {
            BackendError::Http(e.to_string())
        }
    }
}

fn header_value(value: &str, var: &'static str) -> Result<HeaderValue, BackendError> {
    HeaderValue::from_str(value.trim()).map_err(|_| BackendError::InvalidCredential(var))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| BackendError::ResponseParsing(e.to_string()))
}
