//! # Request Transport
//!
//! [`MarketplaceApi`] turns validated domain values into HTTP calls against the
//! configured base endpoint and normalizes every outcome into [`ApiResult`].
//! Nothing here panics or throws: transport errors, non-2xx statuses and
//! undecodable bodies all become an [`ApiError`] value.
//!
//! Each call is a single attempt. There is no retry, caching or
//! de-duplication.

mod collection;
mod submit;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpError, HttpMethod, HttpRequest, ReqwestHttpClient};
use crate::{CoreError, Parcel, Ride};

pub use collection::{Collection, Resource};
pub use submit::{CreatedResource, SubmitError};

/// Outcome of one transport operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No HTTP response was received. Status is `0`.
    Network,
    /// The backend answered outside the 2xx range.
    Status,
    /// A 2xx body did not match the expected resource shape.
    Decode,
    /// The request body could not be serialized. Status is `0`.
    Encode,
    /// The call was rejected before reaching the network. Status is `0`.
    Invalid,
}

impl ApiErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Invalid => "invalid",
        }
    }
}

/// Normalized transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub kind: ApiErrorKind,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind,
        }
    }

    pub fn network(error: &HttpError) -> Self {
        Self::new(ApiErrorKind::Network, 0, error.message())
    }

    /// Builds a status failure, preferring the message the backend put in `body`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::new(ApiErrorKind::Status, status, message)
    }

    pub fn decode(status: u16, error: &serde_json::Error) -> Self {
        Self::new(
            ApiErrorKind::Decode,
            status,
            format!("failed to decode response: {error}"),
        )
    }

    pub fn encode(error: &serde_json::Error) -> Self {
        Self::new(
            ApiErrorKind::Encode,
            0,
            format!("failed to encode request: {error}"),
        )
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Invalid, 0, message)
    }

    pub const fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Presentation shape of a transport outcome:
/// `{ "ok": true, "data": ... }` or `{ "ok": false, "status": .., "message": .. }`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiReport<'a, T> {
    Success { ok: bool, data: &'a T },
    Failure {
        ok: bool,
        status: u16,
        message: &'a str,
        kind: ApiErrorKind,
    },
}

impl<'a, T> From<&'a ApiResult<T>> for ApiReport<'a, T> {
    fn from(result: &'a ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self::Success { ok: true, data },
            Err(error) => Self::Failure {
                ok: false,
                status: error.status,
                message: &error.message,
                kind: error.kind,
            },
        }
    }
}

/// Client for the ride and parcel marketplace backend.
#[derive(Clone)]
pub struct MarketplaceApi {
    config: ClientConfig,
    http_client: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for MarketplaceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceApi")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MarketplaceApi {
    /// Uses the production reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::new());
        Self {
            config,
            http_client,
        }
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Client bound to the process-wide configuration.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::global().clone())
    }

    /// Client for an explicit base endpoint, e.g. a command-line override.
    pub fn for_base_url(base_url: &str) -> Result<Self, CoreError> {
        Ok(Self::new(ClientConfig::new(base_url)?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rides(&self) -> Collection<'_, Ride> {
        Collection::new(self)
    }

    pub fn parcels(&self) -> Collection<'_, Parcel> {
        Collection::new(self)
    }

    fn request(&self, method: HttpMethod, segments: &[&str]) -> HttpRequest {
        HttpRequest::new(method, self.config.endpoint(segments))
            .with_header("accept", "application/json")
    }

    fn json_request<B>(
        &self,
        method: HttpMethod,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|error| ApiError::encode(&error))?;
        Ok(self.request(method, segments).with_json_body(body))
    }

    async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<T> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "dispatching marketplace request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            tracing::warn!(
                %method,
                %url,
                kind = ?error.kind(),
                error = %error,
                "marketplace request failed"
            );
            ApiError::network(&error)
        })?;

        if !response.is_success() {
            let error = ApiError::from_status(response.status, &response.body);
            tracing::warn!(
                %method,
                %url,
                status = response.status,
                message = %error.message,
                "marketplace rejected request"
            );
            return Err(error);
        }

        serde_json::from_str(&response.body).map_err(|decode_error| {
            let error = ApiError::decode(response.status, &decode_error);
            tracing::warn!(
                %method,
                %url,
                status = response.status,
                error = %decode_error,
                "unexpected response body"
            );
            error
        })
    }
}

/// Extracts a human-readable message from an error body, if the backend sent one.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};

    /// Replays one canned outcome and remembers every request it saw.
    #[derive(Debug)]
    pub struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        pub fn responding(status: u16, body: &str) -> Self {
            Self::with_outcome(Ok(HttpResponse::new(status, body)))
        }

        pub fn with_outcome(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }
}
