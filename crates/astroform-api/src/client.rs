//! Astronomer platform API client
//!
//! Bearer-token authenticated JSON over HTTPS. Every call is a single
//! round-trip; responses are classified into success, `Transport`, `Api`
//! or `Decode` errors.

use crate::cluster::ClusterApi;
use crate::deployment::DeploymentApi;
use crate::organization::OrganizationApi;
use crate::workspace::WorkspaceApi;
use astroform_cloud::{CloudError, ErrorContext, Operation, ResourceKind, Result};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

pub const ASTRONOMER_API_BASE: &str = "https://api.astronomer.io/platform/v1beta1/organizations";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_ERROR_BODY: usize = 512;
const USER_AGENT: &str = concat!("astroform/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub token: String,
    pub organization_id: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(token: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            organization_id: organization_id.into(),
            base_url: ASTRONOMER_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

/// Shared HTTP client scoped to one organization
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    token: String,
    organization_id: String,
    base_url: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("organization_id", &self.organization_id)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = build_http(&config, USER_AGENT)?;

        Ok(Self {
            http,
            token: config.token,
            organization_id: config.organization_id,
            base_url,
        })
    }

    /// Get the organization all resource calls are scoped to
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn clusters(&self) -> ClusterApi {
        ClusterApi::new(self.clone())
    }

    pub fn deployments(&self) -> DeploymentApi {
        DeploymentApi::new(self.clone())
    }

    pub fn workspaces(&self) -> WorkspaceApi {
        WorkspaceApi::new(self.clone())
    }

    pub fn organizations(&self) -> OrganizationApi {
        OrganizationApi::new(self.clone())
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    pub(crate) fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        // Checked by parse_base_url, so the path is always segmentable
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    fn collection_url(&self, kind: ResourceKind) -> String {
        match kind.collection() {
            Some(collection) => self.url(&[self.organization_id.as_str(), collection]),
            None => self.url(&[]),
        }
    }

    fn item_url(&self, kind: ResourceKind, id: &str) -> String {
        match kind.collection() {
            Some(collection) => self.url(&[self.organization_id.as_str(), collection, id]),
            None => self.url(&[id]),
        }
    }

    /// Fetch one resource of `kind`
    pub(crate) async fn get_resource<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<T> {
        let context = ErrorContext::new(Operation::Read, kind).with_id(id);
        self.fetch(&context, &self.item_url(kind, id)).await
    }

    /// POST to the kind's collection
    pub(crate) async fn create_resource<B, T>(&self, kind: ResourceKind, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let context = ErrorContext::new(Operation::Create, kind);
        let url = self.collection_url(kind);
        let (status, bytes) = self
            .execute(&context, Method::POST, &url, Some(body))
            .await?;
        decode_response(&context, status, &bytes)
    }

    /// POST to an existing item
    pub(crate) async fn update_resource<B, T>(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if id.is_empty() {
            return Err(CloudError::Validation(format!(
                "no {} id given for update",
                kind
            )));
        }
        let context = ErrorContext::new(Operation::Update, kind).with_id(id);
        let url = self.item_url(kind, id);
        let (status, bytes) = self
            .execute(&context, Method::POST, &url, Some(body))
            .await?;
        decode_response(&context, status, &bytes)
    }

    /// DELETE an item; a 404 means it is already gone
    pub(crate) async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<()> {
        let context = ErrorContext::new(Operation::Delete, kind).with_id(id);
        let url = self.item_url(kind, id);
        let (status, bytes) = self
            .execute::<()>(&context, Method::DELETE, &url, None)
            .await?;

        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{} {} already deleted", kind, id);
            return Ok(());
        }
        Err(api_error(&context, status, &bytes))
    }

    /// GET an arbitrary URL under this client
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        context: &ErrorContext,
        url: &str,
    ) -> Result<T> {
        let (status, bytes) = self
            .execute::<()>(context, Method::GET, url, None)
            .await?;
        decode_response(context, status, &bytes)
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        context: &ErrorContext,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request for {} failed", context);
            transport_error(context, e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Reading response for {} failed", context);
            transport_error(context, e)
        })?;

        tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "Received response");
        Ok((status, bytes.to_vec()))
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| CloudError::Validation(format!("invalid API URL {}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(CloudError::Validation(format!(
            "invalid API URL {}: not a hierarchical URL",
            base_url
        )));
    }
    Ok(url)
}

fn build_http(config: &ApiConfig, user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| {
            // Setup is charged to the organization the client is scoped to
            let context = ErrorContext::new(Operation::Read, ResourceKind::Organization)
                .with_id(&config.organization_id);
            tracing::warn!(error = %e, "Unable to build HTTP client");
            transport_error(&context, e)
        })
}

fn transport_error(context: &ErrorContext, source: reqwest::Error) -> CloudError {
    CloudError::Transport {
        context: context.clone(),
        source: Box::new(source),
    }
}

/// Structured error body returned by the control plane
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    request_id: String,
    status_code: serde_json::Value,
}

impl ErrorBody {
    /// `statusCode` arrives as a number or a numeric string
    fn status_code(&self) -> Option<u16> {
        match &self.status_code {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Classify a response and decode its body into `T`
///
/// The HTTP status decides first. A 2xx body that is itself a structured
/// error (non-empty `message`, `statusCode` >= 400) is still an API error.
pub(crate) fn decode_response<T: DeserializeOwned>(
    context: &ErrorContext,
    status: StatusCode,
    body: &[u8],
) -> Result<T> {
    if !status.is_success() {
        return Err(api_error(context, status, body));
    }

    let error = serde_json::from_slice::<ErrorBody>(body).unwrap_or_default();
    match error.status_code() {
        Some(code) if code >= 400 && !error.message.is_empty() => {
            tracing::warn!(status = code, "API error for {}: {}", context, error.message);
            return Err(CloudError::Api {
                context: context.clone(),
                status: code,
                message: error.message,
                request_id: non_empty(error.request_id),
            });
        }
        _ => {}
    }

    serde_json::from_slice(body).map_err(|source| {
        tracing::warn!(error = %source, "Unable to decode response for {}", context);
        CloudError::Decode {
            context: context.clone(),
            source,
        }
    })
}

fn api_error(context: &ErrorContext, status: StatusCode, body: &[u8]) -> CloudError {
    let parsed = serde_json::from_slice::<ErrorBody>(body).unwrap_or_default();

    let message = if !parsed.message.is_empty() {
        parsed.message
    } else {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            text.chars().take(MAX_ERROR_BODY).collect()
        }
    };

    tracing::warn!(status = status.as_u16(), "API error for {}: {}", context, message);
    CloudError::Api {
        context: context.clone(),
        status: status.as_u16(),
        message,
        request_id: non_empty(parsed.request_id),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reject a decoded response that carries no id
pub(crate) fn require_id(context: &ErrorContext, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CloudError::Decode {
            context: context.clone(),
            source: serde::de::Error::custom("response has no id"),
        });
    }
    Ok(())
}
