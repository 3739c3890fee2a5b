use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CapabilityName, ConsultantEmail},
    error::ApiException,
    protocol::{CapabilityDirectory, DetailResponse, MessageResponse},
};
use tracing::{debug, warn};
use url::Url;

pub mod error;

pub use error::DirectoryClientError;

pub type Result<T, E = DirectoryClientError> = std::result::Result<T, E>;

const CAPABILITIES_SEGMENT: &str = "capabilities";
const REGISTER_SEGMENT: &str = "register";
const UNREGISTER_SEGMENT: &str = "unregister";

/// Read and mutate the remote capability directory. Implementations hold no
/// directory state of their own; callers decide when to refetch.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn fetch_directory(&self) -> Result<CapabilityDirectory>;
    async fn register_consultant(
        &self,
        capability: &CapabilityName,
        email: &ConsultantEmail,
    ) -> Result<MessageResponse>;
    async fn unregister_consultant(
        &self,
        capability: &CapabilityName,
        email: &ConsultantEmail,
    ) -> Result<MessageResponse>;
}

/// Stand-in used when no real client could be built. Every call fails as a
/// network error carrying `reason`.
pub struct UnavailableDirectoryService {
    reason: String,
}

impl UnavailableDirectoryService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(DirectoryClientError::Network(format!(
            "directory service unavailable: {}",
            self.reason
        )))
    }
}

#[async_trait]
impl DirectoryService for UnavailableDirectoryService {
    async fn fetch_directory(&self) -> Result<CapabilityDirectory> {
        self.fail()
    }

    async fn register_consultant(
        &self,
        _capability: &CapabilityName,
        _email: &ConsultantEmail,
    ) -> Result<MessageResponse> {
        self.fail()
    }

    async fn unregister_consultant(
        &self,
        _capability: &CapabilityName,
        _email: &ConsultantEmail,
    ) -> Result<MessageResponse> {
        self.fail()
    }
}

#[derive(Clone)]
pub struct HttpDirectoryClient {
    http: Client,
    base_url: Url,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|err| DirectoryClientError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(DirectoryClientError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: "expected an http(s) base url".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends already-decoded segments; each one is percent-encoded exactly
    /// once, so a `/` inside a capability name stays inside its segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| DirectoryClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn directory_url(&self) -> Result<Url> {
        self.endpoint(&[CAPABILITIES_SEGMENT])
    }

    fn mutation_url(
        &self,
        capability: &CapabilityName,
        action: &str,
        email: &ConsultantEmail,
    ) -> Result<Url> {
        let mut url = self.endpoint(&[CAPABILITIES_SEGMENT, capability.as_str(), action])?;
        url.query_pairs_mut().append_pair("email", email.as_str());
        Ok(url)
    }

    async fn mutate(&self, method: Method, url: Url) -> Result<MessageResponse> {
        debug!(%method, %url, "sending directory mutation");
        let response = self
            .http
            .request(method, url)
            .send()
            .await
            .map_err(DirectoryClientError::network)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(DirectoryClientError::network)?;

        if status.is_success() {
            return decode_json(&body);
        }

        let detail: DetailResponse = decode_json(&body)?;
        let api = ApiException::new(status.as_u16(), detail.detail_text());
        warn!(status = status.as_u16(), detail = %api.detail, "directory mutation rejected");
        Err(api.into())
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|err| DirectoryClientError::Network(format!("invalid response body: {err}")))
}

fn status_detail(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<DetailResponse>(body)
        .ok()
        .and_then(|detail| match detail.detail {
            Some(serde_json::Value::String(text)) if !text.trim().is_empty() => Some(text),
            _ => None,
        })
        .unwrap_or_else(|| status.to_string())
}

#[async_trait]
impl DirectoryService for HttpDirectoryClient {
    async fn fetch_directory(&self) -> Result<CapabilityDirectory> {
        let url = self.directory_url()?;
        debug!(%url, "fetching capability directory");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(DirectoryClientError::network)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(DirectoryClientError::network)?;

        if !status.is_success() {
            let api = ApiException::new(status.as_u16(), status_detail(status, &body));
            warn!(status = status.as_u16(), "capability directory request failed");
            return Err(api.into());
        }

        let directory: CapabilityDirectory = decode_json(&body)?;
        debug!(capabilities = directory.len(), "capability directory fetched");
        Ok(directory)
    }

    async fn register_consultant(
        &self,
        capability: &CapabilityName,
        email: &ConsultantEmail,
    ) -> Result<MessageResponse> {
        let url = self.mutation_url(capability, REGISTER_SEGMENT, email)?;
        self.mutate(Method::POST, url).await
    }

    async fn unregister_consultant(
        &self,
        capability: &CapabilityName,
        email: &ConsultantEmail,
    ) -> Result<MessageResponse> {
        let url = self.mutation_url(capability, UNREGISTER_SEGMENT, email)?;
        self.mutate(Method::DELETE, url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
