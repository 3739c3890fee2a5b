use shared::error::ApiException;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryClientError {
    #[error("invalid directory server url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// The request never produced a usable response: connect/DNS/transport
    /// failure or a body that is not the expected JSON.
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Api(#[from] ApiException),
}

impl DirectoryClientError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::InvalidBaseUrl { .. })
    }

    /// Server-provided detail for API rejections.
    pub fn api_detail(&self) -> Option<&str> {
        match self {
            Self::Api(api) => Some(api.detail.as_str()),
            _ => None,
        }
    }
}
