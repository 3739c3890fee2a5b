//! UI/backend events and error modeling for the directory controller.

use client_core::DirectoryClientError;
use shared::{
    domain::{CapabilityName, ConsultantEmail},
    error::ErrorCode,
    protocol::{CapabilityDirectory, MessageResponse},
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    DirectoryLoaded {
        refresh_id: u64,
        result: Result<CapabilityDirectory, DirectoryClientError>,
    },
    RegistrationFinished {
        capability: CapabilityName,
        email: ConsultantEmail,
        session: u64,
        result: Result<MessageResponse, DirectoryClientError>,
    },
    UnregistrationFinished {
        capability: CapabilityName,
        email: ConsultantEmail,
        result: Result<MessageResponse, DirectoryClientError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Register,
    Unregister,
    General,
}

impl UiErrorContext {
    /// What the user sees when the request itself could not complete.
    pub fn transport_failure_text(self) -> &'static str {
        match self {
            Self::Register => "Failed to register. Please try again.",
            Self::Unregister => "Failed to unregister. Please try again.",
            Self::BackendStartup | Self::General => "Request failed. Please try again.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    /// API rejections keep the server's detail; anything that never got a
    /// usable response collapses to the context's generic text.
    pub fn from_client_error(context: UiErrorContext, err: &DirectoryClientError) -> Self {
        match err {
            DirectoryClientError::Api(api) => {
                let category = match api.code {
                    ErrorCode::BadRequest | ErrorCode::Validation | ErrorCode::Conflict => {
                        UiErrorCategory::Validation
                    }
                    ErrorCode::NotFound | ErrorCode::Internal | ErrorCode::Unknown => {
                        UiErrorCategory::Unknown
                    }
                };
                Self::new(category, context, api.detail.clone())
            }
            DirectoryClientError::Network(_) | DirectoryClientError::InvalidBaseUrl { .. } => {
                Self::new(
                    UiErrorCategory::Transport,
                    context,
                    context.transport_failure_text(),
                )
            }
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ApiException;

    fn rejected(status: u16) -> UiError {
        let err = DirectoryClientError::from(ApiException::new(status, "Invalid email"));
        UiError::from_client_error(UiErrorContext::Register, &err)
    }

    #[test]
    fn client_rejections_are_validation_failures() {
        for status in [400, 409, 422] {
            let err = rejected(status);
            assert_eq!(err.category(), UiErrorCategory::Validation, "{status}");
            assert_eq!(err.message(), "Invalid email");
        }
    }

    #[test]
    fn missing_and_server_failures_are_unknown() {
        for status in [404, 500, 503, 418] {
            assert_eq!(rejected(status).category(), UiErrorCategory::Unknown, "{status}");
        }
    }

    #[test]
    fn unreachable_service_is_transport_with_generic_text() {
        let err = UiError::from_client_error(
            UiErrorContext::Unregister,
            &DirectoryClientError::Network("connection refused".into()),
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Unregister);
        assert_eq!(err.message(), "Failed to unregister. Please try again.");
    }
}
