use super::*;
use async_trait::async_trait;
use client_core::DirectoryClientError;
use crossbeam_channel::bounded;
use shared::{
    domain::{CapabilityName, ConsultantEmail},
    error::ApiException,
    protocol::{CapabilityDirectory, CapabilityRecord, MessageResponse},
};
use std::time::Duration;
use tokio::sync::Mutex;

struct TestDirectoryService {
    directory: CapabilityDirectory,
    reject_with: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl TestDirectoryService {
    fn ok() -> Self {
        Self {
            directory: vec![(
                CapabilityName::from("Cloud"),
                CapabilityRecord {
                    description: "D".into(),
                    practice_area: "P".into(),
                    capacity: Some(10u32.into()),
                    consultants: vec!["a@x.com".into()],
                    ..CapabilityRecord::default()
                },
            )]
            .into_iter()
            .collect(),
            reject_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(detail: impl Into<String>) -> Self {
        Self {
            reject_with: Some(detail.into()),
            ..Self::ok()
        }
    }

    fn outcome(&self, message: String) -> Result<MessageResponse, DirectoryClientError> {
        match &self.reject_with {
            Some(detail) => Err(ApiException::new(400, detail.clone()).into()),
            None => Ok(MessageResponse { message }),
        }
    }
}

#[async_trait]
impl DirectoryService for TestDirectoryService {
    async fn fetch_directory(&self) -> Result<CapabilityDirectory, DirectoryClientError> {
        self.calls.lock().await.push("fetch".into());
        Ok(self.directory.clone())
    }

    async fn register_consultant(
        &self,
        capability: &CapabilityName,
        email: &ConsultantEmail,
    ) -> Result<MessageResponse, DirectoryClientError> {
        self.calls
            .lock()
            .await
            .push(format!("register {capability} {email}"));
        self.outcome(format!("Registered {email} for {capability}"))
    }

    async fn unregister_consultant(
        &self,
        capability: &CapabilityName,
        email: &ConsultantEmail,
    ) -> Result<MessageResponse, DirectoryClientError> {
        self.calls
            .lock()
            .await
            .push(format!("unregister {capability} {email}"));
        self.outcome("Removed".to_string())
    }
}

#[tokio::test]
async fn fetch_command_echoes_refresh_id() {
    let service = TestDirectoryService::ok();

    let event = execute_command(&service, BackendCommand::FetchDirectory { refresh_id: 7 }).await;

    match event {
        UiEvent::DirectoryLoaded { refresh_id, result } => {
            assert_eq!(refresh_id, 7);
            assert_eq!(result.expect("directory").len(), 1);
        }
        _ => panic!("unexpected event"),
    }
    assert_eq!(*service.calls.lock().await, vec!["fetch".to_string()]);
}

#[tokio::test]
async fn register_command_keeps_session_and_arguments() {
    let service = TestDirectoryService::ok();

    let event = execute_command(
        &service,
        BackendCommand::Register {
            capability: CapabilityName::from("Cloud"),
            email: ConsultantEmail::from("b@x.com"),
            session: 3,
        },
    )
    .await;

    match event {
        UiEvent::RegistrationFinished {
            capability,
            email,
            session,
            result,
        } => {
            assert_eq!(capability.as_str(), "Cloud");
            assert_eq!(email.as_str(), "b@x.com");
            assert_eq!(session, 3);
            assert_eq!(result.expect("registered").message, "Registered b@x.com for Cloud");
        }
        _ => panic!("unexpected event"),
    }
}

#[tokio::test]
async fn unregister_command_passes_rejection_through() {
    let service = TestDirectoryService::rejecting("Consultant is not registered");

    let event = execute_command(
        &service,
        BackendCommand::Unregister {
            capability: CapabilityName::from("Cloud"),
            email: ConsultantEmail::from("ghost@x.com"),
        },
    )
    .await;

    match event {
        UiEvent::UnregistrationFinished { result, .. } => {
            let err = result.expect_err("must be rejected");
            assert_eq!(err.api_detail(), Some("Consultant is not registered"));
        }
        _ => panic!("unexpected event"),
    }
    assert_eq!(
        *service.calls.lock().await,
        vec!["unregister Cloud ghost@x.com".to_string()]
    );
}

#[test]
fn worker_with_invalid_url_reports_startup_error_and_failed_fetch() {
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    launch(cmd_rx, ui_tx, "not a url".to_string());

    cmd_tx
        .send(BackendCommand::FetchDirectory { refresh_id: 1 })
        .expect("queue fetch");

    let mut saw_startup_error = false;
    loop {
        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("backend event");
        match event {
            UiEvent::Info(_) => {}
            UiEvent::Error(err) => {
                assert_eq!(err.context(), UiErrorContext::BackendStartup);
                saw_startup_error = true;
            }
            UiEvent::DirectoryLoaded { refresh_id, result } => {
                assert_eq!(refresh_id, 1);
                assert!(result.expect_err("must fail").is_network());
                break;
            }
            _ => panic!("unexpected event"),
        }
    }
    assert!(saw_startup_error);
}
