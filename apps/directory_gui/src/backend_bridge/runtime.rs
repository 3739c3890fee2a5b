//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{DirectoryService, HttpDirectoryClient, UnavailableDirectoryService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

/// Runs one command against the directory service and describes the outcome.
pub async fn execute_command(service: &dyn DirectoryService, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchDirectory { refresh_id } => UiEvent::DirectoryLoaded {
            refresh_id,
            result: service.fetch_directory().await,
        },
        BackendCommand::Register {
            capability,
            email,
            session,
        } => {
            let result = service.register_consultant(&capability, &email).await;
            UiEvent::RegistrationFinished {
                capability,
                email,
                session,
                result,
            }
        }
        BackendCommand::Unregister { capability, email } => {
            let result = service.unregister_consultant(&capability, &email).await;
            UiEvent::UnregistrationFinished {
                capability,
                email,
                result,
            }
        }
    }
}

fn connect_service(server_url: &str, ui_tx: &Sender<UiEvent>) -> Arc<dyn DirectoryService> {
    match HttpDirectoryClient::new(server_url) {
        Ok(client) => {
            let _ = ui_tx.try_send(UiEvent::Info(format!("Directory server: {}", client.base_url())));
            Arc::new(client)
        }
        Err(err) => {
            tracing::error!("backend worker startup failure: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                UiErrorCategory::Validation,
                UiErrorContext::BackendStartup,
                format!("Directory server is unavailable: {err}"),
            )));
            Arc::new(UnavailableDirectoryService::new(err.to_string()))
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: String) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Unknown,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let service = connect_service(&server_url, &ui_tx);

            // Commands run concurrently; ordering between their results is
            // settled by the controller.
            while let Ok(cmd) = cmd_rx.recv() {
                let service = Arc::clone(&service);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let cmd_name = cmd.name();
                    let event = execute_command(service.as_ref(), cmd).await;
                    if let Err(err) = ui_tx.try_send(event) {
                        tracing::warn!(command = cmd_name, "dropping backend result: {err}");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
