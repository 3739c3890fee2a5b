//! Binds card and form actions to the list, modal and feedback state, and
//! sequences the refresh that follows every successful mutation.

use std::time::{Duration, Instant};

use client_core::DirectoryClientError;
use crossbeam_channel::Sender;
use shared::{
    domain::{CapabilityName, ConsultantEmail, FeedbackKind},
    protocol::{CapabilityDirectory, MessageResponse},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    directory_view::{CapabilityListView, RegisterControl, RemoveControl},
    events::{UiError, UiErrorCategory, UiErrorContext, UiEvent},
    feedback::{FeedbackChannel, FEEDBACK_TTL},
    modal::{CloseTrigger, RegistrationModal, CLOSE_AFTER_REGISTER, FOCUS_DELAY},
    orchestration::dispatch_backend_command,
    timers::{TimerAction, TimerQueue},
};

pub const EMPTY_EMAIL_TEXT: &str = "Please enter an email address.";
const REGISTERED_FALLBACK_TEXT: &str = "Registration complete.";
const UNREGISTERED_FALLBACK_TEXT: &str = "Consultant removed.";
pub const UNREACHABLE_STATUS: &str = "Directory server unreachable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenRegistration(RegisterControl),
    Unregister(RemoveControl),
    SubmitRegistration,
    CloseModal(CloseTrigger),
}

pub struct DirectoryController {
    cmd_tx: Sender<BackendCommand>,
    list: CapabilityListView,
    modal: RegistrationModal,
    feedback: FeedbackChannel,
    timers: TimerQueue,
    last_refresh_id: u64,
    applied_refresh_id: u64,
    status: String,
}

impl DirectoryController {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            cmd_tx,
            list: CapabilityListView::new(),
            modal: RegistrationModal::new(),
            feedback: FeedbackChannel::new(),
            timers: TimerQueue::new(),
            last_refresh_id: 0,
            applied_refresh_id: 0,
            status: "Starting".to_string(),
        }
    }

    /// Initial load: one fetch with no user action behind it.
    pub fn start(&mut self, now: Instant) {
        self.refresh(now);
    }

    pub fn handle_action(&mut self, action: UiAction, now: Instant) {
        match action {
            UiAction::OpenRegistration(control) => self.open_registration(control, now),
            UiAction::Unregister(control) => self.unregister(control, now),
            UiAction::SubmitRegistration => self.submit_registration(now),
            UiAction::CloseModal(trigger) => {
                if self.modal.close(trigger) {
                    self.feedback.hide();
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => self.report_failure(err, now),
            UiEvent::DirectoryLoaded { refresh_id, result } => {
                self.apply_directory(refresh_id, result);
            }
            UiEvent::RegistrationFinished {
                capability,
                email,
                session,
                result,
            } => self.finish_registration(capability, email, session, result, now),
            UiEvent::UnregistrationFinished {
                capability,
                email,
                result,
            } => self.finish_unregistration(capability, email, result, now),
        }
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for action in self.timers.pop_due(now) {
            match action {
                TimerAction::HideFeedback { generation } => {
                    self.feedback.expire(generation);
                }
                TimerAction::FocusEmail { session } => {
                    self.modal.request_focus(session);
                }
                TimerAction::CloseModal { session } => {
                    if self.modal.close_if_current(session) {
                        self.feedback.hide();
                    }
                }
            }
        }
    }

    pub fn time_until_next_timer(&self, now: Instant) -> Option<Duration> {
        self.timers
            .next_due()
            .map(|due| due.saturating_duration_since(now))
    }

    pub fn list(&self) -> &CapabilityListView {
        &self.list
    }

    pub fn modal(&self) -> &RegistrationModal {
        &self.modal
    }

    pub fn feedback(&self) -> &FeedbackChannel {
        &self.feedback
    }

    pub fn email_input_mut(&mut self) -> Option<&mut String> {
        self.modal.email_input_mut()
    }

    pub fn take_focus_request(&mut self) -> bool {
        self.modal.take_focus_request()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn refresh(&mut self, now: Instant) {
        self.last_refresh_id += 1;
        let refresh_id = self.last_refresh_id;
        self.queue(BackendCommand::FetchDirectory { refresh_id }, now);
    }

    fn queue(&mut self, cmd: BackendCommand, now: Instant) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.report_failure(err, now);
        }
    }

    /// Rejections the user can correct are warnings; anything else is an
    /// error, and a transport failure also marks the server unreachable.
    fn report_failure(&mut self, err: UiError, now: Instant) {
        match err.category() {
            UiErrorCategory::Validation => {
                tracing::warn!(context = ?err.context(), "request rejected: {}", err.message());
            }
            UiErrorCategory::Transport => {
                tracing::error!(context = ?err.context(), "transport failure: {}", err.message());
                self.status = UNREACHABLE_STATUS.to_string();
            }
            UiErrorCategory::Unknown => {
                tracing::error!(context = ?err.context(), "request failed: {}", err.message());
            }
        }
        self.show_feedback(err.message().to_string(), FeedbackKind::Error, now);
    }

    fn show_feedback(&mut self, text: String, kind: FeedbackKind, now: Instant) {
        tracing::debug!(kind = kind.label(), "showing feedback: {text}");
        let generation = self.feedback.show(text, kind);
        self.timers
            .schedule(now + FEEDBACK_TTL, TimerAction::HideFeedback { generation });
    }

    fn open_registration(&mut self, control: RegisterControl, now: Instant) {
        if !self.list.accepts(control.generation) {
            tracing::debug!(
                capability = %control.capability,
                control_generation = control.generation,
                list_generation = self.list.generation(),
                "ignoring register control from a replaced list"
            );
            return;
        }
        let session = self.modal.open(control.capability);
        self.feedback.hide();
        self.timers
            .schedule(now + FOCUS_DELAY, TimerAction::FocusEmail { session });
    }

    fn unregister(&mut self, control: RemoveControl, now: Instant) {
        if !self.list.accepts(control.generation) {
            tracing::debug!(
                capability = %control.capability,
                email = %control.email,
                "ignoring remove control from a replaced list"
            );
            return;
        }
        self.queue(
            BackendCommand::Unregister {
                capability: control.capability,
                email: control.email,
            },
            now,
        );
    }

    fn submit_registration(&mut self, now: Instant) {
        let Some(session) = self.modal.session() else {
            tracing::debug!("registration submitted with no open modal");
            return;
        };
        let email = session.email().trim().to_string();
        let capability = session.capability().clone();
        let session = session.generation();

        if email.is_empty() {
            self.show_feedback(EMPTY_EMAIL_TEXT.to_string(), FeedbackKind::Error, now);
            return;
        }

        self.queue(
            BackendCommand::Register {
                capability,
                email: ConsultantEmail::from(email),
                session,
            },
            now,
        );
    }

    fn apply_directory(
        &mut self,
        refresh_id: u64,
        result: Result<CapabilityDirectory, DirectoryClientError>,
    ) {
        if refresh_id < self.applied_refresh_id {
            tracing::debug!(
                refresh_id,
                applied = self.applied_refresh_id,
                "dropping stale directory response"
            );
            return;
        }
        self.applied_refresh_id = refresh_id;

        match result {
            Ok(directory) => {
                self.list.render(&directory);
                self.status = format!("{} capabilities loaded", directory.len());
            }
            Err(err) => {
                tracing::error!("error fetching capabilities: {err}");
                self.list.render_unavailable();
                self.status = "Directory unavailable".to_string();
            }
        }
    }

    fn finish_registration(
        &mut self,
        capability: CapabilityName,
        email: ConsultantEmail,
        session: u64,
        result: Result<MessageResponse, DirectoryClientError>,
        now: Instant,
    ) {
        match result {
            Ok(response) => {
                tracing::info!(capability = %capability, email = %email, "consultant registered");
                self.show_feedback(
                    success_text(response, REGISTERED_FALLBACK_TEXT),
                    FeedbackKind::Success,
                    now,
                );
                self.refresh(now);
                self.timers.schedule(
                    now + CLOSE_AFTER_REGISTER,
                    TimerAction::CloseModal { session },
                );
            }
            Err(err) => {
                tracing::debug!(capability = %capability, email = %email, "error registering: {err}");
                self.report_failure(UiError::from_client_error(UiErrorContext::Register, &err), now);
            }
        }
    }

    fn finish_unregistration(
        &mut self,
        capability: CapabilityName,
        email: ConsultantEmail,
        result: Result<MessageResponse, DirectoryClientError>,
        now: Instant,
    ) {
        match result {
            Ok(response) => {
                tracing::info!(capability = %capability, email = %email, "consultant unregistered");
                self.show_feedback(
                    success_text(response, UNREGISTERED_FALLBACK_TEXT),
                    FeedbackKind::Success,
                    now,
                );
                self.refresh(now);
            }
            Err(err) => {
                tracing::debug!(capability = %capability, email = %email, "error unregistering: {err}");
                self.report_failure(UiError::from_client_error(UiErrorContext::Unregister, &err), now);
            }
        }
    }
}

fn success_text(response: MessageResponse, fallback: &str) -> String {
    if response.message.trim().is_empty() {
        fallback.to_string()
    } else {
        response.message
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
