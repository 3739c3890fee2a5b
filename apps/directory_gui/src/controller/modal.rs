//! Registration dialog state machine.

use std::time::Duration;

use shared::domain::CapabilityName;

/// Focus cannot land on the email field in the frame that reveals it.
pub const FOCUS_DELAY: Duration = Duration::from_millis(100);
pub const CLOSE_AFTER_REGISTER: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseControl,
    Backdrop,
    Escape,
    AfterRegistration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSession {
    capability: CapabilityName,
    email: String,
    generation: u64,
    focus_requested: bool,
}

impl ModalSession {
    pub fn capability(&self) -> &CapabilityName {
        &self.capability
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn label(&self) -> String {
        format!("Registering for: {}", self.capability)
    }
}

#[derive(Debug, Default)]
pub struct RegistrationModal {
    session: Option<ModalSession>,
    next_generation: u64,
}

impl RegistrationModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh session, discarding any previous selection and input.
    pub fn open(&mut self, capability: CapabilityName) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        tracing::debug!(capability = %capability, generation, "opening registration modal");
        self.session = Some(ModalSession {
            capability,
            email: String::new(),
            generation,
            focus_requested: false,
        });
        generation
    }

    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::debug!(
                    capability = %session.capability,
                    ?trigger,
                    "closing registration modal"
                );
                true
            }
            None => false,
        }
    }

    pub fn close_if_current(&mut self, generation: u64) -> bool {
        if self.current_generation() != Some(generation) {
            return false;
        }
        self.close(CloseTrigger::AfterRegistration)
    }

    pub fn request_focus(&mut self, generation: u64) -> bool {
        match self.session.as_mut() {
            Some(session) if session.generation == generation => {
                session.focus_requested = true;
                true
            }
            _ => false,
        }
    }

    /// Returns true once per focus request.
    pub fn take_focus_request(&mut self) -> bool {
        self.session
            .as_mut()
            .map(|session| std::mem::take(&mut session.focus_requested))
            .unwrap_or(false)
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    pub fn selected_capability(&self) -> Option<&CapabilityName> {
        self.session.as_ref().map(ModalSession::capability)
    }

    pub fn email_input_mut(&mut self) -> Option<&mut String> {
        self.session.as_mut().map(|session| &mut session.email)
    }

    fn current_generation(&self) -> Option<u64> {
        self.session.as_ref().map(ModalSession::generation)
    }
}
