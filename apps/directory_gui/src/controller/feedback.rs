//! Transient success/error banner shared by the register and unregister flows.

use std::time::Duration;

use shared::domain::FeedbackKind;

pub const FEEDBACK_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub text: String,
    pub kind: FeedbackKind,
}

#[derive(Debug, Default)]
pub struct FeedbackChannel {
    current: Option<FeedbackMessage>,
    generation: u64,
}

impl FeedbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is visible. The returned generation is the only one
    /// `expire` will honour until the next `show`.
    pub fn show(&mut self, text: impl Into<String>, kind: FeedbackKind) -> u64 {
        self.generation += 1;
        self.current = Some(FeedbackMessage {
            text: text.into(),
            kind,
        });
        self.generation
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn visible(&self) -> Option<&FeedbackMessage> {
        self.current.as_ref()
    }
}
