//! Backend commands queued from UI to backend worker.

use shared::domain::{CapabilityName, ConsultantEmail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchDirectory {
        refresh_id: u64,
    },
    Register {
        capability: CapabilityName,
        email: ConsultantEmail,
        /// Modal session that submitted the form.
        session: u64,
    },
    Unregister {
        capability: CapabilityName,
        email: ConsultantEmail,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchDirectory { .. } => "fetch_directory",
            Self::Register { .. } => "register",
            Self::Unregister { .. } => "unregister",
        }
    }
}
