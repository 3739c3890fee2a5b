//! Card view model for the capability directory.
//!
//! Every render replaces the whole card list and bumps the render generation.
//! Controls are stamped with the generation that produced them, so an action
//! raised from a superseded render can be recognised and dropped.

use shared::{
    domain::{CapabilityName, ConsultantEmail},
    protocol::{CapabilityDirectory, CapabilityRecord},
};

pub const LOADING_NOTICE: &str = "Loading capabilities...";
pub const UNAVAILABLE_NOTICE: &str = "Failed to load capabilities. Please try again later.";
pub const EMPTY_ROSTER_NOTICE: &str = "No consultants registered yet";
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterControl {
    pub generation: u64,
    pub capability: CapabilityName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveControl {
    pub generation: u64,
    pub capability: CapabilityName,
    pub email: ConsultantEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub email: String,
    pub remove: RemoveControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSection {
    Empty { notice: &'static str },
    Members(Vec<RosterEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityCard {
    pub title: String,
    pub description: String,
    pub practice_area: String,
    pub industry_verticals: String,
    pub capacity: String,
    pub team: String,
    pub roster: RosterSection,
    pub register: RegisterControl,
}

impl CapabilityCard {
    fn build(generation: u64, name: &CapabilityName, record: &CapabilityRecord) -> Self {
        let industry_verticals = match record.industry_verticals.as_deref() {
            Some(verticals) if !verticals.is_empty() => verticals.join(", "),
            _ => NOT_SPECIFIED.to_string(),
        };

        let roster = if record.consultants.is_empty() {
            RosterSection::Empty {
                notice: EMPTY_ROSTER_NOTICE,
            }
        } else {
            RosterSection::Members(
                record
                    .consultants
                    .iter()
                    .map(|email| RosterEntry {
                        email: email.clone(),
                        remove: RemoveControl {
                            generation,
                            capability: name.clone(),
                            email: ConsultantEmail::from(email.as_str()),
                        },
                    })
                    .collect(),
            )
        };

        Self {
            title: name.as_str().to_string(),
            description: record.description.clone(),
            practice_area: record.practice_area.clone(),
            industry_verticals,
            capacity: match &record.capacity {
                Some(hours) => format!("{hours} hours/week available"),
                None => "0 hours/week available".to_string(),
            },
            team: format!("Current Team: {} consultants", record.consultants.len()),
            roster,
            register: RegisterControl {
                generation,
                capability: name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Cards(Vec<CapabilityCard>),
    Unavailable { notice: &'static str },
}

#[derive(Debug)]
pub struct CapabilityListView {
    state: ListState,
    generation: u64,
}

impl Default for CapabilityListView {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityListView {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            generation: 0,
        }
    }

    pub fn render(&mut self, directory: &CapabilityDirectory) {
        self.generation += 1;
        let generation = self.generation;
        let cards = directory
            .iter()
            .map(|(name, record)| CapabilityCard::build(generation, name, record))
            .collect();
        self.state = ListState::Cards(cards);
        tracing::debug!(generation, capabilities = directory.len(), "rendered directory");
    }

    pub fn render_unavailable(&mut self) {
        self.generation += 1;
        self.state = ListState::Unavailable {
            notice: UNAVAILABLE_NOTICE,
        };
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn cards(&self) -> &[CapabilityCard] {
        match &self.state {
            ListState::Cards(cards) => cards,
            ListState::Loading | ListState::Unavailable { .. } => &[],
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a control stamped with `generation` belongs to the list on screen.
    pub fn accepts(&self, generation: u64) -> bool {
        generation == self.generation && matches!(self.state, ListState::Cards(_))
    }
}
