//! Controller layer: UI events, state machines for the list, modal and
//! feedback banner, and command orchestration.

pub mod directory_view;
pub mod dispatcher;
pub mod events;
pub mod feedback;
pub mod modal;
pub mod orchestration;
pub mod timers;

pub use dispatcher::{DirectoryController, UiAction};
