//! UI layer: app shell and widgets.

pub mod app;
pub mod widgets;

pub use app::{DirectoryGuiApp, StartupConfig};
