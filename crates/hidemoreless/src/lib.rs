// Library crate: the hider core plus the headless host used by tests and the
// script runner binary.

pub mod command;
pub mod fixtures;
pub mod harness;
pub mod hider;
pub mod host;
pub mod i18n;
pub mod menu;
pub mod state;
pub mod status;
pub mod tracker;

pub use hider::{Depth, Hider};
pub use host::{DocumentId, DocumentSet, InstanceEvents, SaveEvents, SceneHost};
pub use tracker::Tracker;
