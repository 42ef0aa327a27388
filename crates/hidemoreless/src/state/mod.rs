pub mod document;
pub mod settings;

pub use document::SceneDocument;
pub use settings::{AppSettings, HiderSettings};
