//! Headless host session for programmatic drill-down and save simulation.
//!
//! Plays the part of the host application: owns open documents, tracks the
//! active one, and delivers open/close/save callbacks to the [`Tracker`] only
//! for instances and documents that registered an observer.

use std::collections::BTreeMap;

use shared::{EntityId, SceneModel};

use crate::hider::Depth;
use crate::host::{DocumentId, DocumentSet, InstanceEvents, SaveEvents, SceneHost};
use crate::menu::{self, MenuCommand, MenuState};
use crate::state::{AppSettings, SceneDocument};
use crate::status::Status;
use crate::tracker::Tracker;

/// Open documents keyed by ID
#[derive(Debug, Default)]
pub struct Documents(BTreeMap<DocumentId, SceneDocument>);

impl Documents {
    fn active(&mut self, id: Option<DocumentId>) -> Result<&mut SceneDocument, String> {
        let id = id.ok_or("No active document")?;
        self.0
            .get_mut(&id)
            .ok_or_else(|| format!("Unknown document: {id}"))
    }
}

impl DocumentSet for Documents {
    fn document_mut(&mut self, id: DocumentId) -> Option<&mut dyn SceneHost> {
        self.0.get_mut(&id).map(|d| d as &mut dyn SceneHost)
    }
}

/// Headless session: open documents plus the tracker
pub struct TestHarness {
    documents: Documents,
    active: Option<DocumentId>,
    next_id: DocumentId,
    pub tracker: Tracker,
}

impl TestHarness {
    /// Create a new session with default settings.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            documents: Documents::default(),
            active: None,
            next_id: 1,
            tracker: Tracker::new(settings),
        }
    }

    // ── Documents ─────────────────────────────────────────────

    /// Open a scene as a new document and make it active
    pub fn load_scene(&mut self, scene: SceneModel) -> DocumentId {
        let id = self.next_id;
        self.next_id += 1;
        self.documents.0.insert(id, SceneDocument::new(id, scene));
        self.active = Some(id);
        tracing::info!("opened document {id}");
        id
    }

    /// Open a scene from a JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<DocumentId, String> {
        let scene: SceneModel =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        scene.validate()?;
        Ok(self.load_scene(scene))
    }

    /// Export the active document's scene as JSON
    pub fn export_scene_json(&self) -> String {
        self.document()
            .and_then(|d| serde_json::to_string_pretty(d.model()).ok())
            .unwrap_or_default()
    }

    /// Make another open document active
    pub fn activate(&mut self, id: DocumentId) -> Result<(), String> {
        if !self.documents.0.contains_key(&id) {
            return Err(format!("Unknown document: {id}"));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Close a document, releasing its hider first
    pub fn close_document(&mut self, id: DocumentId) -> bool {
        let Some(mut doc) = self.documents.0.remove(&id) else {
            return false;
        };
        self.tracker.release(&mut doc);
        if self.active == Some(id) {
            self.active = self.documents.0.keys().next_back().copied();
        }
        true
    }

    /// Unload and reload the extension: every hider is torn down and a fresh
    /// tracker takes over.
    pub fn reload_extension(&mut self) {
        self.tracker.destroy_all(&mut self.documents);
        self.tracker = Tracker::new(self.tracker.settings().clone());
    }

    pub fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn document_count(&self) -> usize {
        self.documents.0.len()
    }

    pub fn document(&self) -> Option<&SceneDocument> {
        self.documents.0.get(&self.active?)
    }

    fn active_mut(&mut self) -> Result<&mut SceneDocument, String> {
        self.documents.active(self.active)
    }

    // ── Navigation ────────────────────────────────────────────

    /// Enter a container inside the current context
    pub fn open(&mut self, instance: &str) -> Result<(), String> {
        let instance = instance.to_string();
        let doc = self.documents.active(self.active)?;
        doc.push_context(&instance)?;
        if doc.is_observed(&instance) {
            self.tracker.on_open(doc, &instance);
        }
        Ok(())
    }

    /// Enter each container of `path` in turn
    pub fn open_path(&mut self, path: &[&str]) -> Result<(), String> {
        path.iter().try_for_each(|e| self.open(e))
    }

    /// Leave the innermost context
    pub fn close(&mut self) -> Option<EntityId> {
        let id = self.active?;
        let doc = self.documents.0.get_mut(&id)?;
        let instance = doc.pop_context()?;
        if doc.is_observed(&instance) {
            self.tracker.on_close(doc, &instance);
        }
        Some(instance)
    }

    /// Leave every context, innermost first
    pub fn close_all(&mut self) -> Vec<EntityId> {
        std::iter::from_fn(|| self.close()).collect()
    }

    /// Save the active document the way the host does: close every entered
    /// context, save, then reopen the same path.
    pub fn save(&mut self) -> Result<(), String> {
        let path = self.active_mut()?.active_path();
        self.close_all();

        let doc = self.documents.active(self.active)?;
        let notify = doc.has_save_observer();
        if notify {
            self.tracker.on_pre_save(doc);
        }
        tracing::debug!("saved document {}", doc.document_id());

        for instance in &path {
            self.open(instance)?;
        }

        let doc = self.documents.active(self.active)?;
        if notify && doc.has_save_observer() {
            self.tracker.on_post_save(doc);
        }
        Ok(())
    }

    // ── Commands ──────────────────────────────────────────────

    /// Run a menu command on the active document
    pub fn command(&mut self, command: MenuCommand) -> Result<Status, String> {
        let doc = self.documents.active(self.active)?;
        Ok(menu::run(&mut self.tracker, doc, command))
    }

    pub fn hide_more(&mut self) -> Result<Status, String> {
        self.command(MenuCommand::HideMore)
    }

    pub fn hide_less(&mut self) -> Result<Status, String> {
        self.command(MenuCommand::HideLess)
    }

    /// Menu state of a command for the active document
    pub fn menu_state(&mut self, command: MenuCommand) -> MenuState {
        let Some(id) = self.active else {
            return MenuState::Grayed;
        };
        match self.documents.0.get_mut(&id) {
            Some(doc) => menu::validate(&mut self.tracker, doc, command),
            None => MenuState::Grayed,
        }
    }

    /// Undo the last bracketed operation
    pub fn undo(&mut self) -> bool {
        self.active_mut().map(|d| d.undo()).unwrap_or(false)
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.active_mut().map(|d| d.redo()).unwrap_or(false)
    }

    // ── Inspection ────────────────────────────────────────────

    /// Depth of the active document's hider (disabled when untracked)
    pub fn depth(&self) -> Depth {
        self.active
            .and_then(|id| self.tracker.find(id))
            .map(|h| h.depth())
            .unwrap_or_default()
    }

    pub fn active_path(&self) -> Vec<EntityId> {
        self.document().map(|d| d.active_path()).unwrap_or_default()
    }

    pub fn is_hidden(&self, entity: &str) -> bool {
        self.document()
            .is_some_and(|d| d.is_hidden(&entity.to_string()))
    }

    /// IDs of all hidden entities in the active document, sorted
    pub fn hidden(&self) -> Vec<EntityId> {
        self.document()
            .map(|d| d.hidden_entities())
            .unwrap_or_default()
    }

    /// Number of siblings the active document's hider has hidden
    pub fn hidden_by_hider(&self) -> usize {
        self.active
            .and_then(|id| self.tracker.find(id))
            .map(|h| h.hide_list().hidden_count())
            .unwrap_or(0)
    }

    /// Last status bar text of the active document
    pub fn status(&self) -> Option<&str> {
        self.document().and_then(|d| d.status())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::nested_scene;

    fn opened(path: &[&str]) -> TestHarness {
        let mut h = TestHarness::new();
        h.load_scene(nested_scene());
        h.open_path(path).unwrap();
        h
    }

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.document_count(), 0);
        assert_eq!(h.depth(), Depth::Disabled);
        assert!(h.status().is_none());
    }

    #[test]
    fn test_open_rejects_non_child() {
        let mut h = opened(&["A"]);
        assert!(h.open("X").is_err());
        assert_eq!(h.active_path(), ["A"]);
    }

    #[test]
    fn test_commands_without_document() {
        let mut h = TestHarness::new();
        assert!(h.hide_more().is_err());
        assert_eq!(h.menu_state(MenuCommand::HideMore), MenuState::Grayed);
    }

    #[test]
    fn test_close_top_level_disables() {
        let mut h = opened(&["A", "B", "C"]);
        h.hide_more().unwrap();
        h.hide_more().unwrap();
        assert_eq!(h.hidden(), ["P", "Q", "X", "Y"]);

        assert_eq!(h.close_all(), ["C", "B", "A"]);
        assert_eq!(h.depth(), Depth::Disabled);
        assert_eq!(h.hidden(), ["Q"]);
        assert_eq!(h.status(), Some("HideMoreLess Disabled"));
    }

    #[test]
    fn test_close_inner_level_reveals_its_siblings() {
        let mut h = opened(&["A", "B", "C"]);
        for _ in 0..3 {
            h.hide_more().unwrap();
        }
        h.close();
        assert!(!h.is_hidden("R"));
        assert!(h.is_hidden("P"));
        assert_eq!(h.depth(), Depth::Level(2));
    }

    #[test]
    fn test_save_restores_depth() {
        let mut h = opened(&["A", "B", "C"]);
        h.hide_more().unwrap();
        h.hide_more().unwrap();
        h.save().unwrap();
        assert_eq!(h.active_path(), ["A", "B", "C"]);
        assert_eq!(h.depth(), Depth::Level(1));
        assert_eq!(h.hidden(), ["P", "Q", "X", "Y"]);
        assert_eq!(h.status(), Some("HideMoreLess: reapplied depth 1 after Save"));
    }

    #[test]
    fn test_undo_hide_more() {
        let mut h = opened(&["A", "B"]);
        h.hide_more().unwrap();
        assert!(h.is_hidden("X"));
        assert!(h.undo());
        assert!(!h.is_hidden("X"));
        assert!(h.redo());
        assert!(h.is_hidden("X"));
    }

    #[test]
    fn test_close_document_releases_hider() {
        let mut h = opened(&["A", "B"]);
        let first = h.active_document().unwrap();
        h.hide_more().unwrap();
        let second = h.load_scene(nested_scene());
        assert_eq!(h.active_document(), Some(second));

        assert!(h.close_document(first));
        assert!(h.tracker.find(first).is_none());
        assert_eq!(h.document_count(), 1);
        assert!(!h.close_document(first));
    }
}
