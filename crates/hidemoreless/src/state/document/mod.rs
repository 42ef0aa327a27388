//! In-memory host document
//!
//! Holds a scene model plus the host-side state the hider talks to: the
//! active path, observer registrations, undo/redo history and the status bar.

mod history;
mod navigation;

use std::collections::HashSet;

use shared::{EntityId, SceneModel};

use crate::host::{DocumentId, SceneHost};

/// One open document
#[derive(Debug)]
pub struct SceneDocument {
    id: DocumentId,
    /// Current scene
    model: SceneModel,
    /// Entered containers, root first
    active_path: Vec<EntityId>,
    /// Instances with a registered open/close observer
    observed: HashSet<EntityId>,
    /// Number of registered save observers
    save_observers: usize,
    /// Last status bar text
    status: Option<String>,
    /// Operation currently bracketed: name and the scene before it started
    pending: Option<(String, SceneModel)>,
    /// Undo stack - (operation name, previous scene)
    pub(crate) undo_stack: Vec<(String, SceneModel)>,
    /// Redo stack - (operation name, undone scene)
    pub(crate) redo_stack: Vec<(String, SceneModel)>,
    /// Monotonically increasing version counter
    version: u64,
}

impl SceneDocument {
    pub fn new(id: DocumentId, model: SceneModel) -> Self {
        Self {
            id,
            model,
            active_path: Vec::new(),
            observed: HashSet::new(),
            save_observers: 0,
            status: None,
            pending: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
        }
    }

    pub fn model(&self) -> &SceneModel {
        &self.model
    }

    /// Current document version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Last status bar text
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether open/close callbacks for `instance` are observed
    pub fn is_observed(&self, instance: &EntityId) -> bool {
        self.observed.contains(instance)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn has_save_observer(&self) -> bool {
        self.save_observers > 0
    }

    /// IDs of all hidden entities, sorted
    pub fn hidden_entities(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .model
            .entities
            .iter()
            .filter(|e| e.hidden)
            .map(|e| e.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

impl SceneHost for SceneDocument {
    fn document_id(&self) -> DocumentId {
        self.id
    }

    fn active_path(&self) -> Vec<EntityId> {
        self.active_path.clone()
    }

    fn container_children(&self, parent: Option<&EntityId>) -> Vec<EntityId> {
        self.model
            .children_of(parent.map(String::as_str))
            .iter()
            .filter(|id| self.model.entity(id).is_some_and(|e| e.is_container()))
            .cloned()
            .collect()
    }

    fn contains(&self, container: &EntityId, entity: &EntityId) -> bool {
        self.model
            .children_of(Some(container.as_str()))
            .contains(entity)
    }

    fn is_top_level(&self, entity: &EntityId) -> bool {
        self.model.root.contains(entity)
    }

    fn is_hidden(&self, entity: &EntityId) -> bool {
        self.model.entity(entity).is_some_and(|e| e.hidden)
    }

    fn set_hidden(&mut self, entity: &EntityId, hidden: bool) {
        if let Some(e) = self.model.entity_mut(entity) {
            if e.hidden != hidden {
                e.hidden = hidden;
                self.version += 1;
            }
        }
    }

    fn on_visible_layer(&self, entity: &EntityId) -> bool {
        self.model
            .entity(entity)
            .is_some_and(|e| self.model.layer_visible(&e.layer))
    }

    fn add_instance_observer(&mut self, instance: &EntityId) {
        self.observed.insert(instance.clone());
    }

    fn remove_instance_observer(&mut self, instance: &EntityId) {
        self.observed.remove(instance);
    }

    fn add_save_observer(&mut self) {
        self.save_observers += 1;
    }

    fn remove_save_observer(&mut self) {
        self.save_observers = self.save_observers.saturating_sub(1);
    }

    fn start_operation(&mut self, name: &str) {
        self.begin_operation(name);
    }

    fn commit_operation(&mut self) {
        self.finish_operation();
    }

    fn hide_rest_of_model(&self) -> bool {
        self.model.hide_rest_of_model
    }

    fn set_hide_rest_of_model(&mut self, enabled: bool) {
        if self.model.hide_rest_of_model != enabled {
            self.model.hide_rest_of_model = enabled;
            self.version += 1;
        }
    }

    fn set_status_text(&mut self, text: &str) {
        tracing::debug!("status: {text}");
        self.status = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::nested_scene;

    fn id(s: &str) -> EntityId {
        s.to_string()
    }

    #[test]
    fn test_container_children_filters_geometry() {
        let doc = SceneDocument::new(1, nested_scene());
        assert_eq!(doc.container_children(None), ["A", "X", "Y", "Z"]);
        assert_eq!(doc.container_children(Some(&id("A"))), ["B", "P", "Q"]);
        assert!(doc.container_children(Some(&id("D"))).is_empty());
    }

    #[test]
    fn test_contains_direct_members_only() {
        let doc = SceneDocument::new(1, nested_scene());
        assert!(doc.contains(&id("A"), &id("B")));
        assert!(!doc.contains(&id("A"), &id("C")));
        assert!(!doc.contains(&id("B"), &id("A")));
    }

    #[test]
    fn test_layer_and_top_level() {
        let doc = SceneDocument::new(1, nested_scene());
        assert!(!doc.on_visible_layer(&id("Z")));
        assert!(doc.on_visible_layer(&id("X")));
        assert!(doc.is_top_level(&id("A")));
        assert!(!doc.is_top_level(&id("B")));
    }

    #[test]
    fn test_set_hidden_bumps_version_on_change() {
        let mut doc = SceneDocument::new(1, nested_scene());
        doc.set_hidden(&id("X"), true);
        doc.set_hidden(&id("X"), true);
        assert_eq!(doc.version(), 1);
        assert!(doc.is_hidden(&id("X")));
    }

    #[test]
    fn test_observer_registration() {
        let mut doc = SceneDocument::new(1, nested_scene());
        doc.add_instance_observer(&id("A"));
        doc.add_instance_observer(&id("A"));
        assert_eq!(doc.observed_count(), 1);
        doc.remove_instance_observer(&id("A"));
        assert!(!doc.is_observed(&id("A")));

        doc.add_save_observer();
        assert!(doc.has_save_observer());
        doc.remove_save_observer();
        doc.remove_save_observer();
        assert!(!doc.has_save_observer());
    }
}
