//! Host capability contract.
//!
//! The hider never owns the scene. Everything it reads or mutates goes through
//! [`SceneHost`], and the host feeds lifecycle callbacks back through
//! [`InstanceEvents`] and [`SaveEvents`].

use shared::EntityId;

/// Identity of an open document.
pub type DocumentId = u64;

/// What the hider needs from one open document.
pub trait SceneHost {
    /// Registry key for this document.
    fn document_id(&self) -> DocumentId;

    /// Currently entered containers, root first. Empty when nothing is open.
    fn active_path(&self) -> Vec<EntityId>;

    /// Direct group/component children of `parent`, or of the document root for `None`.
    fn container_children(&self, parent: Option<&EntityId>) -> Vec<EntityId>;

    /// True if `entity` is a direct member of `container`'s definition.
    fn contains(&self, container: &EntityId, entity: &EntityId) -> bool;

    /// True if `entity` lives directly in the document root.
    fn is_top_level(&self, entity: &EntityId) -> bool;

    fn is_hidden(&self, entity: &EntityId) -> bool;

    fn set_hidden(&mut self, entity: &EntityId, hidden: bool);

    /// True if the entity's layer is visible.
    fn on_visible_layer(&self, entity: &EntityId) -> bool;

    /// Route open/close notifications for `instance` to the tracker.
    fn add_instance_observer(&mut self, instance: &EntityId);

    fn remove_instance_observer(&mut self, instance: &EntityId);

    /// Route pre/post save notifications for this document to the tracker.
    fn add_save_observer(&mut self);

    fn remove_save_observer(&mut self);

    /// Open an undoable operation bracket.
    fn start_operation(&mut self, name: &str);

    /// Close the bracket opened by [`SceneHost::start_operation`].
    fn commit_operation(&mut self);

    /// The "hide rest of model" document setting.
    fn hide_rest_of_model(&self) -> bool;

    fn set_hide_rest_of_model(&mut self, enabled: bool);

    fn set_status_text(&mut self, text: &str);
}

/// Lookup of open documents, used for teardown across all of them.
pub trait DocumentSet {
    fn document_mut(&mut self, id: DocumentId) -> Option<&mut dyn SceneHost>;
}

/// Per-instance callbacks, delivered only for instances with a registered observer.
pub trait InstanceEvents {
    fn on_close(&mut self, host: &mut dyn SceneHost, instance: &EntityId);
    fn on_open(&mut self, host: &mut dyn SceneHost, instance: &EntityId);
}

/// Document-level save callbacks.
///
/// The host closes every entered context before `on_pre_save` and reopens
/// them before `on_post_save`.
pub trait SaveEvents {
    fn on_pre_save(&mut self, host: &mut dyn SceneHost);
    fn on_post_save(&mut self, host: &mut dyn SceneHost);
}
