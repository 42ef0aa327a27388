//! Entering and leaving nested containers

use shared::EntityId;

use super::SceneDocument;

impl SceneDocument {
    /// Enter `instance`, which must be a group or component directly inside
    /// the current context.
    pub fn push_context(&mut self, instance: &EntityId) -> Result<(), String> {
        let parent = self.active_path.last().map(String::as_str);
        if !self.model.children_of(parent).contains(instance) {
            return Err(format!(
                "{instance} is not inside {}",
                parent.unwrap_or("the document root")
            ));
        }
        match self.model.entity(instance) {
            Some(e) if e.is_container() => {
                self.active_path.push(instance.clone());
                Ok(())
            }
            Some(_) => Err(format!("{instance} is not a group or component")),
            None => Err(format!("Unknown entity: {instance}")),
        }
    }

    /// Leave the innermost context, returning it
    pub fn pop_context(&mut self) -> Option<EntityId> {
        self.active_path.pop()
    }

    /// Number of entered contexts
    pub fn context_depth(&self) -> usize {
        self.active_path.len()
    }
}
