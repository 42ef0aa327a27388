//! Record of which siblings were hidden on behalf of which path element

use std::collections::HashMap;

use shared::EntityId;

/// Path element → siblings the hider switched from visible to hidden.
#[derive(Debug, Default)]
pub struct HideList {
    entries: HashMap<EntityId, Vec<EntityId>>,
}

impl HideList {
    /// Record siblings hidden for `element`, replacing any previous entry.
    /// Entities already recorded under another element are skipped.
    pub fn record(&mut self, element: EntityId, hidden: Vec<EntityId>) {
        self.entries.remove(&element);
        let hidden = hidden
            .into_iter()
            .filter(|e| !self.contains_entity(e))
            .collect();
        self.entries.insert(element, hidden);
    }

    /// Remove and return the entry for `element`
    pub fn take(&mut self, element: &EntityId) -> Option<Vec<EntityId>> {
        self.entries.remove(element)
    }

    /// Siblings hidden on behalf of `element`
    pub fn get(&self, element: &EntityId) -> Option<&[EntityId]> {
        self.entries.get(element).map(Vec::as_slice)
    }

    /// Path elements that currently own an entry
    pub fn elements(&self) -> Vec<EntityId> {
        self.entries.keys().cloned().collect()
    }

    /// Whether `entity` is recorded under any element
    pub fn contains_entity(&self, entity: &EntityId) -> bool {
        self.entries.values().any(|v| v.contains(entity))
    }

    /// Total number of hidden siblings across all elements
    pub fn hidden_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<EntityId> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_and_take() {
        let mut list = HideList::default();
        list.record("A".into(), ids(&["X", "Y"]));
        assert_eq!(list.len(), 1);
        assert_eq!(list.hidden_count(), 2);
        assert_eq!(list.get(&"A".into()), Some(&ids(&["X", "Y"])[..]));

        assert_eq!(list.take(&"A".into()), Some(ids(&["X", "Y"])));
        assert!(list.is_empty());
        assert_eq!(list.take(&"A".into()), None);
    }

    #[test]
    fn test_entity_recorded_under_one_element_only() {
        let mut list = HideList::default();
        list.record("A".into(), ids(&["X"]));
        list.record("B".into(), ids(&["X", "P"]));
        assert_eq!(list.get(&"B".into()), Some(&ids(&["P"])[..]));
        assert_eq!(list.hidden_count(), 2);
    }

    #[test]
    fn test_record_replaces_existing_entry() {
        let mut list = HideList::default();
        list.record("A".into(), ids(&["X"]));
        list.record("A".into(), ids(&["X", "Y"]));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(&"A".into()), Some(&ids(&["X", "Y"])[..]));
    }

    #[test]
    fn test_empty_entry_still_counts_as_element() {
        let mut list = HideList::default();
        list.record("D".into(), Vec::new());
        assert_eq!(list.elements(), ids(&["D"]));
        assert_eq!(list.hidden_count(), 0);
    }
}
