//! Registry of one [`Hider`] per open document

use std::collections::HashMap;

use shared::EntityId;

use crate::hider::Hider;
use crate::host::{DocumentId, DocumentSet, InstanceEvents, SaveEvents, SceneHost};
use crate::state::AppSettings;
use crate::status::Status;

/// Owns every document's hider and dispatches host callbacks to them.
///
/// Created when the extension loads; [`Tracker::destroy_all`] must run before
/// it is dropped or reloaded so no observer outlives it.
#[derive(Debug, Default)]
pub struct Tracker {
    hiders: HashMap<DocumentId, Hider>,
    settings: AppSettings,
}

impl Tracker {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            hiders: HashMap::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// The document's hider, created on first use
    pub fn get(&mut self, host: &mut dyn SceneHost) -> &mut Hider {
        let id = host.document_id();
        self.hiders.entry(id).or_insert_with(|| {
            tracing::debug!("tracking document {id}");
            Hider::new(host)
        })
    }

    /// The document's hider, if it is tracked
    pub fn find(&self, document: DocumentId) -> Option<&Hider> {
        self.hiders.get(&document)
    }

    pub fn find_mut(&mut self, document: DocumentId) -> Option<&mut Hider> {
        self.hiders.get_mut(&document)
    }

    /// The document is closing: tear its hider down and forget it.
    pub fn release(&mut self, host: &mut dyn SceneHost) {
        if let Some(mut hider) = self.hiders.remove(&host.document_id()) {
            hider.destroy(host);
            tracing::info!("released document {}", host.document_id());
        }
    }

    /// Tear down every hider. Documents no longer reachable through
    /// `documents` are simply forgotten.
    pub fn destroy_all(&mut self, documents: &mut dyn DocumentSet) {
        for (id, mut hider) in self.hiders.drain() {
            match documents.document_mut(id) {
                Some(host) => hider.destroy(host),
                None => tracing::debug!("document {id} already gone"),
            }
        }
        tracing::info!("all hiders destroyed");
    }

    pub fn len(&self) -> usize {
        self.hiders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hiders.is_empty()
    }

    fn report(&self, host: &mut dyn SceneHost, status: &Status) {
        host.set_status_text(&status.render(&self.settings));
    }
}

impl InstanceEvents for Tracker {
    fn on_close(&mut self, host: &mut dyn SceneHost, instance: &EntityId) {
        let Some(hider) = self.hiders.get_mut(&host.document_id()) else {
            return;
        };
        if let Some(depth) = hider.on_close(host, instance) {
            tracing::info!("top-level {instance} closed, depth now {depth}");
            self.report(host, &Status::Reapplied { depth });
        }
    }

    fn on_open(&mut self, host: &mut dyn SceneHost, instance: &EntityId) {
        if let Some(hider) = self.hiders.get_mut(&host.document_id()) {
            hider.on_open(host, instance);
        }
    }
}

impl SaveEvents for Tracker {
    fn on_pre_save(&mut self, host: &mut dyn SceneHost) {
        if !self.settings.hider.reconcile_saves {
            return;
        }
        if let Some(hider) = self.hiders.get_mut(&host.document_id()) {
            hider.start_save();
        }
    }

    fn on_post_save(&mut self, host: &mut dyn SceneHost) {
        if !self.settings.hider.reconcile_saves {
            return;
        }
        let Some(hider) = self.hiders.get_mut(&host.document_id()) else {
            return;
        };
        if let Some(depth) = hider.check_save(host) {
            self.report(host, &Status::ReappliedAfterSave { depth });
        }
    }
}
