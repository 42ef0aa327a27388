//! Per-document visibility state
//!
//! A [`Hider`] hides every group and component that is not an ancestor of the
//! entered context, level by level from the document root down to its
//! [`Depth`], and remembers exactly what it hid so it can put it back.

mod hide_list;
mod observer;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use shared::EntityId;

pub use hide_list::HideList;
pub use observer::ReconcileObserver;

use crate::host::{DocumentId, SceneHost};

/// How many levels of the active path keep their non-ancestor siblings hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// No hiding in effect
    #[default]
    Disabled,
    /// Hide siblings at levels `0..=n`
    Level(usize),
}

impl Depth {
    pub fn level(self) -> Option<usize> {
        match self {
            Depth::Disabled => None,
            Depth::Level(n) => Some(n),
        }
    }

    pub fn is_disabled(self) -> bool {
        self == Depth::Disabled
    }

    /// One level deeper; enabling starts at level 0.
    pub fn deeper(self) -> Depth {
        match self {
            Depth::Disabled => Depth::Level(0),
            Depth::Level(n) => Depth::Level(n + 1),
        }
    }

    /// One level shallower; level 0 disables.
    pub fn shallower(self) -> Depth {
        match self {
            Depth::Disabled | Depth::Level(0) => Depth::Disabled,
            Depth::Level(n) => Depth::Level(n - 1),
        }
    }

    /// Clamp down to `max`; never raises the level.
    pub fn clamp_to(self, max: usize) -> Depth {
        match self {
            Depth::Disabled => Depth::Disabled,
            Depth::Level(n) => Depth::Level(n.min(max)),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Disabled => write!(f, "disabled"),
            Depth::Level(n) => write!(f, "{n}"),
        }
    }
}

/// Visibility state for one document
#[derive(Debug)]
pub struct Hider {
    document: DocumentId,
    depth: Depth,
    hide_list: HideList,
    observer: ReconcileObserver,
    /// Instances we asked the host to send open/close callbacks for
    registered: HashSet<EntityId>,
}

impl Hider {
    /// Create a hider for `host` and subscribe to its save callbacks.
    pub fn new(host: &mut dyn SceneHost) -> Self {
        host.add_save_observer();
        Self {
            document: host.document_id(),
            depth: Depth::Disabled,
            hide_list: HideList::default(),
            observer: ReconcileObserver::new(),
            registered: HashSet::new(),
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Set the requested depth. Takes effect on the next [`Hider::hide`].
    pub fn set_depth(&mut self, depth: Depth) {
        self.depth = depth;
    }

    pub fn hide_list(&self) -> &HideList {
        &self.hide_list
    }

    pub fn observer(&self) -> &ReconcileObserver {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut ReconcileObserver {
        &mut self.observer
    }

    /// Whether open/close callbacks for `instance` are routed to us
    pub fn is_registered(&self, instance: &EntityId) -> bool {
        self.registered.contains(instance)
    }

    /// Recompute hidden siblings for the current active path and depth.
    pub fn hide(&mut self, host: &mut dyn SceneHost) {
        let active = host.active_path();
        self.unhide_all(host);

        let requested = match self.depth.level() {
            Some(level) if active.len() > 1 => level,
            _ => {
                self.depth = Depth::Disabled;
                return;
            }
        };
        let depth = requested.min(active.len() - 1);
        if depth < requested {
            tracing::debug!("clamped depth {requested} to {depth}");
        }
        self.depth = Depth::Level(depth);

        // The outermost ancestor always stays visible
        host.set_hidden(&active[0], false);

        let mut parent: Option<&EntityId> = None;
        for (level, element) in active.iter().enumerate().take(depth + 1) {
            let children = host.container_children(parent);
            if children.is_empty() {
                break;
            }
            let hidden: Vec<EntityId> = children
                .into_iter()
                .filter(|child| {
                    child != element && host.on_visible_layer(child) && !host.is_hidden(child)
                })
                .collect();
            for child in &hidden {
                host.set_hidden(child, true);
            }
            tracing::debug!("level {level}: hid {} siblings of {element}", hidden.len());
            self.hide_list.record(element.clone(), hidden);
            self.register(host, element);
            parent = Some(element);
        }
    }

    /// Reveal the siblings hidden on behalf of `instance`. No-op if none.
    pub fn unhide(&mut self, host: &mut dyn SceneHost, instance: &EntityId) {
        if let Some(entities) = self.hide_list.take(instance) {
            for entity in &entities {
                host.set_hidden(entity, false);
            }
        }
    }

    /// Reveal everything and drop the observers of every cleared element.
    pub fn unhide_all(&mut self, host: &mut dyn SceneHost) {
        for instance in self.hide_list.elements() {
            self.unhide(host, &instance);
            self.deregister(host, &instance);
        }
    }

    /// Stop receiving callbacks for `instance`. Idempotent.
    pub fn deregister(&mut self, host: &mut dyn SceneHost, instance: &EntityId) {
        if self.registered.remove(instance) {
            host.remove_instance_observer(instance);
        }
    }

    /// Drop every instance observer, including those whose level was already
    /// revealed by a close.
    pub fn deregister_all(&mut self, host: &mut dyn SceneHost) {
        for instance in std::mem::take(&mut self.registered) {
            host.remove_instance_observer(&instance);
        }
    }

    fn register(&mut self, host: &mut dyn SceneHost, instance: &EntityId) {
        if self.registered.insert(instance.clone()) {
            host.add_instance_observer(instance);
        }
    }

    /// Undo everything this hider did to the document and detach from it.
    pub fn destroy(&mut self, host: &mut dyn SceneHost) {
        self.observer.reset();
        self.unhide_all(host);
        self.deregister_all(host);
        host.remove_save_observer();
        self.depth = Depth::Disabled;
    }

    /// An observed instance was closed.
    ///
    /// Returns the new depth when the top-level context closed and hiding was
    /// recomputed.
    pub fn on_close(&mut self, host: &mut dyn SceneHost, instance: &EntityId) -> Option<Depth> {
        self.observer.record_close(host, instance, self.depth);
        self.unhide(host, instance);
        if host.is_top_level(instance) {
            self.hide(host);
            Some(self.depth)
        } else {
            None
        }
    }

    /// An observed instance was opened.
    pub fn on_open(&mut self, host: &mut dyn SceneHost, instance: &EntityId) {
        self.observer.record_open(host, instance);
    }

    /// The host is about to save.
    pub fn start_save(&mut self) {
        self.observer.start_save();
    }

    /// The host finished saving. If it reopened the path it closed, restore
    /// the depth from before the close run and return it.
    pub fn check_save(&mut self, host: &mut dyn SceneHost) -> Option<Depth> {
        let depth = self.observer.matched_save()?;
        if depth.is_disabled() && self.depth.is_disabled() {
            // Nothing was hidden before the save, so there is nothing to restore
            self.observer.reset();
            return None;
        }
        self.depth = depth;
        self.hide(host);
        self.observer.reset();
        tracing::info!("reapplied depth {} after save", self.depth);
        Some(self.depth)
    }
}
