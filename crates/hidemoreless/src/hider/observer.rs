//! Open/close reconciliation.
//!
//! Saving closes every entered context and then reopens the same path. On
//! their own those callbacks look exactly like the user backing out and
//! re-entering. The observer logs nested close and open runs, and a save
//! whose reopen mirrors the preceding close run restores the depth that was
//! in effect before the close run began.

use shared::EntityId;

use super::Depth;
use crate::host::SceneHost;

/// Direction in which a run of events walks the nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nesting {
    /// Each entry is a direct child of the previous one
    Inward,
    /// Each entry is the direct container of the previous one
    Outward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Start,
    Extend(Nesting),
    Break,
}

/// One contiguous run of nested events.
#[derive(Debug, Default)]
struct EventRun {
    entries: Vec<EntityId>,
    nesting: Option<Nesting>,
}

impl EventRun {
    fn step(&self, host: &dyn SceneHost, instance: &EntityId) -> Step {
        let Some(last) = self.entries.last() else {
            return Step::Start;
        };
        let inward = host.contains(last, instance);
        let outward = host.contains(instance, last);
        match self.nesting {
            None if inward => Step::Extend(Nesting::Inward),
            None if outward => Step::Extend(Nesting::Outward),
            Some(Nesting::Inward) if inward => Step::Extend(Nesting::Inward),
            Some(Nesting::Outward) if outward => Step::Extend(Nesting::Outward),
            _ => Step::Break,
        }
    }

    fn push(&mut self, instance: EntityId, step: Step) {
        if let Step::Extend(nesting) = step {
            self.nesting = Some(nesting);
        }
        self.entries.push(instance);
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.nesting = None;
    }
}

/// Event log for one hider
#[derive(Debug, Default)]
pub struct ReconcileObserver {
    opened: EventRun,
    closed: EventRun,
    /// Depth in effect at each logged close, parallel to `closed`
    depths: Vec<Depth>,
}

impl ReconcileObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both runs and the depth snapshots.
    pub fn reset(&mut self) {
        self.opened.clear();
        self.closed.clear();
        self.depths.clear();
    }

    /// Clear only the open run, keeping close history.
    pub fn reset_opened(&mut self) {
        self.opened.clear();
    }

    /// Log a close together with the depth in effect at that moment.
    /// A close that does not continue the current run resets the whole log
    /// and starts a new run.
    pub fn record_close(&mut self, host: &dyn SceneHost, instance: &EntityId, depth: Depth) {
        let step = match self.closed.step(host, instance) {
            Step::Break => {
                tracing::debug!("close of {instance} breaks the close run, resetting log");
                self.reset();
                Step::Start
            }
            step => step,
        };
        self.closed.push(instance.clone(), step);
        self.depths.push(depth);
    }

    /// Log an open; same reset rule as [`ReconcileObserver::record_close`].
    pub fn record_open(&mut self, host: &dyn SceneHost, instance: &EntityId) {
        let step = match self.opened.step(host, instance) {
            Step::Break => {
                tracing::debug!("open of {instance} breaks the open run, resetting log");
                self.reset();
                Step::Start
            }
            step => step,
        };
        self.opened.push(instance.clone(), step);
    }

    /// The host is about to save; prepare to see it reopen the path.
    pub fn start_save(&mut self) {
        self.reset_opened();
    }

    /// Depth to restore if the open run mirrors the tail of the close run.
    ///
    /// The snapshot comes from the oldest close inside the matched tail.
    pub fn matched_save(&self) -> Option<Depth> {
        let opened = &self.opened.entries;
        let closed = &self.closed.entries;
        if opened.is_empty() || closed.is_empty() || opened.len() > closed.len() {
            return None;
        }
        let start = closed.len() - opened.len();
        let mirrored = closed[start..].iter().rev().eq(opened.iter());
        if mirrored {
            self.depths.get(start).copied()
        } else {
            None
        }
    }

    /// No events logged since the last reset
    pub fn is_idle(&self) -> bool {
        self.opened.entries.is_empty() && self.closed.entries.is_empty()
    }

    pub fn opened(&self) -> &[EntityId] {
        &self.opened.entries
    }

    pub fn closed(&self) -> &[EntityId] {
        &self.closed.entries
    }

    /// Depth snapshots, one per logged close
    pub fn depths(&self) -> &[Depth] {
        &self.depths
    }
}
