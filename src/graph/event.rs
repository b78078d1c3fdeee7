//! Graph change events
//!
//! Every successful mutation on the store produces one [`GraphUpdateEvent`],
//! fanned out synchronously to the listeners registered on the store's
//! [`ChangeNotifier`].

use super::edge::Edge;
use super::node::IdeaNode;
use super::types::NodeId;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum GraphUpdateEvent {
    NodeAdded(IdeaNode),
    NodeUpdated(IdeaNode),
    NodeRemoved {
        node_id: NodeId,
    },
    RelationshipAdded(Edge),
    RelationshipUpdated(Edge),
    RelationshipRemoved {
        source_id: NodeId,
        target_id: NodeId,
    },
}

impl GraphUpdateEvent {
    /// Event tag as seen by downstream consumers
    pub fn event_type(&self) -> &'static str {
        match self {
            GraphUpdateEvent::NodeAdded(_) => "nodeAdded",
            GraphUpdateEvent::NodeUpdated(_) => "nodeUpdated",
            GraphUpdateEvent::NodeRemoved { .. } => "nodeRemoved",
            GraphUpdateEvent::RelationshipAdded(_) => "relationshipAdded",
            GraphUpdateEvent::RelationshipUpdated(_) => "relationshipUpdated",
            GraphUpdateEvent::RelationshipRemoved { .. } => "relationshipRemoved",
        }
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&GraphUpdateEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Ordered observer list owned by a graph store.
///
/// Clones share the same registry, so a listener holding a clone can
/// subscribe or unsubscribe while an event is being dispatched. Dispatch
/// works on a snapshot of the list: such changes take effect from the next
/// event on.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; listeners run in registration order
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&GraphUpdateEvent) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.lock();
        let before = registry.listeners.len();
        registry.listeners.retain(|(lid, _)| *lid != id);
        registry.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Deliver `event` to every listener registered at the time of the call
    pub fn emit(&self, event: &GraphUpdateEvent) {
        let snapshot: Vec<Listener> = self
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }

    // Poisoning only means a listener panicked; the list itself is intact.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
