//! Listener registry standing in for the input platform's event router.
//!
//! Each touch-enabled, running widget owns at most one entry here. The router
//! orders entries by priority and remembers which listeners claimed which
//! touch so that move/end/cancel reach the same listeners that accepted the
//! begin.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::{NodeId, TouchId};

new_key_type! {
    pub struct ListenerId;
}

#[derive(Clone, Copy, Debug)]
struct ListenerEntry {
    node: NodeId,
    priority: i32,
}

#[derive(Default)]
pub struct TouchDispatcher {
    listeners: SlotMap<ListenerId, ListenerEntry>,
    claims: HashMap<TouchId, SmallVec<[ListenerId; 2]>>,
}

impl TouchDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, node: NodeId, priority: i32) -> ListenerId {
        let id = self.listeners.insert(ListenerEntry { node, priority });
        log::debug!("touch listener {id:?} registered for {node:?} at priority {priority}");
        id
    }

    /// Register `node` again under `priority`. Claims held by `old` move to
    /// the new entry so a touch in flight keeps reaching the widget.
    pub(crate) fn reregister(&mut self, old: ListenerId, node: NodeId, priority: i32) -> ListenerId {
        let id = self.register(node, priority);
        for claimers in self.claims.values_mut() {
            for c in claimers.iter_mut().filter(|c| **c == old) {
                *c = id;
            }
        }
        self.deregister(old);
        id
    }

    /// Drops the entry and any claim it holds. Returns false for stale ids.
    pub(crate) fn deregister(&mut self, id: ListenerId) -> bool {
        let Some(entry) = self.listeners.remove(id) else {
            return false;
        };
        for claimers in self.claims.values_mut() {
            claimers.retain(|c| *c != id);
        }
        self.claims.retain(|_, c| !c.is_empty());
        log::debug!("touch listener {id:?} for {:?} deregistered", entry.node);
        true
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn listener_count_for(&self, node: NodeId) -> usize {
        self.listeners.values().filter(|e| e.node == node).count()
    }

    pub fn node_of(&self, id: ListenerId) -> Option<NodeId> {
        self.listeners.get(id).map(|e| e.node)
    }

    pub fn priority_of(&self, id: ListenerId) -> Option<i32> {
        self.listeners.get(id).map(|e| e.priority)
    }

    /// Listeners in the order a touch-begin is offered to them: lowest
    /// priority value first, ties broken front-most first. `draw_order`
    /// gives each node's position in back-to-front paint order.
    pub(crate) fn candidates(&self, draw_order: impl Fn(NodeId) -> usize) -> Vec<ListenerId> {
        let mut ids: Vec<(ListenerId, i32, usize)> = self
            .listeners
            .iter()
            .map(|(id, e)| (id, e.priority, draw_order(e.node)))
            .collect();
        ids.sort_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)));
        ids.into_iter().map(|(id, _, _)| id).collect()
    }

    pub(crate) fn claim(&mut self, touch: TouchId, id: ListenerId) {
        self.claims.entry(touch).or_default().push(id);
    }

    pub(crate) fn claimers(&self, touch: TouchId) -> SmallVec<[ListenerId; 2]> {
        self.claims.get(&touch).cloned().unwrap_or_default()
    }

    pub(crate) fn release_touch(&mut self, touch: TouchId) {
        self.claims.remove(&touch);
    }

    pub fn has_claims(&self, touch: TouchId) -> bool {
        self.claims.contains_key(&touch)
    }
}
