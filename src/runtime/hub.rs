use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::foundation::core::ScrollObservation;

type Listener = Rc<RefCell<dyn FnMut(&ScrollObservation)>>;

#[derive(Default)]
struct HubState {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Fan-out of whole-document scroll notifications.
#[derive(Clone, Default)]
pub struct ScrollHub {
    inner: Rc<RefCell<HubState>>,
}

impl std::fmt::Debug for ScrollHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ScrollHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It stays registered exactly as long as the returned guard lives.
    pub fn subscribe(&self, listener: impl FnMut(&ScrollObservation) + 'static) -> Subscription {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let listener: Listener = Rc::new(RefCell::new(listener));
        state.listeners.insert(id, listener);
        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Deliver `obs` to every listener registered at call time that is still registered when its
    /// turn comes.
    pub fn publish(&self, obs: &ScrollObservation) {
        let ids: Vec<u64> = self.inner.borrow().listeners.keys().copied().collect();
        for id in ids {
            let listener = self.inner.borrow().listeners.get(&id).cloned();
            if let Some(listener) = listener {
                let mut f = listener.borrow_mut();
                (*f)(obs);
            }
        }
    }
}

/// Scroll listener registration; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubState>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.hub
            .upgrade()
            .is_some_and(|h| h.borrow().listeners.contains_key(&self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(h) = self.hub.upgrade() {
            let removed = h.borrow_mut().listeners.remove(&self.id);
            // Released outside the borrow: the closure may own other guards.
            drop(removed);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/hub.rs"]
mod tests;
