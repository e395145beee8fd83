use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::selector::selector_model::Form;

// ============================================================================
// Selector store: shared, in-memory list of saved forms
// ============================================================================

/// Handle returned by `subscribe`, used to remove the observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&[Form])>;

#[derive(Default)]
struct StoreInner {
    forms: Vec<Form>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,

    // Bumped on every write; a notification pass restarts when it moves.
    version: u64,
    notifying: bool,
    // Observers taken out for the current pass, and those unsubscribed during it.
    in_flight: Vec<SubscriptionId>,
    removed: Vec<SubscriptionId>,
}

/// Single source of truth for saved forms.
///
/// Cloning the store clones the handle, not the data: every clone reads
/// and writes the same collection. Constructed once by the application and
/// handed to the editor and the viewer. Nothing is persisted.
#[derive(Clone, Default)]
pub struct SelectorStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl SelectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current collection.
    pub fn forms(&self) -> Vec<Form> {
        self.inner.borrow().forms.clone()
    }

    /// Replace the whole collection, then notify observers in
    /// registration order. No validation is performed.
    ///
    /// Observers may read, write, subscribe and unsubscribe while being
    /// notified. A write made by an observer cuts the current pass short
    /// and every observer is called again with the newer snapshot, so no
    /// observer is left holding a stale one.
    pub fn set_forms(&self, forms: Vec<Form>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.forms = forms;
            inner.version += 1;
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }

        let mut observers = self.take_observers();
        loop {
            let (version, snapshot) = {
                let inner = self.inner.borrow();
                (inner.version, inner.forms.clone())
            };

            for (id, observer) in &observers {
                if self.inner.borrow().removed.contains(id) {
                    continue;
                }
                observer(&snapshot);
                if self.inner.borrow().version != version {
                    break;
                }
            }

            let mut inner = self.inner.borrow_mut();
            let added = std::mem::take(&mut inner.observers);
            observers.extend(added);
            let removed = std::mem::take(&mut inner.removed);
            observers.retain(|(id, _)| !removed.contains(id));

            if inner.version == version {
                inner.observers = observers;
                inner.in_flight.clear();
                inner.notifying = false;
                return;
            }
            inner.in_flight = observers.iter().map(|(id, _)| *id).collect();
        }
    }

    fn take_observers(&self) -> Vec<(SubscriptionId, Observer)> {
        let mut inner = self.inner.borrow_mut();
        let observers = std::mem::take(&mut inner.observers);
        inner.in_flight = observers.iter().map(|(id, _)| *id).collect();
        observers
    }

    /// `set_forms(forms + [form])`.
    pub fn append(&self, form: Form) {
        let mut forms = self.forms();
        forms.push(form);
        self.set_forms(forms);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().forms.is_empty()
    }

    /// Register an observer called with the new snapshot after every write.
    pub fn subscribe(&self, observer: impl Fn(&[Form]) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false when the id was not registered.
    ///
    /// Takes effect immediately, including for the notification pass in
    /// progress.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|(sid, _)| *sid != id);
        if inner.observers.len() != before {
            return true;
        }

        match inner.in_flight.iter().position(|sid| *sid == id) {
            Some(pos) => {
                inner.in_flight.swap_remove(pos);
                inner.removed.push(id);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for SelectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SelectorStore")
            .field("forms", &inner.forms)
            .field("observers", &inner.observers.len())
            .finish()
    }
}
