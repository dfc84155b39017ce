//! Synchronous observer primitives.
//!
//! [`Event`] is a listener registry that hands out [`Subscription`] handles,
//! and [`Value`] is a shared observable cell built on top of it. Both are
//! single-threaded: notifications run inline on the mutating thread, after
//! the mutation has been committed, against a snapshot of the listeners.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A synchronous event with any number of listeners.
///
/// Clones share the same listener registry.
pub struct Event<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Event<T> {
    /// Create an event with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped, or forever if it is [detached](Subscription::detach).
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut guard = self.listeners.borrow_mut();
            let id = guard.next_id;
            guard.next_id += 1;
            guard.entries.push((id, Rc::new(listener)));
            id
        };

        let registry: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    pub(crate) fn emit(&self, payload: &T) {
        // Snapshot first so listeners may (un)subscribe while being notified.
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(payload);
        }
    }
}

impl<T: 'static> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.borrow().entries.len())
            .finish()
    }
}

/// Handle to a registered listener.
///
/// Dropping the handle removes the listener.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Keep the listener registered for the lifetime of the event.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Observable value with shared interior mutability.
///
/// `Value<T>` is cheap to clone; clones observe and mutate the same cell.
/// Listeners are notified with the new value only when it actually changes.
pub struct Value<T> {
    inner: Rc<RefCell<T>>,
    changed: Event<T>,
}

impl<T: Clone + PartialEq + 'static> Value<T> {
    /// Create a new value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
            changed: Event::new(),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    /// Check whether the current value equals `other`.
    pub fn is_equal_to(&self, other: &T) -> bool {
        *self.inner.borrow() == *other
    }

    /// Set a new value, returning true if it changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut guard = self.inner.borrow_mut();
            if *guard == value {
                return false;
            }
            *guard = value.clone();
        }
        self.changed.emit(&value);
        true
    }

    /// Subscribe to changes of this value.
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.changed.subscribe(listener)
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            changed: self.changed.clone(),
        }
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Value<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("value", &*self.inner.borrow())
            .field("changed", &self.changed)
            .finish()
    }
}
