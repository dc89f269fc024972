//! Visibility-based deferred execution.
//!
//! The host page owns the actual intersection machinery; this module is the
//! registration layer between it and the widgets: register interest in
//! visibility with a lookahead margin, get the callback invoked at most once
//! when the host signals the element is near-visible, cancel on teardown.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

struct Entry {
    margin_px: u32,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: HashMap<u64, Entry>,
}

/// Registry of pending visibility callbacks.
///
/// Cloning the observer clones a handle to the same registry. Single-threaded;
/// callbacks run on the caller of [`enter_viewport`](Self::enter_viewport).
#[derive(Clone, Default)]
pub struct VisibilityObserver {
    inner: Rc<RefCell<Inner>>,
}

impl VisibilityObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in visibility.
    ///
    /// `margin_px` is the lookahead margin the host should apply so the
    /// callback fires before the element is actually on screen. The callback
    /// is invoked at most once; dropping or cancelling the returned
    /// [`Registration`] guarantees it never runs.
    pub fn observe(&self, margin_px: u32, callback: impl FnOnce() + 'static) -> Registration {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(
            id,
            Entry {
                margin_px,
                callback: Box::new(callback),
            },
        );
        Registration {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Signal that the element for `id` became (near-)visible.
    ///
    /// Fires and removes the matching callback. Returns `false` when the
    /// registration already fired or was cancelled. Repeated signals for the
    /// same id are ignored.
    pub fn enter_viewport(&self, id: u64) -> bool {
        // Remove before invoking so a re-entrant callback sees consistent state.
        let entry = self.inner.borrow_mut().entries.remove(&id);
        match entry {
            Some(entry) => {
                (entry.callback)();
                true
            }
            None => false,
        }
    }

    /// Lookahead margin for a pending registration.
    #[must_use]
    pub fn margin_px(&self, id: u64) -> Option<u32> {
        self.inner.borrow().entries.get(&id).map(|e| e.margin_px)
    }

    /// Number of pending registrations.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Handle to a pending visibility callback.
///
/// Dropping the registration cancels the callback if it has not fired yet.
pub struct Registration {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl Registration {
    /// Identifier the host uses with [`VisibilityObserver::enter_viewport`].
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cancel the pending callback.
    pub fn cancel(self) {
        // Removal happens in Drop.
    }

    fn remove(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().entries.remove(&self.id);
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.remove();
    }
}
