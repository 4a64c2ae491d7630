#![forbid(unsafe_code)]

//! Document-scoped listener bookkeeping.
//!
//! A gesture that starts on the track keeps receiving move/end events from
//! the whole document. The track does not touch the DOM itself: it asks an
//! [`EventTarget`] (the surface's owning document) to bind or unbind its
//! [`ListenerId`] for a [`ListenerKind`], and the host routes the matching
//! DOM events back into the track.
//!
//! Bindings are held by a [`ListenerRegistration`], which unbinds on drop.
//! Ending a gesture, unmounting, or dropping the track therefore always
//! leaves the document with no bindings for this track.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rangetrack_core::event::{GestureModality, ListenerKind};

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a track's document listeners.
///
/// Plays the role of the bound handler function in DOM
/// `addEventListener`/`removeEventListener` calls: removal only matches the
/// same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a fresh, process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A listener table the track can bind into (a DOM `Document` in browsers).
///
/// Methods take `&self`: like DOM event targets, implementations are shared
/// handles with interior mutability.
pub trait EventTarget {
    /// Bind `listener` for `kind`.
    fn add_event_listener(&self, kind: ListenerKind, listener: ListenerId);

    /// Unbind `listener` for `kind`. Removing an absent binding is a no-op.
    fn remove_event_listener(&self, kind: ListenerKind, listener: ListenerId);
}

/// Deterministic in-memory listener table for hosts and tests.
///
/// Clones share one table, so a clone handed out as a surface's owner
/// document observes the same bindings as the host's copy.
///
/// Unlike the DOM, a repeated add of the same `(kind, listener)` pair is
/// recorded twice. A missing remove therefore shows up as a double binding
/// instead of being silently absorbed.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    bindings: Rc<RefCell<Vec<(ListenerKind, ListenerId)>>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bindings across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Number of bindings for `kind`, across all listeners.
    #[must_use]
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.bindings
            .borrow()
            .iter()
            .filter(|(bound, _)| *bound == kind)
            .count()
    }

    /// Number of times `listener` is bound for `kind`.
    #[must_use]
    pub fn binding_count(&self, kind: ListenerKind, listener: ListenerId) -> usize {
        self.bindings
            .borrow()
            .iter()
            .filter(|binding| **binding == (kind, listener))
            .count()
    }

    /// Listeners to notify for a document event of `kind`, in bind order.
    #[must_use]
    pub fn listeners(&self, kind: ListenerKind) -> Vec<ListenerId> {
        self.bindings
            .borrow()
            .iter()
            .filter(|(bound, _)| *bound == kind)
            .map(|(_, listener)| *listener)
            .collect()
    }
}

impl EventTarget for ListenerRegistry {
    fn add_event_listener(&self, kind: ListenerKind, listener: ListenerId) {
        self.bindings.borrow_mut().push((kind, listener));
    }

    fn remove_event_listener(&self, kind: ListenerKind, listener: ListenerId) {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(index) = bindings.iter().position(|binding| *binding == (kind, listener)) {
            bindings.remove(index);
        }
    }
}

/// Move and end bindings for one modality, held for the life of a gesture.
///
/// Acquiring removes any existing binding of the same kind before adding, so
/// overlapping gesture starts never leave two bindings. Dropping the
/// registration removes both bindings.
#[derive(Debug)]
pub struct ListenerRegistration<D: EventTarget> {
    target: D,
    listener: ListenerId,
    modality: GestureModality,
}

impl<D: EventTarget> ListenerRegistration<D> {
    /// Bind the move and end listeners for `modality` on `target`.
    pub fn acquire(target: D, listener: ListenerId, modality: GestureModality) -> Self {
        for kind in ListenerKind::for_modality(modality) {
            target.remove_event_listener(kind, listener);
            target.add_event_listener(kind, listener);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                event_type = kind.event_type(),
                listener = listener.get(),
                "attached document listener"
            );
        }
        Self {
            target,
            listener,
            modality,
        }
    }

    #[must_use]
    pub const fn modality(&self) -> GestureModality {
        self.modality
    }

    #[must_use]
    pub const fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Unbind now. Equivalent to dropping the registration.
    pub fn release(self) {}
}

impl<D: EventTarget> Drop for ListenerRegistration<D> {
    fn drop(&mut self) {
        for kind in ListenerKind::for_modality(self.modality) {
            self.target.remove_event_listener(kind, self.listener);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                event_type = kind.event_type(),
                listener = self.listener.get(),
                "detached document listener"
            );
        }
    }
}
