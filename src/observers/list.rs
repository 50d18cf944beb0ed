//! Registration list for observers.
//!
//! The list never owns its observers: it keeps `Weak` handles, so dropping an
//! observer is enough to stop notifications. Explicit unregistering is still
//! preferred because it frees the slot immediately.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU32, Ordering};

use super::sink::ObserverError;
use crate::core::Result;

/// Shared by every list, so handles are unique across dice and engines.
static NEXT_OBSERVER_ID: AtomicU32 = AtomicU32::new(0);

/// Handle returned on registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl ObserverId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

/// Observers of type `T` notified in registration order.
pub struct ObserverList<T: ?Sized> {
    entries: Vec<(ObserverId, Weak<RefCell<T>>)>,
}

impl<T: ?Sized> ObserverList<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register an observer and return its handle.
    pub fn register(&mut self, observer: Weak<RefCell<T>>) -> ObserverId {
        // fetch_add wraps at u32::MAX instead of panicking
        let id = ObserverId(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed));
        self.entries.push((id, observer));
        id
    }

    /// Unregister an observer. Unknown ids are ignored.
    ///
    /// Returns whether anything was removed.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered observers that are still alive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|(_, w)| w.strong_count() > 0).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `callback` on every live observer in registration order.
    ///
    /// Dropped observers are pruned first. The first error stops the
    /// sequence and is returned; observers after it are not called.
    pub fn notify(
        &mut self,
        mut callback: impl FnMut(&mut T) -> std::result::Result<(), ObserverError>,
    ) -> Result<()> {
        self.entries.retain(|(_, w)| w.strong_count() > 0);
        let live: Vec<Rc<RefCell<T>>> = self
            .entries
            .iter()
            .filter_map(|(_, w)| w.upgrade())
            .collect();

        for observer in live {
            let mut guard = observer
                .try_borrow_mut()
                .map_err(|_| ObserverError::new("observer is already borrowed"))?;
            callback(&mut *guard)?;
        }
        Ok(())
    }
}

impl<T: ?Sized> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("registered", &self.entries.len())
            .finish()
    }
}
