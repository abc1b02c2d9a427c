//! The single active filter.

use std::sync::{PoisonError, RwLock};

use shared::protocol::{FilterKind, UpdateKind};
use tracing::debug;

use crate::observer::{Observable, ObserverId, Observers};

/// Holds the active [`FilterKind`]. Observers are notified with no payload and read the new
/// value back through [`FilterStore::filter`].
#[derive(Default)]
pub struct FilterStore {
    active: RwLock<FilterKind>,
    observers: Observers<FilterKind>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> FilterKind {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the filter and notifies unconditionally. Callers pass [`UpdateKind::Major`] when
    /// switching filters so observers reset the whole view.
    pub fn set_filter(&self, kind: UpdateKind, filter: FilterKind) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = filter;
        debug!(update_kind = ?kind, filter = filter.label(), "filter set");
        self.observers.notify(kind, None);
    }
}

impl Observable for FilterStore {
    type Payload = FilterKind;

    fn add_observer<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(UpdateKind, Option<&FilterKind>) + Send + Sync + 'static,
    {
        self.observers.add(callback)
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    fn notify(&self, kind: UpdateKind, payload: Option<&FilterKind>) {
        self.observers.notify(kind, payload);
    }
}
