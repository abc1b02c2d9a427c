//! Observer registry shared by the stores.
//!
//! Callbacks run synchronously in registration order. The registry snapshots its entries before
//! invoking them, so a callback may add or remove observers without deadlocking.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use shared::protocol::UpdateKind;

/// Identity of a registered callback, returned by `add_observer` and used to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<P> = Arc<dyn Fn(UpdateKind, Option<&P>) + Send + Sync>;

/// The registration interface implemented by every store.
pub trait Observable {
    type Payload;

    fn add_observer<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(UpdateKind, Option<&Self::Payload>) + Send + Sync + 'static;

    fn remove_observer(&self, id: ObserverId) -> bool;

    fn notify(&self, kind: UpdateKind, payload: Option<&Self::Payload>);
}

pub struct Observers<P> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ObserverId, Callback<P>)>>,
}

impl<P> Default for Observers<P> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<P> Observers<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(UpdateKind, Option<&P>) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries().push((id, Arc::new(callback)));
        id
    }

    pub fn remove(&self, id: ObserverId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn notify(&self, kind: UpdateKind, payload: Option<&P>) {
        let snapshot: Vec<Callback<P>> = self
            .entries()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(kind, payload);
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(ObserverId, Callback<P>)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
