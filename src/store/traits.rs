use crate::store::KeyValueStore;
use std::sync::Arc;

/// Keys touched by one store operation.
///
/// A `multi_set` produces a single change listing every key it wrote, so
/// observers never see a half-applied batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreChange {
    pub keys: Vec<String>,
}

impl StoreChange {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn touches(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.keys.iter().any(|key| predicate(key))
    }
}

/// Receives a notification after every mutation of a [`KeyValueStore`].
///
/// Observers run synchronously on the mutating thread, after the new values
/// are visible through the store passed in.
pub trait StoreObserver: Send + Sync {
    fn on_change(&self, store: &KeyValueStore, change: &StoreChange);
}

impl<F> StoreObserver for F
where
    F: Fn(&KeyValueStore, &StoreChange) + Send + Sync,
{
    fn on_change(&self, store: &KeyValueStore, change: &StoreChange) {
        self(store, change)
    }
}

pub type SharedObserver = Arc<dyn StoreObserver>;

/// Handle returned by [`KeyValueStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);
