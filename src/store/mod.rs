//! In-memory reactive key-value store holding the sidebar's inputs.
//!
//! Values are JSON documents keyed by string. Every mutation notifies the
//! registered [`StoreObserver`]s once the new values are readable. Keys keep
//! the position of their first insertion, which is what the sidebar uses to
//! break ordering ties.

pub mod traits;

pub use traits::{ObserverId, SharedObserver, StoreChange, StoreObserver};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::debug;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    value: Value,
}

#[derive(Default)]
pub struct KeyValueStore {
    entries: DashMap<String, Slot>,
    next_seq: AtomicU64,
    next_observer: AtomicU64,
    observers: RwLock<Vec<(ObserverId, SharedObserver)>>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: SharedObserver) -> ObserverId {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::SeqCst));
        self.observers
            .write()
            .expect("RwLock should not be poisoned")
            .push((id, observer));
        id
    }

    /// Stop notifying the observer registered as `id`. Returns whether it was
    /// still registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self
            .observers
            .write()
            .expect("RwLock should not be poisoned");
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .expect("RwLock should not be poisoned")
            .len()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All `(key, value)` pairs under `prefix`, in first-insertion order.
    pub fn collection(&self, prefix: &str) -> Vec<(String, Value)> {
        let mut items: Vec<(u64, String, Value)> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| (entry.seq, entry.key().clone(), entry.value.clone()))
            .collect();
        items.sort_by_key(|(seq, _, _)| *seq);
        items
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect()
    }

    /// Replace the value at `key`. `Value::Null` removes it.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.write(&key, value);
        self.notify(StoreChange::new(vec![key]));
    }

    /// Write several keys and notify once.
    pub fn multi_set<K, I>(&self, entries: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let keys: Vec<String> = entries
            .into_iter()
            .map(|(key, value)| {
                let key = key.into();
                self.write(&key, value);
                key
            })
            .collect();
        if !keys.is_empty() {
            self.notify(StoreChange::new(keys));
        }
    }

    /// Merge `partial` into the value at `key`.
    ///
    /// Objects are merged recursively; any other value replaces what is
    /// stored. `Value::Null` removes the key. The merge happens under the
    /// key's shard lock, so concurrent merges into one key all land.
    pub fn merge(&self, key: impl Into<String>, partial: Value) {
        let key = key.into();
        if partial.is_null() {
            self.entries.remove(&key);
        } else {
            match self.entries.entry(key.clone()) {
                Entry::Occupied(mut occupied) => {
                    merge_values(&mut occupied.get_mut().value, partial)
                }
                Entry::Vacant(vacant) => {
                    let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                    vacant.insert(Slot {
                        seq,
                        value: partial,
                    });
                }
            }
        }
        self.notify(StoreChange::new(vec![key]));
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let removed = self.entries.remove(key).map(|(_, entry)| entry.value);
        if removed.is_some() {
            self.notify(StoreChange::new(vec![key.to_string()]));
        }
        removed
    }

    /// Drop every key. Observers are told which keys went away.
    pub fn clear(&self) {
        let keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        self.entries.clear();
        if !keys.is_empty() {
            self.notify(StoreChange::new(keys));
        }
    }

    fn write(&self, key: &str, value: Value) {
        if value.is_null() {
            self.entries.remove(key);
            return;
        }
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => occupied.get_mut().value = value,
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                vacant.insert(Slot { seq, value });
            }
        }
    }

    fn notify(&self, change: StoreChange) {
        // Snapshot the list so observers may subscribe or mutate the store.
        let observers: Vec<SharedObserver> = self
            .observers
            .read()
            .expect("RwLock should not be poisoned")
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        debug!(
            "Store change on {} key(s), {} observer(s)",
            change.keys.len(),
            observers.len()
        );
        for observer in observers {
            observer.on_change(self, &change);
        }
    }
}

fn merge_values(target: &mut Value, partial: Value) {
    match (target, partial) {
        (Value::Object(existing), Value::Object(updates)) => {
            for (key, value) in updates {
                if value.is_null() {
                    existing.remove(&key);
                    continue;
                }
                match existing.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (target, partial) => *target = partial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn recording_observer() -> (Arc<Mutex<Vec<StoreChange>>>, SharedObserver) {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let observer: SharedObserver =
            Arc::new(move |_: &KeyValueStore, change: &StoreChange| {
                sink.lock().unwrap().push(change.clone());
            });
        (changes, observer)
    }

    #[test]
    fn test_multi_set_notifies_once_with_every_key() {
        let store = KeyValueStore::new();
        let (changes, observer) = recording_observer();
        store.subscribe(observer);

        store.multi_set([("betas", json!([])), ("report_1", json!({"reportID": "1"}))]);

        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].keys, vec!["betas", "report_1"]);
    }

    #[test]
    fn test_observer_sees_new_values() {
        let store = KeyValueStore::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        store.subscribe(Arc::new(move |store: &KeyValueStore, _: &StoreChange| {
            *sink.lock().unwrap() = store.get("betas");
        }));

        store.set("betas", json!(["policyRooms"]));
        assert_eq!(*seen.lock().unwrap(), Some(json!(["policyRooms"])));
    }

    #[test]
    fn test_merge_is_recursive_and_null_deletes() {
        let store = KeyValueStore::new();
        store.set(
            "report_1",
            json!({"reportID": "1", "isPinned": false, "errorFields": {"a": 1, "b": 2}}),
        );

        store.merge(
            "report_1",
            json!({"isPinned": true, "errorFields": {"b": null, "c": 3}}),
        );
        assert_eq!(
            store.get("report_1"),
            Some(json!({"reportID": "1", "isPinned": true, "errorFields": {"a": 1, "c": 3}}))
        );

        store.merge("policy_1", json!({"type": "free"}));
        assert_eq!(store.get("policy_1"), Some(json!({"type": "free"})));

        store.merge("policy_1", Value::Null);
        assert!(!store.contains("policy_1"));
    }

    #[test]
    fn test_merge_replaces_non_objects() {
        let store = KeyValueStore::new();
        store.set("currentlyViewedReportID", json!("1"));
        store.merge("currentlyViewedReportID", json!("2"));
        assert_eq!(store.get("currentlyViewedReportID"), Some(json!("2")));
    }

    #[test]
    fn test_collection_keeps_first_insertion_order() {
        let store = KeyValueStore::new();
        store.set("report_3", json!({"reportID": "3"}));
        store.set("policy_1", json!({"policyID": "1"}));
        store.set("report_1", json!({"reportID": "1"}));
        store.merge("report_3", json!({"isPinned": true}));

        let keys: Vec<String> = store
            .collection("report_")
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["report_3", "report_1"]);
    }

    #[test]
    fn test_clear_reports_removed_keys() {
        let store = KeyValueStore::new();
        store.multi_set([("a", json!(1)), ("b", json!(2))]);
        let (changes, observer) = recording_observer();
        store.subscribe(observer);

        store.clear();
        assert!(store.is_empty());

        let mut keys = changes.lock().unwrap()[0].keys.clone();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);

        store.clear();
        assert_eq!(changes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_merges_into_one_key_all_land() {
        const WRITERS: usize = 8;

        for _ in 0..50 {
            let store = Arc::new(KeyValueStore::new());
            store.set("report_1", json!({"reportID": "1"}));

            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        store.merge("report_1", json!({ format!("field{i}"): i }));
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let merged = store.get("report_1").unwrap();
            for i in 0..WRITERS {
                assert_eq!(merged[format!("field{i}")], json!(i), "{merged}");
            }
        }
    }

    #[test]
    fn test_unsubscribed_observer_is_not_notified() {
        let store = KeyValueStore::new();
        let (changes, observer) = recording_observer();
        let id = store.subscribe(observer);

        store.set("a", json!(1));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set("a", json!(2));

        assert_eq!(changes.lock().unwrap().len(), 1);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn test_remove_notifies_only_when_present() {
        let store = KeyValueStore::new();
        store.set("a", json!(1));
        let (changes, observer) = recording_observer();
        store.subscribe(observer);

        assert_eq!(store.remove("a"), Some(json!(1)));
        assert_eq!(store.remove("a"), None);
        assert_eq!(changes.lock().unwrap().len(), 1);
    }
}
