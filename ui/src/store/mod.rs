//! The persisted reactive store.
//!
//! Every screen that cares about a named value ("slot") goes through one
//! shared [`SlotStore`]: reads hydrate from durable storage, writes persist
//! and then synchronously fan out to every subscriber of that slot, so all
//! mounted views agree on the value within the same task turn. Changes made
//! by another tab arrive through [`SlotStore::apply_external`], fed by the
//! platform's storage-change events.
//!
//! The store is single-threaded by construction (`Rc` inner, no locks): the
//! UI event loop is the only writer, and notification completes before
//! `write` returns, so no reader ever observes a half-updated slot.

mod backend;
mod storage_events;

pub use backend::default_backend;
pub use backend::BackendError;
#[cfg(not(target_arch = "wasm32"))]
pub use backend::FileBackend;
#[cfg(target_arch = "wasm32")]
pub use backend::LocalStorageBackend;
pub use backend::MemoryBackend;
pub use backend::StorageBackend;
pub use storage_events::StorageEventBridge;

use dioxus_logger::tracing::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::rc::Weak;

/// A write that could not be applied. The previous durable and in-memory
/// values are left intact in every case.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

type BoxedCallback = Rc<RefCell<dyn FnMut(&Value)>>;

struct Subscriber {
    id: u64,
    callback: BoxedCallback,
}

struct SlotState {
    /// The decoded current value. Always the most recent successful write
    /// (or hydration), never an intermediate state.
    current: Value,
    /// What the slot reverts to when cleared externally.
    default: Value,
    subscribers: Vec<Subscriber>,
}

struct StoreInner {
    backend: RefCell<Box<dyn StorageBackend>>,
    slots: RefCell<HashMap<String, SlotState>>,
    next_subscriber_id: Cell<u64>,
}

/// A cheaply clonable handle to the shared store.
///
/// Construct exactly one per app (see `LoadedApp`) and hand it to
/// consumers through context; slots are identified by string keys, and all
/// handles observe the same state.
#[derive(Clone)]
pub struct SlotStore {
    inner: Rc<StoreInner>,
}

impl SlotStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                backend: RefCell::new(backend),
                slots: RefCell::new(HashMap::new()),
                next_subscriber_id: Cell::new(0),
            }),
        }
    }

    /// Returns the current value for `key`, falling back to `default`.
    ///
    /// The first access for a key hydrates it from durable storage. A
    /// missing or undecodable durable entry makes `default` the current
    /// value; decode failures are logged, never raised.
    pub fn read<T>(&self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        {
            let mut slots = self.inner.slots.borrow_mut();
            if let Some(slot) = slots.get_mut(key) {
                // A slot first touched by `subscribe` has no registered
                // default yet; adopt this one.
                if slot.default.is_null() {
                    slot.default = encode_or_null(key, &default);
                }
                return match serde_json::from_value(slot.current.clone()) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!("slot `{key}`: cached value does not match the requested shape: {err}");
                        default
                    }
                };
            }
        }
        let default_json = encode_or_null(key, &default);
        let current = self.hydrate(key, default_json.clone());
        let value = match serde_json::from_value(current.clone()) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("slot `{key}`: stored value does not match the requested shape: {err}");
                None
            }
        };
        match value {
            Some(value) => value,
            None => {
                // Treat the default as the current value from here on.
                if let Some(slot) = self.inner.slots.borrow_mut().get_mut(key) {
                    slot.current = default_json;
                }
                default
            }
        }
    }

    /// Persists `value` under `key` and synchronously notifies every
    /// subscriber of that key, in registration order.
    ///
    /// All-or-nothing: if encoding or the durable write fails, neither the
    /// cached value nor the durable value changes and nobody is notified.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        let json = serde_json::to_value(value)?;
        self.inner.backend.borrow_mut().store(key, &raw)?;

        {
            let mut slots = self.inner.slots.borrow_mut();
            let slot = slots.entry(key.to_string()).or_insert_with(|| SlotState {
                current: Value::Null,
                default: Value::Null,
                subscribers: Vec::new(),
            });
            slot.current = json.clone();
        }
        self.notify(key, &json);
        Ok(())
    }

    /// Registers `callback` for `key` and immediately invokes it once with
    /// the current value (the default, if nothing was ever written). It
    /// then fires on every subsequent write from any handle until the
    /// returned [`Subscription`] is dropped or unsubscribed.
    ///
    /// Deliveries are decoded per subscriber, so a payload that no longer
    /// matches `T` is logged and skipped instead of crashing the view.
    pub fn subscribe<T, F>(&self, key: &str, mut callback: F) -> Subscription
    where
        T: DeserializeOwned + 'static,
        F: FnMut(T) + 'static,
    {
        let key_owned = key.to_string();
        let decode_key = key_owned.clone();
        let wrapped: BoxedCallback = Rc::new(RefCell::new(move |value: &Value| {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(typed) => callback(typed),
                Err(err) => {
                    warn!("slot `{decode_key}`: dropping delivery that does not match the subscriber's shape: {err}");
                }
            }
        }));

        let id = self.inner.next_subscriber_id.get();
        self.inner.next_subscriber_id.set(id + 1);

        let current = self.hydrate(key, Value::Null);
        if let Some(slot) = self.inner.slots.borrow_mut().get_mut(key) {
            slot.subscribers.push(Subscriber {
                id,
                callback: wrapped.clone(),
            });
        }

        // Initial delivery happens outside any store borrow so the callback
        // may freely read or write other slots.
        if let Ok(mut cb) = wrapped.try_borrow_mut() {
            cb(&current);
        }

        Subscription {
            store: Rc::downgrade(&self.inner),
            key: key_owned,
            id,
            active: Cell::new(true),
        }
    }

    /// Applies a change made by another tab sharing the durable storage.
    ///
    /// `raw` is the backend's new serialized value, or `None` when the key
    /// was removed. A malformed payload leaves the local cached value
    /// unchanged; local state is never clobbered with garbage.
    pub fn apply_external(&self, key: &str, raw: Option<&str>) {
        let updated = {
            let mut slots = self.inner.slots.borrow_mut();
            // A key nobody has read or subscribed to has no local state to
            // update; it will hydrate fresh on first use.
            let Some(slot) = slots.get_mut(key) else {
                return;
            };
            match raw {
                Some(raw) => match serde_json::from_str::<Value>(raw) {
                    Ok(value) => {
                        slot.current = value.clone();
                        value
                    }
                    Err(err) => {
                        warn!("slot `{key}`: ignoring malformed cross-tab update: {err}");
                        return;
                    }
                },
                None => {
                    let default = slot.default.clone();
                    slot.current = default.clone();
                    default
                }
            }
        };
        self.notify(key, &updated);
    }

    /// Reverts every materialized slot to its default. Used when the whole
    /// durable store is cleared externally.
    pub fn apply_external_clear(&self) {
        let keys: Vec<String> = self.inner.slots.borrow().keys().cloned().collect();
        for key in keys {
            self.apply_external(&key, None);
        }
    }

    /// Ensures a slot exists for `key`, hydrating it from the backend on
    /// first touch, and returns its current value.
    fn hydrate(&self, key: &str, default: Value) -> Value {
        if let Some(slot) = self.inner.slots.borrow().get(key) {
            return slot.current.clone();
        }

        let loaded = match self.inner.backend.borrow().load(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!("slot `{key}`: discarding undecodable durable value: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("slot `{key}`: durable storage unreadable, using the default: {err}");
                None
            }
        };
        let current = loaded.unwrap_or_else(|| default.clone());
        self.inner.slots.borrow_mut().insert(
            key.to_string(),
            SlotState {
                current: current.clone(),
                default,
                subscribers: Vec::new(),
            },
        );
        current
    }

    fn notify(&self, key: &str, value: &Value) {
        // Snapshot the subscriber list first: callbacks are invoked without
        // any store borrow held, so they may subscribe, unsubscribe, or
        // write other slots.
        let snapshot: Vec<(u64, BoxedCallback)> = match self.inner.slots.borrow().get(key) {
            Some(slot) => slot
                .subscribers
                .iter()
                .map(|s| (s.id, s.callback.clone()))
                .collect(),
            None => return,
        };

        for (id, callback) in snapshot {
            let still_registered = self
                .inner
                .slots
                .borrow()
                .get(key)
                .is_some_and(|slot| slot.subscribers.iter().any(|s| s.id == id));
            if !still_registered {
                continue;
            }
            // A callback that triggers a write to its own key would re-enter
            // itself; try_borrow_mut drops that delivery instead of aborting.
            if let Ok(mut cb) = callback.try_borrow_mut() {
                cb(value);
            }
        }
    }
}

/// De-registration handle for one subscriber.
///
/// Unsubscribing is idempotent, and dropping the handle unsubscribes too,
/// so a subscription can never outlive the component that owns it.
pub struct Subscription {
    store: Weak<StoreInner>,
    key: String,
    id: u64,
    active: Cell<bool>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let mut slots = store.slots.borrow_mut();
        if let Some(slot) = slots.get_mut(&self.key) {
            slot.subscribers.retain(|s| s.id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

fn encode_or_null<T: Serialize>(key: &str, value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(json) => json,
        Err(err) => {
            warn!("slot `{key}`: default value is not JSON-encodable: {err}");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::rc::Rc;

    fn store() -> SlotStore {
        SlotStore::new(Box::new(MemoryBackend::new()))
    }

    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T)) {
        let seen: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value: T| sink.borrow_mut().push(value))
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
    struct Item {
        id: String,
        title: String,
    }

    fn item(id: &str, title: &str) -> Item {
        Item {
            id: id.into(),
            title: title.into(),
        }
    }

    #[test]
    fn read_returns_default_when_nothing_was_written() {
        let store = store();
        let value: Vec<Item> = store.read("watchlist", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn written_values_round_trip() {
        let store = store();
        let items = vec![item("1", "X")];
        store.write("watchlist", &items).unwrap();
        assert_eq!(store.read::<Vec<Item>>("watchlist", Vec::new()), items);
    }

    #[test]
    fn a_second_independent_subscriber_sees_the_write_without_reload() {
        let store = store();
        assert!(store.read::<Vec<Item>>("watchlist", Vec::new()).is_empty());
        store.write("watchlist", &vec![item("1", "X")]).unwrap();

        // Simulates a component mounted elsewhere in the same document.
        let (seen, record) = recorder::<Vec<Item>>();
        let _sub = store.subscribe("watchlist", record);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], vec![item("1", "X")]);
    }

    #[test]
    fn subscribers_observe_writes_in_program_order() {
        let store = store();
        let (seen, record) = recorder::<u32>();
        let _sub = store.subscribe("counter", record);

        store.write("counter", &1u32).unwrap();
        store.write("counter", &2u32).unwrap();

        // Initial delivery is null -> dropped (no value yet); then 1, 2.
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(store.read("counter", 0u32), 2);
    }

    #[test]
    fn subscribe_delivers_the_default_immediately() {
        let store = store();
        let _ = store.read("flags", false);
        let (seen, record) = recorder::<bool>();
        let _sub = store.subscribe("flags", record);
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn unsubscribe_is_idempotent_and_final() {
        let store = store();
        let _ = store.read("counter", 0u32);
        let (seen, record) = recorder::<u32>();
        let sub = store.subscribe("counter", record);
        store.write("counter", &1u32).unwrap();

        sub.unsubscribe();
        sub.unsubscribe();
        store.write("counter", &2u32).unwrap();

        assert_eq!(*seen.borrow(), vec![0, 1]);
    }

    #[test]
    fn dropping_the_subscription_stops_deliveries() {
        let store = store();
        let _ = store.read("counter", 0u32);
        let (seen, record) = recorder::<u32>();
        drop(store.subscribe::<u32, _>("counter", record));
        store.write("counter", &7u32).unwrap();
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn failed_writes_leave_the_previous_value_intact() {
        let store = SlotStore::new(Box::new(MemoryBackend::with_quota(64)));
        store.write("watchlist", &vec![item("1", "X")]).unwrap();

        let huge: Vec<Item> = (0..100).map(|i| item(&i.to_string(), "padding")).collect();
        let err = store.write("watchlist", &huge).unwrap_err();
        assert!(matches!(err, StoreError::Backend(BackendError::QuotaExceeded { .. })));

        assert_eq!(
            store.read::<Vec<Item>>("watchlist", Vec::new()),
            vec![item("1", "X")]
        );
    }

    #[test]
    fn failed_writes_do_not_notify() {
        let store = SlotStore::new(Box::new(MemoryBackend::with_quota(64)));
        store.write("watchlist", &vec![item("1", "X")]).unwrap();
        let (seen, record) = recorder::<Vec<Item>>();
        let _sub = store.subscribe("watchlist", record);

        let huge: Vec<Item> = (0..100).map(|i| item(&i.to_string(), "padding")).collect();
        let _ = store.write("watchlist", &huge);
        assert_eq!(seen.borrow().len(), 1); // just the initial delivery
    }

    #[test]
    fn corrupt_durable_data_falls_back_to_the_default() {
        let mut backend = MemoryBackend::new();
        backend.store("watchlist", "{not json").unwrap();
        let store = SlotStore::new(Box::new(backend));
        assert!(store.read::<Vec<Item>>("watchlist", Vec::new()).is_empty());
    }

    #[test]
    fn external_writes_reach_subscribers() {
        let store = store();
        let _ = store.read("watchlist", Vec::<Item>::new());
        let (seen, record) = recorder::<Vec<Item>>();
        let _sub = store.subscribe("watchlist", record);

        store.apply_external("watchlist", Some(r#"[{"id":"9","title":"Other Tab"}]"#));
        assert_eq!(seen.borrow().last().unwrap(), &vec![item("9", "Other Tab")]);
    }

    #[test]
    fn malformed_external_writes_are_ignored() {
        let store = store();
        store.write("watchlist", &vec![item("1", "X")]).unwrap();
        let (seen, record) = recorder::<Vec<Item>>();
        let _sub = store.subscribe("watchlist", record);

        store.apply_external("watchlist", Some("{definitely not json"));

        assert_eq!(seen.borrow().len(), 1); // no extra delivery
        assert_eq!(
            store.read::<Vec<Item>>("watchlist", Vec::new()),
            vec![item("1", "X")]
        );
    }

    #[test]
    fn external_removal_reverts_to_the_registered_default() {
        let store = store();
        let _ = store.read("counter", 42u32);
        store.write("counter", &7u32).unwrap();
        let (seen, record) = recorder::<u32>();
        let _sub = store.subscribe("counter", record);

        store.apply_external("counter", None);
        assert_eq!(*seen.borrow(), vec![7, 42]);
        assert_eq!(store.read("counter", 0u32), 42);
    }

    #[test]
    fn shape_mismatched_deliveries_are_skipped_not_fatal() {
        let store = store();
        store.write("watchlist", &vec![item("1", "X")]).unwrap();
        let (seen, record) = recorder::<u32>(); // wrong shape on purpose
        let _sub = store.subscribe::<u32, _>("watchlist", record);
        store.write("watchlist", &vec![item("2", "Y")]).unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn a_subscriber_may_unsubscribe_another_during_delivery() {
        let store = store();
        let _ = store.read("counter", 0u32);

        let (seen, record) = recorder::<u32>();
        let second = Rc::new(RefCell::new(None::<Subscription>));

        let killer = second.clone();
        let _first = store.subscribe::<u32, _>("counter", move |_| {
            if let Some(sub) = killer.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        *second.borrow_mut() = Some(store.subscribe("counter", record));
        seen.borrow_mut().clear(); // ignore the initial delivery

        store.write("counter", &5u32).unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clearing_everything_reverts_all_slots() {
        let store = store();
        let _ = store.read("a", 1u32);
        let _ = store.read("b", 2u32);
        store.write("a", &10u32).unwrap();
        store.write("b", &20u32).unwrap();

        store.apply_external_clear();
        assert_eq!(store.read("a", 0u32), 1);
        assert_eq!(store.read("b", 0u32), 2);
    }
}
