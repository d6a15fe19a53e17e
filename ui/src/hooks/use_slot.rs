//! Binds a persisted store slot to reactive component state.
//!
//! Every component that calls [`use_slot`] with the same key renders from
//! the same underlying value: a `set` here routes through the store, which
//! notifies the subscriptions of every other mounted instance, whose
//! signals update in the same task turn. Unmounting drops the
//! subscription, so no callback ever fires into a dead component.

use crate::store::SlotStore;
use crate::store::StoreError;
use crate::store::Subscription;
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

/// A reactive handle to one store slot.
#[derive(Clone)]
pub struct SlotHandle<T: 'static> {
    value: Signal<T>,
    store: SlotStore,
    key: &'static str,
}

impl<T> SlotHandle<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
{
    /// The current value. Reading through here subscribes the component
    /// to re-render on changes.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// The raw signal, for `rsx!` bindings.
    pub fn signal(&self) -> Signal<T> {
        self.value
    }

    /// Persists `next` and fans it out to every bound component. On
    /// failure nothing changes anywhere; the caller decides what to tell
    /// the user.
    pub fn set(&self, next: &T) -> Result<(), StoreError> {
        self.store.write(self.key, next)
    }

    /// Read-modify-write in one step.
    pub fn modify(&self, mutate: impl FnOnce(&mut T)) -> Result<(), StoreError> {
        let mut value = self.get();
        mutate(&mut value);
        self.set(&value)
    }
}

/// Subscribes this component to a named slot, hydrating it with `default`
/// on the slot's first use anywhere in the app.
pub fn use_slot<T>(key: &'static str, default: impl FnOnce() -> T) -> SlotHandle<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
{
    let store = use_context::<SlotStore>();

    let mut value = use_signal({
        let store = store.clone();
        move || store.read(key, default())
    });

    // The subscription lives exactly as long as this component: it is
    // created once, parked in hook state, and dropped (which unregisters
    // it) on unmount.
    let subscription: Rc<Subscription> = use_hook({
        let store = store.clone();
        move || {
            Rc::new(store.subscribe::<T, _>(key, move |next| {
                if *value.peek() != next {
                    value.set(next);
                }
            }))
        }
    });
    use_drop(move || subscription.unsubscribe());

    SlotHandle { value, store, key }
}
