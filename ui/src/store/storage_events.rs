// Cross-tab change feed. Browser tabs sharing the same origin observe each
// other's `localStorage` writes through "storage" events; this bridge
// forwards them into the store's normal notification path. It is bound
// once at app start and unbinds when dropped.

// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use fallback::*;

#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use crate::store::SlotStore;
    use dioxus_logger::tracing::warn;
    use wasm_bindgen::prelude::*;

    /// Owns the registered "storage" listener for its whole lifetime.
    pub struct StorageEventBridge {
        listener: Option<Closure<dyn FnMut(web_sys::StorageEvent)>>,
    }

    impl StorageEventBridge {
        pub fn bind(store: SlotStore) -> Self {
            let Some(window) = web_sys::window() else {
                warn!("no window object; cross-tab updates are disabled");
                return Self { listener: None };
            };

            let closure = Closure::wrap(Box::new(move |event: web_sys::StorageEvent| {
                match event.key() {
                    // A null key means the other tab cleared the whole store.
                    None => store.apply_external_clear(),
                    Some(key) => store.apply_external(&key, event.new_value().as_deref()),
                }
            }) as Box<dyn FnMut(web_sys::StorageEvent)>);

            if window
                .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
                .is_err()
            {
                warn!("could not attach the storage listener; cross-tab updates are disabled");
                return Self { listener: None };
            }

            Self {
                listener: Some(closure),
            }
        }
    }

    impl Drop for StorageEventBridge {
        fn drop(&mut self) {
            let Some(closure) = self.listener.take() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "storage",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

/// # Native Implementation
/// Only one process touches the file-backed store, so there is no external
/// writer to listen for.
#[cfg(not(target_arch = "wasm32"))]
mod fallback {
    use crate::store::SlotStore;

    pub struct StorageEventBridge;

    impl StorageEventBridge {
        pub fn bind(_store: SlotStore) -> Self {
            Self
        }
    }
}
