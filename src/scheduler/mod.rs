use crate::storage::{save_json, Namespace, SharedStore, StorageError};
use leptos::logging::{error, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use wasm_bindgen::JsCast;

pub(crate) type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TimerId(pub i32);

/// One-shot timer source.
pub(crate) trait Timers: Send + Sync {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId;

    fn clear_timeout(&self, id: TimerId);
}

pub(crate) type SharedTimers = Arc<dyn Timers>;

/// `window.setTimeout` / `window.clearTimeout`.
pub(crate) struct WindowTimers;

impl Timers for WindowTimers {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        let Some(win) = web_sys::window() else {
            // Nothing to defer to; run the write now.
            warn!("no window for timers, running callback immediately");
            callback();
            return TimerId(0);
        };

        let cb = wasm_bindgen::closure::Closure::once_into_js(move || callback());
        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .unwrap_or(0);
        TimerId(tid)
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(id.0);
        }
    }
}

pub(crate) type ErrorHook = Arc<dyn Fn(&StorageError) + Send + Sync>;

struct Slot<T> {
    pending: Option<T>,
    timer: Option<TimerId>,
    /// Bumped on every arm/disarm so a stale timer callback can tell it lost.
    generation: u64,
}

struct WriterInner<T> {
    namespace: Namespace,
    store: SharedStore,
    timers: SharedTimers,
    delay_ms: u32,
    slot: Mutex<Slot<T>>,
    on_error: Mutex<Option<ErrorHook>>,
}

/// Coalesces bursts of snapshots into a single delayed durable write.
///
/// At most one timer is armed at any time. Only the most recent snapshot is
/// kept; earlier ones in the same burst are never written.
pub(crate) struct DebouncedWriter<T> {
    inner: Arc<WriterInner<T>>,
}

impl<T> Clone for DebouncedWriter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> DebouncedWriter<T>
where
    T: Serialize + Send + 'static,
{
    pub fn new(namespace: Namespace, store: SharedStore, timers: SharedTimers, delay_ms: u32) -> Self {
        Self {
            inner: Arc::new(WriterInner {
                namespace,
                store,
                timers,
                delay_ms,
                slot: Mutex::new(Slot {
                    pending: None,
                    timer: None,
                    generation: 0,
                }),
                on_error: Mutex::new(None),
            }),
        }
    }

    /// Called with every failed write (after it has been logged).
    pub fn set_error_hook(&self, hook: ErrorHook) {
        *self.inner.on_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    fn slot(&self) -> MutexGuard<'_, Slot<T>> {
        self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `snapshot` as the value to persist and (re)arms the timer.
    pub fn schedule(&self, snapshot: T) {
        let (stale, generation) = {
            let mut slot = self.slot();
            slot.pending = Some(snapshot);
            slot.generation += 1;
            (slot.timer.take(), slot.generation)
        };

        if let Some(tid) = stale {
            self.inner.timers.clear_timeout(tid);
        }

        let weak: Weak<WriterInner<T>> = Arc::downgrade(&self.inner);
        let tid = self.inner.timers.set_timeout(
            self.inner.delay_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    DebouncedWriter { inner }.on_timer(generation);
                }
            }),
        );

        let mut slot = self.slot();
        if slot.generation == generation && slot.pending.is_some() {
            slot.timer = Some(tid);
        }
    }

    fn on_timer(&self, generation: u64) {
        let snapshot = {
            let mut slot = self.slot();
            if slot.generation != generation {
                return;
            }
            slot.timer = None;
            slot.pending.take()
        };

        if let Some(snapshot) = snapshot {
            self.write(&snapshot);
        }
    }

    /// Writes the pending snapshot now. Returns whether a write was attempted.
    pub fn flush(&self) -> bool {
        match self.cancel() {
            Some(snapshot) => {
                self.write(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Disarms the timer and hands back the pending snapshot without writing it.
    pub fn cancel(&self) -> Option<T> {
        let (stale, snapshot) = {
            let mut slot = self.slot();
            slot.generation += 1;
            (slot.timer.take(), slot.pending.take())
        };

        if let Some(tid) = stale {
            self.inner.timers.clear_timeout(tid);
        }
        snapshot
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.slot().pending.is_some()
    }

    fn write(&self, snapshot: &T) {
        let ns = self.inner.namespace;
        if let Err(e) = save_json(self.inner.store.as_ref(), ns, ns.key(), snapshot) {
            // In-memory state stays authoritative; the next successful write carries it forward.
            error!("Error saving {ns}: {e}");
            let hook = self
                .inner
                .on_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(hook) = hook {
                hook(&e);
            }
        }
    }
}
