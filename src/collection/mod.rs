use crate::models::{CollectionItem, ItemId};
use crate::scheduler::DebouncedWriter;
use crate::storage::{load_json, Namespace, SharedStore};
use leptos::logging::{error, log, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub(crate) type Listener<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

struct State<T> {
    items: Vec<T>,
    loaded: bool,
}

struct Inner<T> {
    namespace: Namespace,
    store: SharedStore,
    defaults: Vec<T>,
    state: Mutex<State<T>>,
    writer: DebouncedWriter<Vec<T>>,
    listeners: Mutex<Vec<Listener<T>>>,
}

/// Canonical ordered list of one collection and its only mutation path.
///
/// Every mutation is applied synchronously to the in-memory list, then the
/// full snapshot is handed to the debounced writer and to subscribers.
/// Readers only ever get clones.
pub(crate) struct CollectionController<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for CollectionController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn index_of<T: CollectionItem>(items: &[T], id: &ItemId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Keeps the first occurrence of every id.
fn dedup_by_id<T: CollectionItem>(items: Vec<T>) -> (Vec<T>, usize) {
    let mut seen = HashSet::new();
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Moves `from` to `to` (the target's index before removal).
fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let moved = items.remove(from);
    items.insert(to, moved);
}

impl<T: CollectionItem> CollectionController<T> {
    pub fn new(
        namespace: Namespace,
        store: SharedStore,
        writer: DebouncedWriter<Vec<T>>,
        defaults: Vec<T>,
    ) -> Self {
        let (defaults, _) = dedup_by_id(defaults);
        Self {
            inner: Arc::new(Inner {
                namespace,
                store,
                state: Mutex::new(State {
                    items: defaults.clone(),
                    loaded: false,
                }),
                defaults,
                writer,
                listeners: Mutex::new(vec![]),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State<T>> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener for the list after every applied change.
    pub fn subscribe(&self, listener: Listener<T>) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    fn notify(&self, snapshot: &[T]) {
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(snapshot);
        }
    }

    /// Mutation committed: persist (debounced) and tell subscribers.
    fn commit(&self, snapshot: Vec<T>) {
        self.inner.writer.schedule(snapshot.clone());
        self.notify(&snapshot);
    }

    /// Adopts the stored list, or the defaults when there is none or it
    /// cannot be read. Defaults are not written back until a mutation.
    pub fn load(&self) {
        if self.state().loaded {
            warn!("{} already loaded, ignoring", self.inner.namespace);
            return;
        }

        let ns = self.inner.namespace;
        let items = match load_json::<Vec<T>>(self.inner.store.as_ref(), ns, ns.key()) {
            Ok(Some(stored)) => {
                let (items, dropped) = dedup_by_id(stored);
                if dropped > 0 {
                    warn!("dropped {dropped} duplicate id(s) from stored {ns}");
                }
                items
            }
            Ok(None) => {
                log!("no stored {ns}, using defaults");
                self.inner.defaults.clone()
            }
            Err(e) => {
                error!("Error loading {ns}: {e}");
                self.inner.defaults.clone()
            }
        };

        let snapshot = {
            let mut state = self.state();
            state.items = items;
            state.loaded = true;
            state.items.clone()
        };
        self.notify(&snapshot);
    }

    pub fn items(&self) -> Vec<T> {
        self.state().items.clone()
    }

    pub fn get(&self, id: &ItemId) -> Option<T> {
        let state = self.state();
        index_of(&state.items, id).map(|i| state.items[i].clone())
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    /// Appends a new item with a freshly generated id.
    pub fn add(&self, draft: T::Draft) -> T {
        let item = T::from_draft(ItemId::generate(), draft);
        let snapshot = {
            let mut state = self.state();
            state.items.push(item.clone());
            state.items.clone()
        };
        self.commit(snapshot);
        item
    }

    /// Replaces the item with `id` in place. Unknown ids are ignored.
    pub fn edit(&self, id: &ItemId, replacement: T) -> bool {
        if replacement.id() != id {
            warn!("edit of {id} supplied item {}, ignoring", replacement.id());
            return false;
        }

        let snapshot = {
            let mut state = self.state();
            let Some(i) = index_of(&state.items, id) else {
                return false;
            };
            state.items[i] = replacement;
            state.items.clone()
        };
        self.commit(snapshot);
        true
    }

    /// Removes the item with `id`. Unknown ids are ignored.
    pub fn remove(&self, id: &ItemId) -> bool {
        let (removed, snapshot) = {
            let mut state = self.state();
            let Some(i) = index_of(&state.items, id) else {
                return false;
            };
            (state.items.remove(i), state.items.clone())
        };
        log!("removed \"{}\" from {}", removed.title(), self.inner.namespace);
        self.commit(snapshot);
        true
    }

    /// Moves `moved` to the index `target` currently occupies (list splice,
    /// not swap). No-op if either id is unknown or both are the same.
    pub fn reorder(&self, moved: &ItemId, target: &ItemId) -> bool {
        if moved == target {
            return false;
        }

        let snapshot = {
            let mut state = self.state();
            let (Some(from), Some(to)) = (index_of(&state.items, moved), index_of(&state.items, target))
            else {
                return false;
            };
            splice_move(&mut state.items, from, to);
            state.items.clone()
        };
        self.commit(snapshot);
        true
    }

    /// Writes any pending snapshot now.
    pub fn flush(&self) -> bool {
        self.inner.writer.flush()
    }
}
