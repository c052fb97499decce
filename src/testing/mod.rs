//! Test doubles shared by the unit tests: a virtual clock and a store with
//! switchable failures.

use crate::scheduler::{TimerCallback, TimerId, Timers};
use crate::storage::{KvStore, MemoryStore, Namespace, StorageError, StorageResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

struct Armed {
    id: TimerId,
    due_ms: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_id: i32,
    armed: Vec<Armed>,
}

/// Timers that only fire when the test advances the clock.
#[derive(Default)]
pub(crate) struct ManualTimers {
    clock: Mutex<Clock>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> usize {
        self.clock.lock().unwrap().armed.len()
    }

    /// Moves the clock forward, firing due callbacks in deadline order.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.lock().unwrap().now_ms + ms;
        loop {
            let next = {
                let mut clock = self.clock.lock().unwrap();
                let due = clock
                    .armed
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| a.due_ms <= target)
                    .min_by_key(|(_, a)| (a.due_ms, a.id.0))
                    .map(|(i, _)| i);
                match due {
                    Some(i) => {
                        let armed = clock.armed.remove(i);
                        clock.now_ms = armed.due_ms;
                        Some(armed.callback)
                    }
                    None => {
                        clock.now_ms = target;
                        None
                    }
                }
            };

            // Lock released: callbacks may arm new timers.
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl Timers for ManualTimers {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        let mut clock = self.clock.lock().unwrap();
        clock.next_id += 1;
        let id = TimerId(clock.next_id);
        let due_ms = clock.now_ms + u64::from(delay_ms);
        clock.armed.push(Armed {
            id,
            due_ms,
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.clock.lock().unwrap().armed.retain(|a| a.id != id);
    }
}

/// In-memory store whose reads and writes can be made to fail.
#[derive(Default)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KvStore for FlakyStore {
    fn get_item(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::read(namespace, "simulated read failure"));
        }
        self.inner.get_item(namespace, key)
    }

    fn set_item(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::write(namespace, "QuotaExceededError"));
        }
        self.inner.set_item(namespace, key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
