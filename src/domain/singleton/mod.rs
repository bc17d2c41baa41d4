//! Singleton Registry
//!
//! One lazily created instance per key. Each slot moves
//! `Uncreated -> Creating -> Created`; the caller that wins the
//! `Uncreated -> Creating` transition runs the factory, everyone else
//! blocks on the slot's condition variable until it leaves `Creating`.
//! A failed or panicking factory puts the slot back to `Uncreated` and
//! wakes the waiters, one of which then retries. A factory asking for its
//! own key gets `ReentrantCreation` instead of waiting on itself.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use tracing::{debug, trace};

use crate::error::{KitError, KitResult};

type Instance = Arc<dyn Any + Send + Sync>;

/// Observable creation state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Uncreated,
    Creating,
    Created,
}

enum Slot {
    Uncreated,
    /// Being created by the given thread.
    Creating(ThreadId),
    Created(Instance),
}

impl Slot {
    fn state(&self) -> SlotState {
        match self {
            Slot::Uncreated => SlotState::Uncreated,
            Slot::Creating(_) => SlotState::Creating,
            Slot::Created(_) => SlotState::Created,
        }
    }
}

struct SlotCell {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl SlotCell {
    fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Uncreated),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the slot is not `Creating`. Returns `None` when the
    /// calling thread is the one creating it.
    fn settled(&self) -> Option<MutexGuard<'_, Slot>> {
        let me = thread::current().id();
        let mut slot = self.lock();
        while let Slot::Creating(owner) = *slot {
            if owner == me {
                return None;
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
        Some(slot)
    }

    fn publish(&self, next: Slot) {
        *self.lock() = next;
        self.ready.notify_all();
    }
}

/// Held by the creating caller; rolls the slot back unless completed.
struct Creation<'a> {
    cell: &'a SlotCell,
    done: bool,
}

impl Creation<'_> {
    fn complete(mut self, instance: Instance) {
        self.done = true;
        self.cell.publish(Slot::Created(instance));
    }
}

impl Drop for Creation<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.cell.publish(Slot::Uncreated);
        }
    }
}

/// Keyed registry of lazily created single instances.
#[derive(Default)]
pub struct SingletonRegistry {
    slots: Mutex<HashMap<String, Arc<SlotCell>>>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &str) -> Arc<SlotCell> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(SlotCell::new())),
        )
    }

    fn existing(&self, key: &str) -> Option<Arc<SlotCell>> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Return the instance for `key`, creating it with `factory` on first use.
    pub fn get<T, F>(&self, key: &str, factory: F) -> KitResult<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        self.try_get(key, || Ok::<T, std::convert::Infallible>(factory()))
    }

    /// Like [`get`](Self::get) with a fallible factory. A failure leaves the
    /// slot `Uncreated` and is reported as `ConstructionAborted`.
    pub fn try_get<T, E, F>(&self, key: &str, factory: F) -> KitResult<Arc<T>>
    where
        T: Any + Send + Sync,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let cell = self.cell(key);

        let mut slot = cell.settled().ok_or_else(|| KitError::ReentrantCreation {
            key: key.to_string(),
        })?;
        if let Slot::Created(instance) = &*slot {
            trace!(key, "singleton hit");
            return downcast(key, Arc::clone(instance));
        }
        *slot = Slot::Creating(thread::current().id());
        drop(slot);

        let creation = Creation {
            cell: &cell,
            done: false,
        };
        debug!(key, ty = type_name::<T>(), "creating singleton");
        match factory() {
            Ok(value) => {
                let instance: Instance = Arc::new(value);
                creation.complete(Arc::clone(&instance));
                downcast(key, instance)
            }
            Err(err) => {
                drop(creation);
                Err(KitError::ConstructionAborted {
                    step: format!("singleton '{key}'"),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Per-type singleton keyed by the type's name.
    pub fn instance<T, F>(&self, factory: F) -> KitResult<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        self.get(type_name::<T>(), factory)
    }

    /// Clear `key` back to `Uncreated`, waiting out an in-flight creation.
    /// Returns whether an instance was dropped. Called from the factory
    /// creating `key`, it does nothing.
    pub fn reset(&self, key: &str) -> bool {
        let Some(cell) = self.existing(key) else {
            return false;
        };
        let Some(mut slot) = cell.settled() else {
            return false;
        };
        let had_instance = matches!(*slot, Slot::Created(_));
        *slot = Slot::Uncreated;
        if had_instance {
            debug!(key, "singleton reset");
        }
        had_instance
    }

    pub fn state(&self, key: &str) -> SlotState {
        self.existing(key)
            .map(|cell| cell.lock().state())
            .unwrap_or(SlotState::Uncreated)
    }

    /// Whether `key` holds a created instance.
    pub fn contains(&self, key: &str) -> bool {
        self.state(key) == SlotState::Created
    }

    /// Keys with a created instance, sorted.
    pub fn keys(&self) -> Vec<String> {
        let cells: Vec<(String, Arc<SlotCell>)> = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, c)| (k.clone(), Arc::clone(c)))
            .collect();
        let mut keys: Vec<String> = cells
            .into_iter()
            .filter(|(_, cell)| cell.lock().state() == SlotState::Created)
            .map(|(k, _)| k)
            .collect();
        keys.sort();
        keys
    }
}

fn downcast<T: Any + Send + Sync>(key: &str, instance: Instance) -> KitResult<Arc<T>> {
    instance.downcast::<T>().map_err(|_| KitError::TypeMismatch {
        key: key.to_string(),
        expected: type_name::<T>(),
    })
}
