//! Reactive state shared between a host and the widgets it drives.
//!
//! - [`ReactiveCell<T>`] - shared value with change subscribers
//! - [`Binding<T>`] - getter/setter pair a view reads from and writes back to

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Type alias for subscriber callbacks.
type SubscriberFn<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Type alias for subscribers list.
type Subscribers<T> = Arc<RwLock<Vec<SubscriberFn<T>>>>;

/// A reactive cell that notifies subscribers on change.
///
/// Clones share both the value and the subscriber list, so a write through
/// any clone (or through a [`Binding`] made from one) reaches every
/// subscriber.
pub struct ReactiveCell<T> {
    value: Arc<RwLock<T>>,
    subscribers: Subscribers<T>,
}

impl<T: Clone + Send + Sync + 'static> ReactiveCell<T> {
    /// Create a new reactive cell with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set a new value, notifying subscribers.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *guard = value;
        }
        self.notify();
    }

    /// Update the value using a function.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
        }
        self.notify();
    }

    /// Subscribe to value changes.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// A two-way binding reading and writing this cell.
    pub fn binding(&self) -> Binding<T> {
        let reader = self.clone();
        let writer = self.clone();
        Binding::new(move || reader.get(), move |v| writer.set(v))
    }

    fn notify(&self) {
        // Snapshot first so subscribers may read or write the cell.
        let value = self.get();
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for sub in subscribers.iter() {
            sub(&value);
        }
    }
}

impl<T> Clone for ReactiveCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for ReactiveCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveCell")
            .field(
                "value",
                &*self.value.read().unwrap_or_else(PoisonError::into_inner),
            )
            .finish_non_exhaustive()
    }
}

type Getter<T> = Arc<dyn Fn() -> T + Send + Sync>;
type Setter<T> = Arc<dyn Fn(T) + Send + Sync>;

/// A getter/setter pair over state owned elsewhere.
pub struct Binding<T> {
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T: 'static> Binding<T> {
    /// Create a binding from explicit accessors.
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn() -> T + Send + Sync + 'static,
        S: Fn(T) + Send + Sync + 'static,
    {
        Self {
            getter: Arc::new(get),
            setter: Arc::new(set),
        }
    }

    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self::new(move || value.clone(), |_| {})
    }

    /// Read the bound value.
    pub fn get(&self) -> T {
        (self.getter)()
    }

    /// Write the bound value.
    pub fn set(&self, value: T) {
        (self.setter)(value);
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}
