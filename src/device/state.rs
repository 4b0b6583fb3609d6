//! Observable state values
//!
//! Observers are plain callbacks invoked synchronously, in subscription
//! order, whenever the value changes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Handle returned by [`StatePublisher::subscribe`]
pub type SubscriptionId = usize;

type Observer<T> = Box<dyn Fn(T) + Send>;

/// Connection lifecycle of a device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Value with change notification
pub struct StatePublisher<T: Copy + PartialEq> {
    value: T,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_id: SubscriptionId,
}

impl<T: Copy + PartialEq> StatePublisher<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Register an observer. It is not called with the current value.
    pub fn subscribe(&mut self, observer: impl Fn(T) + Send + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Update the value and notify observers if it changed
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, observer) in &self.observers {
            observer(value);
        }
        true
    }
}

impl<T: Copy + PartialEq + Default> Default for StatePublisher<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + PartialEq + fmt::Debug> fmt::Debug for StatePublisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatePublisher")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
