// ============================================================================
// REACTIVITY - Owned state with change subscribers
// ============================================================================

use std::cell::RefCell;

type Callback<T> = Box<dyn Fn(&T)>;

/// State value that notifies subscribers after every change.
///
/// Only the owner mutates it; readers get snapshots.
pub struct ReactiveState<T: Clone> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Callback<T>>>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Copy of the current value
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }

    /// Read without cloning
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        let value = self.value.borrow();
        reader(&*value)
    }

    /// Replace the value and notify
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Subscribe to changes; the callback receives the new value.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Box::new(callback));
    }

    pub fn clear_subscribers(&self) {
        self.subscribers.borrow_mut().clear();
    }

    // Snapshot first so callbacks may read the owner again.
    fn notify(&self) {
        let current = self.snapshot();
        for callback in self.subscribers.borrow().iter() {
            callback(&current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn set_notifies_every_subscriber_with_new_value() {
        let state = ReactiveState::new(1);
        let seen = Rc::new(Cell::new(0));
        let calls = Rc::new(Cell::new(0));

        {
            let seen = seen.clone();
            state.subscribe(move |value| seen.set(*value));
        }
        {
            let calls = calls.clone();
            state.subscribe(move |_| calls.set(calls.get() + 1));
        }

        state.set(7);
        assert_eq!(seen.get(), 7);
        assert_eq!(calls.get(), 1);
        assert_eq!(state.snapshot(), 7);
        assert_eq!(state.with(|v| v * 2), 14);
    }

    #[test]
    fn cleared_subscribers_are_not_called() {
        let state = ReactiveState::new(String::new());
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            state.subscribe(move |_| calls.set(calls.get() + 1));
        }

        state.clear_subscribers();
        state.set("changed".to_string());
        assert_eq!(calls.get(), 0);
    }
}
