// ============================================================================
// REACTIVITY - Change notifications that drive re-rendering
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Shared "something changed" signal.
///
/// Clones share the same subscriber list. Notifications raised while a
/// notification is running are dropped; subscribers re-read all state anyway.
#[derive(Clone, Default)]
pub struct ChangeSignal {
    subscribers: Rc<RefCell<Vec<Callback>>>,
    notifying: Rc<Cell<bool>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify(&self) {
        if self.notifying.replace(true) {
            return;
        }
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
        self.notifying.set(false);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_subscribers() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        signal.subscribe(move || counter.set(counter.get() + 1));

        let other = signal.clone();
        other.notify();
        signal.notify();

        assert_eq!(hits.get(), 2);
        assert_eq!(other.subscriber_count(), 1);
    }

    #[test]
    fn reentrant_notify_is_ignored() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));
        let (counter, inner) = (hits.clone(), signal.clone());
        signal.subscribe(move || {
            counter.set(counter.get() + 1);
            inner.notify();
        });

        signal.notify();

        assert_eq!(hits.get(), 1);
    }
}
