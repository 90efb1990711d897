use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use log::trace;

pub type Listener<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

struct Listeners<T> {
    by_id: RefCell<BTreeMap<SubscriptionId, Listener<T>>>,
    next_id: Cell<SubscriptionId>,
}

/// Publishing half of a channel.
pub struct EventEmitter<T: std::fmt::Debug> {
    listeners: Rc<Listeners<T>>,
}

/// Subscribing half of a channel.
pub struct EventObserver<T: std::fmt::Debug> {
    listeners: Rc<Listeners<T>>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

pub fn channel<T: std::fmt::Debug>() -> (EventEmitter<T>, EventObserver<T>) {
    let listeners = Rc::new(Listeners {
        by_id: RefCell::new(BTreeMap::new()),
        next_id: Cell::new(0),
    });
    (
        EventEmitter {
            listeners: Rc::clone(&listeners),
        },
        EventObserver { listeners },
    )
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    /// Calls every listener in subscription order.
    pub fn emit(&self, event: &T) {
        // snapshot so a listener may subscribe or unsubscribe while handling
        let listeners: Vec<Listener<T>> =
            self.listeners.by_id.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting to {} listeners: {:?}", listeners.len(), event);
        for listener in listeners {
            listener(event);
        }
    }
}

impl<T: std::fmt::Debug> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = self.listeners.next_id.get();
        self.listeners.next_id.set(id + 1);
        self.listeners.by_id.borrow_mut().insert(id, Rc::new(callback));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.by_id.borrow_mut().remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listeners_see_events_in_order() {
        let (emitter, observer) = channel::<u32>();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        observer.subscribe(move |n: &u32| first.borrow_mut().push(("first", *n)));
        let second = seen.clone();
        observer.subscribe(move |n: &u32| second.borrow_mut().push(("second", *n)));

        emitter.emit(&3);
        assert_eq!(*seen.borrow(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn test_unsubscribe() {
        let (emitter, observer) = channel::<u32>();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let id = observer.subscribe(move |_: &u32| counter_clone.set(counter_clone.get() + 1));
        emitter.emit(&1);
        assert!(observer.unsubscribe(id));
        emitter.emit(&1);
        assert_eq!(counter.get(), 1);
        assert!(!observer.unsubscribe(id));
    }

    #[test]
    fn test_listener_may_unsubscribe_while_handling() {
        let (emitter, observer) = channel::<u32>();
        let observer_clone = observer.clone();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        observer.subscribe(move |_: &u32| {
            counter_clone.set(counter_clone.get() + 1);
            observer_clone.unsubscribe(0);
        });
        emitter.emit(&1);
        emitter.emit(&1);
        assert_eq!(counter.get(), 1);
    }
}
