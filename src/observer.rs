//! Typed change notifications.
//!
//! Listeners are called synchronously in subscription order on the thread
//! that triggered the change. Each listener is handed the emitting engine, so
//! a follow-up change it makes is processed (and notified) before the
//! original call returns. A listener that is already running further up the
//! stack is not re-entered; the events its follow-up raises go to the others.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<E, T> = Rc<RefCell<dyn FnMut(&E, &mut T)>>;

/// Ordered list of listeners for events `E` emitted by engine `T`.
pub struct Observers<E, T> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<E, T>)>,
}

impl<E, T> Default for Observers<E, T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E, T> fmt::Debug for Observers<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E, T> Observers<E, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E, &mut T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let listener: Listener<E, T> = Rc::new(RefCell::new(listener));
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners.iter().any(|(sub, _)| *sub == id)
    }
}

/// An engine that owns its listener list and hands itself to each listener.
pub trait Observable<E>: Sized {
    fn observers_mut(&mut self) -> &mut Observers<E, Self>;

    /// Deliver `event` to every listener subscribed when dispatch starts and
    /// still subscribed when its turn comes.
    fn notify(&mut self, event: &E) {
        let snapshot = self.observers_mut().listeners.clone();
        for (id, listener) in snapshot {
            if !self.observers_mut().is_subscribed(id) {
                continue;
            }
            let Ok(mut guard) = listener.try_borrow_mut() else {
                continue;
            };
            let call: &mut dyn FnMut(&E, &mut Self) = &mut *guard;
            call(event, self);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
        observers: Observers<u32, Counter>,
    }

    impl Observable<u32> for Counter {
        fn observers_mut(&mut self) -> &mut Observers<u32, Self> {
            &mut self.observers
        }
    }

    impl Counter {
        fn set(&mut self, value: u32) {
            self.value = value;
            self.notify(&value);
        }
    }

    #[test]
    fn test_notify_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut counter = Counter::default();

        let first = Rc::clone(&log);
        counter
            .observers
            .subscribe(move |e: &u32, _: &mut Counter| first.borrow_mut().push(("first", *e)));
        let second = Rc::clone(&log);
        counter
            .observers
            .subscribe(move |e: &u32, _: &mut Counter| second.borrow_mut().push(("second", *e)));

        counter.set(1);
        counter.set(2);
        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
    }

    #[test]
    fn test_follow_up_runs_before_return() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut counter = Counter::default();

        // Bumps 1 to 2 from inside the notification
        counter.observers.subscribe(|e: &u32, target: &mut Counter| {
            if *e == 1 {
                target.set(2);
            }
        });
        let sink = Rc::clone(&log);
        counter
            .observers
            .subscribe(move |e: &u32, _: &mut Counter| sink.borrow_mut().push(*e));

        counter.set(1);
        assert_eq!(counter.value, 2);
        // The nested event reaches the other listener first
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut counter = Counter::default();
        let sink = Rc::clone(&count);
        let id = counter
            .observers
            .subscribe(move |_: &u32, _: &mut Counter| *sink.borrow_mut() += 1);

        counter.set(1);
        assert!(counter.observers.unsubscribe(id));
        assert!(!counter.observers.unsubscribe(id));
        counter.set(2);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unsubscribed_during_dispatch_is_skipped() {
        let count = Rc::new(RefCell::new(0));
        let mut counter = Counter::default();
        let victim = Rc::new(RefCell::new(None));

        let target_id = Rc::clone(&victim);
        counter.observers.subscribe(move |_: &u32, target: &mut Counter| {
            if let Some(id) = target_id.borrow_mut().take() {
                target.observers.unsubscribe(id);
            }
        });
        let sink = Rc::clone(&count);
        let id = counter
            .observers
            .subscribe(move |_: &u32, _: &mut Counter| *sink.borrow_mut() += 1);
        *victim.borrow_mut() = Some(id);

        counter.set(1);
        assert_eq!(*count.borrow(), 0);
    }
}
