//! Centralized state container.
//!
//! The store owns the current state snapshot, runs every dispatched intent
//! through the root reducer and notifies subscribers when the snapshot was
//! replaced.
//!
//! Dispatches are serialized: an intent dispatched while another one is being
//! processed (from a listener, or from another task) is queued and applied
//! after the current one, in FIFO order. Listeners run with the store lock
//! released, so they may read the state or dispatch freely.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::reducer::Reducer;

type Listener<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;
type BusyCheck<S> = Box<dyn FnOnce(&S) -> bool + Send>;
type Continuation = Box<dyn FnOnce() + Send>;

struct Pending<S, I> {
    intent: I,
    /// Evaluated against the state current when the intent is dequeued.
    /// Returning true drops the intent.
    busy: Option<BusyCheck<S>>,
    /// Runs after subscribers were notified, only if the intent was accepted.
    on_applied: Option<Continuation>,
}

struct Inner<R: Reducer> {
    state: Arc<R::State>,
    listeners: Vec<(u64, Listener<R::State>)>,
    next_listener_id: u64,
    queue: VecDeque<Pending<R::State, R::Intent>>,
    draining: bool,
}

/// Store holding an immutable state tree reduced by `R`.
///
/// Cheap to clone; all clones share the same state.
pub struct Store<R: Reducer> {
    inner: Arc<Mutex<Inner<R>>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store seeded with `initial`.
    pub fn new(initial: R::State) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: Arc::new(initial),
                listeners: Vec::new(),
                next_listener_id: 0,
                queue: VecDeque::new(),
                draining: false,
            })),
        }
    }

    /// Current snapshot. Holding it never blocks the store.
    pub fn get_state(&self) -> Arc<R::State> {
        Arc::clone(&self.inner.lock().state)
    }

    /// Register a listener, invoked after every accepted transition in
    /// subscription order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<R::State>) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        drop(inner);

        let weak = Arc::downgrade(&self.inner);
        Subscription {
            detach: Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.lock().listeners.retain(|(lid, _)| *lid != id);
                }
            }),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Apply an intent. Returns once this intent (and anything queued before
    /// it) was applied, unless another dispatch is already draining the queue,
    /// in which case the intent is queued and applied by that drainer.
    pub fn dispatch(&self, intent: R::Intent) {
        self.enqueue(Pending {
            intent,
            busy: None,
            on_applied: None,
        });
    }

    /// Apply an intent unless `busy` reports the target slice as occupied.
    ///
    /// `busy` runs under the store lock and must not call back into the
    /// store. `on_applied` runs after subscribers were notified, and only if
    /// the intent was accepted.
    pub(crate) fn dispatch_guarded<B, C>(&self, intent: R::Intent, busy: B, on_applied: C)
    where
        B: FnOnce(&R::State) -> bool + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.enqueue(Pending {
            intent,
            busy: Some(Box::new(busy)),
            on_applied: Some(Box::new(on_applied)),
        });
    }

    fn enqueue(&self, pending: Pending<R::State, R::Intent>) {
        let mut inner = self.inner.lock();
        inner.queue.push_back(pending);
        if inner.draining {
            return;
        }
        inner.draining = true;
        drop(inner);
        self.drain();
    }

    fn drain(&self) {
        // A panicking reducer or listener must not leave the store wedged in
        // the draining state; queued intents are picked up by the next dispatch.
        let _reset = scopeguard::guard_on_unwind(Arc::clone(&self.inner), |inner| {
            inner.lock().draining = false;
        });

        loop {
            let mut inner = self.inner.lock();
            let Some(pending) = inner.queue.pop_front() else {
                inner.draining = false;
                return;
            };

            if let Some(busy) = pending.busy {
                if busy(&inner.state) {
                    tracing::debug!(intent = ?pending.intent, "Intent suppressed: slice busy");
                    continue;
                }
            }

            let next = R::reduce(Arc::clone(&inner.state), &pending.intent);
            let listeners: Vec<Listener<R::State>> = if Arc::ptr_eq(&next, &inner.state) {
                Vec::new()
            } else {
                inner.state = Arc::clone(&next);
                inner
                    .listeners
                    .iter()
                    .map(|(_, listener)| Arc::clone(listener))
                    .collect()
            };
            drop(inner);

            tracing::trace!(
                intent = ?pending.intent,
                changed = !listeners.is_empty(),
                "Intent applied"
            );

            for listener in &listeners {
                listener(&next);
            }

            if let Some(on_applied) = pending.on_applied {
                on_applied();
            }
        }
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping it keeps the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to detach.
pub struct Subscription {
    detach: Box<dyn FnOnce() + Send + Sync>,
}

impl Subscription {
    /// Detach the listener. A no-op if the store is already gone.
    pub fn unsubscribe(self) {
        (self.detach)();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvi::{Intent, UiState};
    use parking_lot::Mutex as PlMutex;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        value: i64,
    }

    impl UiState for Counter {}

    #[derive(Debug)]
    enum CounterIntent {
        Add(i64),
        Noop,
    }

    impl Intent for CounterIntent {}

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = Counter;
        type Intent = CounterIntent;

        fn reduce(state: Arc<Counter>, intent: &CounterIntent) -> Arc<Counter> {
            match intent {
                CounterIntent::Add(0) | CounterIntent::Noop => state,
                CounterIntent::Add(n) => Arc::new(Counter {
                    value: state.value + n,
                }),
            }
        }
    }

    #[test]
    fn dispatch_replaces_snapshot_and_keeps_old_one_intact() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let before = store.get_state();
        store.dispatch(CounterIntent::Add(2));
        assert_eq!(before.value, 0);
        assert_eq!(store.get_state().value, 2);
    }

    #[test]
    fn unchanged_state_does_not_notify() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let calls = Arc::new(PlMutex::new(0));
        let seen = Arc::clone(&calls);
        let _sub = store.subscribe(move |_| *seen.lock() += 1);

        let before = store.get_state();
        store.dispatch(CounterIntent::Noop);
        assert!(Arc::ptr_eq(&before, &store.get_state()));
        assert_eq!(*calls.lock(), 0);

        store.dispatch(CounterIntent::Add(1));
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let order = Arc::new(PlMutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            let _ = store.subscribe(move |_| order.lock().push(tag));
        }
        store.dispatch(CounterIntent::Add(1));
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_detaches_listener() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let calls = Arc::new(PlMutex::new(0));
        let seen = Arc::clone(&calls);
        let sub = store.subscribe(move |_| *seen.lock() += 1);
        store.dispatch(CounterIntent::Add(1));
        sub.unsubscribe();
        store.dispatch(CounterIntent::Add(1));
        assert_eq!(*calls.lock(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn dispatch_from_listener_is_queued_after_current() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let observed = Arc::new(PlMutex::new(Vec::new()));

        let inner_store = store.clone();
        let _cascade = store.subscribe(move |state| {
            if state.value < 3 {
                inner_store.dispatch(CounterIntent::Add(1));
            }
        });
        let seen = Arc::clone(&observed);
        let _recorder = store.subscribe(move |state| seen.lock().push(state.value));

        store.dispatch(CounterIntent::Add(1));

        // Every listener sees each snapshot before the queued follow-up runs.
        assert_eq!(*observed.lock(), vec![1, 2, 3]);
        assert_eq!(store.get_state().value, 3);
    }

    #[test]
    fn deep_cascade_does_not_grow_the_stack() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let inner_store = store.clone();
        let _sub = store.subscribe(move |state| {
            if state.value < 100_000 {
                inner_store.dispatch(CounterIntent::Add(1));
            }
        });
        store.dispatch(CounterIntent::Add(1));
        assert_eq!(store.get_state().value, 100_000);
    }

    #[test]
    fn guarded_dispatch_checks_state_at_dequeue_time() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let accepted = Arc::new(PlMutex::new(Vec::new()));

        let inner_store = store.clone();
        let log = Arc::clone(&accepted);
        let _sub = store.subscribe(move |state| {
            if state.value == 1 {
                // Both are queued behind the current intent; the first one
                // moves the counter to 11, so the second sees a busy slice.
                for tag in ["a", "b"] {
                    let log = Arc::clone(&log);
                    inner_store.dispatch_guarded(
                        CounterIntent::Add(10),
                        |s: &Counter| s.value > 1,
                        move || log.lock().push(tag),
                    );
                }
            }
        });

        store.dispatch(CounterIntent::Add(1));
        assert_eq!(store.get_state().value, 11);
        assert_eq!(*accepted.lock(), vec!["a"]);
    }

    #[test]
    fn panicking_listener_does_not_wedge_the_store() {
        let store = Store::<CounterReducer>::new(Counter::default());
        let sub = store.subscribe(|state| {
            if state.value == 1 {
                panic!("listener failure");
            }
        });

        let panicking = store.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            panicking.dispatch(CounterIntent::Add(1));
        }));
        assert!(result.is_err());

        sub.unsubscribe();
        store.dispatch(CounterIntent::Add(1));
        assert_eq!(store.get_state().value, 2);
    }
}
