//! Scroll-driven incremental loading.
//!
//! The controller owns a [`PageCursor`] and a small state machine
//! (`Idle` / `Fetching` / `Exhausted`). Scroll events are debounced: each one
//! restarts the timer and only the latest viewport is evaluated once the
//! timer fires. Results of fetches started before an unmount or reset are
//! discarded through a generation counter.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::cursor::{ListConfig, ListState, PageCursor, Viewport};
use super::source::{Page, PageSource};
use crate::error::ApiError;
use crate::notify::{Notification, Notifier};

struct Inner<T> {
    state: ListState,
    cursor: PageCursor,
    items: Vec<T>,
    mounted: bool,
    /// Bumped on mount, unmount and reset; fetches carry the value they
    /// started with.
    generation: u64,
    pending: Option<Viewport>,
    debounce: Option<JoinHandle<()>>,
}

struct Shared<S: PageSource> {
    source: S,
    config: ListConfig,
    runtime: Handle,
    notifier: Option<Arc<dyn Notifier>>,
    inner: Mutex<Inner<S::Item>>,
}

/// Incremental list over a [`PageSource`].
///
/// At most one fetch is in flight at a time.
pub struct ListController<S: PageSource> {
    shared: Arc<Shared<S>>,
}

impl<S: PageSource> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: PageSource> ListController<S> {
    pub fn new(
        source: S,
        config: ListConfig,
        runtime: Handle,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        let page_size = source.page_size();
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                runtime,
                notifier,
                inner: Mutex::new(Inner {
                    state: ListState::Idle(0),
                    cursor: PageCursor::new(page_size),
                    items: Vec::new(),
                    mounted: false,
                    generation: 0,
                    pending: None,
                    debounce: None,
                }),
            }),
        }
    }

    /// Attach the list and fetch the first page.
    pub fn mount(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.mounted {
            tracing::debug!("List already mounted");
            return;
        }
        inner.mounted = true;
        self.shared.restart(&mut inner);
    }

    /// Detach the list. The pending scroll evaluation is cancelled and any
    /// fetch still in flight is ignored when it settles.
    pub fn unmount(&self) {
        let mut inner = self.shared.inner.lock();
        if !inner.mounted {
            return;
        }
        inner.mounted = false;
        inner.generation += 1;
        inner.pending = None;
        if let Some(timer) = inner.debounce.take() {
            timer.abort();
        }
        if let ListState::Fetching(_) = inner.state {
            inner.state = ListState::Idle(inner.cursor.page);
        }
        tracing::debug!(generation = inner.generation, "List unmounted");
    }

    /// Start over from the first page, e.g. after a filter change.
    pub fn reset(&self) {
        let mut inner = self.shared.inner.lock();
        if !inner.mounted {
            tracing::debug!("Reset ignored: list not mounted");
            return;
        }
        self.shared.restart(&mut inner);
    }

    /// Record a scroll event. Evaluation happens once no further scroll event
    /// arrived for the debounce period.
    pub fn on_scroll(&self, viewport: Viewport) {
        let mut inner = self.shared.inner.lock();
        if !inner.mounted {
            return;
        }
        inner.pending = Some(viewport);
        if let Some(timer) = inner.debounce.take() {
            timer.abort();
        }

        let shared = Arc::clone(&self.shared);
        let delay = self.shared.config.debounce;
        inner.debounce = Some(self.shared.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.flush_scroll();
        }));
    }

    pub fn state(&self) -> ListState {
        self.shared.inner.lock().state
    }

    pub fn cursor(&self) -> PageCursor {
        self.shared.inner.lock().cursor
    }

    /// Items loaded so far, in page order.
    pub fn items(&self) -> Vec<S::Item> {
        self.shared.inner.lock().items.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.inner.lock().mounted
    }
}

impl<S: PageSource> Shared<S> {
    fn restart(self: &Arc<Self>, inner: &mut Inner<S::Item>) {
        inner.generation += 1;
        inner.cursor = PageCursor::new(inner.cursor.page_size);
        inner.items.clear();
        inner.state = ListState::Idle(0);
        self.start_fetch(inner, 0, 0);
    }

    fn flush_scroll(self: &Arc<Self>) {
        let mut inner = self.inner.lock();
        inner.debounce = None;
        let Some(viewport) = inner.pending.take() else {
            return;
        };
        if !inner.mounted {
            return;
        }

        let ListState::Idle(page) = inner.state else {
            tracing::trace!(state = ?inner.state, "Scroll ignored: list not idle");
            return;
        };
        if viewport.distance_to_bottom() > self.config.threshold_px {
            return;
        }
        if !inner.cursor.has_more() {
            return;
        }

        let next = inner.cursor.next_page();
        self.start_fetch(&mut inner, next, page);
    }

    /// `previous` is the page to fall back to if the fetch fails.
    fn start_fetch(self: &Arc<Self>, inner: &mut Inner<S::Item>, page: u32, previous: u32) {
        inner.state = ListState::Fetching(page);
        let generation = inner.generation;
        tracing::debug!(page, generation, "Fetching list page");

        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            let result = shared.source.fetch(page).await;
            shared.settle(generation, page, previous, result);
        });
    }

    fn settle(
        &self,
        generation: u64,
        page: u32,
        previous: u32,
        result: Result<Page<S::Item>, ApiError>,
    ) {
        let mut inner = self.inner.lock();
        if generation != inner.generation {
            tracing::debug!(
                page,
                generation,
                current = inner.generation,
                "Discarding stale list page"
            );
            return;
        }

        match result {
            Ok(fetched) => {
                let received = fetched.items.len();
                inner.cursor.record(page, received, fetched.total);
                inner.items.extend(fetched.items);
                // An empty page short of the total would otherwise be
                // requested again on every scroll.
                inner.state = if inner.cursor.is_exhausted() || received == 0 {
                    ListState::Exhausted
                } else {
                    ListState::Idle(page)
                };
                tracing::debug!(
                    page,
                    items = inner.cursor.items_so_far,
                    total = fetched.total,
                    "List page loaded"
                );
            }
            Err(err) => {
                inner.state = ListState::Idle(previous);
                drop(inner);

                if err.is_duplicate_request() {
                    tracing::debug!(page, "List fetch suppressed: already loading");
                    return;
                }
                tracing::warn!(page, error = %err, "List page failed");
                if let Some(notifier) = &self.notifier {
                    notifier.push(Notification::error(err.message));
                }
            }
        }
    }
}
