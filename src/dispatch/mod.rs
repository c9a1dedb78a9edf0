//! Three-phase dispatch of remote operations.
//!
//! [`AsyncDispatcher::dispatch_async`] turns "operation + event constructor +
//! loading selector" into `request` followed by exactly one of `success` or
//! `failure`, skipping the whole sequence when the slice is already loading.

mod settlement;

use std::future::Future;

use scopeguard::ScopeGuard;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use uuid::Uuid;

use crate::error::{ApiError, CODE_OPERATION_CANCELLED, CODE_OPERATION_PANICKED};
use crate::mvi::{Reducer, Store};
use crate::state::Phase;

pub use settlement::Settlement;

/// Runs remote operations on a tokio runtime and reports their lifecycle to
/// a [`Store`].
pub struct AsyncDispatcher<R: Reducer> {
    store: Store<R>,
    runtime: Handle,
}

impl<R: Reducer> Clone for AsyncDispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<R: Reducer> AsyncDispatcher<R> {
    pub fn new(store: Store<R>, runtime: Handle) -> Self {
        Self { store, runtime }
    }

    pub fn store(&self) -> &Store<R> {
        &self.store
    }

    /// Dispatch `make_event(Request)` and run `operation` in the background,
    /// unless `loading` reports the target slice as busy.
    ///
    /// `loading` is evaluated when the request reaches the front of the
    /// store queue, so two back-to-back calls yield a single operation. The
    /// operation is started only after the request event was applied.
    /// Errors and panics never reach the caller; they become a `Failure`
    /// event.
    pub fn dispatch_async<T, E, F, Fut, M, L>(
        &self,
        operation: F,
        make_event: M,
        loading: L,
    ) -> Settlement<T>
    where
        T: Clone + Send + 'static,
        E: Into<ApiError> + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        M: Fn(Phase<T>) -> R::Intent + Send + Sync + 'static,
        L: FnOnce(&R::State) -> bool + Send + 'static,
    {
        let op_id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        let request = make_event(Phase::Request);
        tracing::debug!(%op_id, intent = ?request, "Async dispatch requested");

        let store = self.store.clone();
        let runtime = self.runtime.clone();
        let start = move || {
            let worker = runtime.clone();
            // Fires if the task is dropped before settling (runtime shutdown),
            // so the slice does not stay loading.
            let unsettled =
                scopeguard::guard_on_success((store, make_event), move |(store, make_event)| {
                    tracing::warn!(%op_id, "Async operation dropped before settling");
                    store.dispatch(make_event(Phase::Failure(cancelled())));
                });
            runtime.spawn(async move {
                // The operation runs in its own task so a panic surfaces as a
                // JoinError instead of tearing down the settlement path.
                let outcome = match worker.spawn(async move { operation().await }).await {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(err)) => Err(err.into()),
                    Err(join) => Err(join_error(join)),
                };
                let (store, make_event) = ScopeGuard::into_inner(unsettled);

                match &outcome {
                    Ok(value) => {
                        tracing::debug!(%op_id, "Async operation succeeded");
                        store.dispatch(make_event(Phase::Success(value.clone())));
                    }
                    Err(err) => {
                        tracing::warn!(%op_id, error = %err, "Async operation failed");
                        store.dispatch(make_event(Phase::Failure(err.clone())));
                    }
                }

                // The caller may have dropped its Settlement.
                let _ = tx.send(outcome);
            });
        };

        self.store.dispatch_guarded(request, loading, start);
        Settlement::new(rx)
    }
}

fn cancelled() -> ApiError {
    ApiError::with_code("operation cancelled", CODE_OPERATION_CANCELLED)
}

fn join_error(err: JoinError) -> ApiError {
    if !err.is_panic() {
        return cancelled();
    }
    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "operation panicked".to_string());
    ApiError::with_code(message, CODE_OPERATION_PANICKED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvi::{Intent, UiState};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Fetch {
        value: Option<u32>,
        loading: bool,
        error: Option<ApiError>,
    }

    impl UiState for Fetch {}

    #[derive(Debug)]
    struct FetchEvent(Phase<u32>);

    impl Intent for FetchEvent {}

    struct FetchReducer;

    impl Reducer for FetchReducer {
        type State = Fetch;
        type Intent = FetchEvent;

        fn reduce(state: Arc<Fetch>, event: &FetchEvent) -> Arc<Fetch> {
            Arc::new(match &event.0 {
                Phase::Request => Fetch {
                    loading: true,
                    error: None,
                    ..(*state).clone()
                },
                Phase::Success(v) => Fetch {
                    value: Some(*v),
                    loading: false,
                    error: None,
                },
                Phase::Failure(e) => Fetch {
                    loading: false,
                    error: Some(e.clone()),
                    ..(*state).clone()
                },
            })
        }
    }

    fn dispatcher() -> AsyncDispatcher<FetchReducer> {
        AsyncDispatcher::new(Store::new(Fetch::default()), Handle::current())
    }

    #[tokio::test]
    async fn success_settles_with_value() {
        let dispatcher = dispatcher();
        let settled = dispatcher
            .dispatch_async(
                || async { Ok::<_, ApiError>(7) },
                FetchEvent,
                |s: &Fetch| s.loading,
            )
            .await;
        assert_eq!(settled, Some(Ok(7)));
        assert_eq!(dispatcher.store().get_state().value, Some(7));
    }

    #[tokio::test]
    async fn anyhow_errors_are_normalized() {
        let dispatcher = dispatcher();
        let settled = dispatcher
            .dispatch_async(
                || async { Err::<u32, _>(anyhow::anyhow!("refused")) },
                FetchEvent,
                |s: &Fetch| s.loading,
            )
            .await;
        assert_eq!(settled, Some(Err(ApiError::new("refused"))));
        let state = dispatcher.store().get_state();
        assert!(!state.loading);
        assert_eq!(state.error, Some(ApiError::new("refused")));
    }

    #[tokio::test]
    async fn panic_becomes_failure() {
        let dispatcher = dispatcher();
        let settled = dispatcher
            .dispatch_async(
                || async {
                    if true {
                        panic!("decoder exploded");
                    }
                    Ok::<u32, ApiError>(1)
                },
                FetchEvent,
                |s: &Fetch| s.loading,
            )
            .await;
        assert_eq!(
            settled,
            Some(Err(ApiError::with_code(
                "decoder exploded",
                CODE_OPERATION_PANICKED
            )))
        );
        assert!(!dispatcher.store().get_state().loading);
    }

    #[tokio::test]
    async fn busy_slice_suppresses_everything() {
        let dispatcher = dispatcher();
        let (release, gate) = oneshot::channel::<()>();
        let first = dispatcher.dispatch_async(
            move || async move {
                let _ = gate.await;
                Ok::<_, ApiError>(1)
            },
            FetchEvent,
            |s: &Fetch| s.loading,
        );

        let ran = Arc::new(parking_lot::Mutex::new(false));
        let flag = Arc::clone(&ran);
        let second = dispatcher.dispatch_async(
            move || async move {
                *flag.lock() = true;
                Ok::<_, ApiError>(2)
            },
            FetchEvent,
            |s: &Fetch| s.loading,
        );

        assert_eq!(second.await, None);
        release.send(()).unwrap();
        assert_eq!(first.await, Some(Ok(1)));
        assert!(!*ran.lock());
    }

    #[test]
    fn runtime_shutdown_settles_as_cancelled() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let store = Store::<FetchReducer>::new(Fetch::default());
        let dispatcher = AsyncDispatcher::new(store.clone(), runtime.handle().clone());

        let settlement = dispatcher.dispatch_async(
            || async {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Ok::<_, ApiError>(1)
            },
            FetchEvent,
            |s: &Fetch| s.loading,
        );
        runtime.block_on(async { tokio::time::sleep(std::time::Duration::from_millis(10)).await });
        assert!(store.get_state().loading);

        drop(runtime);
        let state = store.get_state();
        assert!(!state.loading);
        assert_eq!(
            state.error.as_ref().and_then(|e| e.code.as_deref()),
            Some(CODE_OPERATION_CANCELLED)
        );
        drop(settlement);
    }
}
