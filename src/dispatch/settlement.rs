//! Outcome handle returned by [`AsyncDispatcher::dispatch_async`](super::AsyncDispatcher::dispatch_async).

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::ApiError;

/// Resolves once the operation settled and its success/failure event was
/// applied.
///
/// Resolves to `None` when the request was suppressed because the slice was
/// already loading. Dropping it does not cancel anything.
#[must_use = "dropping a Settlement is fine, but then the outcome is only visible through the store"]
pub struct Settlement<T> {
    rx: oneshot::Receiver<Result<T, ApiError>>,
}

impl<T> Settlement<T> {
    pub(super) fn new(rx: oneshot::Receiver<Result<T, ApiError>>) -> Self {
        Self { rx }
    }
}

impl<T> Future for Settlement<T> {
    type Output = Option<Result<T, ApiError>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A closed channel means the pending dispatch was dropped unapplied.
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

impl<T> std::fmt::Debug for Settlement<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settlement").finish_non_exhaustive()
    }
}
