//! The `{data, loading, error}` convention shared by every async slice.

use serde::Serialize;

use super::event::Phase;
use crate::error::ApiError;

/// State of one remote-backed slice.
///
/// Nullable payloads use `D = Option<T>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SliceState<D> {
    pub data: D,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<D: Clone> SliceState<D> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    /// Next state for `phase`.
    ///
    /// - request: loading, error cleared before the outcome is known
    /// - success: `merge(data, payload)`, loading off, error cleared
    /// - failure: data kept, loading off, error set
    pub fn apply<T>(&self, phase: &Phase<T>, merge: impl FnOnce(&D, &T) -> D) -> Self {
        match phase {
            Phase::Request => Self {
                data: self.data.clone(),
                loading: true,
                error: None,
            },
            Phase::Success(payload) => Self {
                data: merge(&self.data, payload),
                loading: false,
                error: None,
            },
            Phase::Failure(err) => Self {
                data: self.data.clone(),
                loading: false,
                error: Some(err.clone()),
            },
        }
    }
}

impl<T: Clone> SliceState<Option<T>> {
    /// Wholesale replacement, the default merge policy.
    pub fn replace(&self, phase: &Phase<T>) -> Self {
        self.apply(phase, |_, payload| Some(payload.clone()))
    }
}
