//! Reducer trait for MVI architecture.

use std::sync::Arc;

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State.
///
/// States travel behind `Arc` so that "nothing changed" is observable as
/// pointer equality: a reducer that does not recognize an intent must hand
/// back the very `Arc` it was given.
///
/// The reducer type travels into spawned tasks and listener handles.
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Arc<Self::State>, intent: &Self::Intent) -> Arc<Self::State>;
}
