//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits and the store implementing
//! unidirectional data flow for the client state tree.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Store ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                            │
//!    └────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot, shared as `Arc`
//! - **Intent**: A dispatched event
//! - **Reducer**: Pure function that transforms state based on intents
//! - **Store**: Serializes dispatches and notifies subscribers

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
pub use store::{Store, Subscription};
