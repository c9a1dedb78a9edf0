//! State tree, slice convention and dispatched events.

mod event;
mod slice;
mod tree;

pub use event::{Event, EventKind, Phase};
pub use slice::SliceState;
pub use tree::{
    AppState, DocumentsState, Localization, ProducersState, StateTree, UsersState,
};
