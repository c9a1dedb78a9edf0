//! Domain reducers, one per top-level slice, and the root reducer combining
//! them.

mod app;
mod documents;
mod producers;
mod users;

use std::sync::Arc;

use crate::mvi::{Reducer, Store};
use crate::state::{Event, StateTree};

pub use app::AppReducer;
pub use documents::DocumentsReducer;
pub use producers::ProducersReducer;
pub use users::UsersReducer;

/// Store over the full client state tree.
pub type AppStore = Store<RootReducer>;

/// Runs an event through every slice reducer. The tree is replaced only if at
/// least one slice came back as a different `Arc`.
pub struct RootReducer;

impl Reducer for RootReducer {
    type State = StateTree;
    type Intent = Event;

    fn reduce(state: Arc<Self::State>, event: &Self::Intent) -> Arc<Self::State> {
        let users = UsersReducer::reduce(Arc::clone(&state.users), event);
        let app = AppReducer::reduce(Arc::clone(&state.app), event);
        let documents = DocumentsReducer::reduce(Arc::clone(&state.documents), event);
        let producers = ProducersReducer::reduce(Arc::clone(&state.producers), event);

        if Arc::ptr_eq(&users, &state.users)
            && Arc::ptr_eq(&app, &state.app)
            && Arc::ptr_eq(&documents, &state.documents)
            && Arc::ptr_eq(&producers, &state.producers)
        {
            return state;
        }

        Arc::new(StateTree {
            users,
            app,
            documents,
            producers,
        })
    }
}

/// Merge policy of paginated slices: page 0 starts over, later pages append.
fn accumulate<T: Clone>(loaded: &[T], fetched: &[T], page: u32) -> Vec<T> {
    if page == 0 {
        fetched.to_vec()
    } else {
        loaded.iter().chain(fetched.iter()).cloned().collect()
    }
}
