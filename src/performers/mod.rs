//! Action performers: the entry points UI code calls.
//!
//! Each remote action names its operation, the event constructor carrying
//! the call-site arguments, and the loading flag that guards against a
//! duplicate request. Synchronous actions dispatch directly.

mod app;
mod documents;
mod producers;
mod users;

use std::sync::Arc;

use crate::api::RemoteApi;
use crate::dispatch::AsyncDispatcher;
use crate::reducers::{AppStore, RootReducer};

/// Cheap to clone; clones share the store and the API.
#[derive(Clone)]
pub struct Actions {
    dispatcher: AsyncDispatcher<RootReducer>,
    api: Arc<dyn RemoteApi>,
    page_size: u32,
}

impl Actions {
    pub fn new(dispatcher: AsyncDispatcher<RootReducer>, api: Arc<dyn RemoteApi>, page_size: u32) -> Self {
        Self {
            dispatcher,
            api,
            page_size,
        }
    }

    pub fn store(&self) -> &AppStore {
        self.dispatcher.store()
    }

    /// Items requested per page by the paginated actions.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}
