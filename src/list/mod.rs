//! Incremental (infinite-scroll) list loading.

mod controller;
mod cursor;
mod source;

pub use controller::ListController;
pub use cursor::{ListConfig, ListState, PageCursor, Viewport};
pub use source::{DocumentFeed, Page, PageSource, ProducerFeed};
