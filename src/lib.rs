//! Client core of the voltdesk energy-trading account manager.
//!
//! UI intents go through [`performers::Actions`], which run remote
//! operations via [`dispatch::AsyncDispatcher`] and record their lifecycle
//! in a [`reducers::AppStore`]. Views subscribe to the store and read
//! [`selectors`]. Infinite-scroll lists are driven by [`list::ListController`].

pub mod api;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod list;
pub mod locale;
pub mod logging;
pub mod mvi;
pub mod notify;
pub mod performers;
pub mod reducers;
pub mod selectors;
pub mod state;
pub mod storage;

pub use client::{Client, ClientError};
pub use error::ApiError;
