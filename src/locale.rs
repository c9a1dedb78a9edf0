//! Startup locale selection and persistence of the active locale.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::LocaleConfig;
use crate::mvi::Subscription;
use crate::reducers::AppStore;
use crate::storage::{LocalStorage, LOCALE_KEY};

/// Language code of the process environment (`LC_ALL`, then `LANG`), e.g.
/// `de` for `de_DE.UTF-8`.
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| language_prefix(&value))
}

/// Language part of a POSIX or BCP 47 tag. `C` and `POSIX` have none.
pub fn language_prefix(tag: &str) -> Option<String> {
    let language = tag
        .split(|c| c == '_' || c == '-' || c == '.' || c == '@')
        .next()?
        .to_ascii_lowercase();
    if language.is_empty() || language == "c" || language == "posix" {
        return None;
    }
    Some(language)
}

/// Locale to start with: the saved one, else the system language, else the
/// configured default. Only supported locales are accepted.
pub fn resolve_locale(saved: Option<&str>, system: Option<&str>, config: &LocaleConfig) -> String {
    let supported = |code: &&str| config.supported.iter().any(|s| s == code);
    saved
        .filter(supported)
        .or_else(|| system.filter(supported))
        .unwrap_or(&config.default)
        .to_string()
}

/// Writes the active locale to storage whenever it changes in the store.
///
/// The store listener only queues the new value. A writer task on the
/// runtime applies queued values in order on the blocking pool, so store
/// dispatches never wait on file I/O.
pub struct LocalePersister {
    subscription: Subscription,
    writer: JoinHandle<()>,
}

impl LocalePersister {
    pub fn attach(store: &AppStore, storage: Arc<LocalStorage>, runtime: &Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = runtime.spawn(write_locales(rx, storage));

        let last = Mutex::new(store.get_state().app.localization.data.locale.clone());
        let subscription = store.subscribe(move |state| {
            let current = &state.app.localization.data.locale;
            let mut last = last.lock();
            if *last == *current {
                return;
            }
            *last = current.clone();

            if let Some(locale) = current {
                if tx.send(locale.clone()).is_err() {
                    tracing::warn!(locale = %locale, "Locale writer gone; not persisted");
                }
            }
        });
        Self {
            subscription,
            writer,
        }
    }

    /// Stop watching the store. Locales queued so far are still written.
    pub fn detach(self) -> JoinHandle<()> {
        self.subscription.unsubscribe();
        self.writer
    }
}

async fn write_locales(mut rx: mpsc::UnboundedReceiver<String>, storage: Arc<LocalStorage>) {
    while let Some(locale) = rx.recv().await {
        let storage = Arc::clone(&storage);
        let written =
            tokio::task::spawn_blocking(move || storage.set(LOCALE_KEY, &locale).map(|()| locale))
                .await;
        match written {
            Ok(Ok(locale)) => tracing::debug!(locale = %locale, "Locale persisted"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to persist locale"),
            Err(e) => tracing::warn!(error = %e, "Locale write task failed"),
        }
    }
}
