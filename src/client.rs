//! Wiring of the client core.
//!
//! [`Client::bootstrap`] creates the store (hydrated from local storage),
//! the dispatcher and the background subscribers. Dropping the client tears
//! it all down; in-flight operations finish against a store nobody reads.

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};

use crate::api::{LocaleContent, ProducerFilter, RemoteApi};
use crate::config::{Config, ConfigError};
use crate::dispatch::{AsyncDispatcher, Settlement};
use crate::list::{DocumentFeed, ListConfig, ListController, ProducerFeed};
use crate::locale::{resolve_locale, system_locale, LocalePersister};
use crate::notify::{FailureWatcher, Notifier};
use crate::performers::Actions;
use crate::reducers::AppStore;
use crate::state::StateTree;
use crate::storage::{LocalStorage, LOCALE_KEY};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client must be created inside a tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Client {
    config: Config,
    store: AppStore,
    actions: Actions,
    runtime: Handle,
    notifier: Arc<dyn Notifier>,
    locale_persister: LocalePersister,
    failure_watcher: FailureWatcher,
}

impl Client {
    /// Build the client on the current tokio runtime.
    ///
    /// An unreadable state file is logged and treated as empty.
    pub fn bootstrap(
        config: Config,
        api: Arc<dyn RemoteApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        let runtime = Handle::try_current()?;

        let storage = Arc::new(LocalStorage::new(config.storage.resolved_path()));
        let saved_locale = storage.get(LOCALE_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable state file");
            None
        });

        let store = AppStore::new(StateTree::with_saved_locale(saved_locale.clone()));
        let dispatcher = AsyncDispatcher::new(store.clone(), runtime.clone());
        let actions = Actions::new(dispatcher, api, config.pagination.page_size);

        let locale_persister = LocalePersister::attach(&store, storage, &runtime);
        let failure_watcher = FailureWatcher::attach(&store, Arc::clone(&notifier));

        tracing::info!(
            saved_locale = ?saved_locale,
            page_size = config.pagination.page_size,
            "Client bootstrapped"
        );

        Ok(Self {
            config,
            store,
            actions,
            runtime,
            notifier,
            locale_persister,
            failure_watcher,
        })
    }

    /// Pick the startup locale and load its translations.
    pub fn start(&self) -> Settlement<LocaleContent> {
        let saved = self.store.get_state().app.localization.data.locale.clone();
        let system = system_locale();
        let locale = resolve_locale(saved.as_deref(), system.as_deref(), &self.config.locale);
        tracing::info!(locale = %locale, "Setting up locale");
        self.actions.setup_locale(locale)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    /// Controller for the documents list. Not mounted yet.
    pub fn documents_list(&self) -> ListController<DocumentFeed> {
        ListController::new(
            DocumentFeed::new(self.actions.clone()),
            ListConfig::from(&self.config.pagination),
            self.runtime.clone(),
            Some(Arc::clone(&self.notifier)),
        )
    }

    /// Controller for the buy-energy list under `filter`. Not mounted yet.
    pub fn producers_list(&self, filter: ProducerFilter) -> ListController<ProducerFeed> {
        ListController::new(
            ProducerFeed::new(self.actions.clone(), filter),
            ListConfig::from(&self.config.pagination),
            self.runtime.clone(),
            Some(Arc::clone(&self.notifier)),
        )
    }

    /// Detach the background subscribers and wait for pending locale
    /// writes.
    pub async fn shutdown(self) {
        let writer = self.locale_persister.detach();
        self.failure_watcher.detach();
        if let Err(e) = writer.await {
            tracing::warn!(error = %e, "Locale writer did not finish");
        }
        tracing::info!("Client shut down");
    }
}
