use std::sync::Arc;

use super::Actions;
use crate::api::{Breadcrumb, LocaleContent};
use crate::dispatch::Settlement;
use crate::state::{Event, StateTree};

impl Actions {
    /// Fetch translations for `locale` and make it the active locale.
    pub fn setup_locale(&self, locale: impl Into<String>) -> Settlement<LocaleContent> {
        let locale = locale.into();
        let api = Arc::clone(&self.api);
        let requested = locale.clone();
        self.dispatcher.dispatch_async(
            move || async move { api.get_localization(requested).await },
            move |phase| Event::SetupLocale {
                locale: locale.clone(),
                phase,
            },
            |state: &StateTree| state.app.localization.loading,
        )
    }

    /// `None` clears the trail.
    pub fn setup_breadcrumbs(&self, breadcrumbs: Option<Vec<Breadcrumb>>) {
        self.store().dispatch(Event::SetupBreadcrumbs { breadcrumbs });
    }

    pub fn setup_loader_visibility(&self, visible: bool) {
        self.store().dispatch(Event::SetupLoaderVisibility { visible });
    }
}
