//! Reducer for the app slice: breadcrumbs, loader and localization.

use std::sync::Arc;

use crate::mvi::Reducer;
use crate::state::{AppState, Event, Localization};

pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = Event;

    fn reduce(state: Arc<Self::State>, event: &Self::Intent) -> Arc<Self::State> {
        match event {
            Event::SetupBreadcrumbs { breadcrumbs } => {
                let breadcrumbs = breadcrumbs.clone().unwrap_or_default();
                if breadcrumbs == state.breadcrumbs {
                    return state;
                }
                Arc::new(AppState {
                    breadcrumbs,
                    ..(*state).clone()
                })
            }

            Event::SetupLoaderVisibility { visible } => {
                if *visible == state.loader_visible {
                    return state;
                }
                Arc::new(AppState {
                    loader_visible: *visible,
                    ..(*state).clone()
                })
            }

            // The translation payload does not carry its locale code, so the
            // requested code is folded in from the event.
            Event::SetupLocale { locale, phase } => Arc::new(AppState {
                localization: state.localization.apply(phase, |_, payload| Localization {
                    locale: Some(locale.clone()),
                    content: payload.content.clone(),
                }),
                ..(*state).clone()
            }),

            _ => state,
        }
    }
}
