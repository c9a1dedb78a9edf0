//! Root state tree and its slices.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::slice::SliceState;
use crate::api::{
    Breadcrumb, DocumentPage, Producer, ProducerPage, SelectedProducer, Session, UserProfile,
};
use crate::mvi::UiState;

/// The whole client state. Each field is owned by exactly one reducer and is
/// replaced (never mutated) when that reducer accepts an event.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StateTree {
    pub users: Arc<UsersState>,
    pub app: Arc<AppState>,
    pub documents: Arc<DocumentsState>,
    pub producers: Arc<ProducersState>,
}

impl UiState for StateTree {}

impl StateTree {
    /// Initial tree, seeded with the locale persisted by a previous run.
    pub fn with_saved_locale(locale: Option<String>) -> Self {
        Self {
            app: Arc::new(AppState {
                localization: SliceState::new(Localization {
                    locale,
                    content: BTreeMap::new(),
                }),
                ..AppState::default()
            }),
            ..Self::default()
        }
    }
}

/// Authentication and profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UsersState {
    pub login: SliceState<Option<Session>>,
    pub logout: SliceState<()>,
    pub profile: SliceState<Option<UserProfile>>,
}

impl UiState for UsersState {}

/// Application chrome: navigation trail, global loader, translations.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub breadcrumbs: Vec<Breadcrumb>,
    pub loader_visible: bool,
    pub localization: SliceState<Localization>,
}

impl UiState for AppState {}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Localization {
    pub locale: Option<String>,
    pub content: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DocumentsState {
    /// Pages loaded so far, concatenated.
    pub documents_list: SliceState<DocumentPage>,
}

impl UiState for DocumentsState {}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProducersState {
    pub producer: SliceState<Option<Producer>>,
    pub selected_producer: SliceState<Option<SelectedProducer>>,
    /// Pages of the buy-energy list loaded so far, concatenated.
    pub producers: SliceState<ProducerPage>,
}

impl UiState for ProducersState {}
