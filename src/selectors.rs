//! Derived read-only views over the state tree, one per screen.

use serde::Serialize;

use crate::api::{Breadcrumb, Document, Producer, SelectedProducer, UserProfile};
use crate::error::ApiError;
use crate::state::StateTree;

/// Application shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppView {
    pub logging_out: bool,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Translations are being fetched.
    pub loading: bool,
    pub locale: Option<String>,
}

pub fn app_view(state: &StateTree) -> AppView {
    AppView {
        logging_out: state.users.logout.loading,
        breadcrumbs: state.app.breadcrumbs.clone(),
        loading: state.app.localization.loading,
        locale: state.app.localization.data.locale.clone(),
    }
}

/// "My documents" list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentsView {
    pub documents: Vec<Document>,
    pub has_next: bool,
    pub loading: bool,
    pub error: Option<ApiError>,
}

pub fn documents_view(state: &StateTree) -> DocumentsView {
    let list = &state.documents.documents_list;
    DocumentsView {
        documents: list.data.documents.clone(),
        has_next: list.data.number_of_documents > list.data.documents.len(),
        loading: list.loading,
        error: list.error.clone(),
    }
}

/// Producer detail screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerView {
    /// Any of producer, profile or selection is loading.
    pub loading: bool,
    pub producer: Option<Producer>,
    pub profile: Option<UserProfile>,
    pub selected_producer: Option<SelectedProducer>,
    /// Loading failure of the producer or the profile, producer first.
    pub error: Option<ApiError>,
    pub select_error: Option<ApiError>,
    pub sold_out: bool,
    /// Contract allows trading. `false` while the profile is unknown.
    pub can_trade: bool,
}

pub fn producer_view(state: &StateTree) -> ProducerView {
    let producers = &state.producers;
    let profile = &state.users.profile;
    let producer = producers.producer.data.clone();

    ProducerView {
        loading: producers.producer.loading
            || profile.loading
            || producers.selected_producer.loading,
        sold_out: producer.as_ref().is_some_and(Producer::is_sold_out),
        can_trade: profile
            .data
            .as_ref()
            .is_some_and(|p| p.user.status_code.allows_trading()),
        producer,
        profile: profile.data.clone(),
        selected_producer: producers.selected_producer.data.clone(),
        error: producers
            .producer
            .error
            .clone()
            .or_else(|| profile.error.clone()),
        select_error: producers.selected_producer.error.clone(),
    }
}
