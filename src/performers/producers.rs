use std::sync::Arc;

use super::Actions;
use crate::api::{Producer, ProducerFilter, ProducerPage, SelectedProducer};
use crate::dispatch::Settlement;
use crate::state::{Event, StateTree};

impl Actions {
    /// Fetch one page of the buy-energy list.
    pub fn get_producers(&self, page: u32, filter: ProducerFilter) -> Settlement<ProducerPage> {
        let api = Arc::clone(&self.api);
        let page_size = self.page_size;
        let meta = filter.clone();
        self.dispatcher.dispatch_async(
            move || async move { api.get_producers(page, page_size, filter).await },
            move |phase| Event::GetProducers {
                page,
                filter: meta.clone(),
                phase,
            },
            |state: &StateTree| state.producers.producers.loading,
        )
    }

    pub fn get_producer(&self, producer_id: impl Into<String>) -> Settlement<Producer> {
        let producer_id = producer_id.into();
        let api = Arc::clone(&self.api);
        let requested = producer_id.clone();
        self.dispatcher.dispatch_async(
            move || async move { api.get_producer(requested).await },
            move |phase| Event::GetProducer {
                producer_id: producer_id.clone(),
                phase,
            },
            |state: &StateTree| state.producers.producer.loading,
        )
    }

    pub fn select_producer(&self, producer_id: impl Into<String>) -> Settlement<SelectedProducer> {
        let producer_id = producer_id.into();
        let api = Arc::clone(&self.api);
        let requested = producer_id.clone();
        self.dispatcher.dispatch_async(
            move || async move { api.select_producer(requested).await },
            move |phase| Event::SelectProducer {
                producer_id: producer_id.clone(),
                phase,
            },
            |state: &StateTree| state.producers.selected_producer.loading,
        )
    }
}
