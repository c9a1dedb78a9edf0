//! Reducer for the producers slice (detail, selection, buy-energy list).

use std::sync::Arc;

use super::accumulate;
use crate::api::ProducerPage;
use crate::mvi::Reducer;
use crate::state::{Event, ProducersState};

pub struct ProducersReducer;

impl Reducer for ProducersReducer {
    type State = ProducersState;
    type Intent = Event;

    fn reduce(state: Arc<Self::State>, event: &Self::Intent) -> Arc<Self::State> {
        match event {
            Event::GetProducer { phase, .. } => Arc::new(ProducersState {
                producer: state.producer.replace(phase),
                ..(*state).clone()
            }),

            Event::SelectProducer { phase, .. } => Arc::new(ProducersState {
                selected_producer: state.selected_producer.replace(phase),
                ..(*state).clone()
            }),

            Event::GetProducers { page, phase, .. } => Arc::new(ProducersState {
                producers: state.producers.apply(phase, |loaded, fetched| ProducerPage {
                    producers: accumulate(&loaded.producers, &fetched.producers, *page),
                    number_of_producers: fetched.number_of_producers,
                }),
                ..(*state).clone()
            }),

            _ => state,
        }
    }
}
