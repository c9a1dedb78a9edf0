//! Reducer for the documents slice.

use std::sync::Arc;

use super::accumulate;
use crate::api::DocumentPage;
use crate::mvi::Reducer;
use crate::state::{DocumentsState, Event};

pub struct DocumentsReducer;

impl Reducer for DocumentsReducer {
    type State = DocumentsState;
    type Intent = Event;

    fn reduce(state: Arc<Self::State>, event: &Self::Intent) -> Arc<Self::State> {
        match event {
            Event::GetDocuments { page, phase } => Arc::new(DocumentsState {
                documents_list: state.documents_list.apply(phase, |loaded, fetched| {
                    DocumentPage {
                        documents: accumulate(&loaded.documents, &fetched.documents, *page),
                        number_of_documents: fetched.number_of_documents,
                    }
                }),
            }),

            _ => state,
        }
    }
}
