use std::sync::Arc;

use super::Actions;
use crate::api::DocumentPage;
use crate::dispatch::Settlement;
use crate::state::{Event, StateTree};

impl Actions {
    /// Fetch one zero-based page of the documents list.
    pub fn get_documents(&self, page: u32) -> Settlement<DocumentPage> {
        let api = Arc::clone(&self.api);
        let page_size = self.page_size;
        self.dispatcher.dispatch_async(
            move || async move { api.get_documents(page, page_size).await },
            move |phase| Event::GetDocuments { page, phase },
            |state: &StateTree| state.documents.documents_list.loading,
        )
    }
}
