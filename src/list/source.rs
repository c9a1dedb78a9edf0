//! Where list pages come from.

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::api::{Document, Producer, ProducerFilter};
use crate::error::ApiError;
use crate::performers::Actions;
use crate::reducers::AppStore;
use crate::state::{EventKind, StateTree};

/// One page of items plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Paginated collection a [`ListController`](super::ListController) reads
/// from.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    type Item: Clone + Send + 'static;

    fn page_size(&self) -> u32;

    async fn fetch(&self, page: u32) -> Result<Page<Self::Item>, ApiError>;
}

/// Documents list, fetched through the store so the documents slice tracks
/// every page.
pub struct DocumentFeed {
    actions: Actions,
}

impl DocumentFeed {
    pub fn new(actions: Actions) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl PageSource for DocumentFeed {
    type Item = Document;

    fn page_size(&self) -> u32 {
        self.actions.page_size()
    }

    async fn fetch(&self, page: u32) -> Result<Page<Document>, ApiError> {
        let settled = match self.actions.get_documents(page).await {
            Some(result) => result,
            None => {
                // A page requested by an earlier mount is still loading.
                slice_idle(self.actions.store(), documents_loading).await;
                self.actions
                    .get_documents(page)
                    .await
                    .ok_or_else(|| ApiError::duplicate_request(EventKind::GetDocuments.as_str()))?
            }
        };
        settled.map(|p| Page {
            items: p.documents,
            total: p.number_of_documents,
        })
    }
}

/// Buy-energy list for one filter. A filter change means a new feed.
pub struct ProducerFeed {
    actions: Actions,
    filter: ProducerFilter,
}

impl ProducerFeed {
    pub fn new(actions: Actions, filter: ProducerFilter) -> Self {
        Self { actions, filter }
    }
}

#[async_trait]
impl PageSource for ProducerFeed {
    type Item = Producer;

    fn page_size(&self) -> u32 {
        self.actions.page_size()
    }

    async fn fetch(&self, page: u32) -> Result<Page<Producer>, ApiError> {
        let settled = match self.actions.get_producers(page, self.filter.clone()).await {
            Some(result) => result,
            None => {
                slice_idle(self.actions.store(), producers_loading).await;
                self.actions
                    .get_producers(page, self.filter.clone())
                    .await
                    .ok_or_else(|| ApiError::duplicate_request(EventKind::GetProducers.as_str()))?
            }
        };
        settled.map(|p| Page {
            items: p.producers,
            total: p.number_of_producers,
        })
    }
}

fn documents_loading(state: &StateTree) -> bool {
    state.documents.documents_list.loading
}

fn producers_loading(state: &StateTree) -> bool {
    state.producers.producers.loading
}

/// Resolves once `loading` reports the slice idle.
async fn slice_idle(store: &AppStore, loading: fn(&StateTree) -> bool) {
    let (tx, rx) = oneshot::channel();
    let tx = Mutex::new(Some(tx));
    let subscription = store.subscribe(move |state| {
        if loading(state) {
            return;
        }
        if let Some(tx) = tx.lock().take() {
            let _ = tx.send(());
        }
    });
    let _detach = scopeguard::guard(subscription, |subscription| subscription.unsubscribe());

    // Checked after subscribing so a settle in between is not missed.
    if loading(&store.get_state()) {
        let _ = rx.await;
    }
}
