//! Remote API contract.
//!
//! The client core never sees transport details: every remote operation is
//! an async method returning a domain payload or an [`ApiError`].

mod fixture;
mod types;

use async_trait::async_trait;

use crate::error::ApiError;

pub use fixture::{FixtureApi, Fixtures};
pub use types::{
    Breadcrumb, ContractStatus, Credentials, Document, DocumentPage, LocaleContent, Producer,
    ProducerFilter, ProducerPage, ProducerStatus, SelectedProducer, Session, User, UserProfile,
};

/// Operations offered by the trading platform backend.
#[async_trait]
pub trait RemoteApi: Send + Sync + 'static {
    async fn login(&self, credentials: Credentials) -> Result<Session, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn get_user_data(&self) -> Result<UserProfile, ApiError>;

    /// Translation table for `locale`.
    async fn get_localization(&self, locale: String) -> Result<LocaleContent, ApiError>;

    /// Zero-based `page` of `page_size` documents.
    async fn get_documents(&self, page: u32, page_size: u32) -> Result<DocumentPage, ApiError>;

    async fn get_producers(
        &self,
        page: u32,
        page_size: u32,
        filter: ProducerFilter,
    ) -> Result<ProducerPage, ApiError>;

    async fn get_producer(&self, producer_id: String) -> Result<Producer, ApiError>;

    async fn select_producer(&self, producer_id: String) -> Result<SelectedProducer, ApiError>;
}
