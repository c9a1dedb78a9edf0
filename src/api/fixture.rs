//! Recorded-fixture implementation of [`RemoteApi`].
//!
//! Serves canned payloads from a JSON document. Used by the headless runner
//! and by tests; individual operations can be forced to fail by kind.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;

use super::types::{
    Credentials, Document, DocumentPage, LocaleContent, Producer, ProducerFilter, ProducerPage,
    SelectedProducer, Session, UserProfile,
};
use super::RemoteApi;
use crate::error::ApiError;
use crate::state::EventKind;

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixtures {
    /// Accepted credentials. `None` accepts any login.
    pub credentials: Option<Credentials>,
    pub session: Option<Session>,
    pub profile: Option<UserProfile>,
    /// Translation tables keyed by locale code.
    pub locales: HashMap<String, LocaleContent>,
    pub documents: Vec<Document>,
    pub producers: Vec<Producer>,
    /// Forced failures keyed by event kind (e.g. `"GET_DOCUMENTS"`).
    pub failures: HashMap<String, ApiError>,
    /// Artificial latency applied to every call.
    pub latency_ms: u64,
}

/// In-memory API backed by [`Fixtures`].
pub struct FixtureApi {
    fixtures: Mutex<Fixtures>,
    calls: Mutex<Vec<EventKind>>,
}

impl FixtureApi {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            fixtures: Mutex::new(fixtures),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Load fixtures from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        let fixtures: Fixtures = serde_json::from_str(&content)?;
        Ok(Self::new(fixtures))
    }

    /// Force every subsequent call of `kind` to fail with `error`.
    pub fn fail(&self, kind: EventKind, error: ApiError) {
        self.fixtures
            .lock()
            .failures
            .insert(kind.as_str().to_string(), error);
    }

    /// Let calls of `kind` succeed again.
    pub fn recover(&self, kind: EventKind) {
        self.fixtures.lock().failures.remove(kind.as_str());
    }

    /// Kinds of all calls received so far, in order.
    pub fn calls(&self) -> Vec<EventKind> {
        self.calls.lock().clone()
    }

    /// Number of calls received for `kind`.
    pub fn call_count(&self, kind: EventKind) -> usize {
        self.calls.lock().iter().filter(|k| **k == kind).count()
    }

    async fn enter(&self, kind: EventKind) -> Result<(), ApiError> {
        self.calls.lock().push(kind);
        let (latency, failure) = {
            let fixtures = self.fixtures.lock();
            (
                fixtures.latency_ms,
                fixtures.failures.get(kind.as_str()).cloned(),
            )
        };
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::with_code(format!("{} not available", what), "404")
    }
}

fn page_bounds(page: u32, page_size: u32, len: usize) -> (usize, usize) {
    let start = (page as usize)
        .saturating_mul(page_size as usize)
        .min(len);
    let end = start.saturating_add(page_size as usize).min(len);
    (start, end)
}

#[async_trait]
impl RemoteApi for FixtureApi {
    async fn login(&self, credentials: Credentials) -> Result<Session, ApiError> {
        self.enter(EventKind::Login).await?;
        let fixtures = self.fixtures.lock();
        if let Some(expected) = &fixtures.credentials {
            if *expected != credentials {
                return Err(ApiError::with_code("Invalid credentials", "401"));
            }
        }
        Ok(fixtures.session.clone().unwrap_or_else(|| Session {
            token: uuid::Uuid::new_v4().to_string(),
        }))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.enter(EventKind::Logout).await
    }

    async fn get_user_data(&self) -> Result<UserProfile, ApiError> {
        self.enter(EventKind::GetUserData).await?;
        self.fixtures
            .lock()
            .profile
            .clone()
            .ok_or_else(|| Self::not_found("profile"))
    }

    async fn get_localization(&self, locale: String) -> Result<LocaleContent, ApiError> {
        self.enter(EventKind::SetupLocale).await?;
        self.fixtures
            .lock()
            .locales
            .get(&locale)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("locale '{}'", locale)))
    }

    async fn get_documents(&self, page: u32, page_size: u32) -> Result<DocumentPage, ApiError> {
        self.enter(EventKind::GetDocuments).await?;
        let fixtures = self.fixtures.lock();
        let (start, end) = page_bounds(page, page_size, fixtures.documents.len());
        Ok(DocumentPage {
            documents: fixtures.documents[start..end].to_vec(),
            number_of_documents: fixtures.documents.len(),
        })
    }

    async fn get_producers(
        &self,
        page: u32,
        page_size: u32,
        filter: ProducerFilter,
    ) -> Result<ProducerPage, ApiError> {
        self.enter(EventKind::GetProducers).await?;
        let fixtures = self.fixtures.lock();
        let matching: Vec<&Producer> = fixtures
            .producers
            .iter()
            .filter(|p| filter.matches(p))
            .collect();
        let (start, end) = page_bounds(page, page_size, matching.len());
        Ok(ProducerPage {
            producers: matching[start..end].iter().map(|p| (*p).clone()).collect(),
            number_of_producers: matching.len(),
        })
    }

    async fn get_producer(&self, producer_id: String) -> Result<Producer, ApiError> {
        self.enter(EventKind::GetProducer).await?;
        self.fixtures
            .lock()
            .producers
            .iter()
            .find(|p| p.id == producer_id)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("producer '{}'", producer_id)))
    }

    async fn select_producer(&self, producer_id: String) -> Result<SelectedProducer, ApiError> {
        self.enter(EventKind::SelectProducer).await?;
        let fixtures = self.fixtures.lock();
        match fixtures.producers.iter().find(|p| p.id == producer_id) {
            Some(p) if p.is_sold_out() => Err(ApiError::with_code(
                format!("Producer '{}' is sold out", p.name),
                "409",
            )),
            Some(_) => Ok(SelectedProducer { producer_id }),
            None => Err(Self::not_found(&format!("producer '{}'", producer_id))),
        }
    }
}
