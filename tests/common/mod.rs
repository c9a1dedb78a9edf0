//! Shared test utilities and fixture builders.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tempfile::TempDir;
use voltdesk::api::{
    ContractStatus, Document, FixtureApi, Fixtures, LocaleContent, Producer, ProducerStatus,
    Session, User, UserProfile,
};
use voltdesk::config::{Config, StorageConfig};
use voltdesk::notify::{Notification, Notifier};
use voltdesk::Client;

/// Notifier that keeps everything it was handed.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn push(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

// -- Fixture builders ---------------------------------------------------------

pub fn documents(count: u64) -> Vec<Document> {
    (1..=count)
        .map(|id| Document {
            id,
            kind: Some("invoice".to_string()),
            date: Some(1_521_911_833 + id as i64),
            name: Some(format!("Invoice {}.pdf", id)),
            description: Some("Monthly invoice".to_string()),
        })
        .collect()
}

pub fn producer(id: &str, energy_type: &str, status: ProducerStatus) -> Producer {
    Producer {
        id: id.to_string(),
        name: format!("Producer {}", id),
        price: 2.9,
        energy_type: energy_type.to_string(),
        status,
    }
}

pub fn profile(status: ContractStatus) -> UserProfile {
    UserProfile {
        user: User {
            id: "u1".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            status_code: status,
        },
    }
}

pub fn locale(entries: &[(&str, &str)]) -> LocaleContent {
    LocaleContent {
        content: entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Fixtures covering every operation: 25 documents, three producers, English
/// and German translations.
pub fn fixtures() -> Fixtures {
    let mut fixtures = Fixtures {
        session: Some(Session {
            token: "t1".to_string(),
        }),
        profile: Some(profile(ContractStatus::Active)),
        documents: documents(25),
        producers: vec![
            producer("p1", "wind", ProducerStatus::Active),
            producer("p2", "solar", ProducerStatus::SoldOut),
            producer("p3", "wind", ProducerStatus::Standard),
        ],
        ..Fixtures::default()
    };
    fixtures
        .locales
        .insert("en".to_string(), locale(&[("app.logout", "Logout")]));
    fixtures
        .locales
        .insert("de".to_string(), locale(&[("app.logout", "Abmelden")]));
    fixtures
}

// -- Client helpers -----------------------------------------------------------

/// Config whose state file lives in `dir`.
pub fn config_in(dir: &TempDir) -> Config {
    Config {
        storage: StorageConfig {
            path: Some(dir.path().join("state.toml")),
        },
        ..Config::default()
    }
}

pub struct Harness {
    pub client: Client,
    pub api: Arc<FixtureApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub dir: TempDir,
}

/// Client over `fixtures` with its state file in a fresh temp dir.
pub fn harness(fixtures: Fixtures) -> Harness {
    let dir = TempDir::new().expect("Failed to create temp dir");
    harness_in(fixtures, dir)
}

pub fn harness_in(fixtures: Fixtures, dir: TempDir) -> Harness {
    let api = Arc::new(FixtureApi::new(fixtures));
    let notifier = RecordingNotifier::new();
    let client = Client::bootstrap(config_in(&dir), api.clone(), notifier.clone())
        .expect("bootstrap should succeed");
    Harness {
        client,
        api,
        notifier,
        dir,
    }
}

/// Let spawned tasks and debounce timers run. Under a paused clock this
/// advances time by `ms`.
pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
