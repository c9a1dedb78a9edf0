//! Domain payloads exchanged with the remote API.
//!
//! Field names follow the remote JSON (camelCase).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Login form input.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Credentials travel inside LOGIN events, which are traced.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authenticated session returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

/// Contract state of the customer; trading requires an active or expired one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractStatus {
    Active,
    Expired,
    Pending,
    #[serde(other)]
    Unknown,
}

impl ContractStatus {
    pub fn allows_trading(&self) -> bool {
        matches!(self, Self::Active | Self::Expired)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub status_code: ContractStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
}

/// One entry of the documents list. Every descriptive field may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A page of documents plus the total number available.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    pub documents: Vec<Document>,
    pub number_of_documents: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProducerStatus {
    Active,
    SoldOut,
    #[serde(other)]
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producer {
    pub id: String,
    pub name: String,
    /// Price in ct/kWh.
    pub price: f64,
    #[serde(default)]
    pub energy_type: String,
    pub status: ProducerStatus,
}

impl Producer {
    pub fn is_sold_out(&self) -> bool {
        self.status == ProducerStatus::SoldOut
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerPage {
    pub producers: Vec<Producer>,
    pub number_of_producers: usize,
}

/// Filter applied to the producers list. An empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerFilter {
    #[serde(default)]
    pub energy_types: Vec<String>,
}

impl ProducerFilter {
    pub fn matches(&self, producer: &Producer) -> bool {
        self.energy_types.is_empty() || self.energy_types.contains(&producer.energy_type)
    }
}

/// Confirmation of a producer selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProducer {
    pub producer_id: String,
}

/// Translation table for one locale. The remote payload does not echo the
/// locale code it was requested for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocaleContent {
    #[serde(default)]
    pub content: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: String,
    pub label: String,
    pub path: String,
}
