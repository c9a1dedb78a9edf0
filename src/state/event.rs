//! Dispatched events.
//!
//! Every event is one operation kind carrying its call-site arguments and,
//! for remote operations, the phase reached: `Request`, `Success(payload)` or
//! `Failure(error)`. Payload shapes are fixed per kind.

use std::fmt;

use crate::api::{
    Breadcrumb, Credentials, DocumentPage, LocaleContent, Producer, ProducerFilter, ProducerPage,
    SelectedProducer, Session, UserProfile,
};
use crate::error::ApiError;
use crate::mvi::Intent;

/// Lifecycle phase of a remote operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Request,
    Success(T),
    Failure(ApiError),
}

impl<T> Phase<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

/// Logical operation identifier.
///
/// The `as_str()` value is the wire-style name used in logs and fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Login,
    Logout,
    GetUserData,
    SetupLocale,
    GetDocuments,
    GetProducers,
    GetProducer,
    SelectProducer,
    SetupBreadcrumbs,
    SetupLoaderVisibility,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::GetUserData => "GET_USER_DATA",
            Self::SetupLocale => "SETUP_LOCALE",
            Self::GetDocuments => "GET_DOCUMENTS",
            Self::GetProducers => "GET_PRODUCERS",
            Self::GetProducer => "GET_PRODUCER",
            Self::SelectProducer => "SELECT_PRODUCER",
            Self::SetupBreadcrumbs => "SETUP_BREADCRUMBS",
            Self::SetupLoaderVisibility => "SETUP_LOADER_VISIBILITY",
        }
    }

    /// All variants for iteration.
    pub fn all() -> &'static [EventKind] {
        &[
            Self::Login,
            Self::Logout,
            Self::GetUserData,
            Self::SetupLocale,
            Self::GetDocuments,
            Self::GetProducers,
            Self::GetProducer,
            Self::SelectProducer,
            Self::SetupBreadcrumbs,
            Self::SetupLoaderVisibility,
        ]
    }

    /// Parse from the wire-style name. Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.as_str() == s)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event applied to the state tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Login {
        credentials: Credentials,
        phase: Phase<Session>,
    },
    Logout {
        phase: Phase<()>,
    },
    GetUserData {
        phase: Phase<UserProfile>,
    },
    /// `locale` is the requested code; the payload does not echo it.
    SetupLocale {
        locale: String,
        phase: Phase<LocaleContent>,
    },
    GetDocuments {
        page: u32,
        phase: Phase<DocumentPage>,
    },
    GetProducers {
        page: u32,
        filter: ProducerFilter,
        phase: Phase<ProducerPage>,
    },
    GetProducer {
        producer_id: String,
        phase: Phase<Producer>,
    },
    SelectProducer {
        producer_id: String,
        phase: Phase<SelectedProducer>,
    },
    /// `None` restores the default (empty) trail.
    SetupBreadcrumbs {
        breadcrumbs: Option<Vec<Breadcrumb>>,
    },
    SetupLoaderVisibility {
        visible: bool,
    },
}

impl Intent for Event {}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Login { .. } => EventKind::Login,
            Self::Logout { .. } => EventKind::Logout,
            Self::GetUserData { .. } => EventKind::GetUserData,
            Self::SetupLocale { .. } => EventKind::SetupLocale,
            Self::GetDocuments { .. } => EventKind::GetDocuments,
            Self::GetProducers { .. } => EventKind::GetProducers,
            Self::GetProducer { .. } => EventKind::GetProducer,
            Self::SelectProducer { .. } => EventKind::SelectProducer,
            Self::SetupBreadcrumbs { .. } => EventKind::SetupBreadcrumbs,
            Self::SetupLoaderVisibility { .. } => EventKind::SetupLoaderVisibility,
        }
    }

    /// Phase name for remote-operation events, `None` for synchronous ones.
    pub fn phase_name(&self) -> Option<&'static str> {
        match self {
            Self::Login { phase, .. } => Some(phase.name()),
            Self::Logout { phase } => Some(phase.name()),
            Self::GetUserData { phase } => Some(phase.name()),
            Self::SetupLocale { phase, .. } => Some(phase.name()),
            Self::GetDocuments { phase, .. } => Some(phase.name()),
            Self::GetProducers { phase, .. } => Some(phase.name()),
            Self::GetProducer { phase, .. } => Some(phase.name()),
            Self::SelectProducer { phase, .. } => Some(phase.name()),
            Self::SetupBreadcrumbs { .. } | Self::SetupLoaderVisibility { .. } => None,
        }
    }
}
