//! Normalized remote-operation errors.
//!
//! Whatever shape a remote failure has (transport error, decode error, a
//! panic inside the operation), it reaches the state tree as an [`ApiError`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code attached to errors produced by a panicking operation.
pub const CODE_OPERATION_PANICKED: &str = "OPERATION_PANICKED";

/// Code attached when the operation's task was dropped before it settled.
pub const CODE_OPERATION_CANCELLED: &str = "OPERATION_CANCELLED";

/// Code attached when a fetch was refused because the same kind is in flight.
pub const CODE_DUPLICATE_REQUEST: &str = "DUPLICATE_REQUEST";

/// Stable error shape stored in slice state: `{message, code?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    pub(crate) fn duplicate_request(kind: &str) -> Self {
        Self::with_code(
            format!("{} is already in progress", kind),
            CODE_DUPLICATE_REQUEST,
        )
    }

    pub fn is_duplicate_request(&self) -> bool {
        self.code.as_deref() == Some(CODE_DUPLICATE_REQUEST)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain on one line.
        ApiError::new(format!("{:#}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::with_code(err.to_string(), format!("IO_{:?}", err.kind()).to_uppercase())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::with_code(err.to_string(), "DECODE_ERROR")
    }
}

impl From<String> for ApiError {
    fn from(message: String) -> Self {
        ApiError::new(message)
    }
}

impl From<&str> for ApiError {
    fn from(message: &str) -> Self {
        ApiError::new(message)
    }
}
