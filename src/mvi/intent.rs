//! Base trait for intents (dispatched events) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Phases of remote operations (request, success, failure)
/// - Synchronous UI settings (breadcrumbs, loader visibility)
///
/// Intents are processed by reducers to produce new states. They cross task
/// boundaries (settlement continuations run on the runtime), hence `Send`,
/// and are traced when applied, hence `Debug`.
pub trait Intent: std::fmt::Debug + Send + 'static {}
