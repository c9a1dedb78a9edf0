//! Base trait for state tree nodes in MVI architecture.

/// Marker trait for state objects held by the store.
///
/// States should be:
/// - Immutable (replaced wholesale behind an `Arc`, never mutated in place)
/// - Self-contained (all data needed by presentation code)
/// - Comparable (PartialEq for tests and change detection)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
