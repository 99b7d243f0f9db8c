pub mod config;
pub mod yaml_include;

/// Common utilities shared across the accounts workspace
///
/// This crate provides shared functionality used by the `accounts` crate and
/// its executables:
///
/// - Configuration loading with `!include` support
/// - Environment overrides for the database URL
/// - Shared test helpers

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{fixture_path, generate_unique_id, get_test_database_url};
