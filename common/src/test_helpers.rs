//! Shared Test Helpers for Cross-Crate Use
//!
//! This module provides centralized test utilities used by the `common` and
//! `accounts` test suites.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";

// Global counter for unique test identifiers across parallel tests
static GLOBAL_TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique test identifier of the form `{prefix}-{timestamp}-{counter}`.
///
/// Used to keep names and emails distinct when tests share an external database.
pub fn generate_unique_id(prefix: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let counter = GLOBAL_TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}", prefix, timestamp, counter)
}

/// Get the test database URL from the environment, defaulting to in-memory SQLite.
pub fn get_test_database_url() -> String {
    std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| "sqlite::memory:".to_string())
}

/// Resolve a file under `<manifest_dir>/tests/fixtures/`.
///
/// Callers pass `env!("CARGO_MANIFEST_DIR")` so the path is stable regardless
/// of the working directory the test runner uses.
pub fn fixture_path(manifest_dir: &str, relative: &str) -> PathBuf {
    Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(relative)
}
