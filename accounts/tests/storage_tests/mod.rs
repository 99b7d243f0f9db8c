// Storage layer integration tests for accounts
//
// These tests verify:
// - Create, update, delete and lookup against a live store
// - Query operations (all, find_by_name, count)
// - The account_tool command runner
//
// They default to in-memory SQLite; set TEST_DATABASE_URL to run them
// against another database.

pub mod cli_tests;
pub mod query_tests;
