//! Persistent `Account` records over SeaORM.
//!
//! [`model::Account`] is the domain type; persistence goes through the
//! [`account_storage::AccountStorage`] trait, implemented for SQLite and
//! PostgreSQL by [`account_storage::SeaOrmAccountStorage`].

pub mod account_storage;
pub mod error;
pub mod executable_utils;
pub mod fixtures;
pub mod model;
pub mod storage_model;

pub use account_storage::{AccountStorage, SeaOrmAccountStorage};
pub use error::{AccountError, Result};
pub use model::{Account, AccountData, AccountId};
