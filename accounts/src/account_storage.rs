use crate::error::Result;
use crate::model::{Account, AccountData, AccountId};
use crate::storage_model::account;
use async_trait::async_trait;
use common::config::StoreConfig;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Schema,
};
use tracing::{debug, info, warn};

/// Persistence seam for [`Account`].
///
/// Every call is a single statement committed by the store; callers hold the
/// storage for as long as they need the connection and release it explicitly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Create the `accounts` table if it does not exist yet.
    async fn create_schema(&self) -> Result<()>;

    /// Insert a row and return the id the store assigned to it.
    async fn insert(&self, data: &AccountData) -> Result<AccountId>;

    async fn update(&self, id: AccountId, data: &AccountData) -> Result<()>;

    async fn delete(&self, id: AccountId) -> Result<()>;

    async fn find(&self, id: AccountId) -> Result<Option<Account>>;

    async fn all(&self) -> Result<Vec<Account>>;

    /// Exact, case-sensitive match on `name`.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Account>>;

    async fn count(&self) -> Result<u64>;

    /// Remove every account row, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64>;
}

/// SeaORM-backed account storage over SQLite or PostgreSQL.
#[derive(Clone)]
pub struct SeaOrmAccountStorage {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountStorage {
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, &StoreConfig::default()).await
    }

    pub async fn connect(database_url: &str, config: &StoreConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options.sqlx_logging(config.sqlx_logging);
        // Each pooled connection to an in-memory SQLite database sees its own empty database.
        if is_in_memory_sqlite(database_url) {
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(config.max_connections.max(1));
        }

        let db = Database::connect(options).await?;
        info!(backend = ?db.get_database_backend(), "Connected to account store");
        Ok(Self { db })
    }

    pub async fn close(self) -> Result<()> {
        self.db.close().await?;
        debug!("Account store connection closed");
        Ok(())
    }
}

fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite:") && database_url.contains(":memory:")
}

fn active_model(data: &AccountData) -> account::ActiveModel {
    account::ActiveModel {
        id: NotSet,
        name: Set(data.name.clone()),
        email: Set(data.email.clone()),
        phone_number: Set(data.phone_number.clone()),
        disabled: Set(data.disabled),
        date_joined: Set(data.date_joined),
    }
}

#[async_trait]
impl AccountStorage for SeaOrmAccountStorage {
    async fn create_schema(&self) -> Result<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(account::Entity);
        statement.if_not_exists();

        self.db.execute(backend.build(&statement)).await?;
        debug!("Account schema ready");
        Ok(())
    }

    async fn insert(&self, data: &AccountData) -> Result<AccountId> {
        info!("Creating account {}", data.name);
        let model = active_model(data).insert(&self.db).await?;
        debug!(id = model.id, "Account created");
        Ok(model.id)
    }

    async fn update(&self, id: AccountId, data: &AccountData) -> Result<()> {
        info!(id, "Updating account {}", data.name);
        let mut model = active_model(data);
        model.id = Unchanged(id);
        model.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<()> {
        info!(id, "Deleting account");
        let result = account::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            warn!(id, "No account row to delete");
        }
        Ok(())
    }

    async fn find(&self, id: AccountId) -> Result<Option<Account>> {
        debug!(id, "Finding account");
        let model = account::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Account::from))
    }

    async fn all(&self) -> Result<Vec<Account>> {
        debug!("Listing all accounts");
        let models = account::Entity::find()
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Account>> {
        debug!("Finding accounts named {}", name);
        let models = account::Entity::find()
            .filter(account::Column::Name.eq(name))
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(account::Entity::find().count(&self.db).await?)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = account::Entity::delete_many().exec(&self.db).await?;
        debug!(rows = result.rows_affected, "Cleared accounts table");
        Ok(result.rows_affected)
    }
}
