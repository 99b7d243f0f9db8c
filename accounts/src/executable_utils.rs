use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use common::config::Config;
use serde_json::{Value, json};
use std::{error::Error, io::Write, path::PathBuf};
use tracing_subscriber::EnvFilter;

use crate::{
    account_storage::{AccountStorage, SeaOrmAccountStorage},
    fixtures::load_account_data,
    model::{Account, AccountId},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "accounts/config/dev.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the accounts table if it does not exist
    InitDb,
    /// Create one account per record of a JSON fixture file
    Seed { fixture: PathBuf },
    /// Print every account
    List,
    /// Print a single account
    Show { id: AccountId },
    /// Change an account's name
    Rename { id: AccountId, name: String },
    /// Delete an account
    Delete { id: AccountId },
}

pub fn initialize_executable(args: &Args) -> Result<Config, Box<dyn Error + Send + Sync>> {
    let config = Config::load_with_env(&args.config)?;

    // Logs go to stderr so command output on stdout stays machine-readable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("Failed to initialize tracing: {}", e))?;

    tracing::info!(
        project = %config.common.project_name,
        config = %args.config.display(),
        "Configuration loaded"
    );
    Ok(config)
}

pub async fn connect_storage(config: &Config) -> anyhow::Result<SeaOrmAccountStorage> {
    SeaOrmAccountStorage::connect(&config.common.database_url, &config.store)
        .await
        .with_context(|| format!("Failed to connect to {}", config.common.database_url))
}

fn account_json(account: &Account) -> Value {
    let mut map = account.to_dict();
    map.insert("id".to_string(), json!(account.id));
    Value::Object(map)
}

async fn require_account<S: AccountStorage + ?Sized>(
    storage: &S,
    id: AccountId,
) -> anyhow::Result<Account> {
    Account::find(storage, id)
        .await?
        .ok_or_else(|| anyhow!("Account {} not found", id))
}

/// Execute one CLI command against `storage`, writing JSON to `out`.
pub async fn run_command<S, W>(storage: &S, command: &Command, out: &mut W) -> anyhow::Result<()>
where
    S: AccountStorage + ?Sized,
    W: Write,
{
    let output = match command {
        Command::InitDb => {
            storage.create_schema().await?;
            json!({ "schema": "ready" })
        }
        Command::Seed { fixture } => {
            let records = load_account_data(fixture)?;
            let mut created = Vec::with_capacity(records.len());
            for data in records {
                let mut account = Account::from_data(data);
                account.create(storage).await?;
                created.push(account_json(&account));
            }
            tracing::info!(count = created.len(), "Seeded accounts");
            Value::Array(created)
        }
        Command::List => {
            let accounts = Account::all(storage).await?;
            Value::Array(accounts.iter().map(account_json).collect())
        }
        Command::Show { id } => account_json(&require_account(storage, *id).await?),
        Command::Rename { id, name } => {
            let mut account = require_account(storage, *id).await?;
            account.name = name.clone();
            account.update(storage).await?;
            account_json(&account)
        }
        Command::Delete { id } => {
            let account = require_account(storage, *id).await?;
            account.delete(storage).await?;
            json!({ "deleted": id })
        }
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
