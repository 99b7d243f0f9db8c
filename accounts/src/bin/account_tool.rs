use anyhow::anyhow;
use clap::Parser;

use accounts::executable_utils::{Args, connect_storage, initialize_executable, run_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = initialize_executable(&args).map_err(|e| anyhow!(e))?;

    let storage = connect_storage(&config).await?;
    let mut stdout = std::io::stdout().lock();
    let result = run_command(&storage, &args.command, &mut stdout).await;

    storage.close().await?;
    result
}
