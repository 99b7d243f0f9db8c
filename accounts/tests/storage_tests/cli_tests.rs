// account_tool command runner tests

use accounts::Account;
use accounts::executable_utils::{Command, run_command};
use serde_json::Value;

use super::setup::{TestContext, TestResult, account_fixture_path};

async fn run_json(ctx: &TestContext, command: Command) -> TestResult<Value> {
    let mut out = Vec::new();
    run_command(&ctx.storage, &command, &mut out)
        .await
        .map_err(|e| e.to_string())?;
    Ok(serde_json::from_slice(&out)?)
}

#[tokio::test]
#[serial_test::serial]
async fn test_seed_and_list() -> TestResult {
    let ctx = TestContext::new().await?;

    let seeded = run_json(&ctx, Command::Seed { fixture: account_fixture_path() }).await?;
    let listed = run_json(&ctx, Command::List).await?;

    let seeded = seeded.as_array().expect("seed prints an array");
    assert_eq!(seeded.len(), ctx.account_data.len());
    assert_eq!(listed.as_array().map(Vec::len), Some(ctx.account_data.len()));
    assert!(seeded.iter().all(|a| a["id"].is_i64()));
    assert_eq!(listed[0]["name"], seeded[0]["name"]);
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_show_rename_delete() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut account = Account::from_data(ctx.pick(1));
    account.create(&ctx.storage).await?;
    let id = account.id.unwrap();

    let shown = run_json(&ctx, Command::Show { id }).await?;
    assert_eq!(shown["name"], Value::String(account.name.clone()));
    assert_eq!(shown["id"], Value::from(id));

    let renamed = run_json(&ctx, Command::Rename { id, name: "Renamed".to_string() }).await?;
    assert_eq!(renamed["name"], "Renamed");
    assert_eq!(Account::find(&ctx.storage, id).await?.unwrap().name, "Renamed");

    let deleted = run_json(&ctx, Command::Delete { id }).await?;
    assert_eq!(deleted["deleted"], Value::from(id));
    assert!(Account::find(&ctx.storage, id).await?.is_none());
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_show_unknown_account_fails() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut out = Vec::new();

    let err = run_command(&ctx.storage, &Command::Show { id: 4242 }, &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("4242"));
    assert!(out.is_empty());
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_init_db_reports_ready() -> TestResult {
    let ctx = TestContext::new().await?;

    let output = run_json(&ctx, Command::InitDb).await?;

    assert_eq!(output["schema"], "ready");
    ctx.teardown().await
}
