// Lookup and listing tests

use accounts::{Account, AccountStorage};

use super::setup::{TestContext, TestResult};

#[tokio::test]
#[serial_test::serial]
async fn test_find_account() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut account = Account::from_data(ctx.pick(5));
    account.create(&ctx.storage).await?;

    let found_account = Account::find(&ctx.storage, account.id.unwrap()).await?;

    let found_account = found_account.expect("Account should be found.");
    assert_eq!(found_account.id, account.id, "ID should be the same.");
    assert_eq!(found_account.name, account.name, "Name should be the same.");
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_find_unknown_id_returns_none() -> TestResult {
    let ctx = TestContext::new().await?;
    let mut account = Account::from_data(ctx.pick(0));
    account.create(&ctx.storage).await?;

    let missing = account.id.unwrap() + 1000;

    assert!(Account::find(&ctx.storage, missing).await?.is_none());
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_all_on_empty_table() -> TestResult {
    let ctx = TestContext::new().await?;

    assert!(Account::all(&ctx.storage).await?.is_empty());
    assert_eq!(Account::count(&ctx.storage).await?, 0);
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_count_tracks_creates() -> TestResult {
    let ctx = TestContext::new().await?;

    for (expected, data) in ctx.account_data.clone().into_iter().enumerate() {
        assert_eq!(Account::count(&ctx.storage).await?, expected as u64);
        Account::from_data(data).create(&ctx.storage).await?;
    }

    assert_eq!(Account::count(&ctx.storage).await?, ctx.account_data.len() as u64);
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_find_by_name() -> TestResult {
    let ctx = TestContext::new().await?;
    for data in ctx.account_data.clone() {
        Account::from_data(data).create(&ctx.storage).await?;
    }
    let target = ctx.pick(2);
    let mut duplicate = Account::from_data(target.clone());
    duplicate.email = "second@example.com".to_string();
    duplicate.create(&ctx.storage).await?;

    let matches = Account::find_by_name(&ctx.storage, &target.name).await?;

    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|a| a.name == target.name));
    assert_eq!(matches[1].email, "second@example.com");
    assert!(Account::find_by_name(&ctx.storage, "Nobody").await?.is_empty());
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_schema_creation_is_idempotent() -> TestResult {
    let ctx = TestContext::new().await?;
    Account::from_data(ctx.pick(0)).create(&ctx.storage).await?;

    ctx.storage.create_schema().await?;

    assert_eq!(Account::count(&ctx.storage).await?, 1);
    ctx.teardown().await
}

#[tokio::test]
#[serial_test::serial]
async fn test_delete_all_reports_rows() -> TestResult {
    let ctx = TestContext::new().await?;
    for data in ctx.account_data.clone() {
        Account::from_data(data).create(&ctx.storage).await?;
    }

    let removed = ctx.storage.delete_all().await?;

    assert_eq!(removed, ctx.account_data.len() as u64);
    assert_eq!(Account::count(&ctx.storage).await?, 0);
    ctx.teardown().await
}
