//! Concurrent allocation against a single quota.
//!
//! The test store is SQLite with a single pooled connection. SQLite ignores the
//! `FOR UPDATE` row lock, so these tests show that interleaved transactions
//! serialize and leave consistent counts. They do not exercise the PostgreSQL
//! row lock taken on the quota.

use std::time::Duration;

use futures::future::join_all;
use ratatoskr::server::{
    error::{game_profile::GameProfileError, Error},
    service::game_profile::GameProfileService,
};
use ratatoskr_test_utils::prelude::*;

use crate::util::TestContextExt;

const CONCURRENT_REQUESTS: usize = 8;

/// Expect exactly one success and N-1 exhausted failures for N concurrent allocations
#[tokio::test]
async fn allocates_exactly_once_under_contention() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_game_profile_tables()
        .with_user(1, "alice")
        .with_quota(1, 1, 0)
        .build()
        .await?;
    let state = test.into_app_state();
    let service = GameProfileService::new(&state.store, &state.snowflake);

    let names: Vec<String> = (0..CONCURRENT_REQUESTS)
        .map(|i| format!("alice_{:02}", i))
        .collect();
    let results = join_all(
        names
            .iter()
            .map(|name| service.allocate_profile(1, name, None)),
    )
    .await;

    let successes = results.iter().filter(|result| result.is_ok()).count();
    let exhausted = results
        .iter()
        .filter(|result| {
            matches!(
                result,
                Err(Error::GameProfileError(GameProfileError::QuotaExhausted { .. }))
            )
        })
        .count();

    assert_eq!(successes, 1);
    assert_eq!(exhausted, CONCURRENT_REQUESTS - 1);
    assert_eq!(test.game_profile().count_profiles().await?, 1);
    assert_eq!(test.game_profile().count_ledger_entries().await?, 1);
    let quota = test.game_profile().quota(1).await?.unwrap();
    assert_eq!((quota.used, quota.total), (1, 1));

    Ok(())
}

/// Expect concurrent allocations for different users to all succeed
#[tokio::test]
async fn allocates_for_different_users_independently() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_game_profile_tables()
        .with_user(1, "alice")
        .with_user(2, "bob")
        .with_user(3, "carol")
        .build()
        .await?;
    let state = test.into_app_state();
    let service = GameProfileService::new(&state.store, &state.snowflake);

    let requests = [(1, "alice_01"), (2, "bob_01"), (3, "carol_01")];
    let results = join_all(
        requests
            .iter()
            .map(|(user_id, name)| service.allocate_profile(*user_id, name, None)),
    )
    .await;

    assert!(results.iter().all(|result| result.is_ok()));
    assert_eq!(test.game_profile().count_profiles().await?, 3);
    for (user_id, _) in requests {
        let entries = test.game_profile().ledger_entries(user_id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].after_used, entries[0].before_used + entries[0].delta);
    }

    Ok(())
}

/// Expect no partial writes when allocations are dropped part way through
#[tokio::test]
async fn leaves_consistent_state_when_cancelled() -> Result<(), TestError> {
    const ATTEMPTS: u64 = 24;

    let test = TestBuilder::new()
        .with_game_profile_tables()
        .with_user(1, "alice")
        .with_quota(1, ATTEMPTS as i32 + 1, 0)
        .build()
        .await?;
    let state = test.into_app_state();
    let service = GameProfileService::new(&state.store, &state.snowflake);

    for i in 0..ATTEMPTS {
        let name = format!("alice_{:02}", i);
        let _ = tokio::time::timeout(
            Duration::from_micros(i * 50),
            service.allocate_profile(1, &name, None),
        )
        .await;
    }

    let profiles = test.game_profile().count_profiles().await?;
    let entries = test.game_profile().count_ledger_entries().await?;
    let quota = test.game_profile().quota(1).await?.unwrap();
    assert_eq!(profiles, entries);
    assert_eq!(quota.used as u64, profiles);
    assert!(quota.used <= quota.total);

    service.allocate_profile(1, "alice_final", None).await.unwrap();
    assert_eq!(test.game_profile().count_profiles().await?, profiles + 1);

    Ok(())
}
