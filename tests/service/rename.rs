//! Concurrent writes racing for the same profile name.
//!
//! Both requests can pass the name lookup before either writes, so the unique
//! index on the name column decides the winner.

use futures::future::join_all;
use ratatoskr::server::{
    error::{game_profile::GameProfileError, Error},
    service::game_profile::GameProfileService,
};
use ratatoskr_test_utils::prelude::*;

use crate::util::TestContextExt;

fn is_name_taken<T>(result: &Result<T, Error>) -> bool {
    matches!(
        result,
        Err(Error::GameProfileError(GameProfileError::NameTaken(_)))
    )
}

/// Expect one success and one NameTaken for two renames to the same name
#[tokio::test]
async fn renames_to_same_name_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_game_profile_tables()
        .with_user(1, "alice")
        .with_user(2, "bob")
        .build()
        .await?;
    let alice = test.game_profile().insert_profile(1, "alice_01").await?;
    let bob = test.game_profile().insert_profile(2, "bob_01").await?;
    let state = test.into_app_state();
    let service = GameProfileService::new(&state.store, &state.snowflake);

    let results = join_all([
        service.rename_profile(1, alice.id, "wanted"),
        service.rename_profile(2, bob.id, "wanted"),
    ])
    .await;

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert_eq!(results.iter().filter(|result| is_name_taken(result)).count(), 1);

    let alice = test.game_profile().profile(alice.id).await?.unwrap();
    let bob = test.game_profile().profile(bob.id).await?.unwrap();
    let names = [alice.name.as_str(), bob.name.as_str()];
    assert_eq!(names.iter().filter(|name| **name == "wanted").count(), 1);
    assert!(names.contains(&"alice_01") || names.contains(&"bob_01"));

    Ok(())
}

/// Expect one success and one NameTaken for two users allocating the same name
#[tokio::test]
async fn allocates_same_name_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_game_profile_tables()
        .with_user(1, "alice")
        .with_user(2, "bob")
        .build()
        .await?;
    let state = test.into_app_state();
    let service = GameProfileService::new(&state.store, &state.snowflake);

    let results = join_all([
        service.allocate_profile(1, "wanted", None),
        service.allocate_profile(2, "wanted", None),
    ])
    .await;

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert_eq!(results.iter().filter(|result| is_name_taken(result)).count(), 1);
    assert_eq!(test.game_profile().count_profiles().await?, 1);
    assert_eq!(test.game_profile().count_ledger_entries().await?, 1);
    let used: i32 = [
        test.game_profile().quota(1).await?.map_or(0, |quota| quota.used),
        test.game_profile().quota(2).await?.map_or(0, |quota| quota.used),
    ]
    .iter()
    .sum();
    assert_eq!(used, 1);

    Ok(())
}
