mod common;

use std::sync::Arc;
use std::time::Duration;

use saga_core::{ChallengeStatus, CombatCommand, ConflictOutcome, GameAction, StateChange};
use saga_runtime::{
    ChallengeEvent, CombatEvent, Event, FileStateRepository, GameStateEvent, InMemoryStateRepo,
    Runtime, RuntimeConfig, RuntimeError, ScriptedActionProvider, StateRepository, Topic,
};

use common::{Answer, SEED, Silent, Slow, pack};

fn travel(region: &str) -> GameAction {
    GameAction::Travel {
        region: region.into(),
    }
}

fn haggle() -> GameAction {
    GameAction::ChooseEventOption { choice: 0 }
}

#[tokio::test]
async fn scripted_provider_drives_campaign() {
    let mut runtime = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .provider(ScriptedActionProvider::new([
            travel("old_forest"),
            // climb_tree avoids the wolves
            GameAction::ChooseEventOption { choice: 1 },
            GameAction::Rest,
        ]))
        .build()
        .unwrap();

    assert_eq!(runtime.run().await.unwrap(), 3);

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.nonce, 3);
    assert_eq!(state.world.current_region, "old_forest");
    assert_eq!(state.player.balance, -2);
    assert_eq!(state.player.resources.get("provisions"), 4);
    assert_eq!(state.day(), 2);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn step_without_provider_fails() {
    let mut runtime = Runtime::builder().content(pack()).build().unwrap();
    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::ProviderNotSet)
    ));
}

#[tokio::test]
async fn build_requires_content() {
    assert!(matches!(
        Runtime::builder().build(),
        Err(RuntimeError::MissingContent)
    ));
}

#[tokio::test]
async fn same_seed_same_campaign() {
    let script = || {
        ScriptedActionProvider::new([
            GameAction::Explore,
            GameAction::ChooseEventOption { choice: 0 },
            GameAction::Wait { days: 4 },
        ])
    };

    let mut first = Runtime::builder()
        .content(pack())
        .seed(11)
        .provider(script())
        .build()
        .unwrap();
    let mut second = Runtime::builder()
        .content(pack())
        .seed(11)
        .provider(script())
        .build()
        .unwrap();

    first.run().await.unwrap();
    second.run().await.unwrap();

    assert_eq!(
        first.handle().query_state().await.unwrap(),
        second.handle().query_state().await.unwrap()
    );
}

#[tokio::test]
async fn async_resolver_answer_is_applied() {
    let runtime = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .async_resolver("parley", Answer(ConflictOutcome::Success))
        .build()
        .unwrap();
    let handle = runtime.handle();

    handle.execute_action(travel("river_ford")).await.unwrap();
    let parked = handle.execute_action(haggle()).await.unwrap();
    assert_eq!(parked.challenge, Some(ChallengeStatus::AwaitingResolver));

    // The resolver may already have answered; either way the state is settled.
    if let Some(outcome) = handle.settle_challenge().await.unwrap() {
        assert_eq!(
            outcome.challenge,
            Some(ChallengeStatus::Resolved(ConflictOutcome::Success))
        );
        assert!(matches!(
            outcome.delta.action,
            GameAction::ResolveChallenge(ConflictOutcome::Success)
        ));
    }

    let state = handle.query_state().await.unwrap();
    assert!(state.events.active_challenge.is_none());
    assert_eq!(state.player.resources.get("silver"), 7);
    assert_eq!(state.nonce, 3);
}

#[tokio::test]
async fn cancelled_resolver_closes_challenge_without_consequences() {
    let runtime = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .async_resolver("parley", Silent)
        .build()
        .unwrap();
    let handle = runtime.handle();
    let mut challenges = handle.subscribe(Topic::Challenge);

    handle.execute_action(travel("river_ford")).await.unwrap();
    handle.execute_action(haggle()).await.unwrap();

    let outcome = handle.cancel_challenge().await.unwrap().unwrap();
    assert_eq!(outcome.challenge, Some(ChallengeStatus::Cancelled));
    assert_eq!(outcome.delta.changes, vec![StateChange::ChallengeClosed]);

    let state = handle.query_state().await.unwrap();
    assert!(state.events.active_challenge.is_none());
    assert_eq!(state.player.resources.get("silver"), 5);

    assert!(matches!(
        challenges.recv().await.unwrap(),
        Event::Challenge(ChallengeEvent::Dispatched { .. })
    ));
    assert!(matches!(
        challenges.recv().await.unwrap(),
        Event::Challenge(ChallengeEvent::Cancelled { .. })
    ));

    assert!(handle.cancel_challenge().await.unwrap().is_none());
}

#[tokio::test]
async fn slow_resolver_times_out() {
    let config = RuntimeConfig {
        seed: Some(SEED),
        resolver_timeout: Some(Duration::from_millis(200)),
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config)
        .content(pack())
        .async_resolver(
            "parley",
            Slow(Duration::from_secs(30), ConflictOutcome::Success),
        )
        .build()
        .unwrap();
    let handle = runtime.handle();
    let mut challenges = handle.subscribe(Topic::Challenge);

    handle.execute_action(travel("river_ford")).await.unwrap();
    handle.execute_action(haggle()).await.unwrap();

    // Answered by the timeout unless it already fired.
    if let Some(outcome) = handle.settle_challenge().await.unwrap() {
        assert_eq!(outcome.challenge, Some(ChallengeStatus::Cancelled));
    }
    assert_eq!(
        handle
            .query_state()
            .await
            .unwrap()
            .player
            .resources
            .get("silver"),
        5
    );

    challenges.recv().await.unwrap();
    assert!(matches!(
        challenges.recv().await.unwrap(),
        Event::Challenge(ChallengeEvent::TimedOut { .. })
    ));
}

#[tokio::test]
async fn manual_resolution_supersedes_running_resolver() {
    let runtime = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .async_resolver("parley", Silent)
        .build()
        .unwrap();
    let handle = runtime.handle();

    handle.execute_action(travel("river_ford")).await.unwrap();
    handle.execute_action(haggle()).await.unwrap();

    let outcome = handle
        .execute_action(GameAction::ResolveChallenge(ConflictOutcome::Failure))
        .await
        .unwrap();
    assert_eq!(
        outcome.challenge,
        Some(ChallengeStatus::Resolved(ConflictOutcome::Failure))
    );
    assert!(handle.settle_challenge().await.unwrap().is_none());
    assert_eq!(
        handle
            .query_state()
            .await
            .unwrap()
            .player
            .resources
            .get("silver"),
        4
    );
}

#[tokio::test]
async fn parked_challenge_without_resolver_waits() {
    let runtime = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .build()
        .unwrap();
    let handle = runtime.handle();

    handle.execute_action(travel("river_ford")).await.unwrap();
    handle.execute_action(haggle()).await.unwrap();

    assert!(handle.settle_challenge().await.unwrap().is_none());
    let error = handle.execute_action(GameAction::Rest).await.unwrap_err();
    assert!(error.is_rejection());
}

#[tokio::test]
async fn events_follow_the_action_stream() {
    let runtime = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .build()
        .unwrap();
    let handle = runtime.handle();
    let mut game = handle.subscribe(Topic::GameState);
    let mut combat = handle.subscribe(Topic::Combat);

    handle.execute_action(travel("old_forest")).await.unwrap();
    assert!(handle.execute_action(GameAction::Rest).await.is_err());
    let outcome = handle.execute_action(haggle()).await.unwrap();
    assert_eq!(outcome.challenge, Some(ChallengeStatus::CombatStarted));

    match game.recv().await.unwrap() {
        Event::GameState(GameStateEvent::ActionExecuted { outcome }) => {
            assert_eq!(outcome.nonce, 1)
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match game.recv().await.unwrap() {
        Event::GameState(GameStateEvent::ActionFailed { code, rejected, .. }) => {
            assert_eq!(code, "ACTION_BUSY");
            assert!(rejected);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match combat.recv().await.unwrap() {
        Event::Combat(CombatEvent::Started { enemy }) => assert_eq!(enemy, "grey_wolf"),
        other => panic!("unexpected event: {other:?}"),
    }

    handle
        .execute_action(GameAction::Combat(CombatCommand::Strike { card: None }))
        .await
        .unwrap();
    assert!(matches!(
        combat.recv().await.unwrap(),
        Event::Combat(CombatEvent::RoundPlayed(_))
    ));
}

#[tokio::test]
async fn file_repository_persists_every_action() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig {
        seed: Some(SEED),
        save_dir: Some(dir.path().join("saves")),
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config)
        .content(pack())
        .build()
        .unwrap();
    let handle = runtime.handle();

    handle.execute_action(travel("river_ford")).await.unwrap();
    let state = handle.query_state().await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let repo = FileStateRepository::new(dir.path().join("saves")).unwrap();
    assert_eq!(repo.list_nonces().unwrap(), vec![0, 1]);
    let latest = repo.load_latest().unwrap().unwrap();
    assert_eq!(latest.state, state);
    assert!(latest.combat.is_none());
    assert_eq!(repo.load(0).unwrap().unwrap().state.nonce, 0);

    assert_eq!(repo.delete_range(0, 0).unwrap(), 1);
    assert_eq!(repo.list_nonces().unwrap(), vec![1]);
}

#[tokio::test]
async fn resumed_combat_matches_uninterrupted_run() {
    let repo = Arc::new(InMemoryStateRepo::new());
    let original = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .shared_repository(repo.clone())
        .build()
        .unwrap();
    let handle = original.handle();

    handle.execute_action(travel("old_forest")).await.unwrap();
    handle.execute_action(haggle()).await.unwrap();

    let save = repo.load_latest().unwrap().unwrap();
    assert_eq!(save, handle.save_game().await.unwrap());
    assert!(save.combat.is_some());

    let strike = GameAction::Combat(CombatCommand::Strike { card: None });
    let expected = handle.execute_action(strike.clone()).await.unwrap();

    let resumed = Runtime::builder().content(pack()).resume(save).build().unwrap();
    let resumed_handle = resumed.handle();
    assert_eq!(resumed_handle.query_state().await.unwrap().nonce, 2);
    let replayed = resumed_handle.execute_action(strike).await.unwrap();

    assert_eq!(replayed, expected);
    assert_eq!(
        resumed_handle.query_combat().await.unwrap(),
        handle.query_combat().await.unwrap()
    );
}

#[tokio::test]
async fn resumed_parked_challenge_is_dispatched() {
    let parked = Runtime::builder()
        .content(pack())
        .seed(SEED)
        .build()
        .unwrap();
    let handle = parked.handle();
    handle.execute_action(travel("river_ford")).await.unwrap();
    handle.execute_action(haggle()).await.unwrap();
    let save = handle.save_game().await.unwrap();

    let resumed = Runtime::builder()
        .content(pack())
        .resume(save)
        .async_resolver(
            "parley",
            Slow(Duration::from_millis(10), ConflictOutcome::Failure),
        )
        .build()
        .unwrap();
    let handle = resumed.handle();

    // The worker dispatches the parked challenge as soon as it starts.
    if let Some(outcome) = handle.settle_challenge().await.unwrap() {
        assert_eq!(
            outcome.challenge,
            Some(ChallengeStatus::Resolved(ConflictOutcome::Failure))
        );
    }
    assert!(
        handle
            .query_state()
            .await
            .unwrap()
            .events
            .active_challenge
            .is_none()
    );
    assert_eq!(
        handle
            .query_state()
            .await
            .unwrap()
            .player
            .resources
            .get("silver"),
        4
    );
}
