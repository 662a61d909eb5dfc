use std::path::PathBuf;

use saga_content::ContentFactory;
use saga_core::{ContentOracle, GameAction, GameEngine, GameEnv, GameRuntimeState};

fn pack_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/crossroads")
}

#[test]
fn bundled_pack_loads_and_validates() {
    let pack = ContentFactory::new(pack_dir()).load_pack().unwrap();
    let content = &pack.content;

    assert_eq!(content.campaign().id, "crossroads");
    assert_eq!(content.regions().len(), 4);
    assert_eq!(content.anchors().len(), 2);
    assert!(content.enemy("barrow_wight").is_some());
    assert_eq!(pack.config.combat.hand_size, 4);
    assert_eq!(pack.config.world.rest_heal, 4);
}

#[test]
fn bundled_factory_points_at_crossroads() {
    let factory = ContentFactory::bundled();
    assert_eq!(factory.data_dir(), pack_dir());
    assert!(factory.load_registry().is_ok());
}

#[test]
fn bundled_pack_opens_a_game() {
    let pack = ContentFactory::new(pack_dir()).load_pack().unwrap();
    let state = GameRuntimeState::new_game(7, &pack.content, &pack.config).unwrap();
    assert_eq!(state.world.current_region, "hamlet");
    assert_eq!(state.player.health(), 24);
    assert_eq!(state.player.cards.live_count(), 5);

    let mut engine = GameEngine::new(state, &pack.config);
    let env = GameEnv::new(&pack.content, &pack.config);
    let outcome = engine.perform_action(env, GameAction::Explore).unwrap();
    assert_eq!(outcome.nonce, 1);
    assert_eq!(engine.state().day(), 1);
}
