use crate::config::GameConfig;
use crate::env::PcgRng;
use crate::state::{GameRuntimeState, PlayerState, StateChange, WorldState};

/// Single mutation path for [`GameRuntimeState`] during an action.
///
/// Every change is applied as it is emitted and recorded in emission order.
/// Helpers skip no-op changes so the record only lists real movement.
pub struct StateReducer<'a> {
    state: &'a mut GameRuntimeState,
    changes: Vec<StateChange>,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameRuntimeState) -> Self {
        Self {
            state,
            changes: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameRuntimeState {
        self.state
    }

    pub fn emit(&mut self, change: StateChange) {
        change.apply(self.state);
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<StateChange> {
        self.changes
    }

    /// Runs `f` with the shared random stream and stores the advanced stream.
    ///
    /// The stream is not a recorded change: replaying the same actions
    /// reproduces it.
    pub fn with_rng<T>(&mut self, f: impl FnOnce(&GameRuntimeState, &mut PcgRng) -> T) -> T {
        let mut rng = self.state.rng;
        let value = f(self.state, &mut rng);
        self.state.rng = rng;
        value
    }

    pub fn set_resource(&mut self, resource: &str, value: i32) {
        let resources = &self.state.player.resources;
        let from = resources.get(resource);
        let to = resources.clamp(resource, value);
        if from != to {
            self.emit(StateChange::ResourceChanged {
                resource: resource.to_owned(),
                from,
                to,
            });
        }
    }

    /// Signed adjustment, clamped to `[0, cap]`.
    pub fn adjust_resource(&mut self, resource: &str, delta: i32) {
        let value = self.state.player.resources.get(resource).saturating_add(delta);
        self.set_resource(resource, value);
    }

    pub fn adjust_health(&mut self, delta: i32) {
        self.adjust_resource(GameConfig::HEALTH, delta);
    }

    pub fn set_flag(&mut self, flag: &str) {
        if !self.state.world.flags.contains(flag) {
            self.emit(StateChange::FlagSet {
                flag: flag.to_owned(),
            });
        }
    }

    pub fn set_player_flag(&mut self, flag: &str) {
        if !self.state.player.flags.contains(flag) {
            self.emit(StateChange::PlayerFlagSet {
                flag: flag.to_owned(),
            });
        }
    }

    pub fn clear_flag(&mut self, flag: &str) {
        if self.state.has_flag(flag) {
            self.emit(StateChange::FlagCleared {
                flag: flag.to_owned(),
            });
        }
    }

    pub fn adjust_resonance(&mut self, delta: i32) {
        let from = self.state.world.resonance;
        let to = WorldState::clamp_resonance(from.saturating_add(delta));
        if from != to {
            self.emit(StateChange::ResonanceChanged { from, to });
        }
    }

    pub fn adjust_balance(&mut self, delta: i32) {
        let from = self.state.player.balance;
        let to = PlayerState::clamp_balance(from.saturating_add(delta));
        if from != to {
            self.emit(StateChange::BalanceChanged { from, to });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameRuntimeState {
        GameRuntimeState {
            seed: 0,
            nonce: 0,
            rng: PcgRng::from_seed(0),
            world: Default::default(),
            player: Default::default(),
            events: Default::default(),
            quests: Default::default(),
            ending: None,
        }
    }

    #[test]
    fn emitted_changes_are_applied_in_order() {
        let mut state = state();
        let mut reducer = StateReducer::new(&mut state);
        reducer.adjust_resource("gold", 5);
        reducer.adjust_resource("gold", -2);
        assert_eq!(reducer.changes().len(), 2);
        assert_eq!(reducer.state().player.resources.get("gold"), 3);
    }

    #[test]
    fn no_op_changes_are_skipped() {
        let mut state = state();
        let mut reducer = StateReducer::new(&mut state);
        reducer.adjust_resource("gold", -4);
        reducer.clear_flag("missing");
        reducer.adjust_resonance(0);
        assert!(reducer.changes().is_empty());
    }

    #[test]
    fn axes_are_clamped() {
        let mut state = state();
        let mut reducer = StateReducer::new(&mut state);
        reducer.adjust_resonance(250);
        reducer.adjust_balance(-250);
        assert_eq!(
            reducer.into_changes(),
            vec![
                StateChange::ResonanceChanged { from: 0, to: 100 },
                StateChange::BalanceChanged { from: 0, to: -100 },
            ]
        );
    }
}
