//! Disposition combat.
//!
//! A combat is a sequence of rounds against one enemy. Each round the player
//! strikes (toward -100, neutralization), influences (toward +100,
//! subjugation) or sacrifices a card; then the enemy executes the intent its
//! pattern dictates for the round.
//!
//! Power is a pure function of hero stats, the played card, momentum and the
//! drawn fate card; see [`effective_power`]. All randomness comes from the
//! session's own stream, seeded once from the game's stream when the session
//! opens.

mod disposition;
mod enemy;
mod fate;
mod momentum;
mod power;
mod result;
mod session;

pub use disposition::Disposition;
pub use enemy::{EnemyMode, EnemyStatus, EnemyTurn, act as enemy_act};
pub use fate::{FateDeck, FateModifier, ResonanceZone};
pub use momentum::{CommandKind, Momentum, MomentumBonus, Track};
pub use power::{PowerBreakdown, effective_power};
pub use result::{CombatOutcome, CombatResult};
pub use session::{
    CombatCommand, CombatError, CombatSession, CombatSnapshot, HeroCombatState, RoundReport,
};
