//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker is the single writer of the game state; resolver
//! tasks spawned from it report back over its internal channel.

mod simulation;

pub use simulation::{Command, SimulationWorker, WorkerOptions};
