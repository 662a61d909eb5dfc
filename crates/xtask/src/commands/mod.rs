//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod read_state;
mod simulate;

pub use read_state::ReadState;
pub use simulate::Simulate;
