//! Event selection and choice resolution.
//!
//! Selection filters the content's events against the current state and
//! performs one weighted draw. Resolution validates a choice and surfaces its
//! consequences and challenge; applying them is left to the engine.
mod resolver;
mod selector;

pub use resolver::{ChoiceError, ChoiceResolution, challenge_definition, resolve_choice};
pub use selector::{pick_weighted, select_available_events};
