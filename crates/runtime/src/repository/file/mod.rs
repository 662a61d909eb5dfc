//! File-based repository implementations.

mod state;

pub use state::{FileStateRepository, default_save_dir};
