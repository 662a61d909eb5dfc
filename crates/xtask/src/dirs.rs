//! Platform-specific directory utilities

use std::path::PathBuf;

/// Save directory used when `--dir` is not given.
///
/// `SAGA_SAVE_DIR` overrides the platform default of the runtime's file
/// repository (e.g. `~/.local/share/saga/saves` on Linux).
pub fn save_dir() -> PathBuf {
    std::env::var_os("SAGA_SAVE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(saga_runtime::repository::default_save_dir)
}
