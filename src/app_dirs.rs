use directories::ProjectDirs;
use std::path::PathBuf;

/// File used by `--log`. Platforms without a state directory (macOS,
/// Windows) fall back to the local data directory.
pub fn default_log_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "pomo")?;
    let base = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Some(base.join("pomo.log"))
}
