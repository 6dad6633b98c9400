//! Location of the runtime data directory (config, images, sounds, locales).

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Overrides data root detection when set.
pub const DATA_DIR_ENV: &str = "SENTENCE_DATA_DIR";

/// Cached path to the directory containing the engine's runtime data files.
static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_data_root);

/// Construct a data path relative to the resolved data root.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

pub fn data_root() -> &'static Path {
    &DATA_ROOT
}

/// Resolve the most likely location of the runtime data directory.
fn detect_data_root() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let mut candidates = vec![PathBuf::from("sentence_engine/data"), PathBuf::from("data")];

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("sentence_engine/data"));
        candidates.push(dir.join("data"));
        if let Some(parent) = dir.parent() {
            candidates.push(parent.join("sentence_engine/data"));
            candidates.push(parent.join("data"));
        }
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from("sentence_engine/data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_paths_are_rooted() {
        assert!(data_path("config.toml").starts_with(data_root()));
    }
}
