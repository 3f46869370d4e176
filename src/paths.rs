//! Where webscript-gen looks for its files
//!
//! No I/O here, only locations.
//!
//! ```text
//! ./webscript-gen.toml                       # Project config (wins)
//! ~/.config/webscript-gen/config.toml        # User config
//! ```

use std::path::{Path, PathBuf};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "webscript-gen.toml";

/// Project config: `<dir>/webscript-gen.toml`
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(PROJECT_CONFIG_FILE)
}

/// User config: `~/.config/webscript-gen/config.toml` (platform config dir)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("webscript-gen").join("config.toml"))
}

/// Config files to try, most specific first
pub fn config_candidates(dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![project_config_path(dir)];
    candidates.extend(user_config_path());
    candidates
}
