//! Menu configuration for quickmenu: the YAML schema, node validation, and
//! the default template written on first run.

use std::path::{Path, PathBuf};

mod defaults;
mod error;
mod loader;
mod raw;
mod types;

#[cfg(test)]
mod test_parse;

pub use defaults::{DEFAULT_HOTKEY, DEFAULT_YAML};
pub use error::Error;
pub use loader::{ensure_config, load_from_path, load_from_str, load_hotkey};
pub use types::{ActionDescriptor, Config, MenuNode};

/// Determine the preferred user config path (`~/.quickmenu/menu.yaml`).
pub fn default_config_path() -> PathBuf {
    let mut p = dirs::home_dir().unwrap_or_default();
    p.push(".quickmenu");
    p.push("menu.yaml");
    p
}

/// Resolve the effective config path: an explicit override when provided,
/// otherwise the default location. A missing document is not an error here;
/// the loader bootstraps the template on first use.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => default_config_path(),
    }
}
