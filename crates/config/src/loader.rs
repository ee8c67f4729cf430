//! Load, bootstrap, and parse the user's menu document.

use std::{fs, io, path::Path};

use tracing::info;

use crate::{
    Config, Error,
    defaults::DEFAULT_YAML,
    raw::{self, RawDocument},
};

/// Write the default template if the document does not exist yet. An
/// existing document is never touched, so user edits are preserved.
pub fn ensure_config(path: &Path) -> Result<(), Error> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| read_error(path, &e))?;
    }
    fs::write(path, DEFAULT_YAML).map_err(|e| read_error(path, &e))?;
    info!(path = %path.display(), "wrote default menu template");
    Ok(())
}

/// Load a validated configuration, bootstrapping the template on first run.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    ensure_config(path)?;
    let text = fs::read_to_string(path).map_err(|e| read_error(path, &e))?;
    load_from_str(&text, Some(path))
}

/// Parse and validate a configuration from YAML text. An empty document is
/// legal and yields an empty menu with the default hotkey.
pub fn load_from_str(text: &str, path: Option<&Path>) -> Result<Config, Error> {
    raw::resolve_document(&parse_document(text, path)?)
}

/// Read only the hotkey, tolerating an invalid menu tree. The tree is
/// validated per popup cycle; startup needs just the binding.
pub fn load_hotkey(path: &Path) -> Result<String, Error> {
    ensure_config(path)?;
    let text = fs::read_to_string(path).map_err(|e| read_error(path, &e))?;
    let doc = parse_document(&text, Some(path))?;
    Ok(raw::effective_hotkey(&doc.settings))
}

/// Parse the raw YAML shape without validating the tree.
fn parse_document(text: &str, path: Option<&Path>) -> Result<RawDocument, Error> {
    if text.trim().is_empty() {
        return Ok(RawDocument::default());
    }
    serde_yaml::from_str(text).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })
}

/// Wrap an I/O failure with the document path.
fn read_error(path: &Path, err: &io::Error) -> Error {
    Error::Read {
        path: Some(path.to_path_buf()),
        message: err.to_string(),
    }
}
