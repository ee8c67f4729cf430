//! Raw YAML document shapes and their validation into [`MenuNode`] trees.
//!
//! Validation is depth-first and left-to-right and stops at the first
//! violation. Errors carry a human-readable trail such as
//! `menu[3] > Tools[2]` naming the offending node's ancestor chain.

use serde::Deserialize;

use crate::{ActionDescriptor, Config, Error, MenuNode, defaults};

/// The whole document as parsed from YAML, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawDocument {
    /// Optional `settings` section.
    #[serde(default)]
    pub(crate) settings: RawSettings,
    /// Top-level menu entries.
    #[serde(default)]
    pub(crate) menu: Vec<RawNode>,
}

/// The `settings` section of the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawSettings {
    /// Global hotkey spec, e.g. `ctrl+alt+space`.
    #[serde(default)]
    pub(crate) hotkey: Option<String>,
}

/// One YAML menu entry before validation. All keys are optional at parse
/// time; [`RawNode::resolve`] decides which form the node takes. Unknown
/// keys (for example the optional per-item styling hints from the template)
/// are tolerated and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawNode {
    /// `separator: true` marks a separator line.
    #[serde(default)]
    separator: bool,
    /// Entry text; defaults to the empty string.
    #[serde(default)]
    label: Option<String>,
    /// Child entries; presence makes this node a submenu.
    #[serde(default)]
    items: Option<Vec<RawNode>>,
    /// URL opened with the default browser.
    #[serde(default)]
    open: Option<String>,
    /// File or folder opened with the default handler.
    #[serde(default)]
    path: Option<String>,
    /// Command launched as a process.
    #[serde(default)]
    cmd: Option<String>,
    /// Arguments for `cmd`; a scalar or a sequence of scalars.
    #[serde(default)]
    args: Option<serde_yaml::Value>,
    /// Named action; currently only `exit`.
    #[serde(default)]
    action: Option<String>,
}

impl RawNode {
    /// Validate this node and convert it to a typed [`MenuNode`].
    ///
    /// When a node carries more than one action key, resolution order is
    /// `open` > `path` > `cmd` > `action`; extras are ignored rather than
    /// rejected.
    pub(crate) fn resolve(&self, trail: &str) -> Result<MenuNode, Error> {
        if self.separator {
            return Ok(MenuNode::Separator);
        }

        let label = self.label.clone().unwrap_or_default();

        if let Some(items) = &self.items {
            let mut children = Vec::with_capacity(items.len());
            for (i, child) in items.iter().enumerate() {
                let child_trail = format!(
                    "{} > {}[{}]",
                    trail,
                    self.label.as_deref().unwrap_or("?"),
                    i + 1
                );
                children.push(child.resolve(&child_trail)?);
            }
            return Ok(MenuNode::Submenu { label, children });
        }

        if let Some(url) = &self.open {
            return Ok(MenuNode::Action {
                label,
                action: ActionDescriptor::OpenUrl(url.clone()),
            });
        }
        if let Some(path) = &self.path {
            return Ok(MenuNode::Action {
                label,
                action: ActionDescriptor::OpenPath(path.clone()),
            });
        }
        if let Some(cmd) = &self.cmd {
            let args = resolve_args(self.args.as_ref(), &self.describe(trail))?;
            return Ok(MenuNode::Action {
                label,
                action: ActionDescriptor::Spawn {
                    command: cmd.clone(),
                    args,
                },
            });
        }
        if let Some(action) = &self.action {
            return match action.as_str() {
                "exit" => Ok(MenuNode::Action {
                    label,
                    action: ActionDescriptor::Exit,
                }),
                other => Err(Error::Validation {
                    trail: self.describe(trail),
                    message: format!("unknown action \"{}\" (expected \"exit\")", other),
                }),
            };
        }

        Err(Error::Validation {
            trail: self.describe(trail),
            message: "Each item must have \"items\" OR one action (open/path/cmd/action) \
                      OR \"separator: true\""
                .to_string(),
        })
    }

    /// Extend `trail` with this node's own label so error messages name the
    /// offending entry, not just its position.
    fn describe(&self, trail: &str) -> String {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => format!("{} > {}", trail, label),
            _ => trail.to_string(),
        }
    }
}

/// Validate a whole raw document and produce the typed configuration. The
/// hotkey falls back to [`defaults::DEFAULT_HOTKEY`] when absent or empty.
pub(crate) fn resolve_document(doc: &RawDocument) -> Result<Config, Error> {
    let mut menu = Vec::with_capacity(doc.menu.len());
    for (i, node) in doc.menu.iter().enumerate() {
        menu.push(node.resolve(&format!("menu[{}]", i + 1))?);
    }
    Ok(Config {
        hotkey: effective_hotkey(&doc.settings),
        menu,
    })
}

/// The configured hotkey, or the default when absent or empty.
pub(crate) fn effective_hotkey(settings: &RawSettings) -> String {
    settings
        .hotkey
        .as_deref()
        .filter(|spec| !spec.is_empty())
        .unwrap_or(defaults::DEFAULT_HOTKEY)
        .to_string()
}

/// Coerce the `args` value into a list of strings. A scalar is promoted to a
/// one-element list; sequences must contain only scalars.
fn resolve_args(args: Option<&serde_yaml::Value>, trail: &str) -> Result<Vec<String>, Error> {
    let Some(value) = args else {
        return Ok(Vec::new());
    };
    match value {
        serde_yaml::Value::Sequence(seq) => {
            seq.iter().map(|v| scalar_to_string(v, trail)).collect()
        }
        other => Ok(vec![scalar_to_string(other, trail)?]),
    }
}

/// Render one scalar `args` entry as a string.
fn scalar_to_string(value: &serde_yaml::Value, trail: &str) -> Result<String, Error> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::Validation {
            trail: trail.to_string(),
            message: "\"args\" entries must be scalars".to_string(),
        }),
    }
}
