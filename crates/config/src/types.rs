//! Core menu tree types produced by validation.

use serde::{Deserialize, Serialize};

/// A fully loaded and validated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global hotkey that opens the menu, e.g. `ctrl+alt+space`.
    pub hotkey: String,
    /// Top-level menu entries, in document order.
    pub menu: Vec<MenuNode>,
}

/// One node of the menu tree. Exactly one variant applies per node; depth is
/// unbounded and handled by structural recursion throughout the workspace.
///
/// A tree is built fresh from the document on every popup cycle and dropped
/// together with the native menu materialized from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MenuNode {
    /// A horizontal separator line.
    Separator,
    /// A cascading submenu. An empty `children` list is legal and renders as
    /// an empty cascade.
    Submenu {
        /// Text shown on the cascade entry.
        label: String,
        /// Child nodes, in document order.
        children: Vec<MenuNode>,
    },
    /// A clickable entry bound to a single action.
    Action {
        /// Text shown on the entry.
        label: String,
        /// The effect invoked on selection.
        action: ActionDescriptor,
    },
}

impl MenuNode {
    /// Number of non-cascade entries in this node, recursively.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Separator | Self::Action { .. } => 1,
            Self::Submenu { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }
}

/// The effect performed when an action entry is invoked. Immutable and owned
/// by its [`MenuNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionDescriptor {
    /// Open a URL with the system's default handler.
    OpenUrl(String),
    /// Open a file or folder with the system's default handler.
    OpenPath(String),
    /// Launch a process with discrete arguments, no shell interpretation.
    Spawn {
        /// Executable or command name.
        command: String,
        /// Arguments passed as separate, unescaped tokens.
        args: Vec<String>,
    },
    /// Terminate the host process immediately, bypassing cleanup.
    Exit,
}
