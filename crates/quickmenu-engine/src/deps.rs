//! Collaborator traits the coordinator drives.
//!
//! The coordinator never touches a window, menu, process, or file directly;
//! it goes through these traits. The real implementations live in the
//! `quickmenu` binary, mocks in [`crate::mocks`]. Every method is invoked on
//! the UI-owning thread only.

use std::io;

use config::{ActionDescriptor, Config, MenuNode};

use crate::Result;

/// A point in virtual-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position in physical pixels.
    pub x: f64,
    /// Vertical position in physical pixels.
    pub y: f64,
}

/// Platform surface for one popup cycle: menu construction, the capture
/// surface, the temporary Escape hook, and the modal popup call.
pub trait PopupShell {
    /// Native cascading menu handle. Dropping it destroys the menu.
    type Menu;
    /// Handle to the transparent full-screen capture surface.
    type Surface;
    /// Registration token for the temporary global Escape hook.
    type EscapeHook;

    /// Materialize a native menu from a validated tree. Action entries must
    /// capture their own descriptor by value so every entry resolves
    /// independently of its siblings.
    fn build_menu(&mut self, nodes: &[MenuNode]) -> Result<Self::Menu>;

    /// Create, raise, and focus the capture surface covering the virtual
    /// screen.
    fn create_surface(&mut self) -> Result<Self::Surface>;

    /// Register a temporary global Escape binding through the same
    /// background subsystem that detects the primary hotkey.
    fn install_escape_hook(&mut self) -> Result<Self::EscapeHook>;

    /// Current pointer position, if the platform can report one.
    fn pointer_position(&mut self) -> Option<Point>;

    /// Center of the virtual screen; the anchor fallback when the pointer
    /// position is unreadable.
    fn screen_center(&mut self) -> Point;

    /// Post the menu at `at` and block until it is dismissed by any path:
    /// selection, an unpost request, or platform-level dismissal.
    fn run_modal(&mut self, menu: &Self::Menu, surface: &Self::Surface, at: Point) -> Result<()>;

    /// Ask a posted menu to close. Idempotent, and must not touch surface or
    /// hook state: the modal call still owns those until it returns.
    fn request_unpost(&mut self);

    /// The action selected during the last modal call, if any.
    fn take_selection(&mut self, menu: &Self::Menu) -> Option<ActionDescriptor>;

    /// Remove the temporary Escape hook.
    fn remove_escape_hook(&mut self, hook: Self::EscapeHook) -> Result<()>;

    /// Destroy the capture surface.
    fn destroy_surface(&mut self, surface: Self::Surface) -> Result<()>;
}

/// Source of the menu document, consulted fresh at the start of every cycle
/// so edits are picked up without a restart.
pub trait ConfigSource {
    /// Load and validate the current configuration.
    fn load(&mut self) -> std::result::Result<Config, config::Error>;
}

/// Surfaces validation failures to the user.
pub trait Notifier {
    /// Show an error notification with a title and message body.
    fn show_error(&mut self, title: &str, text: &str);
}

/// Process and OS effects used by the action executor.
pub trait SystemOps {
    /// Open a URL with the system's default handler.
    fn open_url(&mut self, url: &str) -> io::Result<()>;

    /// Open a file or folder with the system's default handler.
    fn open_path(&mut self, path: &str) -> io::Result<()>;

    /// Launch a command with discrete arguments; no shell interpretation.
    fn spawn(&mut self, command: &str, args: &[String]) -> io::Result<()>;

    /// Launch a single command line through the shell.
    fn spawn_shell(&mut self, line: &str) -> io::Result<()>;

    /// Terminate the host process immediately. Never returns in production;
    /// mocks record the call instead.
    fn exit(&mut self, code: i32);
}
