//! Real collaborators: system launch paths, error dialogs, and the on-disk
//! config source.

use std::{io, path::PathBuf, process::Command};

use quickmenu_engine::{ConfigSource, Notifier, SystemOps};
use tracing::{debug, error};

/// Launch paths backed by the host OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl SystemOps for RealSystem {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        open::that(url)
    }

    fn open_path(&mut self, path: &str) -> io::Result<()> {
        open::that(path)
    }

    fn spawn(&mut self, command: &str, args: &[String]) -> io::Result<()> {
        Command::new(command).args(args).spawn().map(|_| ())
    }

    fn spawn_shell(&mut self, line: &str) -> io::Result<()> {
        #[cfg(target_os = "windows")]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        };
        #[cfg(not(target_os = "windows"))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        };
        cmd.spawn().map(|_| ())
    }

    fn exit(&mut self, code: i32) {
        // Immediate termination; skipping the rest of the popup cycle is the
        // documented semantic of the exit action.
        std::process::exit(code);
    }
}

/// Error dialogs for configuration problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn show_error(&mut self, title: &str, text: &str) {
        error!(title = %title, text = %text, "configuration error");
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(text)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Loads the menu document from disk at the start of every popup cycle.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    /// Resolved document path.
    path: PathBuf,
}

impl FileConfigSource {
    /// Track the resolved document path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&mut self) -> Result<config::Config, config::Error> {
        debug!(path = %self.path.display(), "loading menu document");
        config::load_from_path(&self.path)
    }
}
