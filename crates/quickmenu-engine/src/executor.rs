//! Action execution: one effect per descriptor, failures absorbed.

use config::ActionDescriptor;
use tracing::{debug, warn};

use crate::deps::SystemOps;

/// Runs menu actions against a [`SystemOps`] backend.
///
/// [`Executor::execute`] never reports failure to its caller: a broken
/// action must not disturb the popup lifecycle that invoked it.
pub struct Executor<S> {
    /// System effects backend.
    sys: S,
}

impl<S: SystemOps> Executor<S> {
    /// Wrap a system-operations backend.
    pub fn new(sys: S) -> Self {
        Self { sys }
    }

    /// Perform the single effect described by `action`.
    pub fn execute(&mut self, action: &ActionDescriptor) {
        match action {
            ActionDescriptor::OpenUrl(url) => {
                if let Err(err) = self.sys.open_url(url) {
                    warn!(url = %url, error = %err, "failed to open url");
                }
            }
            ActionDescriptor::OpenPath(path) => {
                if let Err(err) = self.sys.open_path(path) {
                    warn!(path = %path, error = %err, "failed to open path");
                }
            }
            ActionDescriptor::Spawn { command, args } => self.spawn(command, args),
            ActionDescriptor::Exit => {
                debug!("exit action invoked");
                self.sys.exit(0);
            }
        }
    }

    /// Spawn with a single shell-mode retry when the direct launch fails
    /// (e.g. the command only resolves through shell search rules).
    fn spawn(&mut self, command: &str, args: &[String]) {
        let Err(err) = self.sys.spawn(command, args) else {
            return;
        };
        debug!(command = %command, error = %err, "direct spawn failed, retrying via shell");
        let line = if args.is_empty() {
            command.to_string()
        } else {
            format!("{} {}", command, args.join(" "))
        };
        if let Err(err) = self.sys.spawn_shell(&line) {
            warn!(line = %line, error = %err, "shell spawn failed");
        }
    }
}
