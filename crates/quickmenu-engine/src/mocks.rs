//! Mock collaborators for exercising the coordinator without a platform.
//!
//! These are public so the integration test suite can drive the full state
//! machine; they are lightweight and not intended for production use. Every
//! mock appends to a shared [`EventLog`], so tests can assert the global
//! ordering of lifecycle steps across collaborators.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use config::{ActionDescriptor, Config, MenuNode};
use parking_lot::Mutex;

use crate::{
    Error, Result,
    coordinator::CycleFlag,
    deps::{ConfigSource, Notifier, Point, PopupShell, SystemOps},
};

/// Shared, ordered record of everything the mocks observed.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    /// Append one event.
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().push(event.into());
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Number of events equal to `event`.
    pub fn count(&self, event: &str) -> usize {
        self.0.lock().iter().filter(|e| *e == event).count()
    }

    /// Number of events starting with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.0
            .lock()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    /// Position of the first event equal to `event`.
    pub fn position(&self, event: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e == event)
    }

    /// Position of the first event starting with `prefix`.
    pub fn position_prefix(&self, prefix: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e.starts_with(prefix))
    }
}

/// Force the cycle flag active or idle. Test support for re-entrancy cases
/// that simulate a signal arriving while a cycle is in flight.
pub fn set_flag_active(flag: &CycleFlag, active: bool) {
    if active {
        flag.begin();
    } else {
        flag.end();
    }
}

/// One of the three dismissal trigger paths.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Pointer-button press on the capture surface.
    Pointer,
    /// Escape while the capture surface has focus.
    Key,
    /// The temporary global Escape hook.
    EscapeHook,
}

/// How a scripted modal call ends.
#[derive(Debug, Clone)]
pub enum Dismissal {
    /// An entry was selected; its descriptor becomes the cycle's selection.
    Select(ActionDescriptor),
    /// The menu was dismissed without a selection. Each listed trigger
    /// fires one unpost request before the modal call returns.
    Dismissed(Vec<Trigger>),
    /// The modal call panics, modeling a handler blowing up mid-post.
    Panic,
}

/// Structural mirror of one built native menu entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MockEntry {
    /// Separator line.
    Separator,
    /// Clickable entry with its own by-value descriptor capture.
    Command {
        /// Entry text.
        label: String,
        /// The captured action.
        action: ActionDescriptor,
    },
    /// Nested cascade.
    Cascade {
        /// Cascade text.
        label: String,
        /// Child entries.
        entries: Vec<MockEntry>,
    },
}

/// A "native" menu as recorded by [`MockShell::build_menu`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MockMenu {
    /// Top-level entries in build order.
    pub entries: Vec<MockEntry>,
}

impl MockMenu {
    /// Number of non-cascade entries, recursively.
    pub fn leaf_count(&self) -> usize {
        fn leaves(entries: &[MockEntry]) -> usize {
            entries
                .iter()
                .map(|e| match e {
                    MockEntry::Separator | MockEntry::Command { .. } => 1,
                    MockEntry::Cascade { entries, .. } => leaves(entries),
                })
                .sum()
        }
        leaves(&self.entries)
    }

    /// Maximum nesting depth; a menu without cascades has depth 1.
    pub fn depth(&self) -> usize {
        fn depth(entries: &[MockEntry]) -> usize {
            1 + entries
                .iter()
                .filter_map(|e| match e {
                    MockEntry::Cascade { entries, .. } => Some(depth(entries)),
                    _ => None,
                })
                .max()
                .unwrap_or(0)
        }
        depth(&self.entries)
    }
}

/// Mirror the builder recursion over the validated tree.
fn build_entries(nodes: &[MenuNode]) -> Vec<MockEntry> {
    nodes
        .iter()
        .map(|node| match node {
            MenuNode::Separator => MockEntry::Separator,
            MenuNode::Submenu { label, children } => MockEntry::Cascade {
                label: label.clone(),
                entries: build_entries(children),
            },
            MenuNode::Action { label, action } => MockEntry::Command {
                label: label.clone(),
                action: action.clone(),
            },
        })
        .collect()
}

/// Cloneable teardown counters shared with a [`MockShell`].
#[derive(Debug, Clone, Default)]
pub struct ShellCounters {
    /// Calls to `destroy_surface`.
    pub surfaces_destroyed: Arc<AtomicUsize>,
    /// Calls to `remove_escape_hook`.
    pub hooks_removed: Arc<AtomicUsize>,
    /// Calls to `request_unpost`.
    pub unposts: Arc<AtomicUsize>,
}

impl ShellCounters {
    /// Surfaces destroyed so far.
    pub fn surfaces(&self) -> usize {
        self.surfaces_destroyed.load(Ordering::SeqCst)
    }

    /// Hooks removed so far.
    pub fn hooks(&self) -> usize {
        self.hooks_removed.load(Ordering::SeqCst)
    }

    /// Unpost requests so far.
    pub fn unposts(&self) -> usize {
        self.unposts.load(Ordering::SeqCst)
    }
}

/// Marker for a mock capture surface.
#[derive(Debug)]
pub struct MockSurface;

/// Marker for a mock Escape hook registration.
#[derive(Debug)]
pub struct MockHook;

/// Scripted [`PopupShell`] recording every lifecycle step.
pub struct MockShell {
    /// Shared event log.
    log: EventLog,
    /// Per-cycle modal outcomes, consumed front to back.
    script: Vec<Dismissal>,
    /// Selection recorded by the last modal call.
    selection: Option<ActionDescriptor>,
    /// Scripted pointer position.
    pointer: Option<Point>,
    /// Cycle flag observed during the modal call, when attached.
    flag: Option<CycleFlag>,
    /// Structures recorded by `build_menu`.
    built: Arc<Mutex<Vec<MockMenu>>>,
    /// Shared teardown counters.
    counters: ShellCounters,
    /// Fail `install_escape_hook` when set.
    pub fail_install_hook: bool,
    /// Fail `remove_escape_hook` (after counting) when set.
    pub fail_remove_hook: bool,
    /// Fail `destroy_surface` (after counting) when set.
    pub fail_destroy_surface: bool,
}

impl MockShell {
    /// Create a shell that records into `log`.
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            script: Vec::new(),
            selection: None,
            pointer: None,
            flag: None,
            built: Arc::default(),
            counters: ShellCounters::default(),
            fail_install_hook: false,
            fail_remove_hook: false,
            fail_destroy_surface: false,
        }
    }

    /// Queue modal outcomes, one per upcoming cycle.
    pub fn with_script(mut self, script: Vec<Dismissal>) -> Self {
        self.script = script;
        self
    }

    /// Scripted pointer position (`None` forces the center fallback).
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Observe `flag` during modal calls, recording whether it is active.
    pub fn attach_flag(&mut self, flag: CycleFlag) {
        self.flag = Some(flag);
    }

    /// Clone the shared teardown counters.
    pub fn counters(&self) -> ShellCounters {
        self.counters.clone()
    }

    /// Handle onto the structures recorded by `build_menu`.
    pub fn built_menus(&self) -> Arc<Mutex<Vec<MockMenu>>> {
        self.built.clone()
    }

    /// Fire one scripted dismissal trigger.
    fn fire(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Pointer => self.log.push("trigger:pointer"),
            Trigger::Key => self.log.push("trigger:escape"),
            Trigger::EscapeHook => self.log.push("trigger:escape-hook"),
        }
        self.request_unpost();
    }
}

impl PopupShell for MockShell {
    type Menu = MockMenu;
    type Surface = MockSurface;
    type EscapeHook = MockHook;

    fn build_menu(&mut self, nodes: &[MenuNode]) -> Result<MockMenu> {
        let menu = MockMenu {
            entries: build_entries(nodes),
        };
        self.built.lock().push(menu.clone());
        self.log.push("menu:built");
        Ok(menu)
    }

    fn create_surface(&mut self) -> Result<MockSurface> {
        self.log.push("surface:created");
        Ok(MockSurface)
    }

    fn install_escape_hook(&mut self) -> Result<MockHook> {
        if self.fail_install_hook {
            self.log.push("hook:install-failed");
            return Err(Error::Shell("escape hook unavailable".into()));
        }
        self.log.push("hook:installed");
        Ok(MockHook)
    }

    fn pointer_position(&mut self) -> Option<Point> {
        self.pointer
    }

    fn screen_center(&mut self) -> Point {
        Point { x: 960.0, y: 540.0 }
    }

    fn run_modal(&mut self, _menu: &MockMenu, _surface: &MockSurface, at: Point) -> Result<()> {
        self.log.push(format!("modal:posted@{},{}", at.x, at.y));
        if let Some(flag) = self.flag.clone() {
            self.log.push(if flag.is_active() {
                "modal:flag-active"
            } else {
                "modal:flag-idle"
            });
        }
        let outcome = if self.script.is_empty() {
            Dismissal::Dismissed(vec![Trigger::Pointer])
        } else {
            self.script.remove(0)
        };
        match outcome {
            Dismissal::Select(action) => {
                self.log.push("modal:selected");
                self.selection = Some(action);
            }
            Dismissal::Dismissed(triggers) => {
                for trigger in triggers {
                    self.fire(trigger);
                }
            }
            Dismissal::Panic => {
                self.log.push("modal:panicked");
                panic!("menu handler panicked mid-post");
            }
        }
        self.log.push("modal:returned");
        Ok(())
    }

    fn request_unpost(&mut self) {
        self.counters.unposts.fetch_add(1, Ordering::SeqCst);
        self.log.push("unpost:requested");
    }

    fn take_selection(&mut self, _menu: &MockMenu) -> Option<ActionDescriptor> {
        self.selection.take()
    }

    fn remove_escape_hook(&mut self, _hook: MockHook) -> Result<()> {
        self.counters.hooks_removed.fetch_add(1, Ordering::SeqCst);
        self.log.push("hook:removed");
        if self.fail_remove_hook {
            return Err(Error::Shell("unregister failed".into()));
        }
        Ok(())
    }

    fn destroy_surface(&mut self, _surface: MockSurface) -> Result<()> {
        self.counters
            .surfaces_destroyed
            .fetch_add(1, Ordering::SeqCst);
        self.log.push("surface:destroyed");
        if self.fail_destroy_surface {
            return Err(Error::Shell("destroy failed".into()));
        }
        Ok(())
    }
}

/// Recording [`Notifier`].
pub struct MockNotifier {
    /// Shared event log.
    log: EventLog,
    /// Recorded `(title, text)` pairs.
    messages: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    /// Create a notifier that records into `log`.
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            messages: Arc::default(),
        }
    }

    /// Handle onto the recorded messages.
    pub fn messages(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.messages.clone()
    }
}

impl Notifier for MockNotifier {
    fn show_error(&mut self, title: &str, text: &str) {
        self.log.push("notify:error");
        self.messages
            .lock()
            .push((title.to_string(), text.to_string()));
    }
}

/// Recording [`SystemOps`] with switchable failures.
pub struct MockSystemOps {
    /// Shared event log.
    log: EventLog,
    /// Fail `open_url` / `open_path` when set.
    pub fail_open: bool,
    /// Fail `spawn` when set (drives the shell retry path).
    pub fail_spawn: bool,
    /// Fail `spawn_shell` too when set.
    pub fail_shell: bool,
}

impl MockSystemOps {
    /// Create a backend that records into `log`.
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail_open: false,
            fail_spawn: false,
            fail_shell: false,
        }
    }

    /// A generic injected failure.
    fn failure() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "injected failure")
    }
}

impl SystemOps for MockSystemOps {
    fn open_url(&mut self, url: &str) -> std::io::Result<()> {
        self.log.push(format!("exec:open_url:{}", url));
        if self.fail_open {
            return Err(Self::failure());
        }
        Ok(())
    }

    fn open_path(&mut self, path: &str) -> std::io::Result<()> {
        self.log.push(format!("exec:open_path:{}", path));
        if self.fail_open {
            return Err(Self::failure());
        }
        Ok(())
    }

    fn spawn(&mut self, command: &str, args: &[String]) -> std::io::Result<()> {
        let mut line = command.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.log.push(format!("exec:spawn:{}", line));
        if self.fail_spawn {
            return Err(Self::failure());
        }
        Ok(())
    }

    fn spawn_shell(&mut self, line: &str) -> std::io::Result<()> {
        self.log.push(format!("exec:shell:{}", line));
        if self.fail_shell {
            return Err(Self::failure());
        }
        Ok(())
    }

    fn exit(&mut self, code: i32) {
        // Recorded, not performed: tests must survive the exit action.
        self.log.push(format!("exec:exit:{}", code));
    }
}

/// Scripted [`ConfigSource`] counting loads.
pub struct MockConfigSource {
    /// Shared event log.
    log: EventLog,
    /// Response handed out on every load.
    response: std::result::Result<Config, config::Error>,
    /// Number of `load` calls.
    loads: Arc<AtomicUsize>,
}

impl MockConfigSource {
    /// Always yield `response`.
    pub fn new(log: &EventLog, response: std::result::Result<Config, config::Error>) -> Self {
        Self {
            log: log.clone(),
            response,
            loads: Arc::default(),
        }
    }

    /// Handle onto the load counter.
    pub fn loads(&self) -> Arc<AtomicUsize> {
        self.loads.clone()
    }
}

impl ConfigSource for MockConfigSource {
    fn load(&mut self) -> std::result::Result<Config, config::Error> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.log.push("config:loaded");
        self.response.clone()
    }
}
