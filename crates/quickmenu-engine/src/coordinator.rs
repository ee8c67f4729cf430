//! The popup lifecycle coordinator: the state machine that drives
//! open → post → await-dismissal → cleanup for every popup cycle.
//!
//! The coordinator is the single owner of the per-cycle transient state
//! (capture surface, native menu, temporary Escape hook) and the only
//! writer of it. Background threads never call in directly; their signals
//! are marshaled onto the UI-owning thread, which then calls
//! [`Coordinator::trigger`] or [`Coordinator::request_unpost`].

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use config::{ActionDescriptor, MenuNode};
use tracing::{debug, warn};

use crate::{
    Result,
    deps::{ConfigSource, Notifier, PopupShell, SystemOps},
    executor::Executor,
};

/// Lifecycle phase of the coordinator.
///
/// `Opening`, `Posted`, and `Closing` only exist within a single
/// [`Coordinator::trigger`] call; between calls the coordinator is `Idle`
/// and holds no transient resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No transient resources held.
    Idle,
    /// Loading configuration and acquiring cycle resources.
    Opening,
    /// Blocked in the native modal popup call.
    Posted,
    /// Releasing cycle resources.
    Closing,
}

/// Shared "a cycle is in flight" marker.
///
/// The background hotkey listener reads it to drop trigger signals while a
/// popup is already active; the coordinator (via the active cycle) is the
/// only writer.
#[derive(Debug, Clone, Default)]
pub struct CycleFlag(Arc<AtomicBool>);

impl CycleFlag {
    /// True while a popup cycle is active.
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Mark a cycle as started.
    pub(crate) fn begin(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Mark the cycle as finished.
    pub(crate) fn end(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns the per-cycle transient state and the collaborators that drive it.
///
/// All methods must be called on the UI-owning thread.
pub struct Coordinator<P, N, S, C> {
    /// Platform shell: windows, menus, hooks.
    shell: P,
    /// Error surface for configuration problems.
    notifier: N,
    /// Runs the selected action after the cycle closes.
    executor: Executor<S>,
    /// Menu document source, consulted fresh every cycle.
    source: C,
    /// Current lifecycle phase.
    phase: Phase,
    /// Listener-visible in-flight marker.
    flag: CycleFlag,
}

impl<P, N, S, C> Coordinator<P, N, S, C>
where
    P: PopupShell,
    N: Notifier,
    S: SystemOps,
    C: ConfigSource,
{
    /// Create an idle coordinator.
    pub fn new(shell: P, notifier: N, executor: Executor<S>, source: C) -> Self {
        Self {
            shell,
            notifier,
            executor,
            source,
            phase: Phase::Idle,
            flag: CycleFlag::default(),
        }
    }

    /// Clone the flag handed to background listener threads.
    pub fn cycle_flag(&self) -> CycleFlag {
        self.flag.clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mutable access to the platform shell, for wiring and tests.
    pub fn shell_mut(&mut self) -> &mut P {
        &mut self.shell
    }

    /// Begin a popup cycle in response to the global hotkey.
    ///
    /// A trigger while a cycle is already in flight is dropped: popups do
    /// not queue or stack.
    pub fn trigger(&mut self) {
        if self.phase != Phase::Idle || self.flag.is_active() {
            debug!(phase = ?self.phase, "hotkey trigger ignored, cycle already active");
            return;
        }
        self.phase = Phase::Opening;
        let outcome = self.run_cycle();
        self.phase = Phase::Idle;
        if let Err(err) = outcome {
            warn!(error = %err, "popup cycle failed");
        }
    }

    /// Ask a posted menu to close.
    ///
    /// Idempotent and callable on behalf of any of the three dismissal
    /// triggers. It only signals the native menu; resource teardown happens
    /// separately, after the modal call returns.
    pub fn request_unpost(&mut self) {
        self.shell.request_unpost();
    }

    /// One complete cycle: load, open, post, close, then dispatch the
    /// selection. Dismissal is always ordered before action effects.
    fn run_cycle(&mut self) -> Result<()> {
        let cfg = match self.source.load() {
            Ok(cfg) => cfg,
            Err(err) => {
                let text = err.pretty();
                warn!(error = %text, "menu configuration rejected");
                self.notifier.show_error("menu.yaml error", &text);
                return Ok(());
            }
        };

        let selected = {
            let mut cycle = ActiveCycle::open(&mut self.shell, &self.flag, &cfg.menu)?;
            self.phase = Phase::Posted;
            cycle.post()?;
            self.phase = Phase::Closing;
            cycle.selection()
            // The cycle guard drops here: Escape hook removed, surface
            // destroyed, menu dropped. Exactly once, on every exit path.
        };

        if let Some(action) = selected {
            self.executor.execute(&action);
        }
        Ok(())
    }
}

/// Transient state for one popup cycle.
///
/// Acquisition happens in [`ActiveCycle::open`]; release is bound to `Drop`
/// so it runs on every exit from the posting scope, including error returns
/// and panics out of the modal call. Teardown is best-effort: failures are
/// logged and never retried, so the return to idle cannot be blocked.
struct ActiveCycle<'a, P: PopupShell> {
    /// Borrowed platform shell.
    shell: &'a mut P,
    /// In-flight marker, cleared on drop.
    flag: &'a CycleFlag,
    /// Native menu for this cycle.
    menu: Option<P::Menu>,
    /// Capture surface for this cycle.
    surface: Option<P::Surface>,
    /// Temporary global Escape hook for this cycle.
    hook: Option<P::EscapeHook>,
}

impl<'a, P: PopupShell> ActiveCycle<'a, P> {
    /// Acquire all cycle resources: menu, capture surface, Escape hook.
    /// On failure the partially acquired set is released by `Drop`.
    fn open(shell: &'a mut P, flag: &'a CycleFlag, nodes: &[MenuNode]) -> Result<Self> {
        flag.begin();
        let mut cycle = Self {
            shell,
            flag,
            menu: None,
            surface: None,
            hook: None,
        };
        cycle.menu = Some(cycle.shell.build_menu(nodes)?);
        cycle.surface = Some(cycle.shell.create_surface()?);
        cycle.hook = Some(cycle.shell.install_escape_hook()?);
        Ok(cycle)
    }

    /// Post the menu at the pointer (or the screen center) and block until
    /// it is dismissed by selection, outside click, or Escape.
    fn post(&mut self) -> Result<()> {
        let (Some(menu), Some(surface)) = (&self.menu, &self.surface) else {
            return Ok(());
        };
        let at = match self.shell.pointer_position() {
            Some(point) => point,
            None => self.shell.screen_center(),
        };
        self.shell.run_modal(menu, surface, at)
    }

    /// The action chosen during the modal call, if any. Descriptors are
    /// cloned by value when the menu is built, so this never aliases the
    /// menu's own state.
    fn selection(&mut self) -> Option<ActionDescriptor> {
        let menu = self.menu.as_ref()?;
        self.shell.take_selection(menu)
    }
}

impl<P: PopupShell> Drop for ActiveCycle<'_, P> {
    fn drop(&mut self) {
        if let Some(hook) = self.hook.take()
            && let Err(err) = self.shell.remove_escape_hook(hook)
        {
            warn!(error = %err, "failed to remove escape hook");
        }
        if let Some(surface) = self.surface.take()
            && let Err(err) = self.shell.destroy_surface(surface)
        {
            warn!(error = %err, "failed to destroy capture surface");
        }
        self.menu = None;
        self.flag.end();
    }
}
