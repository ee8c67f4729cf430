//! Platform shell: the tao capture surface, muda menu materialization, and
//! the modal popup call.
//!
//! The overlay window is created once at startup and leased out per popup
//! cycle: "creating" the capture surface sizes it to the virtual screen,
//! shows it, raises it, and gives it focus; "destroying" it hides it again.
//! Everything here runs on the UI-owning thread.

use std::collections::HashMap;

use config::{ActionDescriptor, MenuNode};
use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};
use muda::{ContextMenu, IsMenuItem, MenuId, MenuItem, PredefinedMenuItem, Submenu};
use quickmenu_engine::{Error, Point, PopupShell, Result};
use tao::{
    dpi::{PhysicalPosition, PhysicalSize},
    event_loop::EventLoop,
    window::{Window, WindowBuilder, WindowId},
};
use tracing::debug;

use crate::{app::AppEvent, hotkey, pointer};

/// A built native menu plus the by-value action captures for its entries.
pub struct NativeMenu {
    /// The muda menu object graph.
    menu: muda::Menu,
    /// Entry id → that entry's own cloned descriptor.
    actions: HashMap<MenuId, ActionDescriptor>,
}

/// Marker for a visible capture surface lease.
pub struct SurfaceLease {
    /// Leases are only constructed by the shell.
    _priv: (),
}

/// Registration token for the temporary global Escape hook.
pub struct EscapeHookToken {
    /// The registered binding, needed for unregistration.
    hotkey: HotKey,
}

/// The real [`PopupShell`]: owns the overlay window and the hotkey manager.
pub struct TaoShell {
    /// The transparent always-on-top capture window.
    overlay: Window,
    /// Global hotkey subsystem, shared with the primary binding.
    manager: GlobalHotKeyManager,
}

impl TaoShell {
    /// Create the hidden overlay window and wrap the hotkey manager.
    pub fn new(
        event_loop: &EventLoop<AppEvent>,
        manager: GlobalHotKeyManager,
    ) -> std::result::Result<Self, tao::error::OsError> {
        let overlay = WindowBuilder::new()
            .with_title("quickmenu overlay")
            .with_visible(false)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(true)
            .build(event_loop)?;
        Ok(Self { overlay, manager })
    }

    /// Window id of the capture surface, for event routing.
    pub fn overlay_id(&self) -> WindowId {
        self.overlay.id()
    }

    /// Bounding box of all monitors, in physical pixels.
    fn virtual_screen(&self) -> (PhysicalPosition<i32>, PhysicalSize<u32>) {
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        let mut any = false;
        for monitor in self.overlay.available_monitors() {
            any = true;
            let pos = monitor.position();
            let size = monitor.size();
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x + size.width as i32);
            max_y = max_y.max(pos.y + size.height as i32);
        }
        if !any {
            return (PhysicalPosition::new(0, 0), PhysicalSize::new(1920, 1080));
        }
        (
            PhysicalPosition::new(min_x, min_y),
            PhysicalSize::new((max_x - min_x) as u32, (max_y - min_y) as u32),
        )
    }
}

impl PopupShell for TaoShell {
    type Menu = NativeMenu;
    type Surface = SurfaceLease;
    type EscapeHook = EscapeHookToken;

    fn build_menu(&mut self, nodes: &[MenuNode]) -> Result<NativeMenu> {
        // Drop selection events left over from a previous cycle.
        while muda::MenuEvent::receiver().try_recv().is_ok() {}

        let menu = muda::Menu::new();
        let mut actions = HashMap::new();
        for entry in build_entries(nodes, &mut actions)? {
            menu.append(entry.as_ref()).map_err(shell_error)?;
        }
        Ok(NativeMenu { menu, actions })
    }

    fn create_surface(&mut self) -> Result<SurfaceLease> {
        let (origin, size) = self.virtual_screen();
        self.overlay.set_outer_position(origin);
        self.overlay.set_inner_size(size);
        self.overlay.set_visible(true);
        self.overlay.set_always_on_top(true);
        // The surface must hold focus so it receives Escape.
        self.overlay.set_focus();
        Ok(SurfaceLease { _priv: () })
    }

    fn install_escape_hook(&mut self) -> Result<EscapeHookToken> {
        let hotkey = hotkey::escape_hook();
        self.manager.register(hotkey).map_err(shell_error)?;
        Ok(EscapeHookToken { hotkey })
    }

    fn pointer_position(&mut self) -> Option<Point> {
        pointer::position()
    }

    fn screen_center(&mut self) -> Point {
        let (origin, size) = self.virtual_screen();
        Point {
            x: f64::from(origin.x) + f64::from(size.width) / 2.0,
            y: f64::from(origin.y) + f64::from(size.height) / 2.0,
        }
    }

    fn run_modal(&mut self, menu: &NativeMenu, _surface: &SurfaceLease, at: Point) -> Result<()> {
        // The native popup call takes window-relative coordinates.
        let origin = self
            .overlay
            .outer_position()
            .unwrap_or_else(|_| PhysicalPosition::new(0, 0));
        let position = muda::dpi::Position::Physical(muda::dpi::PhysicalPosition::new(
            at.x as i32 - origin.x,
            at.y as i32 - origin.y,
        ));

        #[cfg(target_os = "macos")]
        // SAFETY: the overlay's NSView outlives the tracking loop, which
        // blocks right here until the menu is dismissed.
        unsafe {
            use tao::platform::macos::WindowExtMacOS;
            let _ = menu
                .menu
                .show_context_menu_for_nsview(self.overlay.ns_view() as _, Some(position));
        }
        #[cfg(target_os = "windows")]
        // SAFETY: the overlay's HWND is valid for the duration of the
        // blocking TrackPopupMenu loop.
        unsafe {
            use tao::platform::windows::WindowExtWindows;
            let _ = menu
                .menu
                .show_context_menu_for_hwnd(self.overlay.hwnd() as _, Some(position));
        }
        #[cfg(target_os = "linux")]
        {
            use gtk::prelude::*;
            use tao::platform::unix::WindowExtUnix;
            let gtk_win: &gtk::Window = self.overlay.gtk_window().upcast_ref();
            menu.menu
                .show_context_menu_for_gtk_window(gtk_win, Some(position));
            // The gtk popup call is not modal by itself: pump the loop until
            // the menu goes away so teardown stays ordered after dismissal.
            let gtk_menu = menu.menu.gtk_context_menu();
            while gtk_menu.is_visible() {
                gtk::main_iteration_do(true);
            }
        }
        Ok(())
    }

    fn request_unpost(&mut self) {
        debug!("unpost requested");
        // Native menus dismiss themselves on outside clicks and Escape; on
        // Windows an explicit cancel is available while the tracking loop
        // is still running.
        #[cfg(target_os = "windows")]
        // SAFETY: EndMenu takes no arguments and is safe to call with no
        // menu active.
        unsafe {
            windows_sys::Win32::UI::WindowsAndMessaging::EndMenu();
        }
    }

    fn take_selection(&mut self, menu: &NativeMenu) -> Option<ActionDescriptor> {
        let mut selected = None;
        while let Ok(event) = muda::MenuEvent::receiver().try_recv() {
            match menu.actions.get(event.id()) {
                Some(action) => selected = Some(action.clone()),
                None => debug!(id = ?event.id(), "menu event for an unknown entry"),
            }
        }
        selected
    }

    fn remove_escape_hook(&mut self, hook: EscapeHookToken) -> Result<()> {
        self.manager.unregister(hook.hotkey).map_err(shell_error)
    }

    fn destroy_surface(&mut self, _surface: SurfaceLease) -> Result<()> {
        self.overlay.set_visible(false);
        Ok(())
    }
}

/// Recursively materialize menu entries, recording each action entry's own
/// descriptor (cloned, never shared) keyed by its native id.
fn build_entries(
    nodes: &[MenuNode],
    actions: &mut HashMap<MenuId, ActionDescriptor>,
) -> Result<Vec<Box<dyn IsMenuItem>>> {
    let mut entries: Vec<Box<dyn IsMenuItem>> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            MenuNode::Separator => entries.push(Box::new(PredefinedMenuItem::separator())),
            MenuNode::Submenu { label, children } => {
                let submenu = Submenu::new(label, true);
                for child in build_entries(children, actions)? {
                    submenu.append(child.as_ref()).map_err(shell_error)?;
                }
                entries.push(Box::new(submenu));
            }
            MenuNode::Action { label, action } => {
                let item = MenuItem::new(label, true, None);
                actions.insert(item.id().clone(), action.clone());
                entries.push(Box::new(item));
            }
        }
    }
    Ok(entries)
}

/// Wrap a platform error into the engine's error type.
fn shell_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Shell(err.to_string())
}
